use crate::predicate::{build_predicates, Predicate};
use core_types::{Aggregate, AnalyticsRequest, RankSide, TradeColumn};

/// Compiler configuration. The base relation name is injected here rather
/// than hard-coded so the compiler can be pointed at fixtures in tests.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Fully qualified name of the aggregated trade table,
    /// e.g. `trading_data.trading_data_aggregated_1min`. Operator-trusted;
    /// rendered verbatim.
    pub base_table: String,
}

impl QueryConfig {
    pub fn new(base_table: impl Into<String>) -> Self {
        QueryConfig { base_table: base_table.into() }
    }
}

/// The ranking sub-view backing a top-N request: all rows of the base table
/// that match the request's filters, ranked by the requested column.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingView {
    pub source_table: String,
    pub predicates: Vec<Predicate>,
    pub order_column: TradeColumn,
    pub side: RankSide,
}

/// What the outer aggregate selects from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// The aggregated trade table itself.
    Base(String),
    /// The `ranked` sub-view defined by the query's `RankingView`.
    Ranked,
}

/// The aggregate expression of the outer select, kept structured until
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateExpr {
    /// `SUM(price * volume) / SUM(volume)`. A group whose volumes sum to
    /// zero is the storage engine's division-by-zero case to surface; the
    /// compiler does not special-case it.
    Vwap,
    Simple { func: Aggregate, column: TradeColumn },
}

impl AggregateExpr {
    /// The output column alias, e.g. `vwap` or `avg_price`.
    pub fn alias(&self) -> String {
        match self {
            AggregateExpr::Vwap => "vwap".to_string(),
            AggregateExpr::Simple { func, column } => {
                format!("{}_{}", func.as_str(), column.as_str())
            }
        }
    }
}

/// Grouping of the outer select: a caller-named column, optionally paired
/// with a synthesized time bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping {
    pub column: String,
    /// When set, group additionally by
    /// `FLOOR(EXTRACT(EPOCH FROM execution_time) / bucket_secs)`.
    pub bucket_secs: Option<i64>,
}

/// The intermediate representation of one analytical query. Built by
/// `compile`, consumed exactly once by `render`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub ranking: Option<RankingView>,
    pub source: Source,
    pub aggregate: AggregateExpr,
    pub grouping: Option<Grouping>,
    /// Predicates applied at the outer level. Empty for ranked queries: the
    /// filters were already applied inside the sub-view and the only outer
    /// condition is the rank cutoff.
    pub predicates: Vec<Predicate>,
    /// The top-N magnitude, bound as a parameter of `rank <= $k`.
    pub rank_cutoff: Option<i64>,
}

/// Compiles a validated request into the query IR.
///
/// Pure and total: every request that passed validation maps onto one of the
/// eight compiled shapes (base/ranked source x four grouping shapes) without
/// failing.
pub fn compile(config: &QueryConfig, request: &AnalyticsRequest) -> CompiledQuery {
    let predicates = build_predicates(&request.filters);

    let (ranking, source, predicates, rank_cutoff) = match request.top_n {
        None => (None, Source::Base(config.base_table.clone()), predicates, None),
        Some(top_n) => {
            let view = RankingView {
                source_table: config.base_table.clone(),
                predicates,
                order_column: request.column,
                side: top_n.side,
            };
            // The filters moved inside the view; outside, only the rank
            // cutoff remains.
            (Some(view), Source::Ranked, Vec::new(), Some(top_n.magnitude))
        }
    };

    let aggregate = match request.aggregate {
        Aggregate::Vwap => AggregateExpr::Vwap,
        func => AggregateExpr::Simple { func, column: request.column },
    };

    let grouping = match (&request.group_by, request.frequency_secs) {
        (Some(column), bucket_secs) => Some(Grouping { column: column.clone(), bucket_secs }),
        (None, Some(secs)) => {
            // Sampling without a grouping column is not a defined shape;
            // the frequency is dropped, matching the base behavior.
            tracing::debug!(freq_secs = secs, "freq supplied without groupby, ignoring");
            None
        }
        (None, None) => None,
    };

    CompiledQuery { ranking, source, aggregate, grouping, predicates, rank_cutoff }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{TopN, TradeFilters};
    use pretty_assertions::assert_eq;

    fn config() -> QueryConfig {
        QueryConfig::new("trading_data.trading_data_aggregated_1min")
    }

    fn request() -> AnalyticsRequest {
        AnalyticsRequest {
            column: TradeColumn::Price,
            aggregate: Aggregate::Avg,
            group_by: None,
            filters: TradeFilters::default(),
            frequency_secs: None,
            top_n: None,
        }
    }

    #[test]
    fn plain_request_selects_from_the_base_table() {
        let compiled = compile(&config(), &request());
        assert_eq!(compiled.source, Source::Base(config().base_table));
        assert_eq!(compiled.ranking, None);
        assert_eq!(compiled.rank_cutoff, None);
        assert_eq!(compiled.grouping, None);
    }

    #[test]
    fn top_n_moves_the_filters_into_the_ranking_view() {
        let req = AnalyticsRequest {
            filters: TradeFilters { market: Some("de".to_string()), ..TradeFilters::default() },
            top_n: Some(TopN { magnitude: 5, side: RankSide::Largest }),
            ..request()
        };
        let compiled = compile(&config(), &req);

        assert_eq!(compiled.source, Source::Ranked);
        assert_eq!(compiled.rank_cutoff, Some(5));
        // Outer predicates are replaced by the rank cutoff; the market
        // filter lives inside the view only.
        assert!(compiled.predicates.is_empty());
        let view = compiled.ranking.unwrap();
        assert_eq!(view.predicates.len(), 1);
        assert_eq!(view.order_column, TradeColumn::Price);
        assert_eq!(view.side, RankSide::Largest);
    }

    #[test]
    fn vwap_compiles_to_the_dedicated_expression() {
        let req = AnalyticsRequest { aggregate: Aggregate::Vwap, ..request() };
        let compiled = compile(&config(), &req);
        assert_eq!(compiled.aggregate, AggregateExpr::Vwap);
        assert_eq!(compiled.aggregate.alias(), "vwap");
    }

    #[test]
    fn simple_aggregate_alias_combines_function_and_column() {
        let req = AnalyticsRequest {
            column: TradeColumn::Volume,
            aggregate: Aggregate::Max,
            ..request()
        };
        assert_eq!(compile(&config(), &req).aggregate.alias(), "max_volume");
    }

    #[test]
    fn frequency_without_groupby_is_ignored() {
        let req = AnalyticsRequest { frequency_secs: Some(300), ..request() };
        assert_eq!(compile(&config(), &req).grouping, None);
    }

    #[test]
    fn frequency_with_groupby_sets_the_bucket() {
        let req = AnalyticsRequest {
            group_by: Some("product".to_string()),
            frequency_secs: Some(300),
            ..request()
        };
        assert_eq!(
            compile(&config(), &req).grouping,
            Some(Grouping { column: "product".to_string(), bucket_secs: Some(300) })
        );
    }

    #[test]
    fn compilation_is_deterministic() {
        let req = AnalyticsRequest {
            group_by: Some("market".to_string()),
            filters: TradeFilters {
                market: Some("uk".to_string()),
                trade_id: Some(7),
                ..TradeFilters::default()
            },
            top_n: Some(TopN { magnitude: 3, side: RankSide::Smallest }),
            ..request()
        };
        assert_eq!(compile(&config(), &req), compile(&config(), &req));
    }
}
