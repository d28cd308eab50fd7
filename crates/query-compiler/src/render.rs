use crate::compile::{AggregateExpr, CompiledQuery, Source};
use crate::error::CompilerError;
use crate::predicate::{Predicate, ScalarValue};
use core_types::RankSide;
use std::fmt::Write;

/// Final query text plus the values to bind, in placeholder order. `$1`
/// refers to `params[0]` and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuery {
    pub sql: String,
    pub params: Vec<ScalarValue>,
}

/// Renders a compiled query to parameterized text.
///
/// Rendering is deterministic: the same `CompiledQuery` always produces
/// byte-identical text and the same parameter list. Request values are bound
/// via placeholders, never written into the text; the only caller-supplied
/// string that reaches the text is the group-by column name, which is
/// emitted as a quoted identifier.
pub fn render(query: &CompiledQuery) -> Result<RenderedQuery, CompilerError> {
    let ranked_source = matches!(query.source, Source::Ranked);
    if ranked_source != query.ranking.is_some() {
        return Err(CompilerError::InvariantViolation(
            "a ranked source and a ranking sub-view must be set together",
        ));
    }
    if query.ranking.is_some() != query.rank_cutoff.is_some() {
        return Err(CompilerError::InvariantViolation(
            "a ranking sub-view requires a rank cutoff, and vice versa",
        ));
    }

    let mut sql = String::new();
    let mut params: Vec<ScalarValue> = Vec::new();

    if let Some(view) = &query.ranking {
        sql.push_str("WITH ranked AS (SELECT *, ROW_NUMBER() OVER (ORDER BY ");
        sql.push_str(view.order_column.as_str());
        sql.push_str(match view.side {
            RankSide::Largest => " DESC",
            RankSide::Smallest => " ASC",
        });
        // Secondary trade_id ordering keeps ties deterministic.
        sql.push_str(", trade_id) AS rank FROM ");
        sql.push_str(&view.source_table);
        let mut first = true;
        for predicate in &view.predicates {
            push_predicate(&mut sql, &mut params, predicate, &mut first);
        }
        sql.push_str(") ");
    }

    sql.push_str("SELECT ");
    if let Some(grouping) = &query.grouping {
        sql.push_str(&quote_ident(&grouping.column));
        sql.push_str(", ");
        if let Some(secs) = grouping.bucket_secs {
            let _ = write!(
                sql,
                "FLOOR(EXTRACT(EPOCH FROM execution_time) / {secs})::BIGINT AS time_bucket, "
            );
        }
    }
    push_aggregate(&mut sql, &query.aggregate);

    sql.push_str(" FROM ");
    match &query.source {
        Source::Base(table) => sql.push_str(table),
        Source::Ranked => sql.push_str("ranked"),
    }

    let mut first = true;
    for predicate in &query.predicates {
        push_predicate(&mut sql, &mut params, predicate, &mut first);
    }
    if let Some(cutoff) = query.rank_cutoff {
        sql.push_str(if first { " WHERE " } else { " AND " });
        params.push(ScalarValue::Int(cutoff));
        let _ = write!(sql, "rank <= ${}", params.len());
    }

    if let Some(grouping) = &query.grouping {
        sql.push_str(" GROUP BY ");
        sql.push_str(&quote_ident(&grouping.column));
        if grouping.bucket_secs.is_some() {
            sql.push_str(", time_bucket");
        }
    }

    Ok(RenderedQuery { sql, params })
}

fn push_predicate(
    sql: &mut String,
    params: &mut Vec<ScalarValue>,
    predicate: &Predicate,
    first: &mut bool,
) {
    sql.push_str(if *first { " WHERE " } else { " AND " });
    *first = false;
    params.push(predicate.value.clone());
    let _ = write!(sql, "{} {} ${}", predicate.column, predicate.op.as_sql(), params.len());
}

fn push_aggregate(sql: &mut String, aggregate: &AggregateExpr) {
    match aggregate {
        AggregateExpr::Vwap => sql.push_str("SUM(price * volume) / SUM(volume) AS vwap"),
        AggregateExpr::Simple { func, column } => {
            let _ = write!(
                sql,
                "{}({}) AS {}_{}",
                func.as_str(),
                column.as_str(),
                func.as_str(),
                column.as_str()
            );
        }
    }
}

/// Double-quotes an identifier, doubling any embedded quote. The group-by
/// column name is the one request string that cannot be a bind parameter.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
