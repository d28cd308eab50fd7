use chrono::NaiveDateTime;
use core_types::TradeFilters;

/// A single value bound as a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Int(i64),
    Text(String),
    Timestamp(NaiveDateTime),
}

/// Comparison operator of a filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    /// Inclusive lower bound of the half-open time range.
    Gte,
    /// Exclusive upper bound of the half-open time range.
    Lt,
    /// Cutoff applied to the synthesized rank column.
    Lte,
}

impl CmpOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Gte => ">=",
            CmpOp::Lt => "<",
            CmpOp::Lte => "<=",
        }
    }
}

/// One `(column, operator, value)` filter triple. Predicates are combined
/// conjunctively; their order does not change the result set but is kept
/// deterministic so identical requests render identical text.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: &'static str,
    pub op: CmpOp,
    pub value: ScalarValue,
}

impl Predicate {
    fn eq(column: &'static str, value: ScalarValue) -> Self {
        Predicate { column, op: CmpOp::Eq, value }
    }
}

/// Assembles the predicate set for the present filter fields, in the fixed
/// emission order: dt_from, dt_to, market, trade_id, product, product_type,
/// product_duration.
pub fn build_predicates(filters: &TradeFilters) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    if let Some(from) = filters.from {
        predicates.push(Predicate {
            column: "execution_time",
            op: CmpOp::Gte,
            value: ScalarValue::Timestamp(from),
        });
    }
    if let Some(to) = filters.to {
        predicates.push(Predicate {
            column: "execution_time",
            op: CmpOp::Lt,
            value: ScalarValue::Timestamp(to),
        });
    }
    if let Some(market) = &filters.market {
        predicates.push(Predicate::eq("market", ScalarValue::Text(market.clone())));
    }
    if let Some(trade_id) = filters.trade_id {
        predicates.push(Predicate::eq("trade_id", ScalarValue::Int(trade_id)));
    }
    if let Some(product) = &filters.product {
        predicates.push(Predicate::eq("product", ScalarValue::Text(product.clone())));
    }
    if let Some(product_type) = &filters.product_type {
        predicates.push(Predicate::eq("product_type", ScalarValue::Text(product_type.clone())));
    }
    if let Some(product_duration) = &filters.product_duration {
        predicates.push(Predicate::eq(
            "product_duration",
            ScalarValue::Text(product_duration.clone()),
        ));
    }

    predicates
}
