use serde::{Deserialize, Serialize};

/// A queryable numeric column of the aggregated trade table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeColumn {
    Price,
    Volume,
}

impl TradeColumn {
    /// Returns the column name as it appears in the table schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeColumn::Price => "price",
            TradeColumn::Volume => "volume",
        }
    }
}

/// The aggregate function requested over the selected column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Min,
    Max,
    Avg,
    /// Volume-weighted average price. Only meaningful over the price column.
    Vwap,
}

impl Aggregate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregate::Min => "min",
            Aggregate::Max => "max",
            Aggregate::Avg => "avg",
            Aggregate::Vwap => "vwap",
        }
    }
}

/// Which end of the ranked rows a top-N selector keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankSide {
    Largest,
    Smallest,
}
