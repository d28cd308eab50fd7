pub mod enums;
pub mod error;
pub mod request;

// Re-export the core types to provide a clean public API.
pub use enums::{Aggregate, RankSide, TradeColumn};
pub use error::RequestError;
pub use request::{AnalyticsRequest, RawAnalyticsRequest, TopN, TradeFilters};
