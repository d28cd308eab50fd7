use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerSettings,
    pub analytics: AnalyticsSettings,
}

/// Where the analytics web server binds.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// The interface to listen on (e.g., "0.0.0.0").
    pub host: String,
    pub port: u16,
}

/// Settings consumed by the query compiler.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSettings {
    /// Fully qualified name of the aggregated trade table the compiler
    /// selects from (e.g., "trading_data.trading_data_aggregated_1min").
    pub table: String,
}
