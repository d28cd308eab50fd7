use crate::enums::{Aggregate, RankSide, TradeColumn};
use crate::error::RequestError;
use chrono::NaiveDateTime;
use serde::Deserialize;

/// The timestamp format accepted on `dt_from` / `dt_to`, e.g. `202401311430`.
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

/// The analytics request exactly as it arrives from the transport layer:
/// a flat set of optional fields, still unchecked against the cross-field
/// rules. Field names match the HTTP query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAnalyticsRequest {
    pub col: TradeColumn,
    pub agg: Aggregate,
    pub groupby: Option<String>,
    pub product_duration: Option<String>,
    pub product_type: Option<String>,
    pub product: Option<String>,
    pub market: Option<String>,
    pub trade_id: Option<i64>,
    pub dt_from: Option<String>,
    pub dt_to: Option<String>,
    pub freq: Option<String>,
    pub n_largest: Option<i64>,
    pub n_smallest: Option<i64>,
}

/// The equality and range filters of a request. Values are opaque to the
/// compiler: they are only ever bound as query parameters, never spliced
/// into query text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeFilters {
    pub trade_id: Option<i64>,
    pub market: Option<String>,
    pub product: Option<String>,
    pub product_type: Option<String>,
    pub product_duration: Option<String>,
    /// Inclusive lower bound of the execution-time range.
    pub from: Option<NaiveDateTime>,
    /// Exclusive upper bound of the execution-time range.
    pub to: Option<NaiveDateTime>,
}

/// Restricts aggregation to the N most extreme rows by the requested column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopN {
    pub magnitude: i64,
    pub side: RankSide,
}

/// A request that has passed all cross-field checks and field parsing.
/// Consumed by the query compiler to build exactly one compiled query.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsRequest {
    pub column: TradeColumn,
    pub aggregate: Aggregate,
    pub group_by: Option<String>,
    pub filters: TradeFilters,
    /// Sampling interval in seconds, parsed from `freq`.
    pub frequency_secs: Option<i64>,
    pub top_n: Option<TopN>,
}

impl RawAnalyticsRequest {
    /// Validates the raw request and produces the typed form.
    ///
    /// Checks run in a fixed order: top-N exclusivity, vwap/column
    /// compatibility, timestamp parsing, frequency parsing. Enumerated filter
    /// values (market, product, ...) are deliberately not checked against any
    /// vocabulary; downstream they are bound parameters only.
    pub fn validate(self) -> Result<AnalyticsRequest, RequestError> {
        if self.n_largest.is_some() && self.n_smallest.is_some() {
            return Err(RequestError::InvalidRequest(
                "n_largest and n_smallest can't be used at the same time".to_string(),
            ));
        }

        if self.agg == Aggregate::Vwap && self.col == TradeColumn::Volume {
            return Err(RequestError::InvalidRequest(
                "col should be price to calculate the volume-weighted average price".to_string(),
            ));
        }

        let from = self
            .dt_from
            .as_deref()
            .map(|v| parse_timestamp("dt_from", v))
            .transpose()?;
        let to = self
            .dt_to
            .as_deref()
            .map(|v| parse_timestamp("dt_to", v))
            .transpose()?;

        let frequency_secs = self
            .freq
            .as_deref()
            .map(parse_frequency)
            .transpose()?;

        let top_n = match (self.n_largest, self.n_smallest) {
            (Some(magnitude), None) => Some(TopN { magnitude, side: RankSide::Largest }),
            (None, Some(magnitude)) => Some(TopN { magnitude, side: RankSide::Smallest }),
            _ => None,
        };

        Ok(AnalyticsRequest {
            column: self.col,
            aggregate: self.agg,
            group_by: self.groupby,
            filters: TradeFilters {
                trade_id: self.trade_id,
                market: self.market,
                product: self.product,
                product_type: self.product_type,
                product_duration: self.product_duration,
                from,
                to,
            },
            frequency_secs,
            top_n,
        })
    }
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, RequestError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| {
        RequestError::InvalidTimestamp { field, value: value.to_string() }
    })
}

/// Parses a sampling interval like `5m`, `1h30m` or a bare number of seconds
/// into a positive second count.
pub fn parse_frequency(value: &str) -> Result<i64, RequestError> {
    let invalid = || RequestError::InvalidFrequency(value.to_string());

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let mut total: i64 = 0;
    let mut digits = String::new();
    for c in trimmed.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let unit: i64 = match c {
            's' => 1,
            'm' => 60,
            'h' => 3_600,
            'd' => 86_400,
            _ => return Err(invalid()),
        };
        if digits.is_empty() {
            return Err(invalid());
        }
        let n: i64 = digits.parse().map_err(|_| invalid())?;
        total = total
            .checked_add(n.checked_mul(unit).ok_or_else(invalid)?)
            .ok_or_else(invalid)?;
        digits.clear();
    }

    // A trailing bare number counts as seconds.
    if !digits.is_empty() {
        let n: i64 = digits.parse().map_err(|_| invalid())?;
        total = total.checked_add(n).ok_or_else(invalid)?;
    }

    if total <= 0 {
        return Err(invalid());
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw() -> RawAnalyticsRequest {
        RawAnalyticsRequest {
            col: TradeColumn::Price,
            agg: Aggregate::Avg,
            groupby: None,
            product_duration: None,
            product_type: None,
            product: None,
            market: None,
            trade_id: None,
            dt_from: None,
            dt_to: None,
            freq: None,
            n_largest: None,
            n_smallest: None,
        }
    }

    #[test]
    fn both_top_n_selectors_are_rejected() {
        let request = RawAnalyticsRequest {
            n_largest: Some(5),
            n_smallest: Some(3),
            // The rest of the request is irrelevant; exclusivity wins first.
            groupby: Some("market".to_string()),
            freq: Some("not-a-duration".to_string()),
            ..raw()
        };
        assert!(matches!(request.validate(), Err(RequestError::InvalidRequest(_))));
    }

    #[test]
    fn vwap_over_volume_is_rejected() {
        let request = RawAnalyticsRequest {
            col: TradeColumn::Volume,
            agg: Aggregate::Vwap,
            ..raw()
        };
        assert!(matches!(request.validate(), Err(RequestError::InvalidRequest(_))));
    }

    #[test]
    fn vwap_over_price_is_accepted() {
        let request = RawAnalyticsRequest { agg: Aggregate::Vwap, ..raw() };
        let validated = request.validate().unwrap();
        assert_eq!(validated.aggregate, Aggregate::Vwap);
        assert_eq!(validated.column, TradeColumn::Price);
    }

    #[test]
    fn timestamps_parse_under_the_fixed_format() {
        let request = RawAnalyticsRequest {
            dt_from: Some("202401311430".to_string()),
            dt_to: Some("202402010000".to_string()),
            ..raw()
        };
        let validated = request.validate().unwrap();
        assert_eq!(
            validated.filters.from,
            Some(
                NaiveDateTime::parse_from_str("2024-01-31 14:30", "%Y-%m-%d %H:%M").unwrap()
            )
        );
        assert_eq!(
            validated.filters.to,
            Some(
                NaiveDateTime::parse_from_str("2024-02-01 00:00", "%Y-%m-%d %H:%M").unwrap()
            )
        );
    }

    #[test]
    fn malformed_timestamp_names_the_field() {
        let request = RawAnalyticsRequest { dt_to: Some("2024-01-31".to_string()), ..raw() };
        assert_eq!(
            request.validate(),
            Err(RequestError::InvalidTimestamp {
                field: "dt_to",
                value: "2024-01-31".to_string()
            })
        );
    }

    #[test]
    fn top_n_side_follows_the_selector() {
        let largest = RawAnalyticsRequest { n_largest: Some(5), ..raw() }.validate().unwrap();
        assert_eq!(largest.top_n, Some(TopN { magnitude: 5, side: RankSide::Largest }));

        let smallest = RawAnalyticsRequest { n_smallest: Some(7), ..raw() }.validate().unwrap();
        assert_eq!(smallest.top_n, Some(TopN { magnitude: 7, side: RankSide::Smallest }));
    }

    #[test]
    fn frequency_grammar() {
        assert_eq!(parse_frequency("5m").unwrap(), 300);
        assert_eq!(parse_frequency("1h").unwrap(), 3_600);
        assert_eq!(parse_frequency("1h30m").unwrap(), 5_400);
        assert_eq!(parse_frequency("90").unwrap(), 90);
        assert_eq!(parse_frequency("2d").unwrap(), 172_800);

        assert!(parse_frequency("").is_err());
        assert!(parse_frequency("0m").is_err());
        assert!(parse_frequency("m5").is_err());
        assert!(parse_frequency("five minutes").is_err());
    }

    #[test]
    fn malformed_frequency_is_reported_as_such() {
        let request = RawAnalyticsRequest { freq: Some("5x".to_string()), ..raw() };
        assert_eq!(
            request.validate(),
            Err(RequestError::InvalidFrequency("5x".to_string()))
        );
    }
}
