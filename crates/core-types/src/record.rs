use crate::error::CoreError;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// The sentinel category that all absent or empty strategy labels collapse
/// into, so downstream grouping sees one deterministic "no strategy" bucket
/// rather than a mix of `null`s and empty strings.
pub const NO_STRATEGY: &str = "No Strategy";

/// A trade record exactly as the journal's data store returns it.
///
/// Every field is optional because the upstream store performs no validation
/// of its own; canonicalization rules live in [`TradeRecord::from_raw`].
/// Deserialization is lenient per field: a value of the wrong shape (a
/// string where a number belongs, an object, a bare number for a date)
/// becomes absent instead of failing, so one malformed field never aborts
/// the whole batch at the serde boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTradeRecord {
    /// Calendar day of the trade, "YYYY-MM-DD". A record without a parsable
    /// date cannot be aggregated and is rejected at normalization.
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
    /// Wall-clock time of day, "HH:MM:SS". Used only for hour bucketing.
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<String>,
    /// Free-text asset symbol.
    #[serde(default, deserialize_with = "lenient")]
    pub asset: Option<String>,
    /// Free-text strategy label; absence is a category, not an error.
    #[serde(default, deserialize_with = "lenient")]
    pub strategy: Option<String>,
    /// Number of contracts traded (informational).
    #[serde(default, deserialize_with = "lenient")]
    pub contracts: Option<u32>,
    /// Transaction costs (informational).
    #[serde(default, deserialize_with = "lenient")]
    pub costs: Option<Decimal>,
    /// Net P&L of the trade. Signed; exactly zero is a valid result.
    #[serde(default, deserialize_with = "lenient")]
    pub result: Option<Decimal>,
}

/// A field value that may or may not have the expected shape.
///
/// The `Garbage` arm swallows any well-formed value of the wrong type, so
/// the untagged match can never fail on valid input.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Text(String),
    Garbage(IgnoredAny),
}

/// Deserializes a field to `None` on shape mismatch instead of erroring.
///
/// Numeric strings still parse through the `Text` arm, matching how the
/// journal's export sometimes quotes numbers.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + std::str::FromStr,
{
    Ok(match Option::<Lenient<T>>::deserialize(deserializer)? {
        Some(Lenient::Value(value)) => Some(value),
        Some(Lenient::Text(text)) => text.trim().parse().ok(),
        Some(Lenient::Garbage(IgnoredAny)) | None => None,
    })
}

/// The canonical, fully-typed trade record every analytics component consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub asset: String,
    pub strategy: String,
    pub contracts: u32,
    pub costs: Decimal,
    pub result: Decimal,
}

impl TradeRecord {
    /// Canonicalizes a single raw record.
    ///
    /// Coercion rules:
    /// - missing `result` / `costs` become `0`, missing `contracts` becomes `1`;
    /// - a missing or empty `strategy` collapses into [`NO_STRATEGY`];
    /// - a missing or empty `time` becomes `00:00:00` (it only feeds hour
    ///   bucketing, so midnight is a harmless default);
    /// - a missing or unparsable `date`, or a present-but-unparsable `time`,
    ///   is an error, since letting either through would silently corrupt the
    ///   aggregates built on top of it.
    pub fn from_raw(raw: &RawTradeRecord) -> Result<Self, CoreError> {
        let date_str = raw
            .date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::InvalidDate(String::new()))?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| CoreError::InvalidDate(date_str.to_string()))?;

        let time = match raw.time.as_deref().map(str::trim) {
            None | Some("") => NaiveTime::MIN,
            Some(t) => NaiveTime::parse_from_str(t, "%H:%M:%S")
                .map_err(|_| CoreError::InvalidTime(t.to_string()))?,
        };

        let strategy = match raw.strategy.as_deref().map(str::trim) {
            None | Some("") => NO_STRATEGY.to_string(),
            Some(s) => s.to_string(),
        };

        Ok(Self {
            date,
            time,
            asset: raw.asset.clone().unwrap_or_default(),
            strategy,
            contracts: raw.contracts.unwrap_or(1),
            costs: raw.costs.unwrap_or(Decimal::ZERO),
            result: raw.result.unwrap_or(Decimal::ZERO),
        })
    }

    /// The hour-of-day this trade executed in (0..=23).
    pub fn hour(&self) -> u32 {
        use chrono::Timelike;
        self.time.hour()
    }
}
