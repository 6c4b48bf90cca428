use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Widest decimal exponent a monetary value may carry, either way
const MAX_MONEY_EXPONENT: i64 = 18;

/// One untyped row as delivered by the item store
///
/// Nothing about the row is trusted: fields may be missing, null, numbers
/// sent as strings or strings sent as numbers. The accessors below are the
/// only way the rest of the crate reads a row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Trimmed, non-empty text; numbers and booleans are rendered as text
    pub fn text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Monetary value; anything that is not a finite number is zero
    ///
    /// Values whose exponent lies outside `±MAX_MONEY_EXPONENT` are also zero,
    /// since rescaling them during addition grows with the exponent.
    pub fn money(&self, field: &str) -> BigDecimal {
        let parsed = match self.0.get(field) {
            Some(Value::Number(n)) => BigDecimal::from_str(&n.to_string()).ok(),
            Some(Value::String(s)) => {
                let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
                BigDecimal::from_str(&cleaned).ok()
            }
            _ => None,
        };
        parsed
            .filter(|v| v.as_bigint_and_exponent().1.abs() <= MAX_MONEY_EXPONENT)
            .unwrap_or_else(BigDecimal::zero)
    }

    /// Calendar date from `YYYY-MM-DD...`; a time-of-day suffix is dropped
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        let raw = self.text(field)?;
        let head = raw.get(..10)?;
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }
}

impl From<Value> for RawRecord {
    /// Non-object values become an empty record
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}
