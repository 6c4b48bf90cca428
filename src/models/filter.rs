use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::NormalizedInvoice;

/// Division value meaning "no division filter"
pub const ALL_DIVISIONS: &str = "all";

/// Query string of the executive report: `fromDate`, `toDate`, `division`, `branch`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub division: Option<String>,
    pub branch: Option<String>,
}

/// Parsed report filter; date bounds are inclusive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub division: Option<String>,
    /// Accepted but not applied
    pub branch: Option<String>,
}

fn parse_bound(field: &'static str, value: Option<String>) -> Result<Option<NaiveDate>, AppError> {
    let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| AppError::InvalidFilter {
            field,
            reason: format!("expected YYYY-MM-DD, got `{}` ({})", value, e),
        })
}

impl TryFrom<ReportQuery> for ReportFilter {
    type Error = AppError;

    fn try_from(q: ReportQuery) -> Result<Self, Self::Error> {
        let from = parse_bound("fromDate", q.from_date)?;
        let to = parse_bound("toDate", q.to_date)?;
        let division = q
            .division
            .filter(|d| !d.is_empty() && d != ALL_DIVISIONS);
        let branch = q.branch.filter(|b| !b.is_empty());
        Ok(Self { from, to, division, branch })
    }
}

impl ReportFilter {
    pub fn matches(&self, invoice: &NormalizedInvoice) -> bool {
        if let Some(division) = &self.division {
            if invoice.division_name != *division {
                return false;
            }
        }
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        // A bounded range needs a date to test against
        let Some(date) = invoice.invoice_date else {
            return false;
        };
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}
