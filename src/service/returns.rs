use bigdecimal::{BigDecimal, Zero};
use std::collections::HashMap;

use crate::models::{fields, RawRecord};

/// invoice number -> returns against it, in source order
pub type ReturnGroups = HashMap<String, Vec<RawRecord>>;

/// Groups return rows by the invoice number they adjust
///
/// Invoices with no returns are absent. Rows without an invoice number
/// cannot be matched and are dropped.
pub fn reconcile(returns: &[RawRecord]) -> ReturnGroups {
    let mut groups: ReturnGroups = HashMap::new();
    let mut unmatched = 0usize;
    for ret in returns {
        match ret.text(fields::sales_return::INVOICE_NO) {
            Some(invoice_no) => groups.entry(invoice_no).or_default().push(ret.clone()),
            None => unmatched += 1,
        }
    }
    if unmatched > 0 {
        tracing::warn!("{} return rows have no invoice number, ignored", unmatched);
    }
    groups
}

/// Summed returns for one invoice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnTotals {
    pub amount: BigDecimal,
    pub discount: BigDecimal,
}

/// Totals for `invoice_no`; zero when it has no returns
pub fn totals_for(groups: &ReturnGroups, invoice_no: &str) -> ReturnTotals {
    let mut totals = ReturnTotals {
        amount: BigDecimal::zero(),
        discount: BigDecimal::zero(),
    };
    if let Some(rows) = groups.get(invoice_no) {
        for row in rows {
            totals.amount += row.money(fields::sales_return::AMOUNT);
            totals.discount += row.money(fields::sales_return::DISCOUNT_AMOUNT);
        }
    }
    totals
}
