use bigdecimal::{BigDecimal, Zero};
use rayon::prelude::*;

use crate::models::{fields, NormalizedInvoice, RawRecord, UNKNOWN};
use crate::service::index::{ReferenceIndex, ReferenceIndexes};
use crate::service::returns::{totals_for, ReturnGroups};

fn resolve_name(index: &ReferenceIndex, key: &str, name_field: &str) -> String {
    index
        .get(key)
        .and_then(|row| row.text(name_field))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Joins one raw invoice against the reference indexes and its returns
///
/// Division is reached through the salesman: an invoice whose salesman is
/// not in the index has an unknown division. Never fails; missing or
/// malformed fields become zero or [`UNKNOWN`].
pub fn normalize(
    raw: &RawRecord,
    returns: &ReturnGroups,
    indexes: &ReferenceIndexes,
) -> NormalizedInvoice {
    use fields::invoice as f;

    let invoice_no = raw.text(f::INVOICE_NO).unwrap_or_default();
    let customer_code = raw.text(f::CUSTOMER_CODE).unwrap_or_default();
    let salesman_id = raw.text(f::SALESMAN_ID).unwrap_or_default();
    let branch_id = raw.text(f::BRANCH_ID).unwrap_or_default();

    // 1. salesman -> division
    let salesman = indexes.salesmen.get(&salesman_id);
    let salesman_name = salesman
        .and_then(|s| s.text(fields::salesman::NAME))
        .unwrap_or_else(|| UNKNOWN.to_string());
    let salesman_target = salesman
        .map(|s| s.money(fields::salesman::TARGET))
        .filter(|t| *t > BigDecimal::zero());
    let division_id = salesman.and_then(|s| s.text(fields::salesman::DIVISION_ID));
    let division_name = division_id
        .as_deref()
        .map(|id| resolve_name(&indexes.divisions, id, fields::division::NAME))
        .unwrap_or_else(|| UNKNOWN.to_string());

    // 2. customer, branch
    let customer_name = resolve_name(&indexes.customers, &customer_code, fields::customer::NAME);
    let branch_name = resolve_name(&indexes.branches, &branch_id, fields::branch::NAME);

    // 3. money
    let gross_amount = raw.money(f::GROSS_AMOUNT);
    let discount_amount = raw.money(f::DISCOUNT_AMOUNT);
    let ret = totals_for(returns, &invoice_no);
    let net_sales = NormalizedInvoice::compute_net_sales(
        &gross_amount,
        &discount_amount,
        &ret.amount,
        &ret.discount,
    );

    NormalizedInvoice {
        id: raw.text(f::ID).unwrap_or_default(),
        invoice_no,
        order_id: raw.text(f::ORDER_ID),
        invoice_date: raw.date(f::INVOICE_DATE),
        customer_code,
        customer_name,
        salesman_id,
        salesman_name,
        salesman_target,
        division_id,
        division_name,
        branch_id,
        branch_name,
        gross_amount,
        discount_amount,
        return_amount: ret.amount,
        return_discount: ret.discount,
        net_sales,
    }
}

/// Normalizes every invoice in parallel; output keeps input order
pub fn normalize_all(
    invoices: &[RawRecord],
    returns: &ReturnGroups,
    indexes: &ReferenceIndexes,
) -> Vec<NormalizedInvoice> {
    invoices
        .par_iter()
        .map(|raw| normalize(raw, returns, indexes))
        .collect()
}
