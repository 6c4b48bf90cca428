use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::collections::BTreeMap;

use crate::models::{
    AggregateView, CustomerRank, DivisionTotal, KpiBlock, NormalizedInvoice, ReportFilter,
    SalesmanRank, SummaryBand, TrendPoint,
};

/// Ranking parameters
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub top_n: usize,
    /// Target for salesmen whose record carries none
    pub default_target: BigDecimal,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            default_target: BigDecimal::from(650_000),
        }
    }
}

/// part / whole * 100, zero when whole is zero
pub fn percent(part: &BigDecimal, whole: &BigDecimal) -> BigDecimal {
    if whole.is_zero() {
        return BigDecimal::zero();
    }
    (part * BigDecimal::from(100)) / whole
}

fn sum_by<F>(invoices: &[&NormalizedInvoice], f: F) -> BigDecimal
where
    F: Fn(&NormalizedInvoice) -> &BigDecimal,
{
    invoices
        .iter()
        .fold(BigDecimal::zero(), |acc, inv| acc + f(*inv))
}

/// Filters `invoices` and derives every reporting view from the result
pub fn aggregate(
    invoices: &[NormalizedInvoice],
    filter: &ReportFilter,
    options: &AggregateOptions,
) -> AggregateView {
    let filtered: Vec<&NormalizedInvoice> = invoices.iter().filter(|inv| filter.matches(inv)).collect();
    tracing::debug!("aggregating {} of {} invoices", filtered.len(), invoices.len());

    let kpi = kpi_block(&filtered);
    let top_customers = top_customers(&filtered, &kpi.total_net_sales, options.top_n);

    AggregateView {
        trend: sales_trend(&filtered),
        division_sales: division_totals(&filtered),
        top_customers,
        top_salesmen: top_salesmen(&filtered, options),
        summary: summary_band(&filtered),
        kpi,
    }
}

pub fn kpi_block(invoices: &[&NormalizedInvoice]) -> KpiBlock {
    let total_net_sales = sum_by(invoices, |i| &i.net_sales);
    let total_gross_sales = sum_by(invoices, |i| &i.gross_amount);
    let gross_margin = percent(&total_net_sales, &total_gross_sales);
    KpiBlock {
        total_net_sales,
        total_gross_sales,
        gross_margin,
    }
}

/// Net sales per calendar day, ascending; undated invoices are left out
pub fn sales_trend(invoices: &[&NormalizedInvoice]) -> Vec<TrendPoint> {
    let mut by_date: BTreeMap<NaiveDate, BigDecimal> = BTreeMap::new();
    for inv in invoices {
        if let Some(date) = inv.invoice_date {
            *by_date.entry(date).or_insert_with(BigDecimal::zero) += &inv.net_sales;
        }
    }
    by_date
        .into_iter()
        .map(|(date, net_sales)| TrendPoint { date, net_sales })
        .collect()
}

/// Net sales per division name, descending; ties keep first-seen order
pub fn division_totals(invoices: &[&NormalizedInvoice]) -> Vec<DivisionTotal> {
    let mut by_division: IndexMap<&str, BigDecimal> = IndexMap::new();
    for inv in invoices {
        *by_division
            .entry(inv.division_name.as_str())
            .or_insert_with(BigDecimal::zero) += &inv.net_sales;
    }
    let mut totals: Vec<DivisionTotal> = by_division
        .into_iter()
        .map(|(division, net_sales)| DivisionTotal {
            division: division.to_string(),
            net_sales,
        })
        .collect();
    totals.sort_by(|a, b| b.net_sales.cmp(&a.net_sales));
    totals
}

/// Per-group running totals; division and branch come from the group's first invoice
struct GroupTotals<'a> {
    first: &'a NormalizedInvoice,
    net_sales: BigDecimal,
    invoice_count: usize,
    last_invoice_date: Option<NaiveDate>,
}

fn group_by_key<'a, K>(invoices: &[&'a NormalizedInvoice], key: K) -> Vec<GroupTotals<'a>>
where
    K: Fn(&'a NormalizedInvoice) -> &'a str,
{
    let mut groups: IndexMap<&'a str, GroupTotals<'a>> = IndexMap::new();
    for &inv in invoices {
        let g = groups.entry(key(inv)).or_insert_with(|| GroupTotals {
            first: inv,
            net_sales: BigDecimal::zero(),
            invoice_count: 0,
            last_invoice_date: None,
        });
        g.net_sales += &inv.net_sales;
        g.invoice_count += 1;
        g.last_invoice_date = g.last_invoice_date.max(inv.invoice_date);
    }
    let mut ranked: Vec<GroupTotals<'a>> = groups.into_values().collect();
    ranked.sort_by(|a, b| b.net_sales.cmp(&a.net_sales));
    ranked
}

/// Top customers by net sales, ranked 1..=top_n
pub fn top_customers(
    invoices: &[&NormalizedInvoice],
    grand_total: &BigDecimal,
    top_n: usize,
) -> Vec<CustomerRank> {
    group_by_key(invoices, |inv| inv.customer_code.as_str())
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, g)| CustomerRank {
            rank: idx + 1,
            customer_code: g.first.customer_code.clone(),
            customer_name: g.first.customer_name.clone(),
            division: g.first.division_name.clone(),
            branch: g.first.branch_name.clone(),
            percent_of_total: percent(&g.net_sales, grand_total),
            net_sales: g.net_sales,
            invoice_count: g.invoice_count,
            last_invoice_date: g.last_invoice_date,
        })
        .collect()
}

/// Top salesmen by net sales with target attainment, ranked 1..=top_n
pub fn top_salesmen(invoices: &[&NormalizedInvoice], options: &AggregateOptions) -> Vec<SalesmanRank> {
    group_by_key(invoices, |inv| inv.salesman_id.as_str())
        .into_iter()
        .take(options.top_n)
        .enumerate()
        .map(|(idx, g)| {
            let target = g
                .first
                .salesman_target
                .clone()
                .unwrap_or_else(|| options.default_target.clone());
            SalesmanRank {
                rank: idx + 1,
                salesman_id: g.first.salesman_id.clone(),
                salesman_name: g.first.salesman_name.clone(),
                division: g.first.division_name.clone(),
                branch: g.first.branch_name.clone(),
                target_attainment: percent(&g.net_sales, &target),
                net_sales: g.net_sales,
                target,
                invoice_count: g.invoice_count,
            }
        })
        .collect()
}

pub fn summary_band(invoices: &[&NormalizedInvoice]) -> SummaryBand {
    let mut band = SummaryBand::default();
    for inv in invoices {
        band.gross_sales += &inv.gross_amount;
        band.total_discount += &inv.discount_amount;
        band.net_sales += &inv.net_sales;
        band.returns += inv.net_returns();
        band.invoice_count += 1;
    }
    band
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNKNOWN;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn invoice(no: &str, customer: &str, salesman: &str, division: &str, gross: i64, discount: i64) -> NormalizedInvoice {
        let gross = BigDecimal::from(gross);
        let discount = BigDecimal::from(discount);
        NormalizedInvoice {
            id: no.to_string(),
            invoice_no: no.to_string(),
            order_id: None,
            invoice_date: NaiveDate::from_ymd_opt(2025, 11, 1),
            customer_code: customer.to_string(),
            customer_name: format!("{customer} Inc"),
            salesman_id: salesman.to_string(),
            salesman_name: format!("Agent {salesman}"),
            salesman_target: None,
            division_id: None,
            division_name: division.to_string(),
            branch_id: "B1".to_string(),
            branch_name: "Manila".to_string(),
            net_sales: &gross - &discount,
            gross_amount: gross,
            discount_amount: discount,
            return_amount: BigDecimal::zero(),
            return_discount: BigDecimal::zero(),
        }
    }

    fn with_return(mut inv: NormalizedInvoice, amount: i64, discount: i64) -> NormalizedInvoice {
        inv.return_amount = BigDecimal::from(amount);
        inv.return_discount = BigDecimal::from(discount);
        inv.net_sales = NormalizedInvoice::compute_net_sales(
            &inv.gross_amount,
            &inv.discount_amount,
            &inv.return_amount,
            &inv.return_discount,
        );
        inv
    }

    fn on(mut inv: NormalizedInvoice, y: i32, m: u32, d: u32) -> NormalizedInvoice {
        inv.invoice_date = NaiveDate::from_ymd_opt(y, m, d);
        inv
    }

    fn all() -> ReportFilter {
        ReportFilter::default()
    }

    #[test]
    fn two_invoice_scenario() {
        let invoices = vec![
            with_return(invoice("INV-1", "C1", "S1", "Electronics", 1000, 100), 200, 20),
            invoice("INV-2", "C2", "S2", "Appliances", 500, 0),
        ];

        let view = aggregate(&invoices, &all(), &AggregateOptions::default());

        assert_eq!(invoices[0].net_sales, BigDecimal::from(720));
        assert_eq!(invoices[1].net_sales, BigDecimal::from(500));
        assert_eq!(view.kpi.total_net_sales, BigDecimal::from(1220));
        assert_eq!(view.kpi.gross_margin, percent(&BigDecimal::from(1220), &BigDecimal::from(1500)));

        assert_eq!(view.division_sales.len(), 2);
        assert_eq!(view.division_sales[0].division, "Electronics");
        assert_eq!(view.division_sales[0].net_sales, BigDecimal::from(720));
        assert_eq!(view.division_sales[1].net_sales, BigDecimal::from(500));

        assert_eq!(view.top_customers[0].customer_code, "C1");
        assert_eq!(view.top_customers[0].rank, 1);
        assert_eq!(view.top_customers[0].net_sales, BigDecimal::from(720));
        assert_eq!(view.top_customers[1].net_sales, BigDecimal::from(500));

        assert_eq!(view.summary.gross_sales, BigDecimal::from(1500));
        assert_eq!(view.summary.total_discount, BigDecimal::from(100));
        assert_eq!(view.summary.returns, BigDecimal::from(180));
        assert_eq!(view.summary.net_sales, BigDecimal::from(1220));
        assert_eq!(view.summary.invoice_count, 2);
    }

    #[test]
    fn division_totals_add_up_to_kpi_total() {
        let invoices = vec![
            invoice("A", "C1", "S1", "Electronics", 300, 10),
            invoice("B", "C2", "S1", UNKNOWN, 120, 0),
            invoice("C", "C3", "S2", "Hardware", 80, 5),
            invoice("D", "C1", "S3", "Electronics", 45, 0),
        ];
        let view = aggregate(&invoices, &all(), &AggregateOptions::default());
        let division_sum = view
            .division_sales
            .iter()
            .fold(BigDecimal::zero(), |acc, d| acc + &d.net_sales);
        assert_eq!(division_sum, view.kpi.total_net_sales);
    }

    #[test]
    fn ties_keep_grouping_order() {
        let invoices = vec![
            invoice("1", "C-B", "S1", "Hardware", 100, 0),
            invoice("2", "C-A", "S1", "Furniture", 100, 0),
            invoice("3", "C-C", "S1", "Appliances", 200, 0),
        ];
        let view = aggregate(&invoices, &all(), &AggregateOptions::default());

        let customers: Vec<_> = view.top_customers.iter().map(|c| c.customer_code.as_str()).collect();
        assert_eq!(customers, ["C-C", "C-B", "C-A"]);
        let divisions: Vec<_> = view.division_sales.iter().map(|d| d.division.as_str()).collect();
        assert_eq!(divisions, ["Appliances", "Hardware", "Furniture"]);
    }

    #[test]
    fn top_lists_cap_at_ten_and_percentages_stay_under_total() {
        let invoices: Vec<_> = (1..=15)
            .map(|i| invoice(&format!("INV-{i}"), &format!("C{i}"), &format!("S{i}"), "Electronics", i * 100, 0))
            .collect();
        let view = aggregate(&invoices, &all(), &AggregateOptions::default());

        assert_eq!(view.top_customers.len(), 10);
        assert_eq!(view.top_salesmen.len(), 10);
        assert!(view
            .top_customers
            .windows(2)
            .all(|w| w[0].net_sales > w[1].net_sales));
        let ranks: Vec<_> = view.top_customers.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, (1..=10).collect::<Vec<_>>());

        let pct_sum = view
            .top_customers
            .iter()
            .fold(BigDecimal::zero(), |acc, c| acc + &c.percent_of_total);
        assert!(pct_sum < BigDecimal::from(100));
    }

    #[test]
    fn percentages_sum_to_hundred_when_all_customers_fit() {
        let invoices = vec![
            invoice("1", "C1", "S1", "X", 250, 0),
            invoice("2", "C2", "S1", "X", 250, 0),
            invoice("3", "C3", "S1", "X", 500, 0),
        ];
        let view = aggregate(&invoices, &all(), &AggregateOptions::default());
        let pct_sum = view
            .top_customers
            .iter()
            .fold(BigDecimal::zero(), |acc, c| acc + &c.percent_of_total);
        assert_eq!(pct_sum, BigDecimal::from(100));
    }

    #[test]
    fn customer_group_counts_invoices_and_latest_date() {
        let invoices = vec![
            on(invoice("1", "C1", "S1", "X", 100, 0), 2025, 11, 3),
            on(invoice("2", "C1", "S1", "X", 50, 0), 2025, 11, 20),
            on(invoice("3", "C1", "S1", "X", 25, 0), 2025, 11, 9),
        ];
        let view = aggregate(&invoices, &all(), &AggregateOptions::default());
        let c = &view.top_customers[0];
        assert_eq!(c.invoice_count, 3);
        assert_eq!(c.net_sales, BigDecimal::from(175));
        assert_eq!(c.last_invoice_date, NaiveDate::from_ymd_opt(2025, 11, 20));
    }

    #[test]
    fn salesman_targets_and_attainment() {
        let mut own_target = invoice("1", "C1", "S1", "X", 250_000, 0);
        own_target.salesman_target = Some(BigDecimal::from(500_000));
        let invoices = vec![own_target, invoice("2", "C2", "S2", "X", 130_000, 0)];

        let view = aggregate(&invoices, &all(), &AggregateOptions::default());

        assert_eq!(view.top_salesmen[0].target, BigDecimal::from(500_000));
        assert_eq!(view.top_salesmen[0].target_attainment, BigDecimal::from(50));
        assert_eq!(view.top_salesmen[1].target, BigDecimal::from(650_000));
        assert_eq!(view.top_salesmen[1].target_attainment, BigDecimal::from(20));

        let zero_target = AggregateOptions {
            top_n: 10,
            default_target: BigDecimal::zero(),
        };
        let view = aggregate(&invoices[1..], &all(), &zero_target);
        assert!(view.top_salesmen[0].target_attainment.is_zero());
    }

    #[test]
    fn trend_groups_by_day_ascending() {
        let invoices = vec![
            on(invoice("1", "C1", "S1", "X", 100, 0), 2025, 11, 12),
            on(invoice("2", "C1", "S1", "X", 40, 0), 2025, 11, 2),
            on(invoice("3", "C1", "S1", "X", 60, 0), 2025, 11, 12),
        ];
        let view = aggregate(&invoices, &all(), &AggregateOptions::default());
        assert_eq!(
            view.trend,
            vec![
                TrendPoint { date: NaiveDate::from_ymd_opt(2025, 11, 2).unwrap(), net_sales: BigDecimal::from(40) },
                TrendPoint { date: NaiveDate::from_ymd_opt(2025, 11, 12).unwrap(), net_sales: BigDecimal::from(160) },
            ]
        );
    }

    #[test]
    fn date_range_is_inclusive() {
        let invoices = vec![
            on(invoice("1", "C1", "S1", "X", 10, 0), 2025, 10, 31),
            on(invoice("2", "C1", "S1", "X", 20, 0), 2025, 11, 1),
            on(invoice("3", "C1", "S1", "X", 30, 0), 2025, 11, 30),
            on(invoice("4", "C1", "S1", "X", 40, 0), 2025, 12, 1),
        ];
        let filter = ReportFilter {
            from: NaiveDate::from_ymd_opt(2025, 11, 1),
            to: NaiveDate::from_ymd_opt(2025, 11, 30),
            ..ReportFilter::default()
        };
        let view = aggregate(&invoices, &filter, &AggregateOptions::default());
        assert_eq!(view.summary.invoice_count, 2);
        assert_eq!(view.kpi.total_net_sales, BigDecimal::from(50));
    }

    #[test]
    fn division_filter_is_exact() {
        let invoices = vec![
            invoice("1", "C1", "S1", "Electronics", 100, 0),
            invoice("2", "C2", "S2", "electronics", 70, 0),
        ];
        let filter = ReportFilter {
            division: Some("Electronics".to_string()),
            ..ReportFilter::default()
        };
        let view = aggregate(&invoices, &filter, &AggregateOptions::default());
        assert_eq!(view.summary.invoice_count, 1);
        assert_eq!(view.kpi.total_net_sales, BigDecimal::from(100));
    }

    #[test]
    fn no_match_gives_zeroes_and_empty_lists() {
        let invoices = vec![invoice("1", "C1", "S1", "Electronics", 100, 0)];
        let filter = ReportFilter {
            division: Some("Furniture".to_string()),
            ..ReportFilter::default()
        };
        let view = aggregate(&invoices, &filter, &AggregateOptions::default());
        assert_eq!(view, AggregateView::default());
    }

    #[test]
    fn zero_gross_gives_zero_margin() {
        let view = aggregate(&[], &all(), &AggregateOptions::default());
        assert!(view.kpi.gross_margin.is_zero());
        assert_eq!(percent(&dec("5"), &dec("0")), BigDecimal::zero());
    }
}
