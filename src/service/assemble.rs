use bigdecimal::{BigDecimal, ToPrimitive};

use crate::models::{
    AggregateView, DashboardResponse, DivisionSalesData, KpiData, PeriodComparison,
    SalesTrendData, SummaryData, TopCustomer, TopSalesman,
};

fn num(v: &BigDecimal) -> f64 {
    v.to_f64().filter(|f| f.is_finite()).unwrap_or(0.0)
}

fn finite(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Packs an aggregate view into the dashboard payload
pub fn assemble(view: &AggregateView, comparison: PeriodComparison) -> DashboardResponse {
    DashboardResponse {
        kpi: KpiData {
            total_net_sales: num(&view.kpi.total_net_sales),
            growth_vs_previous: finite(comparison.growth_vs_previous),
            gross_margin: num(&view.kpi.gross_margin),
            collection_rate: finite(comparison.collection_rate),
        },
        sales_trend: view
            .trend
            .iter()
            .map(|p| SalesTrendData {
                date: p.date.format("%Y-%m-%d").to_string(),
                net_sales: num(&p.net_sales),
            })
            .collect(),
        division_sales: view
            .division_sales
            .iter()
            .map(|d| DivisionSalesData {
                division: d.division.clone(),
                net_sales: num(&d.net_sales),
            })
            .collect(),
        top_customers: view
            .top_customers
            .iter()
            .map(|c| TopCustomer {
                rank: c.rank,
                customer_name: c.customer_name.clone(),
                division: c.division.clone(),
                branch: c.branch.clone(),
                net_sales: num(&c.net_sales),
                percent_of_total: num(&c.percent_of_total),
                invoice_count: c.invoice_count,
                last_invoice_date: c
                    .last_invoice_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            })
            .collect(),
        top_salesmen: view
            .top_salesmen
            .iter()
            .map(|s| TopSalesman {
                rank: s.rank,
                salesman_name: s.salesman_name.clone(),
                division: s.division.clone(),
                branch: s.branch.clone(),
                net_sales: num(&s.net_sales),
                target: num(&s.target),
                target_attainment: num(&s.target_attainment),
                invoice_count: s.invoice_count,
            })
            .collect(),
        summary: SummaryData {
            gross_sales: num(&view.summary.gross_sales),
            total_discount: num(&view.summary.total_discount),
            net_sales: num(&view.summary.net_sales),
            returns: num(&view.summary.returns),
            invoice_count: view.summary.invoice_count,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerRank, TrendPoint};
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn empty_view_is_structurally_complete() {
        let body = serde_json::to_value(assemble(&AggregateView::default(), PeriodComparison::default())).unwrap();
        assert_eq!(
            body,
            json!({
                "kpi": { "totalNetSales": 0.0, "growthVsPrevious": 0.0, "grossMargin": 0.0, "collectionRate": 0.0 },
                "salesTrend": [],
                "divisionSales": [],
                "topCustomers": [],
                "topSalesmen": [],
                "summary": { "grossSales": 0.0, "totalDiscount": 0.0, "netSales": 0.0, "returns": 0.0, "invoiceCount": 0 }
            })
        );
    }

    #[test]
    fn dates_and_pass_through_values() {
        let view = AggregateView {
            trend: vec![TrendPoint {
                date: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
                net_sales: BigDecimal::from(1220),
            }],
            top_customers: vec![CustomerRank {
                rank: 1,
                customer_code: "C1".into(),
                customer_name: "ACME Corp".into(),
                division: "Electronics".into(),
                branch: "Manila".into(),
                net_sales: BigDecimal::from(720),
                percent_of_total: BigDecimal::from(59),
                invoice_count: 1,
                last_invoice_date: None,
            }],
            ..AggregateView::default()
        };
        let comparison = PeriodComparison {
            growth_vs_previous: 8.5,
            collection_rate: f64::NAN,
        };

        let resp = assemble(&view, comparison);

        assert_eq!(resp.sales_trend[0].date, "2025-11-05");
        assert_eq!(resp.sales_trend[0].net_sales, 1220.0);
        assert_eq!(resp.top_customers[0].last_invoice_date, "");
        assert_eq!(resp.kpi.growth_vs_previous, 8.5);
        assert_eq!(resp.kpi.collection_rate, 0.0);
    }
}
