use bigdecimal::BigDecimal;
use chrono::NaiveDate;

/// Figures that come from a period-over-period comparison outside this service
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodComparison {
    pub growth_vs_previous: f64,
    pub collection_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiBlock {
    pub total_net_sales: BigDecimal,
    pub total_gross_sales: BigDecimal,
    /// net / gross * 100, zero when gross is zero
    pub gross_margin: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub net_sales: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DivisionTotal {
    pub division: String,
    pub net_sales: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRank {
    pub rank: usize,
    pub customer_code: String,
    pub customer_name: String,
    pub division: String,
    pub branch: String,
    pub net_sales: BigDecimal,
    pub percent_of_total: BigDecimal,
    pub invoice_count: usize,
    pub last_invoice_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesmanRank {
    pub rank: usize,
    pub salesman_id: String,
    pub salesman_name: String,
    pub division: String,
    pub branch: String,
    pub net_sales: BigDecimal,
    pub target: BigDecimal,
    pub target_attainment: BigDecimal,
    pub invoice_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryBand {
    pub gross_sales: BigDecimal,
    pub total_discount: BigDecimal,
    pub net_sales: BigDecimal,
    /// Reconciled returns net of their discount
    pub returns: BigDecimal,
    pub invoice_count: usize,
}

/// Every reporting view derived from one filtered invoice set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateView {
    pub kpi: KpiBlock,
    pub trend: Vec<TrendPoint>,
    pub division_sales: Vec<DivisionTotal>,
    pub top_customers: Vec<CustomerRank>,
    pub top_salesmen: Vec<SalesmanRank>,
    pub summary: SummaryBand,
}
