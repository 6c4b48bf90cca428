use serde::{Deserialize, Serialize};

/// Executive dashboard payload
///
/// `Default` is the all-zero, all-empty shape; every block is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub kpi: KpiData,
    pub sales_trend: Vec<SalesTrendData>,
    pub division_sales: Vec<DivisionSalesData>,
    pub top_customers: Vec<TopCustomer>,
    pub top_salesmen: Vec<TopSalesman>,
    pub summary: SummaryData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiData {
    pub total_net_sales: f64,
    pub growth_vs_previous: f64,
    pub gross_margin: f64,
    pub collection_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTrendData {
    pub date: String,
    pub net_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionSalesData {
    pub division: String,
    pub net_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    pub rank: usize,
    pub customer_name: String,
    pub division: String,
    pub branch: String,
    pub net_sales: f64,
    pub percent_of_total: f64,
    pub invoice_count: usize,
    pub last_invoice_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSalesman {
    pub rank: usize,
    pub salesman_name: String,
    pub division: String,
    pub branch: String,
    pub net_sales: f64,
    pub target: f64,
    pub target_attainment: f64,
    pub invoice_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryData {
    pub gross_sales: f64,
    pub total_discount: f64,
    pub net_sales: f64,
    pub returns: f64,
    pub invoice_count: usize,
}
