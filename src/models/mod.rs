pub mod filter;
pub mod invoice;
pub mod raw;
pub mod report;
pub mod response;

pub use filter::{ReportFilter, ReportQuery, ALL_DIVISIONS};
pub use invoice::{collections, fields, NormalizedInvoice, UNKNOWN};
pub use raw::RawRecord;
pub use report::{
    AggregateView, CustomerRank, DivisionTotal, KpiBlock, PeriodComparison, SalesmanRank,
    SummaryBand, TrendPoint,
};
pub use response::{
    DashboardResponse, DivisionSalesData, KpiData, SalesTrendData, SummaryData, TopCustomer,
    TopSalesman,
};
