pub mod aggregate;
pub mod assemble;
pub mod index;
pub mod normalize;
pub mod report;
pub mod returns;

pub use aggregate::{aggregate, AggregateOptions};
pub use assemble::assemble;
pub use index::{build_index, ReferenceIndex, ReferenceIndexes};
pub use normalize::{normalize, normalize_all};
pub use report::{build_report, SalesReportService};
pub use returns::{reconcile, totals_for, ReturnGroups, ReturnTotals};
