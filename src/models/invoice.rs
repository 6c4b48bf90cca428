use bigdecimal::BigDecimal;
use chrono::NaiveDate;

/// Resolved name when a reference id has no match
pub const UNKNOWN: &str = "Unknown";

/// Collection names on the item store
pub mod collections {
    pub const INVOICES: &str = "sales_invoice";
    pub const RETURNS: &str = "sales_return";
    pub const SALESMEN: &str = "salesman";
    pub const DIVISIONS: &str = "division";
    pub const CUSTOMERS: &str = "customer";
    pub const BRANCHES: &str = "branches";
}

/// Field names per collection
pub mod fields {
    pub mod invoice {
        pub const ID: &str = "id";
        pub const INVOICE_NO: &str = "invoice_no";
        pub const ORDER_ID: &str = "order_id";
        pub const INVOICE_DATE: &str = "invoice_date";
        pub const CUSTOMER_CODE: &str = "customer_code";
        pub const SALESMAN_ID: &str = "salesman_id";
        pub const BRANCH_ID: &str = "branch_id";
        pub const GROSS_AMOUNT: &str = "total_amount";
        pub const DISCOUNT_AMOUNT: &str = "discount_amount";
    }

    pub mod sales_return {
        pub const INVOICE_NO: &str = "invoice_no";
        pub const AMOUNT: &str = "total_amount";
        pub const DISCOUNT_AMOUNT: &str = "discount_amount";
    }

    pub mod salesman {
        pub const ID: &str = "id";
        pub const NAME: &str = "salesman_name";
        pub const DIVISION_ID: &str = "division_id";
        pub const TARGET: &str = "target";
    }

    pub mod division {
        pub const ID: &str = "division_id";
        pub const NAME: &str = "division_name";
    }

    pub mod customer {
        pub const CODE: &str = "customer_code";
        pub const NAME: &str = "customer_name";
    }

    pub mod branch {
        pub const ID: &str = "id";
        pub const NAME: &str = "branch_name";
    }
}

/// A sales invoice joined against its references and returns
///
/// All money fields are finite; names that could not be resolved are
/// [`UNKNOWN`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInvoice {
    pub id: String,
    pub invoice_no: String,
    pub order_id: Option<String>,
    pub invoice_date: Option<NaiveDate>,

    pub customer_code: String,
    pub customer_name: String,
    pub salesman_id: String,
    pub salesman_name: String,
    /// Assigned target from the salesman record, if any
    pub salesman_target: Option<BigDecimal>,
    pub division_id: Option<String>,
    pub division_name: String,
    pub branch_id: String,
    pub branch_name: String,

    pub gross_amount: BigDecimal,
    pub discount_amount: BigDecimal,
    pub return_amount: BigDecimal,
    pub return_discount: BigDecimal,
    pub net_sales: BigDecimal,
}

impl NormalizedInvoice {
    /// (gross - discount) - (returns - return discount)
    pub fn compute_net_sales(
        gross: &BigDecimal,
        discount: &BigDecimal,
        returns: &BigDecimal,
        return_discount: &BigDecimal,
    ) -> BigDecimal {
        (gross - discount) - (returns - return_discount)
    }

    /// Returns net of their own discount
    pub fn net_returns(&self) -> BigDecimal {
        &self.return_amount - &self.return_discount
    }
}
