//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default number of rows in the top-products ranking
pub const DEFAULT_TOP_PRODUCTS: usize = 10;

/// Sentinel category for blank cells in categorical columns
pub const UNKNOWN_LABEL: &str = "Unknown";

// Column names expected in the input CSV. Header matching is exact;
// the loader rejects files missing any of the required columns.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Product_ID",
    "Sale_Date",
    "Sales_Rep",
    "Region",
    "Sales_Amount",
    "Quantity_Sold",
    "Product_Category",
];

/// Categorical columns that get the "Unknown" fill when blank
pub const TEXT_COLUMNS: &[&str] = &[
    "Sales_Rep",
    "Region",
    "Product_Category",
    "Customer_Type",
];

/// Numeric columns that get median imputation when blank
pub const NUMERIC_COLUMNS: &[&str] = &["Quantity_Sold", "Unit_Cost", "Unit_Price", "Discount"];

// Accepted date formats (different export tools write different ones)
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Month key format for the time-series view
pub const MONTH_KEY_FORMAT: &str = "%Y-%m";
