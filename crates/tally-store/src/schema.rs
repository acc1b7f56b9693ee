//! # File Schemas
//!
//! Column layout of the two data files. Headers are written in exactly this
//! order; on load, columns are looked up by name so a re-ordered file still
//! reads.

/// A named, ordered set of columns stored in one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub file_name: &'static str,
    pub columns: &'static [&'static str],
}

// =============================================================================
// Inventory
// =============================================================================

pub const INVENTORY: Schema = Schema {
    file_name: "inventory.csv",
    columns: &[
        "Product_id",
        "product_name",
        "total quantity",
        "product type",
        "expiry date",
        "mrp",
    ],
};

// =============================================================================
// Sales
// =============================================================================

pub const SALES: Schema = Schema {
    file_name: "sales.csv",
    columns: &[
        "sales_id",
        "product_id",
        "product_name",
        "mrp",
        "store_price",
        "quantity purchased",
        "date of purchase",
        "total price",
        "billed_by",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_unique() {
        for schema in [INVENTORY, SALES] {
            for (i, name) in schema.columns.iter().enumerate() {
                assert!(!schema.columns[i + 1..].contains(name), "{name} repeated");
            }
        }
        assert_eq!(INVENTORY.columns.len(), 6);
        assert_eq!(SALES.columns.len(), 9);
    }
}
