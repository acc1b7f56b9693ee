//! # Inventory Edits
//!
//! Validated single-field updates of one inventory record.
//!
//! ```text
//! raw text ──► parse for field ──► record found? ──► overwrite one field
//!                   │                    │
//!                   ▼                    ▼
//!            ValidationError     ProductNotFound
//!          (record untouched)
//! ```
//!
//! Nothing here touches disk; the caller decides when to persist.

use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::types::InventoryField;
use crate::validation::{parse_date, parse_mrp, parse_stock_level};

/// What an edit changed, rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub product_id: i64,
    pub field: InventoryField,
    pub old_value: String,
    pub new_value: String,
}

/// Parsed value ready to be written.
enum FieldValue {
    Text(String),
    Quantity(i64),
    Date(chrono::NaiveDate),
    Money(crate::money::Money),
}

fn parse_for(field: InventoryField, raw: &str) -> CoreResult<FieldValue> {
    let value = match field {
        InventoryField::Name | InventoryField::ProductType => FieldValue::Text(raw.to_string()),
        InventoryField::Quantity => FieldValue::Quantity(parse_stock_level(raw)?),
        InventoryField::ExpiryDate => FieldValue::Date(parse_date(field.label(), raw)?),
        InventoryField::Mrp => FieldValue::Money(parse_mrp(raw)?),
    };
    Ok(value)
}

/// Overwrites one field of the record with `product_id`.
///
/// ## Rules
/// - name / product type: stored as given
/// - quantity: integer, not negative
/// - expiry date: calendar date
/// - mrp: decimal, strictly positive
///
/// ## Example
/// ```rust
/// use tally_core::{update_field, Inventory, InventoryField, InventoryRecord, Money};
///
/// let mut inventory = Inventory::new(vec![InventoryRecord {
///     product_id: 2,
///     name: "Pen".into(),
///     quantity: 10,
///     product_type: "Stationery".into(),
///     expiry_date: None,
///     mrp: Money::from_units(20),
/// }]);
///
/// let change = update_field(&mut inventory, 2, InventoryField::Quantity, "25").unwrap();
/// assert_eq!(change.old_value, "10");
/// assert_eq!(inventory.find_by_id(2).unwrap().quantity, 25);
///
/// assert!(update_field(&mut inventory, 2, InventoryField::Quantity, "abc").is_err());
/// assert_eq!(inventory.find_by_id(2).unwrap().quantity, 25);
/// ```
pub fn update_field(
    inventory: &mut Inventory,
    product_id: i64,
    field: InventoryField,
    raw: &str,
) -> CoreResult<FieldChange> {
    let record = inventory
        .find_by_id_mut(product_id)
        .ok_or(CoreError::ProductNotFound(product_id))?;

    let value = parse_for(field, raw)?;

    let old_value = record.field_display(field);
    match value {
        FieldValue::Text(text) if field == InventoryField::Name => record.name = text,
        FieldValue::Text(text) => record.product_type = text,
        FieldValue::Quantity(qty) => record.quantity = qty,
        FieldValue::Date(date) => record.expiry_date = Some(date),
        FieldValue::Money(mrp) => record.mrp = mrp,
    }
    let new_value = record.field_display(field);

    info!(product_id, %field, %old_value, %new_value, "Inventory record updated");

    Ok(FieldChange {
        product_id,
        field,
        old_value,
        new_value,
    })
}
