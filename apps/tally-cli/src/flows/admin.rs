//! # Admin Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Admin Options                               │
//! │ 1) Check expired products      ──► table    │
//! │ 2) Check low-stock products    ──► table    │
//! │ 3) View database               ──► submenu  │
//! │      1) whole inventory                     │
//! │      2) one product by id                   │
//! │ 4) Update a specific product   ──► edit     │
//! │ 0) Back to login                            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every invalid entry is reported and the menu is shown again; nothing in
//! here ends the program.

use tally_core::validation::{is_exit, parse_product_id};
use tally_core::{update_field, CoreError, Datasets, InventoryField, InventoryRecord};
use tracing::debug;

use crate::console::{Align, MessageKind, Table, Terminal};
use crate::flows::Clock;

/// Runs the admin menu until the operator backs out.
pub fn run(term: &mut dyn Terminal, data: &mut Datasets, low_stock_threshold: i64, clock: Clock) {
    loop {
        term.panel(
            "Admin Options",
            &format!(
                "Admin Menu:\n\
                 1) Check expired products\n\
                 2) Check products with quantity < {low_stock_threshold}\n\
                 3) View database or a specific product\n\
                 4) Update a specific product\n\
                 0) Exit to login screen"
            ),
            MessageKind::Info,
        );

        let Some(choice) = term.prompt("Enter your choice") else {
            return;
        };
        if is_exit(&choice) || choice == "0" {
            return;
        }

        debug!(%choice, "Admin menu choice");
        match choice.as_str() {
            "1" => show_expired(term, data, clock),
            "2" => show_low_stock(term, data, low_stock_threshold),
            "3" => access_database(term, data),
            "4" => update_product(term, data),
            _ => term.error("Invalid choice. Please try again."),
        }
    }
}

fn show_expired(term: &mut dyn Terminal, data: &Datasets, clock: Clock) {
    let expired = data.inventory.find_expired(clock());
    if expired.is_empty() {
        term.success("Expired Products", "No expired products found.");
        return;
    }

    let mut table = Table::new()
        .titled("Expired Products")
        .column("Product ID", Align::Right)
        .column("Product Name", Align::Left)
        .column("Expiry Date", Align::Left);
    for record in expired {
        table.push_row(vec![
            record.product_id.to_string(),
            record.name.clone(),
            record.expiry_display(),
        ]);
    }
    term.table(&table);
}

fn show_low_stock(term: &mut dyn Terminal, data: &Datasets, threshold: i64) {
    let low = data.inventory.find_low_stock(threshold);
    if low.is_empty() {
        term.success(
            "Low Quantity",
            &format!("No products with quantity less than {threshold}."),
        );
        return;
    }

    let mut table = Table::new()
        .titled(format!("Products with Quantity < {threshold}"))
        .column("Product ID", Align::Right)
        .column("Product Name", Align::Left)
        .column("Quantity", Align::Right);
    for record in low {
        table.push_row(vec![
            record.product_id.to_string(),
            record.name.clone(),
            record.quantity.to_string(),
        ]);
    }
    term.table(&table);
}

// =============================================================================
// Access Database
// =============================================================================

fn access_database(term: &mut dyn Terminal, data: &Datasets) {
    term.panel(
        "Access Database",
        "1) View entire inventory\n2) View a specific product by ID\n0) Go back",
        MessageKind::Info,
    );

    let Some(choice) = term.prompt("Enter your choice") else {
        return;
    };
    if is_exit(&choice) || choice == "0" {
        return;
    }

    match choice.as_str() {
        "1" => show_inventory(term, data),
        "2" => show_product(term, data),
        _ => term.error("Invalid choice."),
    }
}

fn show_inventory(term: &mut dyn Terminal, data: &Datasets) {
    if data.inventory.is_empty() {
        term.panel("Inventory", "Inventory is empty.", MessageKind::Warning);
        return;
    }

    let mut table = Table::new()
        .titled("Inventory")
        .column("Product ID", Align::Right)
        .column("Name", Align::Left)
        .column("Quantity", Align::Right)
        .column("Type", Align::Left)
        .column("Expiry Date", Align::Left)
        .column("MRP", Align::Right);
    for record in &data.inventory {
        table.push_row(vec![
            record.product_id.to_string(),
            record.name.clone(),
            record.quantity.to_string(),
            record.product_type.clone(),
            record.expiry_display(),
            record.mrp.to_string(),
        ]);
    }
    term.table(&table);
}

fn show_product(term: &mut dyn Terminal, data: &Datasets) {
    let Some(record) = prompt_for_record(term, data, "Enter the product ID", "Product not found.")
    else {
        return;
    };

    term.info(
        "Product Info",
        &format!(
            "Product ID: {}\nName: {}\nQuantity: {}\nType: {}\nExpiry Date: {}\nMRP: {}",
            record.product_id,
            record.name,
            record.quantity,
            record.product_type,
            record.expiry_display(),
            record.mrp
        ),
    );
}

/// Asks for a product id and resolves it, reporting bad ids and misses.
fn prompt_for_record<'a>(
    term: &mut dyn Terminal,
    data: &'a Datasets,
    label: &str,
    not_found: &str,
) -> Option<&'a InventoryRecord> {
    let raw = term.prompt(label)?;
    if is_exit(&raw) {
        return None;
    }

    let product_id = match parse_product_id(&raw) {
        Ok(id) => id,
        Err(_) => {
            term.error("Invalid product ID.");
            return None;
        }
    };

    let record = data.inventory.find_by_id(product_id);
    if record.is_none() {
        term.error(not_found);
    }
    record
}

// =============================================================================
// Update Product
// =============================================================================

fn update_product(term: &mut dyn Terminal, data: &mut Datasets) {
    let Some(record) = prompt_for_record(
        term,
        data,
        "Enter the product ID to update (or 'exit' to go back)",
        "Product not found in inventory.",
    ) else {
        return;
    };
    let product_id = record.product_id;

    let mut current = String::from("Current Product Info:");
    for field in InventoryField::ALL {
        current.push_str(&format!(
            "\n{}) {}: {}",
            field.menu_key(),
            heading(field),
            record.field_display(field)
        ));
    }
    term.info("Update Product", &current);

    let Some(choice) = term.prompt("Which field do you want to update? (1-5, or 'exit' to cancel)")
    else {
        return;
    };
    if is_exit(&choice) {
        return;
    }
    let Some(field) = InventoryField::from_menu_key(&choice) else {
        term.error("Invalid choice.");
        return;
    };

    let Some(new_value) = term.prompt("Enter the new value") else {
        return;
    };
    if is_exit(&new_value) {
        return;
    }

    match update_field(&mut data.inventory, product_id, field, &new_value) {
        Ok(change) => term.success(
            "Update Success",
            &format!(
                "Product updated successfully.\n{}: {} -> {}",
                change.field, change.old_value, change.new_value
            ),
        ),
        Err(CoreError::Validation(err)) => {
            term.error(&format!("{} ({err}). Update aborted.", invalid_label(field)))
        }
        Err(err) => term.error(&err.to_string()),
    }
}

fn heading(field: InventoryField) -> &'static str {
    match field {
        InventoryField::Name => "Name",
        InventoryField::Quantity => "Quantity",
        InventoryField::ProductType => "Type",
        InventoryField::ExpiryDate => "Expiry Date",
        InventoryField::Mrp => "MRP",
    }
}

fn invalid_label(field: InventoryField) -> &'static str {
    match field {
        InventoryField::Quantity => "Invalid quantity",
        InventoryField::ExpiryDate => "Invalid date format",
        InventoryField::Mrp => "Invalid MRP",
        InventoryField::Name => "Invalid name",
        InventoryField::ProductType => "Invalid type",
    }
}
