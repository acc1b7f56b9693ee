//! End-to-end sessions driven through a scripted terminal.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tally_cli::auth::OperatorTable;
use tally_cli::config::AppConfig;
use tally_cli::console::TextTerminal;
use tally_cli::router::Router;
use tempfile::tempdir;

const INVENTORY_HEADER: &str = "Product_id,product_name,total quantity,product type,expiry date,mrp";
const SALES_HEADER: &str = "sales_id,product_id,product_name,mrp,store_price,quantity purchased,date of purchase,total price,billed_by";

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

fn seed(dir: &Path) {
    std::fs::write(
        dir.join("inventory.csv"),
        format!(
            "{INVENTORY_HEADER}\n\
             1,Soap,5,Toiletries,2020-01-01,30.00\n\
             2,Pen,10,Stationery,,20.00\n\
             3,Rice,50,Grain,2030-01-01,55.00\n"
        ),
    )
    .unwrap();
    std::fs::write(dir.join("sales.csv"), format!("{SALES_HEADER}\n")).unwrap();
}

fn config(default_dir: &Path) -> AppConfig {
    AppConfig {
        default_data_dir: default_dir.to_path_buf(),
        low_stock_threshold: 20,
        store_name: "Test Mart".to_string(),
    }
}

/// Runs a session over `script` and returns everything written.
fn session(config: &AppConfig, script: &str) -> String {
    let mut term = TextTerminal::new(script.as_bytes(), Vec::new());
    Router::new(config, OperatorTable::default(), fixed_now)
        .run(&mut term)
        .unwrap();
    String::from_utf8(term.into_output()).unwrap()
}

fn quantity_on_disk(dir: &Path, product_id: i64) -> i64 {
    let inventory = tally_store::load_inventory(&dir.join("inventory.csv"))
        .unwrap()
        .data;
    inventory.find_by_id(product_id).unwrap().quantity
}

#[test]
fn fresh_directory_gets_header_only_files() {
    let dir = tempdir().unwrap();
    let out = session(&config(dir.path()), &format!("{}\nexit\n", dir.path().display()));

    assert!(out.contains("Created a new file with headers only."));
    assert!(out.contains("Welcome to Test Mart!"));
    assert!(out.contains("Exiting program. Goodbye!"));

    let inventory = std::fs::read_to_string(dir.path().join("inventory.csv")).unwrap();
    assert_eq!(inventory, format!("{INVENTORY_HEADER}\n"));
}

#[test]
fn unusable_directory_falls_back_to_default() {
    let dir = tempdir().unwrap();
    let default_dir = dir.path().join("fallback");
    let out = session(&config(&default_dir), "/definitely/not/here\nexit\n");

    assert!(out.contains("Invalid directory path. Using default path."));
    assert!(default_dir.join("inventory.csv").exists());
    assert!(default_dir.join("sales.csv").exists());
}

#[test]
fn pen_sale_prints_receipt_and_persists() {
    let dir = tempdir().unwrap();
    seed(dir.path());
    let script = format!(
        "{}\nS\nUSER1\nuser\n2\n3\nY\n2\n4\nN\nexit\n",
        dir.path().display()
    );

    let out = session(&config(dir.path()), &script);

    assert!(out.contains("Product name: Pen"));
    assert!(out.contains("Total price: 54.00"));
    assert!(out.contains("Total price: 72.00"));
    assert!(out.contains("Receipt - Bill ID: 1"));
    assert!(out.contains("Subtotal: 126.00"));
    assert!(out.contains("Tax (5%): 6.30"));
    assert!(out.contains("Final Total: 132.30"));

    assert_eq!(quantity_on_disk(dir.path(), 2), 3);
    let sales = std::fs::read_to_string(dir.path().join("sales.csv")).unwrap();
    assert_eq!(
        sales,
        format!(
            "{SALES_HEADER}\n\
             1,2,Pen,20.00,18.00,3,2024-06-01 10:30:00,54.00,user1\n\
             1,2,Pen,20.00,18.00,4,2024-06-01 10:30:00,72.00,user1\n"
        )
    );
}

#[test]
fn expired_and_oversold_items_are_rejected() {
    let dir = tempdir().unwrap();
    seed(dir.path());
    let script = format!(
        "{}\ns\nuser2\nuser\n1\nabc\n99\n2\n0\n11\nexit\nexit\n",
        dir.path().display()
    );

    let out = session(&config(dir.path()), &script);

    assert!(out.contains("Error: Product has expired. Cannot proceed with sale."));
    assert!(out.contains("Invalid product id. Please enter a valid integer."));
    assert!(out.contains("Product id not found in inventory. Please try again."));
    assert!(out.contains("Quantity must be positive. Please enter again."));
    assert!(out.contains("Insufficient quantity in inventory. Available: 10."));
    assert!(out.contains("No sale was recorded."));

    assert_eq!(quantity_on_disk(dir.path(), 1), 5);
    assert_eq!(quantity_on_disk(dir.path(), 2), 10);
    let sales = std::fs::read_to_string(dir.path().join("sales.csv")).unwrap();
    assert_eq!(sales, format!("{SALES_HEADER}\n"));
}

#[test]
fn end_of_input_mid_sale_records_nothing() {
    let dir = tempdir().unwrap();
    seed(dir.path());
    // stream ends while the rep is being asked for another item's id
    let script = format!("{}\nS\nuser1\nuser\n2\n6\ny\n", dir.path().display());

    let out = session(&config(dir.path()), &script);

    assert!(out.contains("Exiting program. Goodbye!"));
    assert_eq!(quantity_on_disk(dir.path(), 2), 10);
    let sales = std::fs::read_to_string(dir.path().join("sales.csv")).unwrap();
    assert_eq!(sales, format!("{SALES_HEADER}\n"));
}

#[test]
fn bad_credentials_return_to_login() {
    let dir = tempdir().unwrap();
    seed(dir.path());
    let script = format!(
        "{}\nA\nAdmin\nadmin\nS\nuser3\nuser\nQ\nexit\n",
        dir.path().display()
    );

    let out = session(&config(dir.path()), &script);

    assert!(out.contains("Invalid admin credentials."));
    assert!(out.contains("Invalid sales credentials."));
    assert!(out.contains("Invalid option. Please choose 'A' for admin or 'S' for sales."));
    assert_eq!(out.matches("Login Screen").count(), 4);
}

#[test]
fn exit_at_credential_prompts_returns_to_login() {
    let dir = tempdir().unwrap();
    seed(dir.path());
    let script = format!("{}\nA\nexit\nS\nuser1\nexit\nexit\n", dir.path().display());

    let out = session(&config(dir.path()), &script);

    assert!(!out.contains("Invalid admin credentials."));
    assert!(!out.contains("Invalid sales credentials."));
    assert_eq!(out.matches("Login Screen").count(), 3);
    assert!(out.contains("Exiting program. Goodbye!"));
}

#[test]
fn admin_reports_and_views() {
    let dir = tempdir().unwrap();
    seed(dir.path());
    let script = format!(
        "{}\nA\nadmin\nadmin\n1\n2\n3\n1\n3\n2\n3\n9\n0\nexit\n",
        dir.path().display()
    );

    let out = session(&config(dir.path()), &script);

    assert!(out.contains("Expired Products"));
    assert!(out.contains("2020-01-01"));
    assert!(out.contains("Products with Quantity < 20"));
    assert!(out.contains("│ Rice │"), "full inventory table lists every product");
    assert!(out.contains("Expiry Date: 2030-01-01"));
    assert!(out.contains("MRP: 55.00"));
    assert!(out.contains("Invalid choice. Please try again."));
}

#[test]
fn admin_update_validates_then_persists() {
    let dir = tempdir().unwrap();
    seed(dir.path());
    let script = format!(
        "{}\nA\nadmin\nadmin\n4\n2\n2\nabc\n4\n2\n2\n25\n4\n2\n4\n12/31/2031\n0\nexit\n",
        dir.path().display()
    );

    let out = session(&config(dir.path()), &script);

    assert!(out.contains("Invalid quantity"));
    assert!(out.contains("Update aborted."));
    assert!(out.contains("Product updated successfully."));
    assert!(out.contains("quantity: 10 -> 25"));
    assert!(out.contains("expiry date: N/A -> 2031-12-31"));

    let inventory = tally_store::load_inventory(&dir.path().join("inventory.csv"))
        .unwrap()
        .data;
    let pen = inventory.find_by_id(2).unwrap();
    assert_eq!(pen.quantity, 25);
    assert_eq!(pen.expiry_date, NaiveDate::from_ymd_opt(2031, 12, 31));
}

#[test]
fn quantity_too_large_to_bill_is_refused() {
    let dir = tempdir().unwrap();
    seed(dir.path());
    let script = format!(
        "{}\nA\nadmin\nadmin\n4\n2\n2\n9223372036854775807\n0\n\
         S\nuser1\nuser\n2\n9223372036854775807\n1\nN\nexit\n",
        dir.path().display()
    );

    let out = session(&config(dir.path()), &script);

    assert!(out.contains("Amount too large to bill. Please enter a lower quantity."));
    assert!(out.contains("Final Total: 18.90"));
    assert_eq!(quantity_on_disk(dir.path(), 2), i64::MAX - 1);
}

#[test]
fn corrupt_inventory_fails_startup() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("inventory.csv"),
        format!("{INVENTORY_HEADER}\n1,Soap,lots,Toiletries,,30\n"),
    )
    .unwrap();

    let cfg = config(dir.path());
    let script = format!("{}\nexit\n", dir.path().display());
    let mut term = TextTerminal::new(script.as_bytes(), Vec::new());
    let result = Router::new(&cfg, OperatorTable::default(), fixed_now).run(&mut term);

    assert!(matches!(
        result,
        Err(tally_cli::error::AppError::Store(
            tally_store::StoreError::CorruptData { .. }
        ))
    ));
}
