//! # Sales Flow
//!
//! Drives one [`Checkout`] from the terminal: picks the prompt from the
//! checkout state, feeds the reply in, and renders whatever comes back.
//!
//! ## Prompt Per State
//! ```text
//! AwaitingProductId  ──► "Enter product id (or 'exit' to return to login)"
//! AwaitingQuantity   ──► "Enter quantity of product purchased"
//! AwaitingContinue   ──► "Do you want to add another item? (Y/N)"
//! Ended              ──► back to the router
//! ```
//!
//! End of input is fed in as `exit`.

use tally_core::{
    Checkout, CheckoutEvent, CheckoutState, CoreError, Datasets, Operator, Receipt,
    SalesLineItem, ValidationError, EXIT_SENTINEL,
};

use crate::console::{Align, MessageKind, Table, Terminal};
use crate::flows::Clock;

/// Runs one checkout session for `operator`.
pub fn run(term: &mut dyn Terminal, data: &mut Datasets, operator: &Operator, clock: Clock) {
    let mut checkout = match Checkout::begin(&data.ledger, operator.identity.as_str()) {
        Ok(checkout) => checkout,
        Err(err) => {
            term.error(&describe(&err));
            return;
        }
    };

    while let Some(label) = prompt_for(checkout.state()) {
        let input = term
            .prompt(label)
            .unwrap_or_else(|| EXIT_SENTINEL.to_string());

        match checkout.submit(data, &input, clock()) {
            Ok(event) => show_event(term, event),
            Err(err) => term.error(&describe(&err)),
        }
    }
}

fn prompt_for(state: CheckoutState) -> Option<&'static str> {
    match state {
        CheckoutState::AwaitingProductId => Some("Enter product id (or 'exit' to return to login)"),
        CheckoutState::AwaitingQuantity { .. } => Some("Enter quantity of product purchased"),
        CheckoutState::AwaitingContinue => Some("Do you want to add another item? (Y/N)"),
        CheckoutState::Ended => None,
    }
}

fn show_event(term: &mut dyn Terminal, event: CheckoutEvent) {
    match event {
        CheckoutEvent::ProductResolved { name, .. } => {
            term.info("Product Info", &format!("Product name: {name}"));
        }
        CheckoutEvent::LineCommitted(line) => show_line(term, &line),
        CheckoutEvent::NextItem | CheckoutEvent::Finalized(None) => {}
        CheckoutEvent::Finalized(Some(receipt)) => show_receipt(term, &receipt),
        CheckoutEvent::Aborted => {
            term.panel("Sale Cancelled", "No sale was recorded.", MessageKind::Warning);
        }
    }
}

fn show_line(term: &mut dyn Terminal, line: &SalesLineItem) {
    term.info(
        "Sale Details",
        &format!(
            "Product id: {}\nProduct name: {}\nStore price: {}\nQuantity: {}\nTotal price: {}",
            line.product_id, line.product_name, line.sale_price, line.quantity, line.line_total
        ),
    );
}

fn show_receipt(term: &mut dyn Terminal, receipt: &Receipt) {
    let mut table = Table::new()
        .titled(format!("Receipt - Bill ID: {}", receipt.sale_id))
        .column("Product Name", Align::Left)
        .column("Store Price", Align::Right)
        .column("Quantity", Align::Right)
        .column("Line Total", Align::Right);
    for line in &receipt.lines {
        table.push_row(vec![
            line.product_name.clone(),
            line.sale_price.to_string(),
            line.quantity.to_string(),
            line.line_total.to_string(),
        ]);
    }
    term.table(&table);

    term.success(
        "Bill Summary",
        &format!(
            "Subtotal: {}\nTax ({}): {}\nFinal Total: {}",
            receipt.subtotal, receipt.tax_rate, receipt.tax, receipt.total
        ),
    );
}

/// Operator-facing text for a rejected input.
fn describe(err: &CoreError) -> String {
    match err {
        CoreError::ProductNotFound(_) => {
            "Product id not found in inventory. Please try again.".to_string()
        }
        CoreError::ProductExpired { .. } => {
            "Error: Product has expired. Cannot proceed with sale.".to_string()
        }
        CoreError::InsufficientStock { available, .. } => format!(
            "Insufficient quantity in inventory. Available: {available}. Please enter a lower quantity."
        ),
        CoreError::Validation(ValidationError::MustBePositive { .. }) => {
            "Quantity must be positive. Please enter again.".to_string()
        }
        CoreError::Validation(v) if v.field() == "product id" => {
            "Invalid product id. Please enter a valid integer.".to_string()
        }
        CoreError::Validation(_) => "Invalid quantity. Please enter a valid integer.".to_string(),
        CoreError::AmountTooLarge { .. } => {
            "Amount too large to bill. Please enter a lower quantity.".to_string()
        }
        CoreError::SaleIdsExhausted => {
            "No sale id is left in the sales file. Cannot start a sale.".to_string()
        }
        CoreError::SessionClosed => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_matches_operator_wording() {
        assert_eq!(
            describe(&CoreError::InsufficientStock {
                product_id: 2,
                available: 3,
                requested: 9
            }),
            "Insufficient quantity in inventory. Available: 3. Please enter a lower quantity."
        );
        assert_eq!(
            describe(&CoreError::Validation(ValidationError::InvalidFormat {
                field: "product id".to_string(),
                reason: "x".to_string()
            })),
            "Invalid product id. Please enter a valid integer."
        );
        assert_eq!(
            describe(&CoreError::Validation(ValidationError::Required {
                field: "quantity".to_string()
            })),
            "Invalid quantity. Please enter a valid integer."
        );
        assert_eq!(
            describe(&CoreError::AmountTooLarge {
                product_id: 2,
                quantity: i64::MAX
            }),
            "Amount too large to bill. Please enter a lower quantity."
        );
    }

    #[test]
    fn test_prompt_per_state() {
        assert!(prompt_for(CheckoutState::AwaitingProductId)
            .unwrap()
            .starts_with("Enter product id"));
        assert_eq!(prompt_for(CheckoutState::Ended), None);
    }
}
