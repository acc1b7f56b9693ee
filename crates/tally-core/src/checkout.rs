//! # Checkout
//!
//! The multi-item sale transaction as an explicit state machine.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            ┌──────── bad id / unknown / expired (retry) ───┐            │
//! │            ▼                                               │            │
//! │   ┌───────────────────┐   known, fresh   ┌────────────────┴──┐         │
//! │   │ AwaitingProductId │ ────────────────►│ AwaitingQuantity  │◄─┐      │
//! │   └─────────┬─────────┘ ProductResolved  └───┬───────────┬───┘  │      │
//! │        ▲    │ exit                     valid │           │ bad  │      │
//! │        │    ▼                     quantity   │           └──────┘      │
//! │        │  Aborted ◄──────────── exit ────────┘ LineCommitted           │
//! │        │  (stock restored)                   ▼                         │
//! │        │    Y                     ┌───────────────────┐                │
//! │        └──────────────────────────│ AwaitingContinue  │                │
//! │          NextItem                 └─────────┬─────────┘                │
//! │                                             │ anything else            │
//! │                                             ▼                          │
//! │                                   Finalized(receipt) ──► Ended         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is decremented as each line commits, so a later line for the same
//! product is checked against what is left. The basket reaches the ledger
//! only at finalisation. Aborting puts this session's units back on the
//! shelf and appends nothing.
//!
//! The clock is never read here: every call receives `now`.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};
use crate::ledger::SalesLedger;
use crate::money::{Money, Rate};
use crate::types::{Datasets, SalesLineItem};
use crate::validation::{is_continue, is_exit, parse_product_id, parse_quantity};
use crate::SALES_TAX;

// =============================================================================
// Basket
// =============================================================================

/// Lines committed in the current session but not yet in the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    lines: Vec<SalesLineItem>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[SalesLineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push(&mut self, line: SalesLineItem) {
        self.lines.push(line);
    }

    /// Sum of line totals; `None` on overflow.
    pub fn subtotal(&self) -> Option<Money> {
        Money::checked_sum(self.lines.iter().map(|l| l.line_total))
    }

    pub fn into_lines(self) -> Vec<SalesLineItem> {
        self.lines
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// The bill printed when a checkout finalises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub sale_id: i64,
    pub lines: Vec<SalesLineItem>,
    pub subtotal: Money,
    pub tax_rate: Rate,
    pub tax: Money,
    pub total: Money,
}

impl Receipt {
    /// Totals a finalised basket: `total = subtotal + tax(subtotal)`.
    ///
    /// Fails with `AmountTooLarge` if the sum leaves the money range.
    pub fn from_lines(sale_id: i64, lines: Vec<SalesLineItem>) -> CoreResult<Self> {
        let subtotal = Money::checked_sum(lines.iter().map(|l| l.line_total));
        let Some((subtotal, tax, total)) = subtotal.and_then(bill_totals) else {
            let last = lines.last();
            return Err(CoreError::AmountTooLarge {
                product_id: last.map_or(0, |l| l.product_id),
                quantity: last.map_or(0, |l| l.quantity),
            });
        };
        Ok(Self {
            sale_id,
            lines,
            subtotal,
            tax_rate: SALES_TAX,
            tax,
            total,
        })
    }
}

/// `(subtotal, tax, total)` for a subtotal, or `None` if the total overflows.
fn bill_totals(subtotal: Money) -> Option<(Money, Money, Money)> {
    let tax = subtotal.calculate_tax(SALES_TAX);
    let total = subtotal.checked_add(tax)?;
    Some((subtotal, tax, total))
}

// =============================================================================
// States & Events
// =============================================================================

/// Where the session is, i.e. what input it expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    AwaitingProductId,
    AwaitingQuantity { product_id: i64 },
    AwaitingContinue,
    Ended,
}

/// Outcome of one accepted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutEvent {
    /// The product exists and may be sold; a quantity is expected next.
    ProductResolved { product_id: i64, name: String },
    /// A line was priced, stock decremented and the line added to the basket.
    LineCommitted(SalesLineItem),
    /// The operator asked for another item.
    NextItem,
    /// The session ended normally. `None` when nothing was bought.
    Finalized(Option<Receipt>),
    /// The operator typed `exit`; nothing was recorded.
    Aborted,
}

// =============================================================================
// Checkout
// =============================================================================

/// One sales session, from the first product id to the receipt.
///
/// ## Usage
/// ```rust
/// use chrono::NaiveDate;
/// use tally_core::{Checkout, CheckoutEvent, Datasets, Inventory, InventoryRecord, Money};
///
/// let mut data = Datasets {
///     inventory: Inventory::new(vec![InventoryRecord {
///         product_id: 2,
///         name: "Pen".into(),
///         quantity: 10,
///         product_type: "Stationery".into(),
///         expiry_date: None,
///         mrp: Money::from_units(20),
///     }]),
///     ..Default::default()
/// };
/// let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
///
/// let mut checkout = Checkout::begin(&data.ledger, "user1").unwrap();
/// checkout.submit(&mut data, "2", now).unwrap();
/// checkout.submit(&mut data, "3", now).unwrap();
/// let event = checkout.submit(&mut data, "N", now).unwrap();
///
/// let CheckoutEvent::Finalized(Some(receipt)) = event else { panic!() };
/// assert_eq!(receipt.total.to_string(), "56.70");
/// assert_eq!(data.inventory.find_by_id(2).unwrap().quantity, 7);
/// ```
#[derive(Debug, Clone)]
pub struct Checkout {
    sale_id: i64,
    billed_by: String,
    state: CheckoutState,
    basket: Basket,
}

impl Checkout {
    /// Opens a session; the sale id is allocated once, here.
    pub fn begin(ledger: &SalesLedger, billed_by: impl Into<String>) -> CoreResult<Self> {
        let sale_id = ledger.next_sale_id().ok_or(CoreError::SaleIdsExhausted)?;
        let billed_by = billed_by.into();
        debug!(sale_id, %billed_by, "Checkout started");
        Ok(Self {
            sale_id,
            billed_by,
            state: CheckoutState::AwaitingProductId,
            basket: Basket::new(),
        })
    }

    pub fn sale_id(&self) -> i64 {
        self.sale_id
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn is_ended(&self) -> bool {
        self.state == CheckoutState::Ended
    }

    /// Feeds one line of operator input.
    ///
    /// An `Err` leaves the state unchanged; the caller shows it and asks
    /// again. Inventory is touched only by `LineCommitted` and `Aborted`,
    /// the ledger only by `Finalized(Some(_))`.
    pub fn submit(
        &mut self,
        data: &mut Datasets,
        input: &str,
        now: NaiveDateTime,
    ) -> CoreResult<CheckoutEvent> {
        match self.state {
            CheckoutState::Ended => Err(CoreError::SessionClosed),
            CheckoutState::AwaitingProductId => {
                if is_exit(input) {
                    return Ok(self.abort(data));
                }
                self.resolve_product(data, input, now)
            }
            CheckoutState::AwaitingQuantity { product_id } => {
                if is_exit(input) {
                    return Ok(self.abort(data));
                }
                self.commit_line(data, product_id, input, now)
            }
            CheckoutState::AwaitingContinue => {
                if is_continue(input) {
                    self.state = CheckoutState::AwaitingProductId;
                    return Ok(CheckoutEvent::NextItem);
                }
                self.finalize(data)
            }
        }
    }

    fn resolve_product(
        &mut self,
        data: &Datasets,
        input: &str,
        now: NaiveDateTime,
    ) -> CoreResult<CheckoutEvent> {
        let product_id = parse_product_id(input)?;
        let record = data
            .inventory
            .find_by_id(product_id)
            .ok_or(CoreError::ProductNotFound(product_id))?;

        if let Some(expiry_date) = record.expiry_date.filter(|_| record.is_expired(now)) {
            return Err(CoreError::ProductExpired {
                product_id,
                expiry_date,
            });
        }

        self.state = CheckoutState::AwaitingQuantity { product_id };
        Ok(CheckoutEvent::ProductResolved {
            product_id,
            name: record.name.clone(),
        })
    }

    fn commit_line(
        &mut self,
        data: &mut Datasets,
        product_id: i64,
        input: &str,
        now: NaiveDateTime,
    ) -> CoreResult<CheckoutEvent> {
        let quantity = parse_quantity(input)?;
        let record = data
            .inventory
            .find_by_id_mut(product_id)
            .ok_or(CoreError::ProductNotFound(product_id))?;

        if quantity > record.quantity {
            return Err(CoreError::InsufficientStock {
                product_id,
                available: record.quantity,
                requested: quantity,
            });
        }

        let line = SalesLineItem::priced(self.sale_id, record, quantity, now, &self.billed_by)?;

        // the bill must still be representable with this line on it
        let fits = self
            .basket
            .subtotal()
            .and_then(|subtotal| subtotal.checked_add(line.line_total))
            .and_then(bill_totals)
            .is_some();
        if !fits {
            return Err(CoreError::AmountTooLarge {
                product_id,
                quantity,
            });
        }

        record.quantity -= quantity;

        info!(
            sale_id = self.sale_id,
            product_id,
            quantity,
            line_total = %line.line_total,
            remaining = record.quantity,
            "Line committed"
        );

        self.basket.push(line.clone());
        self.state = CheckoutState::AwaitingContinue;
        Ok(CheckoutEvent::LineCommitted(line))
    }

    fn finalize(&mut self, data: &mut Datasets) -> CoreResult<CheckoutEvent> {
        if self.basket.is_empty() {
            self.state = CheckoutState::Ended;
            return Ok(CheckoutEvent::Finalized(None));
        }

        let receipt = Receipt::from_lines(self.sale_id, self.basket.lines().to_vec())?;
        self.state = CheckoutState::Ended;
        data.ledger.append(std::mem::take(&mut self.basket).into_lines());

        info!(
            sale_id = self.sale_id,
            billed_by = %self.billed_by,
            lines = receipt.lines.len(),
            total = %receipt.total,
            "Sale finalized"
        );
        Ok(CheckoutEvent::Finalized(Some(receipt)))
    }

    fn abort(&mut self, data: &mut Datasets) -> CheckoutEvent {
        self.state = CheckoutState::Ended;
        let lines = std::mem::take(&mut self.basket).into_lines();
        for line in &lines {
            if let Some(record) = data.inventory.find_by_id_mut(line.product_id) {
                record.quantity += line.quantity;
            }
        }
        info!(sale_id = self.sale_id, discarded = lines.len(), "Checkout aborted");
        CheckoutEvent::Aborted
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
