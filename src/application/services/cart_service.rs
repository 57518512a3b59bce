//! Cart engine - add, view, clear, checkout and currency selection
//!
//! Per session the flow is Browsing -> HasItems -> (checkout | clear) ->
//! Browsing. Checkout snapshots the cart into an order notification, clears
//! the cart, and delivers the notification to every configured operator;
//! delivery failures never roll the checkout back.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::application::errors::EngineError;
use crate::domain::entities::{
    Currency, OrderLine, OrderNotification, Product, RateTable, Session, Shopper,
};
use crate::domain::traits::{Catalog, Notifier, SessionStore};

/// Engine construction parameters
///
/// Injected rather than read from globals so tests and parallel deployments
/// can run with their own rates and operator lists.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub rates: RateTable,
    /// Operator recipients for order notifications
    pub operators: Vec<i64>,
}

/// Result of viewing a cart
#[derive(Debug, Clone)]
pub enum CartView {
    /// Nothing resolvable in the cart; rendered distinctly, never as a zero
    /// total
    Empty,
    Summary {
        currency: Currency,
        lines: Vec<OrderLine>,
        grand_total: f64,
    },
}

/// Result of a checkout attempt
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Nothing to order; no state was changed
    EmptyCart,
    Placed {
        order: OrderNotification,
        delivered: usize,
        failed: usize,
    },
}

/// The cart/session engine
pub struct CartService {
    catalog: Arc<dyn Catalog>,
    sessions: Arc<dyn SessionStore>,
    config: EngineConfig,
    /// Serializes same-user mutations; different users proceed in parallel
    user_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl CartService {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        sessions: Arc<dyn SessionStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            sessions,
            config,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn rates(&self) -> &RateTable {
        &self.config.rates
    }

    fn user_lock(&self, user_id: i64) -> Arc<Mutex<()>> {
        let mut locks = match self.user_locks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        locks.entry(user_id).or_default().clone()
    }

    fn locked(lock: &Arc<Mutex<()>>) -> MutexGuard<'_, ()> {
        match lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn session(&self, user_id: i64) -> Result<Session, EngineError> {
        Ok(self.sessions.session(user_id)?)
    }

    /// Add one unit of a product to the user's cart
    ///
    /// Unknown products are rejected before any state change.
    pub fn add_item(&self, user_id: i64, product_id: i64) -> Result<(Product, u32), EngineError> {
        let product = self
            .catalog
            .lookup(product_id)?
            .ok_or(EngineError::ProductNotFound(product_id))?;

        let lock = self.user_lock(user_id);
        let _guard = Self::locked(&lock);
        let quantity = self.sessions.add_item(user_id, product_id)?;
        Ok((product, quantity))
    }

    /// Empty the cart, leaving the currency untouched
    pub fn clear_cart(&self, user_id: i64) -> Result<(), EngineError> {
        let lock = self.user_lock(user_id);
        let _guard = Self::locked(&lock);
        Ok(self.sessions.clear_cart(user_id)?)
    }

    /// Switch the session's display currency
    ///
    /// Unsupported codes are rejected with the prior currency left in
    /// place. Cart quantities are never touched; totals are recomputed in
    /// the new currency on the next view.
    pub fn change_currency(&self, user_id: i64, code: &str) -> Result<Currency, EngineError> {
        let currency = Currency::from_code(code)
            .ok_or_else(|| EngineError::InvalidCurrency(code.to_string()))?;
        self.sessions.set_currency(user_id, currency)?;
        Ok(currency)
    }

    /// Compute the cart summary in the session's currency
    ///
    /// Cart entries whose product no longer exists in the catalog are
    /// skipped silently.
    pub fn view_cart(&self, user_id: i64) -> Result<CartView, EngineError> {
        let session = self.sessions.session(user_id)?;
        let lines = self.resolve_lines(&session)?;

        if lines.is_empty() {
            return Ok(CartView::Empty);
        }

        let grand_total = lines.iter().map(|line| line.line_total).sum();
        Ok(CartView::Summary {
            currency: session.currency,
            lines,
            grand_total,
        })
    }

    /// Snapshot the cart into an order, clear it, and notify the operators
    ///
    /// The checkout is committed once the snapshot is built and the cart is
    /// cleared; a recipient that cannot be reached is logged and skipped
    /// without affecting the others or the shopper-facing result.
    pub async fn checkout(
        &self,
        shopper: &Shopper,
        notifier: &dyn Notifier,
        render: impl Fn(&OrderNotification) -> String,
    ) -> Result<CheckoutOutcome, EngineError> {
        let order = {
            let lock = self.user_lock(shopper.id);
            let _guard = Self::locked(&lock);

            let session = self.sessions.session(shopper.id)?;
            let lines = self.resolve_lines(&session)?;
            if lines.is_empty() {
                return Ok(CheckoutOutcome::EmptyCart);
            }

            let order = OrderNotification::new(shopper.clone(), session.currency, lines);
            self.sessions.clear_cart(shopper.id)?;
            order
        };

        let text = render(&order);
        let mut delivered = 0;
        let mut failed = 0;
        for recipient in &self.config.operators {
            match notifier.notify(*recipient, &text).await {
                Ok(()) => {
                    tracing::info!("Order {} delivered to operator {}", order.short_reference(), recipient);
                    delivered += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to notify operator {}: {}", recipient, e);
                    failed += 1;
                }
            }
        }

        Ok(CheckoutOutcome::Placed {
            order,
            delivered,
            failed,
        })
    }

    fn resolve_lines(&self, session: &Session) -> Result<Vec<OrderLine>, EngineError> {
        let mut lines = Vec::new();
        for (&product_id, &quantity) in &session.cart {
            let Some(product) = self.catalog.lookup(product_id)? else {
                tracing::debug!("Skipping dangling cart reference to product {}", product_id);
                continue;
            };
            let unit_price =
                self.config
                    .rates
                    .convert(product.price, Currency::BASE, session.currency);
            lines.push(OrderLine {
                line_total: unit_price * quantity as f64,
                product,
                quantity,
                unit_price,
            });
        }
        Ok(lines)
    }
}
