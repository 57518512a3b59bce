//! Event dispatcher - routes typed events into the cart engine
//!
//! This is the error boundary of the storefront: engine rejections become
//! friendly responses, persistence failures a generic "try again", and
//! anything unexpected is logged and alerted to the primary operator with
//! no user-visible message.

use std::sync::Arc;

use super::views::{self, Response};
use crate::application::errors::{BotError, EngineError, ParseError};
use crate::application::services::{CartService, CatalogService, CheckoutOutcome};
use crate::domain::entities::{EventKind, StoreEvent};
use crate::domain::traits::Notifier;

/// Dispatches storefront events and owns the error boundary
pub struct EventDispatcher {
    cart: Arc<CartService>,
    catalog: Arc<CatalogService>,
    notifier: Arc<dyn Notifier>,
    /// Recipient for internal-error alerts; injected, never hardcoded
    primary_operator: Option<i64>,
}

impl EventDispatcher {
    pub fn new(
        cart: Arc<CartService>,
        catalog: Arc<CatalogService>,
        notifier: Arc<dyn Notifier>,
        primary_operator: Option<i64>,
    ) -> Self {
        Self {
            cart,
            catalog,
            notifier,
            primary_operator,
        }
    }

    /// Process one event to completion
    ///
    /// `None` means the user gets no reply for this event (the
    /// internal-error class); every other outcome renders something.
    pub async fn dispatch(&self, event: StoreEvent) -> Option<Response> {
        let user_id = event.shopper.id;
        match self.handle(event).await {
            Ok(response) => Some(response),
            Err(error) => self.failure_response(user_id, error).await,
        }
    }

    async fn failure_response(&self, user_id: i64, error: BotError) -> Option<Response> {
        match error {
            BotError::Engine(EngineError::CategoryNotFound(key)) => {
                Some(views::unknown_category(&key))
            }
            BotError::Engine(EngineError::ProductNotFound(id)) => {
                tracing::debug!("User {} tapped unknown product {}", user_id, id);
                Some(views::unknown_product())
            }
            BotError::Engine(EngineError::InvalidCurrency(code)) => {
                Some(views::unsupported_currency(&code))
            }
            BotError::Engine(EngineError::Store(e)) => {
                tracing::error!("Persistence failure for user {}: {}", user_id, e);
                Some(views::try_again())
            }
            BotError::Storage(e) => {
                tracing::error!("Persistence failure for user {}: {}", user_id, e);
                Some(views::try_again())
            }
            error => {
                tracing::error!("Unhandled error for user {}: {}", user_id, error);
                self.alert_primary(user_id, &error).await;
                None
            }
        }
    }

    /// Friendly response for an input the parser rejected
    pub fn rejection(&self, error: &ParseError) -> Response {
        tracing::debug!("Rejected inbound payload: {}", error);
        views::unknown_input()
    }

    async fn handle(&self, event: StoreEvent) -> Result<Response, BotError> {
        let shopper = event.shopper;
        match event.kind {
            EventKind::Start => {
                let categories = self.catalog.categories()?;
                Ok(views::main_menu(&categories))
            }
            EventKind::CategorySelected(key) => {
                let products = self.catalog.products_in(&key)?;
                let session = self.cart.session(shopper.id)?;
                Ok(views::category_listing(
                    &key,
                    &products,
                    session.currency,
                    self.cart.rates(),
                ))
            }
            EventKind::ProductAdded(product_id) => {
                let (product, quantity) = self.cart.add_item(shopper.id, product_id)?;
                let session = self.cart.session(shopper.id)?;
                Ok(views::item_added(
                    &product,
                    quantity,
                    session.currency,
                    self.cart.rates(),
                ))
            }
            EventKind::ViewCart => {
                let view = self.cart.view_cart(shopper.id)?;
                Ok(views::cart_summary(&view))
            }
            EventKind::ClearCart => {
                self.cart.clear_cart(shopper.id)?;
                Ok(views::cart_cleared())
            }
            EventKind::Checkout => {
                let outcome = self
                    .cart
                    .checkout(&shopper, self.notifier.as_ref(), views::operator_notification)
                    .await?;
                match outcome {
                    CheckoutOutcome::EmptyCart => Ok(views::cart_empty()),
                    CheckoutOutcome::Placed { order, .. } => {
                        Ok(views::checkout_confirmation(&order))
                    }
                }
            }
            EventKind::CurrencySelected(code) => {
                let currency = self.cart.change_currency(shopper.id, &code)?;
                Ok(views::currency_changed(currency))
            }
        }
    }

    async fn alert_primary(&self, user_id: i64, error: &BotError) {
        let Some(operator) = self.primary_operator else {
            return;
        };
        let text = format!(
            "⚠️ Error interno atendiendo al usuario {}: {}",
            user_id, error
        );
        if let Err(e) = self.notifier.notify(operator, &text).await {
            tracing::warn!("Failed to alert primary operator {}: {}", operator, e);
        }
    }
}
