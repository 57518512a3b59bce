//! Typed inbound events

use super::Shopper;

/// What the user asked for
///
/// Currency codes stay raw strings here; the engine owns rejection of
/// unsupported values so a bad code never mutates state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Start,
    CategorySelected(String),
    ProductAdded(i64),
    ViewCart,
    ClearCart,
    Checkout,
    CurrencySelected(String),
}

/// An inbound event: the action plus the acting user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub kind: EventKind,
    pub shopper: Shopper,
}

impl StoreEvent {
    pub fn new(kind: EventKind, shopper: Shopper) -> Self {
        Self { kind, shopper }
    }
}
