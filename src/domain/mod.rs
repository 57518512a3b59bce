//! Domain layer - Core storefront logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (Product, Session, Currency, Order, Event)
//! - Traits: Abstractions for infrastructure (Bot, Notifier)

pub mod entities;
pub mod traits;
