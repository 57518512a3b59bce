//! Domain entities - Core storefront objects with no external dependencies

pub mod currency;
pub mod event;
pub mod order;
pub mod product;
pub mod session;
pub mod shopper;

pub use currency::{format_amount, Currency, RateTable};
pub use event::{EventKind, StoreEvent};
pub use order::{OrderLine, OrderNotification};
pub use product::{Product, ProductSeed};
pub use session::Session;
pub use shopper::Shopper;
