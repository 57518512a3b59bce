//! Messaging - inbound event parsing, dispatching and response building

pub mod dispatcher;
pub mod parser;
pub mod views;

pub use dispatcher::EventDispatcher;
pub use parser::EventParser;
pub use views::{Action, Response};

/// Callback payload vocabulary shared by the parser and the view builders
pub mod payloads {
    pub const START: &str = "start";
    pub const CART: &str = "cart";
    pub const CLEAR: &str = "clear";
    pub const CHECKOUT: &str = "checkout";
    pub const CATEGORY_PREFIX: &str = "category:";
    pub const PRODUCT_PREFIX: &str = "product:";
    pub const CURRENCY_PREFIX: &str = "currency:";
}
