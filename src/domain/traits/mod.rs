//! Domain traits - Abstractions implemented by the infrastructure layer

pub mod bot;
pub mod notifier;
pub mod store;

pub use bot::{Bot, BotInfo, KeyboardButton};
pub use notifier::Notifier;
pub use store::{Catalog, SessionStore};
