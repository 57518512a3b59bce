use async_trait::async_trait;

use crate::application::errors::BotError;

/// Notifier trait - delivery of out-of-band messages to operator recipients
///
/// The engine never hardcodes an operator identity; recipients come from
/// configuration and delivery goes through this seam so tests can record
/// or fail deliveries.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient_id: i64, text: &str) -> Result<(), BotError>;
}
