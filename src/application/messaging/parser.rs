//! Event parser - turns commands and callback payloads into typed events
//!
//! Validation happens here, at the boundary: a malformed payload is
//! rejected before it can reach the engine, so bad input never causes a
//! state change.

use super::payloads;
use crate::application::errors::ParseError;
use crate::domain::entities::{EventKind, Shopper, StoreEvent};

/// Parses inbound text commands and inline-button callback payloads
pub struct EventParser {
    command_prefix: String,
}

impl EventParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Whether inbound text is a command for the configured prefix
    pub fn is_command(&self, text: &str) -> bool {
        text.trim_start().starts_with(&self.command_prefix)
    }

    /// Parse a prefixed command like `/start` or `/currency USDT`
    pub fn parse_command(&self, text: &str, shopper: Shopper) -> Result<StoreEvent, ParseError> {
        let trimmed = text.trim();
        let trimmed = trimmed
            .strip_prefix(&self.command_prefix)
            .unwrap_or(trimmed);
        let mut parts = trimmed.split_whitespace();
        let name = parts.next().unwrap_or("").to_lowercase();
        // Telegram group commands arrive as /start@botname
        let name = name.split('@').next().unwrap_or("").to_string();

        let kind = match name.as_str() {
            "start" | "menu" => EventKind::Start,
            "cart" => EventKind::ViewCart,
            "clear" => EventKind::ClearCart,
            "checkout" => EventKind::Checkout,
            "currency" => {
                let code = parts
                    .next()
                    .ok_or_else(|| ParseError::MalformedPayload("currency without a code".to_string()))?;
                EventKind::CurrencySelected(code.to_string())
            }
            other => return Err(ParseError::UnknownAction(format!("/{}", other))),
        };
        Ok(StoreEvent::new(kind, shopper))
    }

    /// Parse an inline-button callback payload
    ///
    /// Payloads are the colon-delimited strings the view builders emit:
    /// `start`, `cart`, `clear`, `checkout`, `category:<key>`,
    /// `product:<id>`, `currency:<code>`.
    pub fn parse_callback(&self, data: &str, shopper: Shopper) -> Result<StoreEvent, ParseError> {
        let kind = match data {
            payloads::START => EventKind::Start,
            payloads::CART => EventKind::ViewCart,
            payloads::CLEAR => EventKind::ClearCart,
            payloads::CHECKOUT => EventKind::Checkout,
            _ => {
                if let Some(key) = data.strip_prefix(payloads::CATEGORY_PREFIX) {
                    if key.is_empty() {
                        return Err(ParseError::MalformedPayload(data.to_string()));
                    }
                    EventKind::CategorySelected(key.to_string())
                } else if let Some(id) = data.strip_prefix(payloads::PRODUCT_PREFIX) {
                    let id = id
                        .parse::<i64>()
                        .map_err(|_| ParseError::MalformedPayload(data.to_string()))?;
                    EventKind::ProductAdded(id)
                } else if let Some(code) = data.strip_prefix(payloads::CURRENCY_PREFIX) {
                    if code.is_empty() {
                        return Err(ParseError::MalformedPayload(data.to_string()));
                    }
                    EventKind::CurrencySelected(code.to_string())
                } else {
                    return Err(ParseError::UnknownAction(data.to_string()));
                }
            }
        };
        Ok(StoreEvent::new(kind, shopper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> EventParser {
        EventParser::new("/")
    }

    fn shopper() -> Shopper {
        Shopper::new(42).with_username("ana")
    }

    #[test]
    fn parses_start_command() {
        let event = parser().parse_command("/start", shopper()).unwrap();
        assert_eq!(event.kind, EventKind::Start);
        assert_eq!(event.shopper.id, 42);
    }

    #[test]
    fn configured_prefix_decides_what_counts_as_a_command() {
        let bang = EventParser::new("!");
        assert!(bang.is_command("!cart"));
        assert!(bang.is_command("  !cart"));
        assert!(!bang.is_command("/cart"));
        assert!(!bang.is_command("cart"));

        let event = bang.parse_command("!cart", shopper()).unwrap();
        assert_eq!(event.kind, EventKind::ViewCart);
    }

    #[test]
    fn parses_group_style_command_with_bot_suffix() {
        let event = parser().parse_command("/start@tienda_bot", shopper()).unwrap();
        assert_eq!(event.kind, EventKind::Start);
    }

    #[test]
    fn parses_currency_command_with_argument() {
        let event = parser().parse_command("/currency USDT", shopper()).unwrap();
        assert_eq!(event.kind, EventKind::CurrencySelected("USDT".to_string()));
    }

    #[test]
    fn currency_command_without_code_is_malformed() {
        let result = parser().parse_command("/currency", shopper());
        assert!(matches!(result, Err(ParseError::MalformedPayload(_))));
    }

    #[test]
    fn unknown_command_is_rejected() {
        let result = parser().parse_command("/frobnicate", shopper());
        assert!(matches!(result, Err(ParseError::UnknownAction(_))));
    }

    #[test]
    fn parses_category_and_product_callbacks() {
        let event = parser().parse_callback("category:streaming", shopper()).unwrap();
        assert_eq!(
            event.kind,
            EventKind::CategorySelected("streaming".to_string())
        );

        let event = parser().parse_callback("product:17", shopper()).unwrap();
        assert_eq!(event.kind, EventKind::ProductAdded(17));
    }

    #[test]
    fn non_numeric_product_id_is_malformed() {
        let result = parser().parse_callback("product:netflix", shopper());
        assert!(matches!(result, Err(ParseError::MalformedPayload(_))));
    }

    #[test]
    fn empty_payload_fields_are_malformed() {
        assert!(matches!(
            parser().parse_callback("category:", shopper()),
            Err(ParseError::MalformedPayload(_))
        ));
        assert!(matches!(
            parser().parse_callback("currency:", shopper()),
            Err(ParseError::MalformedPayload(_))
        ));
    }

    #[test]
    fn unknown_callback_is_rejected() {
        let result = parser().parse_callback("admin:promote", shopper());
        assert!(matches!(result, Err(ParseError::UnknownAction(_))));
    }
}
