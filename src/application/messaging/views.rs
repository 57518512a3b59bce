//! Response building - the texts and keyboards the storefront sends
//!
//! Everything user-facing is built here as plain text plus action rows;
//! adapters decide how actions become platform keyboards.

use super::payloads;
use crate::application::services::CartView;
use crate::domain::entities::{
    format_amount, Currency, OrderNotification, Product, RateTable,
};

/// A selectable action: label plus the callback payload it emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub payload: String,
}

impl Action {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// An outbound response: text content plus optional action rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub actions: Vec<Vec<Action>>,
}

impl Response {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_actions(text: impl Into<String>, actions: Vec<Vec<Action>>) -> Self {
        Self {
            text: text.into(),
            actions,
        }
    }
}

/// Menu labels for the known category keys; unknown keys show uppercased
fn category_label(key: &str) -> String {
    match key {
        "streaming" => "📺 STREAMING".to_string(),
        "music" => "🎵 MÚSICA".to_string(),
        "vpn" => "🔐 VPN".to_string(),
        "tools" => "🎨 HERRAMIENTAS".to_string(),
        "licenses" => "💻 LICENCIAS".to_string(),
        other => other.to_uppercase(),
    }
}

fn back_to_menu() -> Action {
    Action::new("⬅️ Volver al inicio", payloads::START)
}

fn view_cart_action() -> Action {
    Action::new("🛒 Ver carrito", payloads::CART)
}

/// The /start main menu: one action per catalog category
pub fn main_menu(categories: &[String]) -> Response {
    let mut actions: Vec<Vec<Action>> = categories
        .iter()
        .map(|key| {
            vec![Action::new(
                category_label(key),
                format!("{}{}", payloads::CATEGORY_PREFIX, key),
            )]
        })
        .collect();
    actions.push(vec![view_cart_action()]);

    Response::with_actions(
        "🌟 Servicios Digitales Premium 🌟\n\
         ━━━━━━━━━━━━━━━━\n\
         Selecciona una categoría para ver los productos:",
        actions,
    )
}

/// Product listing for one category, priced in the session currency
pub fn category_listing(
    category: &str,
    products: &[Product],
    currency: Currency,
    rates: &RateTable,
) -> Response {
    let mut actions: Vec<Vec<Action>> = products
        .iter()
        .map(|product| {
            let price = rates.convert(product.price, Currency::BASE, currency);
            vec![Action::new(
                format!("{} — {}", product.name, format_amount(price, currency)),
                format!("{}{}", payloads::PRODUCT_PREFIX, product.id),
            )]
        })
        .collect();
    actions.push(vec![view_cart_action(), back_to_menu()]);

    Response::with_actions(
        format!(
            "Productos de {}:\n\nHaz clic en el producto que deseas añadir al carrito:",
            category.to_uppercase()
        ),
        actions,
    )
}

/// Confirmation after adding a product to the cart
pub fn item_added(product: &Product, quantity: u32, currency: Currency, rates: &RateTable) -> Response {
    let price = rates.convert(product.price, Currency::BASE, currency);
    let mut text = format!(
        "✅ Añadido al carrito:\n\n{} — {}\nCantidad: {}",
        product.name,
        format_amount(price, currency),
        quantity
    );
    if !product.description.is_empty() {
        text.push_str(&format!("\n\n{}", product.description));
    }

    Response::with_actions(
        text,
        vec![
            vec![view_cart_action(), Action::new("📦 Finalizar pedido", payloads::CHECKOUT)],
            vec![back_to_menu()],
        ],
    )
}

/// The empty-cart indicator, shown instead of a zero total
pub fn cart_empty() -> Response {
    Response::with_actions(
        "🛒 Tu carrito está vacío.\n\nSelecciona una categoría para empezar:",
        vec![vec![back_to_menu()]],
    )
}

/// Cart summary with per-line and grand totals plus the currency picker
pub fn cart_summary(view: &CartView) -> Response {
    let CartView::Summary {
        currency,
        lines,
        grand_total,
    } = view
    else {
        return cart_empty();
    };

    let mut text = String::from("🛒 Tu carrito:\n\n");
    for line in lines {
        text.push_str(&format!(
            "• {} x{} — {}\n",
            line.product.name,
            line.quantity,
            format_amount(line.line_total, *currency)
        ));
    }
    text.push_str(&format!(
        "\n💰 Total: {}",
        format_amount(*grand_total, *currency)
    ));

    let currency_row = Currency::ALL
        .iter()
        .filter(|c| *c != currency)
        .map(|c| {
            Action::new(
                format!("💱 Ver en {}", c.code()),
                format!("{}{}", payloads::CURRENCY_PREFIX, c.code()),
            )
        })
        .collect();

    Response::with_actions(
        text,
        vec![
            vec![
                Action::new("📦 Finalizar pedido", payloads::CHECKOUT),
                Action::new("🗑 Vaciar carrito", payloads::CLEAR),
            ],
            currency_row,
            vec![back_to_menu()],
        ],
    )
}

pub fn cart_cleared() -> Response {
    Response::with_actions(
        "🗑 Carrito vaciado.",
        vec![vec![back_to_menu()]],
    )
}

pub fn currency_changed(currency: Currency) -> Response {
    Response::with_actions(
        format!("💱 Moneda cambiada a {}.", currency.code()),
        vec![vec![view_cart_action(), back_to_menu()]],
    )
}

/// Shopper-facing confirmation after a committed checkout
pub fn checkout_confirmation(order: &OrderNotification) -> Response {
    let mut text = format!(
        "✅ Pedido {} recibido:\n\n",
        order.short_reference()
    );
    for line in &order.lines {
        text.push_str(&format!(
            "• {} x{} — {}\n",
            line.product.name,
            line.quantity,
            format_amount(line.line_total, order.currency)
        ));
    }
    text.push_str(&format!(
        "\n💰 Total: {}\n\n⏳ Pronto recibirás un mensaje de mi parte con más detalles.\n💡 No respondas aquí, te contactaré por privado.",
        format_amount(order.grand_total, order.currency)
    ));
    Response::text_only(text)
}

/// Operator-facing order notification text
pub fn operator_notification(order: &OrderNotification) -> String {
    let mut text = format!(
        "🚨 NUEVO PEDIDO {} 🚨\n👤 Usuario: {} (https://t.me/{})\n\n",
        order.short_reference(),
        order.shopper.display_name(),
        order.shopper.mention_target()
    );
    for line in &order.lines {
        text.push_str(&format!(
            "📦 {} x{} — {}\n",
            line.product.name,
            line.quantity,
            format_amount(line.line_total, order.currency)
        ));
        if let Some(ref delivery) = line.product.delivery_info {
            if !delivery.is_empty() {
                text.push_str(&format!("   ℹ️ {}\n", delivery));
            }
        }
    }
    text.push_str(&format!(
        "\n💰 Total: {}\n\n⚠️ ¡RESPONDE AL USUARIO MANUALMENTE!",
        format_amount(order.grand_total, order.currency)
    ));
    text
}

/// Friendly texts for rejected or failed operations
pub fn unknown_category(key: &str) -> Response {
    Response::with_actions(
        format!("Categoría no encontrada: {}.", key),
        vec![vec![back_to_menu()]],
    )
}

pub fn unknown_product() -> Response {
    Response::with_actions(
        "Ese producto ya no está disponible.",
        vec![vec![back_to_menu()]],
    )
}

pub fn unsupported_currency(code: &str) -> Response {
    Response::text_only(format!(
        "Moneda no soportada: {}. Usa CUP o USDT.",
        code
    ))
}

pub fn try_again() -> Response {
    Response::text_only("⚠️ Algo salió mal. Inténtalo de nuevo en unos segundos.")
}

pub fn unknown_input() -> Response {
    Response::with_actions(
        "No entendí esa acción. Usa /start para ver el menú.",
        vec![vec![back_to_menu()]],
    )
}
