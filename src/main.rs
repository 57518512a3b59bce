use std::sync::Arc;

use clap::{Parser, Subcommand};

mod application;
mod domain;
mod infrastructure;

use application::messaging::{EventDispatcher, EventParser, Response};
use application::services::{CartService, CatalogService, EngineConfig};
use domain::entities::{RateTable, Shopper};
use domain::traits::{Bot, Catalog, KeyboardButton, Notifier};
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::adapters::telegram::TelegramAdapter;
use infrastructure::config::Config;
use infrastructure::database::{seed::PRODUCT_SEED, Database};

#[derive(Parser)]
#[command(name = "tienda-bot")]
#[command(about = "A conversational storefront bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
    /// Recreate tables and reload the shipped product catalog
    LoadProducts,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.config, cli.token);
        }
        Commands::Version => {
            println!("tienda-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config(&cli.config);
        }
        Commands::LoadProducts => {
            load_products(&cli.config);
        }
    }
}

fn load_config(config_path: &str) -> Config {
    if std::path::Path::new(config_path).exists() {
        Config::load(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    }
}

fn init_config(path: &str) {
    if std::path::Path::new(path).exists() {
        tracing::warn!("{} already exists, not overwriting", path);
        return;
    }
    match Config::default().save(path) {
        Ok(()) => println!("Wrote default config to {}", path),
        Err(e) => tracing::error!("Failed to write config: {}", e),
    }
}

fn load_products(config_path: &str) {
    let config = load_config(config_path);
    let db = match Database::new(&config.database.path) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };
    match db.replace_all(PRODUCT_SEED) {
        Ok(count) => println!("Loaded {} products into {}", count, config.database.path.display()),
        Err(e) => {
            tracing::error!("Catalog load failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_bot(config_path: String, token_override: Option<String>) {
    let config = load_config(&config_path);
    tracing::info!("Starting {}", config.bot.name);

    let db = match Database::new(&config.database.path) {
        Ok(db) => {
            tracing::info!("Database ready at {}", config.database.path.display());
            Arc::new(db)
        }
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let catalog = Arc::new(CatalogService::new(db.clone(), PRODUCT_SEED));
    if let Err(e) = catalog.ensure_loaded() {
        tracing::error!("Failed to load the product catalog: {}", e);
        std::process::exit(1);
    }

    let cart = Arc::new(CartService::new(
        db.clone(),
        db.clone(),
        EngineConfig {
            rates: RateTable::from_cup_per_usdt(config.pricing.cup_per_usdt),
            operators: config.operators.recipients.clone(),
        },
    ));

    if config.operators.recipients.is_empty() {
        tracing::warn!("No operator recipients configured; orders will go nowhere");
    }

    let parser = EventParser::new(&config.bot.prefix);
    let primary_operator = config.operators.primary_operator();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let token = token_override.or_else(|| config.telegram_token());
    if let Some(token) = token {
        rt.block_on(async {
            let mut adapter = TelegramAdapter::new(token, config.bot.name.clone());
            if let Err(e) = adapter.fetch_bot_info().await {
                tracing::error!("Failed to fetch bot info: {}", e);
                return;
            }
            if let Err(e) = adapter.register_commands().await {
                tracing::warn!("Failed to register commands: {}", e);
            }

            let adapter = Arc::new(adapter);
            let dispatcher = EventDispatcher::new(
                cart,
                catalog,
                adapter.clone() as Arc<dyn Notifier>,
                primary_operator,
            );
            run_telegram_bot(adapter, dispatcher, parser).await;
        });
    } else {
        if !config.console_enabled() {
            tracing::error!("No Telegram token and the console adapter is disabled; nothing to run");
            std::process::exit(1);
        }
        // Console mode for local development
        rt.block_on(async {
            let adapter = Arc::new(ConsoleAdapter::new(config.bot.name.clone()));
            let dispatcher = EventDispatcher::new(
                cart,
                catalog,
                adapter.clone() as Arc<dyn Notifier>,
                primary_operator,
            );
            run_console_bot(adapter, dispatcher, parser).await;
        });
    }
}

/// Render a dispatcher response through a bot adapter
async fn send_response(bot: &dyn Bot, chat_id: i64, response: Response) {
    let result = if response.actions.is_empty() {
        bot.send_message(chat_id, &response.text).await
    } else {
        let buttons = response
            .actions
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|action| KeyboardButton::new(action.label).with_callback(action.payload))
                    .collect()
            })
            .collect();
        bot.send_with_keyboard(chat_id, &response.text, buttons).await
    };

    if let Err(e) = result {
        tracing::error!("Failed to send response to {}: {}", chat_id, e);
    }
}

async fn run_telegram_bot(
    bot: Arc<TelegramAdapter>,
    dispatcher: EventDispatcher,
    parser: EventParser,
) {
    let info = bot.bot_info();
    tracing::info!("Bot started: @{}", info.username);

    let mut offset: i64 = 0;
    let timeout_seconds = 30;

    tracing::info!("Starting update loop...");

    loop {
        match bot.get_updates(offset, timeout_seconds).await {
            Ok(updates) => {
                for update in &updates {
                    if let Some(msg) = &update.message {
                        let chat_id = msg.chat.id;
                        let (Some(from), Some(text)) = (&msg.from, &msg.text) else {
                            continue;
                        };
                        if !parser.is_command(text) {
                            continue;
                        }

                        match parser.parse_command(text, from.to_shopper()) {
                            Ok(event) => {
                                if let Some(response) = dispatcher.dispatch(event).await {
                                    send_response(bot.as_ref(), chat_id, response).await;
                                }
                            }
                            Err(e) => {
                                send_response(bot.as_ref(), chat_id, dispatcher.rejection(&e))
                                    .await;
                            }
                        }
                    }

                    if let Some(cb) = &update.callback_query {
                        if let Err(e) = bot.answer_callback(&cb.id, None).await {
                            tracing::debug!("Failed to answer callback: {}", e);
                        }

                        let chat_id = cb
                            .message
                            .as_ref()
                            .map(|m| m.chat.id)
                            .unwrap_or(cb.from.id);
                        let Some(data) = &cb.data else {
                            continue;
                        };

                        match parser.parse_callback(data, cb.from.to_shopper()) {
                            Ok(event) => {
                                if let Some(response) = dispatcher.dispatch(event).await {
                                    send_response(bot.as_ref(), chat_id, response).await;
                                }
                            }
                            Err(e) => {
                                send_response(bot.as_ref(), chat_id, dispatcher.rejection(&e))
                                    .await;
                            }
                        }
                    }
                }

                offset = TelegramAdapter::get_next_offset(&updates).max(offset);
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
            }
        }
    }
}

async fn run_console_bot(
    bot: Arc<ConsoleAdapter>,
    dispatcher: EventDispatcher,
    parser: EventParser,
) {
    println!("Console mode. Commands: /start /cart /checkout /clear /currency <code>");
    println!("Button payloads work too, e.g. category:streaming or product:1. Ctrl-D exits.");

    let shopper = Shopper::new(0).with_username("console");
    let chat_id = 0;

    loop {
        let Some(line) = bot.read_line("tú> ") else {
            break;
        };
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        let parsed = if parser.is_command(&line) {
            parser.parse_command(&line, shopper.clone())
        } else {
            parser.parse_callback(&line, shopper.clone())
        };

        match parsed {
            Ok(event) => {
                if let Some(response) = dispatcher.dispatch(event).await {
                    send_response(bot.as_ref(), chat_id, response).await;
                }
            }
            Err(e) => {
                send_response(bot.as_ref(), chat_id, dispatcher.rejection(&e)).await;
            }
        }
    }
}
