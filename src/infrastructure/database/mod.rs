//! SQLite persistence for the catalog and user sessions

pub mod seed;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension};

use crate::application::errors::StoreError;
use crate::domain::entities::{Currency, Product, ProductSeed, Session};
use crate::domain::traits::{Catalog, SessionStore};

/// SQLite-backed store
///
/// One `products` table for the catalog and one `sessions` row per user
/// (currency plus the cart serialized as JSON). The connection mutex makes
/// each operation atomic with respect to a single record.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_tables()?;
        Ok(db)
    }

    /// In-memory database for tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_tables()?;
        Ok(db)
    }

    fn init_tables(&self) -> Result<(), StoreError> {
        let conn = self.lock();
        conn.execute(
            "CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                price REAL NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                delivery_info TEXT
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS sessions (
                user_id INTEGER PRIMARY KEY,
                currency TEXT NOT NULL DEFAULT 'CUP',
                cart TEXT NOT NULL DEFAULT '{}'
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category)",
            [],
        )?;

        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
        Ok(Product {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            price: row.get(3)?,
            description: row.get(4)?,
            delivery_info: row.get(5)?,
        })
    }

    /// Read a session row, inserting the default row first when absent
    fn session_row(&self, conn: &Connection, user_id: i64) -> Result<Session, StoreError> {
        conn.execute(
            "INSERT OR IGNORE INTO sessions (user_id) VALUES (?1)",
            [user_id],
        )?;

        let (currency, cart): (String, String) = conn.query_row(
            "SELECT currency, cart FROM sessions WHERE user_id = ?1",
            [user_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let currency = Currency::from_code(&currency).ok_or_else(|| {
            StoreError::InvalidRow(format!(
                "session {} holds unknown currency '{}'",
                user_id, currency
            ))
        })?;
        let cart = Session::cart_from_json(&cart)?;

        Ok(Session {
            user_id,
            currency,
            cart,
        })
    }

    fn save_cart(
        &self,
        conn: &Connection,
        user_id: i64,
        session: &Session,
    ) -> Result<(), StoreError> {
        conn.execute(
            "UPDATE sessions SET cart = ?1 WHERE user_id = ?2",
            rusqlite::params![session.cart_json()?, user_id],
        )?;
        Ok(())
    }
}

impl Catalog for Database {
    fn lookup(&self, product_id: i64) -> Result<Option<Product>, StoreError> {
        let conn = self.lock();
        let product = conn
            .query_row(
                "SELECT id, name, category, price, description, delivery_info
                 FROM products WHERE id = ?1",
                [product_id],
                Self::row_to_product,
            )
            .optional()?;
        Ok(product)
    }

    fn list_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, name, category, price, description, delivery_info
             FROM products WHERE category = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([category], Self::row_to_product)?;

        let mut products = Vec::new();
        for product in rows {
            products.push(product?);
        }
        Ok(products)
    }

    fn categories(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT category FROM products GROUP BY category ORDER BY MIN(id)",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut categories = Vec::new();
        for category in rows {
            categories.push(category?);
        }
        Ok(categories)
    }

    fn replace_all(&self, seed: &[ProductSeed]) -> Result<usize, StoreError> {
        // Validate everything first so a bad row can never leave a partial
        // catalog behind
        for (index, row) in seed.iter().enumerate() {
            row.validate()
                .map_err(|e| StoreError::InvalidRow(format!("row {}: {}", index + 1, e)))?;
        }

        let mut conn = self.lock();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM products", [])?;
        for row in seed {
            tx.execute(
                "INSERT INTO products (name, category, price, description, delivery_info)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    row.name,
                    row.category,
                    row.price,
                    row.description,
                    row.delivery_info
                ],
            )?;
        }
        tx.commit()?;
        Ok(seed.len())
    }

    fn product_count(&self) -> Result<usize, StoreError> {
        let conn = self.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl SessionStore for Database {
    fn session(&self, user_id: i64) -> Result<Session, StoreError> {
        let conn = self.lock();
        self.session_row(&conn, user_id)
    }

    fn set_currency(&self, user_id: i64, currency: Currency) -> Result<(), StoreError> {
        let conn = self.lock();
        conn.execute(
            "INSERT OR IGNORE INTO sessions (user_id) VALUES (?1)",
            [user_id],
        )?;
        conn.execute(
            "UPDATE sessions SET currency = ?1 WHERE user_id = ?2",
            rusqlite::params![currency.code(), user_id],
        )?;
        Ok(())
    }

    fn add_item(&self, user_id: i64, product_id: i64) -> Result<u32, StoreError> {
        let conn = self.lock();
        let mut session = self.session_row(&conn, user_id)?;
        let quantity = session.add_item(product_id);
        self.save_cart(&conn, user_id, &session)?;
        Ok(quantity)
    }

    fn clear_cart(&self, user_id: i64) -> Result<(), StoreError> {
        let conn = self.lock();
        let mut session = self.session_row(&conn, user_id)?;
        session.clear_cart();
        self.save_cart(&conn, user_id, &session)
    }
}

#[cfg(test)]
mod tests {
    use super::seed::PRODUCT_SEED;
    use super::*;

    fn db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.replace_all(PRODUCT_SEED).unwrap();
        db
    }

    #[test]
    fn lookup_finds_loaded_products_and_misses_unknown_ids() {
        let db = db();
        let product = db.lookup(1).unwrap().unwrap();
        assert_eq!(product.id, 1);
        assert!(!product.name.is_empty());
        assert!(db.lookup(999_999).unwrap().is_none());
    }

    #[test]
    fn replace_all_is_atomic_on_a_malformed_row() {
        let db = db();
        let before = db.product_count().unwrap();

        let bad = vec![
            ProductSeed {
                name: "Good",
                category: "streaming",
                price: 100.0,
                description: "",
                delivery_info: "",
            },
            ProductSeed {
                name: "Bad",
                category: "streaming",
                price: -7.0,
                description: "",
                delivery_info: "",
            },
        ];

        let result = db.replace_all(&bad);
        assert!(matches!(result, Err(StoreError::InvalidRow(_))));
        // Prior catalog stays fully visible
        assert_eq!(db.product_count().unwrap(), before);
        assert!(db.lookup(1).unwrap().is_some());
    }

    #[test]
    fn session_is_created_lazily_and_idempotently() {
        let db = db();
        let first = db.session(42).unwrap();
        assert_eq!(first.currency, Currency::BASE);
        assert!(first.is_cart_empty());

        let second = db.session(42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn add_item_increments_and_persists() {
        let db = db();
        assert_eq!(db.add_item(42, 3).unwrap(), 1);
        assert_eq!(db.add_item(42, 3).unwrap(), 2);
        assert_eq!(db.add_item(42, 5).unwrap(), 1);

        let session = db.session(42).unwrap();
        assert_eq!(session.cart.get(&3), Some(&2));
        assert_eq!(session.cart.get(&5), Some(&1));
    }

    #[test]
    fn clear_cart_leaves_currency_untouched() {
        let db = db();
        db.add_item(42, 3).unwrap();
        db.set_currency(42, Currency::Usdt).unwrap();
        db.clear_cart(42).unwrap();

        let session = db.session(42).unwrap();
        assert!(session.is_cart_empty());
        assert_eq!(session.currency, Currency::Usdt);
    }

    #[test]
    fn sessions_of_different_users_are_independent() {
        let db = db();
        db.add_item(1, 3).unwrap();
        db.set_currency(1, Currency::Usdt).unwrap();

        let other = db.session(2).unwrap();
        assert!(other.is_cart_empty());
        assert_eq!(other.currency, Currency::BASE);
    }

    #[test]
    fn set_currency_creates_the_session_row_when_needed() {
        let db = db();
        db.set_currency(7, Currency::Usdt).unwrap();
        assert_eq!(db.session(7).unwrap().currency, Currency::Usdt);
    }
}
