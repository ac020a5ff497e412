//! Append-only order persistence.
//!
//! Two files under the configured directory, written together inside one
//! critical section:
//!
//! - `orders.txt` - human-readable French block per order, append-only.
//!   This is the operator's ground truth and is never rewritten.
//! - `orders.json` - full JSON array, rewritten atomically (temp file +
//!   rename) on every append so a crash mid-write never truncates it.
//!
//! An optional `PostgreSQL` mirror receives a copy of every order for
//! dashboard queries. The mirror is best-effort: a failed insert is logged
//! and the files remain authoritative.

use std::path::{Path, PathBuf};

use sqlx::PgPool;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use benilink_core::order::Order;

const TEXT_LOG: &str = "orders.txt";
const JSON_LOG: &str = "orders.json";

/// Errors from the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The order store. Cheap to share behind the application state `Arc`.
pub struct OrderStore {
    dir: PathBuf,
    // serializes append-read-rewrite cycles across handlers
    write_lock: Mutex<()>,
    mirror: Option<PgPool>,
}

impl OrderStore {
    /// Create a store rooted at `dir`. The directory is created on first
    /// append, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, mirror: Option<PgPool>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
            mirror,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Append a validated order to both logs, then mirror it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if either file write fails; the mirror insert
    /// is best-effort and never fails the append.
    pub async fn append(&self, order: &Order) -> Result<(), StoreError> {
        {
            let _guard = self.write_lock.lock().await;

            tokio::fs::create_dir_all(&self.dir).await?;

            let mut text_log = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.dir.join(TEXT_LOG))
                .await?;
            text_log.write_all(format_text_block(order).as_bytes()).await?;
            text_log.flush().await?;

            let mut orders = self.read_json().await?;
            orders.push(order.clone());
            self.rewrite_json(&orders).await?;
        }

        if let Some(pool) = &self.mirror {
            if let Err(err) = mirror_insert(pool, order).await {
                tracing::warn!(
                    order_id = %order.order_id,
                    error = %err,
                    "Order mirror insert failed; file logs remain authoritative"
                );
            }
        }

        tracing::info!(
            order_id = %order.order_id,
            total = %order.total_amount,
            payment = %order.payment_method,
            "Order persisted"
        );
        Ok(())
    }

    /// All persisted orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if `orders.json` exists but cannot be read or
    /// parsed. A missing file is an empty store.
    pub async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut orders = self.read_json().await?;
        orders.reverse();
        Ok(orders)
    }

    /// Number of persisted orders.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::list`].
    pub async fn count(&self) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.read_json().await?.len())
    }

    async fn read_json(&self) -> Result<Vec<Order>, StoreError> {
        match tokio::fs::read(self.dir.join(JSON_LOG)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn rewrite_json(&self, orders: &[Order]) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(orders)?;
        let tmp = self.dir.join(format!("{JSON_LOG}.tmp"));
        tokio::fs::write(&tmp, payload).await?;
        tokio::fs::rename(&tmp, self.dir.join(JSON_LOG)).await?;
        Ok(())
    }
}

/// The operator-facing French block appended to `orders.txt`.
fn format_text_block(order: &Order) -> String {
    use std::fmt::Write;

    let info = &order.delivery_info;
    let mut block = String::new();
    let _ = writeln!(block, "=== NOUVELLE COMMANDE ===");
    let _ = writeln!(block, "ID: {}", order.order_id);
    let _ = writeln!(block, "Date: {}", order.timestamp.to_rfc3339());
    let _ = writeln!(block, "Client: {}", info.full_name);
    let _ = writeln!(block, "Téléphone: {}", info.phone);
    if !info.email.is_empty() {
        let _ = writeln!(block, "Email: {}", info.email);
    }
    let _ = writeln!(
        block,
        "Adresse: {}, {} {}, {}",
        info.address, info.postal_code, info.city, info.country
    );
    let _ = writeln!(block, "Livraison: {}", order.delivery_method);
    let _ = writeln!(block, "Paiement: {}", order.payment_method);
    let _ = writeln!(block, "Articles:");
    for item in &order.items {
        let _ = writeln!(
            block,
            "  - {} x {} ({:.2} EUR) = {:.2} EUR",
            item.quantity, item.name, item.price_eur, item.total_eur
        );
    }
    let _ = writeln!(block, "Poids total: {} kg", order.total_weight_kg);
    let _ = writeln!(block, "Sous-total: {:.2} EUR", order.subtotal);
    let _ = writeln!(block, "Frais de livraison: {:.2} EUR", order.shipping_cost);
    let _ = writeln!(block, "TVA incluse: {:.2} EUR", order.tax_amount);
    let _ = writeln!(block, "TOTAL: {:.2} EUR", order.total_amount);
    let _ = writeln!(block, "=========================");
    let _ = writeln!(block);
    block
}

/// Mirror an order into `PostgreSQL`. The table is created by the operator:
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS orders (
///     order_id     TEXT PRIMARY KEY,
///     created_at   TIMESTAMPTZ NOT NULL,
///     total_amount NUMERIC(10, 2) NOT NULL,
///     payload      JSONB NOT NULL
/// );
/// ```
async fn mirror_insert(pool: &PgPool, order: &Order) -> Result<(), sqlx::Error> {
    let payload =
        serde_json::to_value(order).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
    sqlx::query(
        "INSERT INTO orders (order_id, created_at, total_amount, payload)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (order_id) DO NOTHING",
    )
    .bind(order.order_id.as_str())
    .bind(order.timestamp)
    .bind(order.total_amount)
    .bind(payload)
    .execute(pool)
    .await?;
    Ok(())
}
