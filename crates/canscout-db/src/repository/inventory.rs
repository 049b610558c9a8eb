//! # Inventory Repository
//!
//! Per-location price and availability rows.
//!
//! ## Upsert
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Scan (location L, product P, price?, in_stock)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT ... ON CONFLICT (location_id, product_id) DO UPDATE             │
//! │       │                                                                 │
//! │       ├── no row for (L, P)   → inserted, xmax = 0   → created = true   │
//! │       └── row exists          → updated, xmax ≠ 0    → created = false  │
//! │                                                                         │
//! │  price omitted → existing price kept (COALESCE)                         │
//! │  last_updated  → refreshed by trigger on every write                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use canscout_core::{InventoryEntry, InventoryItem};

use crate::error::{DbError, DbResult};

const INVENTORY_COLUMNS: &str = "id, location_id, product_id, price_cents, in_stock, last_updated";

#[derive(sqlx::FromRow)]
struct UpsertRow {
    id: Uuid,
    location_id: Uuid,
    product_id: Uuid,
    price_cents: Option<i64>,
    in_stock: bool,
    last_updated: DateTime<Utc>,
    created: bool,
}

/// Repository for inventory database operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: PgPool) -> Self {
        InventoryRepository { pool }
    }

    /// Inserts or updates the row for (location, product).
    ///
    /// ## Returns
    /// The stored row and whether it was newly created. Repeating the same
    /// call leaves exactly one row and reports `created = false`.
    pub async fn upsert(
        &self,
        location_id: Uuid,
        product_id: Uuid,
        price_cents: Option<i64>,
        in_stock: bool,
    ) -> DbResult<(InventoryItem, bool)> {
        debug!(
            location_id = %location_id,
            product_id = %product_id,
            price_cents = ?price_cents,
            in_stock,
            "Upserting inventory"
        );

        let row = sqlx::query_as::<_, UpsertRow>(
            r#"
            INSERT INTO inventory (id, location_id, product_id, price_cents, in_stock)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT ON CONSTRAINT inventory_location_product_key DO UPDATE SET
                price_cents = COALESCE(EXCLUDED.price_cents, inventory.price_cents),
                in_stock = EXCLUDED.in_stock
            RETURNING id, location_id, product_id, price_cents, in_stock, last_updated,
                      (xmax = 0) AS created
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(location_id)
        .bind(product_id)
        .bind(price_cents)
        .bind(in_stock)
        .fetch_one(&self.pool)
        .await?;

        let item = InventoryItem {
            id: row.id,
            location_id: row.location_id,
            product_id: row.product_id,
            price_cents: row.price_cents,
            in_stock: row.in_stock,
            last_updated: row.last_updated,
        };

        Ok((item, row.created))
    }

    /// Gets the row for (location, product), if any.
    pub async fn get(&self, location_id: Uuid, product_id: Uuid) -> DbResult<Option<InventoryItem>> {
        let sql = format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventory WHERE location_id = $1 AND product_id = $2"
        );

        let item = sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(location_id)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Every inventory row at a location joined with its product,
    /// ordered by brand, flavor, size.
    pub async fn list_for_location(&self, location_id: Uuid) -> DbResult<Vec<InventoryEntry>> {
        let entries = sqlx::query_as::<_, InventoryEntry>(
            r#"
            SELECT i.id AS inventory_id,
                   p.id AS product_id,
                   p.brand,
                   p.flavor,
                   p.size,
                   p.barcode,
                   i.price_cents,
                   i.in_stock,
                   i.last_updated
            FROM inventory i
            JOIN products p ON p.id = i.product_id
            WHERE i.location_id = $1
            ORDER BY p.brand, p.flavor, p.size
            "#,
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Deletes one inventory row.
    pub async fn delete(&self, id: Uuid) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inventory", id));
        }

        Ok(())
    }

    /// Counts rows for a (location, product) pair. Test and diagnostics helper.
    pub async fn count_for(&self, location_id: Uuid, product_id: Uuid) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM inventory WHERE location_id = $1 AND product_id = $2",
        )
        .bind(location_id)
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
