//! # Product Repository
//!
//! Database operations for the energy drink catalog.
//!
//! ## Key Operations
//! - Substring search over brand and flavor
//! - CRUD operations for the admin table
//! - Barcode lookup for the scanner
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Catalog Search Works                             │
//! │                                                                         │
//! │  User types: "mon"                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ILIKE '%mon%' against brand, flavor, and "brand flavor"                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────┐                        │
//! │  │ Monster Energy | Ultra White  | 16 fl oz    │ ← prefix match, rank 0 │
//! │  │ Reign          | Lemon HDZ    | 16 fl oz    │   (no match)           │
//! │  │ Bang           | Lemon Drop   | 16 fl oz    │                        │
//! │  │ Celsius        | Lemon Mon... | 12 fl oz    │ ← substring, rank 1    │
//! │  └─────────────────────────────────────────────┘                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ORDER BY rank, brand, flavor, size  LIMIT n                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use canscout_core::validation::escape_like;
use canscout_core::{NewProduct, Product};

use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str = "id, brand, flavor, size, caffeine_mg, sugar_g, calories, \
                               barcode, description, image_url, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let results = repo.search("monster", 20).await?;
/// let product = repo.get_by_barcode("070847811169").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: PgPool) -> Self {
        ProductRepository { pool }
    }

    /// Searches products by brand and flavor.
    ///
    /// ## How It Works
    /// 1. `%`, `_` and `\` in the query are escaped so they match literally
    /// 2. Case-insensitive substring match on brand, flavor, or "brand flavor"
    /// 3. Prefix matches rank first, then alphabetical by brand, flavor, size
    ///
    /// An empty query lists the catalog alphabetically.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching products");

        if query.is_empty() {
            return self.list(limit, 0).await;
        }

        let escaped = escape_like(query);
        let contains = format!("%{}%", escaped);
        let prefix = format!("{}%", escaped);

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE brand ILIKE $1
               OR flavor ILIKE $1
               OR (brand || ' ' || flavor) ILIKE $1
            ORDER BY
                CASE
                    WHEN brand ILIKE $2 OR flavor ILIKE $2 OR (brand || ' ' || flavor) ILIKE $2
                    THEN 0
                    ELSE 1
                END,
                brand, flavor, size
            LIMIT $3
            "#
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(&contains)
            .bind(&prefix)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Lists products alphabetically, one page at a time.
    pub async fn list(&self, limit: u32, offset: u32) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY brand, flavor, size LIMIT $1 OFFSET $2"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(offset))
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: Uuid) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by its barcode (exact match).
    ///
    /// ## Usage
    /// Called by the scan workflow and by search when the query looks like
    /// a barcode.
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        debug!(barcode = %barcode, "Looking up product by barcode");

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE barcode = $1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(barcode)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product and returns the stored row.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when (brand, flavor, size) or the barcode
    /// already exists.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(brand = %product.brand, flavor = %product.flavor, size = %product.size, "Inserting product");

        let sql = format!(
            r#"
            INSERT INTO products (
                id, brand, flavor, size, caffeine_mg, sugar_g, calories,
                barcode, description, image_url
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(Uuid::new_v4())
            .bind(&product.brand)
            .bind(&product.flavor)
            .bind(&product.size)
            .bind(product.caffeine_mg)
            .bind(product.sugar_g)
            .bind(product.calories)
            .bind(&product.barcode)
            .bind(&product.description)
            .bind(&product.image_url)
            .fetch_one(&self.pool)
            .await?;

        Ok(product)
    }

    /// Replaces every editable field of an existing product.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no product with this id
    /// * `DbError::UniqueViolation` - the new identity collides with another row
    pub async fn update(&self, id: Uuid, product: &NewProduct) -> DbResult<Product> {
        debug!(id = %id, "Updating product");

        let sql = format!(
            r#"
            UPDATE products SET
                brand = $2,
                flavor = $3,
                size = $4,
                caffeine_mg = $5,
                sugar_g = $6,
                calories = $7,
                barcode = $8,
                description = $9,
                image_url = $10
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&product.brand)
            .bind(&product.flavor)
            .bind(&product.size)
            .bind(product.caffeine_mg)
            .bind(product.sugar_g)
            .bind(product.calories)
            .bind(&product.barcode)
            .bind(&product.description)
            .bind(&product.image_url)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product. Its inventory rows go with it (ON DELETE CASCADE).
    pub async fn delete(&self, id: Uuid) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
