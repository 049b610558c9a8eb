//! # Location Repository
//!
//! Database operations for retail locations, including distance queries.
//!
//! ## Distance Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Query point (lat, lng) ──► ST_MakePoint(lng, lat)::geography           │
//! │                                  │                                      │
//! │        ┌─────────────────────────┼─────────────────────────┐            │
//! │        ▼                         ▼                         ▼            │
//! │   nearby(radius)            nearest()              distance column      │
//! │   ST_DWithin(geog, p, r)    ORDER BY geog <-> p    ST_Distance(geog, p) │
//! │   (GIST index)              LIMIT 1 (KNN)          meters, spheroid     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ST_MakePoint` takes x before y, so longitude is always bound first.

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use canscout_core::{Coordinate, Location, NearbyLocation, NewLocation};

use crate::error::{DbError, DbResult};

const LOCATION_COLUMNS: &str = "l.id, l.name, l.address, l.city, l.state, l.postal_code, \
                                l.latitude, l.longitude, l.created_at, l.updated_at";

/// Repository for location database operations.
#[derive(Debug, Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    /// Creates a new LocationRepository.
    pub fn new(pool: PgPool) -> Self {
        LocationRepository { pool }
    }

    /// Lists every location, alphabetically by name.
    ///
    /// Used by the map's initial render and the admin table.
    pub async fn list_all(&self) -> DbResult<Vec<Location>> {
        let sql = format!("SELECT {LOCATION_COLUMNS} FROM locations l ORDER BY l.name, l.city");

        let locations = sqlx::query_as::<_, Location>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(locations)
    }

    /// Gets a location by its ID.
    pub async fn get_by_id(&self, id: Uuid) -> DbResult<Option<Location>> {
        let sql = format!("SELECT {LOCATION_COLUMNS} FROM locations l WHERE l.id = $1");

        let location = sqlx::query_as::<_, Location>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }

    /// Finds a location by street address and city, ignoring case and
    /// surrounding whitespace.
    ///
    /// ## Usage
    /// Discovery import calls this to skip stores already on file.
    pub async fn find_by_address_city(
        &self,
        address: &str,
        city: &str,
    ) -> DbResult<Option<Location>> {
        let sql = format!(
            r#"
            SELECT {LOCATION_COLUMNS}
            FROM locations l
            WHERE lower(btrim(l.address)) = lower(btrim($1))
              AND lower(btrim(l.city)) = lower(btrim($2))
            LIMIT 1
            "#
        );

        let location = sqlx::query_as::<_, Location>(&sql)
            .bind(address)
            .bind(city)
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }

    /// Inserts a new location. The geography column is filled by trigger.
    pub async fn insert(&self, location: &NewLocation) -> DbResult<Location> {
        debug!(name = %location.name, city = %location.city, "Inserting location");

        let sql = format!(
            r#"
            INSERT INTO locations AS l (
                id, name, address, city, state, postal_code, latitude, longitude
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {LOCATION_COLUMNS}
            "#
        );

        let location = sqlx::query_as::<_, Location>(&sql)
            .bind(Uuid::new_v4())
            .bind(&location.name)
            .bind(&location.address)
            .bind(&location.city)
            .bind(&location.state)
            .bind(&location.postal_code)
            .bind(location.latitude)
            .bind(location.longitude)
            .fetch_one(&self.pool)
            .await?;

        Ok(location)
    }

    /// Replaces every editable field of an existing location.
    pub async fn update(&self, id: Uuid, location: &NewLocation) -> DbResult<Location> {
        debug!(id = %id, "Updating location");

        let sql = format!(
            r#"
            UPDATE locations AS l SET
                name = $2,
                address = $3,
                city = $4,
                state = $5,
                postal_code = $6,
                latitude = $7,
                longitude = $8
            WHERE l.id = $1
            RETURNING {LOCATION_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Location>(&sql)
            .bind(id)
            .bind(&location.name)
            .bind(&location.address)
            .bind(&location.city)
            .bind(&location.state)
            .bind(&location.postal_code)
            .bind(location.latitude)
            .bind(location.longitude)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Location", id))
    }

    /// Deletes a location and its inventory rows.
    pub async fn delete(&self, id: Uuid) -> DbResult<()> {
        debug!(id = %id, "Deleting location");

        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Location", id));
        }

        Ok(())
    }

    /// Counts all locations.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Locations within `radius_m` meters of `center`, nearest first.
    ///
    /// ## Product Filter
    /// With `product_id`, only locations holding an in-stock inventory row
    /// for that product are returned, and each result carries the row's
    /// price and timestamp. Without it those columns are `None`.
    pub async fn nearby(
        &self,
        center: Coordinate,
        radius_m: f64,
        limit: u32,
        product_id: Option<Uuid>,
    ) -> DbResult<Vec<NearbyLocation>> {
        debug!(
            lat = center.latitude,
            lng = center.longitude,
            radius_m,
            limit,
            product_id = ?product_id,
            "Nearby location query"
        );

        let sql = format!(
            r#"
            SELECT {LOCATION_COLUMNS},
                   ST_Distance(l.geog, ST_SetSRID(ST_MakePoint($2, $1), 4326)::geography) AS distance_m,
                   i.price_cents,
                   i.in_stock,
                   i.last_updated
            FROM locations l
            LEFT JOIN inventory i
                   ON i.location_id = l.id
                  AND i.product_id = $5
            WHERE ST_DWithin(l.geog, ST_SetSRID(ST_MakePoint($2, $1), 4326)::geography, $3)
              AND ($5::uuid IS NULL OR COALESCE(i.in_stock, FALSE))
            ORDER BY distance_m ASC
            LIMIT $4
            "#
        );

        let locations = sqlx::query_as::<_, NearbyLocation>(&sql)
            .bind(center.latitude)
            .bind(center.longitude)
            .bind(radius_m)
            .bind(i64::from(limit))
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = locations.len(), "Nearby query returned locations");
        Ok(locations)
    }

    /// The single nearest location to `center`, with its distance.
    ///
    /// Returns `None` only when there are no locations at all.
    pub async fn nearest(&self, center: Coordinate) -> DbResult<Option<NearbyLocation>> {
        let sql = format!(
            r#"
            SELECT {LOCATION_COLUMNS},
                   ST_Distance(l.geog, ST_SetSRID(ST_MakePoint($2, $1), 4326)::geography) AS distance_m,
                   NULL::bigint AS price_cents,
                   NULL::boolean AS in_stock,
                   NULL::timestamptz AS last_updated
            FROM locations l
            ORDER BY l.geog <-> ST_SetSRID(ST_MakePoint($2, $1), 4326)::geography
            LIMIT 1
            "#
        );

        let location = sqlx::query_as::<_, NearbyLocation>(&sql)
            .bind(center.latitude)
            .bind(center.longitude)
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }
}
