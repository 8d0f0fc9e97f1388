//! Delivery Location Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Location, LocationCreate};

const LOCATION_TABLE: &str = "location";

#[derive(Clone)]
pub struct LocationRepository {
    base: BaseRepository,
}

impl LocationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All available delivery locations (the set is small, no paging).
    pub async fn find_all(&self) -> RepoResult<Vec<Location>> {
        let locations: Vec<Location> = self
            .base
            .db()
            .query("SELECT * FROM location WHERE is_available = true ORDER BY address")
            .await?
            .take(0)?;
        Ok(locations)
    }

    pub async fn create(&self, data: LocationCreate) -> RepoResult<Location> {
        let duplicates: Vec<Location> = self
            .base
            .db()
            .query(
                "SELECT * FROM location \
                 WHERE address = $address OR (latitude = $latitude AND longitude = $longitude) \
                 LIMIT 1",
            )
            .bind(("address", data.address.clone()))
            .bind(("latitude", data.latitude))
            .bind(("longitude", data.longitude))
            .await?
            .take(0)?;
        if !duplicates.is_empty() {
            return Err(RepoError::Duplicate(format!("location {}", data.address)));
        }

        let location = Location {
            id: None,
            address: data.address,
            latitude: data.latitude,
            longitude: data.longitude,
            is_available: true,
            created_at: Utc::now(),
        };

        let created: Option<Location> = self
            .base
            .db()
            .create(LOCATION_TABLE)
            .content(location)
            .await?;
        created.ok_or_else(|| RepoError::Database("location was not created".into()))
    }

    pub async fn soft_delete(&self, id: &str) -> RepoResult<()> {
        let record_id = parse_record_id(LOCATION_TABLE, id)?;
        let updated: Vec<Location> = self
            .base
            .db()
            .query("UPDATE $id SET is_available = false WHERE is_available = true RETURN AFTER")
            .bind(("id", record_id))
            .await?
            .take(0)?;

        if updated.is_empty() {
            return Err(RepoError::NotFound(format!("Location {id}")));
        }
        Ok(())
    }
}
