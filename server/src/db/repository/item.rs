//! Item Repository
//!
//! Catalog reads and staff CRUD. Stock decrements never happen here —
//! they are part of the settlement transaction in the order repository.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Category, Item, ItemCreate, ItemUpdate};
use crate::utils::pagination::Cursor;

const ITEM_TABLE: &str = "item";
const PAGE_SIZE: i64 = 10;

/// One page of catalog results
#[derive(Debug)]
pub struct ItemPage {
    pub results: Vec<Item>,
    pub remaining: i64,
    pub next_cursor: Option<String>,
}

#[derive(Clone)]
pub struct ItemRepository {
    base: BaseRepository,
}

impl ItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Item>> {
        let record_id = parse_record_id(ITEM_TABLE, id)?;
        let item: Option<Item> = self.base.db().select(record_id).await?;
        Ok(item)
    }

    /// List available items, newest first, with optional name substring
    /// and category filters and cursor pagination.
    pub async fn list(
        &self,
        name: Option<String>,
        category: Option<Category>,
        cursor: Option<Cursor>,
    ) -> RepoResult<ItemPage> {
        let mut conditions = vec!["is_available = true".to_string()];
        if name.is_some() {
            conditions
                .push("string::contains(string::lowercase(name), string::lowercase($name))".into());
        }
        if category.is_some() {
            conditions.push("category = $category".into());
        }
        if cursor.is_some() {
            conditions.push(
                "(created_at < $cursor_created OR (created_at = $cursor_created AND id < $cursor_id))"
                    .into(),
            );
        }
        let where_clause = conditions.join(" AND ");

        let sql = format!(
            "SELECT * FROM item WHERE {where_clause} ORDER BY created_at DESC, id DESC LIMIT $limit; \
             SELECT count() FROM item WHERE {where_clause} GROUP ALL;"
        );

        let mut query = self.base.db().query(sql).bind(("limit", PAGE_SIZE));
        if let Some(name) = name {
            query = query.bind(("name", name));
        }
        if let Some(category) = category {
            query = query.bind(("category", category));
        }
        if let Some(cursor) = cursor {
            let cursor_id = parse_record_id(ITEM_TABLE, &cursor.id)?;
            query = query
                .bind(("cursor_created", cursor.created_at))
                .bind(("cursor_id", cursor_id));
        }

        let mut response = query.await?;
        let results: Vec<Item> = response.take(0)?;
        let count: Option<CountRow> = response.take(1)?;
        let total = count.map(|c| c.count).unwrap_or(0);

        let remaining = total - results.len() as i64;
        let next_cursor = if remaining > 0 {
            results
                .last()
                .and_then(|item| item.id.as_ref().map(|id| Cursor::encode(&item.created_at, id)))
        } else {
            None
        };

        Ok(ItemPage {
            results,
            remaining,
            next_cursor,
        })
    }

    /// Active-name uniqueness check; soft-deleted items may share a name.
    async fn find_available_by_name(&self, name: &str) -> RepoResult<Option<Item>> {
        let items: Vec<Item> = self
            .base
            .db()
            .query("SELECT * FROM item WHERE name = $name AND is_available = true LIMIT 1")
            .bind(("name", name.to_string()))
            .await?
            .take(0)?;
        Ok(items.into_iter().next())
    }

    pub async fn create(&self, data: ItemCreate) -> RepoResult<Item> {
        if self.find_available_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!("item name {}", data.name)));
        }

        let item = Item {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image: data.image.unwrap_or_else(|| "default".to_string()),
            quantity: data.quantity,
            is_available: true,
            created_at: Utc::now(),
        };

        let created: Option<Item> = self.base.db().create(ITEM_TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("item was not created".into()))
    }

    /// Full update of an available item (staff edit form).
    pub async fn update(&self, id: &str, data: ItemUpdate) -> RepoResult<Item> {
        let record_id = parse_record_id(ITEM_TABLE, id)?;

        if let Some(existing) = self.find_available_by_name(&data.name).await?
            && existing.id.as_ref() != Some(&record_id)
        {
            return Err(RepoError::Duplicate(format!("item name {}", data.name)));
        }

        let updated: Vec<Item> = self
            .base
            .db()
            .query("UPDATE $id MERGE $changes WHERE is_available = true RETURN AFTER")
            .bind(("id", record_id))
            .bind(("changes", data))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Item {id}")))
    }

    /// Soft-delete: flip the availability flag, never remove the record.
    pub async fn soft_delete(&self, id: &str) -> RepoResult<()> {
        let record_id = parse_record_id(ITEM_TABLE, id)?;
        let updated: Vec<Item> = self
            .base
            .db()
            .query("UPDATE $id SET is_available = false WHERE is_available = true RETURN AFTER")
            .bind(("id", record_id))
            .await?
            .take(0)?;

        if updated.is_empty() {
            return Err(RepoError::NotFound(format!("Item {id}")));
        }
        Ok(())
    }
}
