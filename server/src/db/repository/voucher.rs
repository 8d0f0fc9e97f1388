//! Voucher Repository
//!
//! Lookups for checkout plus staff CRUD. Settlement never mutates a
//! voucher record; consumption lives on the account.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Voucher, VoucherCreate};
use crate::utils::pagination::Cursor;

const VOUCHER_TABLE: &str = "voucher";
const PAGE_SIZE: i64 = 10;

/// One page of voucher results
#[derive(Debug)]
pub struct VoucherPage {
    pub results: Vec<Voucher>,
    pub remaining: i64,
    pub next_cursor: Option<String>,
}

#[derive(Clone)]
pub struct VoucherRepository {
    base: BaseRepository,
}

impl VoucherRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Voucher>> {
        let record_id = parse_record_id(VOUCHER_TABLE, id)?;
        let voucher: Option<Voucher> = self.base.db().select(record_id).await?;
        Ok(voucher)
    }

    /// Code lookup restricted to available vouchers — the only lookup the
    /// checkout engine uses.
    pub async fn find_available_by_code(&self, code: &str) -> RepoResult<Option<Voucher>> {
        let vouchers: Vec<Voucher> = self
            .base
            .db()
            .query("SELECT * FROM voucher WHERE code = $code AND is_available = true LIMIT 1")
            .bind(("code", code.to_string()))
            .await?
            .take(0)?;
        Ok(vouchers.into_iter().next())
    }

    /// List available vouchers, newest first, cursor paginated.
    pub async fn list(&self, cursor: Option<Cursor>) -> RepoResult<VoucherPage> {
        let mut conditions = vec!["is_available = true".to_string()];
        if cursor.is_some() {
            conditions.push(
                "(created_at < $cursor_created OR (created_at = $cursor_created AND id < $cursor_id))"
                    .into(),
            );
        }
        let where_clause = conditions.join(" AND ");

        let sql = format!(
            "SELECT * FROM voucher WHERE {where_clause} ORDER BY created_at DESC, id DESC LIMIT $limit; \
             SELECT count() FROM voucher WHERE {where_clause} GROUP ALL;"
        );

        let mut query = self.base.db().query(sql).bind(("limit", PAGE_SIZE));
        if let Some(cursor) = cursor {
            let cursor_id = parse_record_id(VOUCHER_TABLE, &cursor.id)?;
            query = query
                .bind(("cursor_created", cursor.created_at))
                .bind(("cursor_id", cursor_id));
        }

        let mut response = query.await?;
        let results: Vec<Voucher> = response.take(0)?;
        let count: Option<CountRow> = response.take(1)?;
        let total = count.map(|c| c.count).unwrap_or(0);

        let remaining = total - results.len() as i64;
        let next_cursor = if remaining > 0 {
            results
                .last()
                .and_then(|v| v.id.as_ref().map(|id| Cursor::encode(&v.created_at, id)))
        } else {
            None
        };

        Ok(VoucherPage {
            results,
            remaining,
            next_cursor,
        })
    }

    pub async fn create(&self, data: VoucherCreate) -> RepoResult<Voucher> {
        // Uniqueness holds only among available vouchers; a soft-deleted
        // voucher may leave the same code behind.
        if self.find_available_by_code(&data.code).await?.is_some() {
            return Err(RepoError::Duplicate(format!("voucher code {}", data.code)));
        }

        let voucher = Voucher {
            id: None,
            code: data.code,
            title: data.title,
            description: data.description,
            kind: data.kind,
            value: data.value,
            is_available: true,
            created_at: Utc::now(),
        };

        let created: Option<Voucher> = self
            .base
            .db()
            .create(VOUCHER_TABLE)
            .content(voucher)
            .await?;
        created.ok_or_else(|| RepoError::Database("voucher was not created".into()))
    }

    pub async fn soft_delete(&self, id: &str) -> RepoResult<()> {
        let record_id = parse_record_id(VOUCHER_TABLE, id)?;
        let updated: Vec<Voucher> = self
            .base
            .db()
            .query("UPDATE $id SET is_available = false WHERE is_available = true RETURN AFTER")
            .bind(("id", record_id))
            .await?
            .take(0)?;

        if updated.is_empty() {
            return Err(RepoError::NotFound(format!("Voucher {id}")));
        }
        Ok(())
    }
}
