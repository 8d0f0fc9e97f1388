//! Order Repository
//!
//! The order ledger is append-only: settlement creates a record once and
//! the only later writes are the fulfillment flag and the soft-delete
//! marker. [`OrderRepository::settle`] is the single multi-record write
//! path in the whole server — it commits the order, the account debit and
//! every stock decrement as one SurrealQL transaction.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, parse_record_id};
use crate::db::models::{AccountId, ItemId, Order, VoucherId};
use crate::utils::pagination::Cursor;

const ORDER_TABLE: &str = "order";
const PAGE_SIZE: i64 = 10;

/// Marker embedded in THROW messages so aborted commits can be told apart
/// from genuine storage failures.
const CONFLICT_MARKER: &str = "settlement_conflict";

/// One page of ledger results
#[derive(Debug)]
pub struct OrderPage {
    pub results: Vec<Order>,
    pub remaining: i64,
    pub next_cursor: Option<String>,
}

/// Everything the settlement transaction needs, precomputed by the
/// checkout engine. All figures were validated against a snapshot read;
/// the transaction re-checks the guards so a concurrent writer can only
/// abort the commit, never corrupt it.
#[derive(Debug, Clone)]
pub struct SettlementPlan {
    /// Pre-generated key for the new order record
    pub order_key: String,
    /// Fully computed order content (`id` left unset)
    pub order: Order,
    pub customer: AccountId,
    /// Points debited from the account
    pub converted_points: i64,
    /// Large-order loyalty award (0 or 1), applied in the same update
    pub point_award: i64,
    /// Vouchers appended to the account's consumed set
    pub voucher_ids: Vec<VoucherId>,
    /// Per-item stock decrements
    pub stock_decrements: Vec<(ItemId, i64)>,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let record_id = parse_record_id(ORDER_TABLE, id)?;
        let order: Option<Order> = self.base.db().select(record_id).await?;
        Ok(order)
    }

    /// List orders by fulfillment state, oldest first (the fulfillment
    /// queue is worked in arrival order), cursor paginated.
    pub async fn list(&self, is_fulfilled: bool, cursor: Option<Cursor>) -> RepoResult<OrderPage> {
        let mut conditions =
            vec!["is_available = true AND is_fulfilled = $is_fulfilled".to_string()];
        if cursor.is_some() {
            conditions.push(
                "(created_at > $cursor_created OR (created_at = $cursor_created AND id > $cursor_id))"
                    .into(),
            );
        }
        let where_clause = conditions.join(" AND ");

        let sql = format!(
            "SELECT * FROM order WHERE {where_clause} ORDER BY created_at ASC, id ASC LIMIT $limit; \
             SELECT count() FROM order WHERE {where_clause} GROUP ALL;"
        );

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("is_fulfilled", is_fulfilled))
            .bind(("limit", PAGE_SIZE));
        if let Some(cursor) = cursor {
            let cursor_id = parse_record_id(ORDER_TABLE, &cursor.id)?;
            query = query
                .bind(("cursor_created", cursor.created_at))
                .bind(("cursor_id", cursor_id));
        }

        let mut response = query.await?;
        let results: Vec<Order> = response.take(0)?;
        let count: Option<CountRow> = response.take(1)?;
        let total = count.map(|c| c.count).unwrap_or(0);

        let remaining = total - results.len() as i64;
        let next_cursor = if remaining > 0 {
            results
                .last()
                .and_then(|o| o.id.as_ref().map(|id| Cursor::encode(&o.created_at, id)))
        } else {
            None
        };

        Ok(OrderPage {
            results,
            remaining,
            next_cursor,
        })
    }

    /// Commit a settlement as a single atomic transaction.
    ///
    /// Statement order inside the transaction:
    /// 1. Conditional account update — points debit plus award, voucher
    ///    ids appended. Guarded by a sufficient balance and no overlap
    ///    between the applied vouchers and the already-consumed set.
    /// 2. One conditional stock decrement per cart line, guarded by
    ///    availability and remaining stock.
    /// 3. `CREATE` of the order record.
    ///
    /// Any failed guard THROWs, which cancels the whole transaction —
    /// either every mutation commits or none does. A cancelled commit
    /// surfaces as [`RepoError::Conflict`], which callers treat as
    /// retryable.
    pub async fn settle(&self, plan: SettlementPlan) -> RepoResult<Order> {
        let mut sql = String::from("BEGIN TRANSACTION;\n");

        sql.push_str(
            "LET $acct = (UPDATE $customer \
             SET points = points + $point_award - $converted_points, \
                 voucher_used = array::concat(voucher_used, $voucher_ids) \
             WHERE points >= $converted_points \
               AND array::len(array::intersect(voucher_used, $voucher_ids)) == 0 \
             RETURN AFTER);\n",
        );
        sql.push_str(&format!(
            "IF array::len($acct) == 0 {{ THROW \"{CONFLICT_MARKER}: account points or vouchers changed\" }};\n"
        ));

        for index in 0..plan.stock_decrements.len() {
            sql.push_str(&format!(
                "LET $line_{index} = (UPDATE $item_{index} \
                 SET quantity = quantity - $qty_{index} \
                 WHERE is_available = true AND quantity >= $qty_{index} \
                 RETURN AFTER);\n\
                 IF array::len($line_{index}) == 0 {{ THROW \"{CONFLICT_MARKER}: stock changed\" }};\n"
            ));
        }

        sql.push_str("CREATE type::thing('order', $order_key) CONTENT $order;\n");
        sql.push_str("COMMIT TRANSACTION;");

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("customer", plan.customer))
            .bind(("converted_points", plan.converted_points))
            .bind(("point_award", plan.point_award))
            .bind(("voucher_ids", plan.voucher_ids))
            .bind(("order_key", plan.order_key.clone()))
            .bind(("order", plan.order));
        for (index, (item, quantity)) in plan.stock_decrements.into_iter().enumerate() {
            query = query
                .bind((format!("item_{index}"), item))
                .bind((format!("qty_{index}"), quantity));
        }

        let mut response = query.await?;
        let errors = response.take_errors();
        if !errors.is_empty() {
            let joined = errors
                .values()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            // A cancelled transaction (our THROW or an engine-level write
            // conflict) is retryable; everything else is a storage fault.
            let lowered = joined.to_lowercase();
            if lowered.contains(CONFLICT_MARKER) || lowered.contains("conflict") {
                return Err(RepoError::Conflict(joined));
            }
            return Err(RepoError::Database(joined));
        }

        let order_id = surrealdb::RecordId::from_table_key(ORDER_TABLE, plan.order_key);
        let order: Option<Order> = self.base.db().select(order_id).await?;
        order.ok_or_else(|| RepoError::Database("settled order not readable after commit".into()))
    }

    /// Flip the fulfillment flag on an available order.
    pub async fn fulfill(&self, id: &str) -> RepoResult<Order> {
        let record_id = parse_record_id(ORDER_TABLE, id)?;
        let updated: Vec<Order> = self
            .base
            .db()
            .query("UPDATE $id SET is_fulfilled = true WHERE is_available = true RETURN AFTER")
            .bind(("id", record_id))
            .await?
            .take(0)?;

        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {id}")))
    }

    pub async fn soft_delete(&self, id: &str) -> RepoResult<()> {
        let record_id = parse_record_id(ORDER_TABLE, id)?;
        let updated: Vec<Order> = self
            .base
            .db()
            .query("UPDATE $id SET is_available = false WHERE is_available = true RETURN AFTER")
            .bind(("id", record_id))
            .await?
            .take(0)?;

        if updated.is_empty() {
            return Err(RepoError::NotFound(format!("Order {id}")));
        }
        Ok(())
    }
}
