//! Checkout orchestration
//!
//! Runs the validation stages against a snapshot read of the stores,
//! derives the order figures, then hands the settlement plan to the
//! order repository for the atomic commit. Every failure before the
//! commit leaves the stores untouched; the commit itself is
//! all-or-nothing and the caller only sees the order after it lands.

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use crate::db::models::Order;
use crate::db::repository::{
    AccountRepository, ItemRepository, OrderRepository, RepoError, SettlementPlan,
    VoucherRepository,
};

use super::cart::{self, ResolvedLine};
use super::error::CheckoutError;
use super::points;
use super::vouchers::{self, ResolvedVoucher};
use super::LARGE_ORDER_THRESHOLD;

/// One cart line as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutLine {
    /// Item record id
    pub item: String,
    pub quantity: i64,
}

/// Order-creation request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    #[serde(rename = "orderItems")]
    pub order_items: Vec<CheckoutLine>,
    #[serde(rename = "convertedPoints", default)]
    pub converted_points: i64,
    #[serde(rename = "voucherApplied", default)]
    pub voucher_applied: Vec<String>,
}

#[derive(Clone)]
pub struct CheckoutEngine {
    accounts: AccountRepository,
    items: ItemRepository,
    vouchers: VoucherRepository,
    orders: OrderRepository,
}

impl CheckoutEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            items: ItemRepository::new(db.clone()),
            vouchers: VoucherRepository::new(db.clone()),
            orders: OrderRepository::new(db),
        }
    }

    /// Validate, price and settle one order for the given customer.
    pub async fn place_order(
        &self,
        customer_id: &str,
        request: CheckoutRequest,
    ) -> Result<Order, CheckoutError> {
        let account = self
            .accounts
            .find_by_id(customer_id)
            .await?
            .ok_or(CheckoutError::AccountNotFound)?;
        let customer = account
            .id
            .clone()
            .ok_or_else(|| CheckoutError::Storage(RepoError::Database("account has no record id".into())))?;

        // Snapshot reads; the settlement guards re-check everything.
        let mut resolved_lines = Vec::with_capacity(request.order_items.len());
        for line in request.order_items {
            let item = match self.items.find_by_id(&line.item).await {
                Ok(item) => item,
                // Malformed ids read as "no such item", not a storage fault
                Err(RepoError::Validation(_)) => None,
                Err(err) => return Err(err.into()),
            };
            resolved_lines.push(ResolvedLine {
                requested: line.item,
                item,
                quantity: line.quantity,
            });
        }
        let cart = cart::validate_cart(resolved_lines)?;

        let points_discount = points::validate_points(request.converted_points, account.points)?;

        let mut resolved_vouchers = Vec::with_capacity(request.voucher_applied.len());
        for code in request.voucher_applied {
            let voucher = self.vouchers.find_available_by_code(&code).await?;
            resolved_vouchers.push(ResolvedVoucher { code, voucher });
        }
        let voucher_discount =
            vouchers::validate_vouchers(resolved_vouchers, &account, cart.subtotal)?;

        let discount = points_discount + voucher_discount.discount;
        let total = (cart.subtotal - discount).max(0);
        let point_award = if cart.subtotal >= LARGE_ORDER_THRESHOLD {
            1
        } else {
            0
        };

        let mut order_items = Vec::with_capacity(cart.lines.len());
        let mut stock_decrements = Vec::with_capacity(cart.lines.len());
        for line in cart.lines {
            let item_id = line.item.id.clone().ok_or_else(|| {
                CheckoutError::Storage(RepoError::Database(format!(
                    "item {} has no record id",
                    line.item.name
                )))
            })?;
            order_items.push(crate::db::models::OrderLine {
                item: item_id.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
            });
            stock_decrements.push((item_id, line.quantity));
        }

        let order_key = Uuid::new_v4().simple().to_string();
        let order = Order {
            id: None,
            customer: customer.clone(),
            order_items,
            subtotal: cart.subtotal,
            converted_points: request.converted_points,
            voucher_applied: voucher_discount.voucher_ids.clone(),
            discount,
            total,
            is_fulfilled: false,
            is_available: true,
            created_at: chrono::Utc::now(),
        };

        let plan = SettlementPlan {
            order_key,
            order,
            customer,
            converted_points: request.converted_points,
            point_award,
            voucher_ids: voucher_discount.voucher_ids,
            stock_decrements,
        };

        let settled = self.orders.settle(plan).await?;
        tracing::info!(
            customer = customer_id,
            subtotal = settled.subtotal,
            discount = settled.discount,
            total = settled.total,
            point_award,
            "order settled"
        );
        Ok(settled)
    }
}
