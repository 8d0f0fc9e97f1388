//! Type conversion
//!
//! Turns database models (native record ids, typed timestamps) into the
//! camelCase wire views the clients consume.

use serde::Serialize;
use surrealdb::RecordId;

use crate::db::models as db;

// ============ Helpers ============

pub fn record_id_to_string(id: &RecordId) -> String {
    id.to_string()
}

pub fn option_record_id_to_string(id: &Option<RecordId>) -> Option<String> {
    id.as_ref().map(record_id_to_string)
}

pub fn record_ids_to_strings(ids: &[RecordId]) -> Vec<String> {
    ids.iter().map(record_id_to_string).collect()
}

// ============ Account ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: Option<String>,
    pub username: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: shared::types::Role,
    pub points: i64,
    pub voucher_used: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<db::Account> for AccountProfile {
    fn from(a: db::Account) -> Self {
        Self {
            id: option_record_id_to_string(&a.id),
            username: a.username,
            email: a.email,
            phone: a.phone,
            avatar: a.avatar,
            role: a.role,
            points: a.points,
            voucher_used: record_ids_to_strings(&a.voucher_used),
            created_at: a.created_at,
        }
    }
}

// ============ Item ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: db::Category,
    pub image: String,
    pub quantity: i64,
    pub is_available: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<db::Item> for ItemView {
    fn from(i: db::Item) -> Self {
        Self {
            id: option_record_id_to_string(&i.id),
            name: i.name,
            description: i.description,
            price: i.price,
            category: i.category,
            image: i.image,
            quantity: i.quantity,
            is_available: i.is_available,
            created_at: i.created_at,
        }
    }
}

// ============ Voucher ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherView {
    pub id: Option<String>,
    pub code: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: db::VoucherKind,
    pub value: i64,
    pub is_available: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<db::Voucher> for VoucherView {
    fn from(v: db::Voucher) -> Self {
        Self {
            id: option_record_id_to_string(&v.id),
            code: v.code,
            title: v.title,
            description: v.description,
            kind: v.kind,
            value: v.value,
            is_available: v.is_available,
            created_at: v.created_at,
        }
    }
}

// ============ Order ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineView {
    pub item: String,
    pub quantity: i64,
    pub unit_price: i64,
}

impl From<db::OrderLine> for OrderLineView {
    fn from(l: db::OrderLine) -> Self {
        Self {
            item: record_id_to_string(&l.item),
            quantity: l.quantity,
            unit_price: l.unit_price,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: Option<String>,
    pub customer: String,
    pub order_items: Vec<OrderLineView>,
    pub subtotal: i64,
    pub converted_points: i64,
    pub voucher_applied: Vec<String>,
    pub discount: i64,
    pub total: i64,
    pub is_fulfilled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<db::Order> for OrderView {
    fn from(o: db::Order) -> Self {
        Self {
            id: option_record_id_to_string(&o.id),
            customer: record_id_to_string(&o.customer),
            order_items: o.order_items.into_iter().map(Into::into).collect(),
            subtotal: o.subtotal,
            converted_points: o.converted_points,
            voucher_applied: record_ids_to_strings(&o.voucher_applied),
            discount: o.discount,
            total: o.total,
            is_fulfilled: o.is_fulfilled,
            created_at: o.created_at,
        }
    }
}

// ============ Location ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationView {
    pub id: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<db::Location> for LocationView {
    fn from(l: db::Location) -> Self {
        Self {
            id: option_record_id_to_string(&l.id),
            address: l.address,
            latitude: l.latitude,
            longitude: l.longitude,
            created_at: l.created_at,
        }
    }
}

// ============ Feedback ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    pub id: Option<String>,
    pub email: String,
    pub title: String,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<db::Feedback> for FeedbackView {
    fn from(f: db::Feedback) -> Self {
        Self {
            id: option_record_id_to_string(&f.id),
            email: f.email,
            title: f.title,
            description: f.description,
            created_at: f.created_at,
        }
    }
}
