//! Database models
//!
//! One module per SurrealDB table. Record links are stored as native
//! record ids; the API layer converts them to strings (see
//! `api::convert`).

pub mod account;
pub mod feedback;
pub mod item;
pub mod location;
pub mod order;
pub mod voucher;

pub use account::{Account, AccountId};
pub use feedback::{Feedback, FeedbackCreate, FeedbackId};
pub use item::{Category, Item, ItemCreate, ItemId, ItemUpdate};
pub use location::{Location, LocationCreate, LocationId};
pub use order::{Order, OrderId, OrderLine};
pub use voucher::{Voucher, VoucherCreate, VoucherId, VoucherKind};
