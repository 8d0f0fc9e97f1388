//! Checkout settlement integration tests
//!
//! Run against the in-memory SurrealDB engine. Each test seeds its own
//! records, so every test gets a fresh database.

use chrono::Utc;
use shared::types::Role;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use verdura_server::checkout::{CheckoutEngine, CheckoutError, CheckoutLine, CheckoutRequest};
use verdura_server::db;
use verdura_server::db::models::{Account, Category, Item, Voucher, VoucherKind};
use verdura_server::db::repository::{AccountRepository, ItemRepository};

async fn fresh_db() -> Surreal<Db> {
    db::connect_memory().await.expect("in-memory db")
}

async fn seed_account(db: &Surreal<Db>, username: &str, points: i64) -> String {
    let account = Account {
        id: None,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        phone: "000".into(),
        hash_pass: "unused".into(),
        avatar: None,
        role: Role::Customer,
        points,
        voucher_used: vec![],
        created_at: Utc::now(),
    };
    let created: Option<Account> = db
        .create("account")
        .content(account)
        .await
        .expect("create account");
    created.unwrap().id.unwrap().to_string()
}

async fn seed_item(db: &Surreal<Db>, name: &str, price: i64, quantity: i64) -> String {
    let item = Item {
        id: None,
        name: name.to_string(),
        description: "test item".into(),
        price,
        category: Category::Vegetable,
        image: "default".into(),
        quantity,
        is_available: true,
        created_at: Utc::now(),
    };
    let created: Option<Item> = db.create("item").content(item).await.expect("create item");
    created.unwrap().id.unwrap().to_string()
}

async fn seed_voucher(db: &Surreal<Db>, code: &str, kind: VoucherKind, value: i64) -> String {
    let voucher = Voucher {
        id: None,
        code: code.to_string(),
        title: format!("{code} voucher"),
        description: String::new(),
        kind,
        value,
        is_available: true,
        created_at: Utc::now(),
    };
    let created: Option<Voucher> = db
        .create("voucher")
        .content(voucher)
        .await
        .expect("create voucher");
    created.unwrap().id.unwrap().to_string()
}

fn request(lines: Vec<(&str, i64)>, converted_points: i64, vouchers: Vec<&str>) -> CheckoutRequest {
    CheckoutRequest {
        order_items: lines
            .into_iter()
            .map(|(item, quantity)| CheckoutLine {
                item: item.to_string(),
                quantity,
            })
            .collect(),
        converted_points,
        voucher_applied: vouchers.into_iter().map(String::from).collect(),
    }
}

async fn account_points(db: &Surreal<Db>, id: &str) -> i64 {
    AccountRepository::new(db.clone())
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .points
}

async fn item_stock(db: &Surreal<Db>, id: &str) -> i64 {
    ItemRepository::new(db.clone())
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .quantity
}

#[tokio::test]
async fn basic_settlement_below_award_threshold() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 0).await;
    let item = seed_item(&db, "carrot", 50_000, 5).await;

    let engine = CheckoutEngine::new(db.clone());
    let order = engine
        .place_order(&customer, request(vec![(&item, 1)], 0, vec![]))
        .await
        .unwrap();

    assert_eq!(order.subtotal, 50_000);
    assert_eq!(order.discount, 0);
    assert_eq!(order.total, 50_000);
    assert!(!order.is_fulfilled);

    // Below 100000: no loyalty award
    assert_eq!(account_points(&db, &customer).await, 0);
    assert_eq!(item_stock(&db, &item).await, 4);
}

#[tokio::test]
async fn large_order_awards_one_point() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 0).await;
    let item = seed_item(&db, "truffle", 150_000, 2).await;

    let engine = CheckoutEngine::new(db.clone());
    let order = engine
        .place_order(&customer, request(vec![(&item, 1)], 0, vec![]))
        .await
        .unwrap();

    assert_eq!(order.subtotal, 150_000);
    assert_eq!(account_points(&db, &customer).await, 1);
}

#[tokio::test]
async fn converted_points_discount_and_debit() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 3).await;
    let item = seed_item(&db, "carrot", 50_000, 5).await;

    let engine = CheckoutEngine::new(db.clone());
    let order = engine
        .place_order(&customer, request(vec![(&item, 1)], 3, vec![]))
        .await
        .unwrap();

    // 3 points at 500 per point
    assert_eq!(order.discount, 1_500);
    assert_eq!(order.total, 48_500);
    assert_eq!(order.converted_points, 3);
    assert_eq!(account_points(&db, &customer).await, 0);
}

#[tokio::test]
async fn insufficient_points_leaves_everything_untouched() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 3).await;
    let item = seed_item(&db, "carrot", 50_000, 5).await;

    let engine = CheckoutEngine::new(db.clone());
    let err = engine
        .place_order(&customer, request(vec![(&item, 1)], 5, vec![]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::InsufficientPoints {
            requested: 5,
            balance: 3,
        }
    ));
    assert_eq!(account_points(&db, &customer).await, 3);
    assert_eq!(item_stock(&db, &item).await, 5);
}

#[tokio::test]
async fn percentage_voucher_then_reuse_rejected() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 0).await;
    let item = seed_item(&db, "hamper", 100_000, 5).await;
    seed_voucher(&db, "TEN", VoucherKind::Percentage, 10).await;

    let engine = CheckoutEngine::new(db.clone());
    let order = engine
        .place_order(&customer, request(vec![(&item, 1)], 0, vec!["TEN"]))
        .await
        .unwrap();

    assert_eq!(order.discount, 10_000);
    assert_eq!(order.total, 90_000);
    // 100000 subtotal also earns the loyalty point
    assert_eq!(account_points(&db, &customer).await, 1);

    // Same voucher on a second order for the same account
    let err = engine
        .place_order(&customer, request(vec![(&item, 1)], 0, vec!["TEN"]))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::VoucherAlreadyUsed(code) if code == "TEN"));
    assert_eq!(item_stock(&db, &item).await, 4);
}

#[tokio::test]
async fn points_voucher_discount() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 0).await;
    let item = seed_item(&db, "carrot", 50_000, 5).await;
    seed_voucher(&db, "SAVE3", VoucherKind::Points, 3).await;

    let engine = CheckoutEngine::new(db.clone());
    let order = engine
        .place_order(&customer, request(vec![(&item, 1)], 0, vec!["SAVE3"]))
        .await
        .unwrap();

    assert_eq!(order.discount, 1_500);
    assert_eq!(order.total, 48_500);
}

#[tokio::test]
async fn total_floors_at_zero() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 0).await;
    let item = seed_item(&db, "gum", 500, 5).await;
    seed_voucher(&db, "BIG", VoucherKind::Points, 10).await;

    let engine = CheckoutEngine::new(db.clone());
    let order = engine
        .place_order(&customer, request(vec![(&item, 1)], 0, vec!["BIG"]))
        .await
        .unwrap();

    assert_eq!(order.subtotal, 500);
    assert_eq!(order.discount, 5_000);
    assert_eq!(order.total, 0);
}

#[tokio::test]
async fn duplicate_voucher_codes_in_one_request_rejected() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 0).await;
    let item = seed_item(&db, "carrot", 50_000, 5).await;
    seed_voucher(&db, "TEN", VoucherKind::Percentage, 10).await;

    let engine = CheckoutEngine::new(db.clone());
    let err = engine
        .place_order(&customer, request(vec![(&item, 1)], 0, vec!["TEN", "TEN"]))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::InvalidVoucherList(code) if code == "TEN"));
    assert_eq!(item_stock(&db, &item).await, 5);
}

#[tokio::test]
async fn empty_cart_rejected() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 0).await;

    let engine = CheckoutEngine::new(db.clone());
    let err = engine
        .place_order(&customer, request(vec![], 0, vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));
}

#[tokio::test]
async fn unknown_item_rejected() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 0).await;

    let engine = CheckoutEngine::new(db.clone());
    let err = engine
        .place_order(&customer, request(vec![("item:ghost", 1)], 0, vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::ItemNotFound(_)));
}

#[tokio::test]
async fn oversell_validation_rejected() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 0).await;
    let item = seed_item(&db, "carrot", 50_000, 2).await;

    let engine = CheckoutEngine::new(db.clone());
    let err = engine
        .place_order(&customer, request(vec![(&item, 3)], 0, vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::InsufficientStock { .. }));
    assert_eq!(item_stock(&db, &item).await, 2);
}

#[tokio::test]
async fn concurrent_orders_never_oversell() {
    let db = fresh_db().await;
    let alice = seed_account(&db, "alice", 0).await;
    let bob = seed_account(&db, "bob", 0).await;
    let item = seed_item(&db, "last-melon", 20_000, 1).await;

    let engine_a = CheckoutEngine::new(db.clone());
    let engine_b = CheckoutEngine::new(db.clone());

    let (a, b) = tokio::join!(
        engine_a.place_order(&alice, request(vec![(&item, 1)], 0, vec![])),
        engine_b.place_order(&bob, request(vec![(&item, 1)], 0, vec![])),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one settlement may win the last unit");

    // The loser saw either the guard abort or the stale stock read
    for result in [a, b] {
        if let Err(err) = result {
            assert!(matches!(
                err,
                CheckoutError::SettlementConflict | CheckoutError::InsufficientStock { .. }
            ));
        }
    }

    assert_eq!(item_stock(&db, &item).await, 0);
}

#[tokio::test]
async fn concurrent_same_account_voucher_spent_once() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 0).await;
    let item = seed_item(&db, "carrot", 50_000, 10).await;
    seed_voucher(&db, "TEN", VoucherKind::Percentage, 10).await;

    let engine_a = CheckoutEngine::new(db.clone());
    let engine_b = CheckoutEngine::new(db.clone());

    let (a, b) = tokio::join!(
        engine_a.place_order(&customer, request(vec![(&item, 1)], 0, vec!["TEN"])),
        engine_b.place_order(&customer, request(vec![(&item, 1)], 0, vec!["TEN"])),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "a voucher is spendable once per account");

    for result in [a, b] {
        if let Err(err) = result {
            assert!(matches!(
                err,
                CheckoutError::SettlementConflict | CheckoutError::VoucherAlreadyUsed(_)
            ));
        }
    }
}

#[tokio::test]
async fn order_is_readable_after_settlement() {
    let db = fresh_db().await;
    let customer = seed_account(&db, "alice", 0).await;
    let item = seed_item(&db, "carrot", 3_000, 5).await;

    let engine = CheckoutEngine::new(db.clone());
    let order = engine
        .place_order(&customer, request(vec![(&item, 2)], 0, vec![]))
        .await
        .unwrap();

    let id = order.id.as_ref().unwrap().to_string();
    let fetched = verdura_server::db::repository::OrderRepository::new(db.clone())
        .find_by_id(&id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(fetched.subtotal, 6_000);
    assert_eq!(fetched.order_items.len(), 1);
    assert_eq!(fetched.order_items[0].quantity, 2);
    assert_eq!(fetched.customer.to_string(), customer);
}
