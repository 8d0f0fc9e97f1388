//! Embedded storage smoke test
//!
//! Opens the RocksDB engine in a temp directory the way the server does
//! at startup.

use chrono::Utc;
use verdura_server::db;
use verdura_server::db::models::{Category, Item};
use verdura_server::db::repository::ItemRepository;

#[tokio::test]
async fn rocksdb_engine_roundtrip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let work_dir = dir.path().to_str().unwrap();

    let conn = db::connect(work_dir).await.expect("open rocksdb");
    assert!(dir.path().join("database").exists());

    let item = Item {
        id: None,
        name: "carrot".into(),
        description: "orange".into(),
        price: 3000,
        category: Category::Vegetable,
        image: "default".into(),
        quantity: 10,
        is_available: true,
        created_at: Utc::now(),
    };
    let created: Option<Item> = conn.create("item").content(item).await.expect("create");
    let id = created.unwrap().id.unwrap().to_string();

    let repo = ItemRepository::new(conn.clone());
    let fetched = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "carrot");
    assert_eq!(fetched.quantity, 10);
}
