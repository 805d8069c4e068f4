//! Integration tests for the SQLite contact store against real files.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use contato_core::{ContactRequest, ContactStore, ListOrder};
use contato_storage::SqliteStore;
use tempfile::TempDir;

fn db_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("contatos.db").display())
}

#[tokio::test]
async fn test_creates_database_file_when_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contatos.db");
    assert!(!path.exists());

    let store = SqliteStore::connect(&db_url(&dir)).await.unwrap();
    store.close().await;

    assert!(path.exists());
}

#[tokio::test]
async fn test_append_assigns_increasing_ids() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::connect(&db_url(&dir)).await.unwrap();

    let first = store
        .append(ContactRequest::new("Ana", "ana@x.com", "11999999999"))
        .await
        .unwrap();
    let second = store
        .append(ContactRequest::new("Ana", "ana@x.com", "11999999999"))
        .await
        .unwrap();

    let (a, b) = (first.id.unwrap(), second.id.unwrap());
    assert!(b > a, "ids must increase: {a} then {b}");
    assert_eq!(first.nome, second.nome);
}

#[tokio::test]
async fn test_empresa_round_trips_including_null() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::connect(&db_url(&dir)).await.unwrap();

    store
        .append(ContactRequest::new("Ana", "ana@x.com", "1"))
        .await
        .unwrap();
    store
        .append(ContactRequest::new("Bia", "bia@y.com", "2").with_empresa("ACME"))
        .await
        .unwrap();

    let all = store.list_all(ListOrder::Ascending).await.unwrap();
    assert_eq!(all[0].empresa, None);
    assert_eq!(all[1].empresa.as_deref(), Some("ACME"));
}

#[tokio::test]
async fn test_list_orders() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::connect(&db_url(&dir)).await.unwrap();

    for i in 0..5 {
        store
            .append(ContactRequest::new(format!("n{i}"), "x@x.com", "1"))
            .await
            .unwrap();
    }

    let asc: Vec<i64> = store
        .list_all(ListOrder::Ascending)
        .await
        .unwrap()
        .iter()
        .map(|c| c.id.unwrap())
        .collect();
    let desc: Vec<i64> = store
        .list_all(ListOrder::Descending)
        .await
        .unwrap()
        .iter()
        .map(|c| c.id.unwrap())
        .collect();

    assert_eq!(asc.len(), 5);
    assert!(asc.windows(2).all(|w| w[0] < w[1]));
    assert!(desc.windows(2).all(|w| w[0] > w[1]));
    let mut reversed = desc.clone();
    reversed.reverse();
    assert_eq!(asc, reversed);
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let url = db_url(&dir);

    let store = SqliteStore::connect(&url).await.unwrap();
    store
        .append(ContactRequest::new("Ana", "ana@x.com", "1"))
        .await
        .unwrap();
    store.close().await;

    let reopened = SqliteStore::connect(&url).await.unwrap();
    let all = reopened.list_all(ListOrder::Ascending).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].nome, "Ana");
    assert_eq!(all[0].id, Some(1));
}

#[tokio::test]
async fn test_backend_metadata() {
    let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
    assert_eq!(store.backend(), "sqlite");
    assert!(store.supports_listing());
}
