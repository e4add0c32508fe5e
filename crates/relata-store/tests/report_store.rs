use std::sync::Arc;

use chrono::NaiveDate;
use object_store::memory::InMemory;
use pretty_assertions::assert_eq;
use relata_core::{RenderedReport, ReportKey};
use relata_store::{ReportStore, StoreError};

fn store() -> ReportStore {
    ReportStore::new(Arc::new(InMemory::new()), "https://relatorios.example")
}

fn key(name: &str, day: u32, hour: u32) -> String {
    let at = NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .expect("valid timestamp");
    ReportKey::new(name, at).into_string()
}

#[tokio::test]
async fn put_then_get_returns_identical_html() {
    let store = store();
    let html = "<html><body><h1>Relatório - ação</h1></body></html>".to_string();
    let key = key("Folha.xlsx", 5, 10);

    let url = store
        .put(&key, &RenderedReport::new(html.clone()))
        .await
        .unwrap();

    assert_eq!(url, format!("https://relatorios.example/{key}"));
    assert_eq!(store.get(&key).await.unwrap(), html);
}

#[tokio::test]
async fn empty_bucket_lists_nothing() {
    assert_eq!(store().list().await.unwrap(), Vec::<String>::new());
}

#[tokio::test]
async fn list_is_sorted_descending() {
    let store = store();
    let report = RenderedReport::new("<html></html>".into());
    let keys = [
        key("a.csv", 9, 23),
        key("a.csv", 10, 0),
        key("b.csv", 1, 0),
    ];
    for key in &keys {
        store.put(key, &report).await.unwrap();
    }

    let listed = store.list().await.unwrap();
    assert_eq!(
        listed,
        vec![
            "b_2024-01-01_00-00-00.html",
            "a_2024-01-10_00-00-00.html",
            "a_2024-01-09_23-00-00.html",
        ]
    );
}

#[tokio::test]
async fn put_overwrites_existing_key() {
    let store = store();
    store
        .put("same.html", &RenderedReport::new("first".into()))
        .await
        .unwrap();
    store
        .put("same.html", &RenderedReport::new("second".into()))
        .await
        .unwrap();

    assert_eq!(store.get("same.html").await.unwrap(), "second");
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn missing_key_is_not_found() {
    let err = store().get("nope.html").await.unwrap_err();
    match err {
        StoreError::NotFound { key } => assert_eq!(key, "nope.html"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn listed_keys_fetch_back_for_accented_and_reserved_names() {
    for name in ["Relatório Mensal.csv", "Q1 #2.csv", "Folha [v2].xlsx"] {
        let store = store();
        let key = key(name, 5, 10);
        let html = format!("<html><body>{name} ação</body></html>");
        store
            .put(&key, &RenderedReport::new(html.clone()))
            .await
            .unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![key.clone()]);
        assert_eq!(store.get(&listed[0]).await.unwrap(), html);
        assert!(store.url(&listed[0]).ends_with(&key));
    }
}

#[tokio::test]
async fn accented_keys_sort_with_the_rest() {
    let store = store();
    let report = RenderedReport::new("<html></html>".into());
    for name in ["Relatório Mensal.csv", "Q1 #2.csv", "Folha [v2].xlsx"] {
        store.put(&key(name, 5, 10), &report).await.unwrap();
    }

    assert_eq!(
        store.list().await.unwrap(),
        vec![
            "relatório_mensal_2024-01-05_10-00-00.html",
            "q1_#2_2024-01-05_10-00-00.html",
            "folha_[v2]_2024-01-05_10-00-00.html",
        ]
    );
}
