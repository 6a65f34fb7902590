use std::sync::Arc;

use quiz_core::model::{AnswerRecord, Question, QuestionId, QuestionSource, ResultPayload};
use quiz_core::time::fixed_now;
use storage::repository::{BestScoreSlot, HIGH_SCORE_KEY, KeyValueStore, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_store_overwrites_values() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("missing").await.unwrap(), None);

    repo.set("greeting", "hello").await.unwrap();
    repo.set("greeting", "hi").await.unwrap();
    assert_eq!(repo.get("greeting").await.unwrap().as_deref(), Some("hi"));
    assert_eq!(repo.get("missing").await.unwrap(), None);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.set(HIGH_SCORE_KEY, "3").await.unwrap();
    repo.migrate().await.expect("second migrate");
    assert_eq!(repo.get(HIGH_SCORE_KEY).await.unwrap().as_deref(), Some("3"));
}

#[tokio::test]
async fn best_score_persists_across_connections() {
    let url = "sqlite:file:memdb_best_score?mode=memory&cache=shared";
    let first = SqliteRepository::connect(url).await.expect("connect");
    first.migrate().await.expect("migrate");
    let slot = BestScoreSlot::new(Arc::new(first.clone()));
    assert_eq!(slot.record(6).await.unwrap(), (6, true));

    let second = SqliteRepository::connect(url).await.expect("reconnect");
    let slot = BestScoreSlot::new(Arc::new(second));
    assert_eq!(slot.load().await.unwrap(), 6);
    assert_eq!(slot.record(6).await.unwrap(), (6, false));
    drop(first);
}

#[tokio::test]
async fn sqlite_storage_keeps_handoff_in_memory() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage_split?mode=memory&cache=shared")
        .await
        .expect("storage");

    let question = Question::new(
        QuestionId::new("local-1"),
        "Largest planet?",
        vec![
            "Mars".into(),
            "Jupiter".into(),
            "Venus".into(),
            "Saturn".into(),
        ],
        1,
        None,
    )
    .unwrap();
    let payload = ResultPayload::from_answers(
        &[question],
        &[Some(AnswerRecord::answered(1, 1))],
        QuestionSource::Local,
        fixed_now(),
    );

    storage.results().write(&payload).await.unwrap();
    assert_eq!(storage.results().read().await.unwrap(), Some(payload));
    assert_eq!(storage.persistent.get("results").await.unwrap(), None);
}
