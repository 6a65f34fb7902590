use std::sync::Arc;

use quiz_core::model::{AnswerRecord, QuestionSource, ResultPayload, SkipReason};
use quiz_core::time::fixed_now;
use services::{LOAD_FAILED_MESSAGE, LocalProvider};
use storage::repository::Storage;

use super::test_harness::{UnreachableRemote, setup_view_harness, setup_view_harness_with};
use crate::app::Screen;

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_local_question() {
    let mut harness = setup_view_harness(Screen::Quiz, QuestionSource::Local);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Which planet is known as the Red Planet?"), "missing question in {html}");
    assert!(html.contains("Question 1 / 10"), "missing position in {html}");
    assert!(html.contains("⏱ 30s"), "missing timer in {html}");
    assert!(html.contains("Lock Answer"), "missing lock button in {html}");
    assert!(html.contains("🏆 High Score: 0"), "missing high score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_load_failure() {
    let mut harness = setup_view_harness(Screen::Quiz, QuestionSource::Remote);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains(LOAD_FAILED_MESSAGE), "missing failure in {html}");
    assert!(html.contains("Use Local Questions"), "missing local fallback in {html}");
    assert!(html.contains("Retry API"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(Screen::Results, QuestionSource::Local);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("No results to show."), "missing empty state in {html}");
    assert!(html.contains("Go to Quiz"), "missing quiz link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_breakdown() {
    let storage = Storage::in_memory();
    let questions = LocalProvider::bundled().load(3).unwrap();
    let answers = vec![
        Some(AnswerRecord::answered(1, questions[0].correct_index())),
        Some(AnswerRecord::skipped(SkipReason::TimedOut, questions[1].correct_index())),
        Some(AnswerRecord::answered(0, questions[2].correct_index())),
    ];
    let payload =
        ResultPayload::from_answers(&questions, &answers, QuestionSource::Local, fixed_now());
    storage.results().write(&payload).await.unwrap();
    storage.best_score().record(4).await.unwrap();

    let mut harness = setup_view_harness_with(
        Screen::Results,
        QuestionSource::Local,
        storage,
        Arc::new(UnreachableRemote),
    );
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("You scored 1/3"), "missing score in {html}");
    assert!(html.contains("Source: Local JSON"), "missing source in {html}");
    assert!(html.contains("🏆 High Score: 4"), "missing high score in {html}");
    assert!(html.contains("Time ran out"), "missing timeout note in {html}");
    assert!(html.contains("<em>Mona Lisa</em>"), "missing formatted prompt in {html}");
    assert!(html.contains("Restart Quiz"), "missing restart in {html}");
}
