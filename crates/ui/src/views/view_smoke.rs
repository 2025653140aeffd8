use course_core::model::{ExerciseKind, StudySection};
use course_core::{LevelId, Score};
use storage::repository::KeyValueStore;

use super::test_harness::{ViewHarness, ViewKind, setup_view_harness};

async fn signed_in(view: ViewKind) -> ViewHarness {
    let harness = setup_view_harness(view);
    harness.progress.sign_in().await.expect("sign in");
    harness
}

async fn study_first_level(harness: &ViewHarness) {
    for section in StudySection::ALL {
        harness
            .progress
            .complete_study_section(LevelId::FIRST, section)
            .await
            .expect("study section");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_renders_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Auth);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Sign in with Google"), "missing sign in in {html}");
    assert!(!html.contains("Continue as"), "unexpected session in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_offers_returning_learner() {
    let mut harness = signed_in(ViewKind::Auth).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Continue as John"), "missing continue in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_overview() {
    let mut harness = signed_in(ViewKind::Dashboard).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, John!"), "missing greeting in {html}");
    assert!(html.contains("0 / 12"), "missing level count in {html}");
    assert!(html.contains("C1 · Beginner"), "missing tier in {html}");
    assert!(html.contains("Continue Learning"), "missing continue in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_requires_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Please sign in"), "missing sign in prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn levels_view_smoke_renders_cards() {
    let mut harness = signed_in(ViewKind::Levels).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("German Levels"), "missing title in {html}");
    assert!(html.contains("Study Notes Available"), "missing current status in {html}");
    assert!(html.contains("Locked"), "missing locked status in {html}");
    assert!(html.contains("A2.2"), "missing last level in {html}");
    assert!(!html.contains("Study Notes Complete"), "unexpected badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn levels_view_smoke_marks_studied_level() {
    let mut harness = signed_in(ViewKind::Levels).await;
    study_first_level(&harness).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Ready for Exercises"), "missing status in {html}");
    assert!(html.contains("Study Notes Complete"), "missing badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_tabs() {
    let mut harness = signed_in(ViewKind::Study("C1.1")).await;
    harness.settle().await;
    let html = harness.render();
    for label in ["Vocabulary", "Grammar", "Culture", "Reading", "Practice"] {
        assert!(html.contains(label), "missing {label} tab in {html}");
    }
    assert!(html.contains("Mark Section as Completed"), "missing mark button in {html}");
    assert!(html.contains("0 / 5 sections completed"), "missing progress in {html}");
    assert!(!html.contains("Proceed to Exercises"), "unexpected proceed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_offers_exercises_once_studied() {
    let mut harness = signed_in(ViewKind::Study("C1.1")).await;
    study_first_level(&harness).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Proceed to Exercises"), "missing proceed in {html}");
    assert!(html.contains("5 / 5 sections completed"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_refuses_locked_level() {
    let mut harness = signed_in(ViewKind::Study("B2.1")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("This level is locked"), "missing refusal in {html}");
    assert!(!html.contains("Mark Section"), "unexpected study content in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_rejects_unknown_level() {
    let mut harness = signed_in(ViewKind::Study("Z9.9")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("That level does not exist."), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exercise_view_smoke_waits_for_study_notes() {
    let mut harness = signed_in(ViewKind::Exercise("C1.1")).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Complete all study notes"), "missing gate message in {html}");
    assert!(html.contains("Go to Study Notes"), "missing study link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exercise_view_smoke_renders_first_panel() {
    let mut harness = signed_in(ViewKind::Exercise("C1.1")).await;
    study_first_level(&harness).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Fill in Blanks"), "missing tab in {html}");
    assert!(html.contains("Cultural Quiz"), "missing tab in {html}");
    assert!(html.contains("Check Answers"), "missing submit in {html}");
    assert!(html.contains("0 / 7 completed"), "missing count in {html}");
    assert!(!html.contains("Complete Level"), "unexpected completion in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exercise_view_smoke_offers_completion_when_all_done() {
    let mut harness = signed_in(ViewKind::Exercise("C1.1")).await;
    study_first_level(&harness).await;
    for kind in ExerciseKind::ALL {
        harness
            .progress
            .complete_exercise(LevelId::FIRST, kind, Score::new(80).expect("score"))
            .await
            .expect("exercise");
    }
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("7 / 7 completed"), "missing count in {html}");
    assert!(html.contains("Average: 80%"), "missing average in {html}");
    assert!(html.contains("Complete Level"), "missing completion in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exercise_view_smoke_renders_error_state_after_sign_out() {
    let mut harness = signed_in(ViewKind::Exercise("C1.1")).await;
    harness.progress.sign_out().await.expect("sign out");
    assert_eq!(harness.storage.kv.get("user").await.expect("read"), None);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Please sign in"), "missing sign in prompt in {html}");
}
