use course_core::model::{ExerciseKind, StudySection, User};
use course_core::progression::{
    ExerciseScorecard, LevelCompletion, StudyChecklist, advance, complete_study_section,
};
use course_core::{LevelId, Score, UserProgress};
use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteRepository;

fn level(raw: &str) -> LevelId {
    raw.parse().unwrap()
}

#[tokio::test]
async fn sqlite_kv_roundtrip_and_overwrite() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("progress").await.unwrap(), None);
    repo.put("progress", "{\"a\":1}").await.unwrap();
    repo.put("progress", "{\"a\":2}").await.unwrap();
    assert_eq!(
        repo.get("progress").await.unwrap().as_deref(),
        Some("{\"a\":2}")
    );

    repo.remove("progress").await.unwrap();
    repo.remove("progress").await.unwrap();
    assert_eq!(repo.get("progress").await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_migrations_are_repeatable() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(applied, 1);
}

#[tokio::test]
async fn sqlite_remove_prefix_treats_wildcards_literally() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_prefix?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    for key in ["study-C1.1-completed", "study-A2.2-completed", "studyXC1.1", "user"] {
        repo.put(key, "[]").await.unwrap();
    }
    let removed = repo.remove_prefix("study-").await.unwrap();
    assert_eq!(removed, 2);
    assert!(repo.get("studyXC1.1").await.unwrap().is_some());
    assert!(repo.get("user").await.unwrap().is_some());
}

#[tokio::test]
async fn sqlite_progress_store_survives_reconnect() {
    let url = "sqlite:file:memdb_progress_store?mode=memory&cache=shared";
    let storage = Storage::sqlite(url).await.expect("storage");
    let store = storage.progress_store();

    let user = User {
        id: "user123".into(),
        name: "John Doe".into(),
        email: "john.doe@gmail.com".into(),
        avatar: String::new(),
    };
    store.save_user(&user).await.unwrap();

    let mut progress = UserProgress::new();
    let mut checklist = StudyChecklist::new(level("C1.1"));
    for section in StudySection::ALL {
        complete_study_section(&mut progress, &mut checklist, section, &StudySection::ALL);
    }
    store.save_study_checklist(&checklist).await.unwrap();

    let mut card = ExerciseScorecard::new(level("C1.1"));
    for kind in ExerciseKind::ALL {
        card.record(kind, Score::new(80).unwrap());
    }
    store.save_scorecard(&card).await.unwrap();

    advance(
        &mut progress,
        &LevelCompletion {
            level: level("C1.1"),
            average: Score::new(80).unwrap(),
        },
    );
    store.save_progress(&progress).await.unwrap();

    // a second pool on the same shared in-memory database sees the same rows
    let reopened = Storage::sqlite(url).await.expect("reopen").progress_store();
    assert_eq!(reopened.load_user().await.unwrap(), Some(user));
    assert_eq!(reopened.load_progress().await.unwrap(), Some(progress));
    assert_eq!(reopened.load_study_checklist(level("C1.1")).await.unwrap(), checklist);
    assert_eq!(reopened.load_scorecard(level("C1.1")).await.unwrap(), card);

    reopened.clear_all().await.unwrap();
    assert_eq!(store.load_progress().await.unwrap(), None);
    assert!(store.load_study_checklist(level("C1.1")).await.unwrap().is_empty());
}
