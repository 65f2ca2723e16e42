use chrono::Utc;
use sheetmark_core::backup::archive::{pack_entries, unpack_entries};
use sheetmark_core::{
    BackupError, BackupService, DocumentStore, FsDocumentStore, ImportStatus, MemoryDocumentStore,
    ProfileService, Resource,
};

const METADATA: &str = r#"{"exportDate":"2024-03-01T10:00:00.000Z","version":"1.0.0","appName":"DSA Practice Tracker","description":"x"}"#;

fn seeded_store(dir: &std::path::Path) -> FsDocumentStore {
    let store = FsDocumentStore::new(dir);
    store
        .save(
            Resource::Profile,
            r#"{"name":"Ada","aim":"","targetDate":"","goals":{"dailyProblems":3,"weeklyGoal":20,"focusAreas":[]},"createdAt":"2024-01-01T00:00:00.000Z","isOnboarded":true}"#,
        )
        .unwrap();
    store
        .save(Resource::Progress, "{\n  \"result\": {\n    \"p1\": 1\n  }\n}")
        .unwrap();
    store
        .save(Resource::Notes, r#"{"result":{"p1":"use a stack"}}"#)
        .unwrap();
    store
        .save(Resource::Revision, r#"{"result":{}}"#)
        .unwrap();
    store
}

#[test]
fn export_then_import_restores_identical_bytes() {
    let source_dir = tempfile::tempdir().unwrap();
    let source = seeded_store(source_dir.path());
    let archive = BackupService::new(&source).export(Utc::now()).unwrap();

    let target_dir = tempfile::tempdir().unwrap();
    let target = FsDocumentStore::new(target_dir.path());
    let report = BackupService::new(&target)
        .import(&archive.bytes, Utc::now())
        .unwrap();

    assert_eq!(report.backup_date, archive.metadata.export_date);
    for resource in Resource::ALL {
        assert_eq!(report.status_of(resource), Some(ImportStatus::Imported));
        assert_eq!(
            std::fs::read(target.path_of(resource)).unwrap(),
            std::fs::read(source.path_of(resource)).unwrap(),
            "{resource} differs"
        );
    }
}

#[test]
fn archive_without_metadata_is_rejected_before_writes() {
    let store = MemoryDocumentStore::new();
    let bytes = pack_entries([("progress.json", r#"{"result":{"p":1}}"#)]).unwrap();

    let err = BackupService::new(&store)
        .import(&bytes, Utc::now())
        .unwrap_err();

    assert!(matches!(err, BackupError::MissingMetadata));
    assert_eq!(store.write_count(), 0);
}

#[test]
fn foreign_archive_is_rejected_before_writes() {
    let store = MemoryDocumentStore::new();
    let bytes = pack_entries([
        ("metadata.json", r#"{"appName":"Other App"}"#),
        ("progress.json", r#"{"result":{"p":1}}"#),
    ])
    .unwrap();

    let err = BackupService::new(&store)
        .import(&bytes, Utc::now())
        .unwrap_err();

    assert!(matches!(err, BackupError::ForeignArchive { .. }));
    assert!(err.is_validation());
    assert_eq!(store.write_count(), 0);
}

#[test]
fn garbage_upload_is_not_an_archive() {
    let store = MemoryDocumentStore::new();
    let err = BackupService::new(&store)
        .import(b"definitely not a zip", Utc::now())
        .unwrap_err();
    assert!(matches!(err, BackupError::InvalidArchive(_)));
}

#[test]
fn partial_import_reports_each_resource() {
    let store = MemoryDocumentStore::new().with_document(Resource::Notes, "old notes");
    let bytes = pack_entries([
        ("metadata.json", METADATA),
        ("profile.json", r#"{"name":"Ada"}"#),
        ("progress.json", r#"{"result":{"a":1}}"#),
        ("notes.json", "{ broken"),
        ("revision.json", r#"{"result":{}}"#),
    ])
    .unwrap();

    let report = BackupService::new(&store)
        .import(&bytes, Utc::now())
        .unwrap();

    assert_eq!(report.status_of(Resource::Notes), Some(ImportStatus::FailedInvalidJson));
    assert_eq!(report.status_of(Resource::Profile), Some(ImportStatus::Imported));
    assert_eq!(report.status_of(Resource::Progress), Some(ImportStatus::Imported));
    assert_eq!(report.status_of(Resource::Revision), Some(ImportStatus::Imported));
    assert_eq!(store.snapshot(Resource::Notes).as_deref(), Some("old notes"));
    assert_eq!(report.backup_date, "2024-03-01T10:00:00.000Z");
}

#[test]
fn imported_profile_with_null_goals_stays_usable() {
    let store = MemoryDocumentStore::new();
    let bytes = pack_entries([
        ("metadata.json", METADATA),
        (
            "profile.json",
            r#"{"name":"Ada","goals":{"dailyProblems":null,"weeklyGoal":15,"focusAreas":[]},"createdAt":"2024-01-01T00:00:00.000Z","isOnboarded":true}"#,
        ),
    ])
    .unwrap();

    let report = BackupService::new(&store)
        .import(&bytes, Utc::now())
        .unwrap();
    assert_eq!(report.status_of(Resource::Profile), Some(ImportStatus::Imported));

    let profiles = ProfileService::new(&store);
    let profile = profiles.get().unwrap();
    assert_eq!(profile.name, "Ada");
    assert_eq!(profile.goals.daily_problems, 3);
    assert_eq!(profile.goals.weekly_goal, 15);

    let updated = profiles
        .update_from_json(serde_json::json!({"aim": "interviews"}))
        .unwrap();
    assert_eq!(updated.aim, "interviews");
    assert_eq!(updated.created_at, "2024-01-01T00:00:00.000Z");
}

#[test]
fn missing_entries_leave_documents_untouched() {
    let store = MemoryDocumentStore::new().with_document(Resource::Revision, "keep");
    let bytes = pack_entries([
        ("metadata.json", METADATA),
        ("progress.json", r#"{"result":{}}"#),
    ])
    .unwrap();

    let report = BackupService::new(&store)
        .import(&bytes, Utc::now())
        .unwrap();

    assert_eq!(
        report.status_of(Resource::Revision),
        Some(ImportStatus::NotFoundInBackup)
    );
    assert_eq!(
        report.status_of(Resource::Profile),
        Some(ImportStatus::NotFoundInBackup)
    );
    assert_eq!(store.snapshot(Resource::Revision).as_deref(), Some("keep"));
    assert_eq!(store.write_count(), 1);
}

#[test]
fn exported_archive_lists_all_entries() {
    let store = MemoryDocumentStore::new();
    let archive = BackupService::new(&store).export(Utc::now()).unwrap();
    let names: Vec<String> = unpack_entries(&archive.bytes).unwrap().into_keys().collect();
    assert_eq!(
        names,
        vec![
            "metadata.json",
            "notes.json",
            "profile.json",
            "progress.json",
            "revision.json"
        ]
    );
}
