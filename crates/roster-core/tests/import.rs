//! End-to-end import runs against the in-memory directory.

use std::sync::Arc;

use roster_core::{
    CancelFlag, DirectorySnapshot, ImportError, ImportEvent, ImportOptions, ImportStatus,
    MemoryDirectory, MutationKind, NoopObserver, RosterImporter, detect_columns, normalize,
};
use roster_ingest::TableFormat;
use roster_model::{NormalizedRow, ProgressState, Unit, UnitPair};

fn roster() -> Vec<NormalizedRow> {
    vec![
        NormalizedRow::new(None, "HQ", "Staff", "Sidorov"),
        NormalizedRow::new(Some("HQ"), "Ops", "Alpha", "Ivanov"),
        NormalizedRow::new(Some("HQ"), "Ops", "Alpha", "Petrov"),
        NormalizedRow::new(Some("Ghost"), "Lost", "Bravo", "Ivanov"),
    ]
}

#[tokio::test]
async fn execute_logs_every_step() {
    let importer = RosterImporter::new(MemoryDirectory::new());
    let mut progress = Vec::new();
    let mut observer = |event: &ImportEvent| {
        if let ImportEvent::Progress(state) = event {
            progress.push(*state);
        }
    };
    let report = importer
        .execute(&roster(), &mut observer, &CancelFlag::new())
        .await
        .expect("import");

    assert_eq!(report.status, ImportStatus::Completed);
    assert_eq!(report.progress, ProgressState { done: 9, total: 9 });
    assert_eq!(report.unresolved_units, vec![UnitPair::new(Some("Ghost"), "Lost")]);
    assert_eq!(report.counts.units_created, 2);
    assert_eq!(report.counts.people_created, 3);
    assert_eq!(report.counts.teams_created, 2);
    assert_eq!(report.counts.groups_skipped, 1);
    insta::assert_snapshot!(report.log.render(), @r#"
    created unit "HQ" (id 1)
    created unit "Ops" under "HQ" (id 2)
    warning: unit "Lost" was not created: parent "Ghost" not found
    created person "Sidorov" (id 3)
    created person "Ivanov" (id 4)
    created person "Petrov" (id 5)
    created team "Staff" in "HQ" (id 6, members: 1)
    created team "Alpha" in "Ops" (id 7, members: 2)
    warning: skipped team "Bravo": unit "Lost" not found
    "#);

    assert_eq!(progress.first(), Some(&ProgressState::new(9)));
    assert!(progress.windows(2).all(|pair| pair[0].done <= pair[1].done));

    let snapshot = importer.directory().snapshot();
    let alpha = snapshot
        .teams
        .iter()
        .find(|team| team.name == "Alpha")
        .expect("alpha team");
    assert_eq!(alpha.unit_id, Some(2));
    assert_eq!(alpha.member_ids, vec![4, 5]);
}

#[tokio::test]
async fn second_run_creates_nothing() {
    let directory = Arc::new(MemoryDirectory::new());
    let importer = RosterImporter::new(Arc::clone(&directory));
    importer
        .execute(&roster(), &mut NoopObserver, &CancelFlag::new())
        .await
        .expect("first run");
    let after_first = directory.snapshot();
    let mutations = directory.mutation_count();

    let report = importer
        .execute(&roster(), &mut NoopObserver, &CancelFlag::new())
        .await
        .expect("second run");

    assert_eq!(directory.snapshot(), after_first);
    assert_eq!(directory.mutation_count(), mutations);
    assert_eq!(report.counts.mutations(), 0);
    assert_eq!(report.counts.people_existing, 3);
    assert_eq!(report.counts.teams_unchanged, 2);
    assert!(report.progress.is_complete());
    let preview = importer.dry_run(&roster()).await.expect("dry run");
    assert_eq!(preview.units_to_create, vec![UnitPair::new(Some("Ghost"), "Lost")]);
}

#[tokio::test]
async fn dry_run_is_pure_and_repeatable() {
    let directory = Arc::new(MemoryDirectory::new());
    let importer = RosterImporter::new(Arc::clone(&directory));

    let first = importer.dry_run(&roster()).await.expect("dry run");
    let second = importer.dry_run(&roster()).await.expect("dry run");

    assert_eq!(first, second);
    assert_eq!(directory.mutation_count(), 0);
    assert_eq!(first.units_to_create.len(), 3);
    assert_eq!(first.teams_to_create.len(), 3);
    assert_eq!(first.people_to_create.len(), 3);
}

#[tokio::test]
async fn removed_member_leaves_team_on_reimport() {
    let directory = Arc::new(MemoryDirectory::new());
    let importer = RosterImporter::new(Arc::clone(&directory));
    importer
        .execute(&roster(), &mut NoopObserver, &CancelFlag::new())
        .await
        .expect("first run");

    let trimmed: Vec<NormalizedRow> = roster()
        .into_iter()
        .filter(|row| row.full_name != "Petrov")
        .collect();
    let report = importer
        .execute(&trimmed, &mut NoopObserver, &CancelFlag::new())
        .await
        .expect("second run");

    assert_eq!(report.counts.teams_replaced, 1);
    let snapshot = directory.snapshot();
    let alpha = snapshot
        .teams
        .iter()
        .find(|team| team.name == "Alpha")
        .expect("alpha team");
    assert_eq!(alpha.member_ids, vec![4]);
    assert_eq!(snapshot.people.len(), 3);
}

#[tokio::test]
async fn failed_mutation_keeps_partial_report() {
    let importer = RosterImporter::new(MemoryDirectory::new().fail_after(2));
    let failure = importer
        .execute(&roster(), &mut NoopObserver, &CancelFlag::new())
        .await
        .expect_err("third mutation fails");

    assert!(matches!(
        &failure.error,
        ImportError::RemoteMutation { operation: MutationKind::CreatePerson, subject, .. }
            if subject == "Sidorov"
    ));
    assert_eq!(failure.report.status, ImportStatus::Failed);
    assert_eq!(failure.report.counts.units_created, 2);
    assert_eq!(failure.report.log.len(), 3);
    assert_eq!(failure.report.progress.done, 3);
    assert_eq!(failure.to_string(), "import aborted");
    let cause = std::error::Error::source(&failure).map(ToString::to_string);
    assert_eq!(cause, Some(failure.error.to_string()));
    assert!(!failure.to_string().contains("Sidorov"));

    // Re-running on the partially imported directory finishes the job.
    let resumed = RosterImporter::new(MemoryDirectory::from_snapshot(
        importer.directory().snapshot(),
    ));
    let report = resumed
        .execute(&roster(), &mut NoopObserver, &CancelFlag::new())
        .await
        .expect("resumed run");
    assert_eq!(report.counts.units_created, 0);
    assert_eq!(report.counts.people_created, 3);
    assert_eq!(resumed.directory().snapshot().units.len(), 2);
}

#[tokio::test]
async fn cancel_stops_before_next_mutation() {
    let importer = RosterImporter::new(MemoryDirectory::new());
    let cancel = CancelFlag::new();
    let trigger = cancel.clone();
    let mut observer = move |event: &ImportEvent| {
        if matches!(event, ImportEvent::Log(_)) {
            trigger.cancel();
        }
    };
    let report = importer
        .execute(&roster(), &mut observer, &cancel)
        .await
        .expect("canceled runs are not failures");

    assert_eq!(report.status, ImportStatus::Canceled);
    assert_eq!(report.log.len(), 1);
    assert_eq!(importer.directory().snapshot().units.len(), 1);
    assert_eq!(importer.directory().mutation_count(), 1);
}

#[tokio::test]
async fn registry_failure_is_reported() {
    struct Offline;

    #[async_trait::async_trait]
    impl roster_core::Directory for Offline {
        async fn list_units(&self) -> roster_model::DirectoryResult<Vec<roster_model::Unit>> {
            Err(roster_model::DirectoryError::Transport("connection refused".into()))
        }
        async fn list_teams(&self) -> roster_model::DirectoryResult<Vec<roster_model::Team>> {
            Ok(Vec::new())
        }
        async fn list_people(&self) -> roster_model::DirectoryResult<Vec<roster_model::Person>> {
            Ok(Vec::new())
        }
        async fn create_unit(
            &self,
            _unit: &roster_model::NewUnit,
        ) -> roster_model::DirectoryResult<roster_model::Unit> {
            unreachable!("offline directory is never mutated")
        }
        async fn create_person(
            &self,
            _person: &roster_model::NewPerson,
        ) -> roster_model::DirectoryResult<roster_model::Person> {
            unreachable!("offline directory is never mutated")
        }
        async fn create_team(
            &self,
            _team: &roster_model::NewTeam,
        ) -> roster_model::DirectoryResult<roster_model::Team> {
            unreachable!("offline directory is never mutated")
        }
        async fn replace_team_members(
            &self,
            _team_id: i64,
            _member_ids: &[i64],
        ) -> roster_model::DirectoryResult<roster_model::Team> {
            unreachable!("offline directory is never mutated")
        }
    }

    let importer = RosterImporter::new(Offline);
    let err = importer.dry_run(&roster()).await.expect_err("read fails");
    assert!(matches!(err, ImportError::RegistryFetch { .. }));

    let failure = importer
        .execute(&roster(), &mut NoopObserver, &CancelFlag::new())
        .await
        .expect_err("read fails");
    assert!(failure.report.log.is_empty());
}

#[tokio::test]
async fn csv_to_directory() {
    let csv = "Список личного состава;;;\n\
               Подразделение;Группа;ФИО;Телефон\n\
               Штаб;Первая;Иванов И.И.;+7 900 111\n\
               ;;Петров П.П.;\n\
               ;Вторая;Сидоров С.С.;\n";
    let detection = detect_columns(csv.as_bytes(), TableFormat::Csv).expect("columns");
    assert_eq!(detection.table.header_index, 1);
    assert!(detection.guessed.is_complete());

    let rows = normalize(&detection.table.raw_rows(), &detection.guessed);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].unit, "Штаб");
    assert_eq!(rows[2].team, "Вторая");

    let importer = RosterImporter::new(MemoryDirectory::from_snapshot(DirectorySnapshot::default()));
    let report = importer
        .execute(&rows, &mut NoopObserver, &CancelFlag::new())
        .await
        .expect("import");
    assert_eq!(report.counts.units_created, 1);
    assert_eq!(report.counts.teams_created, 2);
    let people = importer.directory().snapshot().people;
    assert_eq!(people[0].phone.as_deref(), Some("+7 900 111"));
}

fn top_unit(id: i64, name: &str) -> Unit {
    Unit {
        id,
        name: name.into(),
        parent_id: None,
        description: None,
    }
}

#[tokio::test]
async fn same_unit_name_under_two_parents_gets_separate_teams() {
    let directory = MemoryDirectory::from_snapshot(DirectorySnapshot {
        units: vec![top_unit(1, "HQ"), top_unit(2, "North")],
        ..DirectorySnapshot::default()
    });
    let importer = RosterImporter::new(directory);
    let rows = vec![
        NormalizedRow::new(Some("HQ"), "Ops", "Alpha", "Ivanov"),
        NormalizedRow::new(Some("North"), "Ops", "Alpha", "Petrov"),
    ];

    let preview = importer.dry_run(&rows).await.expect("dry run");
    assert_eq!(preview.teams_to_create.len(), 2);

    let report = importer
        .execute(&rows, &mut NoopObserver, &CancelFlag::new())
        .await
        .expect("import");
    assert_eq!(report.counts.units_created, 2);
    assert_eq!(report.counts.teams_created, 2);
    assert!(report.progress.is_complete());

    let snapshot = importer.directory().snapshot();
    let ops_under = |parent: i64| {
        snapshot
            .units
            .iter()
            .find(|unit| unit.name == "Ops" && unit.parent_id == Some(parent))
            .map(|unit| unit.id)
            .expect("ops unit")
    };
    let members_of = |unit_id: i64| {
        snapshot
            .teams
            .iter()
            .find(|team| team.unit_id == Some(unit_id))
            .map(|team| team.member_ids.clone())
            .expect("alpha team")
    };
    let person_id = |name: &str| {
        snapshot
            .people
            .iter()
            .find(|person| person.full_name == name)
            .map(|person| person.id)
            .expect("person")
    };
    assert_eq!(members_of(ops_under(1)), vec![person_id("Ivanov")]);
    assert_eq!(members_of(ops_under(2)), vec![person_id("Petrov")]);

    let again = importer
        .execute(&rows, &mut NoopObserver, &CancelFlag::new())
        .await
        .expect("second run");
    assert_eq!(again.counts.mutations(), 0);
    assert_eq!(again.counts.teams_unchanged, 2);
}

#[tokio::test]
async fn pass_limit_leaves_units_unresolved_but_progress_completes() {
    let options = ImportOptions {
        max_unit_passes: 1,
        unit_description: Some("imported".into()),
    };
    let importer = RosterImporter::new(MemoryDirectory::new()).with_options(options);
    let rows = vec![
        NormalizedRow::new(Some("HQ"), "Ops", "Alpha", "Ivanov"),
        NormalizedRow::new(None, "HQ", "Staff", "Sidorov"),
    ];

    let report = importer
        .execute(&rows, &mut NoopObserver, &CancelFlag::new())
        .await
        .expect("import");

    assert_eq!(report.status, ImportStatus::Completed);
    assert_eq!(report.unresolved_units, vec![UnitPair::new(Some("HQ"), "Ops")]);
    assert_eq!(report.counts.units_created, 1);
    assert_eq!(report.counts.units_unresolved, 1);
    assert_eq!(report.counts.groups_skipped, 1);
    assert_eq!(report.progress, ProgressState { done: 6, total: 6 });
    assert!(
        report
            .log
            .render()
            .contains("unit \"Ops\" was not created: pass limit reached")
    );

    let units = importer.directory().snapshot().units;
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].description.as_deref(), Some("imported"));
}
