//! Full pipeline runs against the in-memory store.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};

use taskseed_core::{EntityKind, MemoryStore, Record, SeedStore, SimConfig, StoreError};
use taskseed_generate::engine::RunOutcome;
use taskseed_generate::{GenerateOptions, GenerationError, NoFlavor, SeedEngine};

fn reference_time() -> chrono::DateTime<chrono::Utc> {
    Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap()
}

fn run_with_seed(seed: u64) -> (RunOutcome, MemoryStore) {
    let mut config = SimConfig::default();
    config.random_seed = seed;
    let options = GenerateOptions {
        reference_time: Some(reference_time()),
    };
    let mut store = MemoryStore::new();
    let outcome = SeedEngine::new(config, options)
        .run(&mut store, &NoFlavor)
        .expect("run succeeds");
    (outcome, store)
}

#[test]
fn default_run_is_audit_clean_with_expected_counts() {
    let (outcome, store) = run_with_seed(42);

    assert!(
        outcome.report.violations.is_empty(),
        "violations: {:?}",
        outcome.report.violations
    );

    let data = &outcome.data;
    assert_eq!(data.organizations.len(), 1);
    assert_eq!(data.teams.len(), 5);
    assert_eq!(data.users.len(), 50);
    assert_eq!(data.projects.len(), 10);
    assert_eq!(data.tasks.len(), 400);
    assert!(!data.sections.is_empty());
    assert!(!data.tags.is_empty());

    // The store's committed counts are the report's counts.
    for kind in EntityKind::ALL {
        assert_eq!(
            outcome.report.counts.get(kind.table_name()).copied(),
            Some(store.count(kind)),
            "count mismatch for {kind}"
        );
    }
    assert_eq!(store.count(EntityKind::Tasks), 400);
}

#[test]
fn projects_cycle_evenly_through_categories() {
    let (outcome, _) = run_with_seed(42);
    let mut per_category: HashMap<&str, u32> = HashMap::new();
    for project in &outcome.data.projects {
        *per_category.entry(project.project_type.as_str()).or_default() += 1;
    }
    // 10 projects over 5 categories: exactly two each.
    assert_eq!(per_category.len(), 5);
    assert!(per_category.values().all(|&count| count == 2));
}

#[test]
fn completion_rates_track_category_targets() {
    let config = SimConfig::default();
    let targets: HashMap<String, f64> = config
        .categories
        .iter()
        .map(|category| (category.key.clone(), category.completion_rate))
        .collect();

    let mut completed: HashMap<String, u32> = HashMap::new();
    let mut totals: HashMap<String, u32> = HashMap::new();
    for seed in [11, 12, 13, 14, 15] {
        let (outcome, _) = run_with_seed(seed);
        let category_of: HashMap<&str, &str> = outcome
            .data
            .projects
            .iter()
            .map(|p| (p.project_id.as_str(), p.project_type.as_str()))
            .collect();
        for task in &outcome.data.tasks {
            let Some(category) = category_of.get(task.project_id.as_str()) else {
                continue;
            };
            *totals.entry(category.to_string()).or_default() += 1;
            if task.completed {
                *completed.entry(category.to_string()).or_default() += 1;
            }
        }
    }

    for (category, target) in targets {
        let total = totals.get(&category).copied().unwrap_or(0);
        assert!(total >= 300, "{category} saw only {total} tasks");
        let rate = f64::from(completed.get(&category).copied().unwrap_or(0)) / f64::from(total);
        assert!(
            (rate - target).abs() <= 0.10,
            "{category}: rate {rate:.3} vs target {target:.2}"
        );
    }
}

#[test]
fn same_seed_and_reference_time_reproduce_attributes() {
    let (first, _) = run_with_seed(7);
    let (second, _) = run_with_seed(7);

    let task_key = |outcome: &RunOutcome| -> Vec<_> {
        outcome
            .data
            .tasks
            .iter()
            .map(|task| {
                (
                    task.name.clone(),
                    task.description.clone(),
                    task.created_at,
                    task.updated_at,
                    task.due_date,
                    task.completed,
                    task.completed_at,
                    task.priority.clone(),
                    task.status.clone(),
                )
            })
            .collect()
    };
    assert_eq!(task_key(&first), task_key(&second));

    let user_key = |outcome: &RunOutcome| -> Vec<_> {
        outcome
            .data
            .users
            .iter()
            .map(|user| (user.name.clone(), user.email.clone(), user.role.clone()))
            .collect()
    };
    assert_eq!(user_key(&first), user_key(&second));

    let project_names = |outcome: &RunOutcome| -> Vec<_> {
        outcome.data.projects.iter().map(|p| p.name.clone()).collect::<Vec<_>>()
    };
    assert_eq!(project_names(&first), project_names(&second));

    assert_eq!(first.report.counts, second.report.counts);
}

#[test]
fn different_seeds_diverge() {
    let (first, _) = run_with_seed(1);
    let (second, _) = run_with_seed(2);
    let names = |outcome: &RunOutcome| -> Vec<String> {
        outcome.data.tasks.iter().map(|task| task.name.clone()).collect()
    };
    assert_ne!(names(&first), names(&second));
}

/// Delegates to a real in-memory store but fails every append of one kind.
struct FailingStore {
    inner: MemoryStore,
    fail_on: EntityKind,
}

impl SeedStore for FailingStore {
    fn begin(&mut self) -> Result<(), StoreError> {
        self.inner.begin()
    }

    fn append(&mut self, kind: EntityKind, batch: Vec<Record>) -> Result<(), StoreError> {
        if kind == self.fail_on {
            return Err(StoreError::Backend("injected failure".to_string()));
        }
        self.inner.append(kind, batch)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.inner.commit()
    }

    fn rollback(&mut self) -> Result<(), StoreError> {
        self.inner.rollback()
    }

    fn count(&self, kind: EntityKind) -> u64 {
        self.inner.count(kind)
    }
}

#[test]
fn store_failure_aborts_run_and_keeps_earlier_stages() {
    let config = SimConfig::default();
    let options = GenerateOptions {
        reference_time: Some(reference_time()),
    };
    let mut store = FailingStore {
        inner: MemoryStore::new(),
        fail_on: EntityKind::Tasks,
    };

    let err = SeedEngine::new(config, options)
        .run(&mut store, &NoFlavor)
        .expect_err("run must abort");
    match err {
        GenerationError::Store { stage, .. } => assert_eq!(stage, EntityKind::Tasks),
        other => panic!("unexpected error: {other}"),
    }

    // Parent stages committed before the failure survive; the failed stage
    // and everything after it were never written.
    assert_eq!(store.count(EntityKind::Projects), 10);
    assert!(store.count(EntityKind::Sections) > 0);
    assert_eq!(store.count(EntityKind::Tasks), 0);
    assert_eq!(store.count(EntityKind::Comments), 0);

    // The rollback left the store usable.
    store.begin().expect("store accepts a new transaction");
}
