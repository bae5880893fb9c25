//! Generation pipeline.
//!
//! Stages run in dependency order, each consuming the complete output of
//! its parents and committing its batch as one storage transaction. A store
//! failure rolls the in-flight stage back and aborts the run; previously
//! committed stages stay put.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use taskseed_core::entities::{
    Comment, CustomFieldDefinition, CustomFieldValue, Organization, Project, Section, Subtask,
    Tag, Task, TaskAssignee, TaskTag, Team, TeamMembership, User,
};
use taskseed_core::{CategoryProfile, EntityKind, SeedStore, SimConfig, StoreError, to_record};

use crate::audit;
use crate::errors::GenerationError;
use crate::factories::extras;
use crate::factories::org as org_factory;
use crate::factories::project as project_factory;
use crate::factories::task as task_factory;
use crate::flavor::FlavorProvider;
use crate::report::{GenerateOptions, RunReport};
use crate::sampler::Sampler;

/// Everything a run produced, kept in memory for auditing and export.
#[derive(Debug, Default)]
pub struct GeneratedSet {
    pub organizations: Vec<Organization>,
    pub teams: Vec<Team>,
    pub users: Vec<User>,
    pub memberships: Vec<TeamMembership>,
    pub projects: Vec<Project>,
    pub sections: Vec<Section>,
    pub field_definitions: Vec<CustomFieldDefinition>,
    pub tags: Vec<Tag>,
    pub tasks: Vec<Task>,
    pub assignees: Vec<TaskAssignee>,
    pub subtasks: Vec<Subtask>,
    pub comments: Vec<Comment>,
    pub task_tags: Vec<TaskTag>,
    pub field_values: Vec<CustomFieldValue>,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: RunReport,
    pub data: GeneratedSet,
}

/// Entry point for one seeded generation run.
#[derive(Debug, Clone)]
pub struct SeedEngine {
    config: SimConfig,
    options: GenerateOptions,
}

impl SeedEngine {
    pub fn new(config: SimConfig, options: GenerateOptions) -> Self {
        Self { config, options }
    }

    pub fn run(
        &self,
        store: &mut dyn SeedStore,
        flavor: &dyn FlavorProvider,
    ) -> Result<RunOutcome, GenerationError> {
        self.config.validate()?;

        let start = Instant::now();
        let now = self.options.reference_time.unwrap_or_else(Utc::now);
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.random_seed);
        let sampler = Sampler::new(&self.config.distributions, now);
        let sizes = &self.config.dataset;
        let dist = &self.config.distributions;
        let mut set = GeneratedSet::default();

        info!(
            seed = self.config.random_seed,
            organizations = sizes.num_organizations,
            projects = sizes.num_projects,
            tasks_per_project = sizes.num_tasks_per_project,
            "generation started"
        );

        for _ in 0..sizes.num_organizations {
            set.organizations.push(org_factory::organization(now, &mut rng));
        }
        commit_stage(store, EntityKind::Organizations, &set.organizations)?;

        let mut teams = Vec::new();
        for org in &set.organizations {
            teams.extend(org_factory::teams(org, &self.config.teams, sizes.num_teams, now));
        }
        commit_stage(store, EntityKind::Teams, &teams)?;
        set.teams = teams;

        let mut users = Vec::new();
        for org in &set.organizations {
            users.extend(org_factory::users(org, sizes.num_users, now, &mut rng));
        }
        commit_stage(store, EntityKind::Users, &users)?;
        set.users = users;

        let mut memberships = Vec::new();
        for org in &set.organizations {
            let org_users: Vec<&User> = children_of(&set.users, &org.organization_id, |u| &u.organization_id);
            let org_teams: Vec<&Team> = children_of(&set.teams, &org.organization_id, |t| &t.organization_id);
            memberships.extend(org_factory::memberships(&org_users, &org_teams, now, &mut rng));
        }
        commit_stage(store, EntityKind::TeamMemberships, &memberships)?;
        set.memberships = memberships;

        let mut projects = Vec::new();
        for org in &set.organizations {
            let org_teams: Vec<&Team> = children_of(&set.teams, &org.organization_id, |t| &t.organization_id);
            projects.extend(project_factory::projects(
                org,
                &org_teams,
                &self.config.categories,
                sizes.num_projects,
                now,
                &mut rng,
            ));
        }
        commit_stage(store, EntityKind::Projects, &projects)?;
        set.projects = projects;

        let mut sections = Vec::new();
        let mut field_definitions = Vec::new();
        for project in &set.projects {
            if let Some(profile) = self.profile(&project.project_type) {
                sections.extend(project_factory::sections(project, profile));
                field_definitions.extend(project_factory::custom_field_definitions(project, profile));
            }
        }
        commit_stage(store, EntityKind::Sections, &sections)?;
        set.sections = sections;
        commit_stage(store, EntityKind::CustomFieldDefinitions, &field_definitions)?;
        set.field_definitions = field_definitions;

        let mut tags = Vec::new();
        for org in &set.organizations {
            tags.extend(extras::tags(org, &self.config.tags, now));
        }
        commit_stage(store, EntityKind::Tags, &tags)?;
        set.tags = tags;

        let mut tasks = Vec::new();
        for project in &set.projects {
            let Some(profile) = self.profile(&project.project_type) else {
                continue;
            };
            let project_sections: Vec<&Section> =
                children_of(&set.sections, &project.project_id, |s| &s.project_id);
            let org_users: Vec<&User> =
                children_of(&set.users, &project.organization_id, |u| &u.organization_id);
            tasks.extend(task_factory::tasks(
                project,
                profile,
                &project_sections,
                &org_users,
                sizes.num_tasks_per_project,
                &sampler,
                flavor,
                &mut rng,
            ));
        }
        commit_stage(store, EntityKind::Tasks, &tasks)?;
        set.tasks = tasks;

        // Lookups shared by the task-satellite stages.
        let org_by_project: HashMap<&str, &str> = set
            .projects
            .iter()
            .map(|p| (p.project_id.as_str(), p.organization_id.as_str()))
            .collect();
        let mut users_by_org: HashMap<&str, Vec<&User>> = HashMap::new();
        for user in &set.users {
            users_by_org.entry(user.organization_id.as_str()).or_default().push(user);
        }
        let mut tags_by_org: HashMap<&str, Vec<&Tag>> = HashMap::new();
        for tag in &set.tags {
            tags_by_org.entry(tag.organization_id.as_str()).or_default().push(tag);
        }
        let mut defs_by_project: HashMap<&str, Vec<&CustomFieldDefinition>> = HashMap::new();
        for definition in &set.field_definitions {
            defs_by_project.entry(definition.project_id.as_str()).or_default().push(definition);
        }
        let no_users: Vec<&User> = Vec::new();
        let no_tags: Vec<&Tag> = Vec::new();
        let no_defs: Vec<&CustomFieldDefinition> = Vec::new();
        let org_of = |task: &Task| org_by_project.get(task.project_id.as_str()).copied();

        let mut assignees = Vec::new();
        for task in &set.tasks {
            let users = org_of(task)
                .and_then(|org| users_by_org.get(org))
                .unwrap_or(&no_users);
            assignees.extend(extras::assignees(task, users, dist, &mut rng));
        }
        commit_stage(store, EntityKind::TaskAssignees, &assignees)?;
        set.assignees = assignees;

        let mut subtasks = Vec::new();
        for task in &set.tasks {
            subtasks.extend(extras::subtasks(task, dist, &mut rng));
        }
        commit_stage(store, EntityKind::Subtasks, &subtasks)?;
        set.subtasks = subtasks;

        let mut comments = Vec::new();
        for task in &set.tasks {
            let users = org_of(task)
                .and_then(|org| users_by_org.get(org))
                .unwrap_or(&no_users);
            comments.extend(extras::comments(task, users, dist, flavor, &mut rng));
        }
        commit_stage(store, EntityKind::Comments, &comments)?;
        set.comments = comments;

        let mut task_tags = Vec::new();
        for task in &set.tasks {
            let tags = org_of(task)
                .and_then(|org| tags_by_org.get(org))
                .unwrap_or(&no_tags);
            task_tags.extend(extras::task_tags(task, tags, dist, &mut rng));
        }
        commit_stage(store, EntityKind::TaskTags, &task_tags)?;
        set.task_tags = task_tags;

        let mut field_values = Vec::new();
        for task in &set.tasks {
            let definitions = defs_by_project
                .get(task.project_id.as_str())
                .unwrap_or(&no_defs);
            field_values.extend(extras::custom_field_values(task, definitions, dist, &mut rng));
        }
        commit_stage(store, EntityKind::CustomFieldValues, &field_values)?;
        set.field_values = field_values;

        let findings = audit::check(&set, now);
        for violation in &findings.violations {
            warn!(
                code = ?violation.code,
                entity = %violation.entity_id,
                "audit: {}",
                violation.message
            );
        }

        let mut counts = BTreeMap::new();
        for kind in EntityKind::ALL {
            counts.insert(kind.table_name().to_string(), store.count(kind));
        }
        let report = RunReport {
            seed: self.config.random_seed,
            duration_ms: start.elapsed().as_millis() as u64,
            counts,
            violations: findings.violations,
        };
        info!(
            duration_ms = report.duration_ms,
            tasks = report.counts.get("tasks").copied().unwrap_or(0),
            violations = report.violations.len(),
            "generation completed"
        );

        Ok(RunOutcome { report, data: set })
    }

    fn profile(&self, key: &str) -> Option<&CategoryProfile> {
        self.config.categories.iter().find(|profile| profile.key == key)
    }
}

/// Filter a slice down to the children of one parent id.
fn children_of<'a, T>(items: &'a [T], parent: &str, key: impl Fn(&T) -> &String) -> Vec<&'a T> {
    items.iter().filter(|item| key(item) == parent).collect()
}

fn commit_stage<T: Serialize>(
    store: &mut dyn SeedStore,
    stage: EntityKind,
    batch: &[T],
) -> Result<(), GenerationError> {
    let started = Instant::now();
    match write_stage(store, stage, batch) {
        Ok(()) => {
            info!(
                stage = %stage,
                records = batch.len(),
                duration_ms = started.elapsed().as_millis() as u64,
                "stage committed"
            );
            Ok(())
        }
        Err(source) => {
            if let Err(rollback_err) = store.rollback() {
                debug!(stage = %stage, error = %rollback_err, "rollback after failed stage");
            }
            warn!(stage = %stage, error = %source, "stage aborted");
            Err(GenerationError::Store { stage, source })
        }
    }
}

fn write_stage<T: Serialize>(
    store: &mut dyn SeedStore,
    stage: EntityKind,
    batch: &[T],
) -> Result<(), StoreError> {
    let mut records = Vec::with_capacity(batch.len());
    for item in batch {
        records.push(to_record(item)?);
    }
    store.begin()?;
    store.append(stage, records)?;
    store.commit()
}
