//! Post-hoc consistency audit.
//!
//! Checks referential and temporal invariants over a finished set and
//! reports violations without mutating anything. The audit is a quality
//! signal, not a gate: the engine logs findings and still succeeds.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::GeneratedSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    DanglingReference,
    CreatedInFuture,
    UpdatedBeforeCreated,
    DueBeforeCreated,
    MissingCompletionTimestamp,
    CompletionOutOfRange,
    PositionNotDense,
    MembershipCardinality,
    AssigneeCardinality,
    CommentBeforeTask,
}

#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub code: ViolationCode,
    pub entity_id: String,
    pub message: String,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct AuditReport {
    pub violations: Vec<Violation>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    fn push(&mut self, code: ViolationCode, entity_id: &str, message: String) {
        self.violations.push(Violation {
            code,
            entity_id: entity_id.to_string(),
            message,
        });
    }
}

/// Run every check over the full generated set.
pub fn check(set: &GeneratedSet, now: DateTime<Utc>) -> AuditReport {
    let mut report = AuditReport::default();
    check_references(set, &mut report);
    check_task_times(set, now, &mut report);
    check_comment_times(set, &mut report);
    check_dense_positions(set, &mut report);
    check_cardinalities(set, &mut report);
    report
}

fn id_set<'a>(ids: impl Iterator<Item = &'a String>) -> HashSet<&'a str> {
    ids.map(String::as_str).collect()
}

fn require<'a>(
    report: &mut AuditReport,
    pool: &HashSet<&'a str>,
    reference: &str,
    entity_id: &str,
    field: &str,
) {
    if !pool.contains(reference) {
        report.push(
            ViolationCode::DanglingReference,
            entity_id,
            format!("{field} '{reference}' does not resolve"),
        );
    }
}

fn check_references(set: &GeneratedSet, report: &mut AuditReport) {
    let orgs = id_set(set.organizations.iter().map(|o| &o.organization_id));
    let teams = id_set(set.teams.iter().map(|t| &t.team_id));
    let users = id_set(set.users.iter().map(|u| &u.user_id));
    let projects = id_set(set.projects.iter().map(|p| &p.project_id));
    let sections = id_set(set.sections.iter().map(|s| &s.section_id));
    let tasks = id_set(set.tasks.iter().map(|t| &t.task_id));
    let tags = id_set(set.tags.iter().map(|t| &t.tag_id));
    let fields = id_set(set.field_definitions.iter().map(|d| &d.custom_field_id));

    for team in &set.teams {
        require(report, &orgs, &team.organization_id, &team.team_id, "organization_id");
    }
    for user in &set.users {
        require(report, &orgs, &user.organization_id, &user.user_id, "organization_id");
    }
    for membership in &set.memberships {
        require(report, &teams, &membership.team_id, &membership.membership_id, "team_id");
        require(report, &users, &membership.user_id, &membership.membership_id, "user_id");
    }
    for project in &set.projects {
        require(report, &orgs, &project.organization_id, &project.project_id, "organization_id");
        if let Some(team_id) = &project.team_id {
            require(report, &teams, team_id, &project.project_id, "team_id");
        }
    }
    for section in &set.sections {
        require(report, &projects, &section.project_id, &section.section_id, "project_id");
    }
    for definition in &set.field_definitions {
        require(report, &projects, &definition.project_id, &definition.custom_field_id, "project_id");
    }
    for tag in &set.tags {
        require(report, &orgs, &tag.organization_id, &tag.tag_id, "organization_id");
    }
    for task in &set.tasks {
        require(report, &projects, &task.project_id, &task.task_id, "project_id");
        if let Some(section_id) = &task.section_id {
            require(report, &sections, section_id, &task.task_id, "section_id");
        }
        if let Some(created_by) = &task.created_by_id {
            require(report, &users, created_by, &task.task_id, "created_by_id");
        }
    }
    for assignee in &set.assignees {
        require(report, &tasks, &assignee.task_id, &assignee.assignment_id, "task_id");
        require(report, &users, &assignee.user_id, &assignee.assignment_id, "user_id");
        if let Some(assigned_by) = &assignee.assigned_by_id {
            require(report, &users, assigned_by, &assignee.assignment_id, "assigned_by_id");
        }
    }
    for subtask in &set.subtasks {
        require(report, &tasks, &subtask.parent_task_id, &subtask.subtask_id, "parent_task_id");
    }
    for comment in &set.comments {
        require(report, &tasks, &comment.task_id, &comment.comment_id, "task_id");
        require(report, &users, &comment.user_id, &comment.comment_id, "user_id");
    }
    for task_tag in &set.task_tags {
        require(report, &tasks, &task_tag.task_id, &task_tag.task_tag_id, "task_id");
        require(report, &tags, &task_tag.tag_id, &task_tag.task_tag_id, "tag_id");
    }
    for value in &set.field_values {
        require(report, &tasks, &value.task_id, &value.custom_field_value_id, "task_id");
        require(report, &fields, &value.custom_field_id, &value.custom_field_value_id, "custom_field_id");
    }
}

fn check_task_times(set: &GeneratedSet, now: DateTime<Utc>, report: &mut AuditReport) {
    for task in &set.tasks {
        if task.created_at > now {
            report.push(
                ViolationCode::CreatedInFuture,
                &task.task_id,
                format!("created_at {} is after now", task.created_at),
            );
        }
        if task.updated_at < task.created_at {
            report.push(
                ViolationCode::UpdatedBeforeCreated,
                &task.task_id,
                format!("updated_at {} precedes created_at", task.updated_at),
            );
        }
        if let Some(due) = task.due_date
            && due < task.created_at.date_naive()
        {
            report.push(
                ViolationCode::DueBeforeCreated,
                &task.task_id,
                format!("due_date {due} precedes creation date"),
            );
        }
        if task.completed {
            match task.completed_at {
                None => report.push(
                    ViolationCode::MissingCompletionTimestamp,
                    &task.task_id,
                    "completed without completed_at".to_string(),
                ),
                Some(done) => {
                    if done < task.created_at || done > now {
                        report.push(
                            ViolationCode::CompletionOutOfRange,
                            &task.task_id,
                            format!("completed_at {done} outside [created_at, now]"),
                        );
                    }
                }
            }
        }
    }
}

fn check_comment_times(set: &GeneratedSet, report: &mut AuditReport) {
    let created: HashMap<&str, DateTime<Utc>> = set
        .tasks
        .iter()
        .map(|task| (task.task_id.as_str(), task.created_at))
        .collect();
    for comment in &set.comments {
        if let Some(task_created) = created.get(comment.task_id.as_str())
            && comment.created_at <= *task_created
        {
            report.push(
                ViolationCode::CommentBeforeTask,
                &comment.comment_id,
                format!("comment at {} not after task creation", comment.created_at),
            );
        }
    }
}

fn check_dense_positions(set: &GeneratedSet, report: &mut AuditReport) {
    let sections = set
        .sections
        .iter()
        .map(|section| (section.project_id.as_str(), section.position));
    dense_per_parent(sections, "section positions", report);

    let subtasks = set
        .subtasks
        .iter()
        .map(|subtask| (subtask.parent_task_id.as_str(), subtask.position));
    dense_per_parent(subtasks, "subtask positions", report);
}

/// Positions within one parent must be exactly {0, 1, .., n-1}.
fn dense_per_parent<'a>(
    items: impl Iterator<Item = (&'a str, u32)>,
    what: &str,
    report: &mut AuditReport,
) {
    let mut by_parent: HashMap<&str, Vec<u32>> = HashMap::new();
    for (parent, position) in items {
        by_parent.entry(parent).or_default().push(position);
    }
    for (parent, mut positions) in by_parent {
        positions.sort_unstable();
        let dense = positions
            .iter()
            .enumerate()
            .all(|(expected, &position)| position == expected as u32);
        if !dense {
            report.push(
                ViolationCode::PositionNotDense,
                parent,
                format!("{what} {positions:?} are not a dense 0-based sequence"),
            );
        }
    }
}

fn check_cardinalities(set: &GeneratedSet, report: &mut AuditReport) {
    let mut memberships_per_user: HashMap<&str, u32> = HashMap::new();
    for membership in &set.memberships {
        *memberships_per_user.entry(membership.user_id.as_str()).or_default() += 1;
    }
    for user in &set.users {
        let count = memberships_per_user.get(user.user_id.as_str()).copied().unwrap_or(0);
        if !(1..=3).contains(&count) {
            report.push(
                ViolationCode::MembershipCardinality,
                &user.user_id,
                format!("user holds {count} team memberships, expected 1-3"),
            );
        }
    }

    let mut assignees_per_task: HashMap<&str, Vec<&str>> = HashMap::new();
    for assignee in &set.assignees {
        assignees_per_task
            .entry(assignee.task_id.as_str())
            .or_default()
            .push(assignee.user_id.as_str());
    }
    for (task_id, users) in assignees_per_task {
        if users.len() > 3 {
            report.push(
                ViolationCode::AssigneeCardinality,
                task_id,
                format!("task has {} assignees, expected 0-3", users.len()),
            );
        }
        let distinct: HashSet<&&str> = users.iter().collect();
        if distinct.len() != users.len() {
            report.push(
                ViolationCode::AssigneeCardinality,
                task_id,
                "task assigns the same user more than once".to_string(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use taskseed_core::entities::{Project, Section, new_id};

    fn project(org_id: &str) -> Project {
        Project {
            project_id: new_id(),
            organization_id: org_id.to_string(),
            team_id: None,
            name: "Test".to_string(),
            description: None,
            project_type: "engineering".to_string(),
            status: "active".to_string(),
            color: None,
            archived: false,
            created_at: Utc::now(),
        }
    }

    fn section(project_id: &str, position: u32) -> Section {
        Section {
            section_id: new_id(),
            project_id: project_id.to_string(),
            name: "To Do".to_string(),
            position,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn flags_dangling_project_reference() {
        let mut set = GeneratedSet::default();
        set.projects.push(project("missing-org"));
        let report = check(&set, Utc::now());
        assert!(report
            .violations
            .iter()
            .any(|v| v.code == ViolationCode::DanglingReference));
    }

    #[test]
    fn flags_position_gap() {
        let mut set = GeneratedSet::default();
        let project = project("org");
        set.sections.push(section(&project.project_id, 0));
        set.sections.push(section(&project.project_id, 2));
        set.projects.push(project);
        let report = check(&set, Utc::now());
        assert!(report
            .violations
            .iter()
            .any(|v| v.code == ViolationCode::PositionNotDense));
    }

    #[test]
    fn empty_set_is_clean() {
        assert!(check(&GeneratedSet::default(), Utc::now()).is_clean());
    }
}
