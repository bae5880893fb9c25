//! Entity records produced by the generation pipeline.
//!
//! Records are immutable once constructed: factories build them fully
//! populated and nothing mutates them afterwards. Identifiers are opaque
//! UUID strings minted at construction time, never sequential.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Mint a fresh globally-unique identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The entity kinds the pipeline can produce, in no particular order.
///
/// `table_name` doubles as the store key, CSV file stem, and report key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Organizations,
    Teams,
    Users,
    TeamMemberships,
    Projects,
    Sections,
    CustomFieldDefinitions,
    Tags,
    Tasks,
    TaskAssignees,
    Subtasks,
    Comments,
    TaskTags,
    CustomFieldValues,
}

impl EntityKind {
    pub const ALL: [EntityKind; 14] = [
        EntityKind::Organizations,
        EntityKind::Teams,
        EntityKind::Users,
        EntityKind::TeamMemberships,
        EntityKind::Projects,
        EntityKind::Sections,
        EntityKind::CustomFieldDefinitions,
        EntityKind::Tags,
        EntityKind::Tasks,
        EntityKind::TaskAssignees,
        EntityKind::Subtasks,
        EntityKind::Comments,
        EntityKind::TaskTags,
        EntityKind::CustomFieldValues,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Organizations => "organizations",
            EntityKind::Teams => "teams",
            EntityKind::Users => "users",
            EntityKind::TeamMemberships => "team_memberships",
            EntityKind::Projects => "projects",
            EntityKind::Sections => "sections",
            EntityKind::CustomFieldDefinitions => "custom_field_definitions",
            EntityKind::Tags => "tags",
            EntityKind::Tasks => "tasks",
            EntityKind::TaskAssignees => "task_assignees",
            EntityKind::Subtasks => "subtasks",
            EntityKind::Comments => "comments",
            EntityKind::TaskTags => "task_tags",
            EntityKind::CustomFieldValues => "custom_field_values",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Organization {
    pub organization_id: String,
    pub name: String,
    pub domain: String,
    pub created_at: DateTime<Utc>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<u32>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub team_id: String,
    pub organization_id: String,
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub user_id: String,
    pub organization_id: String,
    pub name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub timezone: String,
    pub role: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMembership {
    pub membership_id: String,
    pub team_id: String,
    pub user_id: String,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub project_id: String,
    pub organization_id: String,
    pub team_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub project_type: String,
    pub status: String,
    pub color: Option<String>,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub section_id: String,
    pub project_id: String,
    pub name: String,
    pub position: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub task_id: String,
    pub project_id: String,
    pub section_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub priority: String,
    pub status: String,
    pub created_by_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskAssignee {
    pub assignment_id: String,
    pub task_id: String,
    pub user_id: String,
    pub assigned_at: DateTime<Utc>,
    pub assigned_by_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Subtask {
    pub subtask_id: String,
    pub parent_task_id: String,
    pub name: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub position: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub comment_id: String,
    pub task_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub tag_id: String,
    pub organization_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskTag {
    pub task_tag_id: String,
    pub task_id: String,
    pub tag_id: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomFieldDefinition {
    pub custom_field_id: String,
    pub project_id: String,
    pub name: String,
    pub field_type: String,
    /// JSON-encoded option list for dropdown fields.
    pub options: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomFieldValue {
    pub custom_field_value_id: String,
    pub task_id: String,
    pub custom_field_id: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}
