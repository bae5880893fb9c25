//! Satellite factories: assignments, subtasks, comments, tags, and custom
//! field values. Each follows a Bernoulli gate per parent task.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use taskseed_core::Distributions;
use taskseed_core::entities::{
    Comment, CustomFieldDefinition, CustomFieldValue, Organization, Subtask, Tag, Task,
    TaskAssignee, TaskTag, User, new_id,
};

use crate::flavor::FlavorProvider;

const COMMENT_TEMPLATES: &[&str] = &[
    "This looks good, let's move forward.",
    "Can you provide more details on this?",
    "I've reviewed the changes, approved.",
    "Let's schedule a sync to discuss.",
    "Great progress! Keep it up.",
    "Need clarification on requirements.",
    "Ready for testing phase.",
    "Please address the feedback.",
];

/// Tasks stay unassigned at the configured rate; otherwise one assignee 80%
/// of the time, 2-3 without replacement for the rest. The assigner is drawn
/// independently and may not be in the assignee set.
pub fn assignees(
    task: &Task,
    users: &[&User],
    dist: &Distributions,
    rng: &mut impl Rng,
) -> Vec<TaskAssignee> {
    if users.is_empty() || rng.random_bool(dist.unassigned_rate) {
        return Vec::new();
    }
    let wanted = if rng.random_bool(0.8) {
        1
    } else {
        rng.random_range(2..=3)
    };
    let assigned_by_id = users.choose(rng).map(|user| user.user_id.clone());
    users
        .choose_multiple(rng, wanted.min(users.len()))
        .map(|user| TaskAssignee {
            assignment_id: new_id(),
            task_id: task.task_id.clone(),
            user_id: user.user_id.clone(),
            assigned_at: task.created_at,
            assigned_by_id: assigned_by_id.clone(),
        })
        .collect()
}

/// 1 to `max_subtasks_per_task` dense-positioned children behind the
/// subtask gate. A subtask can only complete when its parent has.
pub fn subtasks(task: &Task, dist: &Distributions, rng: &mut impl Rng) -> Vec<Subtask> {
    if !rng.random_bool(dist.subtask_probability) {
        return Vec::new();
    }
    let count = rng.random_range(1..=dist.max_subtasks_per_task);
    (0..count)
        .map(|position| {
            let completed = task.completed && rng.random_bool(0.75);
            Subtask {
                subtask_id: new_id(),
                parent_task_id: task.task_id.clone(),
                name: format!("Step {} of {}", position + 1, truncated(&task.name, 30)),
                completed,
                completed_at: if completed { task.completed_at } else { None },
                position,
                created_at: task.created_at,
            }
        })
        .collect()
}

/// 1-3 comments behind the comment gate, each 1-48 hours after the task was
/// created so comment timestamps are strictly later than their task's.
pub fn comments(
    task: &Task,
    users: &[&User],
    dist: &Distributions,
    flavor: &dyn FlavorProvider,
    rng: &mut impl Rng,
) -> Vec<Comment> {
    if users.is_empty() || !rng.random_bool(dist.comment_probability) {
        return Vec::new();
    }
    let count = rng.random_range(1..=3);
    (0..count)
        .filter_map(|_| {
            let user = users.choose(rng)?;
            let template = COMMENT_TEMPLATES
                .choose(rng)
                .copied()
                .unwrap_or("Looks good to me.")
                .to_string();
            Some(Comment {
                comment_id: new_id(),
                task_id: task.task_id.clone(),
                user_id: user.user_id.clone(),
                content: flavor.suggest_comment(&task.name).unwrap_or(template),
                created_at: task.created_at + Duration::hours(rng.random_range(1..=48)),
            })
        })
        .collect()
}

/// The organization's full tag vocabulary, created once.
pub fn tags(org: &Organization, names: &[String], now: DateTime<Utc>) -> Vec<Tag> {
    names
        .iter()
        .map(|name| Tag {
            tag_id: new_id(),
            organization_id: org.organization_id.clone(),
            name: name.clone(),
            created_at: now,
        })
        .collect()
}

/// 1-3 distinct tags per task behind the tag gate.
pub fn task_tags(
    task: &Task,
    tags: &[&Tag],
    dist: &Distributions,
    rng: &mut impl Rng,
) -> Vec<TaskTag> {
    if tags.is_empty() || !rng.random_bool(dist.tag_probability) {
        return Vec::new();
    }
    let wanted = rng.random_range(1..=3usize).min(tags.len());
    tags.choose_multiple(rng, wanted)
        .map(|tag| TaskTag {
            task_tag_id: new_id(),
            task_id: task.task_id.clone(),
            tag_id: tag.tag_id.clone(),
            added_at: task.created_at,
        })
        .collect()
}

/// Each definition of the task's project is filled at the configured rate,
/// rendered per field type.
pub fn custom_field_values(
    task: &Task,
    definitions: &[&CustomFieldDefinition],
    dist: &Distributions,
    rng: &mut impl Rng,
) -> Vec<CustomFieldValue> {
    let mut values = Vec::new();
    for definition in definitions {
        if !rng.random_bool(dist.custom_field_fill_rate) {
            continue;
        }
        values.push(CustomFieldValue {
            custom_field_value_id: new_id(),
            task_id: task.task_id.clone(),
            custom_field_id: definition.custom_field_id.clone(),
            value: render_field_value(task, definition, rng),
            updated_at: task.updated_at,
        });
    }
    values
}

fn render_field_value(
    task: &Task,
    definition: &CustomFieldDefinition,
    rng: &mut impl Rng,
) -> String {
    match definition.field_type.as_str() {
        "dropdown" => {
            let options: Vec<String> = definition
                .options
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_default();
            options
                .choose(rng)
                .cloned()
                .unwrap_or_else(|| "n/a".to_string())
        }
        "number" => rng.random_range(1..=100).to_string(),
        "checkbox" => rng.random_bool(0.5).to_string(),
        "date" => task
            .due_date
            .unwrap_or_else(|| task.created_at.date_naive())
            .to_string(),
        _ => format!(
            "{}-{}",
            definition.name.to_lowercase().replace(' ', "-"),
            rng.random_range(1..=20)
        ),
    }
}

fn truncated(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
