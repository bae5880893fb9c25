//! Project, section, and custom-field-definition factories.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use taskseed_core::CategoryProfile;
use taskseed_core::entities::{
    CustomFieldDefinition, Organization, Project, Section, Team, new_id,
};

const PROJECT_COLORS: &[&str] = &["#3B82F6", "#EC4899", "#8B5CF6", "#F59E0B"];

/// Projects cycle through the category catalog so every category receives an
/// equal share. The owning team is resolved by the category's team name;
/// a missing team leaves `team_id` unset, never an error.
pub fn projects(
    org: &Organization,
    teams: &[&Team],
    categories: &[CategoryProfile],
    count: u32,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Vec<Project> {
    (0..count as usize)
        .map(|index| {
            let profile = &categories[index % categories.len()];
            let base = profile
                .project_names
                .choose(rng)
                .cloned()
                .unwrap_or_else(|| "General".to_string());
            let team_id = teams
                .iter()
                .find(|team| team.name == profile.team)
                .map(|team| team.team_id.clone());
            Project {
                project_id: new_id(),
                organization_id: org.organization_id.clone(),
                team_id,
                name: format!("{base} #{}", index + 1),
                description: Some(format!("Project for the {} team", profile.team)),
                project_type: profile.key.clone(),
                status: "active".to_string(),
                color: PROJECT_COLORS.choose(rng).map(|color| color.to_string()),
                archived: false,
                created_at: now,
            }
        })
        .collect()
}

/// The category's ordered section list as dense, 0-based children.
pub fn sections(project: &Project, profile: &CategoryProfile) -> Vec<Section> {
    profile
        .sections
        .iter()
        .enumerate()
        .map(|(position, name)| Section {
            section_id: new_id(),
            project_id: project.project_id.clone(),
            name: name.clone(),
            position: position as u32,
            created_at: project.created_at,
        })
        .collect()
}

pub fn custom_field_definitions(
    project: &Project,
    profile: &CategoryProfile,
) -> Vec<CustomFieldDefinition> {
    profile
        .custom_fields
        .iter()
        .map(|template| CustomFieldDefinition {
            custom_field_id: new_id(),
            project_id: project.project_id.clone(),
            name: template.name.clone(),
            field_type: template.kind.as_str().to_string(),
            options: if template.options.is_empty() {
                None
            } else {
                serde_json::to_string(&template.options).ok()
            },
            created_at: project.created_at,
        })
        .collect()
}
