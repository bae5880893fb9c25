//! Task factory: the densest sampling site in the pipeline.

use rand::Rng;
use rand::seq::IndexedRandom;

use taskseed_core::CategoryProfile;
use taskseed_core::entities::{Project, Section, Task, User, new_id};

use crate::flavor::FlavorProvider;
use crate::sampler::Sampler;

const PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];
const OPEN_STATUSES: &[&str] = &["not_started", "in_progress"];

const GENERIC_NAME_TEMPLATES: &[&str] = &["Task for {}", "{} needs review", "Complete {} task"];
const GENERIC_NAME_SUBJECTS: &[&str] = &["feature", "bug fix", "enhancement"];

const SHORT_SENTENCES: &[&str] = &[
    "This task requires implementation of the specified feature.",
    "Please complete this work according to the acceptance criteria.",
    "Review the requirements and provide updates.",
];

const DETAILED_DESCRIPTIONS: &[&str] = &[
    "Requirements:\n- Implement feature\n- Add unit tests\n- Document code",
    "Tasks:\n- Research the topic\n- Create design spec\n- Get stakeholder approval",
    "Checklist:\n- Review existing code\n- Design new approach\n- Implement solution\n- Test thoroughly",
];

/// All tasks for one project. Completion is a Bernoulli draw at the
/// category's target rate; every temporal attribute comes from the sampler
/// so the causal ordering (created, then due, then completion, then update)
/// holds by construction.
pub fn tasks(
    project: &Project,
    profile: &CategoryProfile,
    sections: &[&Section],
    users: &[&User],
    count: u32,
    sampler: &Sampler<'_>,
    flavor: &dyn FlavorProvider,
    rng: &mut impl Rng,
) -> Vec<Task> {
    (0..count)
        .map(|_| {
            let created_at = sampler.creation_timestamp(rng);
            let due_date = sampler.due_date(created_at, rng);
            let completed = rng.random_bool(profile.completion_rate);
            let completed_at =
                completed.then(|| sampler.completion_timestamp(created_at, due_date, rng));
            let updated_at = sampler.updated_at(created_at, completed_at, rng);

            // Template text is drawn first so the RNG stream is identical
            // whether or not a flavor provider is present.
            let template_name = task_name(profile, rng);
            let name = flavor
                .suggest_name(&profile.key, &project.name)
                .unwrap_or(template_name);
            let description = description(rng)
                .map(|template| flavor.suggest_description(&name).unwrap_or(template));

            let status = if completed {
                "completed"
            } else {
                OPEN_STATUSES.choose(rng).copied().unwrap_or("not_started")
            };

            Task {
                task_id: new_id(),
                project_id: project.project_id.clone(),
                section_id: sections.choose(rng).map(|section| section.section_id.clone()),
                name,
                description,
                created_at,
                updated_at,
                due_date,
                completed,
                completed_at,
                priority: PRIORITIES.choose(rng).copied().unwrap_or("medium").to_string(),
                status: status.to_string(),
                created_by_id: users.choose(rng).map(|user| user.user_id.clone()),
            }
        })
        .collect()
}

/// Category-templated name: one word from each configured pool, joined with
/// " - "; categories without pools fall back to generic naming.
fn task_name(profile: &CategoryProfile, rng: &mut impl Rng) -> String {
    if profile.task_name_pools.is_empty() {
        let template = GENERIC_NAME_TEMPLATES
            .choose(rng)
            .copied()
            .unwrap_or("Task for {}");
        let subject = GENERIC_NAME_SUBJECTS.choose(rng).copied().unwrap_or("feature");
        return template.replace("{}", subject);
    }
    let parts: Vec<&str> = profile
        .task_name_pools
        .iter()
        .filter_map(|pool| pool.choose(rng).map(String::as_str))
        .collect();
    parts.join(" - ")
}

/// 20% of tasks carry no description, 30% one to three short sentences,
/// the rest a bulleted block.
fn description(rng: &mut impl Rng) -> Option<String> {
    let roll: f64 = rng.random();
    if roll < 0.20 {
        None
    } else if roll < 0.50 {
        let count = rng.random_range(1..=SHORT_SENTENCES.len());
        let picked: Vec<&str> = SHORT_SENTENCES
            .choose_multiple(rng, count)
            .copied()
            .collect();
        Some(picked.join(" "))
    } else {
        DETAILED_DESCRIPTIONS
            .choose(rng)
            .map(|text| text.to_string())
    }
}
