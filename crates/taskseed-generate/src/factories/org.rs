//! Organization, team, user, and membership factories.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use taskseed_core::TeamSpec;
use taskseed_core::entities::{Organization, Team, TeamMembership, User, new_id};

const COMPANY_NAMES: &[&str] = &[
    "Brightloom", "Cobalt Labs", "Driftwood", "Evergreen Systems", "Fathom", "Gridline",
    "Harbor Peak", "Ironvale", "Juniper Works", "Kestrel", "Lumenly", "Meridian Stack",
    "Northbeam", "Opal Forge", "Pinewheel", "Quartzite", "Riverbend Software", "Summitry",
];

const INDUSTRIES: &[&str] = &[
    "SaaS",
    "FinTech",
    "Enterprise Software",
    "AI/ML",
    "DevTools",
    "Cloud Infrastructure",
    "Productivity",
    "Analytics",
    "Security",
];

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Sarah", "David", "Emma", "Robert", "Lisa", "James", "Mary",
    "Richard", "Jennifer", "Charles", "Patricia", "Christopher", "Linda", "Daniel", "Barbara",
    "Matthew", "Elizabeth", "Mark", "Susan", "Donald", "Jessica", "Steven", "Karen", "Andrew",
    "Nancy", "Joshua", "Donna", "Kevin", "Carol", "Brian", "Pamela", "George", "Teresa",
    "Ryan", "Nora", "Eric", "Naomi", "Stephen", "Nicole", "Justin", "Nina", "Scott", "Natalie",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore",
    "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez", "Clark",
    "Ramirez", "Lewis", "Robinson", "Young", "Allen", "King", "Wright", "Scott", "Torres",
    "Phillips", "Campbell", "Parker", "Evans", "Edwards", "Collins", "Stewart", "Morris",
    "Murphy", "Cook", "Morgan", "Cooper", "Reed", "Bell", "Gomez",
];

const ROLES: &[&str] = &[
    "Software Engineer", "Senior Engineer", "Product Manager", "Designer", "Data Scientist",
    "DevOps Engineer", "QA Engineer", "Product Owner", "Operations Manager", "Marketing Manager",
    "Sales Manager", "HR Manager", "Business Analyst", "Solutions Architect", "Tech Lead",
    "Scrum Master",
];

const TIMEZONES: &[&str] = &[
    "UTC",
    "America/New_York",
    "America/Chicago",
    "America/Denver",
    "America/Los_Angeles",
    "Europe/London",
];

pub fn organization(now: DateTime<Utc>, rng: &mut impl Rng) -> Organization {
    let name = COMPANY_NAMES.choose(rng).copied().unwrap_or("Acme");
    let industry = INDUSTRIES.choose(rng).copied().unwrap_or("SaaS");
    let domain = format!("{}.com", name.to_lowercase().replace(' ', ""));
    Organization {
        organization_id: new_id(),
        name: name.to_string(),
        website: Some(format!("https://{domain}")),
        domain,
        created_at: now,
        description: Some(format!("{name} is a {industry} company.")),
        industry: Some(industry.to_string()),
        employee_count: Some(rng.random_range(50..=10_000)),
    }
}

/// One team per configured spec; extra teams beyond the spec list get a
/// numbered placeholder name.
pub fn teams(
    org: &Organization,
    specs: &[TeamSpec],
    count: u32,
    now: DateTime<Utc>,
) -> Vec<Team> {
    (0..count as usize)
        .map(|index| {
            let (name, color) = match specs.get(index) {
                Some(spec) => (spec.name.clone(), Some(spec.color.clone())),
                None => (format!("Team {}", index + 1), None),
            };
            Team {
                team_id: new_id(),
                organization_id: org.organization_id.clone(),
                description: Some(format!("{name} team responsible for core functions.")),
                name,
                color,
                created_at: now,
            }
        })
        .collect()
}

pub fn users(
    org: &Organization,
    count: u32,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Vec<User> {
    (0..count)
        .map(|index| {
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
            User {
                user_id: new_id(),
                organization_id: org.organization_id.clone(),
                name: format!("{first} {last}"),
                email: format!(
                    "{}.{}{index}@{}",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    org.domain
                ),
                first_name: first.to_string(),
                last_name: last.to_string(),
                timezone: TIMEZONES.choose(rng).copied().unwrap_or("UTC").to_string(),
                role: ROLES.choose(rng).map(|role| role.to_string()),
                active: rng.random_bool(0.95),
                created_at: now,
            }
        })
        .collect()
}

/// Every user joins 1 team 70% of the time, otherwise 2-3, drawn without
/// replacement. Roughly one in ten memberships is a lead.
pub fn memberships(
    users: &[&User],
    teams: &[&Team],
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Vec<TeamMembership> {
    let mut memberships = Vec::new();
    if teams.is_empty() {
        return memberships;
    }
    for user in users {
        let wanted = if rng.random_bool(0.7) {
            1
        } else {
            rng.random_range(2..=3)
        };
        for team in teams.choose_multiple(rng, wanted.min(teams.len())) {
            memberships.push(TeamMembership {
                membership_id: new_id(),
                team_id: team.team_id.clone(),
                user_id: user.user_id.clone(),
                role: if rng.random_bool(0.1) { "lead" } else { "member" }.to_string(),
                joined_at: now,
            });
        }
    }
    memberships
}
