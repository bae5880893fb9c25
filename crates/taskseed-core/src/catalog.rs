//! Built-in category and team catalog.
//!
//! Category behavior (naming, owning team, completion rate, section layout,
//! custom-field templates) is expressed as data so adding a category is a
//! config change, not a code change. The defaults mirror a typical SaaS
//! workspace: five teams, five project categories, sixteen tags.

use serde::{Deserialize, Serialize};

/// A team the generator can create, and that categories resolve against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSpec {
    pub name: String,
    pub color: String,
}

/// Value type of a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Dropdown,
    Date,
    Checkbox,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Dropdown => "dropdown",
            FieldKind::Date => "date",
            FieldKind::Checkbox => "checkbox",
        }
    }
}

/// Template for a project-scoped custom field definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldTemplate {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Per-category behavior record: everything that varies by project type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryProfile {
    /// Stable tag stored on projects as `project_type`.
    pub key: String,
    /// Pool of project base names.
    pub project_names: Vec<String>,
    /// Owning team, matched by name; projects fall back to no team when the
    /// configured team list does not contain it.
    pub team: String,
    /// Target probability that a task in this category is completed.
    pub completion_rate: f64,
    /// Ordered section names, emitted with dense 0-based positions.
    pub sections: Vec<String>,
    /// Word pools for task names; one word is drawn from each pool and the
    /// picks are joined with " - ". An empty list selects generic naming.
    #[serde(default)]
    pub task_name_pools: Vec<Vec<String>>,
    /// Custom field definitions created for each project.
    #[serde(default)]
    pub custom_fields: Vec<FieldTemplate>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn dropdown(name: &str, options: &[&str]) -> FieldTemplate {
    FieldTemplate {
        name: name.to_string(),
        kind: FieldKind::Dropdown,
        options: strings(options),
    }
}

fn field(name: &str, kind: FieldKind) -> FieldTemplate {
    FieldTemplate {
        name: name.to_string(),
        kind,
        options: Vec::new(),
    }
}

pub fn default_teams() -> Vec<TeamSpec> {
    [
        ("Engineering", "#1F2937"),
        ("Product", "#3B82F6"),
        ("Marketing", "#EC4899"),
        ("Operations", "#F59E0B"),
        ("Design", "#8B5CF6"),
    ]
    .iter()
    .map(|(name, color)| TeamSpec {
        name: name.to_string(),
        color: color.to_string(),
    })
    .collect()
}

pub fn default_tags() -> Vec<String> {
    strings(&[
        "bug",
        "feature",
        "enhancement",
        "documentation",
        "high-priority",
        "low-priority",
        "urgent",
        "blocked",
        "review",
        "testing",
        "deployment",
        "research",
        "design",
        "backend",
        "frontend",
        "database",
    ])
}

pub fn default_categories() -> Vec<CategoryProfile> {
    vec![
        CategoryProfile {
            key: "engineering".to_string(),
            project_names: strings(&[
                "Backend API",
                "Frontend Dashboard",
                "Mobile App",
                "Infrastructure",
                "DevOps",
                "Data Pipeline",
            ]),
            team: "Engineering".to_string(),
            completion_rate: 0.75,
            sections: strings(&["Backlog", "To Do", "In Progress", "In Review", "Done"]),
            task_name_pools: vec![
                strings(&["API", "Database", "Frontend", "Backend", "Cache", "Queue"]),
                strings(&[
                    "Implement", "Fix", "Refactor", "Optimize", "Document", "Review", "Test",
                    "Deploy", "Debug", "Design",
                ]),
                strings(&[
                    "for performance",
                    "for security",
                    "for scalability",
                    "for reliability",
                ]),
            ],
            custom_fields: vec![
                dropdown("Priority", &["Low", "Medium", "High", "Critical"]),
                field("Story Points", FieldKind::Number),
                field("Sprint", FieldKind::Text),
            ],
        },
        CategoryProfile {
            key: "marketing".to_string(),
            project_names: strings(&[
                "Q1 Campaign",
                "Social Media",
                "Content Calendar",
                "Product Launch",
                "SEO Strategy",
            ]),
            team: "Marketing".to_string(),
            completion_rate: 0.60,
            sections: strings(&["Planned", "To Do", "In Progress", "Review", "Published"]),
            task_name_pools: vec![
                strings(&["Q1 Campaign", "Social Media", "Email Marketing", "Content"]),
                strings(&["Design", "Copy", "Analytics Report", "Strategy"]),
            ],
            custom_fields: vec![
                dropdown("Campaign", &["Q1", "Q2", "Q3", "Q4"]),
                field("Budget", FieldKind::Number),
            ],
        },
        CategoryProfile {
            key: "operations".to_string(),
            project_names: strings(&[
                "Budget Planning",
                "Process Improvement",
                "HR Onboarding",
                "Finance Audit",
            ]),
            team: "Operations".to_string(),
            completion_rate: 0.55,
            sections: strings(&["Queue", "In Progress", "Pending Approval", "Completed"]),
            task_name_pools: vec![
                strings(&["Onboarding", "Budget", "Procurement", "Compliance"]),
                strings(&["Planning", "Review", "Audit", "Update"]),
            ],
            custom_fields: vec![
                dropdown("Department", &["Finance", "HR", "Legal", "Facilities"]),
                field("Budget Category", FieldKind::Text),
            ],
        },
        CategoryProfile {
            key: "product".to_string(),
            project_names: strings(&[
                "Feature Request",
                "User Research",
                "Roadmap Planning",
                "Analytics",
            ]),
            team: "Product".to_string(),
            completion_rate: 0.65,
            sections: strings(&["Ideation", "Backlog", "In Progress", "Testing", "Launched"]),
            task_name_pools: vec![
                strings(&["Onboarding Flow", "Search", "Notifications", "Billing"]),
                strings(&["Spec", "Interview", "Prototype", "Rollout Plan"]),
            ],
            custom_fields: vec![
                dropdown("Impact", &["Low", "Medium", "High"]),
                field("Effort", FieldKind::Number),
                field("Feature Area", FieldKind::Text),
            ],
        },
        CategoryProfile {
            key: "design".to_string(),
            project_names: strings(&[
                "Design System",
                "Brand Refresh",
                "UX Audit",
                "Website Redesign",
            ]),
            team: "Design".to_string(),
            completion_rate: 0.65,
            sections: strings(&["Inbox", "Exploring", "In Progress", "Review", "Shipped"]),
            task_name_pools: vec![
                strings(&["Component Library", "Icons", "Landing Page", "Mobile Screens"]),
                strings(&["Sketch", "Iterate", "Polish", "Hand Off"]),
            ],
            custom_fields: vec![
                dropdown("Fidelity", &["Wireframe", "Mockup", "Final"]),
                field("Needs Review", FieldKind::Checkbox),
            ],
        },
    ]
}
