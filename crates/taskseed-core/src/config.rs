//! Configuration surface consumed by the generation engine.
//!
//! Every field has a default, so an empty TOML file is a valid config.
//! `SimConfig::validate` is the fatal startup gate: a misconfigured
//! distribution table or an empty required pool aborts before any
//! generation starts.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, CategoryProfile, TeamSpec};
use crate::error::ConfigError;

const SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub dataset: DatasetSize,
    pub distributions: Distributions,
    pub random_seed: u64,
    pub flavor: FlavorConfig,
    pub teams: Vec<TeamSpec>,
    pub categories: Vec<CategoryProfile>,
    pub tags: Vec<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSize::default(),
            distributions: Distributions::default(),
            random_seed: 42,
            flavor: FlavorConfig::default(),
            teams: catalog::default_teams(),
            categories: catalog::default_categories(),
            tags: catalog::default_tags(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSize {
    pub num_organizations: u32,
    pub num_teams: u32,
    pub num_users: u32,
    pub num_projects: u32,
    pub num_tasks_per_project: u32,
}

impl Default for DatasetSize {
    fn default() -> Self {
        Self {
            num_organizations: 1,
            num_teams: 5,
            num_users: 50,
            num_projects: 10,
            num_tasks_per_project: 40,
        }
    }
}

/// Named probability tables and means driving the sampler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Distributions {
    /// How far back creation timestamps reach, in days.
    pub lookback_days: u32,
    /// Weekdays with elevated creation volume, 0 = Monday .. 6 = Sunday.
    pub peak_days: Vec<u8>,
    pub due_date: DueDateTable,
    pub weekend_avoidance: f64,
    pub unassigned_rate: f64,
    pub completion_time_mean_days: f64,
    pub completion_time_std_days: f64,
    pub comment_probability: f64,
    pub subtask_probability: f64,
    pub max_subtasks_per_task: u32,
    pub tag_probability: f64,
    pub custom_field_fill_rate: f64,
}

impl Default for Distributions {
    fn default() -> Self {
        Self {
            lookback_days: 180,
            peak_days: vec![0, 1, 2],
            due_date: DueDateTable::default(),
            weekend_avoidance: 0.85,
            unassigned_rate: 0.15,
            completion_time_mean_days: 5.0,
            completion_time_std_days: 3.0,
            comment_probability: 0.50,
            subtask_probability: 0.20,
            max_subtasks_per_task: 4,
            tag_probability: 0.40,
            custom_field_fill_rate: 0.60,
        }
    }
}

/// Due-date bucket weights; the fractions must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DueDateTable {
    pub within_1_week: f64,
    pub within_1_month: f64,
    pub within_3_months: f64,
    pub no_due_date: f64,
    pub overdue: f64,
}

impl DueDateTable {
    pub fn sum(&self) -> f64 {
        self.within_1_week + self.within_1_month + self.within_3_months + self.no_due_date
            + self.overdue
    }
}

impl Default for DueDateTable {
    fn default() -> Self {
        Self {
            within_1_week: 0.25,
            within_1_month: 0.40,
            within_3_months: 0.20,
            no_due_date: 0.10,
            overdue: 0.05,
        }
    }
}

/// Settings for the optional text-flavor provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlavorConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key; the provider stays
    /// disabled when it is unset.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for FlavorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 5,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let due = &self.distributions.due_date;
        if (due.sum() - 1.0).abs() > SUM_TOLERANCE {
            return Err(ConfigError::DistributionSum {
                name: "due_date",
                sum: due.sum(),
            });
        }

        let probabilities = [
            ("weekend_avoidance", self.distributions.weekend_avoidance),
            ("unassigned_rate", self.distributions.unassigned_rate),
            ("comment_probability", self.distributions.comment_probability),
            ("subtask_probability", self.distributions.subtask_probability),
            ("tag_probability", self.distributions.tag_probability),
            (
                "custom_field_fill_rate",
                self.distributions.custom_field_fill_rate,
            ),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityRange { name, value });
            }
        }

        if self.distributions.completion_time_mean_days <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "completion_time_mean_days",
                value: self.distributions.completion_time_mean_days,
            });
        }
        if self.distributions.completion_time_std_days <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "completion_time_std_days",
                value: self.distributions.completion_time_std_days,
            });
        }

        if self.distributions.peak_days.is_empty() {
            return Err(ConfigError::EmptyPeakDays);
        }
        for &day in &self.distributions.peak_days {
            if day > 6 {
                return Err(ConfigError::InvalidPeakDay(day));
            }
        }

        if self.dataset.num_organizations == 0 {
            return Err(ConfigError::EmptyPool("num_organizations"));
        }
        if self.dataset.num_teams == 0 {
            return Err(ConfigError::EmptyPool("num_teams"));
        }
        if self.dataset.num_users == 0 {
            return Err(ConfigError::EmptyPool("num_users"));
        }
        if self.distributions.lookback_days == 0 {
            return Err(ConfigError::EmptyPool("lookback_days"));
        }
        if self.distributions.max_subtasks_per_task == 0 {
            return Err(ConfigError::EmptyPool("max_subtasks_per_task"));
        }

        if self.categories.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for category in &self.categories {
            if !(0.0..=1.0).contains(&category.completion_rate) {
                return Err(ConfigError::ProbabilityRange {
                    name: "completion_rate",
                    value: category.completion_rate,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        SimConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: SimConfig = toml::from_str("").expect("empty config parses");
        assert_eq!(config.dataset.num_users, 50);
        assert_eq!(config.random_seed, 42);
        assert_eq!(config.categories.len(), 5);
        config.validate().expect("parsed defaults validate");
    }

    #[test]
    fn toml_overrides_apply() {
        let config: SimConfig = toml::from_str(
            r#"
            random_seed = 7

            [dataset]
            num_users = 500

            [distributions.due_date]
            within_1_week = 0.30
            no_due_date = 0.05
            "#,
        )
        .expect("config parses");
        assert_eq!(config.random_seed, 7);
        assert_eq!(config.dataset.num_users, 500);
        assert!((config.distributions.due_date.within_1_week - 0.30).abs() < 1e-9);
        config.validate().expect("still sums to 1.0");
    }

    #[test]
    fn rejects_distribution_not_summing_to_one() {
        let mut config = SimConfig::default();
        config.distributions.due_date.no_due_date = 0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DistributionSum { name: "due_date", .. })
        ));
    }

    #[test]
    fn rejects_empty_peak_days() {
        let mut config = SimConfig::default();
        config.distributions.peak_days.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPeakDays)));
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let mut config = SimConfig::default();
        config.distributions.unassigned_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityRange {
                name: "unassigned_rate",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_user_pool() {
        let mut config = SimConfig::default();
        config.dataset.num_users = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPool("num_users"))
        ));
    }
}
