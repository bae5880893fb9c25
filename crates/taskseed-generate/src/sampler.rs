//! Distribution sampling for temporal attributes.
//!
//! Pure functions over the configured probability tables: no entity
//! knowledge, no ambient randomness. Every draw takes the caller's RNG so a
//! run seeded once stays reproducible.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use rand::Rng;
use rand_distr::{Distribution as _, LogNormal};

use taskseed_core::Distributions;

/// Fraction of off-peak creation draws that are discarded and resampled.
const OFF_PEAK_DISCARD: f64 = 0.3;
/// Bound on the off-peak retry loop; degenerate peak configurations give up
/// and keep the last draw instead of looping.
const PEAK_RETRY_LIMIT: u32 = 16;
/// Probability that a completion overshooting its due date is pulled back.
const RESPECT_DUE_DATE: f64 = 0.70;
const MIN_COMPLETION_DAYS: i64 = 1;
const MAX_COMPLETION_DAYS: i64 = 14;

/// Moment-matched log-normal location/scale for a linear-space mean and
/// standard deviation in days.
pub fn lognormal_params(mean_days: f64, std_days: f64) -> (f64, f64) {
    let sigma_sq = (1.0 + (std_days * std_days) / (mean_days * mean_days)).ln();
    let mu = mean_days.ln() - sigma_sq / 2.0;
    (mu, sigma_sq.sqrt())
}

/// Outcome of one due-date table draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueBucket {
    Within1Week,
    Within1Month,
    Within3Months,
    NoDueDate,
    Overdue,
}

/// Stateless sampler over one distribution config and a fixed reference
/// instant.
#[derive(Debug, Clone, Copy)]
pub struct Sampler<'a> {
    dist: &'a Distributions,
    now: DateTime<Utc>,
}

impl<'a> Sampler<'a> {
    pub fn new(dist: &'a Distributions, now: DateTime<Utc>) -> Self {
        Self { dist, now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Creation timestamp: uniform day in the lookback window, business-hour
    /// time of day, mildly biased toward the configured peak weekdays.
    pub fn creation_timestamp(&self, rng: &mut impl Rng) -> DateTime<Utc> {
        let mut candidate = self.draw_creation(rng);
        let mut attempts = 0;
        while attempts < PEAK_RETRY_LIMIT
            && !self.is_peak_day(candidate.date_naive())
            && rng.random_bool(OFF_PEAK_DISCARD)
        {
            candidate = self.draw_creation(rng);
            attempts += 1;
        }
        candidate.min(self.now)
    }

    fn draw_creation(&self, rng: &mut impl Rng) -> DateTime<Utc> {
        let offset = rng.random_range(0..=self.dist.lookback_days as i64);
        let date = (self.now - Duration::days(offset)).date_naive();
        date.and_time(business_time(rng)).and_utc()
    }

    fn is_peak_day(&self, date: NaiveDate) -> bool {
        let day = date.weekday().num_days_from_monday() as u8;
        self.dist.peak_days.contains(&day)
    }

    /// One weighted draw from the due-date table.
    pub fn due_bucket(&self, rng: &mut impl Rng) -> DueBucket {
        let table = &self.dist.due_date;
        let roll: f64 = rng.random();
        let mut acc = table.no_due_date;
        if roll < acc {
            return DueBucket::NoDueDate;
        }
        acc += table.within_1_week;
        if roll < acc {
            return DueBucket::Within1Week;
        }
        acc += table.within_1_month;
        if roll < acc {
            return DueBucket::Within1Month;
        }
        acc += table.within_3_months;
        if roll < acc {
            return DueBucket::Within3Months;
        }
        DueBucket::Overdue
    }

    /// Due date for a task created at `created_at`, or `None` for the
    /// no-due-date bucket. The overdue bucket lands 1-30 days before now,
    /// never before the creation date. Weekend avoidance applies per draw
    /// and advances day by day to the next Monday.
    pub fn due_date(&self, created_at: DateTime<Utc>, rng: &mut impl Rng) -> Option<NaiveDate> {
        let created = created_at.date_naive();
        let mut due = match self.due_bucket(rng) {
            DueBucket::NoDueDate => return None,
            DueBucket::Within1Week => created + Duration::days(rng.random_range(1..=7)),
            DueBucket::Within1Month => created + Duration::days(rng.random_range(8..=30)),
            DueBucket::Within3Months => created + Duration::days(rng.random_range(31..=90)),
            DueBucket::Overdue => {
                let target = self.now.date_naive() - Duration::days(rng.random_range(1..=30));
                target.max(created)
            }
        };
        if rng.random_bool(self.dist.weekend_avoidance) {
            while matches!(due.weekday(), Weekday::Sat | Weekday::Sun) {
                due += Duration::days(1);
            }
        }
        Some(due)
    }

    /// Days-to-complete: log-normal draw floored at 1 day, capped at 14.
    pub fn completion_days(&self, rng: &mut impl Rng) -> i64 {
        let mean = self.dist.completion_time_mean_days;
        let std = self.dist.completion_time_std_days;
        let (mu, sigma) = lognormal_params(mean, std);
        let draw = match LogNormal::new(mu, sigma) {
            Ok(lognormal) => lognormal.sample(rng),
            Err(_) => mean,
        };
        (draw.floor() as i64).clamp(MIN_COMPLETION_DAYS, MAX_COMPLETION_DAYS)
    }

    /// Completion timestamp: creation plus the sampled days, never in the
    /// future. When the naive result overshoots an existing due date, 70% of
    /// draws are pulled back to 0-3 days before it at a business hour; the
    /// rest stay overdue.
    pub fn completion_timestamp(
        &self,
        created_at: DateTime<Utc>,
        due_date: Option<NaiveDate>,
        rng: &mut impl Rng,
    ) -> DateTime<Utc> {
        let mut completed = created_at + Duration::days(self.completion_days(rng));
        if completed > self.now {
            completed = self.now - Duration::hours(1);
        }
        if let Some(due) = due_date
            && completed.date_naive() > due
            && rng.random_bool(RESPECT_DUE_DATE)
        {
            let date = due - Duration::days(rng.random_range(0..=3));
            completed = date.and_time(business_time(rng)).and_utc();
        }
        completed.clamp(created_at, self.now)
    }

    /// Update timestamp: the completion instant 70% of the time for
    /// completed tasks, otherwise 1-24 hours after creation.
    pub fn updated_at(
        &self,
        created_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
        rng: &mut impl Rng,
    ) -> DateTime<Utc> {
        if let Some(done) = completed_at
            && rng.random_bool(0.7)
        {
            return done;
        }
        created_at + Duration::hours(rng.random_range(1..=24))
    }
}

/// Uniform time of day within business hours, 08:00-18:59.
pub fn business_time(rng: &mut impl Rng) -> NaiveTime {
    NaiveTime::from_hms_opt(
        rng.random_range(8..=18),
        rng.random_range(0..60),
        rng.random_range(0..60),
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moment_matching_recovers_linear_mean() {
        let (mu, sigma) = lognormal_params(5.0, 3.0);
        let implied_mean = (mu + sigma * sigma / 2.0).exp();
        assert!((implied_mean - 5.0).abs() < 1e-9);
    }

    #[test]
    fn moment_matching_recovers_linear_variance() {
        let (mu, sigma) = lognormal_params(5.0, 3.0);
        let sigma_sq = sigma * sigma;
        let implied_var = (sigma_sq.exp() - 1.0) * (2.0 * mu + sigma_sq).exp();
        assert!((implied_var - 9.0).abs() < 1e-6);
    }
}
