//! Statistical checks over the sampler: drawn proportions must track the
//! configured tables within a loose tolerance at large sample counts.

use chrono::{Datelike, TimeZone, Timelike, Utc, Weekday};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use taskseed_core::Distributions;
use taskseed_generate::{DueBucket, Sampler, lognormal_params};

fn reference_time() -> chrono::DateTime<chrono::Utc> {
    // A Wednesday, mid-day.
    Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap()
}

#[test]
fn due_bucket_proportions_track_the_table() {
    let dist = Distributions::default();
    let sampler = Sampler::new(&dist, reference_time());
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let samples = 100_000;
    let mut counts = std::collections::HashMap::new();
    for _ in 0..samples {
        *counts.entry(sampler.due_bucket(&mut rng)).or_insert(0u32) += 1;
    }

    let fraction = |bucket: DueBucket| f64::from(counts.get(&bucket).copied().unwrap_or(0))
        / f64::from(samples);
    assert!((fraction(DueBucket::Within1Week) - 0.25).abs() < 0.02);
    assert!((fraction(DueBucket::Within1Month) - 0.40).abs() < 0.02);
    assert!((fraction(DueBucket::Within3Months) - 0.20).abs() < 0.02);
    assert!((fraction(DueBucket::NoDueDate) - 0.10).abs() < 0.02);
    assert!((fraction(DueBucket::Overdue) - 0.05).abs() < 0.02);
}

#[test]
fn full_weekend_avoidance_never_lands_on_weekends() {
    let mut dist = Distributions::default();
    dist.weekend_avoidance = 1.0;
    let sampler = Sampler::new(&dist, reference_time());
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    for _ in 0..5_000 {
        let created_at = sampler.creation_timestamp(&mut rng);
        if let Some(due) = sampler.due_date(created_at, &mut rng) {
            assert!(!matches!(due.weekday(), Weekday::Sat | Weekday::Sun), "due {due}");
            assert!(due >= created_at.date_naive());
        }
    }
}

#[test]
fn completion_days_stay_in_bounds_with_plausible_mean() {
    let dist = Distributions::default();
    let sampler = Sampler::new(&dist, reference_time());
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let samples = 10_000;
    let mut total = 0i64;
    for _ in 0..samples {
        let days = sampler.completion_days(&mut rng);
        assert!((1..=14).contains(&days), "days {days}");
        total += days;
    }
    // The clamp trims the log-normal tail, so the realized mean sits a bit
    // under the configured 5.0.
    let mean = total as f64 / f64::from(samples);
    assert!((2.5..=7.0).contains(&mean), "mean {mean}");
}

#[test]
fn raw_lognormal_mean_matches_configured_mean() {
    use rand_distr::Distribution as _;

    let (mu, sigma) = lognormal_params(5.0, 3.0);
    let lognormal = rand_distr::LogNormal::new(mu, sigma).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    let samples = 100_000;
    let mut total = 0.0;
    for _ in 0..samples {
        total += lognormal.sample(&mut rng);
    }
    let mean = total / f64::from(samples);
    assert!((mean - 5.0).abs() < 0.5, "raw mean {mean}");
}

#[test]
fn creation_timestamps_stay_in_window_at_business_hours() {
    let dist = Distributions::default();
    let now = reference_time();
    let sampler = Sampler::new(&dist, now);
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    let window_start = now - chrono::Duration::days(i64::from(dist.lookback_days) + 1);
    for _ in 0..5_000 {
        let created_at = sampler.creation_timestamp(&mut rng);
        assert!(created_at <= now);
        assert!(created_at >= window_start);
        assert!((8..=18).contains(&created_at.hour()), "hour {}", created_at.hour());
    }
}

#[test]
fn peak_days_carry_more_creations_than_uniform() {
    let dist = Distributions::default();
    let sampler = Sampler::new(&dist, reference_time());
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let samples = 50_000;
    let mut on_peak = 0u32;
    for _ in 0..samples {
        let day = sampler
            .creation_timestamp(&mut rng)
            .date_naive()
            .weekday()
            .num_days_from_monday() as u8;
        if dist.peak_days.contains(&day) {
            on_peak += 1;
        }
    }
    // Uniform would put 3/7 (~0.43) of creations on Mon-Wed; the off-peak
    // resampling pushes that up to roughly 0.52.
    let fraction = f64::from(on_peak) / f64::from(samples);
    assert!(fraction > 0.46, "peak fraction {fraction}");
    assert!(fraction < 0.60, "peak fraction {fraction}");
}

#[test]
fn completion_never_leaves_created_to_now_range() {
    let dist = Distributions::default();
    let now = reference_time();
    let sampler = Sampler::new(&dist, now);
    let mut rng = ChaCha8Rng::seed_from_u64(6);

    for _ in 0..5_000 {
        let created_at = sampler.creation_timestamp(&mut rng);
        let due_date = sampler.due_date(created_at, &mut rng);
        let completed_at = sampler.completion_timestamp(created_at, due_date, &mut rng);
        assert!(completed_at >= created_at);
        assert!(completed_at <= now);
    }
}
