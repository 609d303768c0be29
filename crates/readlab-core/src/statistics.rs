//! Progress statistics over quiz-attempt histories.
//!
//! Everything here is a read-only function of the attempt set passed in:
//! nothing is persisted, and a summary has no lifecycle of its own.
//! Snapshot functions keep full `f64` precision; [`round2`] is applied
//! only when a [`ProgressSummary`] is built for display, so nested
//! aggregates never compound rounding error.

use std::collections::HashSet;

use chrono::{Datelike, Days, Local, NaiveDate, TimeZone, Weekday};
use serde::Serialize;

use crate::model::QuizAttempt;

/// Length of the weekly activity series.
pub const WEEK_LENGTH: usize = 7;

/// Full-precision rollup over a scoped attempt set (a mentor's cohort).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortSnapshot {
    pub attempt_count: usize,
    pub mean_score: f64,
}

/// Full-precision rollup for one learner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearnerSnapshot {
    pub attempt_count: usize,
    pub mean_score: f64,
    pub mean_speed: f64,
    pub mean_stutter: f64,
}

/// One entry of the weekly activity series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayScore {
    pub date: NaiveDate,
    /// Day-of-week label as shown on the dashboard.
    pub day: &'static str,
    pub score: f64,
}

/// Display-ready rollup: every mean is rounded here and nowhere earlier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub attempt_count: usize,
    pub mean_score: f64,
    pub mean_speed: f64,
    pub mean_stutter: f64,
    pub weekly: Vec<DayScore>,
}

/// Mean with the empty set defined as zero, never an error.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Rounds to 2 decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Snapshot over every attempt in the scope.
pub fn cohort_snapshot(attempts: &[QuizAttempt]) -> CohortSnapshot {
    CohortSnapshot {
        attempt_count: attempts.len(),
        mean_score: mean(attempts.iter().map(|a| a.score)),
    }
}

/// Snapshot scoped to one learner's attempts.
pub fn learner_snapshot(attempts: &[QuizAttempt], learner_id: u64) -> LearnerSnapshot {
    let scoped: Vec<&QuizAttempt> = attempts
        .iter()
        .filter(|a| a.learner_id == learner_id)
        .collect();
    LearnerSnapshot {
        attempt_count: scoped.len(),
        mean_score: mean(scoped.iter().map(|a| a.score)),
        mean_speed: mean(scoped.iter().map(|a| a.speed)),
        mean_stutter: mean(scoped.iter().map(|a| a.stutter)),
    }
}

/// Mean score per calendar day over the 7 days ending at `today`, oldest
/// first. Buckets are half-open local days in `tz`; a day with no
/// attempts scores zero. Always exactly [`WEEK_LENGTH`] entries.
pub fn weekly_activity_in<Tz: TimeZone>(
    attempts: &[QuizAttempt],
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DayScore> {
    (0..WEEK_LENGTH as u64)
        .rev()
        .map(|offset| {
            let date = today - Days::new(offset);
            let score = mean(
                attempts
                    .iter()
                    .filter(|a| a.taken_at.with_timezone(tz).date_naive() == date)
                    .map(|a| a.score),
            );
            DayScore {
                date,
                day: day_label(date.weekday()),
                score,
            }
        })
        .collect()
}

/// Weekly series ending today, bucketed by the system's local timezone.
pub fn weekly_activity(attempts: &[QuizAttempt]) -> Vec<DayScore> {
    weekly_activity_in(attempts, Local::now().date_naive(), &Local)
}

/// The latest `n` attempts, newest first.
pub fn recent(attempts: &[QuizAttempt], n: usize) -> Vec<&QuizAttempt> {
    let mut sorted: Vec<&QuizAttempt> = attempts.iter().collect();
    sorted.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
    sorted.truncate(n);
    sorted
}

/// Learners with at least one attempt in the scope. The full roster lives
/// outside this crate, so this counts activity, not enrollment.
pub fn distinct_learners(attempts: &[QuizAttempt]) -> usize {
    attempts
        .iter()
        .map(|a| a.learner_id)
        .collect::<HashSet<_>>()
        .len()
}

impl ProgressSummary {
    /// Learner-scoped summary with an explicit clock and timezone.
    pub fn for_learner_in<Tz: TimeZone>(
        attempts: &[QuizAttempt],
        learner_id: u64,
        today: NaiveDate,
        tz: &Tz,
    ) -> Self {
        let scoped: Vec<QuizAttempt> = attempts
            .iter()
            .filter(|a| a.learner_id == learner_id)
            .cloned()
            .collect();
        let snapshot = learner_snapshot(attempts, learner_id);
        let weekly = weekly_activity_in(&scoped, today, tz);
        Self::present(
            snapshot.attempt_count,
            snapshot.mean_score,
            snapshot.mean_speed,
            snapshot.mean_stutter,
            weekly,
        )
    }

    /// Learner-scoped summary ending today, local time.
    pub fn for_learner(attempts: &[QuizAttempt], learner_id: u64) -> Self {
        Self::for_learner_in(attempts, learner_id, Local::now().date_naive(), &Local)
    }

    /// Cohort-scoped summary with an explicit clock and timezone.
    pub fn for_cohort_in<Tz: TimeZone>(
        attempts: &[QuizAttempt],
        today: NaiveDate,
        tz: &Tz,
    ) -> Self {
        Self::present(
            attempts.len(),
            mean(attempts.iter().map(|a| a.score)),
            mean(attempts.iter().map(|a| a.speed)),
            mean(attempts.iter().map(|a| a.stutter)),
            weekly_activity_in(attempts, today, tz),
        )
    }

    /// Cohort-scoped summary ending today, local time.
    pub fn for_cohort(attempts: &[QuizAttempt]) -> Self {
        Self::for_cohort_in(attempts, Local::now().date_naive(), &Local)
    }

    /// The presentation boundary: the one place rounding happens.
    fn present(
        attempt_count: usize,
        mean_score: f64,
        mean_speed: f64,
        mean_stutter: f64,
        weekly: Vec<DayScore>,
    ) -> Self {
        Self {
            attempt_count,
            mean_score: round2(mean_score),
            mean_speed: round2(mean_speed),
            mean_stutter: round2(mean_stutter),
            weekly: weekly
                .into_iter()
                .map(|d| DayScore {
                    score: round2(d.score),
                    ..d
                })
                .collect(),
        }
    }
}

fn day_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use uuid::Uuid;

    fn attempt(learner_id: u64, taken_at: &str, score: f64) -> QuizAttempt {
        QuizAttempt {
            id: Uuid::new_v4(),
            learner_id,
            language: None,
            quiz_type: None,
            question_count: 0,
            word_length: 0,
            time_limit_secs: 0,
            taken_at: taken_at.parse().unwrap(),
            speed: 0.0,
            correctness: 0.0,
            stutter: 0.0,
            repetition: 0.0,
            pause: 0.0,
            pronunciation: 0.0,
            total_words: 0,
            comment: String::new(),
            score,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn empty_history_snapshots_are_all_zero() {
        let snapshot = cohort_snapshot(&[]);
        assert_eq!(snapshot.attempt_count, 0);
        assert_eq!(snapshot.mean_score, 0.0);

        let snapshot = learner_snapshot(&[], 1);
        assert_eq!(snapshot.attempt_count, 0);
        assert_eq!(snapshot.mean_score, 0.0);
        assert_eq!(snapshot.mean_speed, 0.0);
        assert_eq!(snapshot.mean_stutter, 0.0);
    }

    #[test]
    fn learner_snapshot_scopes_to_one_learner() {
        let mut a = attempt(1, "2026-08-01T10:00:00Z", 80.0);
        a.speed = 90.0;
        a.stutter = 2.0;
        let mut b = attempt(1, "2026-08-02T10:00:00Z", 60.0);
        b.speed = 110.0;
        b.stutter = 4.0;
        let other = attempt(2, "2026-08-02T10:00:00Z", 5.0);

        let snapshot = learner_snapshot(&[a, b, other], 1);
        assert_eq!(snapshot.attempt_count, 2);
        assert_eq!(snapshot.mean_score, 70.0);
        assert_eq!(snapshot.mean_speed, 100.0);
        assert_eq!(snapshot.mean_stutter, 3.0);
    }

    #[test]
    fn weekly_series_is_always_seven_days_oldest_first() {
        let series = weekly_activity_in(&[], today(), &Utc);
        assert_eq!(series.len(), WEEK_LENGTH);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(series[6].date, today());
        for window in series.windows(2) {
            assert!(window[0].date < window[1].date);
        }
        for entry in &series {
            assert_eq!(entry.score, 0.0);
        }
    }

    #[test]
    fn weekly_series_buckets_by_calendar_day() {
        // Attempts on the 2nd, 4th and 6th day of the window.
        let attempts = vec![
            attempt(1, "2026-08-02T08:00:00Z", 80.0),
            attempt(1, "2026-08-04T12:00:00Z", 60.0),
            attempt(1, "2026-08-06T20:00:00Z", 100.0),
        ];
        let series = weekly_activity_in(&attempts, today(), &Utc);
        let scores: Vec<f64> = series.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.0, 80.0, 0.0, 60.0, 0.0, 100.0, 0.0]);
    }

    #[test]
    fn weekly_series_averages_within_a_day_and_ignores_out_of_window() {
        let attempts = vec![
            attempt(1, "2026-08-07T09:00:00Z", 40.0),
            attempt(2, "2026-08-07T15:00:00Z", 60.0),
            // Before the window and after "today": both ignored.
            attempt(1, "2026-07-31T10:00:00Z", 10.0),
            attempt(1, "2026-08-08T10:00:00Z", 10.0),
        ];
        let series = weekly_activity_in(&attempts, today(), &Utc);
        assert_eq!(series[6].score, 50.0);
        assert_eq!(series.iter().filter(|d| d.score > 0.0).count(), 1);
    }

    #[test]
    fn weekly_series_labels_days_of_week() {
        // 2026-08-07 is a Friday.
        let series = weekly_activity_in(&[], today(), &Utc);
        let labels: Vec<&str> = series.iter().map(|d| d.day).collect();
        assert_eq!(labels, vec!["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"]);
    }

    #[test]
    fn weekly_bucketing_follows_the_given_timezone() {
        // 23:00 UTC on the 6th is already the 7th at UTC+2.
        let attempts = vec![attempt(1, "2026-08-06T23:00:00Z", 90.0)];
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let series = weekly_activity_in(&attempts, today(), &tz);
        assert_eq!(series[6].score, 90.0);
        assert_eq!(series[5].score, 0.0);

        let series = weekly_activity_in(&attempts, today(), &Utc);
        assert_eq!(series[5].score, 90.0);
        assert_eq!(series[6].score, 0.0);
    }

    #[test]
    fn recent_orders_newest_first_and_truncates() {
        let attempts = vec![
            attempt(1, "2026-08-01T10:00:00Z", 1.0),
            attempt(1, "2026-08-03T10:00:00Z", 3.0),
            attempt(1, "2026-08-02T10:00:00Z", 2.0),
        ];
        let latest = recent(&attempts, 2);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].score, 3.0);
        assert_eq!(latest[1].score, 2.0);
    }

    #[test]
    fn distinct_learners_counts_activity() {
        let attempts = vec![
            attempt(1, "2026-08-01T10:00:00Z", 1.0),
            attempt(2, "2026-08-01T11:00:00Z", 2.0),
            attempt(1, "2026-08-02T10:00:00Z", 3.0),
        ];
        assert_eq!(distinct_learners(&attempts), 2);
        assert_eq!(distinct_learners(&[]), 0);
    }

    #[test]
    fn summary_for_empty_history_is_numeric_zero() {
        let summary = ProgressSummary::for_learner_in(&[], 9, today(), &Utc);
        assert_eq!(summary.attempt_count, 0);
        assert_eq!(summary.mean_score, 0.0);
        assert_eq!(summary.mean_speed, 0.0);
        assert_eq!(summary.mean_stutter, 0.0);
        assert_eq!(summary.weekly.len(), WEEK_LENGTH);
    }

    #[test]
    fn rounding_happens_only_at_presentation() {
        // True mean of 0.25 and 0.375 is 0.3125 -> 0.31 displayed.
        // Rounding each value first (0.25, 0.38) would display 0.32.
        let attempts = vec![
            attempt(1, "2026-08-07T09:00:00Z", 0.25),
            attempt(1, "2026-08-07T10:00:00Z", 0.375),
        ];
        let summary = ProgressSummary::for_learner_in(&attempts, 1, today(), &Utc);
        assert_eq!(summary.mean_score, 0.31);

        let early = round2((round2(0.25) + round2(0.375)) / 2.0);
        assert_eq!(early, 0.32);
        assert_ne!(summary.mean_score, early);

        // The internal snapshot keeps full precision.
        assert_eq!(learner_snapshot(&attempts, 1).mean_score, 0.3125);
    }

    #[test]
    fn cohort_summary_covers_the_whole_scope() {
        let mut a = attempt(1, "2026-08-06T10:00:00Z", 80.0);
        a.speed = 100.0;
        let mut b = attempt(2, "2026-08-07T10:00:00Z", 60.0);
        b.speed = 50.0;
        let summary = ProgressSummary::for_cohort_in(&[a, b], today(), &Utc);
        assert_eq!(summary.attempt_count, 2);
        assert_eq!(summary.mean_score, 70.0);
        assert_eq!(summary.mean_speed, 75.0);
        assert_eq!(summary.weekly[5].score, 80.0);
        assert_eq!(summary.weekly[6].score, 60.0);
    }
}
