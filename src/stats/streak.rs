//! Current commit streak.
//!
//! The streak is the run of consecutive active calendar days ending at an
//! anchor: today when today has a commit, otherwise yesterday when yesterday
//! has one. With neither, the streak is zero, however long the older runs are.

use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakState {
    pub active_days: BTreeSet<NaiveDate>,
    pub today: NaiveDate,
}

impl StreakState {
    pub fn new(active_days: BTreeSet<NaiveDate>, today: NaiveDate) -> Self {
        Self { active_days, today }
    }

    pub fn current(&self) -> u32 {
        current_streak(&self.active_days, self.today)
    }
}

pub fn current_streak(active_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    if active_days.is_empty() {
        return 0;
    }

    let anchor = if active_days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if active_days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    let mut cursor = Some(anchor);
    while let Some(day) = cursor.filter(|d| active_days.contains(d)) {
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: (i32, u32, u32) = (2024, 3, 1);

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap()
    }

    /// Days given as offsets back from today (0 = today, 1 = yesterday, ...).
    fn days_ago(offsets: &[i64]) -> BTreeSet<NaiveDate> {
        offsets
            .iter()
            .map(|&n| today() - chrono::Duration::days(n))
            .collect()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(current_streak(&BTreeSet::new(), today()), 0);
    }

    #[test]
    fn only_today() {
        assert_eq!(current_streak(&days_ago(&[0]), today()), 1);
    }

    #[test]
    fn today_and_yesterday_then_gap() {
        assert_eq!(current_streak(&days_ago(&[0, 1, 3, 4]), today()), 2);
    }

    #[test]
    fn anchors_on_yesterday_when_today_is_idle() {
        assert_eq!(current_streak(&days_ago(&[1, 2]), today()), 2);
    }

    #[test]
    fn three_days_through_today() {
        assert_eq!(current_streak(&days_ago(&[2, 1, 0]), today()), 3);
    }

    #[test]
    fn stale_history_resets_to_zero() {
        assert_eq!(current_streak(&days_ago(&[3]), today()), 0);
        assert_eq!(current_streak(&days_ago(&[2, 3, 4, 5, 6]), today()), 0);
    }

    #[test]
    fn walk_crosses_month_and_leap_day() {
        // 2024-03-01 back through 2024-02-29 and 2024-02-28
        assert_eq!(current_streak(&days_ago(&[0, 1, 2, 4]), today()), 3);
        assert_eq!(today() - chrono::Duration::days(1), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn future_days_are_ignored() {
        assert_eq!(current_streak(&days_ago(&[-1, 0]), today()), 1);
        assert_eq!(current_streak(&days_ago(&[-2, -1]), today()), 0);
    }

    #[test]
    fn commit_today_extends_yesterdays_streak_by_one() {
        let mut days = days_ago(&[1, 2, 3]);
        let before = current_streak(&days, today());
        days.insert(today());
        assert_eq!(current_streak(&days, today()), before + 1);
    }

    #[test]
    fn streak_never_exceeds_active_days() {
        let days = days_ago(&[0, 1, 2, 3, 4, 10, 11]);
        let state = StreakState::new(days.clone(), today());
        assert_eq!(state.current(), 5);
        assert!(state.current() as usize <= days.len());
        assert_eq!(state.current(), state.current());
    }

    #[test]
    fn earliest_representable_day_terminates() {
        let first = NaiveDate::MIN;
        let days: BTreeSet<_> = [first, first.succ_opt().unwrap()].into_iter().collect();
        assert_eq!(current_streak(&days, first.succ_opt().unwrap()), 2);
    }
}
