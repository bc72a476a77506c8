// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Athlete Classification
//!
//! Derives tier, level, plan length, and recovery cadence from a normalized
//! questionnaire profile. Classification runs once per athlete; everything
//! downstream treats the result as read-only. The function takes `today` as
//! an argument rather than reading a clock, so the whole pipeline stays
//! reproducible for a given input.

use chrono::{Datelike, Days, NaiveDate};
use tracing::info;

use crate::constants::{age, plan};
use crate::models::{AthleteProfile, Classification, Level, Tier};
use crate::plan::PlanError;

/// Questionnaire weekly-hours bracket → tier
const TIER_MAP: &[(&str, Tier)] = &[
    ("3-5", Tier::TimeCrunched),
    ("5-7", Tier::Finisher),
    ("7-10", Tier::Finisher),
    ("10-12", Tier::Compete),
    ("12-15", Tier::Compete),
    ("15+", Tier::Podium),
];

/// Questionnaire years-riding bracket → base level
const LEVEL_MAP: &[(&str, Level)] = &[
    ("<1 year", Level::Beginner),
    ("1-2 years", Level::Beginner),
    ("3-5 years", Level::Intermediate),
    ("5-10 years", Level::Advanced),
    ("10+ years", Level::Advanced),
];

fn tier_for(weekly_hours: &str) -> Tier {
    TIER_MAP
        .iter()
        .find(|(bracket, _)| *bracket == weekly_hours)
        .map(|(_, tier)| *tier)
        .unwrap_or(Tier::Finisher)
}

fn level_for(years_cycling: Option<&str>) -> Level {
    years_cycling
        .and_then(|years| {
            LEVEL_MAP
                .iter()
                .find(|(bracket, _)| *bracket == years)
                .map(|(_, level)| *level)
        })
        .unwrap_or(Level::Intermediate)
}

/// First Monday strictly after `today`; plans always start on a Monday.
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = 7 - u64::from(today.weekday().num_days_from_monday());
    today
        .checked_add_days(Days::new(days_ahead))
        .expect("date arithmetic stays in range")
}

/// Derive a [`Classification`] from a profile.
///
/// Fails with [`PlanError::Configuration`] when the race is closer than the
/// shortest plan the engine can produce — there is no best-effort plan for
/// an athlete who signed up too late.
pub fn classify_athlete(
    profile: &AthleteProfile,
    today: NaiveDate,
) -> Result<Classification, PlanError> {
    let tier = tier_for(&profile.weekly_hours);
    let mut level = level_for(profile.years_cycling.as_deref());

    // Finisher-tier athletes are here to finish; advanced programming would
    // outpace the goal.
    if tier == Tier::Finisher && level == Level::Advanced {
        level = Level::Intermediate;
    }

    let is_masters = profile.age.is_some_and(|a| a >= age::MASTERS_AGE);
    if is_masters {
        level = Level::Masters;
    }

    let recovery_week_cadence = if profile.age.is_some_and(|a| a >= age::ACCELERATED_RECOVERY_AGE)
    {
        3
    } else {
        4
    };

    let plan_start_date = next_monday(today);
    let weeks_to_race = (profile.primary_race.date - plan_start_date).num_days() / 7;
    if weeks_to_race < i64::from(plan::MIN_PLAN_WEEKS) {
        return Err(PlanError::Configuration(format!(
            "race on {} is only {} whole weeks after plan start {}; minimum is {}",
            profile.primary_race.date,
            weeks_to_race,
            plan_start_date,
            plan::MIN_PLAN_WEEKS
        )));
    }
    let plan_weeks = (weeks_to_race as u32).min(plan::MAX_PLAN_WEEKS);

    // Short runways round up to the base template length; tiers with a
    // Save My Race variant get shortened to 6 weeks at selection instead.
    // The extension identity case returns the base unchanged when the
    // target does not exceed it.
    let plan_duration = plan_weeks.max(plan::STANDARD_TEMPLATE_WEEKS);

    let classification = Classification {
        tier,
        level,
        plan_weeks,
        plan_duration,
        recovery_week_cadence,
        is_masters,
        race_name: profile.primary_race.name.clone(),
        race_date: profile.primary_race.date,
        plan_start_date,
    };
    info!(
        tier = tier.as_str(),
        level = level.as_str(),
        plan_weeks,
        plan_duration,
        recovery_week_cadence,
        "classified athlete"
    );
    Ok(classification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RaceGoal;

    fn profile(age: Option<u32>, weekly_hours: &str, years: &str, race_date: &str) -> AthleteProfile {
        AthleteProfile {
            name: "Test Athlete".to_string(),
            email: "athlete@example.com".to_string(),
            age,
            weekly_hours: weekly_hours.to_string(),
            years_cycling: Some(years.to_string()),
            primary_race: RaceGoal {
                name: Some("Gravel Worlds".to_string()),
                date: race_date.parse().unwrap(),
                distance_miles: Some(150.0),
            },
        }
    }

    fn wednesday() -> NaiveDate {
        // 2026-01-07 is a Wednesday
        NaiveDate::from_ymd_opt(2026, 1, 7).unwrap()
    }

    #[test]
    fn test_next_monday_is_strictly_after_today() {
        let monday = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(next_monday(monday), NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
        assert_eq!(next_monday(wednesday()), NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
    }

    #[test]
    fn test_tier_and_level_derivation() {
        let c = classify_athlete(&profile(Some(30), "3-5", "1-2 years", "2026-06-06"), wednesday())
            .unwrap();
        assert_eq!(c.tier, Tier::TimeCrunched);
        assert_eq!(c.level, Level::Beginner);
        assert_eq!(c.recovery_week_cadence, 4);
        assert!(!c.is_masters);
    }

    #[test]
    fn test_finisher_advanced_downgrades_to_intermediate() {
        let c = classify_athlete(&profile(Some(30), "5-7", "10+ years", "2026-06-06"), wednesday())
            .unwrap();
        assert_eq!(c.tier, Tier::Finisher);
        assert_eq!(c.level, Level::Intermediate);
    }

    #[test]
    fn test_masters_override_and_cadence() {
        let c = classify_athlete(&profile(Some(54), "10-12", "10+ years", "2026-06-06"), wednesday())
            .unwrap();
        assert_eq!(c.level, Level::Masters);
        assert!(c.is_masters);
        assert_eq!(c.recovery_week_cadence, 3);
    }

    #[test]
    fn test_forty_plus_gets_three_week_cadence_without_masters() {
        let c = classify_athlete(&profile(Some(43), "5-7", "3-5 years", "2026-06-06"), wednesday())
            .unwrap();
        assert_eq!(c.recovery_week_cadence, 3);
        assert!(!c.is_masters);
        assert_eq!(c.level, Level::Intermediate);
    }

    #[test]
    fn test_plan_weeks_counted_from_next_monday() {
        // next Monday is 2026-01-12; 2026-06-06 is 145 days out = 20 weeks
        let c = classify_athlete(&profile(Some(30), "5-7", "3-5 years", "2026-06-06"), wednesday())
            .unwrap();
        assert_eq!(c.plan_start_date, NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
        assert_eq!(c.plan_weeks, 20);
        assert_eq!(c.plan_duration, 20);
    }

    #[test]
    fn test_short_runway_rounds_up_to_base_length() {
        // 2026-03-28 is 75 days after 2026-01-12 = 10 whole weeks
        let c = classify_athlete(&profile(Some(30), "5-7", "3-5 years", "2026-03-28"), wednesday())
            .unwrap();
        assert_eq!(c.plan_weeks, 10);
        assert_eq!(c.plan_duration, 12);
    }

    #[test]
    fn test_very_short_runway_keeps_actual_weeks_but_rounds_duration() {
        // 2026-03-07 is 54 days after 2026-01-12 = 7 whole weeks
        let c = classify_athlete(&profile(Some(30), "5-7", "3-5 years", "2026-03-07"), wednesday())
            .unwrap();
        assert_eq!(c.plan_weeks, 7);
        assert_eq!(c.plan_duration, 12);
    }

    #[test]
    fn test_distant_race_caps_at_twenty_four_weeks() {
        let c = classify_athlete(&profile(Some(30), "12-15", "5-10 years", "2027-06-06"), wednesday())
            .unwrap();
        assert_eq!(c.plan_weeks, 24);
        assert_eq!(c.plan_duration, 24);
    }

    #[test]
    fn test_race_too_soon_is_a_configuration_error() {
        let result =
            classify_athlete(&profile(Some(30), "5-7", "3-5 years", "2026-02-01"), wednesday());
        assert!(matches!(result, Err(PlanError::Configuration(_))));
    }

    #[test]
    fn test_determinism_in_today() {
        let p = profile(Some(47), "10-12", "5-10 years", "2026-06-06");
        let a = classify_athlete(&p, wednesday()).unwrap();
        let b = classify_athlete(&p, wednesday()).unwrap();
        assert_eq!(a, b);
    }
}
