// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Lifecycle Touchpoint Scheduler
//!
//! Computes the automated check-in email schedule for a plan. Every date is
//! deterministic: offsets from the plan start, the race date, and the weeks
//! the periodization calculator flagged as recovery or FTP-test weeks. The
//! scheduler never re-derives recovery or phase logic of its own; it reads
//! [`PeriodizationFacts`] like every other consumer, which is what keeps the
//! emails agreeing with the guide and the workout files.
//!
//! Sending is out of scope here; the schedule is an artifact consumed by the
//! delivery system.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AthleteProfile, Classification};
use crate::plan::overview::week_start_date;
use crate::plan::PeriodizationFacts;

/// Lifecycle stage a touchpoint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchpointCategory {
    Onboarding,
    Training,
    Recovery,
    RacePrep,
    PostRace,
    Retention,
}

/// One scheduled check-in email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Touchpoint {
    pub id: String,
    pub category: TouchpointCategory,
    pub send_date: NaiveDate,
    pub subject: String,
    /// Pre-written HTML template name; content generation is out of scope
    pub template: String,
    pub sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
}

/// The full schedule artifact written next to the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchpointSchedule {
    pub athlete: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race_name: Option<String>,
    pub race_date: NaiveDate,
    pub plan_start: NaiveDate,
    pub plan_duration_weeks: u32,
    pub touchpoints: Vec<Touchpoint>,
}

fn touchpoint(
    id: impl Into<String>,
    category: TouchpointCategory,
    send_date: NaiveDate,
    subject: impl Into<String>,
    template: impl Into<String>,
) -> Touchpoint {
    Touchpoint {
        id: id.into(),
        category,
        send_date,
        subject: subject.into(),
        template: template.into(),
        sent: false,
        sent_at: None,
    }
}

fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .expect("date arithmetic stays in range")
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .expect("date arithmetic stays in range")
}

/// Build the full lifecycle schedule for one athlete.
///
/// Recovery-week and FTP-reminder entries are generated per flagged week;
/// the build-phase entry lands on the first build week from the shared
/// phase boundaries.
pub fn build_touchpoints(
    profile: &AthleteProfile,
    classification: &Classification,
    facts: &PeriodizationFacts,
) -> TouchpointSchedule {
    let plan_start = classification.plan_start_date;
    let race_date = classification.race_date;
    let race_name = classification
        .race_name
        .clone()
        .unwrap_or_else(|| "your race".to_string());

    let mut touchpoints = vec![
        touchpoint(
            "week_1_welcome",
            TouchpointCategory::Onboarding,
            days_after(plan_start, 2),
            "Your first week: here's what to focus on",
            "week_1_welcome",
        ),
        touchpoint(
            "week_2_checkin",
            TouchpointCategory::Onboarding,
            days_after(plan_start, 7),
            "How's week 1 going?",
            "week_2_checkin",
        ),
        touchpoint(
            "mid_plan",
            TouchpointCategory::Training,
            week_start_date(plan_start, (facts.plan_duration / 2).max(1)),
            "Halfway there: progress check",
            "mid_plan",
        ),
        touchpoint(
            "build_phase_start",
            TouchpointCategory::Training,
            week_start_date(plan_start, facts.build_start_week()),
            "Intensity increases this week",
            "build_phase_start",
        ),
        touchpoint(
            "race_month",
            TouchpointCategory::RacePrep,
            days_before(race_date, 28),
            "Race month: the work is done",
            "race_month",
        ),
        touchpoint(
            "race_week",
            TouchpointCategory::RacePrep,
            days_before(race_date, 7),
            format!("Race week: {race_name}"),
            "race_week",
        ),
        touchpoint(
            "race_day_morning",
            TouchpointCategory::RacePrep,
            race_date,
            "Go time. You're ready.",
            "race_day_morning",
        ),
        touchpoint(
            "post_race_3_days",
            TouchpointCategory::PostRace,
            days_after(race_date, 3),
            "How'd it go?",
            "post_race_3_days",
        ),
        touchpoint(
            "post_race_2_weeks",
            TouchpointCategory::PostRace,
            days_after(race_date, 14),
            "What's next?",
            "post_race_2_weeks",
        ),
        touchpoint(
            "season_planning",
            TouchpointCategory::Retention,
            days_after(race_date, 30),
            "Planning next season",
            "season_planning",
        ),
    ];

    for &week in &facts.recovery_weeks {
        touchpoints.push(touchpoint(
            format!("recovery_week_{week}"),
            TouchpointCategory::Recovery,
            week_start_date(plan_start, week),
            format!("Week {week} is a recovery week: trust the process"),
            "recovery_week",
        ));
    }

    // Week 1's test is covered by the welcome email
    for &week in facts.ftp_test_weeks.iter().filter(|&&w| w > 1) {
        touchpoints.push(touchpoint(
            format!("ftp_reminder_{week}"),
            TouchpointCategory::Training,
            days_before(week_start_date(plan_start, week), 2),
            format!("FTP test in week {week}: how to pace it"),
            "ftp_reminder",
        ));
    }

    touchpoints.sort_by(|a, b| a.send_date.cmp(&b.send_date).then(a.id.cmp(&b.id)));

    TouchpointSchedule {
        athlete: profile.name.clone(),
        email: profile.email.clone(),
        race_name: classification.race_name.clone(),
        race_date,
        plan_start,
        plan_duration_weeks: facts.plan_duration,
        touchpoints,
    }
}
