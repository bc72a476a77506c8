// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Week-by-Week Overview
//!
//! Read-only rows for the guide renderer's week-by-week table and phase
//! progression section. The phase label, recovery marker, and FTP marker in
//! every row come from the shared periodization facts, and the render-time
//! narrative guard runs here — so the table can never disagree with the
//! phase calendar printed two sections earlier.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::narrative;
use super::periodization::{Phase, PeriodizationFacts};
use crate::models::{Classification, PlanTemplate};

/// One row of the guide's week-by-week table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekOverview {
    pub week_number: u32,
    pub phase: Phase,
    /// Uppercase phase label as rendered
    pub phase_label: String,
    /// Focus text after the phase-conflict guard
    pub focus: String,
    pub volume_percent: u32,
    pub is_recovery: bool,
    pub is_ftp_test: bool,
    /// Monday the week starts on
    pub start_date: NaiveDate,
}

/// First day of a 1-based plan week
pub fn week_start_date(plan_start_date: NaiveDate, week_number: u32) -> NaiveDate {
    plan_start_date
        .checked_add_days(Days::new(u64::from(week_number - 1) * 7))
        .expect("date arithmetic stays in range")
}

/// Build the overview rows for an extended template.
///
/// Pure function of its inputs; every consumer that renders week facts goes
/// through here rather than re-deriving phase or recovery logic locally.
pub fn build_overview(
    template: &PlanTemplate,
    classification: &Classification,
    facts: &PeriodizationFacts,
) -> Vec<WeekOverview> {
    template
        .weeks
        .iter()
        .map(|week| {
            let phase = facts.week_phase(week.week_number);
            WeekOverview {
                week_number: week.week_number,
                phase,
                phase_label: phase.label().to_string(),
                focus: narrative::sanitize_focus_for_phase(&week.focus, phase),
                volume_percent: week.volume_percent,
                is_recovery: facts.recovery_weeks.contains(&week.week_number),
                is_ftp_test: facts.ftp_test_weeks.contains(&week.week_number),
                start_date: week_start_date(classification.plan_start_date, week.week_number),
            }
        })
        .collect()
}
