// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Periodization Facts Calculator
//!
//! Derives the facts every downstream generator needs from an extended
//! template: phase boundaries, the recovery-week set, and the FTP-test-week
//! set. The workout generator, guide renderer, methodology writer, and
//! touchpoint scheduler all call [`periodization_facts`] independently and
//! never communicate, so this module must be a pure function of its inputs:
//! no clock, no randomness, no caching across runs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::{ftp_test, phases, volume};
use crate::models::{Classification, PlanTemplate, WeekPlan};

/// Training phase of a week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Base,
    Build,
    Peak,
    Taper,
    /// The final week; overrides whatever the boundary formula would say
    Race,
}

impl Phase {
    /// Uppercase label used in guide tables and artifacts
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Base => "BASE",
            Phase::Build => "BUILD",
            Phase::Peak => "PEAK",
            Phase::Taper => "TAPER",
            Phase::Race => "RACE WEEK",
        }
    }
}

/// An inclusive week range belonging to one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRange {
    pub phase: Phase,
    pub start_week: u32,
    pub end_week: u32,
}

/// Everything a downstream generator may derive from the plan structure
///
/// Recomputed on demand, never cached across runs; two calls with the same
/// inputs yield identical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodizationFacts {
    pub plan_duration: u32,
    pub recovery_cadence: u8,
    /// Ordered phase boundaries covering weeks 1..=plan_duration
    pub phases: Vec<PhaseRange>,
    pub recovery_weeks: BTreeSet<u32>,
    pub ftp_test_weeks: BTreeSet<u32>,
}

impl PeriodizationFacts {
    /// Phase of a single week, with the race-week override applied
    pub fn week_phase(&self, week: u32) -> Phase {
        week_phase(week, self.plan_duration)
    }

    /// First week of the build phase
    pub fn build_start_week(&self) -> u32 {
        self.phases
            .iter()
            .find(|range| range.phase == Phase::Build)
            .map(|range| range.start_week)
            .unwrap_or(1)
    }
}

/// Phase boundaries for any plan duration.
///
/// Durations of 8 weeks or less use hand-tuned small-plan formulas. Longer
/// plans fix taper at the last 2 weeks and peak at the 2 before that, then
/// split the remainder 60/40 between base and build, base absorbing the
/// rounding remainder.
pub fn phase_boundaries(plan_duration: u32) -> Vec<PhaseRange> {
    if plan_duration <= 8 {
        return vec![
            PhaseRange {
                phase: Phase::Base,
                start_week: 1,
                end_week: 1.max(plan_duration.saturating_sub(4)),
            },
            PhaseRange {
                phase: Phase::Build,
                start_week: 2.max(plan_duration.saturating_sub(3)),
                end_week: 3.max(plan_duration.saturating_sub(2)),
            },
            PhaseRange {
                phase: Phase::Peak,
                start_week: 4.max(plan_duration.saturating_sub(1)),
                end_week: 4.max(plan_duration.saturating_sub(1)),
            },
            PhaseRange {
                phase: Phase::Taper,
                start_week: plan_duration,
                end_week: plan_duration,
            },
        ];
    }

    let remaining = plan_duration - phases::TAPER_WEEKS - phases::PEAK_WEEKS;
    let base_weeks = (f64::from(remaining) * phases::BASE_SHARE).round() as u32;
    let build_weeks = remaining - base_weeks;

    let base_end = base_weeks;
    let build_end = base_end + build_weeks;
    let peak_end = build_end + phases::PEAK_WEEKS;

    vec![
        PhaseRange {
            phase: Phase::Base,
            start_week: 1,
            end_week: base_end,
        },
        PhaseRange {
            phase: Phase::Build,
            start_week: base_end + 1,
            end_week: build_end,
        },
        PhaseRange {
            phase: Phase::Peak,
            start_week: build_end + 1,
            end_week: peak_end,
        },
        PhaseRange {
            phase: Phase::Taper,
            start_week: peak_end + 1,
            end_week: plan_duration,
        },
    ]
}

/// Phase of a single week. The final week is always the race week, whatever
/// the boundary formula would otherwise assign to it.
pub fn week_phase(week: u32, plan_duration: u32) -> Phase {
    if week == plan_duration {
        return Phase::Race;
    }
    for range in phase_boundaries(plan_duration) {
        if range.start_week <= week && week <= range.end_week {
            return range.phase;
        }
    }
    Phase::Taper
}

fn has_recovery_marker(focus: &str) -> bool {
    focus.to_lowercase().contains("recovery")
}

fn has_taper_or_race_marker(focus: &str) -> bool {
    let lower = focus.to_lowercase();
    lower.contains("taper") || lower.contains("race")
}

/// Recovery-week predicate.
///
/// A week is recovery when its focus says so, or when its volume is at or
/// below the recovery ceiling outside the closing weeks. Low volume inside
/// the final four weeks is taper, not recovery, and must not be
/// double-counted.
pub fn is_recovery_week(week: &WeekPlan, plan_duration: u32) -> bool {
    if has_recovery_marker(&week.focus) {
        return true;
    }
    week.volume_percent <= volume::RECOVERY_MAX_PERCENT
        && week.week_number + phases::TAPER_WINDOW_WEEKS <= plan_duration
        && !has_taper_or_race_marker(&week.focus)
}

/// FTP test weeks: week 1 always, then every 6th week, skipping anything
/// within 2 weeks of the end. There is no fitness test during taper or race
/// week.
pub fn ftp_test_weeks(plan_duration: u32) -> BTreeSet<u32> {
    let mut weeks = BTreeSet::new();
    weeks.insert(1);
    let mut week = 1 + ftp_test::INTERVAL_WEEKS;
    while week <= plan_duration {
        if plan_duration - week > ftp_test::END_EXCLUSION_WEEKS {
            weeks.insert(week);
        }
        week += ftp_test::INTERVAL_WEEKS;
    }
    weeks
}

/// Derive [`PeriodizationFacts`] from an extended template and the athlete's
/// classification. Pure: call it as many times as you like.
pub fn periodization_facts(
    template: &PlanTemplate,
    classification: &Classification,
) -> PeriodizationFacts {
    let plan_duration = template.weeks.len() as u32;
    let recovery_weeks = template
        .weeks
        .iter()
        .filter(|week| is_recovery_week(week, plan_duration))
        .map(|week| week.week_number)
        .collect();

    PeriodizationFacts {
        plan_duration,
        recovery_cadence: classification.recovery_week_cadence,
        phases: phase_boundaries(plan_duration),
        recovery_weeks,
        ftp_test_weeks: ftp_test_weeks(plan_duration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(number: u32, focus: &str, volume: u32) -> WeekPlan {
        WeekPlan {
            week_number: number,
            focus: focus.to_string(),
            volume_percent: volume,
            volume_hours: None,
            workouts: Vec::new(),
        }
    }

    #[test]
    fn test_boundaries_for_twelve_weeks() {
        let bounds = phase_boundaries(12);
        assert_eq!(bounds[0].start_week, 1);
        assert_eq!(bounds[0].end_week, 5);
        assert_eq!(bounds[1].start_week, 6);
        assert_eq!(bounds[1].end_week, 8);
        assert_eq!(bounds[2].start_week, 9);
        assert_eq!(bounds[2].end_week, 10);
        assert_eq!(bounds[3].start_week, 11);
        assert_eq!(bounds[3].end_week, 12);
    }

    #[test]
    fn test_boundaries_for_twenty_weeks() {
        let bounds = phase_boundaries(20);
        assert_eq!(bounds[0].end_week, 10);
        assert_eq!(bounds[1].end_week, 16);
        assert_eq!(bounds[2].end_week, 18);
        assert_eq!(bounds[3].end_week, 20);
    }

    #[test]
    fn test_boundaries_cover_every_week_without_gaps() {
        for duration in 6..=24u32 {
            let bounds = phase_boundaries(duration);
            assert_eq!(bounds[0].start_week, 1);
            assert_eq!(bounds.last().unwrap().end_week, duration);
            if duration >= 9 {
                for pair in bounds.windows(2) {
                    assert_eq!(pair[1].start_week, pair[0].end_week + 1);
                }
            }
        }
    }

    #[test]
    fn test_final_week_is_always_race() {
        for duration in 6..=24u32 {
            assert_eq!(week_phase(duration, duration), Phase::Race);
        }
        assert_eq!(week_phase(1, 12), Phase::Base);
        assert_eq!(week_phase(7, 12), Phase::Build);
        assert_eq!(week_phase(9, 12), Phase::Peak);
        assert_eq!(week_phase(11, 12), Phase::Taper);
    }

    #[test]
    fn test_recovery_marker_in_focus_wins() {
        assert!(is_recovery_week(&week(2, "Recovery & Adaptation", 90), 16));
    }

    #[test]
    fn test_low_volume_counts_as_recovery_outside_taper() {
        assert!(is_recovery_week(&week(4, "Easy Week", 60), 16));
        // same volume inside the final four weeks is taper, not recovery
        assert!(!is_recovery_week(&week(14, "Sharpen Up", 60), 16));
        assert!(!is_recovery_week(&week(4, "Mini Taper Test", 60), 16));
    }

    #[test]
    fn test_ftp_test_weeks_schedule() {
        assert_eq!(ftp_test_weeks(12), BTreeSet::from([1, 7]));
        assert_eq!(ftp_test_weeks(16), BTreeSet::from([1, 7, 13]));
        // week 19 would fall within two weeks of the end of a 20-week plan
        assert_eq!(ftp_test_weeks(20), BTreeSet::from([1, 7, 13]));
        assert_eq!(ftp_test_weeks(24), BTreeSet::from([1, 7, 13, 19]));
        assert_eq!(ftp_test_weeks(6), BTreeSet::from([1]));
    }

    #[test]
    fn test_ftp_tests_never_land_near_the_end() {
        for duration in 6..=24u32 {
            for test_week in ftp_test_weeks(duration) {
                assert!(
                    test_week == 1 || duration - test_week > 2,
                    "duration {duration} scheduled a test at week {test_week}"
                );
            }
        }
    }
}
