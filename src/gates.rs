// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Quality Gates
//!
//! Numbered structural checks that run after plan generation and before any
//! artifact leaves the pipeline. The first failing gate halts everything:
//! downstream artifacts must never ship against a plan that failed
//! validation, and there is no partial delivery.
//!
//! The gates assert structure (week counts, contiguous numbering, fact
//! consistency), not content quality. Content gates for rendered guides and
//! workout files live with their generators.

use tracing::{error, info};

use crate::models::{Classification, PlanTemplate};
use crate::plan::PeriodizationFacts;
use crate::touchpoints::TouchpointSchedule;

/// A failed gate, identified by number and name
#[derive(Debug, thiserror::Error)]
#[error("gate {gate} ({name}) failed: {message}")]
pub struct GateFailure {
    pub gate: u8,
    pub name: &'static str,
    pub message: String,
}

/// Run every structural gate in order, halting on the first failure.
pub fn run_gates(
    classification: &Classification,
    expected_weeks: u32,
    plan: &PlanTemplate,
    facts: &PeriodizationFacts,
    touchpoints: &TouchpointSchedule,
) -> Result<(), GateFailure> {
    let gates: [(u8, &'static str, Result<(), String>); 4] = [
        (1, "classification", gate_classification(classification)),
        (2, "plan_structure", gate_plan_structure(plan, expected_weeks)),
        (3, "periodization", gate_periodization(plan, facts)),
        (4, "touchpoints", gate_touchpoints(classification, facts, touchpoints)),
    ];

    for (gate, name, outcome) in gates {
        match outcome {
            Ok(()) => info!(gate, name, "gate passed"),
            Err(message) => {
                error!(gate, name, %message, "gate failed, halting pipeline");
                return Err(GateFailure { gate, name, message });
            }
        }
    }
    Ok(())
}

fn gate_classification(classification: &Classification) -> Result<(), String> {
    let duration = classification.plan_duration;
    if !(6..=24).contains(&classification.plan_weeks) {
        return Err(format!(
            "plan_weeks {} out of range [6, 24]",
            classification.plan_weeks
        ));
    }
    if !(6..=24).contains(&duration) {
        return Err(format!("plan_duration {duration} out of range [6, 24]"));
    }
    if ![3, 4].contains(&classification.recovery_week_cadence) {
        return Err(format!(
            "recovery cadence {} is neither 3 nor 4",
            classification.recovery_week_cadence
        ));
    }
    if classification.race_date <= classification.plan_start_date {
        return Err(format!(
            "race date {} is not after plan start {}",
            classification.race_date, classification.plan_start_date
        ));
    }
    Ok(())
}

fn gate_plan_structure(plan: &PlanTemplate, expected_weeks: u32) -> Result<(), String> {
    if plan.weeks.len() as u32 != expected_weeks {
        return Err(format!(
            "plan has {} weeks, expected {}",
            plan.weeks.len(),
            expected_weeks
        ));
    }
    for (index, week) in plan.weeks.iter().enumerate() {
        let expected = index as u32 + 1;
        if week.week_number != expected {
            return Err(format!(
                "week at position {} is numbered {} (orphaned or duplicate numbering)",
                expected, week.week_number
            ));
        }
        if week.workouts.is_empty() {
            return Err(format!("week {expected} has no workout slots"));
        }
        for slot in &week.workouts {
            if slot.week_number != expected {
                return Err(format!(
                    "slot '{}' in week {} carries week number {}",
                    slot.name, expected, slot.week_number
                ));
            }
            if let Some(prefix_week) = slot_name_week(&slot.name) {
                if prefix_week != expected {
                    return Err(format!(
                        "slot '{}' in week {} displays a stale week prefix",
                        slot.name, expected
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Week number from a `W%02d` slot-name prefix, if the name carries one
fn slot_name_week(name: &str) -> Option<u32> {
    let digits: String = name
        .strip_prefix('W')?
        .chars()
        .take(2)
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

fn gate_periodization(plan: &PlanTemplate, facts: &PeriodizationFacts) -> Result<(), String> {
    let duration = plan.weeks.len() as u32;
    if facts.plan_duration != duration {
        return Err(format!(
            "facts computed for {} weeks but plan has {}",
            facts.plan_duration, duration
        ));
    }
    for &week in &facts.recovery_weeks {
        if !(1..=duration).contains(&week) {
            return Err(format!("recovery week {week} outside plan"));
        }
    }
    if !facts.ftp_test_weeks.contains(&1) {
        return Err("week 1 is not an FTP test week".to_string());
    }
    for &week in &facts.ftp_test_weeks {
        if !(1..=duration).contains(&week) {
            return Err(format!("FTP test week {week} outside plan"));
        }
        if week != 1 && duration - week <= 2 {
            return Err(format!(
                "FTP test at week {week} falls within two weeks of the end"
            ));
        }
    }
    let Some(first) = facts.phases.first() else {
        return Err("no phase boundaries".to_string());
    };
    let Some(last) = facts.phases.last() else {
        return Err("no phase boundaries".to_string());
    };
    if first.start_week != 1 || last.end_week != duration {
        return Err(format!(
            "phase boundaries span {}..{} instead of 1..{}",
            first.start_week, last.end_week, duration
        ));
    }
    Ok(())
}

fn gate_touchpoints(
    classification: &Classification,
    facts: &PeriodizationFacts,
    schedule: &TouchpointSchedule,
) -> Result<(), String> {
    if schedule.plan_duration_weeks != facts.plan_duration {
        return Err(format!(
            "schedule covers {} weeks but facts cover {}",
            schedule.plan_duration_weeks, facts.plan_duration
        ));
    }
    for pair in schedule.touchpoints.windows(2) {
        if pair[0].send_date > pair[1].send_date {
            return Err(format!(
                "touchpoints '{}' and '{}' are out of order",
                pair[0].id, pair[1].id
            ));
        }
    }
    let recovery_entries = schedule
        .touchpoints
        .iter()
        .filter(|t| t.id.starts_with("recovery_week_"))
        .count();
    if recovery_entries != facts.recovery_weeks.len() {
        return Err(format!(
            "{} recovery touchpoints for {} recovery weeks",
            recovery_entries,
            facts.recovery_weeks.len()
        ));
    }
    if let Some(race_week) = schedule.touchpoints.iter().find(|t| t.id == "race_week") {
        let days_out = (classification.race_date - race_week.send_date).num_days();
        if !(5..=9).contains(&days_out) {
            return Err(format!(
                "race week touchpoint is {days_out} days before the race, expected about 7"
            ));
        }
    }
    Ok(())
}
