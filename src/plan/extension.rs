// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Template Extension Algorithm
//!
//! Extends a hand-authored base template to the athlete's target duration
//! without inventing new content. The base sequence splits into a base block
//! (the first 8 weeks: two intro → build → recovery cycles) and a final
//! block (peak + taper, never altered in content, only renumbered).
//! Additional weeks are deep copies cycled out of the base block, renumbered
//! and run through the narrative guard so no copied week reads like a
//! confusing duplicate.
//!
//! For athletes on a 3-week recovery cadence the base block is reordered,
//! not just duplicated: its two embedded recovery weeks move to output
//! positions 3 and 6, turning the template's native every-4th-week rhythm
//! into an every-3rd-week rhythm with the same content.
//!
//! Extension never partially succeeds. Either the result satisfies every
//! structural invariant or the call fails with
//! [`PlanError::InvariantViolation`] — a partially extended plan is worse
//! than no plan.

use tracing::debug;

use super::narrative;
use super::PlanError;
use crate::constants::{plan, volume};
use crate::models::{PlanTemplate, WeekPlan};

/// New base-block order for a 3-week recovery cadence.
///
/// The native block carries recovery at positions 4 and 8 (indices 3 and 7).
/// This order lands them at positions 3 and 6 while the work weeks keep
/// their relative order.
const CADENCE_3_ORDER: [usize; 8] = [0, 1, 3, 2, 4, 7, 5, 6];

/// Extend `base` to exactly `target_weeks` weeks.
///
/// Returns the base unchanged (identity) when `target_weeks` does not exceed
/// the base length, so no downstream gate ever sees a template shorter than
/// its base.
pub fn extend_template(
    base: &PlanTemplate,
    target_weeks: usize,
    recovery_cadence: u8,
) -> Result<PlanTemplate, PlanError> {
    let base_count = base.weeks.len();
    if target_weeks <= base_count {
        return Ok(base.clone());
    }

    debug!(
        base_weeks = base_count,
        target_weeks, recovery_cadence, "extending base template"
    );

    let split = base_count.min(plan::BASE_BLOCK_WEEKS);
    let mut block: Vec<WeekPlan> = base.weeks[..split].to_vec();
    if recovery_cadence == 3 && block.len() == CADENCE_3_ORDER.len() {
        block = CADENCE_3_ORDER.iter().map(|&i| block[i].clone()).collect();
        for (position, week) in block.iter_mut().enumerate() {
            renumber_week(week, position as u32 + 1);
        }
    }

    // The pattern is the last `cadence` weeks of the block. The block ends
    // cadence-aligned (its final recovery week sits `cadence` weeks before
    // position 9), so plain tiling keeps the recovery rhythm across the
    // seam for both cadences.
    let pattern_len = (recovery_cadence as usize).clamp(1, block.len());
    let pattern: Vec<WeekPlan> = block[block.len() - pattern_len..].to_vec();

    let additional = target_weeks - base_count;
    let mut extra_weeks: Vec<WeekPlan> = Vec::with_capacity(additional);
    for i in 0..additional {
        let source = &pattern[i % pattern_len];
        let cycle_index = (i / pattern_len) as u32;
        let mut week = source.clone();

        week.focus = narrative::sanitize_repeated_focus(&source.focus, cycle_index);

        // Mild progression on the front half of the extension, never on a
        // recovery-volume source week.
        if i < additional / 2 && source.volume_percent > volume::RECOVERY_MAX_PERCENT {
            week.volume_percent = (source.volume_percent + volume::EXTENSION_STEP_PERCENT)
                .min(volume::EXTENSION_CAP_PERCENT);
        }

        renumber_week(&mut week, (split + 1 + i) as u32);
        extra_weeks.push(week);
    }

    // Final block: content and relative order preserved exactly, renumbered
    // to start right after the last additional week.
    let final_start = (split + additional) as u32 + 1;
    let mut final_block: Vec<WeekPlan> = base.weeks[split..].to_vec();
    for (offset, week) in final_block.iter_mut().enumerate() {
        let old_number = week.week_number;
        let new_number = final_start + offset as u32;
        week.focus = week
            .focus
            .replace(&format!("Week {old_number}"), &format!("Week {new_number}"));
        renumber_week(week, new_number);
    }

    let mut extended = PlanTemplate {
        plan_metadata: base.plan_metadata.clone(),
        weeks: Vec::with_capacity(target_weeks),
    };
    extended.weeks.extend(block);
    extended.weeks.extend(extra_weeks);
    extended.weeks.extend(final_block);
    extended.plan_metadata.duration_weeks = target_weeks as u32;

    validate_extended(&extended, target_weeks)?;
    Ok(extended)
}

/// Post-conditions: exact length and contiguous 1-based numbering, with
/// every slot carrying its owning week's number. A violation is a defect in
/// this algorithm, so halt rather than auto-repair.
fn validate_extended(extended: &PlanTemplate, target_weeks: usize) -> Result<(), PlanError> {
    if extended.weeks.len() != target_weeks {
        return Err(PlanError::InvariantViolation(format!(
            "extended plan has {} weeks, expected {}",
            extended.weeks.len(),
            target_weeks
        )));
    }
    for (index, week) in extended.weeks.iter().enumerate() {
        let expected = index as u32 + 1;
        if week.week_number != expected {
            return Err(PlanError::InvariantViolation(format!(
                "week at position {} is numbered {}",
                expected, week.week_number
            )));
        }
        for slot in &week.workouts {
            if slot.week_number != expected {
                return Err(PlanError::InvariantViolation(format!(
                    "slot '{}' in week {} carries stale week number {}",
                    slot.name, expected, slot.week_number
                )));
            }
        }
    }
    Ok(())
}

/// Renumber a week and every slot inside it, including the `W%02d` name
/// prefix, so no copied slot ever displays a stale week number.
fn renumber_week(week: &mut WeekPlan, new_number: u32) {
    week.week_number = new_number;
    for slot in &mut week.workouts {
        slot.week_number = new_number;
        slot.name = renumber_slot_name(&slot.name, new_number);
    }
}

fn renumber_slot_name(name: &str, week_number: u32) -> String {
    let bytes = name.as_bytes();
    if bytes.first() == Some(&b'W') {
        let digits = bytes[1..]
            .iter()
            .take(2)
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits > 0 {
            return format!("W{:02}{}", week_number, &name[1 + digits..]);
        }
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlanMetadata, WorkoutSlot};

    fn slot(week: u32, day: &str, session: &str) -> WorkoutSlot {
        WorkoutSlot {
            name: format!("W{week:02}_{day}_{session}"),
            description: format!("{session} session"),
            day: day.to_string(),
            week_number: week,
            structure: serde_json::Value::Null,
        }
    }

    fn week(number: u32, focus: &str, volume_percent: u32) -> WeekPlan {
        WeekPlan {
            week_number: number,
            focus: focus.to_string(),
            volume_percent,
            volume_hours: None,
            workouts: vec![
                slot(number, "Tue", "Intervals"),
                slot(number, "Sun", "Long_Ride"),
            ],
        }
    }

    /// 12-week base with native recovery at weeks 4 and 8
    fn base_template() -> PlanTemplate {
        PlanTemplate {
            plan_metadata: PlanMetadata {
                name: "Finisher Intermediate".to_string(),
                duration_weeks: 12,
                target_hours: Some("6-8".to_string()),
            },
            weeks: vec![
                week(1, "Aerobic Foundation", 70),
                week(2, "Base Endurance", 80),
                week(3, "Tempo Introduction", 85),
                week(4, "Recovery & Adaptation", 60),
                week(5, "Build Phase Begins", 85),
                week(6, "Threshold Development", 90),
                week(7, "Intensity Progression", 95),
                week(8, "Recovery & Adaptation", 60),
                week(9, "Peak Phase", 100),
                week(10, "Race Specificity", 90),
                week(11, "Taper Week", 70),
                week(12, "Race Week", 50),
            ],
        }
    }

    #[test]
    fn test_identity_when_target_equals_base() {
        let base = base_template();
        let extended = extend_template(&base, 12, 4).unwrap();
        assert_eq!(extended, base);
    }

    #[test]
    fn test_identity_when_target_is_shorter_than_base() {
        let base = base_template();
        let extended = extend_template(&base, 9, 4).unwrap();
        assert_eq!(extended, base);
    }

    #[test]
    fn test_extended_length_and_numbering() {
        let base = base_template();
        for target in 13..=24usize {
            for cadence in [3u8, 4] {
                let extended = extend_template(&base, target, cadence).unwrap();
                assert_eq!(extended.weeks.len(), target);
                assert_eq!(extended.plan_metadata.duration_weeks, target as u32);
                for (i, w) in extended.weeks.iter().enumerate() {
                    assert_eq!(w.week_number, i as u32 + 1);
                    for s in &w.workouts {
                        assert_eq!(s.week_number, w.week_number);
                        assert!(s.name.starts_with(&format!("W{:02}", w.week_number)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_cadence_four_recovery_rhythm() {
        let base = base_template();
        let extended = extend_template(&base, 20, 4).unwrap();
        let low: Vec<u32> = extended
            .weeks
            .iter()
            .filter(|w| w.volume_percent <= 65 && w.week_number <= 16)
            .map(|w| w.week_number)
            .collect();
        assert_eq!(low, vec![4, 8, 12, 16]);
    }

    #[test]
    fn test_cadence_three_reorders_base_block() {
        let base = base_template();
        let extended = extend_template(&base, 16, 3).unwrap();
        let low: Vec<u32> = extended
            .weeks
            .iter()
            .filter(|w| w.volume_percent <= 65 && w.week_number <= 12)
            .map(|w| w.week_number)
            .collect();
        assert_eq!(low, vec![3, 6, 9, 12]);
        // reorder keeps content, week 3 is the native recovery week
        assert_eq!(extended.weeks[2].focus, "Recovery & Adaptation");
        assert_eq!(extended.weeks[2].volume_percent, 60);
    }

    #[test]
    fn test_final_block_is_preserved_verbatim() {
        let base = base_template();
        let extended = extend_template(&base, 20, 4).unwrap();
        let final_block = &extended.weeks[16..];
        for (offset, week) in final_block.iter().enumerate() {
            let original = &base.weeks[8 + offset];
            assert_eq!(week.focus, original.focus);
            assert_eq!(week.volume_percent, original.volume_percent);
            assert_eq!(week.workouts.len(), original.workouts.len());
            for (copied, source) in week.workouts.iter().zip(&original.workouts) {
                assert_eq!(copied.description, source.description);
                assert_eq!(copied.day, source.day);
                assert_eq!(copied.structure, source.structure);
            }
        }
        assert_eq!(final_block[0].week_number, 17);
        assert_eq!(final_block[3].week_number, 20);
    }

    #[test]
    fn test_volume_progression_on_front_half_only() {
        let base = base_template();
        let extended = extend_template(&base, 20, 4).unwrap();
        // additional weeks are 9..=16, front half 9..=12
        assert_eq!(extended.weeks[8].volume_percent, 88); // week 9 from 85
        assert_eq!(extended.weeks[9].volume_percent, 93); // week 10 from 90
        assert_eq!(extended.weeks[10].volume_percent, 98); // week 11 from 95
        assert_eq!(extended.weeks[11].volume_percent, 60); // recovery source untouched
        assert_eq!(extended.weeks[12].volume_percent, 85); // back half unbumped
    }

    #[test]
    fn test_volume_progression_caps_at_105() {
        let mut base = base_template();
        base.weeks[6].volume_percent = 104;
        let extended = extend_template(&base, 20, 4).unwrap();
        assert_eq!(extended.weeks[10].volume_percent, 105);
    }

    #[test]
    fn test_copied_focus_passes_through_guard() {
        let base = base_template();
        let extended = extend_template(&base, 20, 4).unwrap();
        // week 9 copies week 5 "Build Phase Begins", first repetition cycle
        assert_eq!(extended.weeks[8].focus, "Build Phase Continues");
        // week 13 is the same source on the second cycle
        assert_eq!(extended.weeks[12].focus, "Build Phase Continues II");
    }

    #[test]
    fn test_non_recovery_focus_texts_are_unique() {
        let base = base_template();
        let extended = extend_template(&base, 24, 4).unwrap();
        let mut seen = std::collections::HashSet::new();
        for week in &extended.weeks {
            if week.volume_percent > 65 {
                assert!(
                    seen.insert(week.focus.clone()),
                    "duplicate focus: {}",
                    week.focus
                );
            }
        }
    }

    #[test]
    fn test_determinism() {
        let base = base_template();
        let a = extend_template(&base, 18, 3).unwrap();
        let b = extend_template(&base, 18, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_slot_name_renumbering() {
        assert_eq!(renumber_slot_name("W05_Tue_Intervals", 13), "W13_Tue_Intervals");
        assert_eq!(renumber_slot_name("W5_Sun_Long", 9), "W09_Sun_Long");
        assert_eq!(renumber_slot_name("Warmup_Drills", 9), "Warmup_Drills");
    }
}
