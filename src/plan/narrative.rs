// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Narrative Consistency Guard
//!
//! Two guards share the tables in this module:
//!
//! 1. [`sanitize_repeated_focus`] runs at extension time, when a base-block
//!    week is copied to fill an extended plan. A focus text that announces a
//!    phase ("Build Phase Begins") would read as nonsense the second time it
//!    appears, so registered texts are swapped for a continuation phrase.
//!    From the second repetition cycle onward a roman cycle qualifier is
//!    appended so very long plans never show two identical extended weeks.
//!
//! 2. [`sanitize_focus_for_phase`] runs at guide-rendering time and overrides
//!    any focus text that linguistically claims a different phase than the
//!    one the periodization calculator assigned to the week.
//!
//! Both guards read the same tables. They used to live in separate modules
//! and drifted; keeping one copy here is what guarantees the extension
//! output and the rendered guide agree.

use super::periodization::Phase;

/// Exact focus text → continuation phrase, applied when the week is reused
/// in an extended plan
const FOCUS_CONTINUATIONS: &[(&str, &str)] = &[
    ("Build Phase Begins", "Build Phase Continues"),
    ("Base Phase Begins", "Base Phase Continues"),
    ("Intensity Progression", "Sustained Intensity"),
    ("Peak Build Volume", "Extended Build Volume"),
    ("Aerobic Foundation", "Aerobic Consolidation"),
    ("Threshold Development", "Threshold Consolidation"),
];

/// Focus texts that linguistically imply a phase, keyed by that phase
const PHASE_IMPLYING_FOCUS: &[(Phase, &[&str])] = &[
    (
        Phase::Build,
        &[
            "Build Phase Begins",
            "Build Phase Continues",
            "Intensity Progression",
            "Peak Build Volume",
        ],
    ),
    (
        Phase::Peak,
        &["Peak Phase", "Race Specificity", "Final Quality"],
    ),
    (Phase::Taper, &["Taper Week", "Race Week"]),
];

/// Exact focus text → neutral replacement, used when the text conflicts with
/// the computed phase
const PHASE_FOCUS_OVERRIDES: &[(&str, &str)] = &[
    ("Build Phase Begins", "Progressive Volume"),
    ("Build Phase Continues", "Progressive Volume"),
    ("Intensity Progression", "Volume Progression"),
    ("Peak Build Volume", "Peak Base Volume"),
];

fn lookup(table: &[(&str, &str)], focus: &str) -> Option<String> {
    table
        .iter()
        .find(|(original, _)| *original == focus)
        .map(|(_, replacement)| (*replacement).to_string())
}

fn cycle_qualifier(cycle_index: u32) -> String {
    match cycle_index {
        1 => " II".to_string(),
        2 => " III".to_string(),
        3 => " IV".to_string(),
        n => format!(" {}", n + 1),
    }
}

/// Rewrite a copied week's focus text so reuse never produces a confusing
/// duplicate or a phase-beginning statement mid-plan.
///
/// `cycle_index` is the 0-based repetition cycle the copy belongs to: 0 for
/// the first pass through the pattern block, 1 for the second, and so on.
pub fn sanitize_repeated_focus(focus: &str, cycle_index: u32) -> String {
    let continued = lookup(FOCUS_CONTINUATIONS, focus).unwrap_or_else(|| focus.to_string());
    if cycle_index == 0 {
        continued
    } else {
        format!("{}{}", continued, cycle_qualifier(cycle_index))
    }
}

/// Override focus text that implies a different phase than the computed one.
///
/// A week labeled "Build Phase Begins" must never appear inside a computed
/// base or peak range. Registered texts get their neutral replacement;
/// unregistered conflicting texts fall back to softening "Build" to "Base".
pub fn sanitize_focus_for_phase(focus: &str, phase: Phase) -> String {
    for (implied, keywords) in PHASE_IMPLYING_FOCUS {
        // Taper wording is at home in the race week itself
        let compatible = *implied == phase || (phase == Phase::Race && *implied == Phase::Taper);
        if compatible {
            continue;
        }
        for keyword in *keywords {
            if focus.contains(keyword) {
                return lookup(PHASE_FOCUS_OVERRIDES, focus)
                    .unwrap_or_else(|| focus.replace("Build", "Base"));
            }
        }
    }
    focus.to_string()
}
