// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Template Selector
//!
//! Maps an athlete's (tier, level) pair to a base template, with a short
//! "Save My Race" variant for athletes inside eight weeks of race day. The
//! mapping is an explicit enumerated table checked at startup; an unmapped
//! pair is a fatal configuration error, never a silent fallback — guessing a
//! template for an unmapped combination would quietly mis-train an athlete.

use tracing::info;

use super::PlanError;
use crate::constants::plan;
use crate::models::{Classification, Level, PlanTemplate, Tier};
use crate::templates::TemplateLibrary;

/// (tier, level) → template name. Podium riders below advanced have no
/// mapped template on purpose.
pub const TEMPLATE_MAP: &[((Tier, Level), &str)] = &[
    ((Tier::TimeCrunched, Level::Beginner), "time_crunched_beginner"),
    (
        (Tier::TimeCrunched, Level::Intermediate),
        "time_crunched_intermediate",
    ),
    ((Tier::TimeCrunched, Level::Masters), "time_crunched_masters"),
    ((Tier::Finisher, Level::Beginner), "finisher_beginner"),
    ((Tier::Finisher, Level::Intermediate), "finisher_intermediate"),
    ((Tier::Finisher, Level::Advanced), "finisher_advanced"),
    ((Tier::Finisher, Level::Masters), "finisher_masters"),
    ((Tier::Compete, Level::Intermediate), "compete_intermediate"),
    ((Tier::Compete, Level::Advanced), "compete_advanced"),
    ((Tier::Compete, Level::Masters), "compete_masters"),
    ((Tier::Podium, Level::Advanced), "podium_advanced"),
];

/// Tier → short-notice template name. Podium has no short variant.
pub const SAVE_MY_RACE_MAP: &[(Tier, &str)] = &[
    (Tier::TimeCrunched, "time_crunched_save_my_race"),
    (Tier::Finisher, "finisher_save_my_race"),
    (Tier::Compete, "compete_save_my_race"),
];

/// A resolved base template plus the duration the plan will actually have
#[derive(Debug, Clone)]
pub struct SelectedPlan {
    /// The loaded base template
    pub template: PlanTemplate,
    /// Catalog name the template came from
    pub template_name: String,
    /// "tier_level" key recorded in artifacts
    pub template_key: String,
    /// Final target duration: the requested duration, or 6 when the Save My
    /// Race variant was forced
    pub plan_duration: u32,
    /// Whether the short-notice variant was selected
    pub save_my_race: bool,
}

/// Look up the template name for a (tier, level) pair
pub fn template_name_for(tier: Tier, level: Level) -> Option<&'static str> {
    TEMPLATE_MAP
        .iter()
        .find(|((t, l), _)| *t == tier && *l == level)
        .map(|(_, name)| *name)
}

/// Look up the Save My Race variant for a tier
pub fn save_my_race_name_for(tier: Tier) -> Option<&'static str> {
    SAVE_MY_RACE_MAP
        .iter()
        .find(|(t, _)| *t == tier)
        .map(|(_, name)| *name)
}

/// Select and load the base template for a classification.
///
/// With `plan_weeks` at or below the short-notice threshold and a Save My
/// Race variant available for the tier, the variant is selected and the
/// duration forced to 6 — the runway is too short for the full template to
/// matter. Otherwise the (tier, level) mapping decides, and an unmapped pair
/// fails with [`PlanError::Configuration`].
pub fn select_template(
    library: &TemplateLibrary,
    classification: &Classification,
) -> Result<SelectedPlan, PlanError> {
    let tier = classification.tier;
    let level = classification.level;

    let (template_name, plan_duration, save_my_race) = if classification.plan_weeks
        <= plan::SAVE_MY_RACE_THRESHOLD_WEEKS
        && save_my_race_name_for(tier).is_some()
    {
        let name = save_my_race_name_for(tier).expect("checked above");
        (name, plan::SAVE_MY_RACE_WEEKS, true)
    } else {
        let name = template_name_for(tier, level).ok_or_else(|| {
            PlanError::Configuration(format!(
                "no template mapped for tier={}, level={}",
                tier.as_str(),
                level.as_str()
            ))
        })?;
        (name, classification.plan_duration, false)
    };

    let template = library.load(template_name)?;
    info!(
        template = template_name,
        plan_duration, save_my_race, "selected base template"
    );

    Ok(SelectedPlan {
        template,
        template_name: template_name.to_string(),
        template_key: format!("{}_{}", tier.as_str(), level.as_str()),
        plan_duration,
        save_my_race,
    })
}
