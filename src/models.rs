// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Core data structures shared by every stage of the plan pipeline.
//!
//! ## Design Principles
//!
//! - **Read-only downstream**: once the extension algorithm has produced an
//!   extended [`PlanTemplate`], no consumer mutates it
//! - **Serializable**: every model round-trips through JSON; the template
//!   catalog on disk uses the same shapes
//! - **Opaque workout structure**: the interval structure block is carried
//!   as raw JSON and never interpreted by the engine
//!
//! ## Core Models
//!
//! - [`PlanTemplate`]: an ordered sequence of [`WeekPlan`] records, either a
//!   hand-authored base template or an extended plan
//! - [`WeekPlan`]: one week of training with its [`WorkoutSlot`]s
//! - [`AthleteProfile`]: normalized questionnaire input
//! - [`Classification`]: derived tier/level/duration facts, produced once by
//!   the classifier and consumed read-only everywhere else

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Athlete tier, derived from weekly training hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// 3-5 hours per week
    TimeCrunched,
    /// 5-10 hours per week, goal is to finish strong
    Finisher,
    /// 10-15 hours per week, racing for position
    Compete,
    /// 15+ hours per week, racing for the podium
    Podium,
}

impl Tier {
    /// Stable snake_case name, used in template keys and artifacts
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::TimeCrunched => "time_crunched",
            Tier::Finisher => "finisher",
            Tier::Compete => "compete",
            Tier::Podium => "podium",
        }
    }
}

/// Athlete experience level, derived from years of riding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    /// Age 50+ override regardless of experience
    Masters,
}

impl Level {
    /// Stable snake_case name, used in template keys and artifacts
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
            Level::Masters => "masters",
        }
    }
}

/// A single named training session inside one week
///
/// Slot names carry a `W%02d` week prefix (for example `W05_Tue_Intervals`)
/// that must always match the owning week's number; the extension algorithm
/// rewrites both together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSlot {
    /// Session name, prefixed with the owning week number
    pub name: String,
    /// Athlete-facing session description
    pub description: String,
    /// Week-relative day marker ("Tue", "Sat", ...)
    pub day: String,
    /// Owning week number; kept in sync with the containing [`WeekPlan`]
    pub week_number: u32,
    /// Opaque interval structure block, passed through untouched
    #[serde(default)]
    pub structure: serde_json::Value,
}

/// One week of a training plan
///
/// Invariant: `week_number` always equals the week's 1-based position in the
/// containing template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    /// 1-based position within the plan
    pub week_number: u32,
    /// Short descriptive label for the week's emphasis
    pub focus: String,
    /// Training load relative to the peak week (100 = peak)
    pub volume_percent: u32,
    /// Human-readable hours range for the week, if authored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_hours: Option<String>,
    /// Ordered sessions for the week
    #[serde(default)]
    pub workouts: Vec<WorkoutSlot>,
}

/// Template-level metadata carried alongside the week sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetadata {
    /// Human-readable template name
    pub name: String,
    /// Number of weeks; updated when a template is extended
    pub duration_weeks: u32,
    /// Weekly hours the template was designed around, if authored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_hours: Option<String>,
}

/// An ordered sequence of weeks: a hand-authored base template, or the
/// extended plan derived from one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTemplate {
    pub plan_metadata: PlanMetadata,
    pub weeks: Vec<WeekPlan>,
}

impl PlanTemplate {
    /// Number of weeks in the template
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }
}

/// The athlete's target race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceGoal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Race day
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

/// Normalized questionnaire input, produced by the upstream intake stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Questionnaire bracket such as "5-7" or "15+"
    pub weekly_hours: String,
    /// Questionnaire bracket such as "3-5 years"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_cycling: Option<String>,
    pub primary_race: RaceGoal,
}

/// Derived athlete classification
///
/// Produced once by [`crate::classify::classify_athlete`] and treated as
/// read-only by every downstream stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub tier: Tier,
    pub level: Level,
    /// Whole weeks between plan start and race day
    pub plan_weeks: u32,
    /// Target plan length the engine will produce
    pub plan_duration: u32,
    /// Recovery week every N weeks: 3 for 40+ athletes, 4 otherwise
    pub recovery_week_cadence: u8,
    /// Age 50+ masters override applied
    pub is_masters: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race_name: Option<String>,
    pub race_date: NaiveDate,
    /// First day of week 1 (the Monday after classification)
    pub plan_start_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_names_are_stable() {
        assert_eq!(Tier::TimeCrunched.as_str(), "time_crunched");
        assert_eq!(Tier::Podium.as_str(), "podium");
        assert_eq!(Level::Masters.as_str(), "masters");
    }

    #[test]
    fn test_week_plan_round_trips_through_json() {
        let week = WeekPlan {
            week_number: 5,
            focus: "Threshold Development".to_string(),
            volume_percent: 85,
            volume_hours: Some("6-8".to_string()),
            workouts: vec![WorkoutSlot {
                name: "W05_Tue_Intervals".to_string(),
                description: "4x8 min at threshold".to_string(),
                day: "Tue".to_string(),
                week_number: 5,
                structure: serde_json::json!({"intervals": [{"on": 480, "off": 240}]}),
            }],
        };

        let json = serde_json::to_string(&week).unwrap();
        let back: WeekPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, week);
    }

    #[test]
    fn test_workout_structure_defaults_to_null() {
        let slot: WorkoutSlot = serde_json::from_str(
            r#"{"name": "W01_Sun_Long_Ride", "description": "Easy endurance",
                "day": "Sun", "week_number": 1}"#,
        )
        .unwrap();
        assert!(slot.structure.is_null());
    }
}
