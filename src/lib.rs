// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Gravel Plan Engine
//!
//! Turns an athlete classification and a hand-authored base template into a
//! consistent N-week training plan, plus the derived periodization facts that
//! every downstream artifact generator (workout files, guide, methodology
//! document, lifecycle emails) reads independently.
//!
//! ## Features
//!
//! - **Template selection**: tier/level lookup with a short "Save My Race"
//!   variant for athletes inside eight weeks of race day
//! - **Template extension**: extends a 12-week base to up to 24 weeks while
//!   preserving the intro → build → peak → taper arc
//! - **Age-aware recovery cadence**: recovery weeks every 3rd or 4th week
//! - **Periodization facts**: one shared, pure calculator for phase
//!   boundaries, recovery weeks, and FTP test weeks
//! - **Quality gates**: structural validation that halts the pipeline before
//!   any artifact is delivered against a broken plan
//!
//! ## Architecture
//!
//! The engine is synchronous and free of I/O apart from loading template
//! JSON and writing artifacts. Every transformation is a pure function over
//! in-memory records: the workout generator, guide renderer, methodology
//! writer, and touchpoint scheduler must all derive identical facts from the
//! same extended template, so nothing here consults a clock, a random
//! source, or mutable shared state.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gravel_plan_engine::classify::classify_athlete;
//! use gravel_plan_engine::models::AthleteProfile;
//! use gravel_plan_engine::plan::{extend_template, periodization_facts, select_template};
//! use gravel_plan_engine::templates::TemplateLibrary;
//!
//! fn main() -> anyhow::Result<()> {
//!     let profile: AthleteProfile =
//!         serde_json::from_str(&std::fs::read_to_string("profile.json")?)?;
//!     let today = chrono::Utc::now().date_naive();
//!     let classification = classify_athlete(&profile, today)?;
//!
//!     let library = TemplateLibrary::new("plans");
//!     let selected = select_template(&library, &classification)?;
//!     let plan = extend_template(
//!         &selected.template,
//!         selected.plan_duration as usize,
//!         classification.recovery_week_cadence,
//!     )?;
//!     let facts = periodization_facts(&plan, &classification);
//!     println!("recovery weeks: {:?}", facts.recovery_weeks);
//!     Ok(())
//! }
//! ```

/// Core data models for templates, weeks, workouts, and classification
pub mod models;

/// Engine constants: volume thresholds, phase ratios, plan duration limits
pub mod constants;

/// Athlete classification from questionnaire profile data
pub mod classify;

/// Template catalog loading and startup exhaustiveness checks
pub mod templates;

/// Plan selection, extension, periodization, and narrative consistency
pub mod plan;

/// Lifecycle email touchpoint scheduling
pub mod touchpoints;

/// Structural quality gates that halt the pipeline on failure
pub mod gates;

/// Environment-based engine configuration
pub mod config;

/// Structured logging setup
pub mod logging;
