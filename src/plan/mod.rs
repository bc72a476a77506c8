// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Plan Engine
//!
//! The core transformation: select a base template, extend it to the target
//! duration, and derive the periodization facts every downstream generator
//! reads. All of it is pure and deterministic — two runs over the same
//! classification produce byte-identical plans and facts.

/// Template selection by tier and level
pub mod selector;

/// Base template extension to the target plan duration
pub mod extension;

/// Shared focus-text substitution tables and both narrative guards
pub mod narrative;

/// Phase boundaries, recovery weeks, and FTP test weeks
pub mod periodization;

/// Week-by-week overview rows for the guide renderer
pub mod overview;

pub use extension::extend_template;
pub use overview::{build_overview, WeekOverview};
pub use periodization::{periodization_facts, Phase, PeriodizationFacts};
pub use selector::{select_template, SelectedPlan};

/// Errors raised by the plan engine
///
/// The engine raises rather than degrades: there is no best-effort plan. A
/// configuration error means an unmapped or broken template catalog entry; an
/// invariant violation means the extension algorithm itself produced an
/// inconsistent result and the pipeline must halt.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// No template mapped or loadable for the athlete's classification
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An internal post-condition of the extension algorithm failed; this is
    /// a defect in the algorithm, never a recoverable condition
    #[error("plan invariant violated: {0}")]
    InvariantViolation(String),

    /// A template file could not be read from the catalog
    #[error("failed to read template '{name}': {source}")]
    TemplateRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A template file could not be parsed
    #[error("failed to parse template '{name}': {source}")]
    TemplateParse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
