// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Named engine constants. Everything the extension algorithm, the
//! periodization calculator, and the classifier agree on lives here so no
//! two modules can drift apart on a threshold.

/// Plan duration limits and template sizes
pub mod plan {
    /// Shortest plan the engine will produce
    pub const MIN_PLAN_WEEKS: u32 = 6;

    /// Longest plan the engine will produce
    pub const MAX_PLAN_WEEKS: u32 = 24;

    /// Length of every full hand-authored base template
    pub const STANDARD_TEMPLATE_WEEKS: u32 = 12;

    /// Length of the short-notice "Save My Race" template variant
    pub const SAVE_MY_RACE_WEEKS: u32 = 6;

    /// At or below this many weeks of runway the Save My Race variant is
    /// selected instead of the full template
    pub const SAVE_MY_RACE_THRESHOLD_WEEKS: u32 = 8;

    /// The first 8 weeks of a full template form the repeatable base block
    /// (two intro → build → recovery cycles); the tail is peak + taper and
    /// is never altered in content.
    pub const BASE_BLOCK_WEEKS: usize = 8;
}

/// Training volume thresholds, relative to the peak week at 100%
pub mod volume {
    /// A week at or below this volume is a candidate recovery week
    pub const RECOVERY_MAX_PERCENT: u32 = 65;

    /// Volume progression step applied to extended base weeks
    pub const EXTENSION_STEP_PERCENT: u32 = 3;

    /// Ceiling for extended-week volume progression
    pub const EXTENSION_CAP_PERCENT: u32 = 105;
}

/// Phase boundary parameters for plans of 9+ weeks
pub mod phases {
    /// Taper occupies the final weeks of every long plan
    pub const TAPER_WEEKS: u32 = 2;

    /// Peak occupies the weeks immediately before taper
    pub const PEAK_WEEKS: u32 = 2;

    /// Share of the remaining weeks given to base (build gets the rest;
    /// base absorbs any rounding remainder)
    pub const BASE_SHARE: f64 = 0.6;

    /// Low volume inside this many closing weeks is taper, not recovery
    pub const TAPER_WINDOW_WEEKS: u32 = 4;
}

/// FTP (functional threshold power) test scheduling
pub mod ftp_test {
    /// Tests repeat on this interval, counted from week 1
    pub const INTERVAL_WEEKS: u32 = 6;

    /// No test within this many weeks of the final week
    pub const END_EXCLUSION_WEEKS: u32 = 2;
}

/// Age thresholds used by the classifier
pub mod age {
    /// Masters level override at this age and above
    pub const MASTERS_AGE: u32 = 50;

    /// Athletes at this age and above get a 3-week recovery cadence
    pub const ACCELERATED_RECOVERY_AGE: u32 = 40;
}
