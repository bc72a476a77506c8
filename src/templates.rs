// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Template Library
//!
//! Loads hand-authored base templates from disk. Each catalog entry lives at
//! `<base_dir>/<name>/template.json` and deserializes into a
//! [`PlanTemplate`]. [`TemplateLibrary::verify_catalog`] runs at startup and
//! checks that every name the selector can produce resolves to a parseable
//! template of the right length, so a broken catalog fails the pipeline
//! before any athlete run starts.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::constants::plan;
use crate::models::PlanTemplate;
use crate::plan::selector::{SAVE_MY_RACE_MAP, TEMPLATE_MAP};
use crate::plan::PlanError;

/// File-system backed catalog of base templates
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    base_dir: PathBuf,
}

impl TemplateLibrary {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Path of a catalog entry
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base_dir.join(name).join("template.json")
    }

    /// Load one template by catalog name
    pub fn load(&self, name: &str) -> Result<PlanTemplate, PlanError> {
        let path = self.path_for(name);
        debug!(template = name, path = %path.display(), "loading base template");
        let raw = fs::read_to_string(&path).map_err(|source| PlanError::TemplateRead {
            name: name.to_string(),
            source,
        })?;
        let template: PlanTemplate =
            serde_json::from_str(&raw).map_err(|source| PlanError::TemplateParse {
                name: name.to_string(),
                source,
            })?;
        validate_template(name, &template)?;
        Ok(template)
    }

    /// Exhaustiveness check over the full selector mapping.
    ///
    /// Every (tier, level) entry must load as a standard-length template and
    /// every Save My Race entry as a short one. Run once at startup; a
    /// failure is a configuration error and the pipeline must not start.
    pub fn verify_catalog(&self) -> Result<(), PlanError> {
        for ((_, _), name) in TEMPLATE_MAP {
            let template = self.load(name)?;
            expect_weeks(name, &template, plan::STANDARD_TEMPLATE_WEEKS)?;
        }
        for (_, name) in SAVE_MY_RACE_MAP {
            let template = self.load(name)?;
            expect_weeks(name, &template, plan::SAVE_MY_RACE_WEEKS)?;
        }
        Ok(())
    }
}

fn expect_weeks(name: &str, template: &PlanTemplate, expected: u32) -> Result<(), PlanError> {
    if template.weeks.len() as u32 != expected {
        return Err(PlanError::Configuration(format!(
            "template '{}' has {} weeks, catalog requires {}",
            name,
            template.weeks.len(),
            expected
        )));
    }
    Ok(())
}

/// Structural checks applied to every loaded template: non-empty, contiguous
/// 1-based week numbering, and slot numbering that matches the owning week.
fn validate_template(name: &str, template: &PlanTemplate) -> Result<(), PlanError> {
    if template.weeks.is_empty() {
        return Err(PlanError::Configuration(format!(
            "template '{name}' has no weeks"
        )));
    }
    for (index, week) in template.weeks.iter().enumerate() {
        let expected = index as u32 + 1;
        if week.week_number != expected {
            return Err(PlanError::Configuration(format!(
                "template '{}' week at position {} is numbered {}",
                name, expected, week.week_number
            )));
        }
        for slot in &week.workouts {
            if slot.week_number != expected {
                return Err(PlanError::Configuration(format!(
                    "template '{}' slot '{}' carries week number {} inside week {}",
                    name, slot.name, slot.week_number, expected
                )));
            }
        }
    }
    Ok(())
}
