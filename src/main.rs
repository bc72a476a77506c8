// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Plan generation pipeline: profile in, validated plan artifacts out.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use gravel_plan_engine::classify::classify_athlete;
use gravel_plan_engine::config::EngineConfig;
use gravel_plan_engine::gates::run_gates;
use gravel_plan_engine::logging::LoggingConfig;
use gravel_plan_engine::models::AthleteProfile;
use gravel_plan_engine::plan::{
    build_overview, extend_template, periodization_facts, select_template,
};
use gravel_plan_engine::templates::TemplateLibrary;
use gravel_plan_engine::touchpoints::build_touchpoints;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a validated training plan from an athlete profile")]
struct Args {
    /// Athlete profile JSON produced by the intake stage
    #[arg(long)]
    profile: PathBuf,

    /// Engine config TOML; environment variables apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the template catalog directory
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Override the artifact output directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Classify as of this date instead of today (YYYY-MM-DD), for
    /// reproducible runs
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    LoggingConfig::from_env().init()?;

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::from_env(),
    };
    if let Some(dir) = args.templates_dir {
        config.templates_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    config.validate()?;

    let library = TemplateLibrary::new(&config.templates_dir);
    library.verify_catalog()?;
    info!("template catalog verified");

    let raw_profile = fs::read_to_string(&args.profile)
        .with_context(|| format!("failed to read profile {}", args.profile.display()))?;
    let profile: AthleteProfile = serde_json::from_str(&raw_profile)
        .with_context(|| format!("failed to parse profile {}", args.profile.display()))?;
    info!(athlete = %profile.name, "loaded athlete profile");

    let today = args.as_of.unwrap_or_else(|| chrono::Utc::now().date_naive());
    let classification = classify_athlete(&profile, today)?;

    let selected = select_template(&library, &classification)?;
    let plan = extend_template(
        &selected.template,
        selected.plan_duration as usize,
        classification.recovery_week_cadence,
    )?;
    info!(
        weeks = plan.weeks.len(),
        template = %selected.template_name,
        "plan assembled"
    );

    let facts = periodization_facts(&plan, &classification);
    let overview = build_overview(&plan, &classification, &facts);
    let touchpoints = build_touchpoints(&profile, &classification, &facts);

    // Artifacts are written only after every gate passes; a failed gate
    // halts the run with nothing delivered.
    run_gates(
        &classification,
        selected.plan_duration,
        &plan,
        &facts,
        &touchpoints,
    )?;

    let athlete_dir = config.output_dir.join(slug(&profile.name));
    fs::create_dir_all(&athlete_dir)
        .with_context(|| format!("failed to create {}", athlete_dir.display()))?;

    write_json(&athlete_dir.join("classification.json"), &classification)?;
    write_json(&athlete_dir.join("plan.json"), &plan)?;
    write_json(&athlete_dir.join("periodization.json"), &facts)?;
    write_json(&athlete_dir.join("overview.json"), &overview)?;
    write_json(&athlete_dir.join("touchpoints.json"), &touchpoints)?;

    info!(dir = %athlete_dir.display(), "plan artifacts written");
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &PathBuf, value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))
}

fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
