use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{Table, Tabled};

use kcalrs::config::{AppConfig, ProfileConfig};
use kcalrs::logging::{init_logging, LogConfig};
use kcalrs::models::{
    ActivityLevel, BiometricProfile, GoalType, Plan, PlanStatus, Sex, WarningLevel,
};
use kcalrs::nutrients::{NutrientAdvisor, NutrientTargets};
use kcalrs::pace::PaceCalculator;
use kcalrs::planner::{PlanSuggester, PlanSuggestion};
use kcalrs::{BmrEstimator, MaintenanceCalculator};

/// kcalrs - Calorie Target Planning CLI
///
/// Computes BMR and maintenance ranges, safety-gated calorie plans,
/// pace projections, and nutrient targets from a biometric profile.
#[derive(Parser)]
#[command(name = "kcalrs")]
#[command(version = "0.1.0")]
#[command(about = "Calorie Target Planning CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Biometric profile flags; anything omitted falls back to the stored
/// default profile
#[derive(Args, Clone)]
struct ProfileArgs {
    /// Sex at birth (male, female, unknown)
    #[arg(long)]
    sex: Option<String>,

    /// Age in years
    #[arg(long)]
    age: Option<u16>,

    /// Height in centimeters
    #[arg(long)]
    height: Option<u16>,

    /// Weight in kilograms
    #[arg(long)]
    weight: Option<Decimal>,

    /// Body-fat percentage (5-60; out-of-range values are ignored)
    #[arg(long)]
    body_fat: Option<Decimal>,

    /// Activity level (sedentary, light, moderate, high, very_high)
    #[arg(long)]
    activity: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the basal metabolic rate range
    Bmr {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Compute the maintenance-calorie range
    Maintenance {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Suggest calorie plans for a goal
    Plans {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Goal type (lose, maintain, recomp, gain)
        #[arg(short, long)]
        goal: String,

        /// Target weight in kilograms (lose and gain)
        #[arg(short, long)]
        target_weight: Option<Decimal>,
    },

    /// Project pace and arrival date for a chosen calorie value
    Pace {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Daily calorie target
        #[arg(long)]
        calories: i32,

        /// Target weight in kilograms
        #[arg(short, long)]
        target_weight: Decimal,
    },

    /// Suggest daily nutrient targets
    Nutrients {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Goal type (lose, maintain, recomp, gain)
        #[arg(short, long)]
        goal: String,
    },

    /// Manage the stored configuration
    Config {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Save the supplied profile flags as the default profile
        #[arg(long)]
        init: bool,

        /// Print the config file path
        #[arg(long)]
        path: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(&LogConfig::from_verbosity(cli.verbose))?;

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("Cannot load config from {}", path.display()))?,
        None => AppConfig::load_or_default(),
    };

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Bmr { profile } => {
            let profile = resolve_profile(&profile, &config)?;
            let range = BmrEstimator::compute(&profile);
            tracing::debug!(?range, "BMR range computed");

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&range)?);
            } else {
                println!("{}", "Basal metabolic rate".green().bold());
                println!("  Range: {} - {} kcal/day", range.lower_bmr, range.upper_bmr);
                println!("  Method: {:?} (body fat used: {})", range.method, range.used_body_fat);
            }
        }

        Commands::Maintenance { profile } => {
            let profile = resolve_profile(&profile, &config)?;
            let range = MaintenanceCalculator::compute(&profile);
            tracing::debug!(?range, "Maintenance range computed");

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&range)?);
            } else {
                println!("{}", "Maintenance calories".blue().bold());
                println!(
                    "  Range: {} - {} kcal/day",
                    range.lower_maintenance, range.upper_maintenance
                );
                println!("  BMR: {} - {} kcal/day", range.lower_bmr, range.upper_bmr);
                println!(
                    "  Activity: {} - {} kcal/day (multiplier {})",
                    range.lower_activity_calories,
                    range.upper_activity_calories,
                    range.activity_multiplier
                );
            }
        }

        Commands::Plans {
            profile,
            goal,
            target_weight,
        } => {
            let profile = resolve_profile(&profile, &config)?;
            let goal = GoalType::from_str(&goal)?;
            let suggestion = PlanSuggester::suggest(&profile, goal, target_weight, today);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&suggestion)?);
            } else {
                print_suggestion(&suggestion, goal);
            }
        }

        Commands::Pace {
            profile,
            calories,
            target_weight,
        } => {
            let profile = resolve_profile(&profile, &config)?;
            let maintenance = MaintenanceCalculator::compute(&profile);
            let projection = PaceCalculator::project(
                maintenance.midpoint(),
                calories,
                profile.weight_kg,
                target_weight,
                today,
            );

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                match projection {
                    Some(p) => {
                        println!("{}", "Pace projection".cyan().bold());
                        println!("  Pace: {} lb/week", p.pace_lbs_per_week);
                        println!("  ETA: {} weeks ({})", p.eta_weeks, p.eta_date);
                    }
                    None => println!(
                        "{}",
                        "No progress toward that target at this intake.".yellow()
                    ),
                }
            }
        }

        Commands::Nutrients { profile, goal } => {
            let profile = resolve_profile(&profile, &config)?;
            let goal = GoalType::from_str(&goal)?;
            let targets = NutrientAdvisor::suggest(&profile, goal);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&targets)?);
            } else {
                print_nutrients(&targets);
            }
        }

        Commands::Config { profile, init, path } => {
            let config_path = cli
                .config
                .clone()
                .unwrap_or_else(AppConfig::default_config_path);

            if path {
                println!("{}", config_path.display());
            } else if init {
                let profile = resolve_profile(&profile, &config)?;
                let mut updated = config;
                updated.profile = Some(ProfileConfig::from_profile(&profile));
                updated.save_to_file(&config_path)?;
                println!(
                    "{} {}",
                    "Saved default profile to".green(),
                    config_path.display()
                );
            } else {
                match &config.profile {
                    Some(stored) => {
                        println!("{}", "Stored default profile".white().bold());
                        println!(
                            "  {} / {}y / {}cm / {}kg / {}",
                            stored.sex, stored.age, stored.height_cm, stored.weight_kg,
                            stored.activity
                        );
                    }
                    None => println!("No default profile stored. Use `kcalrs config --init`."),
                }
            }
        }
    }

    Ok(())
}

/// Merge profile flags over the stored default profile; every field
/// must come from one of the two before the engine is invoked.
fn resolve_profile(args: &ProfileArgs, config: &AppConfig) -> Result<BiometricProfile> {
    let stored = config.profile.as_ref().map(|p| p.to_profile());

    let sex = match &args.sex {
        Some(s) => Sex::from_str(s)?,
        None => match &stored {
            Some(p) => p.sex,
            None => bail!("Missing --sex (no stored default profile)"),
        },
    };
    let activity = match &args.activity {
        Some(s) => ActivityLevel::from_str(s)?,
        None => match &stored {
            Some(p) => p.activity,
            None => bail!("Missing --activity (no stored default profile)"),
        },
    };
    let age = args
        .age
        .or(stored.as_ref().map(|p| p.age))
        .context("Missing --age (no stored default profile)")?;
    let height_cm = args
        .height
        .or(stored.as_ref().map(|p| p.height_cm))
        .context("Missing --height (no stored default profile)")?;
    let weight_kg = args
        .weight
        .or(stored.as_ref().map(|p| p.weight_kg))
        .context("Missing --weight (no stored default profile)")?;
    let body_fat_percent = args
        .body_fat
        .or(stored.as_ref().and_then(|p| p.body_fat_percent));

    Ok(BiometricProfile {
        sex,
        age,
        height_cm,
        weight_kg,
        body_fat_percent,
        activity,
    })
}

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Plan")]
    title: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "kcal/day")]
    calories: i32,
    #[tabled(rename = "Pace (lb/wk)")]
    pace: String,
    #[tabled(rename = "ETA")]
    eta: String,
    #[tabled(rename = "Flags")]
    flags: String,
}

impl PlanRow {
    fn from_plan(plan: &Plan) -> Self {
        let mut flags = Vec::new();
        if plan.is_recommended {
            flags.push("recommended".to_string());
        }
        if !plan.is_selectable {
            flags.push("locked".to_string());
        }
        match plan.warning_level {
            WarningLevel::None => {}
            WarningLevel::Soft => flags.push("caution".yellow().to_string()),
            WarningLevel::Hard => flags.push("warning".red().to_string()),
            WarningLevel::Unsafe => flags.push("unsafe".red().bold().to_string()),
        }

        Self {
            title: plan.title.clone(),
            key: plan.key.to_string(),
            calories: plan.calories_per_day,
            pace: plan
                .pace_lbs_per_week
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            eta: plan
                .eta_weeks
                .map(|w| format!("{} wk", w))
                .unwrap_or_else(|| "-".to_string()),
            flags: flags.join(", "),
        }
    }
}

fn print_suggestion(suggestion: &PlanSuggestion, goal: GoalType) {
    println!(
        "{}",
        format!("Calorie plans ({})", goal).magenta().bold()
    );
    println!(
        "  Maintenance: {} - {} kcal/day",
        suggestion.maintenance.lower_maintenance, suggestion.maintenance.upper_maintenance
    );

    if suggestion.status == PlanStatus::ExtremeEdgeCase {
        println!(
            "{}",
            "  No safe preset exists for this profile; choose a custom target instead."
                .red()
                .bold()
        );
    } else {
        let rows: Vec<PlanRow> = suggestion
            .plans
            .iter()
            .filter(|p| p.is_visible)
            .map(PlanRow::from_plan)
            .collect();
        println!("{}", Table::new(rows));

        for plan in suggestion.plans.iter().filter(|p| p.is_visible) {
            if let Some(text) = &plan.warning_text {
                println!("  {} {}", plan.title.bold(), text.yellow());
            }
        }
    }

    println!(
        "  Custom range: {} - {} kcal/day",
        suggestion.custom.min, suggestion.custom.max
    );
    println!("  Default selection: {}", suggestion.default_plan);
}

fn print_nutrients(targets: &NutrientTargets) {
    #[derive(Tabled)]
    struct NutrientRow {
        #[tabled(rename = "Nutrient")]
        name: &'static str,
        #[tabled(rename = "Target")]
        value: i32,
        #[tabled(rename = "Range")]
        range: String,
        #[tabled(rename = "Step")]
        step: i32,
    }

    let rows = vec![
        ("Protein (g, min)", targets.protein_g_min),
        ("Fiber (g, min)", targets.fiber_g_min),
        ("Carbs (g, max)", targets.carbs_g_max),
        ("Sugar (g, max)", targets.sugar_g_max),
        ("Sodium (mg, max)", targets.sodium_mg_max),
        ("Water (ml, min)", targets.water_ml_min),
    ]
    .into_iter()
    .map(|(name, t)| NutrientRow {
        name,
        value: t.value,
        range: format!("{} - {}", t.min, t.max),
        step: t.step,
    })
    .collect::<Vec<_>>();

    println!("{}", "Suggested nutrient targets".green().bold());
    println!("{}", Table::new(rows));
}
