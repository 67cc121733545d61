use clap::{Args, Parser, Subcommand};
use optibody_core::nutrition::calculate_macro_percentages;
use optibody_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "optibody")]
#[command(about = "Fitness and nutrition calculator (BMR, TDEE, macro targets)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMR and TDEE
    Calc {
        #[command(flatten)]
        metrics: MetricArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Calculate daily calorie and macro targets
    Goals {
        #[command(flatten)]
        metrics: MetricArgs,

        /// Goal (weight_loss, maintenance, muscle_gain)
        #[arg(long, default_value = "maintenance")]
        goal: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List activity levels and their multipliers
    ActivityLevels {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Estimate body fat percentage (U.S. Navy method)
    BodyFat {
        /// Gender (male, female)
        #[arg(long)]
        gender: String,

        /// Height in centimeters
        #[arg(long)]
        height: f64,

        /// Waist circumference in centimeters
        #[arg(long)]
        waist: f64,

        /// Neck circumference in centimeters
        #[arg(long)]
        neck: f64,

        /// Hip circumference in centimeters (required for women)
        #[arg(long)]
        hip: Option<f64>,
    },

    /// Manage the stored user profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Create or update the profile and recompute its targets
    Set {
        /// Display name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        metrics: MetricArgs,

        /// Goal (weight_loss, maintenance, muscle_gain)
        #[arg(long, default_value = "maintenance")]
        goal: String,
    },

    /// Show the stored profile
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct MetricArgs {
    /// Height in centimeters
    #[arg(long)]
    height: f64,

    /// Weight in kilograms
    #[arg(long)]
    weight: f64,

    /// Age in years
    #[arg(long)]
    age: u32,

    /// Gender (male, female)
    #[arg(long)]
    gender: String,

    /// Activity level (sedentary, lightly_active, moderately_active, very_active, extra_active)
    #[arg(long, default_value = "sedentary")]
    activity: String,

    /// Body fat percentage, enables lean-mass formulas
    #[arg(long)]
    body_fat: Option<f64>,
}

impl MetricArgs {
    fn to_metrics(&self) -> Result<UserMetrics> {
        let metrics = UserMetrics {
            height: self.height,
            weight: self.weight,
            age: self.age,
            gender: self.gender.parse()?,
            activity_level: self.activity.parse()?,
            body_fat_percentage: self.body_fat,
        };
        metrics.validate()?;
        Ok(metrics)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    optibody_core::logging::init_with_level(optibody_core::logging::level_for_verbosity(
        cli.verbose,
    ));

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Commands::Calc { metrics, json } => cmd_calc(&metrics, json, &config),
        Commands::Goals {
            metrics,
            goal,
            json,
        } => cmd_goals(&metrics, &goal, json, &config),
        Commands::ActivityLevels { json } => cmd_activity_levels(json, &config),
        Commands::BodyFat {
            gender,
            height,
            waist,
            neck,
            hip,
        } => cmd_body_fat(&gender, height, waist, neck, hip),
        Commands::Profile { command } => match command {
            ProfileCommands::Set {
                name,
                metrics,
                goal,
            } => cmd_profile_set(&data_dir, name, &metrics, &goal, &config),
            ProfileCommands::Show { json } => cmd_profile_show(&data_dir, json),
        },
    }
}

fn profile_path(data_dir: &Path) -> PathBuf {
    data_dir.join("profile.json")
}

fn cmd_calc(args: &MetricArgs, json: bool, config: &Config) -> Result<()> {
    let metrics = args.to_metrics()?;
    let engine = config.engine()?;
    tracing::debug!("Formula priority: {:?}", engine.formulas());
    let result = engine.calculate_bmr_and_tdee(&metrics)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Formula: {}", result.formula);
    println!("BMR:     {} kcal/day", result.bmr);
    println!(
        "TDEE:    {} kcal/day ({})",
        result.tdee, metrics.activity_level
    );
    Ok(())
}

fn cmd_goals(args: &MetricArgs, goal: &str, json: bool, config: &Config) -> Result<()> {
    let metrics = args.to_metrics()?;
    let goal: Goal = goal.parse()?;
    let engine = config.engine()?;
    let goals = calculate_nutrition_goals(&metrics, goal, &engine, &config.nutrition)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&goals)?);
        return Ok(());
    }

    display_targets(goal, &goals);
    Ok(())
}

fn cmd_activity_levels(json: bool, config: &Config) -> Result<()> {
    let engine = config.engine()?;
    let options = engine.multipliers().options();

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    for option in &options {
        println!(
            "{:<18} x{:<6} {} - {}",
            option.value.as_str(),
            option.multiplier,
            option.label,
            option.description
        );
    }
    Ok(())
}

fn cmd_body_fat(gender: &str, height: f64, waist: f64, neck: f64, hip: Option<f64>) -> Result<()> {
    let gender: Gender = gender.parse()?;
    let body_fat = estimate_body_fat(gender, height, waist, neck, hip)?;
    println!("Estimated body fat: {:.1}%", body_fat);
    Ok(())
}

fn cmd_profile_set(
    data_dir: &Path,
    name: Option<String>,
    args: &MetricArgs,
    goal: &str,
    config: &Config,
) -> Result<()> {
    let metrics = args.to_metrics()?;
    let goal: Goal = goal.parse()?;
    let engine = config.engine()?;
    let path = profile_path(data_dir);
    let _lock = UserProfile::lock(&path)?;

    let profile = match UserProfile::load(&path)? {
        Some(mut existing) => {
            existing.update_metrics(metrics, &engine, &config.nutrition)?;
            existing.set_goal(goal, &engine, &config.nutrition)?;
            if let Some(name) = name {
                existing.name = name;
            }
            existing
        }
        None => UserProfile::new(
            name.unwrap_or_else(|| "default".into()),
            metrics,
            goal,
            &engine,
            &config.nutrition,
        )?,
    };

    profile.save(&path)?;
    tracing::info!("Saved profile {} to {:?}", profile.id, path);

    println!("✓ Profile saved: {}", profile.name);
    display_targets(profile.goal, &profile.targets);
    Ok(())
}

fn cmd_profile_show(data_dir: &Path, json: bool) -> Result<()> {
    let path = profile_path(data_dir);
    let Some(profile) = UserProfile::load(&path)? else {
        println!("No profile found. Create one with `optibody profile set`.");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("Profile: {} ({})", profile.name, profile.id);
    println!(
        "  {} cm, {} kg, {} years, {}, {}",
        profile.metrics.height,
        profile.metrics.weight,
        profile.metrics.age,
        profile.metrics.gender,
        profile.metrics.activity_level
    );
    if let Some(bf) = profile.metrics.body_fat_percentage {
        println!("  Body fat: {:.1}%", bf);
    }
    println!(
        "  BMR {} / TDEE {} kcal ({})",
        profile.calculation.bmr, profile.calculation.tdee, profile.calculation.formula
    );
    println!("  Updated: {}", profile.updated_at.format("%Y-%m-%d %H:%M UTC"));
    display_targets(profile.goal, &profile.targets);
    Ok(())
}

fn display_targets(goal: Goal, goals: &NutritionGoals) {
    let pct = calculate_macro_percentages(
        f64::from(goals.protein),
        f64::from(goals.fat),
        f64::from(goals.carbs),
    );

    println!();
    println!("  Goal:     {}", goal);
    println!("  Calories: {} kcal", goals.calories);
    println!("  Protein:  {} g ({}%)", goals.protein, pct.protein_percent);
    println!("  Fat:      {} g ({}%)", goals.fat, pct.fat_percent);
    println!("  Carbs:    {} g ({}%)", goals.carbs, pct.carb_percent);
    println!("  Fiber:    {} g", goals.fiber);
    println!("  Sugar:    < {} g", goals.sugar);
    println!("  Sodium:   < {} mg", goals.sodium);
}
