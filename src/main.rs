use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hopper::assets::{AssetCategory, AssetLoader};
use hopper::models::AppConfig;
use hopper::services::{Pipeline, Stage};

#[derive(Parser)]
#[command(name = "hopper")]
#[command(about = "Hopper - deterministic multi-format image rendering and color space conversion")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the color conversions and write the synthetic image in every format
    Run {
        /// Directory the output files are written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Run only one half of the pipeline
        #[arg(long, value_enum)]
        only: Option<OnlyStage>,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract source image files
        #[arg(long)]
        resources: bool,

        /// Extract font files
        #[arg(long)]
        fonts: bool,

        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
    /// Show environment, asset sources and the effective configuration
    Status,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnlyStage {
    Conversions,
    Synthetic,
}

impl From<OnlyStage> for Stage {
    fn from(stage: OnlyStage) -> Self {
        match stage {
            OnlyStage::Conversions => Stage::Conversions,
            OnlyStage::Synthetic => Stage::Synthetic,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { output_dir, only }) => run_pipeline_command(output_dir, only),
        Some(Commands::Init {
            resources,
            fonts,
            config,
            all,
            force,
            list,
        }) => run_init_command(resources, fonts, config, all, force, list),
        Some(Commands::Status) => {
            run_status_command();
            Ok(())
        }
        None => run_pipeline_command(PathBuf::from("."), None),
    }
}

fn run_pipeline_command(output_dir: PathBuf, only: Option<OnlyStage>) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hopper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&loader)?;

    let stages: Vec<Stage> = match only {
        Some(stage) => vec![stage.into()],
        None => Stage::ALL.to_vec(),
    };

    let report = Pipeline::new(config, loader).run(&output_dir, &stages)?;

    if let Some(ref conversions) = report.conversions {
        for failure in &conversions.failed {
            eprintln!(
                "Skipped {} ({}): {}",
                failure.path.display(),
                failure.space,
                failure.error
            );
        }
    }
    println!(
        "Wrote {} files to {}",
        report.files_written(),
        output_dir.display()
    );

    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    resources: bool,
    fonts: bool,
    config: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Resources:");
        for f in AssetLoader::list_embedded(AssetCategory::Resources) {
            println!("  {f}");
        }
        println!("\nFonts:");
        for f in AssetLoader::list_embedded(AssetCategory::Fonts) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || resources {
        categories.push(AssetCategory::Resources);
    }
    if all || fonts {
        categories.push(AssetCategory::Fonts);
    }
    if all || config {
        categories.push(AssetCategory::Config);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --resources, --fonts, or --config");
        eprintln!("\nRun 'hopper init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let report = AssetLoader::from_env().init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let env_or_unset = |name: &str| std::env::var(name).unwrap_or_else(|_| "(not set)".to_string());

    println!("Hopper v{VERSION}");
    println!("Deterministic multi-format image rendering\n");

    println!("Environment Variables:");
    println!("  CONFIG_FILE   = {}", env_or_unset("CONFIG_FILE"));
    println!("  RESOURCES_DIR = {}", env_or_unset("RESOURCES_DIR"));
    println!("  FONTS_DIR     = {}", env_or_unset("FONTS_DIR"));

    let loader = AssetLoader::from_env();

    println!("\nAsset Sources:");
    println!(
        "  Config:    {}",
        loader.source_description(AssetCategory::Config)
    );
    for (label, category) in [
        ("Resources", AssetCategory::Resources),
        ("Fonts", AssetCategory::Fonts),
    ] {
        let embedded = AssetLoader::list_embedded(category).len();
        println!(
            "  {:<10} {} ({embedded} embedded)",
            format!("{label}:"),
            loader.source_description(category)
        );
    }

    println!("\nConfiguration:");
    match AppConfig::load_from_assets(&loader) {
        Ok(config) => {
            println!("  Prefix:      {}", config.output.prefix);
            println!("  Source:      {}", config.source_image);
            println!("  Conversions: {}", config.conversions.join(", "));
            println!(
                "  Fonts:       {}",
                config
                    .fonts
                    .iter()
                    .map(|f| f.file.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("  Labels:      {}", config.scene.labels.len());
        }
        Err(e) => println!("  invalid: {e}"),
    }

    println!("\nCommands:");
    println!("  hopper run     Write conversions and the synthetic image (default)");
    println!("  hopper init    Extract embedded assets");
    println!("  hopper status  Show this overview");
    println!("\nRun 'hopper --help' for more details.");
}
