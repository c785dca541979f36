use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use branch_aware_ci::cli::orchestration::load_policy;
use branch_aware_ci::cli::{run_analysis, AnalyzeArgs};
use branch_aware_ci::config::{self, ConfigSource, DEFAULT_CONFIG_FILE};
use branch_aware_ci::git::Git2Repository;
use branch_aware_ci::output::{format_decision, OutputFormat};
use branch_aware_ci::policy::validate_policy;
use branch_aware_ci::{telemetry, ui};

#[derive(clap::Parser)]
#[command(
    name = "branch-aware-ci",
    about = "Derive a deployment decision from the current git branch"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human, help = "Output format")]
    format: OutputFormat,

    #[arg(short, long, default_value = ".", help = "Path to the git repository")]
    repo: PathBuf,

    #[arg(short, long, help = "Evaluate this branch instead of the checked-out one")]
    branch: Option<String>,

    #[arg(long, help = "Write a default configuration file and exit")]
    init: bool,

    #[arg(long, help = "With --init, overwrite an existing file without asking")]
    force: bool,

    #[arg(long, help = "Validate the configuration and exit")]
    validate: bool,

    #[arg(long, help = "Enable debug logging")]
    verbose: bool,

    #[arg(long, help = "Emit log lines as JSON")]
    log_json: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("branch-aware-ci {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    telemetry::init_tracing(args.log_json, telemetry::level_for(args.verbose));

    if args.init {
        return init_config(&args);
    }

    if args.validate {
        return validate_config(&args);
    }

    let analyze_args = analyze_args(&args);

    // An explicit branch does not need a repository
    let repo = match Git2Repository::open(&args.repo) {
        Ok(repo) => Some(repo),
        Err(e) if args.branch.is_some() => {
            tracing::debug!(error = %e, "no repository, using the branch given on the command line");
            None
        }
        Err(e) => {
            ui::display_error(&format!("Failed to detect branch: {}", e));
            std::process::exit(1);
        }
    };

    let analysis = match run_analysis(&analyze_args, repo.as_ref()) {
        Ok(analysis) => analysis,
        Err(e) if e.is_repository_error() => {
            ui::display_error(&format!("Failed to detect branch: {}", e));
            std::process::exit(1);
        }
        Err(e) => {
            ui::display_error(&format!("Failed to evaluate branch: {}", e));
            std::process::exit(1);
        }
    };

    match format_decision(&analysis.decision, args.format) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            ui::display_error(&format!("Failed to format output: {}", e));
            std::process::exit(1);
        }
    }

    Ok(())
}

fn analyze_args(args: &Args) -> AnalyzeArgs {
    AnalyzeArgs {
        config_path: args.config.clone(),
        repo_path: args.repo.clone(),
        branch: args.branch.clone(),
    }
}

fn init_config(args: &Args) -> Result<()> {
    let path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let overwrite = if path.exists() && !args.force {
        ui::display_warning(&format!("Config file already exists: {}", path.display()));
        if !ui::confirm_action("Overwrite it with the defaults?")? {
            ui::display_status("Initialization cancelled.");
            return Ok(());
        }
        true
    } else {
        args.force
    };

    if let Err(e) = config::init_config(&path, overwrite) {
        ui::display_error(&format!("Error initializing config: {}", e));
        std::process::exit(1);
    }

    ui::display_success(&format!("Configuration written to {}", path.display()));
    Ok(())
}

fn validate_config(args: &Args) -> Result<()> {
    // Same search root as the analysis: the work tree when there is a repository
    let repo = match Git2Repository::open(&args.repo) {
        Ok(repo) => Some(repo),
        Err(e) => {
            tracing::debug!(error = %e, "no repository, searching from --repo");
            None
        }
    };

    let (config, source) = match load_policy(&analyze_args(args), repo.as_ref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if let ConfigSource::File(path) = &source {
        ui::display_status(&format!("Validating {}", path.display()));
    } else {
        ui::display_status("No configuration file found, validating the built-in defaults");
    }

    let validation = validate_policy(&config);
    ui::display_validation(&validation);

    if !validation.valid {
        std::process::exit(1);
    }
    Ok(())
}
