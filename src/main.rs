//! Domain Rules - generates DOMAIN-SUFFIX rule lists
//!
//! With no arguments every built-in profile is generated into `rules/`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use domain_rules::generate::header_now;
use domain_rules::{
    builtin_profiles, find_profile, generate, load_profiles, Fetcher, Profile, DEFAULT_TIMEOUT,
};

#[derive(Parser)]
#[command(name = "domain-rules")]
#[command(author, version, about = "Aggregate domain lists into DOMAIN-SUFFIX rule files")]
struct Cli {
    /// Only generate the named built-in profile (repeatable)
    #[arg(short, long = "profile")]
    profiles: Vec<String>,

    /// Load profiles from a JSON file instead of the built-ins
    #[arg(long, conflicts_with = "profiles")]
    profiles_file: Option<PathBuf>,

    /// Write rule files into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long)]
    verbose: bool,
}

fn select_profiles(cli: &Cli) -> Result<Vec<Profile>> {
    let profiles = if let Some(ref path) = cli.profiles_file {
        load_profiles(path)?
    } else if cli.profiles.is_empty() {
        builtin_profiles()
    } else {
        cli.profiles
            .iter()
            .map(|name| find_profile(name))
            .collect::<domain_rules::Result<Vec<_>>>()?
    };

    Ok(match cli.output_dir {
        Some(ref dir) => profiles
            .into_iter()
            .map(|p| p.with_output_dir(dir))
            .collect(),
        None => profiles,
    })
}

fn run(cli: &Cli) -> Result<bool> {
    let profiles = select_profiles(cli)?;
    let fetcher = Fetcher::with_timeout(Duration::from_secs(cli.timeout));
    let now = header_now();

    let mut ok = true;
    for profile in &profiles {
        match generate(profile, &fetcher, now) {
            Ok(report) => info!(
                profile = %report.profile,
                output = %report.output.display(),
                total = report.total_count,
                "generated"
            ),
            Err(e) => {
                error!(profile = %profile.name, error = %e, "generation failed");
                ok = false;
            }
        }
    }
    Ok(ok)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if run(&cli)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
