// src/bin/show_learning.rs
// Viewer for the learning profile and its growth over time.
use anyhow::{Context, Result};
use chrono::Utc;
use clap::error::ErrorKind;
use clap::{Args, Parser};
use crossterm::tty::IsTty;
use learning_core::config::{DataPaths, DATA_DIR_ENV, LOG_ENV};
use learning_core::persistence::{read_profile, FileStore};
use learning_core::report::{render_json, Renderer};
use learning_core::{GrowthReport, GrowthTracker, Profile};
use log::warn;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "Usage: show_learning [--data-dir PATH] [--json|--summary|--corrections|--vocab|--growth]";

#[derive(Parser, Debug)]
#[command(name = "show_learning")]
#[command(about = "Show what VoxCompose has learned", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding learned_profile.json (overrides VOXCOMPOSE_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(flatten)]
    mode: ModeFlags,
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct ModeFlags {
    /// Export as formatted JSON
    #[arg(long)]
    json: bool,
    /// Show only statistics
    #[arg(long)]
    summary: bool,
    /// Show only corrections
    #[arg(long)]
    corrections: bool,
    /// Show only vocabulary
    #[arg(long)]
    vocab: bool,
    /// Show only growth tracking
    #[arg(long)]
    growth: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Overview,
    Json,
    Summary,
    Corrections,
    Vocab,
    Growth,
}

impl ModeFlags {
    fn mode(&self) -> Mode {
        if self.json {
            Mode::Json
        } else if self.summary {
            Mode::Summary
        } else if self.corrections {
            Mode::Corrections
        } else if self.vocab {
            Mode::Vocab
        } else if self.growth {
            Mode::Growth
        } else {
            Mode::Overview
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let paths = DataPaths::resolve(cli.data_dir);
    let profile_path = paths.profile_path();

    // A profile that exists but does not parse is shown as empty; it is not
    // fed to the growth tracker, so no snapshot records its zero counts.
    let mut readable = true;
    let profile = match read_profile(&FileStore, &profile_path) {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            println!("No learning profile found at: {}", profile_path.display());
            println!(
                "Run VoxCompose with corrections to build learning data or set {}.",
                DATA_DIR_ENV
            );
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            warn!("{} is unusable, showing an empty profile: {}", profile_path.display(), e);
            readable = false;
            Profile::default()
        }
    };

    let renderer = Renderer::styled(io::stdout().is_tty());
    let output = match cli.mode.mode() {
        Mode::Json => format!("{}\n", render_json(&profile).context("serializing profile")?),
        Mode::Summary => renderer.summary(&profile),
        Mode::Corrections => renderer.corrections(&profile),
        Mode::Vocab => renderer.vocabulary(&profile),
        Mode::Growth if readable => renderer.growth(&track_growth(&paths, &profile)?),
        Mode::Growth => renderer.growth_skipped(&profile_path),
        Mode::Overview => {
            let growth = if readable {
                Some(track_growth(&paths, &profile)?)
            } else {
                None
            };
            renderer.overview(&profile, growth.as_ref(), &profile_path)
        }
    };
    print!("{}", output);
    Ok(ExitCode::SUCCESS)
}

fn track_growth(paths: &DataPaths, profile: &Profile) -> Result<GrowthReport> {
    let tracker = GrowthTracker::new(FileStore, paths.state_path());
    tracker
        .run(profile, Utc::now())
        .with_context(|| format!("updating {}", tracker.state_path().display()))
}
