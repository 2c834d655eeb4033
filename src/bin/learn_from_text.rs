// src/bin/learn_from_text.rs
// Learner hook: reads transcript text from stdin and updates the profile.
// Prints nothing on stdout and always exits 0.
use clap::error::ErrorKind;
use clap::Parser;
use learning_core::config::{DataPaths, LOG_ENV};
use learning_core::persistence::FileStore;
use learning_core::ProfileEngine;
use log::{debug, warn};
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "learn_from_text")]
#[command(about = "Learn vocabulary corrections from transcript text on stdin", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding learned_profile.json (overrides VOXCOMPOSE_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Turn learning on or off; any value other than "off" keeps it on
    #[arg(long, default_value = "on")]
    learn: String,

    /// Evaluate rules without writing the profile
    #[arg(long)]
    dry_run: bool,

    /// Print a one-line JSON summary of the run to stderr
    #[arg(long)]
    stats: bool,

    /// Recording length in seconds, echoed in the --stats line
    #[arg(long, default_value_t = 0.0)]
    duration: f64,
}

impl Cli {
    /// Settings for a command line that could not be parsed: nothing the
    /// caller asked for is trusted, so the profile is left alone.
    fn read_only() -> Self {
        Self {
            data_dir: None,
            learn: "on".to_string(),
            dry_run: true,
            stats: false,
            duration: 0.0,
        }
    }

    fn learning_enabled(&self) -> bool {
        !self.learn.eq_ignore_ascii_case("off")
    }

    fn writes_profile(&self) -> bool {
        self.learning_enabled() && !self.dry_run
    }
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            warn!("unparseable arguments ({:?}), running without writing", e.kind());
            Cli::read_only()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn")).init();
    let cli = parse_cli();

    let mut raw = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut raw) {
        debug!("stdin unreadable, nothing to learn: {}", e);
        return;
    }
    let text = String::from_utf8_lossy(&raw);

    let changed = if text.trim().is_empty() {
        false
    } else {
        learn(&cli, &text)
    };

    if cli.stats {
        let payload = serde_json::json!({
            "duration": cli.duration,
            "bytes": raw.len(),
            "learn": if cli.learning_enabled() { "on" } else { "off" },
            "dry_run": cli.dry_run,
            "changed": changed,
        });
        eprintln!("{}", payload);
    }
}

fn learn(cli: &Cli, text: &str) -> bool {
    let paths = DataPaths::resolve(cli.data_dir.clone());
    let mut engine = ProfileEngine::from_store_or_new(FileStore, paths.profile_path());
    let changed = engine.observe(text);

    if !changed {
        debug!("no rules fired");
    } else if !cli.writes_profile() {
        debug!("profile changed but writing is disabled");
    } else if let Err(e) = engine.save_profile() {
        warn!("could not save {}: {}", engine.profile_path().display(), e);
    }
    changed
}
