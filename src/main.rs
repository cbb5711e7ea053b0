//! Hangul Sign CLI
//!
//! Replays recorded hand-landmark streams through the recognizer.

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use hangul_sign::{
    config::Config,
    core::{GestureCategory, GestureClassifier, GestureLabel, ReferenceSet, Session},
    source::FrameReader,
    stats::create_shared_stats,
    FrameOutcome, RenderState, VERSION,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hangul-sign")]
#[command(version = VERSION)]
#[command(about = "Korean fingerspelling recognition from hand landmarks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay recorded landmark frames (JSON Lines) through a session.
    ///
    /// Frames without a "timestamp" field are timed as they are processed.
    Replay {
        /// Frame file to read; standard input when omitted
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Reference dataset CSV (overrides the configured path)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Minimum seconds between accepted gestures
        #[arg(long)]
        hold_secs: Option<f64>,

        /// Seconds within which a repeated consonant is tensed
        #[arg(long)]
        tense_window_secs: Option<f64>,

        /// Neighbour count for the classifier
        #[arg(short)]
        k: Option<usize>,

        /// Print render states as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// List the gesture vocabulary
    Gestures,

    /// Show configuration
    Config,
}

struct ReplayArgs {
    input: Option<PathBuf>,
    dataset: Option<PathBuf>,
    hold_secs: Option<f64>,
    tense_window_secs: Option<f64>,
    k: Option<usize>,
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Replay {
            input,
            dataset,
            hold_secs,
            tense_window_secs,
            k,
            json,
        } => cmd_replay(ReplayArgs {
            input,
            dataset,
            hold_secs,
            tense_window_secs,
            k,
            json,
        }),
        Commands::Gestures => {
            cmd_gestures();
            Ok(())
        }
        Commands::Config => cmd_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let config = effective_config(&args)?;

    let reference = ReferenceSet::load(&config.dataset_path)
        .with_context(|| format!("loading dataset {}", config.dataset_path.display()))?;
    let classifier =
        GestureClassifier::new(reference, config.k).context("building gesture classifier")?;
    tracing::info!(
        "Classifier ready: {} reference samples, k = {}",
        classifier.reference().len(),
        classifier.k()
    );

    let stats = create_shared_stats();
    let mut reader = FrameReader::new(config.channel_capacity, Arc::clone(&stats));
    match &args.input {
        Some(path) => reader
            .start_file(path)
            .with_context(|| format!("opening {}", path.display()))?,
        None => reader.start_stdin()?,
    }

    let running = Arc::new(AtomicBool::new(true));
    ctrlc_handler(Arc::clone(&running));

    let mut session: Option<Session> = None;
    let receiver = reader.receiver().clone();

    while running.load(Ordering::SeqCst) {
        let frame = match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(frame) => frame,
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        };

        let now = frame.timestamp_or(Utc::now());

        // the hold interval starts with the first frame of the recording
        let session = session.get_or_insert_with(|| {
            Session::with_stats(&config, classifier.clone(), now, Arc::clone(&stats))
        });

        if let FrameOutcome::Classified {
            mutation: Some(_), ..
        } = session.tick(&frame)
        {
            print_render_state(&session.render_state(now), args.json)?;
        }
    }

    if running.load(Ordering::SeqCst) {
        reader.join();
    } else {
        reader.stop();
    }

    println!();
    match &session {
        Some(session) => {
            let state = session.render_state(Utc::now());
            println!("Sentence: {}", state.sentence);
            println!("Pending jamo: {}", state.jamo_buffer);
        }
        None => println!("No frames received."),
    }
    println!();
    println!("{}", stats.summary());
    Ok(())
}

fn effective_config(args: &ReplayArgs) -> anyhow::Result<Config> {
    let mut config = Config::load().context("loading configuration")?;

    if let Some(path) = &args.dataset {
        config.dataset_path = path.clone();
    }
    if let Some(secs) = args.hold_secs {
        config.hold_interval = secs_arg("--hold-secs", secs)?;
    }
    if let Some(secs) = args.tense_window_secs {
        config.tense_window = secs_arg("--tense-window-secs", secs)?;
    }
    if let Some(k) = args.k {
        config.k = k;
    }

    config.validate()?;
    Ok(config)
}

fn secs_arg(flag: &str, secs: f64) -> anyhow::Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        bail!("{flag} must be a positive number of seconds, got {secs}");
    }
    Duration::try_from_secs_f64(secs)
        .with_context(|| format!("{flag} is out of range: {secs}"))
}

fn print_render_state(state: &RenderState, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(state)?);
    } else {
        let last = state
            .debug
            .last_label
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "[{}] {} | {} | {}",
            last, state.sentence, state.jamo_buffer, state.preview
        );
    }
    Ok(())
}

fn cmd_gestures() {
    println!("{:>3}  {:<6} {:<10} {:<5} Tensed", "Id", "Name", "Category", "Jamo");
    for label in GestureLabel::ALL {
        let category = match label.category() {
            GestureCategory::Consonant => "consonant",
            GestureCategory::Vowel => "vowel",
            GestureCategory::Control => "control",
        };
        println!(
            "{:>3}  {:<6} {:<10} {:<5} {}",
            label.id(),
            label.name(),
            category,
            label.jamo().map(String::from).unwrap_or_default(),
            label.tensed_jamo().map(String::from).unwrap_or_default()
        );
    }
}

fn cmd_config() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    println!("Configuration file: {}", Config::config_path().display());
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn ctrlc_handler(running: Arc<AtomicBool>) {
    if let Err(e) = ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    }) {
        tracing::warn!("Could not install Ctrl+C handler: {}", e);
    }
}
