//! Headless arena client.
//!
//! Loads content, runs the simulation at a fixed frame rate with a scripted
//! input sequence and prints whatever the core reports.
mod config;
mod script;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::CliConfig;
use game_content::ContentFactory;
use game_core::{CombatEvent, FeedbackEvent};
use runtime::{Event, Simulation, Topic};
use script::{Input, Script};
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(config.log_dir.as_deref())?;

    run(config).await
}

async fn run(config: CliConfig) -> Result<()> {
    let factory = ContentFactory::new(config.content_dir.clone());
    let game_config = factory
        .load_config()
        .context("loading game configuration")?;
    let registry = factory.load_registry().context("loading catalogs")?;
    let level = factory
        .load_level(&config.level)
        .with_context(|| format!("loading level '{}'", config.level))?;

    let mut builder = Simulation::builder()
        .game_config(game_config)
        .registry(registry)
        .level(level);
    if let Some(seed) = config.seed {
        builder = builder.seed(seed);
    }
    let mut sim = builder.build()?;
    tracing::info!("seed {}", sim.seed());

    let mut receivers = sim
        .events()
        .subscribe_multiple(&[Topic::Feedback, Topic::Combat]);
    let mut script = Script::skirmish();

    let mut interval = tokio::time::interval(Duration::from_millis(u64::from(config.frame_ms)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut kills = 0;
    let mut casts = 0;
    for frame in 0..config.frames {
        interval.tick().await;

        for (_, input) in script.due(frame) {
            if apply(&mut sim, *input)? {
                casts += 1;
            }
        }
        let report = sim.tick(config.frame_ms);
        kills += report.enemy_deaths.len();

        for (_, rx) in &mut receivers {
            print_events(sim.elapsed_ms(), rx);
        }

        if sim.is_over() {
            break;
        }
    }

    let player = sim.world().player();
    tracing::info!(
        "finished after {} ms: {} casts, {} kills, {} enemies left, player {}/{} hp",
        sim.elapsed_ms(),
        casts,
        kills,
        sim.world().enemies().len(),
        player.health.current,
        player.health.maximum
    );
    Ok(())
}

/// Applies one input. Returns true when an ability was actually cast.
fn apply(sim: &mut Simulation, input: Input) -> Result<bool> {
    match input {
        Input::Move(direction) => {
            sim.set_player_direction(direction);
            Ok(false)
        }
        Input::Ability(kind) => {
            let attempt = sim
                .try_use_ability(kind)
                .with_context(|| format!("using ability {kind}"))?;
            Ok(attempt.is_used())
        }
        Input::Consumable(slot) => {
            sim.try_use_consumable(slot)
                .with_context(|| format!("using inventory slot {slot}"))?;
            Ok(false)
        }
    }
}

fn print_events(now_ms: u64, rx: &mut broadcast::Receiver<Event>) {
    loop {
        match rx.try_recv() {
            Ok(event) => println!("[{now_ms:>6} ms] {}", describe(&event)),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                tracing::warn!("dropped {skipped} events");
            }
            Err(_) => break,
        }
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::Feedback(FeedbackEvent::Message(text)) => format!("message: {text}"),
        Event::Feedback(FeedbackEvent::AbilityClicked(kind)) => format!("cast {kind}"),
        Event::Feedback(FeedbackEvent::Sound(sound)) => format!("sound #{}", sound.0),
        Event::Feedback(FeedbackEvent::Combat(combat)) | Event::Combat(combat) => match combat {
            CombatEvent::Damaged { target, amount } => format!("{target} takes {amount}"),
            CombatEvent::Healed { target, amount } => format!("{target} heals {amount}"),
            CombatEvent::EnemySpawned { id, kind } => format!("{kind} {id} appears"),
            CombatEvent::EnemyDied { id, kind } => format!("{kind} {id} dies"),
            CombatEvent::ProjectileExpired { id, kind } => format!("{kind} {id} fizzles"),
            CombatEvent::BuffApplied { target, kind } => format!("{target} gains {kind}"),
            CombatEvent::BuffEnded { target, kind } => format!("{kind} on {target} ends"),
        },
    }
}

/// Logs to stderr, and to `arena.log` under `log_dir` when one is given.
///
/// The returned guard flushes the file writer when dropped.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "arena.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/arena.log", dir.display());
    }
    Ok(guard)
}
