use std::time::Duration;

use clap::Args;
use mindful_core::{positive_preset, Config, Event, MeditationTimer, PageKind, TimerPhase};

#[derive(Args)]
pub struct TimerArgs {
    /// Preset in seconds; must be one of the page's preset buttons
    #[arg(long)]
    pub preset: Option<u64>,
    /// Pause once this many seconds remain, then resume
    #[arg(long)]
    pub pause_at: Option<u64>,
    /// Wait one real tick interval per tick instead of simulating
    #[arg(long)]
    pub realtime: bool,
    /// Seed for the affirmation pick
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print every event as JSON, followed by the final timer state
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TimerArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut runtime = super::load_page(PageKind::Services, config);
    let mut timer = runtime
        .timer
        .take()
        .ok_or("meditation timer is not available on the services page")?;
    if let Some(seed) = args.seed {
        timer = timer.with_seed(seed);
    }

    if let Some(preset) = args.preset {
        positive_preset(preset)?;
        let event = timer.select_preset(preset).ok_or_else(|| {
            format!("preset {preset}s is not offered (available: {:?})", timer.presets())
        })?;
        emit(&args, &event)?;
    }

    let interval = config.timer.tick_interval_ms;
    if args.realtime {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        rt.block_on(run_realtime(&args, &mut timer, interval))?;
    } else {
        run_virtual(&args, &mut timer, interval)?;
    }
    if args.json {
        emit(&args, &timer.snapshot())?;
    }
    Ok(())
}

fn run_virtual(
    args: &TimerArgs,
    timer: &mut MeditationTimer,
    interval: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    start(args, timer)?;
    while timer.phase() == TimerPhase::Running {
        for event in timer.advance(interval) {
            emit(args, &event)?;
        }
        maybe_pause(args, timer, interval)?;
    }
    Ok(())
}

async fn run_realtime(
    args: &TimerArgs,
    timer: &mut MeditationTimer,
    interval: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    start(args, timer)?;
    let mut clock = tokio::time::interval(Duration::from_millis(interval));
    // The first tick of a tokio interval completes immediately.
    clock.tick().await;
    while timer.phase() == TimerPhase::Running {
        clock.tick().await;
        for event in timer.advance(interval) {
            emit(args, &event)?;
        }
        maybe_pause(args, timer, interval)?;
    }
    Ok(())
}

fn start(args: &TimerArgs, timer: &mut MeditationTimer) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(event) = timer.toggle() {
        emit(args, &event)?;
    }
    if !args.json {
        println!("{}", timer.display());
    }
    Ok(())
}

/// Pause at `--pause-at`, let one interval pass, then resume.
fn maybe_pause(
    args: &TimerArgs,
    timer: &mut MeditationTimer,
    interval: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.pause_at != Some(timer.remaining_secs()) || !timer.is_running() {
        return Ok(());
    }
    if let Some(event) = timer.toggle() {
        emit(args, &event)?;
    }
    timer.advance(interval);
    if let Some(event) = timer.toggle() {
        emit(args, &event)?;
    }
    Ok(())
}

fn emit(args: &TimerArgs, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::PresetSelected { preset_secs } => println!("preset: {}s", preset_secs),
        Event::TimerTicked { display, .. } => println!("{display}"),
        Event::TimerPaused { remaining_secs } => println!("paused at {remaining_secs}s"),
        Event::TimerStarted { remaining_secs } => tracing::debug!(remaining_secs, "started"),
        Event::TimerCompleted { affirmation } => println!("{affirmation}"),
        _ => {}
    }
    Ok(())
}
