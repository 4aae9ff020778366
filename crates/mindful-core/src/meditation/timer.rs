//! Meditation countdown.
//!
//! A single countdown driven by a repeating one-second tick. Like the rest of
//! the crate there is no internal thread: the tick lives in a [`Scheduler`]
//! owned by the timer and fires when the caller calls [`MeditationTimer::advance`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Idle
//! Running --last tick--> Completed
//! any --reset--> Idle
//! Idle|Completed --preset--> Idle
//! ```
//!
//! At most one tick task exists, and only while Running.

use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::affirmations::pick_affirmation;
use crate::config::TimerConfig;
use crate::error::ValidationError;
use crate::events::Event;
use crate::page::{ids, Page};
use crate::scheduler::{Scheduler, TaskHandle};

pub const DEFAULT_PRESET_SECS: u64 = 60;
pub const TICK_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Completed,
}

/// Presets must be at least one second; a zero countdown would never finish.
pub fn positive_preset(secs: u64) -> Result<u64, ValidationError> {
    if secs == 0 {
        Err(ValidationError::InvalidValue {
            field: "preset".into(),
            message: "must be at least one second".into(),
        })
    } else {
        Ok(secs)
    }
}

/// Zero-padded `MM:SS`.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[derive(Debug, Clone)]
pub struct MeditationTimer {
    presets: Vec<u64>,
    preset_secs: u64,
    remaining_secs: u64,
    phase: TimerPhase,
    tick_interval_ms: u64,
    tick: Option<TaskHandle>,
    ticks: Scheduler<()>,
    affirmation: Option<&'static str>,
    affirmation_focused: bool,
    rng: Pcg64,
}

impl MeditationTimer {
    /// Attach to `page`. Needs the display, both controls, the affirmation
    /// box and at least one preset button with a positive duration.
    ///
    /// Zero-second preset buttons are skipped. A zero default preset falls
    /// back to the first usable button.
    pub fn mount(page: &Page, config: &TimerConfig) -> Option<Self> {
        let required = [
            ids::TIMER_DISPLAY,
            ids::TIMER_START_PAUSE,
            ids::TIMER_RESET,
            ids::AFFIRMATION_BOX,
        ];
        let presets: Vec<u64> = page
            .presets()
            .iter()
            .copied()
            .filter_map(|secs| positive_preset(secs).ok())
            .collect();
        if !page.has_all(&required) || presets.is_empty() {
            debug!(page = %page.name, "meditation timer not mounted");
            return None;
        }
        let default_secs = match positive_preset(config.default_preset_secs) {
            Ok(secs) => secs,
            Err(err) => {
                debug!(error = %err, fallback = presets[0], "default preset unusable");
                presets[0]
            }
        };
        Some(Self {
            presets,
            preset_secs: default_secs,
            remaining_secs: default_secs,
            phase: TimerPhase::Idle,
            tick_interval_ms: config.tick_interval_ms,
            tick: None,
            ticks: Scheduler::new(),
            affirmation: None,
            affirmation_focused: false,
            rng: Pcg64::seed_from_u64(rand::random()),
        })
    }

    /// Replace the affirmation RNG with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Pcg64::seed_from_u64(seed);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn preset_secs(&self) -> u64 {
        self.preset_secs
    }

    pub fn presets(&self) -> &[u64] {
        &self.presets
    }

    pub fn display(&self) -> String {
        format_mmss(self.remaining_secs)
    }

    /// Label of the start/pause control.
    pub fn start_label(&self) -> &'static str {
        if self.is_running() {
            "Pause"
        } else {
            "Start"
        }
    }

    pub fn presets_disabled(&self) -> bool {
        self.is_running()
    }

    /// The affirmation box text, or `None` while it is hidden.
    pub fn affirmation(&self) -> Option<&'static str> {
        self.affirmation
    }

    pub fn affirmation_focused(&self) -> bool {
        self.affirmation_focused
    }

    /// Number of live tick tasks; 1 while running, 0 otherwise.
    pub fn active_ticks(&self) -> usize {
        self.ticks.pending()
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            preset_secs: self.preset_secs,
            display: self.display(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Preset button click. Ignored while running (the buttons are
    /// disabled) and for durations the page does not offer.
    pub fn select_preset(&mut self, secs: u64) -> Option<Event> {
        if self.is_running() || !self.presets.contains(&secs) {
            return None;
        }
        self.preset_secs = secs;
        self.remaining_secs = secs;
        self.phase = TimerPhase::Idle;
        self.hide_affirmation();
        debug!(preset_secs = secs, "preset selected");
        Some(Event::PresetSelected { preset_secs: secs })
    }

    /// Start/pause control click.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        if self.remaining_secs == 0 {
            self.remaining_secs = self.preset_secs;
        }
        self.cancel_tick();
        self.tick = Some(self.ticks.schedule_repeating(self.tick_interval_ms, ()));
        self.phase = TimerPhase::Running;
        self.hide_affirmation();
        debug!(remaining_secs = self.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            remaining_secs: self.remaining_secs,
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.cancel_tick();
        self.phase = TimerPhase::Idle;
        debug!(remaining_secs = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
        })
    }

    pub fn reset(&mut self) -> Event {
        self.cancel_tick();
        self.phase = TimerPhase::Idle;
        self.remaining_secs = self.preset_secs;
        self.hide_affirmation();
        debug!(remaining_secs = self.remaining_secs, "timer reset");
        Event::TimerReset {
            remaining_secs: self.remaining_secs,
        }
    }

    /// Let `elapsed_ms` pass, running every tick that comes due.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<Event> {
        let target = self.ticks.now_ms().saturating_add(elapsed_ms);
        let mut events = Vec::new();
        while let Some((handle, ())) = self.ticks.pop_due(target) {
            if Some(handle) == self.tick {
                events.extend(self.on_tick());
            }
        }
        self.ticks.settle(target);
        events
    }

    /// Milliseconds until the next tick, if running.
    pub fn next_tick_in(&self) -> Option<u64> {
        self.ticks.next_due_in()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn on_tick(&mut self) -> Vec<Event> {
        if self.remaining_secs == 0 {
            return Vec::new();
        }
        self.remaining_secs -= 1;
        let mut events = vec![Event::TimerTicked {
            remaining_secs: self.remaining_secs,
            display: self.display(),
        }];
        if self.remaining_secs == 0 {
            self.cancel_tick();
            self.phase = TimerPhase::Completed;
            let affirmation = pick_affirmation(&mut self.rng);
            self.affirmation = Some(affirmation);
            self.affirmation_focused = true;
            info!(preset_secs = self.preset_secs, "meditation completed");
            events.push(Event::TimerCompleted {
                affirmation: affirmation.to_string(),
            });
        }
        events
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.ticks.cancel(handle);
        }
    }

    fn hide_affirmation(&mut self) {
        self.affirmation = None;
        self.affirmation_focused = false;
    }
}
