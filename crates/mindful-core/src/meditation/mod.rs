mod affirmations;
mod timer;

pub use affirmations::{pick_affirmation, AFFIRMATIONS};
pub use timer::{
    format_mmss, positive_preset, MeditationTimer, TimerPhase, DEFAULT_PRESET_SECS,
    TICK_INTERVAL_MS,
};
