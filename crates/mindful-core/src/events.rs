use serde::{Deserialize, Serialize};

use crate::chat::{ChatKind, Message};
use crate::meditation::TimerPhase;

/// Every state change a widget makes produces an Event.
/// The CLI prints them as JSON; the library traces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    MessageAppended {
        widget: ChatKind,
        message: Message,
    },
    ChatCleared {
        widget: ChatKind,
    },
    MoodRecorded {
        rating: u8,
        count: u32,
        average: f64,
        percentage: f64,
    },
    PresetSelected {
        preset_secs: u64,
    },
    TimerStarted {
        remaining_secs: u64,
    },
    TimerPaused {
        remaining_secs: u64,
    },
    TimerTicked {
        remaining_secs: u64,
        display: String,
    },
    TimerCompleted {
        affirmation: String,
    },
    TimerReset {
        remaining_secs: u64,
    },
    StateSnapshot {
        phase: TimerPhase,
        remaining_secs: u64,
        preset_secs: u64,
        display: String,
    },
    ContactConfirmed {
        status: String,
    },
}
