//! # Mindful Core Library
//!
//! Behaviour of the Mindful site's front-end widgets, free of any browser.
//! The `mindful` CLI drives the same widgets from a terminal.
//!
//! ## Architecture
//!
//! - **Page**: the element ids a document carries. Every widget mounts from a
//!   page and stays unmounted when its elements are missing.
//! - **Scheduler**: virtual-time stand-in for `setTimeout`/`setInterval`. The
//!   caller advances time; nothing runs on its own thread.
//! - **Widgets**: chat demo and coach ([`ChatWidget`]), mood check-in
//!   ([`MoodTracker`]), meditation countdown ([`MeditationTimer`]) and the
//!   contact form ([`ContactForm`]). They share no state.
//!
//! ## Key Components
//!
//! - [`PageRuntime`]: mounts the widgets of one page and advances their time
//! - [`Dispatcher`]: ordered keyword table behind both chat widgets
//! - [`Config`]: reply delays, presets and log filter

pub mod chat;
pub mod config;
pub mod contact;
pub mod error;
pub mod events;
pub mod meditation;
pub mod mood;
pub mod page;
pub mod runtime;
pub mod scheduler;

pub use chat::{ChatKind, ChatWidget, Dispatcher, Message, QuickAction, Reply, Sender};
pub use config::{ChatConfig, Config, LoggingConfig, TimerConfig};
pub use contact::{ContactForm, ContactFormInput, ScrollRequest};
pub use error::{ConfigError, ContactField, CoreError, Result, ValidationError};
pub use events::Event;
pub use meditation::{format_mmss, positive_preset, MeditationTimer, TimerPhase, AFFIRMATIONS};
pub use mood::{MoodRating, MoodSummary, MoodTracker};
pub use page::{Page, PageKind};
pub use runtime::{PageRuntime, WidgetKind};
pub use scheduler::{Scheduler, TaskHandle};
