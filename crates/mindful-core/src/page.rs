//! Page descriptions.
//!
//! A [`Page`] lists the element ids the current document carries, plus the
//! `data-sec` value of every meditation preset button. Widgets consult it in
//! their `mount` constructors; a widget whose elements are missing is simply
//! not mounted, which lets one shared script serve every page of the site.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Element ids the widgets look for.
pub mod ids {
    pub const CHAT_WINDOW: &str = "chatWindow";
    pub const CHAT_INPUT: &str = "chatInput";
    pub const CHAT_SEND: &str = "sendMsg";
    pub const CHAT_CLEAR: &str = "clearChat";

    pub const COACH_WINDOW: &str = "coachChatWindow";
    pub const COACH_INPUT: &str = "coachInput";
    pub const COACH_SEND: &str = "coachSend";
    pub const COACH_CLEAR: &str = "coachClear";

    pub const MOOD_FORM: &str = "moodForm";
    pub const MOOD_BAR: &str = "moodBar";
    pub const MOOD_RESULT: &str = "moodResult";

    pub const TIMER_DISPLAY: &str = "timerDisplay";
    pub const TIMER_START_PAUSE: &str = "startPauseBtn";
    pub const TIMER_RESET: &str = "resetBtn";
    pub const AFFIRMATION_BOX: &str = "affirmationBox";

    pub const CONTACT_FORM: &str = "contactForm";
    pub const FORM_STATUS: &str = "formStatus";
}

/// Which built-in page of the site to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Index,
    Product,
    Services,
    Contact,
    About,
}

impl PageKind {
    pub const ALL: [PageKind; 5] = [
        PageKind::Index,
        PageKind::Product,
        PageKind::Services,
        PageKind::Contact,
        PageKind::About,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Index => "index",
            PageKind::Product => "product",
            PageKind::Services => "services",
            PageKind::Contact => "contact",
            PageKind::About => "about",
        }
    }
}

impl std::str::FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_end_matches(".html").to_ascii_lowercase();
        PageKind::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .ok_or_else(|| format!("unknown page: {s}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    elements: BTreeSet<String>,
    /// `data-sec` of each preset button, in document order.
    #[serde(default)]
    presets: Vec<u64>,
}

impl Page {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: BTreeSet::new(),
            presets: Vec::new(),
        }
    }

    pub fn with_elements<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elements.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_presets(mut self, presets: impl IntoIterator<Item = u64>) -> Self {
        self.presets.extend(presets);
        self
    }

    pub fn has(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    pub fn has_all(&self, ids: &[&str]) -> bool {
        ids.iter().all(|id| self.has(id))
    }

    pub fn presets(&self) -> &[u64] {
        &self.presets
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(String::as_str)
    }

    /// Markup of one of the site's pages. `presets` feeds the meditation
    /// preset buttons on the services page.
    pub fn builtin(kind: PageKind, presets: &[u64]) -> Self {
        let page = Page::new(kind.as_str());
        match kind {
            PageKind::Product => page.with_elements([
                ids::CHAT_WINDOW,
                ids::CHAT_INPUT,
                ids::CHAT_SEND,
                ids::CHAT_CLEAR,
                ids::MOOD_FORM,
                ids::MOOD_BAR,
                ids::MOOD_RESULT,
            ]),
            PageKind::Services => page
                .with_elements([
                    ids::TIMER_DISPLAY,
                    ids::TIMER_START_PAUSE,
                    ids::TIMER_RESET,
                    ids::AFFIRMATION_BOX,
                    ids::COACH_WINDOW,
                    ids::COACH_INPUT,
                    ids::COACH_SEND,
                    ids::COACH_CLEAR,
                ])
                .with_presets(presets.iter().copied()),
            PageKind::Contact => page.with_elements([ids::CONTACT_FORM, ids::FORM_STATUS]),
            PageKind::Index | PageKind::About => page,
        }
    }
}
