//! A loaded page with every widget it supports.
//!
//! The runtime only mounts widgets and fans time out to them; widgets never
//! see each other.

use serde::Serialize;
use tracing::debug;

use crate::chat::{ChatKind, ChatWidget};
use crate::config::Config;
use crate::contact::ContactForm;
use crate::events::Event;
use crate::meditation::MeditationTimer;
use crate::mood::MoodTracker;
use crate::page::Page;

/// Names of the widgets mounted on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Chat,
    Mood,
    Timer,
    Coach,
    Contact,
}

#[derive(Debug, Clone)]
pub struct PageRuntime {
    page: Page,
    pub chat: Option<ChatWidget>,
    pub mood: Option<MoodTracker>,
    pub timer: Option<MeditationTimer>,
    pub coach: Option<ChatWidget>,
    pub contact: Option<ContactForm>,
}

impl PageRuntime {
    pub fn load(page: Page, config: &Config) -> Self {
        let delay = |kind| config.reply_delay_ms(kind);
        let runtime = Self {
            chat: ChatWidget::mount(ChatKind::Chat, &page, delay(ChatKind::Chat)),
            mood: MoodTracker::mount(&page),
            timer: MeditationTimer::mount(&page, &config.timer),
            coach: ChatWidget::mount(ChatKind::Coach, &page, delay(ChatKind::Coach)),
            contact: ContactForm::mount(&page),
            page,
        };
        debug!(page = %runtime.page.name, widgets = ?runtime.mounted(), "page loaded");
        runtime
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn mounted(&self) -> Vec<WidgetKind> {
        let mut kinds = Vec::new();
        if self.chat.is_some() {
            kinds.push(WidgetKind::Chat);
        }
        if self.mood.is_some() {
            kinds.push(WidgetKind::Mood);
        }
        if self.timer.is_some() {
            kinds.push(WidgetKind::Timer);
        }
        if self.coach.is_some() {
            kinds.push(WidgetKind::Coach);
        }
        if self.contact.is_some() {
            kinds.push(WidgetKind::Contact);
        }
        kinds
    }

    /// Let `elapsed_ms` pass for every widget with scheduled work.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(chat) = self.chat.as_mut() {
            events.extend(chat.advance(elapsed_ms));
        }
        if let Some(timer) = self.timer.as_mut() {
            events.extend(timer.advance(elapsed_ms));
        }
        if let Some(coach) = self.coach.as_mut() {
            events.extend(coach.advance(elapsed_ms));
        }
        events
    }

    /// Milliseconds until any widget next has something to do.
    pub fn next_due_in(&self) -> Option<u64> {
        [
            self.chat.as_ref().and_then(ChatWidget::next_reply_in),
            self.timer.as_ref().and_then(MeditationTimer::next_tick_in),
            self.coach.as_ref().and_then(ChatWidget::next_reply_in),
        ]
        .into_iter()
        .flatten()
        .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageKind;

    fn load(kind: PageKind) -> PageRuntime {
        let config = Config::default();
        PageRuntime::load(Page::builtin(kind, &config.timer.presets), &config)
    }

    #[test]
    fn each_page_mounts_its_widgets() {
        assert_eq!(load(PageKind::Product).mounted(), vec![WidgetKind::Chat, WidgetKind::Mood]);
        assert_eq!(load(PageKind::Services).mounted(), vec![WidgetKind::Timer, WidgetKind::Coach]);
        assert_eq!(load(PageKind::Contact).mounted(), vec![WidgetKind::Contact]);
        assert!(load(PageKind::Index).mounted().is_empty());
    }

    #[test]
    fn advance_fans_out_to_timer_and_coach() {
        let mut rt = load(PageKind::Services);
        rt.timer.as_mut().unwrap().start();
        rt.coach.as_mut().unwrap().send_text("timer");
        assert_eq!(rt.next_due_in(), Some(350));

        let events = rt.advance(1000);
        assert_eq!(events.len(), 2);
        assert_eq!(rt.timer.as_ref().unwrap().remaining_secs(), 59);
        assert_eq!(
            rt.coach.as_ref().unwrap().log().last().unwrap().text,
            "Start a short meditation timer."
        );
    }
}
