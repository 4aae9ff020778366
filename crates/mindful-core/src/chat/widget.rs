use serde::{Deserialize, Serialize};
use tracing::debug;

use super::message::Message;
use super::script::{Dispatcher, Reply};
use crate::events::Event;
use crate::page::{ids, Page};
use crate::scheduler::Scheduler;

pub const CHAT_REPLY_DELAY_MS: u64 = 400;
pub const COACH_REPLY_DELAY_MS: u64 = 350;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    /// Product-page chatbot demo.
    Chat,
    /// Services-page coach with quick actions.
    Coach,
}

impl ChatKind {
    fn required_ids(&self) -> [&'static str; 3] {
        match self {
            ChatKind::Chat => [ids::CHAT_WINDOW, ids::CHAT_INPUT, ids::CHAT_SEND],
            ChatKind::Coach => [ids::COACH_WINDOW, ids::COACH_INPUT, ids::COACH_SEND],
        }
    }

    fn clear_id(&self) -> &'static str {
        match self {
            ChatKind::Chat => ids::CHAT_CLEAR,
            ChatKind::Coach => ids::COACH_CLEAR,
        }
    }

    pub fn default_delay_ms(&self) -> u64 {
        match self {
            ChatKind::Chat => CHAT_REPLY_DELAY_MS,
            ChatKind::Coach => COACH_REPLY_DELAY_MS,
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        match self {
            ChatKind::Chat => Dispatcher::demo(),
            ChatKind::Coach => Dispatcher::coach(),
        }
    }
}

/// A mounted chat window with its input box and pending bot replies.
#[derive(Debug, Clone)]
pub struct ChatWidget {
    kind: ChatKind,
    dispatcher: Dispatcher,
    reply_delay_ms: u64,
    clear_enabled: bool,
    input: String,
    log: Vec<Message>,
    replies: Scheduler<Reply>,
}

impl ChatWidget {
    /// Attach to `page`. Returns `None` unless the window, input and send
    /// control are all present. The clear control is optional.
    pub fn mount(kind: ChatKind, page: &Page, reply_delay_ms: u64) -> Option<Self> {
        if !page.has_all(&kind.required_ids()) {
            debug!(?kind, page = %page.name, "chat widget not mounted");
            return None;
        }
        let dispatcher = kind.dispatcher();
        let greeting = Message::bot(dispatcher.greeting(), Vec::new());
        Some(Self {
            kind,
            dispatcher,
            reply_delay_ms,
            clear_enabled: page.has(kind.clear_id()),
            input: String::new(),
            log: vec![greeting],
            replies: Scheduler::new(),
        })
    }

    pub fn kind(&self) -> ChatKind {
        self.kind
    }

    pub fn log(&self) -> &[Message] {
        &self.log
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn pending_replies(&self) -> usize {
        self.replies.pending()
    }

    pub fn reply_delay_ms(&self) -> u64 {
        self.reply_delay_ms
    }

    pub fn can_clear(&self) -> bool {
        self.clear_enabled
    }

    /// Send-button click. Appends the trimmed input as a user message, empties
    /// the input box and schedules the bot reply. Blank input does nothing.
    pub fn send(&mut self) -> Option<Event> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.input.clear();

        let reply = self.dispatcher.reply(&text);
        self.replies.schedule_once(self.reply_delay_ms, reply);

        let message = Message::user(text);
        debug!(kind = ?self.kind, text = %message.text, "user message");
        self.log.push(message.clone());
        Some(Event::MessageAppended {
            widget: self.kind,
            message,
        })
    }

    /// Type `text` into the box and press send.
    pub fn send_text(&mut self, text: &str) -> Option<Event> {
        self.set_input(text);
        self.send()
    }

    /// Keydown in the input box. Enter behaves like the send button.
    pub fn key_down(&mut self, key: &str) -> Option<Event> {
        if key == "Enter" {
            self.send()
        } else {
            None
        }
    }

    /// Wipe the window and show the greeting again. Replies already in flight
    /// still arrive afterwards.
    pub fn clear(&mut self) -> Option<Event> {
        if !self.clear_enabled {
            return None;
        }
        self.log.clear();
        self.log
            .push(Message::bot(self.dispatcher.greeting(), Vec::new()));
        debug!(kind = ?self.kind, "chat cleared");
        Some(Event::ChatCleared { widget: self.kind })
    }

    /// Let `elapsed_ms` pass, delivering every reply that came due.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<Event> {
        self.replies
            .advance(elapsed_ms)
            .into_iter()
            .map(|(_, reply)| {
                let message = Message::bot(reply.text, reply.actions);
                self.log.push(message.clone());
                Event::MessageAppended {
                    widget: self.kind,
                    message,
                }
            })
            .collect()
    }

    /// Milliseconds until the next reply lands, if one is pending.
    pub fn next_reply_in(&self) -> Option<u64> {
        self.replies.next_due_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{Sender, CHAT_GREETING, COACH_GREETING};
    use crate::page::PageKind;

    fn chat() -> ChatWidget {
        let page = Page::builtin(PageKind::Product, &[]);
        ChatWidget::mount(ChatKind::Chat, &page, CHAT_REPLY_DELAY_MS).unwrap()
    }

    fn coach() -> ChatWidget {
        let page = Page::builtin(PageKind::Services, &[60]);
        ChatWidget::mount(ChatKind::Coach, &page, COACH_REPLY_DELAY_MS).unwrap()
    }

    #[test]
    fn mount_requires_window_input_and_send() {
        let page = Page::new("partial").with_elements([ids::CHAT_WINDOW, ids::CHAT_INPUT]);
        assert!(ChatWidget::mount(ChatKind::Chat, &page, 400).is_none());
        let contact = Page::builtin(PageKind::Contact, &[]);
        assert!(ChatWidget::mount(ChatKind::Coach, &contact, 350).is_none());
    }

    #[test]
    fn mounted_window_starts_with_greeting() {
        let w = chat();
        assert_eq!(w.log().len(), 1);
        assert_eq!(w.log()[0].text, CHAT_GREETING);
        assert_eq!(w.log()[0].sender, Sender::Bot);
    }

    #[test]
    fn user_message_is_immediate_and_reply_is_delayed() {
        let mut w = chat();
        let event = w.send_text("  I need a breathing exercise  ");
        assert!(matches!(event, Some(Event::MessageAppended { .. })));
        assert_eq!(w.log().len(), 2);
        assert_eq!(w.log()[1].text, "I need a breathing exercise");
        assert_eq!(w.log()[1].sender, Sender::User);
        assert_eq!(w.input(), "");

        assert!(w.advance(399).is_empty());
        let delivered = w.advance(1);
        assert_eq!(delivered.len(), 1);
        let last = w.log().last().unwrap();
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(last.text, "Try inhale 4s · hold 4s · exhale 6s. Ready?");
    }

    #[test]
    fn blank_input_appends_nothing() {
        let mut w = chat();
        assert!(w.send_text("   \t ").is_none());
        assert!(w.send_text("").is_none());
        assert_eq!(w.log().len(), 1);
        assert_eq!(w.pending_replies(), 0);
    }

    #[test]
    fn enter_key_sends() {
        let mut w = chat();
        w.set_input("my goal");
        assert!(w.key_down("Shift").is_none());
        assert!(w.key_down("Enter").is_some());
        w.advance(CHAT_REPLY_DELAY_MS);
        assert_eq!(
            w.log().last().unwrap().text,
            "Small step: 5-minute walk today. Want a reminder?"
        );
    }

    #[test]
    fn clear_reseeds_greeting_and_keeps_pending_reply() {
        let mut w = coach();
        w.send_text("book onboarding");
        assert!(w.clear().is_some());
        assert_eq!(w.log().len(), 1);
        assert_eq!(w.log()[0].text, COACH_GREETING);

        w.advance(COACH_REPLY_DELAY_MS);
        assert_eq!(w.log().len(), 2);
        assert_eq!(w.log()[1].text, "Talk to our sales team!");
        assert_eq!(w.log()[1].actions[0].href, "contact.html#booking");
    }

    #[test]
    fn clear_without_control_is_a_no_op() {
        let page = Page::new("bare").with_elements([
            ids::CHAT_WINDOW,
            ids::CHAT_INPUT,
            ids::CHAT_SEND,
        ]);
        let mut w = ChatWidget::mount(ChatKind::Chat, &page, 400).unwrap();
        w.send_text("hello");
        assert!(w.clear().is_none());
        assert_eq!(w.log().len(), 2);
    }

    #[test]
    fn coach_uses_shorter_delay() {
        let mut w = coach();
        w.send_text("open the chatbot");
        assert_eq!(w.next_reply_in(), Some(350));
        assert_eq!(w.advance(350).len(), 1);
        assert_eq!(w.log().last().unwrap().actions[0].label, "Open demo");
    }
}
