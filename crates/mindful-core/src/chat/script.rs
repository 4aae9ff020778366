//! Scripted reply tables.
//!
//! A [`Dispatcher`] is an ordered list of keyword rules. The first rule with
//! any keyword contained in the lower-cased input wins; with no match the
//! fallback reply is used. Matching is plain substring containment, so
//! "chatter" still counts as "chat".

use serde::{Deserialize, Serialize};

use super::message::QuickAction;

/// What the bot says back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    #[serde(default)]
    pub actions: Vec<QuickAction>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_actions(text: impl Into<String>, actions: Vec<QuickAction>) -> Self {
        Self {
            text: text.into(),
            actions,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub keywords: Vec<&'static str>,
    pub reply: Reply,
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    rules: Vec<KeywordRule>,
    fallback: Reply,
    greeting: &'static str,
}

pub const CHAT_GREETING: &str = "Hi, I’m here to help. Try “breathing exercise”.";
pub const COACH_GREETING: &str = "Hi. Try “meditation”, “mood tracking”, “book”, or “chatbot”.";

impl Dispatcher {
    pub fn new(rules: Vec<KeywordRule>, fallback: Reply, greeting: &'static str) -> Self {
        Self {
            rules,
            fallback,
            greeting,
        }
    }

    /// Replies of the product-page chatbot demo.
    pub fn demo() -> Self {
        Self::new(
            vec![
                KeywordRule {
                    keywords: vec!["breath"],
                    reply: Reply::text("Try inhale 4s · hold 4s · exhale 6s. Ready?"),
                },
                KeywordRule {
                    keywords: vec!["mood"],
                    reply: Reply::text("On a scale 1–5, how was today?"),
                },
                KeywordRule {
                    keywords: vec!["goal"],
                    reply: Reply::text("Small step: 5-minute walk today. Want a reminder?"),
                },
            ],
            Reply::text(
                "You can ask for a breathing exercise, a mood check-in, or a small goal.",
            ),
            CHAT_GREETING,
        )
    }

    /// Replies of the services-page coach, each with quick actions.
    pub fn coach() -> Self {
        let start = || QuickAction::new("Start 1-min", "#meditations");
        Self::new(
            vec![
                KeywordRule {
                    keywords: vec!["chat"],
                    reply: Reply::with_actions(
                        "Open the chatbot demo on the Product page.",
                        vec![QuickAction::new("Open demo", "product.html#chat")],
                    ),
                },
                KeywordRule {
                    keywords: vec!["medit", "timer"],
                    reply: Reply::with_actions("Start a short meditation timer.", vec![start()]),
                },
                KeywordRule {
                    keywords: vec!["mood", "track"],
                    reply: Reply::with_actions(
                        "Learn about mood tracking on the Product page.",
                        vec![QuickAction::new("View mood tracking", "product.html#")],
                    ),
                },
                KeywordRule {
                    keywords: vec!["contact", "book"],
                    reply: Reply::with_actions(
                        "Talk to our sales team!",
                        vec![QuickAction::new("Book onboarding", "contact.html#booking")],
                    ),
                },
            ],
            Reply::with_actions(
                "I can help you start a meditation, see mood tracking, open the chatbot demo, or book a chat with our sales team.",
                vec![
                    start(),
                    QuickAction::new("Chatbot demo", "product.html#chat"),
                    QuickAction::new("Book onboarding", "contact.html#booking"),
                ],
            ),
            COACH_GREETING,
        )
    }

    /// Index of the rule that answers `input`, or `None` for the fallback.
    pub fn matching_rule(&self, input: &str) -> Option<usize> {
        let lowered = input.to_lowercase();
        self.rules
            .iter()
            .position(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
    }

    pub fn reply(&self, input: &str) -> Reply {
        match self.matching_rule(input) {
            Some(idx) => self.rules[idx].reply.clone(),
            None => self.fallback.clone(),
        }
    }

    pub fn greeting(&self) -> &'static str {
        self.greeting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_matches_in_priority_order() {
        let d = Dispatcher::demo();
        assert_eq!(
            d.reply("I need a breathing exercise").text,
            "Try inhale 4s · hold 4s · exhale 6s. Ready?"
        );
        // "breath" outranks "mood" when both appear
        assert_eq!(d.matching_rule("my mood and my breath"), Some(0));
        assert_eq!(d.matching_rule("set a GOAL"), Some(2));
        assert_eq!(d.matching_rule("hello"), None);
        assert!(d.reply("hello").text.starts_with("You can ask"));
    }

    #[test]
    fn coach_replies_carry_actions() {
        let d = Dispatcher::coach();
        let r = d.reply("Start the Meditation please");
        assert_eq!(r.text, "Start a short meditation timer.");
        assert_eq!(r.actions, vec![QuickAction::new("Start 1-min", "#meditations")]);

        let fallback = d.reply("what can you do?");
        assert_eq!(fallback.actions.len(), 3);
    }

    #[test]
    fn coach_chat_outranks_booking() {
        let d = Dispatcher::coach();
        assert_eq!(d.matching_rule("book a chat"), Some(0));
        assert_eq!(d.matching_rule("track my timer"), Some(1));
        assert_eq!(d.matching_rule("contact me"), Some(3));
    }

    #[test]
    fn substring_matching_can_misfire() {
        // "chatter" contains "chat"; kept as-is.
        assert_eq!(Dispatcher::coach().matching_rule("idle chatter"), Some(0));
    }
}
