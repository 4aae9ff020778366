//! Chat widgets: the product-page chatbot demo and the services-page coach.
//!
//! Both share one widget implementation and differ only in their element ids,
//! reply table and "thinking" delay.

mod message;
mod script;
mod widget;

pub use message::{Message, QuickAction, Sender};
pub use script::{Dispatcher, KeywordRule, Reply, CHAT_GREETING, COACH_GREETING};
pub use widget::{ChatKind, ChatWidget};
