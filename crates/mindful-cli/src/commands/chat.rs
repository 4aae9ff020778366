use std::time::Duration;

use clap::Args;
use mindful_core::{ChatKind, ChatWidget, Config, Message, PageKind, Sender};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args)]
pub struct ChatArgs {
    /// Talk to the services-page coach instead of the chatbot demo
    #[arg(long)]
    pub coach: bool,
    /// Read messages from stdin and wait the real reply delay
    #[arg(long, short)]
    pub interactive: bool,
    /// Messages to send, in order
    pub messages: Vec<String>,
}

fn mount(args: &ChatArgs, config: &Config) -> Result<ChatWidget, Box<dyn std::error::Error>> {
    let (kind, page) = if args.coach {
        (ChatKind::Coach, PageKind::Services)
    } else {
        (ChatKind::Chat, PageKind::Product)
    };
    let mut runtime = super::load_page(page, config);
    let widget = match kind {
        ChatKind::Chat => runtime.chat.take(),
        ChatKind::Coach => runtime.coach.take(),
    };
    Ok(widget.ok_or("chat widget is not available on this page")?)
}

pub fn run(args: ChatArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = mount(&args, config)?;

    if args.interactive {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        return rt.block_on(interactive(widget));
    }

    for text in &args.messages {
        if widget.send_text(text).is_some() {
            let delay = widget.reply_delay_ms();
            widget.advance(delay);
        }
    }
    println!("{}", serde_json::to_string_pretty(widget.log())?);
    Ok(())
}

async fn interactive(mut widget: ChatWidget) -> Result<(), Box<dyn std::error::Error>> {
    for message in widget.log() {
        print_message(message);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/clear" {
            if widget.clear().is_some() {
                for message in widget.log() {
                    print_message(message);
                }
            }
            continue;
        }

        widget.set_input(line);
        if widget.key_down("Enter").is_none() {
            continue;
        }
        while let Some(wait) = widget.next_reply_in() {
            tokio::time::sleep(Duration::from_millis(wait)).await;
            for event in widget.advance(wait) {
                if let mindful_core::Event::MessageAppended { message, .. } = event {
                    print_message(&message);
                }
            }
        }
    }
    Ok(())
}

/// The user's own lines are already on screen; only bot bubbles are echoed.
fn print_message(message: &Message) {
    if message.sender != Sender::Bot {
        return;
    }
    println!("bot> {}", message.text);
    for action in &message.actions {
        println!("      -> {} ({})", action.label, action.href);
    }
}
