use std::sync::Arc;

use dioxus::html::input_data::keyboard_types::Key;
use dioxus::prelude::*;

use super::components::*;
use super::types::*;
use crate::guard_core::{Moderator, Turn};

static EXAMPLES: [&str; 5] = [
    "What is IPFI?",
    "How does Story Protocol work?",
    "What's the weather like today?",
    "Can you explain DeFi x AI integration?",
    "What's your favorite color?",
];

pub struct AppProps {
    pub moderator: Arc<Moderator>,
}

/// Chat widget. Every sent message is judged together with the answers
/// already shown in this session.
pub fn app(cx: Scope<AppProps>) -> Element {
    let moderator = &cx.props.moderator;
    let draft = use_ref(cx, String::new);
    let messages = use_ref(cx, Vec::<ChatLine>::new);
    let history = use_ref(cx, Vec::<Turn>::new);
    let send_lock = use_state(cx, || false);
    let clean = use_state(cx, || false);
    let loading = use_state(cx, || false);

    let submit = move |text: String| {
        if *send_lock.get() {
            return;
        }
        if text.is_empty() {
            return;
        }
        send_lock.set(true);
        loading.set(true);
        clean.set(true);
        draft.set(String::new());
        messages
            .write()
            .push(ChatLine::new(Speaker::User, text.clone()));
        let prior = history.read().clone();

        cx.spawn({
            to_owned![send_lock, loading, messages, history];
            let moderator = moderator.clone();

            async move {
                match moderator.decide(&text, &prior).await {
                    Ok(decision) => {
                        messages
                            .write()
                            .push(ChatLine::new(Speaker::Bot, decision.to_string()));
                        history.write().push(Turn::new(text, decision.to_string()));
                    }
                    Err(err) => {
                        messages
                            .write()
                            .push(ChatLine::new(Speaker::Bot, format!("Error: {}", err)));
                    }
                }

                loading.set(false);
                send_lock.set(false);
            }
        });
    };

    let send_enter = move |e: Event<KeyboardData>| {
        if let Key::Enter = e.data.key() {
            submit(draft.read().trim().to_owned());
        }
    };

    let send_button = move |_| {
        submit(draft.read().trim().to_owned());
    };

    let pick_example = move |text: &'static str| {
        submit(text.to_owned());
    };

    cx.render(rsx!(
        style { include_str!("./style.css") }
        div {
            id: "header",
            h1 {"Guardrail Chatbot"}
            h2 {"Classifies whether a message fits the DeFi, IP and Story Protocol moderation policy (answers Yes/No only)."}
        }
        div {
            id: "chat-window",
            class: "chat-window",
            for msg in messages.read().iter() {
                match msg.speaker {
                    Speaker::User => rsx!(UserMessage { content: msg.content.clone() }),
                    Speaker::Bot => rsx!(OtherMessage { content: msg.content.clone() }),
                }
            }
            if *loading.get() {
                rsx!(Loading{})
            }
        }
        div {
            id: "examples",
            for text in EXAMPLES.into_iter() {
                Example {
                    text: text,
                    on_pick: pick_example,
                }
            }
        }
        div {
            id: "input-area",
            UserInput {
                draft: draft,
                clean: clean,
                on_press: send_enter,
            }
            button {
                id: "send-button",
                onclick: send_button, "Send" }
        }
        div {
            id: "bottom-holder"
        }
    ))
}
