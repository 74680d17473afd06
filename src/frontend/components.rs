#![allow(non_snake_case)]

use dioxus::prelude::*;

#[derive(PartialEq, Props)]
pub struct ContentProps {
    content: String,
}

pub fn UserMessage(cx: Scope<ContentProps>) -> Element {
    cx.render(rsx!(
        div {
            class: "chat-message user-message",
            "{cx.props.content}"
        }
    ))
}

pub fn OtherMessage(cx: Scope<ContentProps>) -> Element {
    cx.render(rsx!(
        div {
            class: "chat-message other-message",
            "{cx.props.content}"
        }
    ))
}

pub fn Loading(cx: Scope) -> Element {
    cx.render(rsx!(
        div {
            class: "chat-message other-message",
            div {
                class: "spinner",
            }
        }
    ))
}

#[derive(Props)]
pub struct DraftProps<'a> {
    draft: &'a UseRef<String>,
    clean: &'a UseState<bool>,
    on_press: EventHandler<'a, Event<KeyboardData>>,
}

/// The message box. Setting `clean` empties it on the next render.
pub fn UserInput<'a>(cx: Scope<'a, DraftProps<'a>>) -> Element<'a> {
    let draft = cx.props.draft;
    let clean = cx.props.clean;
    if **clean {
        clean.set(false);
        cx.render(rsx!(textarea {
            id: "user-input",
            placeholder: "Type your question...",
            value: "",
            oninput: move |e| {
                draft.set(e.value.clone());
            },
            onkeydown: move |e| cx.props.on_press.call(e),
        }))
    } else {
        cx.render(rsx!(textarea {
            id: "user-input",
            placeholder: "Type your question...",
            oninput: move |e| {
                draft.set(e.value.clone());
            },
            onkeydown: move |e| cx.props.on_press.call(e),
        }))
    }
}

#[derive(Props)]
pub struct ExampleProps<'a> {
    text: &'static str,
    on_pick: EventHandler<'a, &'static str>,
}

pub fn Example<'a>(cx: Scope<'a, ExampleProps<'a>>) -> Element<'a> {
    let text = cx.props.text;
    cx.render(rsx!(
        button {
            class: "example-button",
            onclick: move |_| cx.props.on_pick.call(text),
            "{text}"
        }
    ))
}
