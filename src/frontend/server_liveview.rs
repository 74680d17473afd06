use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::ws::WebSocketUpgrade, response::Html, routing::get, Router};

use super::api;
use super::app::{app, AppProps};
use crate::config::Config;
use crate::guard_core::{Moderator, OpenAiCompletion, Policy};

pub async fn start_server(config: Config) -> Result<()> {
    let completion = Arc::new(OpenAiCompletion::new(&config.api_key, &config.api_base));
    let moderator = Arc::new(Moderator::new(completion, Policy::default(), config.timeout));

    tracing::info!(
        addr = %config.listen_addr,
        model = %moderator.policy().model,
        "listening on http://{}",
        config.listen_addr
    );

    let routes = router(moderator, &config.reachable_addr);
    axum::Server::bind(&config.listen_addr)
        .serve(routes.into_make_service())
        .await
        .context("server stopped")?;
    Ok(())
}

/// Chat widget at `/` (LiveView over `/ws`) plus the JSON API.
pub fn router(moderator: Arc<Moderator>, reachable_addr: &str) -> Router {
    let view = dioxus_liveview::LiveViewPool::new();

    let page = Html(format!(
        r#"
    <!DOCTYPE html>
    <html>
        <head>
            <title>Guardrail Chatbot</title>
            <meta name="viewport"
            content="width=device-width,
            initial-scale=1,
            minimum-scale=1,
            maximum-scale=1,
            user-scalable=no">
        </head>
        <body> <div id="main"></div> </body>
        {glue}
    </html>
    "#,
        glue = dioxus_liveview::interpreter_glue(&format!("ws://{reachable_addr}/ws"))
    ));

    let widget_moderator = moderator.clone();

    Router::new()
        .route("/", get(move || async move { page }))
        .route(
            "/ws",
            get(move |ws: WebSocketUpgrade| async move {
                ws.on_upgrade(move |socket| async move {
                    let props = AppProps {
                        moderator: widget_moderator,
                    };
                    _ = view
                        .launch_with_props(dioxus_liveview::axum_socket(socket), app, props)
                        .await;
                })
            }),
        )
        .merge(api::router(moderator))
}
