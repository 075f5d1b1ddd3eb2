#![allow(dead_code)]
//! Fixture apps and logging shared by the integration tests.

use std::sync::Once;

use serde_json::{json, Value};
use stepwise_framework::ui::{h, text, UiNode};
use stepwise_framework::{App, Effect};
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Install a test-writer subscriber once. `RUST_LOG` overrides the default level.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(false)
            .try_init();
    });
}

pub fn count(state: &Value) -> i64 {
    state["count"].as_i64().unwrap_or(0)
}

/// `{ "by": n }` payload, defaulting to 1.
pub fn by(data: Option<&Value>) -> i64 {
    data.and_then(|d| d["by"].as_i64()).unwrap_or(1)
}

/// Counter with a view: `up` and `down` take an optional `{ "by": n }`.
pub fn counter_app() -> App<UiNode> {
    App::new()
        .state(json!({ "count": 0 }))
        .view(|state, _| {
            let n = count(state);
            h(
                "main",
                json!({}),
                [
                    h("h1", json!({}), [text(n)]),
                    h("button", json!({ "disabled": n <= 0 }), [text("-")]),
                    h("button", json!({}), [text("+")]),
                ],
            )
        })
        .action("down", |state, _, data| json!({ "count": count(state) - by(data) }))
        .action("up", |state, _, data| json!({ "count": count(state) + by(data) }))
}

/// App whose `init` immediately says "nothing".
pub fn basic_app() -> App<UiNode> {
    App::new()
        .init(|_, actions| actions.dispatch("say", Some(json!("nothing"))))
        .action("say", |_, _, data| json!({ "message": data.cloned() }))
        .view(|state, _| {
            h(
                "main",
                json!({}),
                [text(state["message"].as_str().unwrap_or_default().to_string())],
            )
        })
}

/// Effect that commits `state` after the current task yields, the way a
/// timer or I/O callback would.
pub fn later(state: Value) -> Effect {
    Effect::new(move |update| {
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            update.set(state);
        });
    })
}
