//! Post-login landing page.

#[cfg(test)]
#[path = "agent_select_test.rs"]
mod agent_select_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api;
use crate::net::client::BrowserClient;
use crate::routes::{ABOUT, CHAT, LOGIN_PATH, NEW};
use crate::state::session::Session;

/// Display name from the stored user info blob, if it has one.
fn display_name(user_info: Option<&str>) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(user_info?).ok()?;
    ["name", "username", "nickname"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::to_owned)
}

#[component]
pub fn AgentSelectPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<Arc<BrowserClient>>();
    let navigate = use_navigate();
    let greeting = display_name(session.user_info().as_deref())
        .map_or_else(|| "Welcome".to_owned(), |name| format!("Welcome, {name}"));

    let on_logout = move |_| {
        api::logout(&api);
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <div class="agent-select-page">
            <h1>{greeting}</h1>
            <nav class="agent-select-nav">
                <a href=NEW.path>"New"</a>
                <a href=CHAT.path>"Chat"</a>
                <a href=ABOUT.path>"About"</a>
            </nav>
            <button class="logout-button" on:click=on_logout>"Log out"</button>
        </div>
    }
}
