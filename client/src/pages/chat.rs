//! Chat view placeholder; the conversation UI mounts here.

use leptos::prelude::*;

#[component]
pub fn ChatPage() -> impl IntoView {
    view! {
        <div class="chat-page">
            <h1>"Chat"</h1>
        </div>
    }
}
