//! "New" view placeholder.

use leptos::prelude::*;

#[component]
pub fn NewPage() -> impl IntoView {
    view! {
        <div class="new-page">
            <h1>"New"</h1>
        </div>
    }
}
