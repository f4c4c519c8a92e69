//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_location,
};

use crate::net::client::BrowserClient;
use crate::pages::{
    about::AboutPage, agent_select::AgentSelectPage, chat::ChatPage, login::LoginPage, new_page::NewPage,
};
use crate::routes::{ABOUT, AGENT_SELECT, CHAT, LOGIN, LOGIN_PAGE, NEW};
use crate::state::session::Session;
use crate::util::auth::{Guarded, force_login_redirect, provide_client_ready};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session and API client contexts, then mounts the router with
/// every view (and the not-found fallback) behind [`Guarded`].
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = Session::browser();
    let api = Arc::new(BrowserClient::browser(session.clone(), Some(Arc::new(force_login_redirect))));
    provide_context(session);
    provide_context(api);
    provide_client_ready();

    view! {
        <Stylesheet id="leptos" href="/pkg/agent-desk.css"/>
        <Title text="Agent Desk"/>

        <Router>
            <Routes fallback=|| {
                let path = use_location().pathname.get_untracked();
                view! { <Guarded path=path>"Page not found."</Guarded> }
            }>
                <Route path=StaticSegment(LOGIN.segment()) view=|| view! { <Guarded path=LOGIN.path><LoginPage/></Guarded> }/>
                <Route path=StaticSegment(NEW.segment()) view=|| view! { <Guarded path=NEW.path><NewPage/></Guarded> }/>
                <Route path=StaticSegment(CHAT.segment()) view=|| view! { <Guarded path=CHAT.path><ChatPage/></Guarded> }/>
                <Route path=StaticSegment(ABOUT.segment()) view=|| view! { <Guarded path=ABOUT.path><AboutPage/></Guarded> }/>
                <Route
                    path=StaticSegment(LOGIN_PAGE.segment())
                    view=|| view! { <Guarded path=LOGIN_PAGE.path><LoginPage/></Guarded> }
                />
                <Route
                    path=StaticSegment(AGENT_SELECT.segment())
                    view=|| view! { <Guarded path=AGENT_SELECT.path><AgentSelectPage/></Guarded> }
                />
            </Routes>
        </Router>
    }
}
