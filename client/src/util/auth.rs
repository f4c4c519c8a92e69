//! Route guard and auth redirect helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every routed view is wrapped in [`Guarded`], which decides before the view
//! is built: authenticated users are bounced off the login views, everyone
//! else is bounced onto them. Until the browser session is readable (SSR and
//! the hydration pass) nothing is rendered, so a disallowed view never mounts.
//! The decision itself is a pure function so it can be tested without a router.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;

use crate::routes::{LANDING_PATH, LOGIN_PAGE, LOGIN_PATH, is_login_path};
use crate::state::session::Session;

/// Outcome of checking a navigation target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(&'static str),
}

/// Decide whether navigation to `target_path` may proceed.
pub fn evaluate(target_path: &str, authenticated: bool) -> GuardDecision {
    let on_login = is_login_path(target_path);
    if authenticated && on_login {
        return GuardDecision::Redirect(LANDING_PATH);
    }
    if !authenticated && !on_login {
        return GuardDecision::Redirect(LOGIN_PATH);
    }
    GuardDecision::Proceed
}

/// What a guarded route renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewGate {
    /// Session not readable yet; render nothing.
    Pending,
    Render,
    Redirect(&'static str),
}

/// Gate for a route at `route_path`. `authenticated` is `None` while the
/// session cannot be read.
pub fn gate(route_path: &str, authenticated: Option<bool>) -> ViewGate {
    let Some(authenticated) = authenticated else {
        return ViewGate::Pending;
    };
    match evaluate(route_path, authenticated) {
        GuardDecision::Proceed => ViewGate::Render,
        GuardDecision::Redirect(to) => ViewGate::Redirect(to),
    }
}

/// Flips to true once the app has hydrated in the browser.
#[derive(Clone, Copy, Debug)]
pub struct ClientReady(pub ReadSignal<bool>);

/// Provide [`ClientReady`]. Effects never run during SSR, so the flag stays
/// false there and on the first hydration pass.
pub fn provide_client_ready() {
    let (ready, set_ready) = signal(false);
    Effect::new(move || set_ready.set(true));
    provide_context(ClientReady(ready));
}

/// Render `children` only when [`gate`] allows `path`; otherwise redirect.
#[component]
pub fn Guarded(#[prop(into)] path: String, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<Session>();
    let ClientReady(ready) = expect_context::<ClientReady>();

    move || {
        let authenticated = ready.get().then(|| session.is_authenticated());
        match gate(&path, authenticated) {
            ViewGate::Pending => ().into_any(),
            ViewGate::Render => children().into_any(),
            ViewGate::Redirect(to) => {
                leptos::logging::log!("route guard: {path} -> {to}");
                let options = NavigateOptions { replace: true, ..NavigateOptions::default() };
                view! { <Redirect path=to options=options/> }.into_any()
            }
        }
    }
}

/// Hard navigation to the login view, discarding client state.
pub fn force_login_redirect() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(LOGIN_PAGE.path);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        leptos::logging::warn!("login redirect to {} skipped outside the browser", LOGIN_PAGE.path);
    }
}
