//! Navigation route table.
//!
//! Every route pairs a stable name with a path. `app::App` mounts one view
//! per entry; the guard and the API client only need the login and landing
//! paths exposed here.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// A named navigation target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    pub path: &'static str,
}

impl RouteDef {
    /// Path without the leading slash, as the router's static segments expect.
    pub fn segment(&self) -> &'static str {
        self.path.trim_start_matches('/')
    }
}

pub const LOGIN: RouteDef = RouteDef { name: "login", path: "/" };
pub const NEW: RouteDef = RouteDef { name: "new", path: "/new" };
pub const CHAT: RouteDef = RouteDef { name: "chat", path: "/chat" };
pub const ABOUT: RouteDef = RouteDef { name: "about", path: "/about" };
pub const LOGIN_PAGE: RouteDef = RouteDef { name: "login-page", path: "/login" };
pub const AGENT_SELECT: RouteDef = RouteDef { name: "agent-select", path: "/agent-select" };

pub static ROUTES: [RouteDef; 6] = [LOGIN, NEW, CHAT, ABOUT, LOGIN_PAGE, AGENT_SELECT];

/// Where unauthenticated navigation is sent.
pub const LOGIN_PATH: &str = LOGIN.path;
/// Where an authenticated user lands after visiting a login path.
pub const LANDING_PATH: &str = AGENT_SELECT.path;

/// Both `/` and `/login` render the login view.
pub fn is_login_path(path: &str) -> bool {
    path == LOGIN.path || path == LOGIN_PAGE.path
}
