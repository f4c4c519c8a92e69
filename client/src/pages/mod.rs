//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! One page per entry in `routes::ROUTES`. Login and agent selection carry
//! the session flow; the rest are mount points for feature views.

pub mod about;
pub mod agent_select;
pub mod chat;
pub mod login;
pub mod new_page;
