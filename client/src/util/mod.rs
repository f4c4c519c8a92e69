//! Browser-facing helpers shared by the app shell and pages.
//!
//! `auth` holds the navigation guard and the hard login redirect used when
//! the backend rejects the session.

pub mod auth;
