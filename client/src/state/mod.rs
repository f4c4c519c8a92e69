//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The session is the only state the shell owns; it is provided as a context
//! value and passed explicitly into the API client.

pub mod session;
