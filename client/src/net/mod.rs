//! Networking modules for the authenticated REST client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` owns the request pipeline, `middleware` the ordered stages that
//! run around the transport, `envelope` and `error` the response
//! normalization, and `transport` the browser fetch seam. `api` holds the few
//! endpoints the shell calls itself.

pub mod api;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod middleware;
pub mod transport;
pub mod types;
