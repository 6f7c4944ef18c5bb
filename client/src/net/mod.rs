//! Networking modules: the host server's REST endpoints and the browser
//! transport for the hosted backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` talks to our own server, `auth` and `rest` implement the
//! `frontdesk` collaborator traits over `gloo-net`, and `http` holds the
//! request/response glue they share.

pub mod api;
pub mod auth;
#[cfg(feature = "hydrate")]
mod http;
pub mod rest;
