//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! View and screen state machines live in `frontdesk`; this module holds only
//! what ties them to the browser: the connected backend handle and the
//! lifetime of the session subscription.

pub mod backend;
pub mod session_link;
