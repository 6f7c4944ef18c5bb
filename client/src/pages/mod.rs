//! Page-level route components.

pub mod login;
pub mod patients;
