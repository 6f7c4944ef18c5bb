//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session_gate` is the top-level view router. The patient form and table
//! render the patient records page and write to its state signal.

pub mod patient_form;
pub mod patient_table;
pub mod session_gate;
