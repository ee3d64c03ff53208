//! Background worker executing user API requests off the UI thread.

pub mod commands;
pub mod runtime;
