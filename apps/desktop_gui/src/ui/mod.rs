//! UI layer for the user management screen.

pub mod app;

pub use app::UserAdminApp;
