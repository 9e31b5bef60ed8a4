//! `stockdesk-desktop`
//!
//! **Responsibility:** hosting shell of the stock document viewer.
//!
//! This crate provides:
//! - Shell configuration from the environment
//! - A file-backed session store (the persisted client storage)
//! - Navigation history that honours push/replace redirects
//! - The route table, with protected routes gated by the access guard
//!
//! Rendering is left to whichever surface consumes [`Screen`].

pub mod config;
pub mod navigation;
pub mod session_file;
pub mod shell;

pub use config::ShellConfig;
pub use navigation::History;
pub use session_file::FileSessionStore;
pub use shell::{Route, Routes, Screen, Shell, ShellError};
