//! Member form engine
//!
//! Builds sign-up and profile-edit forms from a schema served by the member
//! service, keeps edits in a flat state store and serializes them back into a
//! multipart payload. The terminal client in `app`/`ui` hosts the engine.

pub mod app;
pub mod codec;
pub mod config;
pub mod error;
pub mod picker;
pub mod platform;
pub mod resolver;
pub mod schema;
pub mod service;
pub mod session;
pub mod state;
pub mod submission;
pub mod ui;
