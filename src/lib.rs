//! docsite - documentation and marketing site for the CLI
//!
//! This library provides:
//! - Theme preference model, resolver, dual-channel store and controller
//! - Dioxus pages and components (server-rendered and client app)
//! - Server-side page rendering with cookie-seeded theming (`server` feature)

pub mod app;
pub mod theme;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod ui;
