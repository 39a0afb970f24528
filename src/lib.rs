//! Campus Events Site
//!
//! Client-side interaction layer for a static college-events site.
//!
//! This library provides:
//! - A light/dark/system theme engine persisted in browser storage
//! - Mobile navigation and modal overlay state
//! - Event detail panels loaded from static HTML fragments
//! - Web UI (Dioxus, compiled to WebAssembly)

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus UI app
pub mod app;

pub mod config;
pub mod events;
pub mod overlay;
pub mod theme;

// Browser adapters (excluded from native builds)
#[cfg(target_arch = "wasm32")]
pub mod web;
