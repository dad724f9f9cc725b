//! GoMarketplace Core - Shared types library.
//!
//! This crate provides the domain types shared across the GoMarketplace
//! cart components:
//! - `cart` - The cart state container and its storage backends
//! - `integration-tests` - End-to-end tests over real storage
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! async runtime. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Line items, type-safe product IDs, and cart ordering

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
