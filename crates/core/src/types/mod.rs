//! Core types for the GoMarketplace cart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod item;

pub use id::*;
pub use item::{LineItem, sort_by_title};
