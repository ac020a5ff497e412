//! Core types for BeniLink.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;

pub use id::{OrderId, ProductId};
pub use money::{CurrencyCode, round2};
