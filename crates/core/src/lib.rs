//! BeniLink Core - Domain library for the shop.
//!
//! This crate holds everything the storefront and the HTTP service agree on:
//! the derived product catalog, the pricing rules, the weight-based shipping
//! tiers, the client cart model, and the server-side order validator.
//!
//! # Architecture
//!
//! Everything in this crate is pure: no I/O, no async, no HTTP. Persistence
//! and payment bridges live in the `benilink-server` crate. Keeping the
//! pricing math here means every entry point (order validation, checkout
//! session creation, client estimates) computes from the same table and the
//! same formulas; the historical deployment carried two divergent copies.
//!
//! # Modules
//!
//! - [`types`] - Money rounding and type-safe IDs
//! - [`catalog`] - Static price list → priced, categorized products
//! - [`pricing`] - FCFA → EUR conversion, markup, VAT
//! - [`shipping`] - Weight-tier table and shipping fees
//! - [`weight`] - Per-unit weight estimation from product names
//! - [`cart`] - Client-held cart state with cross-tab reconciliation
//! - [`order`] - Validated order records
//! - [`validate`] - The trust boundary: client request → authoritative order

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod pricing;
pub mod shipping;
pub mod types;
pub mod validate;
pub mod weight;

pub use types::*;
