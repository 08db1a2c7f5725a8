//! Domain modules organized as vertical slices.
//!
//! Each fetched domain contains:
//! - `mod.rs` — Rich domain types (validated, business-logic-ready)
//! - `wire.rs` — Raw serde structs matching API responses
//! - `convert.rs` — `TryFrom` conversions with validation
//! - `state.rs` — App-owned state containers with update methods
//! - `client.rs` — Sub-client with HTTP methods
//!
//! `portfolio` is local-only and has none of the network pieces.

pub mod asset;
pub mod portfolio;
pub mod price_history;
