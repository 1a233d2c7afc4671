//! # pantrybot-domain
//!
//! Pure domain model for the pantrybot shopping-list and fridge tracker.
//!
//! ## Responsibilities
//! - Foundational types: scopes, timestamps, error conventions
//! - Define **Users** (chat members who registered with the bot)
//! - Define **Products** (tracked groceries with a lifecycle state and an
//!   expiry countdown)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod product;
pub mod scope;
pub mod time;
pub mod user;
