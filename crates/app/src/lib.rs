//! # pantrybot-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `UserRepository` — registration and status for chat users
//!   - `ProductRepository` — product records, listings, state transitions
//! - Define use-case services consumed by the bot front end:
//!   - `RegistrationService` — sign-up, reply-text mapping, status handling
//!   - `PantryService` — add products, resolve listing codes, move products
//!     between lifecycle states
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `pantrybot-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod ports;
pub mod services;
