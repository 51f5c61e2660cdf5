//! Core business logic - framework-agnostic pricing, normalization, migration and ranking.
//!
//! Nothing in here knows about Discord. Persistence is reached through
//! [`store::ProductStore`] and user interaction through [`notify::Notifier`].

/// Unit-price calculation for each category
pub mod calculator;

/// Legacy local sources awaiting migration
pub mod legacy;

/// One-time migration of legacy records into the store
pub mod migration;

/// Repair of records written by older schema versions
pub mod normalizer;

/// Toasts, alerts and confirmation prompts
pub mod notify;

/// Cheapest-first ranking within a category
pub mod ranking;

/// The product record and its categories
pub mod record;

/// Per-user working state and user actions
pub mod session;

/// Authoritative product storage
pub mod store;
