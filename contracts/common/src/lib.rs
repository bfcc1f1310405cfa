//! Shared utilities and error types for the vault contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: standardised error codes for all contracts.
//! - [`access`]: the capability service every privileged entry point consults.
//! - [`assets`]: category and custody-unit types plus the client interfaces
//!   of the external asset registries.
//! - [`pausable`]: contract-wide emergency stop.
//! - [`ttl`]: storage TTL extension helpers.
//! - `testutils`: in-memory asset registries for tests (feature `testutils`).
//!
//! Contract-specific errors can extend the range starting at code **100** and
//! above, ensuring no collisions with the common set.

#![no_std]
#![allow(clippy::arithmetic_side_effects)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod access;
pub mod assets;
pub mod pausable;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
pub mod ttl;

pub use access::Capability;
pub use assets::{AssetKind, Category, CustodyUnit};

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by every contract in the suite.
///
/// # Code ranges
/// | Range   | Purpose                       |
/// |---------|-------------------------------|
/// | 1 – 9   | Lifecycle / initialisation    |
/// | 10 – 19 | Authentication & authorisation|
/// | 20 – 29 | Resource not found            |
/// | 30 – 39 | Validation / input            |
/// | 40 – 49 | Contract state                |
/// | 100+    | Reserved for contract-specific |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Caller lacks the capability required by the entry point.
    AccessDenied = 10,
    RecordNotFound = 21,
    InvalidInput = 30,
    // ── Contract state (40–49) ───────────────────────────────
    /// The contract is currently paused and cannot process requests.
    Paused = 40,
}
