//! NLU result interpretation engine for voxbridge.
//!
//! This crate provides:
//!
//! - **Classification**: the pure [`classify`] function turning a typed
//!   understand response into an [`Outcome`].
//! - **Liveness**: the [`LivenessLookup`] trait plus the DashMap-backed
//!   [`ComponentRegistry`] tracking which modules can receive commands.

pub mod classify;
pub mod outcome;
pub mod registry;

pub use classify::classify;
pub use outcome::Outcome;
pub use registry::{ComponentInfo, ComponentRegistry, ComponentState, LivenessLookup};
