//! # Core Module
//!
//! This module provides the shared-state primitives used by the authority side of the
//! crate.
//!
//! ## Key Components
//! - `MtResource`: Thread-safe reference-counted resource with read-write locking
//! - `Registry`: Thread-safe keyed store that is populated once and queried thereafter
//!
//! ## Usage
//! ```rust
//! use vein_miner::core::{MtResource, Registry};
//!
//! // Thread-safe resource
//! let counter = MtResource::new(0);
//! *counter.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//!
//! // Resolve once, reuse afterwards
//! let registry: Registry<u32, String> = Registry::new();
//! let first = registry.get_or_insert_with(7, || "seven".to_string());
//! let again = registry.get_or_insert_with(7, || unreachable!());
//! assert_eq!(first, again);
//! ```

pub mod mt_resource;
pub mod registry;

pub use mt_resource::MtResource;
pub use registry::Registry;
