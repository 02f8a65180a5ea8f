//! # keyroll-core
//!
//! Configuration types shared across the keyroll crates.
//!
//! - [`KeyRing`]: the ordered, non-empty set of candidate signing keys
//! - [`IdentityDomain`] and [`ClientIdentity`]: who signs, as whom, and for which audience
//! - [`TenantId`]: the caller context learned preferences are recorded under
//! - [`KeyrollConfig`]: YAML / flag / environment configuration and its resolution

pub mod config;
pub mod error;
pub mod tenant;

pub use config::{
    ClientIdentity, IdentityDomain, KeyEntry, KeyRing, KeyrollConfig, ResolvedConfig,
    expand_home,
};
pub use error::ConfigError;
pub use tenant::TenantId;
