//! Data models for the connection provider.

pub mod connection;

pub use connection::{BackendKind, DbProperties, Directive, PoolSizing, ProviderInfo, StoreLifecycle};
