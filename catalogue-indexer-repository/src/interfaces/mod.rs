//! Interface definitions for the index store provider.
//!
//! This module defines the abstract `IndexStoreProvider` trait that allows
//! for dependency injection and swappable document store implementations.

mod index_store_provider;

pub use index_store_provider::IndexStoreProvider;
