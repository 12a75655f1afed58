//! Market data provider abstractions.
//!
//! This module contains:
//! - The `ProviderClient` trait that wraps a remote quote provider
//! - The `RecordConverter` trait that maps provider records into the domain
//! - `SnapshotConverter`, a converter producing one record per stock
//!
//! # Architecture
//!
//! The fetch layer is provider-agnostic: it only knows how to split tickers
//! into batches, call a `ProviderClient` and hand the response to a
//! `RecordConverter`. Wire protocols, authentication and HTTP transport live
//! behind `ProviderClient` implementations.

mod converter;
mod traits;

pub use converter::{RecordConverter, SnapshotConverter};
pub use traits::ProviderClient;
