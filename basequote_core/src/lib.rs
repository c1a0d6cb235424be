// src/lib.rs
pub mod bootstrap;
pub mod composite;
pub mod config;
pub mod error;
pub mod offers;
pub mod round;
pub mod vendors;

use async_trait::async_trait;

pub use crate::bootstrap::{build_dispatcher, BootstrapReport};
pub use crate::composite::{CompositeDispatcher, VendorRegistration};
pub use crate::config::AppConfig;
pub use crate::error::VendorError;
pub use crate::offers::{
    Currency, Diagnostic, Money, Offer, SequenceKey, SequenceOffers, SequenceRecord, Severity,
    VendorInfo, TURNAROUND_UNKNOWN,
};
pub use crate::round::RoundState;

/// The uniform operation set every vendor backend implements.
///
/// A backend is free to complete a round synchronously inside
/// `search_offers` or to finish it in the background; callers only observe
/// the poll contract: start a round, poll `is_running`, read `get_offers`.
///
/// Contract: once a round started by `search_offers(batch)` reports
/// `is_running() == false`, `get_offers()` returns exactly `batch.len()`
/// entries, index-aligned with the batch. While still running, a partial
/// (possibly empty-offers) result is acceptable and is not an error.
#[async_trait]
pub trait SearchableVendor: Send + Sync {
    /// Short name of the backend, for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Begin a search round for every sequence in `batch`. Calling this
    /// again before the previous round was read discards that round and
    /// starts a new one. Failures do not escape this call; they surface as
    /// diagnostics on the returned offers.
    async fn search_offers(&mut self, batch: &[SequenceRecord]);

    /// True while the most recent round has not produced its full result
    /// set.
    fn is_running(&self) -> bool;

    /// The current result set of the most recent round, one entry per
    /// searched sequence once complete.
    fn get_offers(&mut self) -> Vec<SequenceOffers>;

    /// Discard any held result and return to the idle state.
    fn clear(&mut self);
}
