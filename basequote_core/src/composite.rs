//! Composite dispatcher.
//!
//! Fans one search out to every registered vendor backend and folds their
//! results back into one offer set per input sequence. The dispatcher does
//! no concurrency management of its own: backends may block inside
//! `search_offers` or finish in the background, and the aggregate is done
//! exactly when every backend is done.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::offers::{SequenceOffers, SequenceRecord, VendorInfo};
use crate::SearchableVendor;

/// Binds one vendor descriptor to its backend instance. Owned exclusively
/// by the dispatcher that holds it.
pub struct VendorRegistration {
    pub info: VendorInfo,
    pub backend: Box<dyn SearchableVendor>,
}

/// Aggregates any number of vendor backends behind the vendor capability.
#[derive(Default)]
pub struct CompositeDispatcher {
    registrations: Vec<VendorRegistration>,
    sequence_offers: Vec<SequenceOffers>,
}

impl CompositeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vendor registration. Key uniqueness is bootstrap's job; the
    /// dispatcher itself enforces nothing here.
    pub fn register_vendor(&mut self, info: VendorInfo, backend: Box<dyn SearchableVendor>) {
        debug!(vendor = %info.short_name, backend = backend.name(), "registering vendor");
        self.registrations.push(VendorRegistration { info, backend });
    }

    /// Descriptors of all registered vendors, in registration order.
    pub fn vendors(&self) -> Vec<VendorInfo> {
        self.registrations.iter().map(|r| r.info.clone()).collect()
    }

    pub fn vendor_count(&self) -> usize {
        self.registrations.len()
    }

    /// Poll `is_running` up to `max_polls` times, sleeping `interval`
    /// between polls. Returns true once idle, false if the bound runs out.
    ///
    /// The poll contract has no cancellation; a backend that never settles
    /// stalls the aggregate, so callers impose the bound here.
    pub async fn wait_until_idle(&self, max_polls: u32, interval: Duration) -> bool {
        for _ in 0..max_polls {
            if !self.is_running() {
                return true;
            }
            tokio::time::sleep(interval).await;
        }
        !self.is_running()
    }
}

#[async_trait]
impl SearchableVendor for CompositeDispatcher {
    fn name(&self) -> &'static str {
        "composite"
    }

    async fn search_offers(&mut self, batch: &[SequenceRecord]) {
        debug!(
            sequences = batch.len(),
            vendors = self.registrations.len(),
            "starting search round"
        );

        self.sequence_offers = batch
            .iter()
            .map(|seq| SequenceOffers::empty(seq.clone()))
            .collect();

        for registration in &mut self.registrations {
            registration.backend.search_offers(batch).await;
        }
    }

    /// True if at least one backend is still searching.
    fn is_running(&self) -> bool {
        self.registrations.iter().any(|r| r.backend.is_running())
    }

    /// Merge every backend's current results into the local sets.
    ///
    /// Local offer lists are rebuilt from scratch on every call, so reading
    /// twice without an intervening search yields the same result. A leaf
    /// entry whose key matches no local set is ignored; a vendor's offers
    /// are flattened into the matching set, so each set ends up ordered by
    /// vendor registration order.
    fn get_offers(&mut self) -> Vec<SequenceOffers> {
        for set in &mut self.sequence_offers {
            set.offers.clear();
        }

        for registration in &mut self.registrations {
            for leaf_set in registration.backend.get_offers() {
                if let Some(local) = self
                    .sequence_offers
                    .iter_mut()
                    .find(|s| s.sequence.key == leaf_set.sequence.key)
                {
                    local.push_offers(leaf_set.offers);
                }
            }
        }

        self.sequence_offers.clone()
    }

    fn clear(&mut self) {
        self.sequence_offers.clear();
        for registration in &mut self.registrations {
            registration.backend.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offers::{Currency, Money, SequenceKey};
    use crate::vendors::dummy::DummyVendor;
    use crate::vendors::invalid::InvalidVendor;
    use crate::vendors::mock::MockVendor;

    fn batch() -> Vec<SequenceRecord> {
        vec![
            SequenceRecord::new(1, "a", "ATG"),
            SequenceRecord::new(2, "b", "GGC"),
        ]
    }

    fn dispatcher_with(backends: Vec<Box<dyn SearchableVendor>>) -> CompositeDispatcher {
        let mut dispatcher = CompositeDispatcher::new();
        for (key, backend) in backends.into_iter().enumerate() {
            let info = VendorInfo::new(key as u32, format!("Vendor {}", key), format!("V{}", key));
            dispatcher.register_vendor(info, backend);
        }
        dispatcher
    }

    #[tokio::test]
    async fn test_result_aligned_with_batch() {
        let mut dispatcher = dispatcher_with(vec![
            Box::new(DummyVendor::new()),
            Box::new(InvalidVendor::new()),
        ]);

        let batch = batch();
        dispatcher.search_offers(&batch).await;
        assert!(dispatcher.wait_until_idle(100, Duration::from_millis(1)).await);

        let offers = dispatcher.get_offers();
        assert_eq!(offers.len(), batch.len());
        for (set, seq) in offers.iter().zip(&batch) {
            assert_eq!(set.sequence.key, seq.key);
            // one offer per vendor, in registration order
            assert_eq!(set.offers.len(), 2);
            assert!(set.offers[0].price.unwrap().is_known());
            assert!(!set.offers[1].price.unwrap().is_known());
        }
    }

    #[tokio::test]
    async fn test_dummy_scenario_120_eur() {
        let mut dispatcher = dispatcher_with(vec![Box::new(DummyVendor::new())]);

        dispatcher.search_offers(&batch()).await;
        assert!(dispatcher.wait_until_idle(100, Duration::from_millis(1)).await);

        let offers = dispatcher.get_offers();
        assert_eq!(offers.len(), 2);
        for set in &offers {
            assert_eq!(set.offers.len(), 1);
            let offer = &set.offers[0];
            assert_eq!(offer.price, Some(Money::new(120.0, Currency::Eur)));
            assert_eq!(offer.turnaround, 14);
        }
    }

    #[tokio::test]
    async fn test_is_running_is_or_of_children() {
        let mut dispatcher = dispatcher_with(vec![
            Box::new(DummyVendor::new()),
            Box::new(MockVendor::with_delay(Duration::from_millis(30))),
        ]);
        assert!(!dispatcher.is_running());

        dispatcher.search_offers(&batch()).await;
        // The dummy finished synchronously, the mock has not. One running
        // child is enough.
        assert!(dispatcher.is_running());

        assert!(dispatcher.wait_until_idle(1000, Duration::from_millis(2)).await);
        assert!(!dispatcher.is_running());
    }

    #[tokio::test]
    async fn test_get_offers_is_idempotent() {
        let mut dispatcher = dispatcher_with(vec![
            Box::new(DummyVendor::new()),
            Box::new(DummyVendor::new()),
        ]);

        dispatcher.search_offers(&batch()).await;
        let first = dispatcher.get_offers();
        let second = dispatcher.get_offers();
        assert_eq!(first, second);
        assert_eq!(first[0].offers.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_vendors() {
        let mut dispatcher = CompositeDispatcher::new();
        assert!(!dispatcher.is_running());

        let batch = batch();
        dispatcher.search_offers(&batch).await;
        assert!(!dispatcher.is_running());

        let offers = dispatcher.get_offers();
        assert_eq!(offers.len(), batch.len());
        assert!(offers.iter().all(|set| set.offers.is_empty()));
    }

    #[tokio::test]
    async fn test_second_round_resets_results() {
        let mut dispatcher = dispatcher_with(vec![Box::new(DummyVendor::new())]);

        dispatcher.search_offers(&batch()).await;
        dispatcher.get_offers();

        let smaller = vec![SequenceRecord::new(9, "c", "TTA")];
        dispatcher.search_offers(&smaller).await;
        let offers = dispatcher.get_offers();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].sequence.key, SequenceKey::Int(9));
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let mut dispatcher = dispatcher_with(vec![Box::new(DummyVendor::new())]);

        dispatcher.search_offers(&batch()).await;
        dispatcher.clear();
        assert!(!dispatcher.is_running());
        assert!(dispatcher.get_offers().is_empty());
    }
}
