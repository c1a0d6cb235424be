//! The dummy backend is for testing and demos: every sequence gets the same
//! fixed offer.

use async_trait::async_trait;

use crate::offers::{
    Currency, Diagnostic, Money, Offer, SequenceOffers, SequenceRecord, VendorInfo,
};
use crate::round::RoundState;
use crate::SearchableVendor;

pub struct DummyVendor {
    template: Offer,
    offers: Vec<SequenceOffers>,
    state: RoundState,
}

impl DummyVendor {
    pub fn new() -> Self {
        let vendor = VendorInfo::new(0, "DummyVendor Not Real GmbH", "DummyVendor");
        let template = Offer::new(vendor)
            .with_price(Money::new(120.0, Currency::Eur))
            .with_turnaround(14)
            .with_diagnostic(Diagnostic::debug("This offer is created from Dummy"));
        Self {
            template,
            offers: Vec::new(),
            state: RoundState::Idle,
        }
    }
}

impl Default for DummyVendor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchableVendor for DummyVendor {
    fn name(&self) -> &'static str {
        "dummy"
    }

    /// Completes synchronously; the round is done by the time this
    /// returns, so polling observes idle right away.
    async fn search_offers(&mut self, batch: &[SequenceRecord]) {
        self.state.start();
        self.offers = batch
            .iter()
            .map(|seq| SequenceOffers::with_offers(seq.clone(), vec![self.template.clone()]))
            .collect();
        self.state.finish();
    }

    fn is_running(&self) -> bool {
        self.state.is_running()
    }

    fn get_offers(&mut self) -> Vec<SequenceOffers> {
        self.offers.clone()
    }

    fn clear(&mut self) {
        self.offers.clear();
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<SequenceRecord> {
        vec![
            SequenceRecord::new(1, "a", "ATG"),
            SequenceRecord::new(2, "b", "GGC"),
        ]
    }

    #[tokio::test]
    async fn test_fixed_offer_per_sequence() {
        let mut vendor = DummyVendor::new();
        vendor.search_offers(&batch()).await;
        assert!(!vendor.is_running());

        let offers = vendor.get_offers();
        assert_eq!(offers.len(), 2);
        for set in &offers {
            assert_eq!(set.offers.len(), 1);
            assert_eq!(set.offers[0].price, Some(Money::new(120.0, Currency::Eur)));
            assert_eq!(set.offers[0].turnaround, 14);
            assert_eq!(set.offers[0].diagnostics.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_new_round_replaces_old() {
        let mut vendor = DummyVendor::new();
        vendor.search_offers(&batch()).await;
        vendor.get_offers();

        vendor.search_offers(&[SequenceRecord::new(3, "c", "TAA")]).await;
        assert_eq!(vendor.get_offers().len(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let mut vendor = DummyVendor::new();
        vendor.search_offers(&batch()).await;
        vendor.clear();
        assert!(!vendor.is_running());
        assert!(vendor.get_offers().is_empty());
    }
}
