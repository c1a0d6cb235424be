//! Placeholder backend registered when a vendor could not be initialized
//! due to a misconfiguration. Its only purpose is to tell the end user to
//! contact the system's administrator.

use async_trait::async_trait;

use crate::offers::{
    Currency, Diagnostic, Money, Offer, SequenceOffers, SequenceRecord, VendorInfo,
    TURNAROUND_UNKNOWN,
};
use crate::round::RoundState;
use crate::SearchableVendor;

pub struct InvalidVendor {
    template: Offer,
    offers: Vec<SequenceOffers>,
    state: RoundState,
}

impl InvalidVendor {
    pub fn new() -> Self {
        let vendor = VendorInfo::new(0, "Invalid vendor", "invalid");
        let template = Offer::new(vendor)
            .with_price(Money::not_applicable(Currency::Eur))
            .with_turnaround(TURNAROUND_UNKNOWN)
            .with_diagnostic(Diagnostic::info(
                "Invalid vendor configuration. Please contact your administrator.",
            ));
        Self {
            template,
            offers: Vec::new(),
            state: RoundState::Idle,
        }
    }
}

impl Default for InvalidVendor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchableVendor for InvalidVendor {
    fn name(&self) -> &'static str {
        "invalid"
    }

    /// Completes synchronously: the placeholder rejection offer needs no
    /// remote round trip.
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
    use crate::offers::Severity;

    #[tokio::test]
    async fn test_placeholder_offer() {
        let mut vendor = InvalidVendor::new();
        vendor
            .search_offers(&[SequenceRecord::new(1, "a", "ATG")])
            .await;
        assert!(!vendor.is_running());

        let offers = vendor.get_offers();
        assert_eq!(offers.len(), 1);
        let offer = &offers[0].offers[0];
        assert!(!offer.price.unwrap().is_known());
        assert_eq!(offer.turnaround, TURNAROUND_UNKNOWN);
        assert_eq!(offer.diagnostics[0].severity, Severity::Info);
        assert!(offer.diagnostics[0].text.contains("administrator"));
    }

    #[tokio::test]
    async fn test_never_reports_running() {
        let mut vendor = InvalidVendor::new();
        assert!(!vendor.is_running());
        vendor
            .search_offers(&[SequenceRecord::new(1, "a", "ATG")])
            .await;
        assert!(!vendor.is_running());
        vendor.get_offers();
        assert!(!vendor.is_running());
    }
}
