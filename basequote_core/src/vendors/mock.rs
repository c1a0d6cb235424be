//! Mock backend with genuinely asynchronous rounds.
//!
//! Unlike the dummy, this stand-in publishes its results from a spawned
//! task after a short delay, so `is_running` stays true across polls and
//! the full poll contract gets exercised without any real vendor. Prices
//! are derived from sequence length, so results are deterministic.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::offers::{
    Currency, Diagnostic, Money, Offer, SequenceOffers, SequenceRecord, VendorInfo,
};
use crate::SearchableVendor;

const BASE_PRICE_EUR: f64 = 40.0;
const PRICE_PER_BASE_EUR: f64 = 0.35;

pub struct MockVendor {
    vendor: VendorInfo,
    delay: Duration,
    running: Arc<AtomicBool>,
    // Bumped on every new round and on clear; a publisher task may only
    // complete the round it was spawned for.
    generation: Arc<AtomicU64>,
    results: Arc<std::sync::Mutex<Vec<SequenceOffers>>>,
}

impl MockVendor {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(25))
    }

    /// A mock that completes its round `delay` after the search started.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            vendor: VendorInfo::new(0, "Advanced Mock", "Mock"),
            delay,
            running: Arc::new(AtomicBool::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
            results: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    fn quote(&self, seq: &SequenceRecord) -> Offer {
        let length = seq.sequence.len();
        let price = BASE_PRICE_EUR + PRICE_PER_BASE_EUR * length as f64;
        let turnaround = 5 + (length / 500) as i64;
        Offer::new(self.vendor.clone())
            .with_price(Money::new(price, Currency::Eur))
            .with_turnaround(turnaround)
            .with_diagnostic(Diagnostic::debug(format!(
                "mock quote for {} bases",
                length
            )))
    }
}

impl Default for MockVendor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchableVendor for MockVendor {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search_offers(&mut self, batch: &[SequenceRecord]) {
        let sets: Vec<SequenceOffers> = batch
            .iter()
            .map(|seq| SequenceOffers::with_offers(seq.clone(), vec![self.quote(seq)]))
            .collect();

        self.results.lock().unwrap_or_else(|e| e.into_inner()).clear();
        self.running.store(true, Ordering::SeqCst);
        let round = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let running = Arc::clone(&self.running);
        let generation = Arc::clone(&self.generation);
        let results = Arc::clone(&self.results);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) != round {
                // A newer round (or clear) superseded this one.
                return;
            }
            // Publish the full set before flipping the running flag, so a
            // reader that saw "not running" always observes complete data.
            *results.lock().unwrap_or_else(|e| e.into_inner()) = sets;
            running.store(false, Ordering::SeqCst);
            debug!(round, "mock round complete");
        });
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// While the background task is still asleep this returns the partial
    /// (empty) set; afterwards, the full result.
    fn get_offers(&mut self) -> Vec<SequenceOffers> {
        self.results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn clear(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.results.lock().unwrap_or_else(|e| e.into_inner()).clear();
        self.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<SequenceRecord> {
        vec![
            SequenceRecord::new(1, "a", "ATG"),
            SequenceRecord::new(2, "b", "GGCTTA"),
        ]
    }

    #[tokio::test]
    async fn test_runs_in_background() {
        let mut vendor = MockVendor::with_delay(Duration::from_millis(20));
        vendor.search_offers(&batch()).await;
        assert!(vendor.is_running());
        // Partial read while running is allowed and empty here.
        assert!(vendor.get_offers().is_empty());

        let mut polls = 0;
        while vendor.is_running() {
            polls += 1;
            assert!(polls < 1000, "mock round never finished");
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        let offers = vendor.get_offers();
        assert_eq!(offers.len(), 2);
    }

    #[tokio::test]
    async fn test_price_scales_with_length() {
        let mut vendor = MockVendor::with_delay(Duration::from_millis(1));
        vendor.search_offers(&batch()).await;
        while vendor.is_running() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        let offers = vendor.get_offers();
        let short = offers[0].offers[0].price.unwrap();
        let long = offers[1].offers[0].price.unwrap();
        assert!(long.amount > short.amount);
        // deterministic: 40.0 + 0.35 * 3
        assert!((short.amount - 41.05).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_clear_while_running() {
        let mut vendor = MockVendor::with_delay(Duration::from_millis(5));
        vendor.search_offers(&batch()).await;
        vendor.clear();
        assert!(!vendor.is_running());
    }
}
