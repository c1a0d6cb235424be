//! IDT vendor backend.
//!
//! The token exchange happens at construction; if it fails there is no
//! usable backend at all, so bootstrap drops the vendor and emits a
//! process-wide notice instead of registering a placeholder.

mod client;

pub use client::{IdtClient, QuoteItem, QuoteLine, QuoteMessage};

use async_trait::async_trait;
use tracing::warn;

use crate::config::IdtSettings;
use crate::error::VendorError;
use crate::offers::{
    Currency, Diagnostic, Money, Offer, SequenceOffers, SequenceRecord, Severity, VendorInfo,
    TURNAROUND_UNKNOWN,
};
use crate::round::RoundState;
use crate::SearchableVendor;

pub struct IdtVendor {
    info: VendorInfo,
    client: IdtClient,
    token: String,
    offers: Vec<SequenceOffers>,
    state: RoundState,
}

impl IdtVendor {
    pub async fn new(info: VendorInfo, settings: &IdtSettings) -> Result<Self, VendorError> {
        let client = IdtClient::new(settings)?;
        let token = client.fetch_token().await?;
        Ok(Self {
            info,
            client,
            token,
            offers: Vec::new(),
            state: RoundState::Idle,
        })
    }

    async fn run_round(&self, batch: &[SequenceRecord]) -> Vec<SequenceOffers> {
        let mut sets: Vec<SequenceOffers> = batch
            .iter()
            .map(|seq| SequenceOffers::empty(seq.clone()))
            .collect();

        let items: Vec<QuoteItem> = batch.iter().map(QuoteItem::from_record).collect();
        match self.client.quote(&self.token, &items).await {
            Ok(lines) => {
                for line in lines {
                    // Correlate by sequence key; unknown keys are dropped.
                    if let Some(set) = sets.iter_mut().find(|s| s.sequence.key == line.key) {
                        set.offers.push(offer_from_line(&self.info, &line));
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "quote call failed");
                let diagnostic = err.to_diagnostic();
                for set in &mut sets {
                    set.offers
                        .push(Offer::new(self.info.clone()).with_diagnostic(diagnostic.clone()));
                }
            }
        }

        sets
    }
}

fn offer_from_line(info: &VendorInfo, line: &QuoteLine) -> Offer {
    let mut offer = Offer::new(info.clone())
        .with_turnaround(line.turnaround_days.unwrap_or(TURNAROUND_UNKNOWN));
    if let Some(amount) = line.price {
        offer = offer.with_price(Money::new(amount, currency_from_code(line.currency.as_deref())));
    }
    for message in &line.messages {
        offer = offer.with_diagnostic(Diagnostic::new(
            severity_from_level(&message.level),
            message.text.clone(),
        ));
    }
    offer
}

fn currency_from_code(code: Option<&str>) -> Currency {
    match code {
        Some("EUR") | Some("eur") => Currency::Eur,
        _ => Currency::Usd,
    }
}

fn severity_from_level(level: &str) -> Severity {
    match level {
        "debug" => Severity::Debug,
        "warning" => Severity::Warning,
        "reject" | "rejected" | "error" => Severity::Reject,
        _ => Severity::Info,
    }
}

#[async_trait]
impl SearchableVendor for IdtVendor {
    fn name(&self) -> &'static str {
        "idt"
    }

    async fn search_offers(&mut self, batch: &[SequenceRecord]) {
        self.state.start();
        self.offers = self.run_round(batch).await;
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
