//! GeneArt vendor backend.
//!
//! Wraps the gene-design wire client behind the searchable-vendor
//! capability. A search round validates the batch against each enabled
//! product line; the validation verdicts become diagnostics on the offers.
//! The validate stage quotes no price, so offers carry an absent price and
//! unknown turnaround until an order workflow is started.

mod client;

pub use client::{
    CartResponse, ConstructDecision, ConstructPayload, GeneArtClient, Product, StatusResponse,
    UploadResponse, ValidateResponse,
};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::GeneArtSettings;
use crate::error::VendorError;
use crate::offers::{Diagnostic, Offer, SequenceOffers, SequenceRecord, VendorInfo};
use crate::round::RoundState;
use crate::SearchableVendor;

pub struct GeneArtVendor {
    info: VendorInfo,
    client: GeneArtClient,
    products: Vec<Product>,
    offers: Vec<SequenceOffers>,
    state: RoundState,
}

impl GeneArtVendor {
    /// Construct and verify credentials. A rejected login fails
    /// construction; bootstrap substitutes the invalid placeholder.
    pub async fn new(info: VendorInfo, settings: &GeneArtSettings) -> Result<Self, VendorError> {
        let client = GeneArtClient::new(settings)?;
        client.authenticate().await?;

        let mut products = Vec::new();
        if settings.dna_strings {
            products.push(Product::DnaStrings);
        }
        if settings.hq_dna_strings {
            products.push(Product::HqDnaStrings);
        }

        Ok(Self {
            info,
            client,
            products,
            offers: Vec::new(),
            state: RoundState::Idle,
        })
    }

    async fn run_round(&self, batch: &[SequenceRecord]) -> Vec<SequenceOffers> {
        let mut sets: Vec<SequenceOffers> = batch
            .iter()
            .map(|seq| SequenceOffers::empty(seq.clone()))
            .collect();

        for product in &self.products {
            let constructs = batch
                .iter()
                .map(|seq| ConstructPayload::from_record(seq, *product))
                .collect();

            match self.client.validate("basequote search", constructs).await {
                Ok(resp) => fold_decisions(&self.info, &mut sets, *product, &resp),
                Err(err) => {
                    warn!(product = product.as_str(), error = %err, "validation call failed");
                    let diagnostic = err.to_diagnostic();
                    for set in &mut sets {
                        set.offers
                            .push(Offer::new(self.info.clone()).with_diagnostic(diagnostic.clone()));
                    }
                }
            }
        }

        sets
    }

    /// Upload the batch as a draft order project for one product line.
    pub async fn upload_project(
        &self,
        batch: &[SequenceRecord],
        product: Product,
    ) -> Result<UploadResponse, VendorError> {
        let constructs = batch
            .iter()
            .map(|seq| ConstructPayload::from_record(seq, product))
            .collect();
        self.client.upload("basequote order", constructs).await
    }

    pub async fn project_status(&self, project_id: &str) -> Result<StatusResponse, VendorError> {
        self.client.status(project_id).await
    }

    pub async fn add_to_cart(&self, project_id: &str) -> Result<CartResponse, VendorError> {
        self.client.add_to_cart(project_id).await
    }
}

/// Fold one product line's validation verdicts into the per-sequence sets.
///
/// The API echoes constructs in request order, so decisions line up with
/// the batch by index.
fn fold_decisions(
    info: &VendorInfo,
    sets: &mut [SequenceOffers],
    product: Product,
    resp: &ValidateResponse,
) {
    if resp.constructs.len() != sets.len() {
        debug!(
            expected = sets.len(),
            got = resp.constructs.len(),
            "validation response length mismatch"
        );
    }

    for (set, decision) in sets.iter_mut().zip(&resp.constructs) {
        let diagnostic = if decision.accepted {
            Diagnostic::info(format!("{} accepted", product.as_str()))
        } else if decision.reasons.is_empty() {
            Diagnostic::reject(format!("{} rejected", product.as_str()))
        } else {
            Diagnostic::reject(format!(
                "{} rejected: {}",
                product.as_str(),
                decision.reasons.join("; ")
            ))
        };
        set.offers
            .push(Offer::new(info.clone()).with_diagnostic(diagnostic));
    }
}

#[async_trait]
impl SearchableVendor for GeneArtVendor {
    fn name(&self) -> &'static str {
        "geneart"
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
