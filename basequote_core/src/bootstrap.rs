//! Builds a composite dispatcher from declarative configuration.
//!
//! Construction never fails past this boundary. A vendor whose backend
//! cannot be built is either registered with the invalid placeholder (the
//! end user still sees the vendor, with a "contact your administrator"
//! offer) or dropped entirely when nothing usable could be constructed.
//! Either way the remaining entries are processed normally, and every
//! incident becomes a notice in the returned report.

use tracing::{info, warn};

use crate::composite::CompositeDispatcher;
use crate::config::{AppConfig, BackendSection};
use crate::error::VendorError;
use crate::offers::{Diagnostic, VendorInfo};
use crate::vendors::dummy::DummyVendor;
use crate::vendors::invalid::InvalidVendor;
use crate::vendors::mock::MockVendor;
use crate::SearchableVendor;

/// The outcome of a bootstrap run: the ready dispatcher plus the
/// process-wide notices collected along the way. The notice list is
/// explicit state handed back to the caller; nothing is stashed globally.
pub struct BootstrapReport {
    pub dispatcher: CompositeDispatcher,
    pub notices: Vec<Diagnostic>,
}

enum Built {
    Ready(Box<dyn SearchableVendor>),
    /// Usable, but not a production backend.
    NonProduction(Box<dyn SearchableVendor>),
    /// Register the invalid placeholder instead.
    Substituted(VendorError),
    /// Do not register the vendor at all.
    Excluded(VendorError),
}

/// Build and register a backend for every configured vendor entry.
/// Dispatch keys are the 0-based positions in the declared list.
pub async fn build_dispatcher(cfg: &AppConfig) -> BootstrapReport {
    let mut dispatcher = CompositeDispatcher::new();
    let mut notices = Vec::new();

    for (key, entry) in cfg.controller.vendors.iter().enumerate() {
        let vendor = VendorInfo::new(key as u32, &entry.name, &entry.short_name);

        match make_backend(&vendor, &entry.backend, &cfg.backends).await {
            Built::Ready(backend) => {
                info!(vendor = %entry.short_name, backend = backend.name(), "vendor ready");
                dispatcher.register_vendor(vendor, backend);
            }
            Built::NonProduction(backend) => {
                warn!(vendor = %entry.short_name, "non-production backend configured");
                notices.push(Diagnostic::warning(format!(
                    "Warning: a mock vendor is being used for '{}'. Contact an administrator.",
                    entry.short_name
                )));
                dispatcher.register_vendor(vendor, backend);
            }
            Built::Substituted(err) => {
                warn!(vendor = %entry.short_name, error = %err, "substituting invalid placeholder");
                notices.push(Diagnostic::warning(format!(
                    "Vendor '{}' could not be initialized ({}); searches will ask you to contact an administrator.",
                    entry.short_name, err
                )));
                dispatcher.register_vendor(vendor, Box::new(InvalidVendor::new()));
            }
            Built::Excluded(err) => {
                warn!(vendor = %entry.short_name, error = %err, "excluding vendor");
                notices.push(Diagnostic::warning(format!(
                    "Vendor '{}' is unavailable: {}",
                    entry.short_name, err
                )));
            }
        }
    }

    BootstrapReport {
        dispatcher,
        notices,
    }
}

async fn make_backend(vendor: &VendorInfo, kind: &str, backends: &BackendSection) -> Built {
    match kind {
        "dummy" => Built::Ready(Box::new(DummyVendor::new())),
        "mock" => Built::NonProduction(Box::new(MockVendor::new())),
        // Recognized, but there is no integration to construct yet.
        "twist" => Built::Substituted(VendorError::Unsupported(
            "twist integration is not yet available".to_string(),
        )),
        "geneart" => build_geneart(vendor, backends).await,
        "idt" => build_idt(vendor, backends).await,
        other => Built::Substituted(VendorError::UnknownBackend(other.to_string())),
    }
}

#[cfg(feature = "geneart")]
async fn build_geneart(vendor: &VendorInfo, backends: &BackendSection) -> Built {
    use crate::vendors::geneart::GeneArtVendor;

    let Some(settings) = &backends.geneart else {
        return Built::Substituted(VendorError::MissingSetting("backends.geneart".to_string()));
    };
    match GeneArtVendor::new(vendor.clone(), settings).await {
        Ok(backend) => Built::Ready(Box::new(backend)),
        // The backend is constructible in principle; only the login was
        // refused. The placeholder keeps the vendor visible to the user.
        Err(err) => Built::Substituted(err),
    }
}

#[cfg(not(feature = "geneart"))]
async fn build_geneart(_vendor: &VendorInfo, _backends: &BackendSection) -> Built {
    Built::Substituted(VendorError::Unsupported(
        "geneart support is not compiled into this build".to_string(),
    ))
}

#[cfg(feature = "idt")]
async fn build_idt(vendor: &VendorInfo, backends: &BackendSection) -> Built {
    use crate::vendors::idt::IdtVendor;

    let Some(settings) = &backends.idt else {
        return Built::Substituted(VendorError::MissingSetting("backends.idt".to_string()));
    };
    match IdtVendor::new(vendor.clone(), settings).await {
        Ok(backend) => Built::Ready(Box::new(backend)),
        // No token, no backend: exclude the vendor rather than registering
        // a placeholder for it.
        Err(err) => Built::Excluded(err),
    }
}

#[cfg(not(feature = "idt"))]
async fn build_idt(_vendor: &VendorInfo, _backends: &BackendSection) -> Built {
    Built::Substituted(VendorError::Unsupported(
        "idt support is not compiled into this build".to_string(),
    ))
}
