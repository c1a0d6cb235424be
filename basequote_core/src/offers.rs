//! Core types for sequence batches, vendor descriptors and offers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-assigned identifier of a sequence, unique within one batch.
///
/// Upstream parsers hand out either numeric or textual keys; equality on
/// this type is what correlates a leaf's results back to the batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SequenceKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKey::Int(n) => write!(f, "{}", n),
            SequenceKey::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for SequenceKey {
    fn from(n: i64) -> Self {
        SequenceKey::Int(n)
    }
}

impl From<i32> for SequenceKey {
    fn from(n: i32) -> Self {
        SequenceKey::Int(n.into())
    }
}

impl From<&str> for SequenceKey {
    fn from(s: &str) -> Self {
        SequenceKey::Text(s.to_string())
    }
}

impl From<String> for SequenceKey {
    fn from(s: String) -> Self {
        SequenceKey::Text(s)
    }
}

/// One sequence of a request batch, as produced by the upstream parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub key: SequenceKey,
    pub name: String,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(key: impl Into<SequenceKey>, name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            sequence: sequence.into(),
        }
    }
}

/// Descriptive metadata of a registered vendor.
///
/// `key` is assigned by bootstrap (position in the configured vendor list)
/// and is unique within one dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorInfo {
    pub key: u32,
    pub name: String,
    pub short_name: String,
}

impl VendorInfo {
    pub fn new(key: u32, name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            short_name: short_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Eur => write!(f, "EUR"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

/// A price tag. A negative amount is the sentinel for "not applicable".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// The "not applicable / unknown" sentinel.
    pub fn not_applicable(currency: Currency) -> Self {
        Self {
            amount: -1.0,
            currency,
        }
    }

    pub fn is_known(&self) -> bool {
        self.amount >= 0.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{:.2} {}", self.amount, self.currency)
        } else {
            write!(f, "n/a")
        }
    }
}

/// Severity of a diagnostic message.
///
/// `Reject` is kept separate from `Warning`: a vendor turning a sequence
/// down (homology conflict, disallowed motif) is a per-offer verdict, not a
/// processing problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Reject,
}

/// A severity-tagged free-text message. Purely informational; diagnostics
/// never affect control flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub text: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    pub fn debug(text: impl Into<String>) -> Self {
        Self::new(Severity::Debug, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    pub fn reject(text: impl Into<String>) -> Self {
        Self::new(Severity::Reject, text)
    }
}

/// Sentinel turnaround meaning "unknown / unavailable".
pub const TURNAROUND_UNKNOWN: i64 = -1;

/// One vendor's quote for one sequence.
///
/// Created by a leaf backend during a search round and never mutated
/// afterwards. A missing price and a `-1` turnaround mean the vendor could
/// not (or would not) quote the sequence; the attached diagnostics say why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub vendor: VendorInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    pub turnaround: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Offer {
    /// Create an offer with no price and unknown turnaround.
    pub fn new(vendor: VendorInfo) -> Self {
        Self {
            vendor,
            price: None,
            turnaround: TURNAROUND_UNKNOWN,
            diagnostics: Vec::new(),
        }
    }

    /// Builder method to set the price.
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// Builder method to set the turnaround time.
    pub fn with_turnaround(mut self, turnaround: i64) -> Self {
        self.turnaround = turnaround;
        self
    }

    /// Builder method to append a diagnostic.
    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }
}

/// A sequence paired with every offer collected for it.
///
/// The dispatcher creates one of these per input sequence at the start of a
/// round (offers empty, batch order) and fills it as leaf results come in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceOffers {
    pub sequence: SequenceRecord,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

impl SequenceOffers {
    pub fn empty(sequence: SequenceRecord) -> Self {
        Self {
            sequence,
            offers: Vec::new(),
        }
    }

    pub fn with_offers(sequence: SequenceRecord, offers: Vec<Offer>) -> Self {
        Self { sequence, offers }
    }

    /// Append offers contributed by one vendor, flattened into the list.
    pub fn push_offers(&mut self, offers: impl IntoIterator<Item = Offer>) {
        self.offers.extend(offers);
    }
}
