use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::commands::{CommandError, Result};
use crate::output::{format_output, OutputData};
use basequote_core::{build_dispatcher, AppConfig, SearchableVendor, SequenceRecord};

const POLL_INTERVAL_MS: u64 = 100;

pub async fn run(cli: &Cli, batch_path: &Path, timeout_secs: u64) -> Result<()> {
    let cfg = AppConfig::from_path(&cli.config)?;
    let batch = load_batch(batch_path)?;

    let mut report = build_dispatcher(&cfg).await;
    debug!(
        vendors = report.dispatcher.vendor_count(),
        sequences = batch.len(),
        "dispatching search"
    );

    report.dispatcher.search_offers(&batch).await;

    let spinner = match cli.output {
        OutputFormat::Pretty => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .expect("Invalid progress template"),
            );
            bar.set_message("Collecting offers from vendors...");
            bar.enable_steady_tick(Duration::from_millis(100));
            Some(bar)
        }
        _ => None,
    };

    let max_polls = (timeout_secs * 1000 / POLL_INTERVAL_MS).max(1) as u32;
    let settled = report
        .dispatcher
        .wait_until_idle(max_polls, Duration::from_millis(POLL_INTERVAL_MS))
        .await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    if !settled {
        return Err(CommandError::Timeout(format!(
            "vendors still searching after {}s; giving up",
            timeout_secs
        )));
    }

    let results = report.dispatcher.get_offers();
    let count = results.iter().map(|set| set.offers.len()).sum();

    let data = OutputData::OfferReport {
        notices: report.notices,
        results,
        count,
    };
    format_output(&data, &cli.output)
}

fn load_batch(path: &Path) -> Result<Vec<SequenceRecord>> {
    let raw = std::fs::read_to_string(path)?;
    parse_batch(&raw)
}

fn parse_batch(raw: &str) -> Result<Vec<SequenceRecord>> {
    let batch: Vec<SequenceRecord> = serde_json::from_str(raw)?;

    if batch.is_empty() {
        return Err(CommandError::InvalidBatch(
            "batch file contains no sequences".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for seq in &batch {
        if !seen.insert(&seq.key) {
            return Err(CommandError::InvalidBatch(format!(
                "duplicate sequence key '{}'",
                seq.key
            )));
        }
    }

    Ok(batch)
}
