use crate::cli::OutputFormat;
use crate::commands::Result;
use basequote_core::{Diagnostic, SequenceOffers, Severity, VendorInfo};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OutputData {
    VendorList {
        vendors: Vec<VendorInfo>,
        notices: Vec<Diagnostic>,
    },
    OfferReport {
        notices: Vec<Diagnostic>,
        results: Vec<SequenceOffers>,
        /// Total number of offers across all sequences.
        count: usize,
    },
}

pub fn format_output(data: &OutputData, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(data)?);
        }
        OutputFormat::Text => {
            format_text_output(data);
        }
        OutputFormat::Pretty => {
            format_pretty_output(data);
        }
    }
    Ok(())
}

/// Get the terminal width, defaulting to 80 if detection fails
fn get_terminal_width() -> u16 {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0)
        .unwrap_or(80)
}

fn print_notices(notices: &[Diagnostic]) {
    for notice in notices {
        println!("{} {}", "Notice:".yellow().bold(), notice.text);
    }
    if !notices.is_empty() {
        println!();
    }
}

fn format_severity(severity: Severity) -> &'static str {
    match severity {
        Severity::Debug => "debug",
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Reject => "reject",
    }
}

fn format_text_output(data: &OutputData) {
    match data {
        OutputData::VendorList { vendors, notices } => {
            for vendor in vendors {
                println!("{}: {} ({})", vendor.key, vendor.name, vendor.short_name);
            }
            for notice in notices {
                println!("notice: {}", notice.text);
            }
        }
        OutputData::OfferReport {
            notices,
            results,
            count,
        } => {
            for set in results {
                println!("{} ({}):", set.sequence.name, set.sequence.key);
                for offer in &set.offers {
                    let price = offer
                        .price
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    let turnaround = if offer.turnaround >= 0 {
                        format!("{} days", offer.turnaround)
                    } else {
                        "unknown".to_string()
                    };
                    println!("  {}: {} / {}", offer.vendor.short_name, price, turnaround);
                    for diagnostic in &offer.diagnostics {
                        println!(
                            "    [{}] {}",
                            format_severity(diagnostic.severity),
                            diagnostic.text
                        );
                    }
                }
            }
            for notice in notices {
                println!("notice: {}", notice.text);
            }
            println!("{} offers total", count);
        }
    }
}

fn format_pretty_output(data: &OutputData) {
    let term_width = get_terminal_width();

    match data {
        OutputData::VendorList { vendors, notices } => {
            print_notices(notices);
            println!("{}", "Configured Vendors".bold().cyan());
            println!();

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_width(term_width)
                .set_header(vec!["Key", "Name", "Short Name"]);

            for vendor in vendors {
                table.add_row(vec![
                    vendor.key.to_string(),
                    vendor.name.clone(),
                    vendor.short_name.clone(),
                ]);
            }

            println!("{}", table);
        }
        OutputData::OfferReport {
            notices,
            results,
            count,
        } => {
            print_notices(notices);
            println!("{}", "Offers".bold().cyan());
            println!();

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_width(term_width)
                .set_header(vec!["Sequence", "Vendor", "Price", "Turnaround", "Messages"]);

            for set in results {
                for offer in &set.offers {
                    let price = offer
                        .price
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    let turnaround = if offer.turnaround >= 0 {
                        format!("{} d", offer.turnaround)
                    } else {
                        "-".to_string()
                    };
                    let messages = offer
                        .diagnostics
                        .iter()
                        .map(|d| format!("[{}] {}", format_severity(d.severity), d.text))
                        .collect::<Vec<_>>()
                        .join("\n");
                    table.add_row(vec![
                        set.sequence.name.clone(),
                        offer.vendor.short_name.clone(),
                        price,
                        turnaround,
                        messages,
                    ]);
                }
                if set.offers.is_empty() {
                    table.add_row(vec![
                        set.sequence.name.clone(),
                        "-".to_string(),
                        "-".to_string(),
                        "-".to_string(),
                        "no offers".to_string(),
                    ]);
                }
            }

            println!("{}", table);
            println!();
            println!(
                "{} sequences, {} offers",
                results.len().to_string().green().bold(),
                count.to_string().green().bold()
            );
        }
    }
}
