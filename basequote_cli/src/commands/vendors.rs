use crate::cli::Cli;
use crate::commands::Result;
use crate::output::{format_output, OutputData};
use basequote_core::{build_dispatcher, AppConfig};

pub async fn run(cli: &Cli) -> Result<()> {
    let cfg = AppConfig::from_path(&cli.config)?;
    let report = build_dispatcher(&cfg).await;

    let data = OutputData::VendorList {
        vendors: report.dispatcher.vendors(),
        notices: report.notices,
    };
    format_output(&data, &cli.output)
}
