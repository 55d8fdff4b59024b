use anyhow::Result;

use crate::cli::FrameArgs;
use crate::common::require_file_exists;
use crate::filter::TypeFilter;
use crate::table::MetricTable;
use crate::view::DashboardFrame;

pub fn run(cli: &crate::cli::Cli, args: &FrameArgs) -> Result<()> {
    require_file_exists(&args.metrics)?;

    let filter = match &args.rm_type {
        Some(label) => TypeFilter::from_label(label),
        None => TypeFilter::All,
    };

    if cli.verbose > 0 {
        eprintln!("[frame] metrics={} filter={}", args.metrics.display(), filter.label());
    }

    let table = MetricTable::read_from_csv(&args.metrics)?;
    if cli.verbose > 0 {
        eprintln!("[frame] {} rows, {} categories", table.len(), table.rm_types()?.len());
    }

    let frame = DashboardFrame::compute(&table, &filter)?;
    let json = serde_json::to_string_pretty(&frame)?;

    super::write_output(args.output.as_deref(), &json)
}
