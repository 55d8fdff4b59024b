use anyhow::Result;

use crate::cli::TypesArgs;
use crate::common::require_file_exists;
use crate::filter::ALL_LABEL;
use crate::table::MetricTable;

pub fn run(cli: &crate::cli::Cli, args: &TypesArgs) -> Result<()> {
    require_file_exists(&args.metrics)?;

    if cli.verbose > 0 {
        eprintln!("[types] metrics={}", args.metrics.display());
    }

    let table = MetricTable::read_from_csv(&args.metrics)?;

    // The all sentinel heads the list, exactly as the selector offers it.
    println!("{ALL_LABEL}");
    for rm_type in table.rm_types()? {
        println!("{rm_type}");
    }
    Ok(())
}
