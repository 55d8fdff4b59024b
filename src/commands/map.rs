use anyhow::Result;

use crate::cli::MapArgs;
use crate::common::require_file_exists;
use crate::table::GeoTable;
use crate::view::choropleth;

pub fn run(cli: &crate::cli::Cli, args: &MapArgs) -> Result<()> {
    require_file_exists(&args.geo)?;

    if cli.verbose > 0 {
        eprintln!("[map] geo={}", args.geo.display());
    }

    let table = GeoTable::read_from_csv(&args.geo)?;
    if cli.verbose > 0 {
        eprintln!("[map] {} districts decoded", table.len());
    }

    let payload = choropleth(&table)?;
    let json = serde_json::to_string(&payload)?;

    super::write_output(args.output.as_deref(), &json)
}
