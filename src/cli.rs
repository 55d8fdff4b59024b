use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Dashboard data-core CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "rmdash", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute one dashboard frame and emit it as JSON
    Frame(FrameArgs),

    /// Build the choropleth payload for the geometry table
    Map(MapArgs),

    /// List the categories available for filtering
    Types(TypesArgs),
}

#[derive(Args, Debug)]
pub struct FrameArgs {
    /// Metrics CSV (EUC-KR encoded)
    #[arg(value_hint = ValueHint::FilePath)]
    pub metrics: PathBuf,

    /// Category to filter by; 전체 or omitted means no filter
    #[arg(long)]
    pub rm_type: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MapArgs {
    /// Geometry CSV with a hex-WKB geometry column
    #[arg(value_hint = ValueHint::FilePath)]
    pub geo: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Metrics CSV (EUC-KR encoded)
    #[arg(value_hint = ValueHint::FilePath)]
    pub metrics: PathBuf,
}
