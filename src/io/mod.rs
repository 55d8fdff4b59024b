//! Input decoding for the two base tables.
//!
//! - `csv` - CSV parsing into Polars DataFrames, including the EUC-KR
//!   transcoding step the metrics file needs
//! - `wkb` - hex-encoded Well-Known Binary geometry decoding

pub(crate) mod csv;
pub(crate) mod wkb;
