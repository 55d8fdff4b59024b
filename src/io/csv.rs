use std::{fs, io::Cursor, path::Path};

use anyhow::{Context, Result};
use encoding_rs::EUC_KR;
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, CsvReader, SchemaRef}};

/// Reads a Polars DataFrame from CSV bytes, forcing the given column dtypes.
pub(crate) fn read_csv_bytes(bytes: &[u8], schema: SchemaRef) -> Result<DataFrame> {
    let cursor = Cursor::new(bytes);

    let options = CsvReadOptions::default()
        .with_schema_overwrite(Some(schema));

    let df = CsvReader::new(cursor)
        .with_options(options)
        .finish()?;
    Ok(df)
}

/// Reads a Polars DataFrame from a UTF-8 CSV file at `path`.
pub(crate) fn read_csv_file(path: &Path, schema: SchemaRef) -> Result<DataFrame> {
    let bytes = fs::read(path)
        .with_context(|| format!("[io::csv] Failed to read CSV file: {}", path.display()))?;
    read_csv_bytes(&bytes, schema)
        .with_context(|| format!("[io::csv] Failed to parse CSV file: {}", path.display()))
}

/// Reads a Polars DataFrame from an EUC-KR encoded CSV file at `path`.
///
/// The file is transcoded to UTF-8 before parsing. A byte sequence that is
/// not valid EUC-KR is a fatal load error, not a per-row one.
pub(crate) fn read_euc_kr_csv_file(path: &Path, schema: SchemaRef) -> Result<DataFrame> {
    let bytes = fs::read(path)
        .with_context(|| format!("[io::csv] Failed to read CSV file: {}", path.display()))?;

    let (text, _, had_errors) = EUC_KR.decode(&bytes);
    if had_errors {
        anyhow::bail!("[io::csv] {} is not valid EUC-KR", path.display());
    }

    read_csv_bytes(text.as_bytes(), schema)
        .with_context(|| format!("[io::csv] Failed to parse CSV file: {}", path.display()))
}
