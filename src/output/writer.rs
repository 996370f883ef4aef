//! CSV writer for the transformed weather table.

use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::info;

use super::{ensure_parent_dir, OutputError};

/// Write the whole table as CSV with a header row and no index column.
pub fn save_transformed_data(df: &DataFrame, output_path: &Path) -> Result<(), OutputError> {
    ensure_parent_dir(output_path)?;

    let mut file = File::create(output_path).map_err(|e| OutputError::io(output_path, e))?;
    let mut df = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    info!("Transformed data saved to {}", output_path.display());
    Ok(())
}
