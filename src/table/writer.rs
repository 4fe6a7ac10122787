use crate::table::error::TableError;
use log::info;
use polars::prelude::*;
use std::path::Path;
use tokio::task;

/// Writes the table to a Parquet file on a blocking task.
pub async fn write_parquet(mut df: DataFrame, path: &Path) -> Result<(), TableError> {
    let path_buf = path.to_path_buf();
    let rows = df.height();
    task::spawn_blocking(move || {
        let file = std::fs::File::create(&path_buf)
            .map_err(|e| TableError::ParquetWriteIo(path_buf.clone(), e))?;
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .finish(&mut df)
            .map_err(|e| TableError::ParquetWritePolars(path_buf, e))?;
        Ok::<(), TableError>(())
    })
    .await??;
    info!("Wrote {} rows to {}", rows, path.display());
    Ok(())
}
