use polars::error::PolarsError;
use polars::prelude::DataType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Column '{column}' for city '{city}' has {found} rows, expected {expected}")]
    LengthMismatch {
        city: String,
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Record for city '{city}' has no values for column '{column}'")]
    MissingColumn { city: String, column: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("I/O error writing parquet file '{0}'")]
    ParquetWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing parquet file '{0}'")]
    ParquetWritePolars(PathBuf, #[source] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("Table has {found} columns, schema expects {expected}")]
    ColumnCount { expected: usize, found: usize },

    #[error("Column {position} is '{found}', schema expects '{expected}'")]
    ColumnName {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("Column '{column}' has type {found}, schema expects {expected}")]
    ColumnType {
        column: String,
        expected: DataType,
        found: DataType,
    },
}
