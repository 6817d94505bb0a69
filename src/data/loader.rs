//! CSV Data Loader Module
//! Builds datasets from CSV columns using Polars.

use super::continuous::ContinuousDataSet;
use super::dataset::CategoricDataSet;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Column not found: {0}")]
    MissingColumn(String),
    #[error("At least one value column is required")]
    NoValueColumns,
}

/// Loads CSV files into datasets.
pub struct DataLoader;

impl DataLoader {
    /// Read a CSV file into a DataFrame.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(path.as_ref())
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// Numeric x column against numeric y columns.
    pub fn load_continuous(
        path: impl AsRef<Path>,
        x_col: &str,
        y_cols: &[&str],
    ) -> Result<ContinuousDataSet, LoaderError> {
        let df = Self::read_csv(path)?;
        Self::continuous_from_frame(&df, x_col, y_cols)
    }

    /// Category column against numeric value columns.
    pub fn load_categoric(
        path: impl AsRef<Path>,
        category_col: &str,
        value_cols: &[&str],
    ) -> Result<CategoricDataSet, LoaderError> {
        let df = Self::read_csv(path)?;
        Self::categoric_from_frame(&df, category_col, value_cols)
    }

    /// Rows with a missing or NaN x value are dropped. Missing y values
    /// become NaN.
    pub fn continuous_from_frame(
        df: &DataFrame,
        x_col: &str,
        y_cols: &[&str],
    ) -> Result<ContinuousDataSet, LoaderError> {
        if y_cols.is_empty() {
            return Err(LoaderError::NoValueColumns);
        }
        let x_values = Self::float_column(df, x_col)?;
        let keep: Vec<usize> = x_values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_some_and(|v| !v.is_nan()))
            .map(|(i, _)| i)
            .collect();

        let mut ds = ContinuousDataSet::new();
        for y_col in y_cols {
            let y_values = Self::float_column(df, y_col)?;
            let series = keep
                .iter()
                .map(|&i| y_values[i].unwrap_or(f64::NAN))
                .collect();
            ds.add_dependent(series);
        }
        ds.set_independent(keep.iter().filter_map(|&i| x_values[i]));

        debug!(rows = keep.len(), series = y_cols.len(), "Loaded continuous dataset");
        Ok(ds)
    }

    /// Rows with a missing category are dropped. Missing values become NaN.
    pub fn categoric_from_frame(
        df: &DataFrame,
        category_col: &str,
        value_cols: &[&str],
    ) -> Result<CategoricDataSet, LoaderError> {
        if value_cols.is_empty() {
            return Err(LoaderError::NoValueColumns);
        }
        let categories = Self::string_column(df, category_col)?;
        let keep: Vec<usize> = categories
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_some())
            .map(|(i, _)| i)
            .collect();

        let mut ds = CategoricDataSet::new();
        for value_col in value_cols {
            let values = Self::float_column(df, value_col)?;
            let series = keep
                .iter()
                .map(|&i| values[i].unwrap_or(f64::NAN))
                .collect();
            ds.add_dependent(series);
        }
        ds.set_independent(keep.iter().filter_map(|&i| categories[i].clone()));

        debug!(rows = keep.len(), series = value_cols.len(), "Loaded categoric dataset");
        Ok(ds)
    }

    fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let cast = column.cast(&DataType::Float64)?;
        Ok(cast.f64()?.into_iter().collect())
    }

    fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let cast = column.cast(&DataType::String)?;
        Ok(cast
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect())
    }
}
