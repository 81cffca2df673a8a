use itertools::Itertools;

use crate::constants::{
    GAIA_SOURCE_TABLE, MAX_SAMPLE_SIZE, MIN_PARALLAX_MAS, MIN_SAMPLE_SIZE, STAR_COLUMNS,
};
use crate::galaxy_errors::FetchFailure;

/// A bounded ADQL `SELECT TOP` query against a Gaia table.
///
/// Only the shape needed by the dashboard is supported: a fixed column list,
/// a row limit, and a conjunction of `WHERE` predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct AdqlQuery {
    limit: u32,
    columns: Vec<&'static str>,
    table: &'static str,
    predicates: Vec<String>,
}

impl AdqlQuery {
    /// Query for the host-star sample shown by the dashboard.
    ///
    /// Selects the seven [`STAR_COLUMNS`] from `gaiadr3.gaia_source`, keeping only
    /// stars with `parallax > 1` mas and non-null color and proper motions.
    ///
    /// Arguments
    /// ---------
    /// * `limit`: number of rows requested, must lie in `100..=5000`
    ///
    /// Return
    /// ------
    /// * The query, or [`FetchFailure::InvalidLimit`] when `limit` is out of range
    pub fn host_stars(limit: u32) -> Result<Self, FetchFailure> {
        if !(MIN_SAMPLE_SIZE..=MAX_SAMPLE_SIZE).contains(&limit) {
            return Err(FetchFailure::InvalidLimit(
                limit,
                MIN_SAMPLE_SIZE,
                MAX_SAMPLE_SIZE,
            ));
        }

        Ok(AdqlQuery {
            limit,
            columns: STAR_COLUMNS.to_vec(),
            table: GAIA_SOURCE_TABLE,
            predicates: vec![
                format!("parallax > {MIN_PARALLAX_MAS}"),
                "bp_rp IS NOT NULL".to_string(),
                "pmra IS NOT NULL".to_string(),
                "pmdec IS NOT NULL".to_string(),
            ],
        })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Render the query as a single ADQL line.
    pub fn to_adql(&self) -> String {
        let mut adql = format!(
            "SELECT TOP {} {} FROM {}",
            self.limit,
            self.columns.iter().join(", "),
            self.table
        );
        if !self.predicates.is_empty() {
            adql.push_str(" WHERE ");
            adql.push_str(&self.predicates.iter().join(" AND "));
        }
        adql
    }
}
