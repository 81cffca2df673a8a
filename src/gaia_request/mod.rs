//! # Gaia archive requests
//!
//! Client side of the single query the dashboard sends to the Gaia archive.
//!
//! - [`adql`] builds the bounded ADQL query (`SELECT TOP <limit> … FROM gaiadr3.gaia_source`).
//! - [`tap_query`] posts it to the TAP `sync` endpoint, decodes the CSV answer into a
//!   [`StarCatalog`](crate::catalog::StarCatalog) and reports failures as
//!   [`GalaxyError::FetchFailed`](crate::galaxy_errors::GalaxyError::FetchFailed).
pub mod adql;
pub mod tap_query;

pub use tap_query::{fetch_star_catalog, fetch_star_catalog_blocking};
