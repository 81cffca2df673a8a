use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;

use super::adql::AdqlQuery;
use crate::catalog::StarCatalog;
use crate::env_state::GalaxyEnv;
use crate::galaxy_errors::{FetchFailure, GalaxyError};

/// Matches the message of a VOTable error document returned by a TAP service
static VOTABLE_ERROR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<INFO\s+name="QUERY_STATUS"\s+value="ERROR"\s*>(.*?)</INFO>"#)
        .expect("VOTable error regex")
});

/// Submit an ADQL query to the synchronous TAP endpoint and return the raw answer.
///
/// Arguments
/// ---------
/// * `env`: the environment holding the HTTP client and the TAP endpoint
/// * `query`: the ADQL query to run
///
/// Return
/// ------
/// * The HTTP status code and the response body
async fn request_tap(env: &GalaxyEnv, query: &AdqlQuery) -> Result<(u16, String), FetchFailure> {
    let adql = query.to_adql();
    debug!("TAP query on {}: {adql}", env.sync_url());

    let response = env
        .http_client
        .post(env.sync_url())
        .form(&[
            ("REQUEST", "doQuery"),
            ("LANG", "ADQL"),
            ("FORMAT", "csv"),
            ("QUERY", adql.as_str()),
        ])
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok((status, body))
}

/// Turn a TAP answer into a star catalog.
///
/// A VOTable error document wins over the HTTP status so that the service message
/// reaches the user; any other non-2xx status is reported as is. A successful
/// answer must decode as CSV and hold at least one row.
///
/// Arguments
/// ---------
/// * `status`: HTTP status code of the answer
/// * `body`: response body
///
/// Return
/// ------
/// * The decoded [`StarCatalog`] with `distance_pc` derived for every record
pub(crate) fn parse_tap_response(status: u16, body: &str) -> Result<StarCatalog, FetchFailure> {
    if let Some(captures) = VOTABLE_ERROR.captures(body) {
        let message = captures
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        return Err(FetchFailure::ServiceError(message));
    }

    if !(200..300).contains(&status) {
        return Err(FetchFailure::Status(status));
    }

    let catalog = StarCatalog::decode_csv(body.as_bytes())?;
    if catalog.is_empty() {
        return Err(FetchFailure::EmptyResult);
    }
    Ok(catalog)
}

/// Fetch a sample of Gaia DR3 host stars.
///
/// Builds the dashboard query for `limit` rows, submits it, and derives
/// `distance_pc = 1000 / parallax` for each returned star. Every failure
/// (invalid limit, network, service, decoding, empty answer) is reported as
/// [`GalaxyError::FetchFailed`]; there is no retry.
///
/// Arguments
/// ---------
/// * `env`: the environment holding the HTTP client and the TAP endpoint
/// * `limit`: maximum number of stars, in `100..=5000`
///
/// Return
/// ------
/// * At most `limit` stars, each with `parallax > 1` and a derived distance
pub async fn fetch_star_catalog(env: &GalaxyEnv, limit: u32) -> Result<StarCatalog, GalaxyError> {
    let query = AdqlQuery::host_stars(limit)?;
    let (status, body) = request_tap(env, &query).await?;
    let catalog = parse_tap_response(status, &body)?;

    info!(
        "Fetched {} stars from {} (requested {})",
        catalog.len(),
        env.tap_url(),
        query.limit()
    );
    Ok(catalog)
}

/// Blocking flavour of [`fetch_star_catalog`] for synchronous callers.
///
/// Drives the request to completion on a dedicated current-thread tokio runtime.
/// Must not be called from inside an async context. This is the entry point of
/// the command line tool.
pub fn fetch_star_catalog_blocking(env: &GalaxyEnv, limit: u32) -> Result<StarCatalog, GalaxyError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(FetchFailure::Runtime)?;
    rt.block_on(fetch_star_catalog(env, limit))
}
