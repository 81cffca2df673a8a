//! # Star catalog sample
//!
//! In-memory representation of the star sample fetched from the Gaia archive.
//!
//! ## Overview
//!
//! - [`StarRecord`] – one Gaia source with the seven queried columns and the derived
//!   `distance_pc` column.
//! - [`StarCatalog`] – an ordered collection of records, built from a TAP CSV response
//!   or from a local CSV file with the same schema.
//! - [`distance_from_parallax`] / [`absolute_magnitude`] – the two unit conversions
//!   applied to every record.
//!
//! ## Units
//!
//! | column            | unit     |
//! |-------------------|----------|
//! | `ra`, `dec`       | degrees  |
//! | `parallax`        | mas      |
//! | `pmra`, `pmdec`   | mas / yr |
//! | `phot_g_mean_mag` | mag      |
//! | `bp_rp`           | mag      |
//! | `distance_pc`     | parsecs  |
//!
//! A catalog is created fresh for every run and never cached.
use std::io::{Read, Write};

use camino::Utf8Path;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, MasPerYear, Magnitude, MilliArcSec, Parsec, ABS_MAG_REF_LOG10_PC, PARALLAX_MAS_PC,
    RADEG,
};
use crate::galaxy_errors::GalaxyError;

/// Distance in parsecs from a parallax in milliarcseconds (`1000 / parallax`).
///
/// The query filter guarantees `parallax > 1`, so the result is always positive
/// and finite for fetched stars.
#[inline]
pub fn distance_from_parallax(parallax: MilliArcSec) -> Parsec {
    PARALLAX_MAS_PC / parallax
}

/// Absolute magnitude from an apparent magnitude and a distance.
///
/// `M = m - 5 * (log10(d) - 1)`, i.e. the magnitude the star would have at 10 pc.
///
/// Arguments
/// ---------
/// * `apparent`: apparent magnitude (`phot_g_mean_mag`)
/// * `distance`: distance in parsecs, must be positive
///
/// Return
/// ------
/// * The absolute magnitude
#[inline]
pub fn absolute_magnitude(apparent: Magnitude, distance: Parsec) -> Magnitude {
    apparent - 5.0 * (distance.log10() - ABS_MAG_REF_LOG10_PC)
}

/// One Gaia DR3 source as returned by the dashboard query.
///
/// `distance_pc` is not part of the archive response: it is always recomputed
/// from `parallax` when a record enters a [`StarCatalog`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StarRecord {
    pub ra: Degree,
    pub dec: Degree,
    pub parallax: MilliArcSec,
    pub phot_g_mean_mag: Magnitude,
    pub pmra: MasPerYear,
    pub pmdec: MasPerYear,
    pub bp_rp: Magnitude,
    #[serde(skip_deserializing, default)]
    pub distance_pc: Parsec,
}

impl StarRecord {
    /// Build a record and derive its distance.
    pub fn new(
        ra: Degree,
        dec: Degree,
        parallax: MilliArcSec,
        phot_g_mean_mag: Magnitude,
        pmra: MasPerYear,
        pmdec: MasPerYear,
        bp_rp: Magnitude,
    ) -> Self {
        StarRecord {
            ra,
            dec,
            parallax,
            phot_g_mean_mag,
            pmra,
            pmdec,
            bp_rp,
            distance_pc: distance_from_parallax(parallax),
        }
    }

    /// Absolute G magnitude of the star.
    pub fn abs_mag(&self) -> Magnitude {
        absolute_magnitude(self.phot_g_mean_mag, self.distance_pc)
    }

    /// Heliocentric Cartesian position in parsecs, equatorial frame
    /// (x towards RA = 0°, z towards the north celestial pole).
    pub fn cartesian(&self) -> Vector3<f64> {
        let (sin_ra, cos_ra) = (self.ra * RADEG).sin_cos();
        let (sin_dec, cos_dec) = (self.dec * RADEG).sin_cos();
        Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec) * self.distance_pc
    }

    fn derive_distance(mut self) -> Self {
        self.distance_pc = distance_from_parallax(self.parallax);
        self
    }
}

/// Ordered star sample.
///
/// Row order is the order of the archive response; the motion projector keeps it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarCatalog {
    records: Vec<StarRecord>,
}

impl StarCatalog {
    /// Build a catalog from records, (re)deriving `distance_pc` for each of them.
    pub fn from_records(records: Vec<StarRecord>) -> Self {
        StarCatalog {
            records: records
                .into_iter()
                .map(StarRecord::derive_distance)
                .collect(),
        }
    }

    /// Decode a CSV stream whose header names the queried columns.
    ///
    /// This is the raw decoder behind both the TAP response and local files: it does
    /// not validate parallaxes. Extra columns are ignored.
    pub(crate) fn decode_csv<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = csv_reader
            .deserialize::<StarRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StarCatalog::from_records(records))
    }

    /// Read a previously saved Gaia sample.
    ///
    /// Arguments
    /// ---------
    /// * `reader`: a CSV stream with at least the seven queried columns
    ///
    /// Return
    /// ------
    /// * The catalog, or an error if a row cannot be decoded or has `parallax <= 0`
    ///   (distance undefined).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, GalaxyError> {
        let catalog = StarCatalog::decode_csv(reader)?;

        if let Some((row, record)) = catalog
            .records
            .iter()
            .enumerate()
            .find(|(_, record)| !(record.parallax > 0.0))
        {
            return Err(GalaxyError::InvalidRecord(
                row,
                format!("non-positive parallax {}", record.parallax),
            ));
        }

        Ok(catalog)
    }

    pub fn from_csv_path(path: &Utf8Path) -> Result<Self, GalaxyError> {
        let file = std::fs::File::open(path)?;
        StarCatalog::from_csv_reader(file)
    }

    /// Write the sample as CSV, including the derived `distance_pc` column.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), GalaxyError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in &self.records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Keep the first `limit` records, like a `TOP limit` query would.
    pub fn truncated(mut self, limit: usize) -> Self {
        self.records.truncate(limit);
        self
    }

    pub fn records(&self) -> &[StarRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StarRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Absolute magnitude of every record, in catalog order.
    pub fn absolute_magnitudes(&self) -> Vec<Magnitude> {
        self.records.iter().map(StarRecord::abs_mag).collect()
    }
}

impl<'a> IntoIterator for &'a StarCatalog {
    type Item = &'a StarRecord;
    type IntoIter = std::slice::Iter<'a, StarRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod catalog_test {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = "ra,dec,parallax,phot_g_mean_mag,pmra,pmdec,bp_rp
45.0,10.0,10.0,10.0,100.0,-50.0,0.8
120.5,-30.25,2.5,12.3,-3.2,7.1,1.4
";

    #[test]
    fn test_distance_from_parallax() {
        assert_relative_eq!(distance_from_parallax(10.0), 100.0);
        assert_relative_eq!(distance_from_parallax(2.5), 400.0);
        assert_relative_eq!(distance_from_parallax(1000.0), 1.0);
    }

    #[test]
    fn test_absolute_magnitude() {
        assert_relative_eq!(absolute_magnitude(10.0, 100.0), 5.0, epsilon = 1e-12);
        assert_relative_eq!(absolute_magnitude(7.0, 10.0), 7.0, epsilon = 1e-12);
        assert_relative_eq!(absolute_magnitude(4.0, 1.0), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_decode_derives_distance() {
        let catalog = StarCatalog::from_csv_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);

        let first = &catalog.records()[0];
        assert_eq!(first.ra, 45.0);
        assert_eq!(first.pmdec, -50.0);
        assert_relative_eq!(first.distance_pc, 100.0);
        assert_relative_eq!(first.abs_mag(), 5.0, epsilon = 1e-12);

        for record in &catalog {
            assert_relative_eq!(record.distance_pc, 1000.0 / record.parallax);
        }
    }

    #[test]
    fn test_saved_distance_column_is_recomputed() {
        let csv = "ra,dec,parallax,phot_g_mean_mag,pmra,pmdec,bp_rp,distance_pc
1.0,2.0,4.0,9.0,0.0,0.0,0.5,12345.0
";
        let catalog = StarCatalog::from_csv_reader(csv.as_bytes()).unwrap();
        assert_relative_eq!(catalog.records()[0].distance_pc, 250.0);
    }

    #[test]
    fn test_non_positive_parallax_rejected() {
        let csv = "ra,dec,parallax,phot_g_mean_mag,pmra,pmdec,bp_rp
1.0,2.0,4.0,9.0,0.0,0.0,0.5
1.0,2.0,0.0,9.0,0.0,0.0,0.5
";
        let err = StarCatalog::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            GalaxyError::InvalidRecord(1, "non-positive parallax 0".into())
        );
    }

    #[test]
    fn test_missing_value_is_a_decode_error() {
        let csv = "ra,dec,parallax,phot_g_mean_mag,pmra,pmdec,bp_rp
1.0,2.0,4.0,9.0,,0.0,0.5
";
        let err = StarCatalog::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, GalaxyError::CsvError(_)));
    }

    #[test]
    fn test_write_then_read_keeps_schema() {
        let catalog = StarCatalog::from_csv_reader(SAMPLE.as_bytes()).unwrap();
        let mut buffer = Vec::new();
        catalog.write_csv(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with(
            "ra,dec,parallax,phot_g_mean_mag,pmra,pmdec,bp_rp,distance_pc\n"
        ));
        let reread = StarCatalog::from_csv_reader(text.as_bytes()).unwrap();
        assert_eq!(reread, catalog);
    }

    #[test]
    fn test_cartesian_position() {
        let star = StarRecord::new(90.0, 0.0, 10.0, 10.0, 0.0, 0.0, 0.5);
        let pos = star.cartesian();
        assert_relative_eq!(pos.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pos.y, 100.0, epsilon = 1e-9);
        assert_relative_eq!(pos.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pos.norm(), star.distance_pc, epsilon = 1e-9);

        let pole = StarRecord::new(0.0, 90.0, 1.0, 10.0, 0.0, 0.0, 0.5);
        assert_relative_eq!(pole.cartesian().z, 1000.0, epsilon = 1e-9);
    }
}
