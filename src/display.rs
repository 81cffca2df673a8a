//! # Tabular summary of a star sample
//!
//! [`CatalogSummary`] is a display adaptor: it **borrows** a [`StarCatalog`] and renders
//! a per-column statistics table when used with `{}`.
//!
//! ```text
//! Gaia sample (n=1000, frames=11)
//! ┌─────────────────┬──────────┬───────────┬──────────┐
//! │ Column          ┆ Min      ┆ Max       ┆ Mean     │
//! ╞═════════════════╪══════════╪═══════════╪══════════╡
//! │ distance_pc     ┆ 1.311    ┆ 998.502   ┆ 613.948  │
//! ...
//! ```
//!
//! The table is built with [`comfy-table`]; statistics skip non-finite values.
//!
//! [`comfy-table`]: https://crates.io/crates/comfy-table
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::catalog::{StarCatalog, StarRecord};

/// Min / max / mean of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ColumnStats {
    /// Statistics of the finite values, `None` if there are none.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let (mut min, mut max, mut sum, mut n) = (f64::INFINITY, f64::NEG_INFINITY, 0.0, 0usize);
        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            n += 1;
        }
        (n > 0).then(|| ColumnStats {
            min,
            max,
            mean: sum / n as f64,
        })
    }
}

/// Display adaptor rendering column statistics of a [`StarCatalog`].
pub struct CatalogSummary<'a> {
    catalog: &'a StarCatalog,
    frame_count: Option<usize>,
    prec: usize,
}

impl<'a> CatalogSummary<'a> {
    pub fn new(catalog: &'a StarCatalog) -> Self {
        Self {
            catalog,
            frame_count: None,
            prec: 3,
        }
    }

    /// Report the number of animation frames in the title line.
    pub fn with_frames(mut self, frame_count: usize) -> Self {
        self.frame_count = Some(frame_count);
        self
    }

    /// Fixed-point digits of the statistics (default = 3).
    pub fn with_precision(mut self, prec: usize) -> Self {
        self.prec = prec;
        self
    }

    fn columns(&self) -> Vec<(&'static str, Option<ColumnStats>)> {
        let column = |f: fn(&StarRecord) -> f64| ColumnStats::of(self.catalog.iter().map(f));
        vec![
            ("distance_pc", column(|s| s.distance_pc)),
            ("phot_g_mean_mag", column(|s| s.phot_g_mean_mag)),
            ("abs_mag", column(StarRecord::abs_mag)),
            ("bp_rp", column(|s| s.bp_rp)),
            ("pmra", column(|s| s.pmra)),
            ("pmdec", column(|s| s.pmdec)),
        ]
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Column"),
            Cell::new("Min"),
            Cell::new("Max"),
            Cell::new("Mean"),
        ]);

        let p = self.prec;
        for (name, stats) in self.columns() {
            let cells = match stats {
                Some(s) => [
                    format!("{:.p$}", s.min),
                    format!("{:.p$}", s.max),
                    format!("{:.p$}", s.mean),
                ],
                None => ["-".to_string(), "-".to_string(), "-".to_string()],
            };
            let mut row = vec![Cell::new(name)];
            row.extend(
                cells
                    .into_iter()
                    .map(|c| Cell::new(c).set_alignment(CellAlignment::Right)),
            );
            table.add_row(Row::from(row));
        }
        table
    }
}

impl fmt::Display for CatalogSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.catalog.len();
        match self.frame_count {
            Some(frames) => writeln!(f, "Gaia sample (n={n}, frames={frames})")?,
            None => writeln!(f, "Gaia sample (n={n})")?,
        }
        write!(f, "{}", self.table())
    }
}
