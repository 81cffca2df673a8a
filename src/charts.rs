//! # SVG renderings of the dashboard views
//!
//! Every view is drawn with [`plotters`] on an [`SVGBackend`]:
//!
//! * the 3D star map, `ra` / `dec` / `distance_pc` axes,
//! * one 3D frame per animated year for the motion trails, all frames sharing the
//!   axis ranges of the whole animation so that stars visibly drift between frames,
//! * the color-magnitude diagram, absolute magnitude growing downwards.
//!
//! Point colors are the ones computed by the views.
//!
//! [`plotters`]: https://crates.io/crates/plotters
use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::galaxy_errors::GalaxyError;
use crate::views::{CmdPoint, MotionTrailPoint, StarMapPoint};

type ChartResult = std::result::Result<(), Box<dyn std::error::Error>>;

type Span = (f64, f64);

const CHART_SIZE: (u32, u32) = (800, 600);
const POINT_SIZE: u32 = 3;

/// A point of a 3D sky chart: (ra, dec, distance) and its color.
type SkyPoint = ((f64, f64, f64), RGBColor);

fn extent(iter: impl Iterator<Item = f64>) -> Option<Span> {
    iter.filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn padded(range: Option<Span>) -> Span {
    match range {
        None => (-1.0, 1.0),
        Some((lo, hi)) => {
            let pad = (hi - lo).abs() * 0.1 + 1e-6;
            (lo - pad, hi + pad)
        }
    }
}

fn chart_error(path: &Utf8Path, err: Box<dyn std::error::Error>) -> GalaxyError {
    GalaxyError::ChartError(path.to_string(), err.to_string())
}

fn draw_sky<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    ranges: &(Span, Span, Span),
    points: &[SkyPoint],
) -> ChartResult
where
    DB::ErrorType: 'static,
{
    let (ra, dec, distance) = ranges;
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .build_cartesian_3d(ra.0..ra.1, dec.0..dec.1, distance.0..distance.1)?;
    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.3;
        pb.scale = 0.85;
        pb.into_matrix()
    });
    chart.configure_axes().draw()?;
    chart.draw_series(
        points
            .iter()
            .map(|&(position, color)| Circle::new(position, POINT_SIZE, color.filled())),
    )?;
    root.present()?;
    Ok(())
}

fn sky_ranges(positions: impl Iterator<Item = (f64, f64, f64)> + Clone) -> (Span, Span, Span) {
    (
        padded(extent(positions.clone().map(|p| p.0))),
        padded(extent(positions.clone().map(|p| p.1))),
        padded(extent(positions.map(|p| p.2))),
    )
}

/// Draw the 3D star map into `path`.
pub fn render_star_map(points: &[StarMapPoint], path: &Utf8Path) -> Result<(), GalaxyError> {
    let sky: Vec<SkyPoint> = points
        .iter()
        .map(|p| ((p.ra, p.dec, p.distance_pc), p.color))
        .collect();
    let ranges = sky_ranges(sky.iter().map(|p| p.0));

    let root = SVGBackend::new(path.as_std_path(), CHART_SIZE).into_drawing_area();
    draw_sky(&root, "3D Star Map (RA, Dec, Distance pc)", &ranges, &sky)
        .map_err(|err| chart_error(path, err))?;
    debug!("Drew {} stars into {path}", points.len());
    Ok(())
}

/// Draw one SVG frame per animated year into `dir`, named `frame_<year>.svg`.
///
/// Arguments
/// ---------
/// * `trails`: the motion trail rows, grouped by ascending year
/// * `dir`: destination directory, created if needed
///
/// Return
/// ------
/// * The frame paths in year order, empty when there is no row
pub fn render_motion_frames(
    trails: &[MotionTrailPoint],
    dir: &Utf8Path,
) -> Result<Vec<Utf8PathBuf>, GalaxyError> {
    if trails.is_empty() {
        return Ok(Vec::new());
    }
    std::fs::create_dir_all(dir)?;

    let ranges = sky_ranges(
        trails
            .iter()
            .map(|p| (p.ra_shifted, p.dec_shifted, p.distance_pc)),
    );

    let mut written = Vec::new();
    for (year, frame) in &trails.iter().chunk_by(|p| p.year) {
        let sky: Vec<SkyPoint> = frame
            .map(|p| ((p.ra_shifted, p.dec_shifted, p.distance_pc), p.color))
            .collect();
        let path = dir.join(format!("frame_{year}.svg"));
        let root = SVGBackend::new(path.as_std_path(), CHART_SIZE).into_drawing_area();
        draw_sky(&root, &format!("Proper Motion, year {year}"), &ranges, &sky)
            .map_err(|err| chart_error(&path, err))?;
        written.push(path.clone());
    }
    debug!("Drew {} motion frames into {dir}", written.len());
    Ok(written)
}

fn draw_cmd(points: &[CmdPoint], path: &Utf8Path) -> ChartResult {
    // y is -abs_mag so that bright stars sit at the top
    let xy: Vec<(f64, f64)> = points.iter().map(|p| (p.bp_rp, -p.abs_mag)).collect();
    let x_range = padded(extent(xy.iter().map(|p| p.0)));
    let y_range = padded(extent(xy.iter().map(|p| p.1)));

    let root = SVGBackend::new(path.as_std_path(), CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Color-Magnitude Diagram", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;
    chart
        .configure_mesh()
        .x_desc("BP-RP Color Index")
        .y_desc("Absolute G Magnitude (mag)")
        .y_label_formatter(&|v: &f64| format!("{:.1}", -v))
        .draw()?;
    chart.draw_series(
        xy.iter()
            .zip(points)
            .map(|(&xy, p)| Circle::new(xy, POINT_SIZE, p.color.filled())),
    )?;
    root.present()?;
    Ok(())
}

/// Draw the color-magnitude diagram into `path`.
pub fn render_cmd(points: &[CmdPoint], path: &Utf8Path) -> Result<(), GalaxyError> {
    draw_cmd(points, path).map_err(|err| chart_error(path, err))?;
    debug!("Drew {} stars into {path}", points.len());
    Ok(())
}
