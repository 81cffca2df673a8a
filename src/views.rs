//! # Dashboard views
//!
//! Point tables behind the three dashboard tabs. Each view is a list of plain rows,
//! drawn as SVG charts by [`crate::charts`] and also written as CSV for other tools.
//!
//! | view            | axes                                        | color by          |
//! |-----------------|---------------------------------------------|-------------------|
//! | 3D star map     | `ra`, `dec`, `distance_pc`                  | `phot_g_mean_mag` |
//! | motion trails   | `ra_shifted`, `dec_shifted`, `distance_pc`, animated on `year` | `phot_g_mean_mag` |
//! | color-magnitude | `bp_rp`, `abs_mag`                          | `bp_rp`           |
//!
//! The star map rows also carry the heliocentric Cartesian position (pc) for viewers
//! that want a true 3D layout instead of the (ra, dec, distance) box.
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use plotters::style::RGBColor;
use serde::{Serialize, Serializer};

use crate::catalog::StarCatalog;
use crate::charts::{render_cmd, render_motion_frames, render_star_map};
use crate::config::DashboardConfig;
use crate::constants::{Degree, Magnitude, Parsec, Year};
use crate::galaxy_errors::GalaxyError;
use crate::motion::{project_range, AnimationFrames};
use crate::palette::{hex, ColorScale, Palette};

pub const STAR_MAP_FILE: &str = "star_map.csv";
pub const MOTION_TRAILS_FILE: &str = "motion_trails.csv";
pub const CMD_FILE: &str = "cmd.csv";
pub const STAR_MAP_CHART: &str = "star_map.svg";
pub const MOTION_FRAMES_DIR: &str = "motion_trails";
pub const CMD_CHART: &str = "cmd.svg";

fn serialize_hex<S: Serializer>(color: &RGBColor, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex(color))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarMapPoint {
    pub ra: Degree,
    pub dec: Degree,
    pub distance_pc: Parsec,
    pub x_pc: Parsec,
    pub y_pc: Parsec,
    pub z_pc: Parsec,
    pub phot_g_mean_mag: Magnitude,
    #[serde(serialize_with = "serialize_hex")]
    pub color: RGBColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionTrailPoint {
    pub year: Year,
    pub ra_shifted: Degree,
    pub dec_shifted: Degree,
    pub distance_pc: Parsec,
    pub phot_g_mean_mag: Magnitude,
    #[serde(serialize_with = "serialize_hex")]
    pub color: RGBColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmdPoint {
    pub bp_rp: Magnitude,
    pub abs_mag: Magnitude,
    #[serde(serialize_with = "serialize_hex")]
    pub color: RGBColor,
}

/// 3D map of the sample colored by apparent brightness.
pub fn star_map(catalog: &StarCatalog, palette: Palette) -> Vec<StarMapPoint> {
    let scale = ColorScale::fit(palette, catalog.iter().map(|s| s.phot_g_mean_mag));

    catalog
        .iter()
        .map(|star| {
            let position = star.cartesian();
            StarMapPoint {
                ra: star.ra,
                dec: star.dec,
                distance_pc: star.distance_pc,
                x_pc: position.x,
                y_pc: position.y,
                z_pc: position.z,
                phot_g_mean_mag: star.phot_g_mean_mag,
                color: scale.color(star.phot_g_mean_mag),
            }
        })
        .collect()
}

/// Animated map: one block of points per frame year, in frame order.
pub fn motion_trails(frames: &AnimationFrames, palette: Palette) -> Vec<MotionTrailPoint> {
    let scale = ColorScale::fit(palette, frames.rows().iter().map(|f| f.star.phot_g_mean_mag));

    frames
        .rows()
        .iter()
        .map(|frame| MotionTrailPoint {
            year: frame.year,
            ra_shifted: frame.ra_shifted,
            dec_shifted: frame.dec_shifted,
            distance_pc: frame.star.distance_pc,
            phot_g_mean_mag: frame.star.phot_g_mean_mag,
            color: scale.color(frame.star.phot_g_mean_mag),
        })
        .collect()
}

/// Color-magnitude diagram: BP-RP against absolute G magnitude.
pub fn color_magnitude(catalog: &StarCatalog, palette: Palette) -> Vec<CmdPoint> {
    let scale = ColorScale::fit(palette, catalog.iter().map(|s| s.bp_rp));

    catalog
        .iter()
        .zip(catalog.absolute_magnitudes())
        .map(|(star, abs_mag)| CmdPoint {
            bp_rp: star.bp_rp,
            abs_mag,
            color: scale.color(star.bp_rp),
        })
        .collect()
}

/// Write any view as a CSV file with a header line.
pub fn write_view<T: Serialize>(rows: &[T], path: &Utf8Path) -> Result<(), GalaxyError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!("Wrote {} rows to {path}", rows.len());
    Ok(())
}

/// The three views of one dashboard render.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViews {
    pub star_map: Vec<StarMapPoint>,
    /// `None` when the motion toggle is off
    pub motion_trails: Option<Vec<MotionTrailPoint>>,
    /// Animated years, independent of the sample size
    pub frame_count: usize,
    pub cmd: Vec<CmdPoint>,
}

impl DashboardViews {
    /// Build every view of the dashboard from a fetched catalog.
    pub fn render(catalog: &StarCatalog, config: &DashboardConfig) -> Self {
        let (motion_trails, frame_count) = if config.show_motion {
            let range = config.year_range();
            let frames = project_range(catalog, range);
            (Some(motion_trails(&frames, config.palette)), range.frame_count())
        } else {
            (None, 0)
        };

        DashboardViews {
            star_map: star_map(catalog, config.palette),
            motion_trails,
            frame_count,
            cmd: color_magnitude(catalog, config.palette),
        }
    }

    /// Write the views into `dir`, creating it if needed: one CSV table and one SVG
    /// chart per view, the motion trails drawn as one SVG per year in
    /// `motion_trails/`.
    ///
    /// Return
    /// ------
    /// * The paths of the written files, star map first
    pub fn write_all(&self, dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, GalaxyError> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(6 + self.frame_count);

        let path = dir.join(STAR_MAP_FILE);
        write_view(&self.star_map, &path)?;
        written.push(path);
        let path = dir.join(STAR_MAP_CHART);
        render_star_map(&self.star_map, &path)?;
        written.push(path);

        if let Some(trails) = &self.motion_trails {
            let path = dir.join(MOTION_TRAILS_FILE);
            write_view(trails, &path)?;
            written.push(path);
            written.extend(render_motion_frames(trails, &dir.join(MOTION_FRAMES_DIR))?);
        }

        let path = dir.join(CMD_FILE);
        write_view(&self.cmd, &path)?;
        written.push(path);
        let path = dir.join(CMD_CHART);
        render_cmd(&self.cmd, &path)?;
        written.push(path);

        Ok(written)
    }
}

#[cfg(test)]
mod views_test {
    use super::*;
    use crate::catalog::StarRecord;
    use approx::assert_relative_eq;

    fn sample_catalog() -> StarCatalog {
        StarCatalog::from_records(vec![
            StarRecord::new(45.0, 10.0, 10.0, 10.0, 100.0, -50.0, 0.8),
            StarRecord::new(120.5, -30.25, 2.5, 12.3, -3.2, 7.1, 1.4),
            StarRecord::new(200.0, 5.0, 4.0, 14.0, 1.0, 1.0, 2.0),
        ])
    }

    #[test]
    fn test_star_map_colors_by_brightness() {
        let points = star_map(&sample_catalog(), Palette::Viridis);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].color, Palette::Viridis.sample(0.0));
        assert_eq!(points[2].color, Palette::Viridis.sample(1.0));
        assert_relative_eq!(points[1].distance_pc, 400.0);
        let norm = (points[1].x_pc.powi(2) + points[1].y_pc.powi(2) + points[1].z_pc.powi(2)).sqrt();
        assert_relative_eq!(norm, 400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cmd_view() {
        let points = color_magnitude(&sample_catalog(), Palette::Plasma);
        assert_relative_eq!(points[0].abs_mag, 5.0, epsilon = 1e-12);
        assert_eq!(points[0].bp_rp, 0.8);
        assert_eq!(hex(&points[0].color), "#0d0887");
        assert_eq!(hex(&points[2].color), "#f0f921");
    }

    #[test]
    fn test_render_with_and_without_motion() {
        let catalog = sample_catalog();
        let views = DashboardViews::render(&catalog, &DashboardConfig::default());
        assert_eq!(views.frame_count, 11);
        assert_eq!(views.motion_trails.as_ref().map(Vec::len), Some(33));
        assert_eq!(views.star_map.len(), 3);
        assert_eq!(views.cmd.len(), 3);

        let config = DashboardConfig {
            show_motion: false,
            ..Default::default()
        };
        let views = DashboardViews::render(&catalog, &config);
        assert!(views.motion_trails.is_none());
        assert_eq!(views.frame_count, 0);
    }

    #[test]
    fn test_frame_count_follows_controls() {
        let config = DashboardConfig {
            end_year: 2075,
            ..Default::default()
        };
        let views = DashboardViews::render(&StarCatalog::default(), &config);
        assert_eq!(views.frame_count, 6);
        assert_eq!(views.motion_trails.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn test_write_all() {
        let dir = tempfile::tempdir().unwrap();
        let out = Utf8Path::from_path(dir.path()).unwrap().join("views");

        let config = DashboardConfig {
            end_year: 2045,
            palette: Palette::Cividis,
            ..Default::default()
        };
        let views = DashboardViews::render(&sample_catalog(), &config);
        let written = views.write_all(&out).unwrap();
        let frames = out.join(MOTION_FRAMES_DIR);
        assert_eq!(
            written,
            vec![
                out.join(STAR_MAP_FILE),
                out.join(STAR_MAP_CHART),
                out.join(MOTION_TRAILS_FILE),
                frames.join("frame_2025.svg"),
                frames.join("frame_2035.svg"),
                frames.join("frame_2045.svg"),
                out.join(CMD_FILE),
                out.join(CMD_CHART),
            ]
        );

        let trails = std::fs::read_to_string(out.join(MOTION_TRAILS_FILE)).unwrap();
        let mut lines = trails.lines();
        assert_eq!(
            lines.next(),
            Some("year,ra_shifted,dec_shifted,distance_pc,phot_g_mean_mag,color")
        );
        assert_eq!(lines.count(), 9);

        let cmd = std::fs::read_to_string(out.join(CMD_FILE)).unwrap();
        let mut lines = cmd.lines();
        assert_eq!(lines.next(), Some("bp_rp,abs_mag,color"));
        assert!(lines.next().unwrap().ends_with(",#00224e"));

        for chart in [STAR_MAP_CHART, CMD_CHART] {
            let svg = std::fs::read_to_string(out.join(chart)).unwrap();
            assert!(svg.starts_with("<svg"));
        }
    }

    #[test]
    fn test_write_all_without_motion() {
        let dir = tempfile::tempdir().unwrap();
        let out = Utf8Path::from_path(dir.path()).unwrap().to_path_buf();
        let config = DashboardConfig {
            show_motion: false,
            ..Default::default()
        };
        let written = DashboardViews::render(&sample_catalog(), &config)
            .write_all(&out)
            .unwrap();
        assert_eq!(written.len(), 4);
        assert!(!out.join(MOTION_FRAMES_DIR).exists());
    }
}
