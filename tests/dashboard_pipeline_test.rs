mod common;

use approx::assert_relative_eq;
use camino::Utf8Path;
use common::load_sample;
use galaxyview::display::CatalogSummary;
use galaxyview::palette::Palette;
use galaxyview::views::{
    DashboardViews, CMD_CHART, CMD_FILE, MOTION_FRAMES_DIR, MOTION_TRAILS_FILE, STAR_MAP_CHART,
    STAR_MAP_FILE,
};
use galaxyview::{DashboardConfig, StarCatalog};

#[test]
fn test_sample_has_derived_distance() {
    let catalog = load_sample();
    for star in &catalog {
        assert!(star.parallax > 1.0);
        assert!(star.distance_pc > 0.0);
        assert_relative_eq!(star.distance_pc, 1000.0 / star.parallax);
        assert_relative_eq!(
            star.abs_mag(),
            star.phot_g_mean_mag - 5.0 * (star.distance_pc.log10() - 1.0),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_render_and_write_views() {
    let catalog = load_sample();
    let config = DashboardConfig {
        end_year: 2075,
        palette: Palette::Cividis,
        ..Default::default()
    }
    .validated()
    .unwrap();

    let views = DashboardViews::render(&catalog, &config);
    assert_eq!(views.frame_count, 6);
    assert_eq!(views.star_map.len(), 120);
    assert_eq!(views.cmd.len(), 120);
    let trails = views.motion_trails.as_ref().unwrap();
    assert_eq!(trails.len(), 6 * 120);
    assert_eq!(trails.first().unwrap().year, 2025);
    assert_eq!(trails.last().unwrap().year, 2075);

    let dir = tempfile::tempdir().unwrap();
    let out = Utf8Path::from_path(dir.path()).unwrap();
    let written = views.write_all(out).unwrap();
    // 3 tables, 2 charts and one frame per year
    assert_eq!(written.len(), 3 + 2 + 6);

    let star_map = std::fs::read_to_string(out.join(STAR_MAP_FILE)).unwrap();
    assert!(star_map.starts_with("ra,dec,distance_pc,x_pc,y_pc,z_pc,phot_g_mean_mag,color\n"));
    assert_eq!(star_map.lines().count(), 121);
    assert!(out.join(MOTION_TRAILS_FILE).exists());
    assert!(out.join(CMD_FILE).exists());

    let frame = std::fs::read_to_string(out.join(MOTION_FRAMES_DIR).join("frame_2075.svg")).unwrap();
    assert!(frame.starts_with("<svg"));
    assert_eq!(frame.matches("<circle").count(), 120);
    let cmd = std::fs::read_to_string(out.join(CMD_CHART)).unwrap();
    assert!(cmd.contains("BP-RP Color Index"));
}

#[test]
fn test_motion_toggle_off_skips_trails_file() {
    let catalog = load_sample();
    let config = DashboardConfig {
        show_motion: false,
        ..Default::default()
    };
    let views = DashboardViews::render(&catalog, &config);

    let dir = tempfile::tempdir().unwrap();
    let out = Utf8Path::from_path(dir.path()).unwrap();
    let written = views.write_all(out).unwrap();
    assert_eq!(
        written,
        vec![
            out.join(STAR_MAP_FILE),
            out.join(STAR_MAP_CHART),
            out.join(CMD_FILE),
            out.join(CMD_CHART)
        ]
    );
    assert!(!out.join(MOTION_TRAILS_FILE).exists());
    assert!(!out.join(MOTION_FRAMES_DIR).exists());
}

#[test]
fn test_saved_sample_keeps_schema() {
    let catalog = load_sample();
    let mut buffer = Vec::new();
    catalog.write_csv(&mut buffer).unwrap();
    let reread = StarCatalog::from_csv_reader(buffer.as_slice()).unwrap();
    assert_eq!(reread, catalog);

    let summary = CatalogSummary::new(&reread).to_string();
    assert!(summary.starts_with("Gaia sample (n=120)"));
}

#[test]
fn test_saved_sample_respects_sample_size() {
    let catalog = load_sample();
    let limited = catalog.clone().truncated(100);
    assert_eq!(limited.len(), 100);
    assert_eq!(limited.records(), &catalog.records()[..100]);
    assert_eq!(catalog.clone().truncated(5000), catalog);
}
