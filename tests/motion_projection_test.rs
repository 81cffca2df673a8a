mod common;

use common::{assert_frame_shift, load_sample};
use galaxyview::motion::{project, YearRange};
use galaxyview::StarCatalog;

#[test]
fn test_dashboard_projection_on_sample() {
    let catalog = load_sample();
    assert_eq!(catalog.len(), 120);

    let frames = project(&catalog, 2025, 2125, 10);
    assert_eq!(frames.len(), 11 * catalog.len());
    assert_eq!(
        frames.years(),
        vec![2025, 2035, 2045, 2055, 2065, 2075, 2085, 2095, 2105, 2115, 2125]
    );

    for (i, row) in frames.rows().iter().enumerate() {
        let star = &catalog.records()[i % catalog.len()];
        assert_eq!(row.year, 2025 + 10 * (i / catalog.len()) as i32);
        assert_frame_shift(row, star, 2025);
    }
}

#[test]
fn test_row_count_matches_frame_count() {
    let catalog = load_sample();
    for (start, end, step) in [(2025, 2125, 10), (2025, 2095, 10), (2000, 2003, 1), (2025, 2124, 33)] {
        let range = YearRange::new(start, end, step);
        let frames = project(&catalog, start, end, step);
        let expected = ((end - start) / step) as usize + 1;
        assert_eq!(range.frame_count(), expected);
        assert_eq!(frames.years().len(), expected);
        assert_eq!(frames.len(), expected * catalog.len());
    }
}

#[test]
fn test_boundary_cases() {
    let catalog = load_sample();
    assert_eq!(project(&StarCatalog::default(), 2025, 2125, 10).len(), 0);
    assert_eq!(project(&catalog, 2030, 2025, 10).len(), 0);
    assert_eq!(project(&catalog, 2025, 2125, 0).len(), 0);
    assert_eq!(project(&catalog, 2025, 2125, -10).len(), 0);
}
