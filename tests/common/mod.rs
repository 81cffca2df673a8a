use approx::assert_relative_eq;
use camino::Utf8Path;
use galaxyview::motion::AnimationFrame;
use galaxyview::{StarCatalog, StarRecord};

pub const SAMPLE_CSV: &str = "tests/data/gaia_sample.csv";

pub fn load_sample() -> StarCatalog {
    StarCatalog::from_csv_path(Utf8Path::new(SAMPLE_CSV)).expect("Failed to read the Gaia sample")
}

pub fn assert_frame_shift(frame: &AnimationFrame, star: &StarRecord, start_year: i32) {
    let elapsed = f64::from(frame.year - start_year);
    assert_eq!(&frame.star, star);
    assert_relative_eq!(
        frame.ra_shifted,
        star.ra + star.pmra * elapsed / 3.6e6,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        frame.dec_shifted,
        star.dec + star.pmdec * elapsed / 3.6e6,
        epsilon = 1e-12
    );
}
