//! # Proper motion projection
//!
//! Builds the frames of the proper motion animation by linearly extrapolating the
//! sky position of every star over a range of years.
//!
//! For a frame at year `y` and a start year `y0`:
//!
//! ```text
//! ra_shifted  = ra  + pmra  * (y - y0) / 3.6e6
//! dec_shifted = dec + pmdec * (y - y0) / 3.6e6
//! ```
//!
//! with proper motions in mas/yr and positions in degrees. The shift is applied to
//! the raw angles: no cos(dec) factor and no wrap-around at RA = 360°.
//!
//! The projection is pure: the input [`StarCatalog`] is borrowed and left untouched.
//! Degenerate year ranges (end before start, non-positive step) produce an empty
//! [`AnimationFrames`] instead of an error.
use crate::catalog::{StarCatalog, StarRecord};
use crate::constants::{
    Degree, MasPerYear, Year, ANIMATION_START_YEAR, ANIMATION_STEP_YEARS, MAS_PER_DEG,
};

/// Inclusive, stepped range of animation years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: Year,
    pub end: Year,
    pub step: Year,
}

impl YearRange {
    pub fn new(start: Year, end: Year, step: Year) -> Self {
        YearRange { start, end, step }
    }

    /// Dashboard range: from 2025 to `end` every 10 years.
    pub fn dashboard(end: Year) -> Self {
        YearRange::new(ANIMATION_START_YEAR, end, ANIMATION_STEP_YEARS)
    }

    /// Number of frames, `floor((end - start) / step) + 1`, or 0 for a degenerate range.
    pub fn frame_count(&self) -> usize {
        if self.step <= 0 || self.end < self.start {
            return 0;
        }
        let span = i64::from(self.end) - i64::from(self.start);
        (span / i64::from(self.step)) as usize + 1
    }

    /// Years `start, start + step, …` up to and including `end`.
    pub fn years(&self) -> impl Iterator<Item = Year> {
        let (start, step) = (self.start, self.step);
        (0..self.frame_count()).map(move |i| (i64::from(start) + i64::from(step) * i as i64) as Year)
    }
}

/// Angular offset in degrees accumulated over `elapsed` years at `rate` mas/yr.
#[inline]
pub fn proper_motion_offset(rate: MasPerYear, elapsed: f64) -> Degree {
    rate * elapsed / MAS_PER_DEG
}

/// One star at one animation year.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    pub star: StarRecord,
    pub ra_shifted: Degree,
    pub dec_shifted: Degree,
    pub year: Year,
}

impl AnimationFrame {
    fn shift(star: &StarRecord, year: Year, start_year: Year) -> Self {
        let elapsed = f64::from(year) - f64::from(start_year);
        AnimationFrame {
            ra_shifted: star.ra + proper_motion_offset(star.pmra, elapsed),
            dec_shifted: star.dec + proper_motion_offset(star.pmdec, elapsed),
            year,
            star: star.clone(),
        }
    }
}

/// Concatenation of per-year copies of a catalog.
///
/// Blocks are ordered by ascending year; each block keeps the catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationFrames {
    rows: Vec<AnimationFrame>,
    block_len: usize,
}

impl AnimationFrames {
    pub fn rows(&self) -> &[AnimationFrame] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<Year> {
        if self.block_len == 0 {
            return Vec::new();
        }
        self.rows
            .chunks(self.block_len)
            .map(|block| block[0].year)
            .collect()
    }

    /// Rows of the block for `year`, empty if the year is not animated.
    pub fn frame(&self, year: Year) -> &[AnimationFrame] {
        if self.block_len == 0 {
            return &[];
        }
        self.rows
            .chunks(self.block_len)
            .find(|block| block[0].year == year)
            .unwrap_or(&[])
    }
}

/// Project a catalog over a year range.
///
/// Arguments
/// ---------
/// * `catalog`: the star sample, left untouched
/// * `start_year`: year of the catalog positions (zero elapsed time)
/// * `end_year`: last year, included when it lies on the step grid
/// * `step`: years between two frames
///
/// Return
/// ------
/// * `frame_count × catalog.len()` rows, or an empty table when `step <= 0`
///   or `end_year < start_year`
///
/// See also
/// --------
/// * [`YearRange::years`] – the produced year sequence.
pub fn project(catalog: &StarCatalog, start_year: Year, end_year: Year, step: Year) -> AnimationFrames {
    project_range(catalog, YearRange::new(start_year, end_year, step))
}

/// Same as [`project`] with a prebuilt [`YearRange`].
pub fn project_range(catalog: &StarCatalog, range: YearRange) -> AnimationFrames {
    let mut rows = Vec::with_capacity(range.frame_count().saturating_mul(catalog.len()));

    for year in range.years() {
        rows.extend(
            catalog
                .iter()
                .map(|star| AnimationFrame::shift(star, year, range.start)),
        );
    }

    AnimationFrames {
        rows,
        block_len: if range.frame_count() == 0 { 0 } else { catalog.len() },
    }
}
