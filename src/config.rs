//! Dashboard controls.
//!
//! [`DashboardConfig`] gathers the values a user can change between two runs
//! (sample size, motion toggle, animation end year, palette) and checks them
//! against the ranges offered by the dashboard before anything is fetched.
use crate::constants::{
    Year, ANIMATION_MAX_END_YEAR, ANIMATION_START_YEAR, ANIMATION_STEP_YEARS, DEFAULT_SAMPLE_SIZE,
    MAX_SAMPLE_SIZE, MIN_SAMPLE_SIZE,
};
use crate::galaxy_errors::GalaxyError;
use crate::motion::YearRange;
use crate::palette::Palette;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardConfig {
    /// Number of stars requested from the archive (100..=5000)
    pub sample_size: u32,
    /// Whether the proper motion animation is built
    pub show_motion: bool,
    /// Last animated year (2025..=2125, on the 10-year grid)
    pub end_year: Year,
    pub palette: Palette,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            sample_size: DEFAULT_SAMPLE_SIZE,
            show_motion: true,
            end_year: ANIMATION_MAX_END_YEAR,
            palette: Palette::default(),
        }
    }
}

impl DashboardConfig {
    /// Check every control against its allowed range.
    ///
    /// Return
    /// ------
    /// * `self` unchanged, or [`GalaxyError::InvalidControl`] naming the first bad control
    pub fn validated(self) -> Result<Self, GalaxyError> {
        if !(MIN_SAMPLE_SIZE..=MAX_SAMPLE_SIZE).contains(&self.sample_size) {
            return Err(GalaxyError::InvalidControl(format!(
                "sample size {} not in {MIN_SAMPLE_SIZE}..={MAX_SAMPLE_SIZE}",
                self.sample_size
            )));
        }

        if !(ANIMATION_START_YEAR..=ANIMATION_MAX_END_YEAR).contains(&self.end_year)
            || (self.end_year - ANIMATION_START_YEAR) % ANIMATION_STEP_YEARS != 0
        {
            return Err(GalaxyError::InvalidControl(format!(
                "end year {} not in {ANIMATION_START_YEAR}..={ANIMATION_MAX_END_YEAR} by steps of {ANIMATION_STEP_YEARS}",
                self.end_year
            )));
        }

        Ok(self)
    }

    /// Animation years selected by the controls.
    pub fn year_range(&self) -> YearRange {
        YearRange::dashboard(self.end_year)
    }
}
