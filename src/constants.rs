//! # Constants and type definitions for galaxyview
//!
//! This module centralizes the **conversion factors**, the **dashboard control limits**
//! and the **unit type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Unit conversions (milliarcseconds ↔ degrees, parallax ↔ parsecs)
//! - Gaia archive defaults (TAP endpoint, source table)
//! - Ranges accepted by the dashboard controls
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Milliarcseconds in one degree (3600 arcsec × 1000)
pub const MAS_PER_DEG: f64 = 3.6e6;

/// Parallax (mas) × distance (pc) product: `distance_pc = PARALLAX_MAS_PC / parallax`
pub const PARALLAX_MAS_PC: f64 = 1000.0;

/// Reference distance of the absolute magnitude scale, in parsecs (log10(10) = 1)
pub const ABS_MAG_REF_LOG10_PC: f64 = 1.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

// -------------------------------------------------------------------------------------------------
// Gaia archive
// -------------------------------------------------------------------------------------------------

/// Base URL of the ESA Gaia archive TAP service
pub const GAIA_TAP_URL: &str = "https://gea.esac.esa.int/tap-server/tap";

/// Environment variable overriding [`GAIA_TAP_URL`]
pub const TAP_URL_ENV: &str = "GALAXYVIEW_TAP_URL";

/// Gaia DR3 main source table
pub const GAIA_SOURCE_TABLE: &str = "gaiadr3.gaia_source";

/// Columns requested for every star, in response order
pub const STAR_COLUMNS: [&str; 7] = [
    "ra",
    "dec",
    "parallax",
    "phot_g_mean_mag",
    "pmra",
    "pmdec",
    "bp_rp",
];

/// Lower parallax bound of the query filter (mas)
pub const MIN_PARALLAX_MAS: f64 = 1.0;

/// HTTP timeout applied to a TAP request, in seconds
pub const TAP_TIMEOUT_SECS: u64 = 120;

// -------------------------------------------------------------------------------------------------
// Dashboard controls
// -------------------------------------------------------------------------------------------------

/// Smallest accepted star sample
pub const MIN_SAMPLE_SIZE: u32 = 100;

/// Largest accepted star sample
pub const MAX_SAMPLE_SIZE: u32 = 5000;

/// Default star sample
pub const DEFAULT_SAMPLE_SIZE: u32 = 1000;

/// First year of the proper motion animation
pub const ANIMATION_START_YEAR: i32 = 2025;

/// Last year selectable for the proper motion animation
pub const ANIMATION_MAX_END_YEAR: i32 = 2125;

/// Years between two animation frames
pub const ANIMATION_STEP_YEARS: i32 = 10;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in milliarcseconds
pub type MilliArcSec = f64;
/// Angular rate in milliarcseconds per year
pub type MasPerYear = f64;
/// Distance in parsecs
pub type Parsec = f64;
/// Photometric magnitude
pub type Magnitude = f64;
/// Calendar year of an animation frame
pub type Year = i32;
