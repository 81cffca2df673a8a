pub mod catalog;
pub mod charts;
pub mod config;
pub mod constants;
pub mod display;
pub mod env_state;
pub mod gaia_request;
pub mod galaxy_errors;
pub mod motion;
pub mod palette;
pub mod views;

pub use catalog::{StarCatalog, StarRecord};
pub use config::DashboardConfig;
pub use galaxy_errors::GalaxyError;
pub use motion::{project, AnimationFrames};
