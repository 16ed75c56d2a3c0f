//! High-level runtime engine settings.
//!
//! Selects dimension (2D/3D) and the force mode (external field set vs
//! self-gravity) used when building and running a scenario.

use crate::configuration::config::ModeConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub dimension: bool,  // false = 2D, true = 3D
    pub mode: ModeConfig, // field or gravity
}
