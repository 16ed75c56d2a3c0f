//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario:
//!
//! - [`EngineConfig`]     – dimension and force mode
//! - [`ParametersConfig`] – numerical parameters
//! - [`FieldConfig`]      – one field term (with optional negation)
//! - [`BodyConfig`]       – initial state for each particle
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario
//!
//! # YAML format
//! An example 2D scenario matching these types:
//!
//! ```yaml
//! engine:
//!   dimension: false        # false -> 2D, true -> 3D
//!   mode: "field"           # or "gravity" (self-gravitating)
//!
//! parameters:
//!   t_end: 31557600.0       # total simulated time, s
//!   h0: 21600.0             # fixed step size, s
//!   eps2: 0.0               # softening epsilon^2 (gravity mode)
//!   sample_every: 4         # record every n-th step
//!
//! fields:                   # read in field mode only; terms are summed
//!   - term:
//!       central_gravity:
//!         center: [0.0, 0.0]
//!         mass: 1.989e30
//!   - term:
//!       uniform:
//!         g: [0.0, -9.8]
//!     negate: true
//!
//! bodies:
//!   - x: [1.496e11, 0.0]    # initial position
//!     v: [0.0, 2.978e4]     # initial velocity
//!     m: 1.0                # mass, must be positive
//!     q: 0.0                # charge
//! ```
//!
//! The engine maps this configuration into its runtime scenario types,
//! validating component counts and masses along the way.

use serde::Deserialize;

/// Which force rule drives the integrator.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum ModeConfig {
    #[serde(rename = "field")] // external field set, one evaluation per particle
    Field,

    #[serde(rename = "gravity")] // direct all-pairs self-gravity
    Gravity,
}

/// High-level engine configuration.
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub dimension: bool, // `false` - 2D simulation, `true` - 3D simulation
    pub mode: ModeConfig, // force rule used for advancing the system
}

/// Global numerical parameters for a scenario.
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // total simulated time
    pub h0: f64,    // fixed step size
    #[serde(default)]
    pub eps2: f64, // softening - prevents singular forces at tiny separations
    #[serde(default = "default_sample_every")]
    pub sample_every: usize, // recorder cadence
}

fn default_sample_every() -> usize {
    1
}

/// One term of the scenario's field set.
#[derive(Deserialize, Debug)]
pub struct FieldConfig {
    pub term: FieldTermConfig,
    #[serde(default)]
    pub negate: bool, // wrap the term in a pointwise negation
}

/// The field term itself.
#[derive(Deserialize, Debug)]
pub enum FieldTermConfig {
    /// Constant acceleration `g`; force on a particle is `m * g`.
    #[serde(rename = "uniform")]
    Uniform { g: Vec<f64> },

    /// Point-mass gravity of `mass` fixed at `center`.
    #[serde(rename = "central_gravity")]
    CentralGravity { center: Vec<f64>, mass: f64 },
}

/// Configuration for a single particle's initial state.
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position, component count must match dimension
    pub v: Vec<f64>, // initial velocity
    pub m: f64,      // mass, validated positive at insertion
    #[serde(default)]
    pub q: f64, // charge
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub fields: Vec<FieldConfig>, // summed into one field set (field mode)
    pub bodies: Vec<BodyConfig>,
}
