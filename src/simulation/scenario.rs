//! Build fully-initialized simulation scenarios from configuration.
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces runtime bundles
//! (`Scenario` for 2D, `Scenario3D` for 3D) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - the live integrator, already populated with the configured bodies
//! - one handle per configured body, in file order
//!
//! Building is fallible: component counts are checked against the engine
//! dimension and body masses are validated by the integrator's `push`.

use crate::configuration::config::{FieldConfig, FieldTermConfig, ModeConfig, ScenarioConfig};
use crate::simulation::coordinate::{Cartesian2D, Cartesian3D};
use crate::simulation::engine::Engine;
use crate::simulation::field::{CentralGravityField, Field, FieldSet, NegateField, UniformField};
use crate::simulation::integrator::{
    FieldIntegrator, GravityIntegrator, ParticleHandle, SimResult, SimulationError,
};
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, NVec3, Particle};

fn nvec2(values: &[f64], context: &'static str) -> SimResult<NVec2> {
    if values.len() != 2 {
        return Err(SimulationError::DimensionMismatch {
            context,
            expected: 2,
            got: values.len(),
        });
    }
    Ok(NVec2::new(values[0], values[1]))
}

fn nvec3(values: &[f64], context: &'static str) -> SimResult<NVec3> {
    if values.len() != 3 {
        return Err(SimulationError::DimensionMismatch {
            context,
            expected: 3,
            got: values.len(),
        });
    }
    Ok(NVec3::new(values[0], values[1], values[2]))
}

/// The live 2D integrator variant selected by the engine mode.
pub enum Runtime2D {
    Field(FieldIntegrator<Cartesian2D, FieldSet<Cartesian2D>>),
    Gravity(GravityIntegrator<Cartesian2D>),
}

/// A fully-initialized 2D simulation scenario.
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub runtime: Runtime2D,
    pub handles: Vec<ParticleHandle>,
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("engine", &self.engine)
            .field("parameters", &self.parameters)
            .field("handles", &self.handles)
            .finish()
    }
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            h0: p_cfg.h0,
            eps2: p_cfg.eps2,
            sample_every: p_cfg.sample_every.max(1),
        };

        let engine = Engine {
            dimension: cfg.engine.dimension,
            mode: cfg.engine.mode.clone(),
        };

        let mut handles = Vec::with_capacity(cfg.bodies.len());
        let runtime = match &engine.mode {
            ModeConfig::Field => {
                let mut integrator: FieldIntegrator<Cartesian2D, FieldSet<Cartesian2D>> =
                    FieldIntegrator::new(field_set_2d(&cfg.fields)?);
                for bc in &cfg.bodies {
                    let x = nvec2(&bc.x, "body position")?;
                    let v = nvec2(&bc.v, "body velocity")?;
                    handles.push(integrator.push(
                        Particle::new(bc.m, bc.q),
                        Cartesian2D::new(x[0], x[1]),
                        v,
                    )?);
                }
                Runtime2D::Field(integrator)
            }
            ModeConfig::Gravity => {
                let mut integrator =
                    GravityIntegrator::<Cartesian2D>::with_softening(parameters.eps2);
                for bc in &cfg.bodies {
                    let x = nvec2(&bc.x, "body position")?;
                    let v = nvec2(&bc.v, "body velocity")?;
                    handles.push(integrator.push(
                        Particle::new(bc.m, bc.q),
                        Cartesian2D::new(x[0], x[1]),
                        v,
                    )?);
                }
                Runtime2D::Gravity(integrator)
            }
        };

        Ok(Self {
            engine,
            parameters,
            runtime,
            handles,
        })
    }
}

/// Sum the configured 2D field terms into one field set.
fn field_set_2d(fields: &[FieldConfig]) -> SimResult<FieldSet<Cartesian2D>> {
    let mut set = FieldSet::new();
    for cfg in fields {
        let term: Box<dyn Field<Cartesian2D> + Send + Sync> = match &cfg.term {
            FieldTermConfig::Uniform { g } => {
                Box::new(UniformField::new(nvec2(g, "uniform field")?))
            }
            FieldTermConfig::CentralGravity { center, mass } => {
                let c = nvec2(center, "gravity center")?;
                Box::new(CentralGravityField::new(Cartesian2D::new(c[0], c[1]), *mass))
            }
        };
        set = if cfg.negate {
            set.with(NegateField::new(term))
        } else {
            set.with_boxed(term)
        };
    }
    Ok(set)
}

// =========================================================================================
// 3d stuff below
// =========================================================================================

/// The live 3D integrator variant selected by the engine mode.
pub enum Runtime3D {
    Field(FieldIntegrator<Cartesian3D, FieldSet<Cartesian3D>>),
    Gravity(GravityIntegrator<Cartesian3D>),
}

/// A fully-initialized 3D simulation scenario.
pub struct Scenario3D {
    pub engine: Engine,
    pub parameters: Parameters,
    pub runtime: Runtime3D,
    pub handles: Vec<ParticleHandle>,
}

impl Scenario3D {
    pub fn build_scenario_3d(cfg: ScenarioConfig) -> SimResult<Self> {
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            h0: p_cfg.h0,
            eps2: p_cfg.eps2,
            sample_every: p_cfg.sample_every.max(1),
        };

        let engine = Engine {
            dimension: cfg.engine.dimension,
            mode: cfg.engine.mode.clone(),
        };

        let mut handles = Vec::with_capacity(cfg.bodies.len());
        let runtime = match &engine.mode {
            ModeConfig::Field => {
                let mut integrator: FieldIntegrator<Cartesian3D, FieldSet<Cartesian3D>> =
                    FieldIntegrator::new(field_set_3d(&cfg.fields)?);
                for bc in &cfg.bodies {
                    let x = nvec3(&bc.x, "body position")?;
                    let v = nvec3(&bc.v, "body velocity")?;
                    handles.push(integrator.push(
                        Particle::new(bc.m, bc.q),
                        Cartesian3D::new(x[0], x[1], x[2]),
                        v,
                    )?);
                }
                Runtime3D::Field(integrator)
            }
            ModeConfig::Gravity => {
                let mut integrator =
                    GravityIntegrator::<Cartesian3D>::with_softening(parameters.eps2);
                for bc in &cfg.bodies {
                    let x = nvec3(&bc.x, "body position")?;
                    let v = nvec3(&bc.v, "body velocity")?;
                    handles.push(integrator.push(
                        Particle::new(bc.m, bc.q),
                        Cartesian3D::new(x[0], x[1], x[2]),
                        v,
                    )?);
                }
                Runtime3D::Gravity(integrator)
            }
        };

        Ok(Self {
            engine,
            parameters,
            runtime,
            handles,
        })
    }
}

/// Sum the configured 3D field terms into one field set.
fn field_set_3d(fields: &[FieldConfig]) -> SimResult<FieldSet<Cartesian3D>> {
    let mut set = FieldSet::new();
    for cfg in fields {
        let term: Box<dyn Field<Cartesian3D> + Send + Sync> = match &cfg.term {
            FieldTermConfig::Uniform { g } => {
                Box::new(UniformField::new(nvec3(g, "uniform field")?))
            }
            FieldTermConfig::CentralGravity { center, mass } => {
                let c = nvec3(center, "gravity center")?;
                Box::new(CentralGravityField::new(
                    Cartesian3D::new(c[0], c[1], c[2]),
                    *mass,
                ))
            }
        };
        set = if cfg.negate {
            set.with(NegateField::new(term))
        } else {
            set.with_boxed(term)
        };
    }
    Ok(set)
}
