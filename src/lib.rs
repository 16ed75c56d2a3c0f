pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{
    NPoint, NPoint2, NPoint3, NVec, NVec2, NVec3, Particle, Scalar, SimVector,
};
pub use simulation::coordinate::{
    Cartesian2D, Cartesian3D, CartesianSystem, Coordinate, Polar, Spherical,
};
pub use simulation::field::{
    CentralGravityField, DifferenceField, Field, FieldSet, LambdaField, NegateField, SumField,
    UniformField, GRAVITATIONAL_CONSTANT,
};
pub use simulation::integrator::{
    FieldIntegrator, FieldSource, ForceSource, GravityIntegrator, PairwiseGravity, ParticleHandle,
    ParticleRecord, SimResult, SimulationError, VerletIntegrator,
};
pub use simulation::trace::{Recorder, Track};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::scenario::{Runtime2D, Runtime3D, Scenario, Scenario3D};

pub use configuration::config::{
    BodyConfig, EngineConfig, FieldConfig, FieldTermConfig, ModeConfig, ParametersConfig,
    ScenarioConfig,
};

pub use benchmark::benchmark::{bench_gravity, bench_verlet};
