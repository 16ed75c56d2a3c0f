//! Velocity-Verlet time integration over an owned particle population.
//!
//! [`VerletIntegrator`] owns the records and a per-instance scratch buffer
//! for force accumulation; nothing is shared between instances. The force
//! rule is a [`ForceSource`] writing into that buffer, with two built-in
//! sources:
//! - [`FieldSource`] evaluates an external [`Field`] per record
//!   ([`FieldIntegrator`]),
//! - [`PairwiseGravity`] runs the direct N^2 self-gravity sum
//!   ([`GravityIntegrator`]).
//!
//! Callers keep [`ParticleHandle`]s across pushes and steps; handles stay
//! valid no matter how the record storage grows.

use super::coordinate::CartesianSystem;
use super::field::{Field, GRAVITATIONAL_CONSTANT};
use super::states::{Particle, Scalar, SimVector};
use std::ops::{Add, Sub};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Errors surfaced at the integrator boundary. Stepping itself is total;
/// only insertion, handle resolution, and scenario assembly can fail.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("particle mass must be positive, got {0}")]
    InvalidMass(Scalar),
    #[error("handle does not belong to this integrator")]
    ForeignHandle,
    #[error("handle index {index} out of range, integrator holds {len} records")]
    HandleOutOfRange { index: usize, len: usize },
    #[error("expected {expected} components for a {context}, got {got}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },
}

pub type SimResult<T> = Result<T, SimulationError>;

/// State of one particle inside an integrator: intrinsic attributes,
/// kinematic state, and the acceleration cached from the most recent force
/// evaluation (the reused half of the two-evaluation Verlet update).
#[derive(Debug, Clone, Copy)]
pub struct ParticleRecord<C: CartesianSystem> {
    pub particle: Particle,
    pub position: C,
    pub velocity: C::Vector,
    acceleration: C::Vector,
}

impl<C: CartesianSystem> ParticleRecord<C> {
    /// Acceleration at the current position, from the last force pass.
    pub fn acceleration(&self) -> C::Vector {
        self.acceleration
    }
}

/// Stable reference to a record inside one integrator. Validity is
/// independent of later insertions: records are only ever appended and
/// indices are never reused. Resolving a handle against a different
/// integrator fails, never aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleHandle {
    owner: u64,
    index: usize,
}

impl ParticleHandle {
    /// Insertion index of the referenced record.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Add<usize> for ParticleHandle {
    type Output = Self;

    fn add(self, rhs: usize) -> Self {
        Self {
            owner: self.owner,
            index: self.index + rhs,
        }
    }
}

impl Sub<usize> for ParticleHandle {
    type Output = Self;

    fn sub(self, rhs: usize) -> Self {
        Self {
            owner: self.owner,
            index: self.index - rhs,
        }
    }
}

impl Sub for ParticleHandle {
    type Output = isize;

    fn sub(self, rhs: Self) -> isize {
        debug_assert_eq!(self.owner, rhs.owner);
        self.index as isize - rhs.index as isize
    }
}

/// A rule producing the force on every record. Contributions are added
/// into `out[i]`; the caller zeroes the buffer first. Implementations may
/// read all records (pairwise interactions) but must not mutate anything.
pub trait ForceSource<C: CartesianSystem> {
    fn accumulate(&self, records: &[ParticleRecord<C>], out: &mut [C::Vector]);
}

/// Force source backed by an external field: each record feels
/// `field.evaluate(position, particle)`, independent of every other record.
pub struct FieldSource<F> {
    pub field: F,
}

impl<C, F> ForceSource<C> for FieldSource<F>
where
    C: CartesianSystem,
    F: Field<C>,
{
    fn accumulate(&self, records: &[ParticleRecord<C>], out: &mut [C::Vector]) {
        for (record, force) in records.iter().zip(out.iter_mut()) {
            *force += self.field.evaluate(&record.position, &record.particle);
        }
    }
}

/// Direct all-pairs Newtonian self-gravity, O(N^2) per evaluation.
///
/// Forces are computed in Cartesian coordinates regardless of how the
/// positions are stored. With `eps2 == 0`, a pair at exactly zero
/// separation contributes nothing; a positive `eps2` is added to the
/// squared separation instead (Plummer softening).
pub struct PairwiseGravity {
    pub eps2: Scalar,
}

impl<C: CartesianSystem> ForceSource<C> for PairwiseGravity {
    fn accumulate(&self, records: &[ParticleRecord<C>], out: &mut [C::Vector]) {
        let n = records.len();

        // Each unordered pair (i, j) with i < j is visited once and its
        // equal-and-opposite forces applied to both ends, so total
        // momentum is conserved to the last bit.
        for i in 0..n {
            let xi = records[i].position.to_cartesian();
            let mi = records[i].particle.mass;

            for j in (i + 1)..n {
                let xj = records[j].position.to_cartesian();
                let mj = records[j].particle.mass;

                // Displacement from i to j: i is pulled along +r, j along -r.
                let r = xj - xi;
                let r2 = r.norm_squared();

                if r2 == 0.0 && self.eps2 == 0.0 {
                    continue; // collocated pair contributes nothing
                }

                // Softened squared separation.
                let d2 = r2 + self.eps2;

                // 1 / d and 1 / d^3; the Newtonian force is
                //   F = G * m_i * m_j * r / d^3.
                let inv_d = d2.sqrt().recip();
                let inv_d3 = inv_d * inv_d * inv_d;
                let f = r * (GRAVITATIONAL_CONSTANT * mi * mj * inv_d3);

                out[i] += f;
                out[j] -= f;
            }
        }
    }
}

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Velocity-Verlet integrator over a growable particle population.
///
/// Single-threaded by contract: one logical owner drives `step`, and force
/// evaluations during a step must not call back into the integrator.
pub struct VerletIntegrator<C: CartesianSystem, S: ForceSource<C>> {
    source: S,
    records: Vec<ParticleRecord<C>>,
    scratch: Vec<C::Vector>, // per-instance force buffer, never shared
    time: Scalar,
    id: u64,
}

/// Integrator driven by an external force field.
pub type FieldIntegrator<C, F> = VerletIntegrator<C, FieldSource<F>>;

/// Self-gravitating N-body integrator.
pub type GravityIntegrator<C> = VerletIntegrator<C, PairwiseGravity>;

impl<C, F> VerletIntegrator<C, FieldSource<F>>
where
    C: CartesianSystem,
    F: Field<C>,
{
    /// Integrator whose every particle feels `field`. The field may be
    /// owned or borrowed; composites keep working either way.
    pub fn new(field: F) -> Self {
        Self::with_source(FieldSource { field })
    }
}

impl<C: CartesianSystem> VerletIntegrator<C, PairwiseGravity> {
    /// Self-gravitating integrator with unsoftened interactions.
    pub fn new() -> Self {
        Self::with_source(PairwiseGravity { eps2: 0.0 })
    }

    /// Self-gravitating integrator adding `eps2` to every squared pair
    /// separation.
    pub fn with_softening(eps2: Scalar) -> Self {
        Self::with_source(PairwiseGravity { eps2 })
    }
}

impl<C: CartesianSystem> Default for VerletIntegrator<C, PairwiseGravity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, S> VerletIntegrator<C, S>
where
    C: CartesianSystem,
    S: ForceSource<C>,
{
    /// Integrator over an arbitrary force source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            records: Vec::new(),
            scratch: Vec::new(),
            time: 0.0,
            id: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Insert a particle with its initial kinematic state.
    ///
    /// Fails on non-positive (or NaN) mass, leaving the integrator
    /// untouched. On success every record's cached acceleration is
    /// refreshed, so the first `step` after a push starts from forces
    /// consistent with the full population.
    pub fn push(
        &mut self,
        particle: Particle,
        position: C,
        velocity: C::Vector,
    ) -> SimResult<ParticleHandle> {
        if !(particle.mass > 0.0) {
            return Err(SimulationError::InvalidMass(particle.mass));
        }

        let index = self.records.len();
        self.records.push(ParticleRecord {
            particle,
            position,
            velocity,
            acceleration: <C::Vector>::zeros(),
        });
        self.refresh_accelerations();

        Ok(ParticleHandle {
            owner: self.id,
            index,
        })
    }

    /// Advance the whole population by one velocity-Verlet step.
    ///
    /// Two strict passes: every position moves to t + dt first, then all
    /// forces are evaluated at the new positions, then every velocity gets
    /// the averaged kick. Pairwise sources need that ordering for an
    /// insertion-order-independent result. `step(0.0)` changes nothing.
    pub fn step(&mut self, dt: Scalar) {
        let half_dt = 0.5 * dt;

        // Drift: x_{n+1} = x_n + v_n dt + 1/2 a_n dt^2
        for record in self.records.iter_mut() {
            record.position =
                record.position + (record.velocity * dt + record.acceleration * (half_dt * dt));
        }

        // Forces at the new positions.
        self.forces_into_scratch();

        // Kick: v_{n+1} = v_n + 1/2 (a_n + a_{n+1}) dt, then cache a_{n+1}
        // as the next step's a_n.
        for (record, force) in self.records.iter_mut().zip(self.scratch.iter()) {
            let a_new = *force / record.particle.mass;
            record.velocity += (record.acceleration + a_new) * half_dt;
            record.acceleration = a_new;
        }

        self.time += dt;
    }

    /// Resolve a handle to its record. Fails on a handle from another
    /// integrator or an out-of-range index; never yields a default record.
    pub fn get(&self, handle: ParticleHandle) -> SimResult<&ParticleRecord<C>> {
        if handle.owner != self.id {
            return Err(SimulationError::ForeignHandle);
        }
        self.records
            .get(handle.index)
            .ok_or(SimulationError::HandleOutOfRange {
                index: handle.index,
                len: self.records.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Elapsed simulated time, the sum of all step sizes so far.
    pub fn time(&self) -> Scalar {
        self.time
    }

    pub fn records(&self) -> &[ParticleRecord<C>] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParticleRecord<C>> {
        self.records.iter()
    }

    /// Handles of all records, in insertion order.
    pub fn handles(&self) -> impl Iterator<Item = ParticleHandle> + '_ {
        let owner = self.id;
        (0..self.records.len()).map(move |index| ParticleHandle { owner, index })
    }

    /// Zero the scratch buffer and accumulate the current forces into it.
    fn forces_into_scratch(&mut self) {
        self.scratch.resize(self.records.len(), <C::Vector>::zeros());
        for force in self.scratch.iter_mut() {
            *force = <C::Vector>::zeros();
        }
        self.source.accumulate(&self.records, &mut self.scratch);
    }

    /// Recompute every record's cached acceleration at the current
    /// positions.
    fn refresh_accelerations(&mut self) {
        self.forces_into_scratch();
        for (record, force) in self.records.iter_mut().zip(self.scratch.iter()) {
            record.acceleration = *force / record.particle.mass;
        }
    }
}
