//! Sampled trajectory series for external plotting/animation consumers.
//!
//! The core never renders anything. A [`Recorder`] is the read-side
//! contract: callers register the handles they care about, call
//! [`Recorder::sample`] between steps, and hand the collected series to
//! whatever draws them. Each [`Track`] is one particle's ordered Cartesian
//! position sequence plus its velocities.

use super::coordinate::{CartesianSystem, Coordinate};
use super::integrator::{ForceSource, ParticleHandle, SimResult, VerletIntegrator};
use super::states::Scalar;

/// Sampled series for one tracked particle.
pub struct Track<C: Coordinate> {
    pub handle: ParticleHandle,
    pub positions: Vec<C::Cartesian>,
    pub velocities: Vec<C::Vector>,
}

impl<C: Coordinate> Track<C> {
    fn new(handle: ParticleHandle) -> Self {
        Self {
            handle,
            positions: Vec::new(),
            velocities: Vec::new(),
        }
    }

    /// One Cartesian component of the position series, for plotting a
    /// coordinate against time.
    pub fn position_component(&self, axis: usize) -> impl Iterator<Item = Scalar> + '_ {
        self.positions.iter().map(move |p| p[axis])
    }
}

/// Collects (time, position, velocity) samples for a chosen set of
/// particles across an integration run.
pub struct Recorder<C: Coordinate> {
    times: Vec<Scalar>,
    tracks: Vec<Track<C>>,
}

impl<C: CartesianSystem> Recorder<C> {
    pub fn new() -> Self {
        Self {
            times: Vec::new(),
            tracks: Vec::new(),
        }
    }

    /// Register a particle to be sampled. Call before the first `sample`.
    pub fn track(&mut self, handle: ParticleHandle) {
        self.tracks.push(Track::new(handle));
    }

    /// Append the current state of every tracked particle. Fails if a
    /// tracked handle does not resolve against `integrator`.
    pub fn sample<S: ForceSource<C>>(
        &mut self,
        integrator: &VerletIntegrator<C, S>,
    ) -> SimResult<()> {
        for track in self.tracks.iter_mut() {
            let record = integrator.get(track.handle)?;
            track.positions.push(record.position.to_cartesian());
            track.velocities.push(record.velocity);
        }
        self.times.push(integrator.time());
        Ok(())
    }

    pub fn times(&self) -> &[Scalar] {
        &self.times
    }

    pub fn tracks(&self) -> &[Track<C>] {
        &self.tracks
    }

    /// Number of samples taken so far.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

impl<C: CartesianSystem> Default for Recorder<C> {
    fn default() -> Self {
        Self::new()
    }
}
