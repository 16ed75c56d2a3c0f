//! Numerical parameters for a simulation run.
//!
//! `Parameters` holds runtime settings:
//! - total simulated time and fixed step size,
//! - softening for self-gravity runs (`eps2`),
//! - sampling cadence for the trajectory recorder.

use super::states::Scalar;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: Scalar,       // total simulated time
    pub h0: Scalar,          // fixed step size
    pub eps2: Scalar,        // softening epsilon^2 for pairwise gravity
    pub sample_every: usize, // record every n-th step
}

impl Parameters {
    /// Number of fixed steps covering `t_end`.
    pub fn step_count(&self) -> usize {
        (self.t_end / self.h0).round() as usize
    }
}
