//! Core value types for the particle simulation.
//!
//! Defines the scalar/vector/point aliases over nalgebra:
//! - `NVec<D>`  statically sized displacement/velocity/force vector
//! - `NPoint<D>` Cartesian position, distinct from `NVec` in the type system
//!
//! plus the `SimVector` ops bound that closes the vector family for
//! coordinate-generic code, and the `Particle` value type.

use nalgebra::SVector;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub, SubAssign};

pub type Scalar = f64;

pub type NVec<const D: usize, S = Scalar> = SVector<S, D>;
pub type NVec2 = NVec<2>;
pub type NVec3 = NVec<3>;

/// Cartesian position. Point - Point is an `NVec` displacement and
/// Point + `NVec` is a Point, so conversion APIs cannot be handed a raw
/// displacement where a position is meant.
pub type NPoint<const D: usize> = nalgebra::Point<Scalar, D>;
pub type NPoint2 = NPoint<2>;
pub type NPoint3 = NPoint<3>;

/// Arithmetic surface shared by every fixed-dimension `f64` vector in the
/// simulation. Coordinate-generic code (fields, integrators) is written
/// against this and monomorphizes to plain nalgebra arithmetic.
pub trait SimVector:
    Copy
    + PartialEq
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<Scalar, Output = Self>
    + Div<Scalar, Output = Self>
    + AddAssign
    + SubAssign
    + Index<usize, Output = Scalar>
{
    fn zeros() -> Self;
    fn dot(&self, other: &Self) -> Scalar;
    fn norm(&self) -> Scalar;
    fn norm_squared(&self) -> Scalar;
}

impl<const D: usize> SimVector for NVec<D> {
    fn zeros() -> Self {
        NVec::<D>::zeros()
    }

    fn dot(&self, other: &Self) -> Scalar {
        SVector::dot(self, other)
    }

    fn norm(&self) -> Scalar {
        SVector::norm(self)
    }

    fn norm_squared(&self) -> Scalar {
        SVector::norm_squared(self)
    }
}

/// Intrinsic particle attributes. Plain value, freely copied; kinematic
/// state (position, velocity) lives in the integrator's records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub mass: Scalar,   // mass in kg
    pub charge: Scalar, // charge in C
}

impl Particle {
    /// A massless particle can be constructed but not pushed into an
    /// integrator; validation happens at insertion.
    pub fn new(mass: Scalar, charge: Scalar) -> Self {
        Self { mass, charge }
    }
}
