//! Force fields and their composition.
//!
//! A field maps (position, particle) to a force vector and must be pure.
//! Fields compose two ways:
//! - statically, as a small expression tree (`SumField`, `NegateField`,
//!   built with [`Field::plus`] / [`Field::minus`] / [`Field::negated`]),
//!   monomorphized so hot-path evaluation stays branch-free;
//! - dynamically, as a [`FieldSet`] of boxed terms, which is what the
//!   scenario loader assembles from configuration.
//!
//! Blanket impls for `&F` and `Box<F>` let composites hold operands either
//! borrowed or owned.

use super::coordinate::{CartesianSystem, Coordinate};
use super::states::{Particle, Scalar, SimVector};

/// Newtonian gravitational constant, m^3 kg^-1 s^-2.
pub const GRAVITATIONAL_CONSTANT: Scalar = 6.674_30e-11;

/// Force on a particle of the given intrinsic properties at the given
/// position. Implementations must be pure: no observable side effects, and
/// the same inputs always yield the same force.
pub trait Field<C: Coordinate> {
    fn evaluate(&self, position: &C, particle: &Particle) -> C::Vector;

    /// Pointwise sum of two fields over the same coordinate system.
    fn plus<G>(self, other: G) -> SumField<Self, G>
    where
        Self: Sized,
        G: Field<C>,
    {
        SumField { lhs: self, rhs: other }
    }

    /// Pointwise difference, as the sum with the negated right operand.
    fn minus<G>(self, other: G) -> DifferenceField<Self, G>
    where
        Self: Sized,
        G: Field<C>,
    {
        SumField {
            lhs: self,
            rhs: NegateField { inner: other },
        }
    }

    /// Pointwise negation.
    fn negated(self) -> NegateField<Self>
    where
        Self: Sized,
    {
        NegateField { inner: self }
    }
}

impl<C: Coordinate, F: Field<C> + ?Sized> Field<C> for &F {
    fn evaluate(&self, position: &C, particle: &Particle) -> C::Vector {
        (**self).evaluate(position, particle)
    }
}

impl<C: Coordinate, F: Field<C> + ?Sized> Field<C> for Box<F> {
    fn evaluate(&self, position: &C, particle: &Particle) -> C::Vector {
        (**self).evaluate(position, particle)
    }
}

/// Field backed by a user-supplied closure `(position, particle) -> force`.
pub struct LambdaField<F> {
    func: F,
}

impl<F> LambdaField<F> {
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<C, F> Field<C> for LambdaField<F>
where
    C: Coordinate,
    F: Fn(&C, &Particle) -> C::Vector,
{
    fn evaluate(&self, position: &C, particle: &Particle) -> C::Vector {
        (self.func)(position, particle)
    }
}

/// Constant acceleration field: force = mass * g everywhere.
#[derive(Debug, Clone, Copy)]
pub struct UniformField<C: Coordinate> {
    pub g: C::Vector,
}

impl<C: Coordinate> UniformField<C> {
    pub fn new(g: C::Vector) -> Self {
        Self { g }
    }
}

impl<C: Coordinate> Field<C> for UniformField<C> {
    fn evaluate(&self, _position: &C, particle: &Particle) -> C::Vector {
        self.g * particle.mass
    }
}

/// Gravity of a point source of mass `mass` fixed at `center`:
/// F = -G * M * m * (r - c) / |r - c|^3.
///
/// Evaluating exactly at the center returns the zero vector.
#[derive(Debug, Clone, Copy)]
pub struct CentralGravityField<C: CartesianSystem> {
    center: C,
    mass: Scalar,
}

impl<C: CartesianSystem> CentralGravityField<C> {
    pub fn new(center: C, mass: Scalar) -> Self {
        Self { center, mass }
    }
}

impl<C: CartesianSystem> Field<C> for CentralGravityField<C> {
    fn evaluate(&self, position: &C, particle: &Particle) -> C::Vector {
        let r = position.to_cartesian() - self.center.to_cartesian();
        let d2 = r.norm_squared();
        if d2 == 0.0 {
            return <C::Vector>::zeros();
        }
        let inv_d = d2.sqrt().recip();
        let inv_d3 = inv_d * inv_d * inv_d;
        r * (-GRAVITATIONAL_CONSTANT * self.mass * particle.mass * inv_d3)
    }
}

/// Pointwise sum of two fields. Operands agree on the coordinate system by
/// construction.
#[derive(Debug, Clone, Copy)]
pub struct SumField<A, B> {
    lhs: A,
    rhs: B,
}

impl<A, B> SumField<A, B> {
    pub fn new(lhs: A, rhs: B) -> Self {
        Self { lhs, rhs }
    }
}

impl<C, A, B> Field<C> for SumField<A, B>
where
    C: Coordinate,
    A: Field<C>,
    B: Field<C>,
{
    fn evaluate(&self, position: &C, particle: &Particle) -> C::Vector {
        self.lhs.evaluate(position, particle) + self.rhs.evaluate(position, particle)
    }
}

/// Pointwise negation of a field. An involution: negating twice restores
/// the original values exactly.
#[derive(Debug, Clone, Copy)]
pub struct NegateField<A> {
    inner: A,
}

impl<A> NegateField<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

impl<C, A> Field<C> for NegateField<A>
where
    C: Coordinate,
    A: Field<C>,
{
    fn evaluate(&self, position: &C, particle: &Particle) -> C::Vector {
        -self.inner.evaluate(position, particle)
    }
}

/// Difference of two fields, defined as A + (-B).
pub type DifferenceField<A, B> = SumField<A, NegateField<B>>;

/// Runtime-composed collection of field terms. Contributions of all terms
/// are summed; an empty set is the zero field.
pub struct FieldSet<C: Coordinate> {
    terms: Vec<Box<dyn Field<C> + Send + Sync>>,
}

impl<C: Coordinate> FieldSet<C> {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a field term.
    pub fn with(mut self, term: impl Field<C> + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Add an already-boxed field term.
    pub fn with_boxed(mut self, term: Box<dyn Field<C> + Send + Sync>) -> Self {
        self.terms.push(term);
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<C: Coordinate> Default for FieldSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Coordinate> Field<C> for FieldSet<C> {
    fn evaluate(&self, position: &C, particle: &Particle) -> C::Vector {
        let mut total = <C::Vector>::zeros();
        for term in &self.terms {
            total += term.evaluate(position, particle);
        }
        total
    }
}
