//! Coordinate systems and positions within them.
//!
//! A `Coordinate` value is a point in a named system: it stores components
//! in that system's own conventions and converts to and from the Cartesian
//! picture. The family is closed and statically dispatched, so inner-loop
//! arithmetic monomorphizes to plain vector math.
//!
//! Integrators only accept systems whose native storage is Cartesian (the
//! `CartesianSystem` marker): advancing a position by `velocity * dt` is
//! componentwise addition in storage, which is only motion for Cartesian
//! charts. `Polar` and `Spherical` convert and measure distances but do not
//! integrate.

use super::states::{NPoint, NVec2, NVec3, Scalar, SimVector};
use std::fmt::Debug;
use std::ops::{Add, Index, Sub};

/// A position in some coordinate system of statically known dimension.
pub trait Coordinate:
    Copy + PartialEq + Debug + Add<Self::Vector, Output = Self> + Sub<Self::Vector, Output = Self>
{
    /// Component/displacement vector in this system's conventions.
    type Vector: SimVector;
    /// The Cartesian image type returned by [`Coordinate::to_cartesian`].
    type Cartesian: Copy
        + PartialEq
        + Debug
        + Sub<Output = Self::Vector>
        + Add<Self::Vector, Output = Self::Cartesian>
        + Index<usize, Output = Scalar>;

    const DIMENSION: usize;

    fn to_cartesian(&self) -> Self::Cartesian;
    fn from_cartesian(point: Self::Cartesian) -> Self;

    /// Euclidean distance, measured through the Cartesian picture.
    fn distance(&self, other: &Self) -> Scalar {
        (self.to_cartesian() - other.to_cartesian()).norm()
    }
}

/// Marker for systems whose native storage already is Cartesian, i.e.
/// `to_cartesian`/`from_cartesian` are the identity. Integration is
/// restricted to these.
pub trait CartesianSystem: Coordinate {}

/// 2D Cartesian coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartesian2D(pub NPoint<2>);

impl Cartesian2D {
    pub fn new(x: Scalar, y: Scalar) -> Self {
        Self(NPoint::<2>::new(x, y))
    }

    pub fn origin() -> Self {
        Self(NPoint::<2>::origin())
    }
}

impl Add<NVec2> for Cartesian2D {
    type Output = Self;

    fn add(self, rhs: NVec2) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub<NVec2> for Cartesian2D {
    type Output = Self;

    fn sub(self, rhs: NVec2) -> Self {
        Self(self.0 - rhs)
    }
}

impl Index<usize> for Cartesian2D {
    type Output = Scalar;

    fn index(&self, index: usize) -> &Scalar {
        &self.0[index]
    }
}

impl Coordinate for Cartesian2D {
    type Vector = NVec2;
    type Cartesian = NPoint<2>;

    const DIMENSION: usize = 2;

    fn to_cartesian(&self) -> NPoint<2> {
        self.0
    }

    fn from_cartesian(point: NPoint<2>) -> Self {
        Self(point)
    }
}

impl CartesianSystem for Cartesian2D {}

/// 3D Cartesian coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartesian3D(pub NPoint<3>);

impl Cartesian3D {
    pub fn new(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self(NPoint::<3>::new(x, y, z))
    }

    pub fn origin() -> Self {
        Self(NPoint::<3>::origin())
    }
}

impl Add<NVec3> for Cartesian3D {
    type Output = Self;

    fn add(self, rhs: NVec3) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub<NVec3> for Cartesian3D {
    type Output = Self;

    fn sub(self, rhs: NVec3) -> Self {
        Self(self.0 - rhs)
    }
}

impl Index<usize> for Cartesian3D {
    type Output = Scalar;

    fn index(&self, index: usize) -> &Scalar {
        &self.0[index]
    }
}

impl Coordinate for Cartesian3D {
    type Vector = NVec3;
    type Cartesian = NPoint<3>;

    const DIMENSION: usize = 3;

    fn to_cartesian(&self) -> NPoint<3> {
        self.0
    }

    fn from_cartesian(point: NPoint<3>) -> Self {
        Self(point)
    }
}

impl CartesianSystem for Cartesian3D {}

/// Polar coordinates (r, theta). Canonical form has r >= 0 and theta in
/// (-pi, pi]; `from_cartesian` always produces canonical form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar(pub NVec2);

impl Polar {
    pub fn new(r: Scalar, theta: Scalar) -> Self {
        Self(NVec2::new(r, theta))
    }
}

impl Add<NVec2> for Polar {
    type Output = Self;

    // Componentwise in (r, theta) storage; not Euclidean motion.
    fn add(self, rhs: NVec2) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub<NVec2> for Polar {
    type Output = Self;

    fn sub(self, rhs: NVec2) -> Self {
        Self(self.0 - rhs)
    }
}

impl Coordinate for Polar {
    type Vector = NVec2;
    type Cartesian = NPoint<2>;

    const DIMENSION: usize = 2;

    fn to_cartesian(&self) -> NPoint<2> {
        let (r, theta) = (self.0[0], self.0[1]);
        NPoint::<2>::new(r * theta.cos(), r * theta.sin())
    }

    fn from_cartesian(point: NPoint<2>) -> Self {
        let r = point.coords.norm();
        let theta = point[1].atan2(point[0]);
        Self::new(r, theta)
    }
}

/// Spherical coordinates (r, theta, phi), physics convention: theta is the
/// polar angle from +z, phi the azimuth in the xy-plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical(pub NVec3);

impl Spherical {
    pub fn new(r: Scalar, theta: Scalar, phi: Scalar) -> Self {
        Self(NVec3::new(r, theta, phi))
    }
}

impl Add<NVec3> for Spherical {
    type Output = Self;

    // Componentwise in (r, theta, phi) storage; not Euclidean motion.
    fn add(self, rhs: NVec3) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub<NVec3> for Spherical {
    type Output = Self;

    fn sub(self, rhs: NVec3) -> Self {
        Self(self.0 - rhs)
    }
}

impl Coordinate for Spherical {
    type Vector = NVec3;
    type Cartesian = NPoint<3>;

    const DIMENSION: usize = 3;

    fn to_cartesian(&self) -> NPoint<3> {
        let (r, theta, phi) = (self.0[0], self.0[1], self.0[2]);
        NPoint::<3>::new(
            r * theta.sin() * phi.cos(),
            r * theta.sin() * phi.sin(),
            r * theta.cos(),
        )
    }

    fn from_cartesian(point: NPoint<3>) -> Self {
        let r = point.coords.norm();
        if r == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        let theta = (point[2] / r).acos();
        let phi = point[1].atan2(point[0]);
        Self::new(r, theta, phi)
    }
}
