//! Vectors.

use bytemuck::{Pod, Zeroable};
use std::{
    fmt,
    ops::{Deref, Index},
};

/// A 3-dimensional vector.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, PartialEq, Zeroable, Pod)]
pub struct Vector3 {
    inner: nalgebra::Vector3<f64>,
}

/// A 3-dimensional vector of unit length.
///
/// Dereferences to a [`Vector3`], so all the read-only vector operations are
/// available.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, PartialEq, Zeroable, Pod)]
pub struct UnitVector3 {
    inner: nalgebra::Vector3<f64>,
}

impl Vector3 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self::wrap(nalgebra::Vector3::new(x, y, z))
    }

    /// Creates a new vector with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::same(0.0)
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub const fn same(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// The x-axis unit vector.
    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// The y-axis unit vector.
    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// The z-axis unit vector.
    #[inline]
    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// The x-component.
    #[inline]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    /// The y-component.
    #[inline]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    /// The z-component.
    #[inline]
    pub fn z(&self) -> f64 {
        self.inner.z
    }

    /// Computes the normalized version of the vector. If the vector has zero
    /// length, the result will be non-finite.
    #[inline]
    pub fn normalized(&self) -> Self {
        self / self.norm()
    }

    /// Computes the norm (length) of the vector.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.inner.norm()
    }

    /// Computes the square of the norm of the vector.
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.inner.norm_squared()
    }

    /// Computes the dot product of this vector with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.inner.dot(&other.inner)
    }

    /// Computes the cross product of this vector with another.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::wrap(self.inner.cross(&other.inner))
    }

    /// Returns a vector with the given closure applied to each component.
    #[inline]
    pub fn mapped(&self, f: impl FnMut(f64) -> f64) -> Self {
        Self::wrap(self.inner.map(f))
    }

    #[inline]
    pub(crate) const fn wrap(inner: nalgebra::Vector3<f64>) -> Self {
        Self { inner }
    }

    #[inline]
    pub(crate) fn _inner(&self) -> &nalgebra::Vector3<f64> {
        &self.inner
    }
}

impl Default for Vector3 {
    #[inline]
    fn default() -> Self {
        Self::zeros()
    }
}

impl From<[f64; 3]> for Vector3 {
    #[inline]
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for [f64; 3] {
    #[inline]
    fn from(vector: Vector3) -> Self {
        [vector.x(), vector.y(), vector.z()]
    }
}

impl_binop!(Add, add, Vector3, Vector3, Vector3, |a, b| {
    Vector3::wrap(a.inner + b.inner)
});

impl_binop!(Sub, sub, Vector3, Vector3, Vector3, |a, b| {
    Vector3::wrap(a.inner - b.inner)
});

impl_binop!(Mul, mul, Vector3, f64, Vector3, |a, b| {
    Vector3::wrap(a.inner * *b)
});

impl_binop!(Mul, mul, f64, Vector3, Vector3, |a, b| { b * *a });

impl_binop!(Div, div, Vector3, f64, Vector3, |a, b| {
    Vector3::wrap(a.inner / *b)
});

impl_binop_assign!(AddAssign, add_assign, Vector3, Vector3, |a, b| {
    a.inner += b.inner;
});

impl_binop_assign!(SubAssign, sub_assign, Vector3, Vector3, |a, b| {
    a.inner -= b.inner;
});

impl_binop_assign!(MulAssign, mul_assign, Vector3, f64, |a, b| {
    a.inner *= *b;
});

impl_binop_assign!(DivAssign, div_assign, Vector3, f64, |a, b| {
    a.inner /= *b;
});

impl_unary_op!(Neg, neg, Vector3, Vector3, |val| {
    Vector3::wrap(-val.inner)
});

impl Index<usize> for Vector3 {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.inner[index]
    }
}

impl_abs_diff_eq!(Vector3, |a, b, epsilon| {
    ::approx::AbsDiffEq::abs_diff_eq(&a.inner, &b.inner, epsilon)
});

impl_relative_eq!(Vector3, |a, b, epsilon, max_relative| {
    ::approx::RelativeEq::relative_eq(&a.inner, &b.inner, epsilon, max_relative)
});

impl fmt::Debug for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector3")
            .field("x", &self.inner.x)
            .field("y", &self.inner.y)
            .field("z", &self.inner.z)
            .finish()
    }
}

impl UnitVector3 {
    /// Creates a vector with the given components. The vector is assumed to be
    /// normalized.
    #[inline]
    pub const fn new_unchecked(x: f64, y: f64, z: f64) -> Self {
        Self::wrap(nalgebra::Vector3::new(x, y, z))
    }

    /// Converts the given vector to a unit vector, assuming it is already
    /// normalized.
    #[inline]
    pub const fn unchecked_from(vector: Vector3) -> Self {
        Self::wrap(vector.inner)
    }

    /// The x-axis unit vector.
    #[inline]
    pub const fn unit_x() -> Self {
        Self::new_unchecked(1.0, 0.0, 0.0)
    }

    /// The y-axis unit vector.
    #[inline]
    pub const fn unit_y() -> Self {
        Self::new_unchecked(0.0, 1.0, 0.0)
    }

    /// The z-axis unit vector.
    #[inline]
    pub const fn unit_z() -> Self {
        Self::new_unchecked(0.0, 0.0, 1.0)
    }

    /// Creates a unit vector by normalizing the given vector. If the vector has
    /// zero length, the result will be non-finite.
    #[inline]
    pub fn normalized_from(vector: Vector3) -> Self {
        Self::wrap(vector.inner.normalize())
    }

    /// Creates a unit vector by normalizing the given vector if its norm
    /// exceeds the given threshold. Otherwise, returns [`None`].
    #[inline]
    pub fn normalized_from_if_above(vector: Vector3, min_norm: f64) -> Option<Self> {
        let norm_squared = vector.norm_squared();
        (norm_squared > min_norm.powi(2)).then(|| Self::wrap(vector.inner / norm_squared.sqrt()))
    }

    /// This unit vector as a [`Vector3`].
    #[inline]
    pub fn as_vector(&self) -> &Vector3 {
        self // deref
    }

    #[inline]
    const fn wrap(inner: nalgebra::Vector3<f64>) -> Self {
        Self { inner }
    }
}

impl Deref for UnitVector3 {
    type Target = Vector3;

    #[inline]
    fn deref(&self) -> &Self::Target {
        bytemuck::cast_ref(self)
    }
}

impl_unary_op!(Neg, neg, UnitVector3, UnitVector3, |val| {
    UnitVector3::wrap(-val.inner)
});

impl_abs_diff_eq!(UnitVector3, |a, b, epsilon| {
    ::approx::AbsDiffEq::abs_diff_eq(&a.inner, &b.inner, epsilon)
});

impl_relative_eq!(UnitVector3, |a, b, epsilon, max_relative| {
    ::approx::RelativeEq::relative_eq(&a.inner, &b.inner, epsilon, max_relative)
});

impl fmt::Debug for UnitVector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitVector3")
            .field("x", &self.inner.x)
            .field("y", &self.inner.y)
            .field("z", &self.inner.z)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn computing_vector3_norm_works() {
        let v = Vector3::new(1.0, 2.0, 2.0);
        assert_abs_diff_eq!(v.norm(), 3.0, epsilon = EPSILON);
        assert_abs_diff_eq!(v.norm_squared(), 9.0, epsilon = EPSILON);
    }

    #[test]
    fn normalizing_vector3_gives_unit_vector() {
        let normalized = Vector3::new(0.0, 3.0, 4.0).normalized();
        assert_abs_diff_eq!(normalized.norm(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(normalized, Vector3::new(0.0, 0.6, 0.8), epsilon = EPSILON);
    }

    #[test]
    fn normalizing_zero_vector3_gives_nan() {
        let normalized = Vector3::zeros().normalized();
        assert!(normalized.x().is_nan());
    }

    #[test]
    fn vector3_dot_and_cross_products_work() {
        let x = Vector3::unit_x();
        let y = Vector3::unit_y();
        assert_eq!(x.dot(&y), 0.0);
        assert_eq!(x.cross(&y), Vector3::unit_z());
        assert_eq!(y.cross(&x), -Vector3::unit_z());
        assert_eq!(Vector3::new(1.0, 2.0, 3.0).dot(&Vector3::same(2.0)), 12.0);
    }

    #[test]
    fn vector3_arithmetic_operations_work() {
        let v1 = Vector3::new(1.0, 2.0, 3.0);
        let v2 = Vector3::new(4.0, 5.0, 6.0);

        assert_eq!(&v1 + &v2, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(&v1 - &v2, Vector3::same(-3.0));
        assert_eq!(&v1 * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(3.0 * &v1, Vector3::new(3.0, 6.0, 9.0));
        assert_eq!(&v1 / 2.0, Vector3::new(0.5, 1.0, 1.5));
        assert_eq!(-&v1, Vector3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn vector3_compound_assignment_works() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        v += Vector3::same(1.0);
        assert_eq!(v, Vector3::new(2.0, 3.0, 4.0));
        v -= Vector3::unit_x();
        assert_eq!(v, Vector3::new(1.0, 3.0, 4.0));
        v *= 2.0;
        assert_eq!(v, Vector3::new(2.0, 6.0, 8.0));
        v /= 4.0;
        assert_eq!(v, Vector3::new(0.5, 1.5, 2.0));
    }

    #[test]
    fn mapping_vector3_components_works() {
        let v = Vector3::new(1.0, -2.0, 3.0);
        assert_eq!(v.mapped(f64::abs), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn vector3_indexing_and_array_conversion_work() {
        let v = Vector3::from([7.0, 8.0, 9.0]);
        assert_eq!(v[0], 7.0);
        assert_eq!(v[1], 8.0);
        assert_eq!(v[2], 9.0);
        assert_eq!(<[f64; 3]>::from(v), [7.0, 8.0, 9.0]);
    }

    #[test]
    #[should_panic]
    fn indexing_vector3_out_of_bounds_panics() {
        let v = Vector3::zeros();
        let _ = v[3];
    }

    #[test]
    fn unit_vector3_normalized_from_works() {
        let unit = UnitVector3::normalized_from(Vector3::new(0.0, 0.0, 5.0));
        assert_abs_diff_eq!(unit, UnitVector3::unit_z(), epsilon = EPSILON);
    }

    #[test]
    fn unit_vector3_normalized_from_if_above_rejects_short_vectors() {
        assert!(UnitVector3::normalized_from_if_above(Vector3::zeros(), 0.0).is_none());
        assert!(UnitVector3::normalized_from_if_above(Vector3::same(0.1), 1.0).is_none());

        let unit = UnitVector3::normalized_from_if_above(Vector3::new(3.0, 4.0, 0.0), 1.0).unwrap();
        assert_abs_diff_eq!(unit.x(), 0.6, epsilon = EPSILON);
        assert_abs_diff_eq!(unit.y(), 0.8, epsilon = EPSILON);
        assert_abs_diff_eq!(unit.norm(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn unit_vector3_derefs_to_vector3() {
        let unit = UnitVector3::unit_y();
        assert_eq!(*unit.as_vector(), Vector3::unit_y());
        assert_eq!(-unit, UnitVector3::new_unchecked(0.0, -1.0, 0.0));
    }
}
