//! Quaternions.

use crate::vector::{UnitVector3, Vector3};
use bytemuck::{Pod, Zeroable};
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuaternionError>;

/// A quaternion `w + xi + yj + zk` with `f64` components.
///
/// Multiplication of two quaternions (`*`) is the Hamilton product. It is
/// associative, so `(a * b) * c == a * (b * c)`, but not commutative: `a * b`
/// and `b * a` generally differ. Addition and subtraction of two quaternions,
/// as well as all operations with an `f64` scalar, act on each of the four
/// components independently.
///
/// Dividing by a quaternion can fail, so it is exposed as
/// [`Quaternion::checked_div`] rather than as an operator.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, PartialEq, Zeroable, Pod)]
pub struct Quaternion {
    inner: nalgebra::Quaternion<f64>,
}

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuaternionError {
    #[error("Cannot {operation} a quaternion with zero norm")]
    ZeroNorm { operation: &'static str },
}

/// Below this value of `sin(θ)`, slerp is numerically unstable and linear
/// interpolation is used instead.
const MIN_SLERP_SIN_ANGLE: f64 = 1e-6;

impl Quaternion {
    /// Creates a quaternion with the given real part `w` and imaginary parts
    /// `x`, `y` and `z`.
    #[inline]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self::wrap(nalgebra::Quaternion::from_vector(nalgebra::Vector4::new(
            x, y, z, w,
        )))
    }

    #[inline]
    pub fn from_parts(real: f64, imag: Vector3) -> Self {
        Self::wrap(nalgebra::Quaternion::from_parts(real, *imag._inner()))
    }

    /// Creates a pure quaternion (zero real part) with the given imaginary
    /// part.
    #[inline]
    pub fn from_imag(imag: Vector3) -> Self {
        Self::from_parts(0.0, imag)
    }

    /// The multiplicative identity `1 + 0i + 0j + 0k`.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Creates the unit quaternion `(cos(θ/2), sin(θ/2) * axis)` representing
    /// a rotation by `angle` (θ, in radians) about `axis`.
    #[inline]
    pub fn from_axis_angle(axis: &UnitVector3, angle: f64) -> Self {
        let (sin_half_angle, cos_half_angle) = (0.5 * angle).sin_cos();
        Self::from_parts(cos_half_angle, axis.as_vector() * sin_half_angle)
    }

    /// The real part.
    #[inline]
    pub fn w(&self) -> f64 {
        self.inner.w
    }

    /// The first imaginary part.
    #[inline]
    pub fn x(&self) -> f64 {
        self.inner.i
    }

    /// The second imaginary part.
    #[inline]
    pub fn y(&self) -> f64 {
        self.inner.j
    }

    /// The third imaginary part.
    #[inline]
    pub fn z(&self) -> f64 {
        self.inner.k
    }

    #[inline]
    pub fn real(&self) -> f64 {
        self.w()
    }

    #[inline]
    pub fn imag(&self) -> Vector3 {
        Vector3::wrap(self.inner.imag())
    }

    /// The axis `(x, y, z)` of the quaternion. This is the imaginary part,
    /// and is not normalized.
    #[inline]
    pub fn axis(&self) -> Vector3 {
        self.imag()
    }

    /// Returns a copy of this quaternion with the real part replaced.
    #[inline]
    pub fn with_real(&self, real: f64) -> Self {
        Self::from_parts(real, self.imag())
    }

    /// Returns a copy of this quaternion with the imaginary part replaced.
    #[inline]
    pub fn with_imag(&self, imag: Vector3) -> Self {
        Self::from_parts(self.real(), imag)
    }

    #[inline]
    pub fn with_w(&self, w: f64) -> Self {
        Self::new(w, self.x(), self.y(), self.z())
    }

    #[inline]
    pub fn with_x(&self, x: f64) -> Self {
        Self::new(self.w(), x, self.y(), self.z())
    }

    #[inline]
    pub fn with_y(&self, y: f64) -> Self {
        Self::new(self.w(), self.x(), y, self.z())
    }

    #[inline]
    pub fn with_z(&self, z: f64) -> Self {
        Self::new(self.w(), self.x(), self.y(), z)
    }

    /// Computes the norm `sqrt(w² + x² + y² + z²)`.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.inner.norm()
    }

    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.inner.norm_squared()
    }

    /// Whether the norm of the quaternion differs from one by at most
    /// `epsilon`.
    #[inline]
    pub fn is_unit(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() <= epsilon
    }

    /// Computes the dot product of the two quaternions viewed as 4D vectors.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.inner.dot(&other.inner)
    }

    /// Returns the conjugate `w - xi - yj - zk`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::wrap(self.inner.conjugate())
    }

    /// Computes the multiplicative inverse `conjugate / norm²`.
    ///
    /// # Errors
    /// Returns [`QuaternionError::ZeroNorm`] if the quaternion has zero norm.
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_for("invert")
    }

    /// Computes the quaternion divided by its norm.
    ///
    /// # Errors
    /// Returns [`QuaternionError::ZeroNorm`] if the quaternion has zero norm.
    pub fn normalized(&self) -> Result<Self> {
        self.normalized_for("normalize")
    }

    /// Computes `self * divisor⁻¹`.
    ///
    /// # Errors
    /// Returns [`QuaternionError::ZeroNorm`] if `divisor` has zero norm.
    pub fn checked_div(&self, divisor: &Self) -> Result<Self> {
        Ok(self * divisor.inverse_for("divide by")?)
    }

    /// Computes the angle, in radians, of the rotation taking this quaternion
    /// to `other`. The angle is that of the relative rotation
    /// `other * self⁻¹` and lies in `[0, π]`, so the shorter of the two
    /// rotations between the orientations is measured. Neither quaternion has
    /// to be normalized.
    ///
    /// # Errors
    /// Returns [`QuaternionError::ZeroNorm`] if either quaternion has zero
    /// norm.
    pub fn angle_with(&self, other: &Self) -> Result<f64> {
        let from = self.scaled_to_unit_max("measure the angle from")?;
        let to = other.scaled_to_unit_max("measure the angle to")?;
        Ok((to * from.conjugate()).half_turn_angle())
    }

    /// Computes the angle, in radians, of the rotation represented by the
    /// normalized version of this quaternion. The angle lies in `[0, π]`.
    ///
    /// # Errors
    /// Returns [`QuaternionError::ZeroNorm`] if the quaternion has zero norm.
    pub fn rotation_angle(&self) -> Result<f64> {
        Ok(self
            .scaled_to_unit_max("measure the rotation angle of")?
            .half_turn_angle())
    }

    /// Spherically interpolates from this quaternion to `other` by the
    /// fraction `t`, which is clamped to `[0, 1]`.
    ///
    /// Computes `(sin((1 - t)θ) q₀ + sin(tθ) q₁) / sin(θ)`, where θ is the
    /// angle between the quaternions as 4D vectors. If that angle exceeds 90
    /// degrees, `other` is negated first so that the interpolation follows the
    /// shortest arc. In that case the result for `t = 1` is `-other`, which
    /// represents the same rotation as `other`. Nearly parallel quaternions
    /// are interpolated linearly.
    ///
    /// # Errors
    /// Returns [`QuaternionError::ZeroNorm`] if either quaternion has zero
    /// norm.
    pub fn slerp(&self, other: &Self, t: f64) -> Result<Self> {
        let t = t.clamp(0.0, 1.0);

        let start_direction = self.scaled_to_unit_max("interpolate from")?;
        let end_direction = other.scaled_to_unit_max("interpolate to")?;

        let mut cos_angle = start_direction.dot(&end_direction)
            / (start_direction.norm() * end_direction.norm());
        let end = if cos_angle < 0.0 {
            cos_angle = -cos_angle;
            -other
        } else {
            *other
        };
        let cos_angle = cos_angle.min(1.0);
        let sin_angle = (1.0 - cos_angle * cos_angle).sqrt();

        if sin_angle < MIN_SLERP_SIN_ANGLE {
            lug_log::trace!("Quaternions are nearly parallel, interpolating linearly");
            return Ok(self * (1.0 - t) + end * t);
        }

        let angle = sin_angle.atan2(cos_angle);

        Ok((self * ((1.0 - t) * angle).sin() + end * (t * angle).sin()) / sin_angle)
    }

    /// Linearly interpolates from this quaternion to `other` along the
    /// shortest arc by the fraction `t` (clamped to `[0, 1]`) and normalizes
    /// the result.
    ///
    /// # Errors
    /// Returns [`QuaternionError::ZeroNorm`] if the interpolated quaternion
    /// has zero norm.
    pub fn nlerp(&self, other: &Self, t: f64) -> Result<Self> {
        let t = t.clamp(0.0, 1.0);
        let end = if self.dot(other) < 0.0 { -other } else { *other };
        (self * (1.0 - t) + end * t).normalized_for("normalize the interpolation of")
    }

    /// Computes the sandwich product `self * quaternion * conjugate(self)`.
    /// For a unit quaternion, this rotates the imaginary part of `quaternion`.
    #[inline]
    pub fn sandwich(&self, quaternion: &Self) -> Self {
        self * quaternion * self.conjugate()
    }

    #[inline]
    pub(crate) const fn wrap(inner: nalgebra::Quaternion<f64>) -> Self {
        Self { inner }
    }

    /// Returns the largest absolute component, failing if every component is
    /// zero.
    fn max_abs_component(&self, operation: &'static str) -> Result<f64> {
        let max_abs_component = self.inner.coords.amax();
        if max_abs_component == 0.0 {
            Err(QuaternionError::ZeroNorm { operation })
        } else {
            Ok(max_abs_component)
        }
    }

    /// Divides by the largest absolute component, so that squaring the
    /// components of the result can neither overflow nor underflow to zero.
    fn scaled_to_unit_max(&self, operation: &'static str) -> Result<Self> {
        Ok(self / self.max_abs_component(operation)?)
    }

    fn inverse_for(&self, operation: &'static str) -> Result<Self> {
        let scale = self.max_abs_component(operation)?;
        let scaled = self / scale;
        // conj(q) / |q|² = conj(q / s) / (|q / s|² s)
        Ok(scaled.conjugate() / (scaled.norm_squared() * scale))
    }

    fn normalized_for(&self, operation: &'static str) -> Result<Self> {
        let scaled = self.scaled_to_unit_max(operation)?;
        Ok(scaled / scaled.norm())
    }

    /// Equals `2 acos(|w| / |q|)` for a nonzero quaternion `q`.
    fn half_turn_angle(&self) -> f64 {
        2.0 * self.imag().norm().atan2(self.w().abs())
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::zeros()
    }
}

impl From<[f64; 4]> for Quaternion {
    /// Creates a quaternion from components in `[w, x, y, z]` order.
    #[inline]
    fn from([w, x, y, z]: [f64; 4]) -> Self {
        Self::new(w, x, y, z)
    }
}

impl From<Quaternion> for [f64; 4] {
    #[inline]
    fn from(quaternion: Quaternion) -> Self {
        [quaternion.w(), quaternion.x(), quaternion.y(), quaternion.z()]
    }
}

impl_binop!(Add, add, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion::wrap(a.inner + b.inner)
});

impl_binop!(Sub, sub, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion::wrap(a.inner - b.inner)
});

// Hamilton product:
// w = w₀w₁ - x₀x₁ - y₀y₁ - z₀z₁
// x = w₀x₁ + x₀w₁ + y₀z₁ - z₀y₁
// y = w₀y₁ - x₀z₁ + y₀w₁ + z₀x₁
// z = w₀z₁ + x₀y₁ - y₀x₁ + z₀w₁
impl_binop!(Mul, mul, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion::wrap(a.inner * b.inner)
});

impl_binop!(Add, add, Quaternion, f64, Quaternion, |a, b| {
    Quaternion::wrap(nalgebra::Quaternion::from_vector(
        a.inner.coords.add_scalar(*b),
    ))
});

impl_binop!(Sub, sub, Quaternion, f64, Quaternion, |a, b| {
    Quaternion::wrap(nalgebra::Quaternion::from_vector(
        a.inner.coords.add_scalar(-*b),
    ))
});

impl_binop!(Mul, mul, Quaternion, f64, Quaternion, |a, b| {
    Quaternion::wrap(a.inner * *b)
});

impl_binop!(Mul, mul, f64, Quaternion, Quaternion, |a, b| { b * *a });

impl_binop!(Div, div, Quaternion, f64, Quaternion, |a, b| {
    Quaternion::wrap(a.inner / *b)
});

impl_binop_assign!(AddAssign, add_assign, Quaternion, Quaternion, |a, b| {
    a.inner += b.inner;
});

impl_binop_assign!(SubAssign, sub_assign, Quaternion, Quaternion, |a, b| {
    a.inner -= b.inner;
});

impl_binop_assign!(MulAssign, mul_assign, Quaternion, Quaternion, |a, b| {
    a.inner *= b.inner;
});

impl_binop_assign!(MulAssign, mul_assign, Quaternion, f64, |a, b| {
    a.inner *= *b;
});

impl_binop_assign!(DivAssign, div_assign, Quaternion, f64, |a, b| {
    a.inner /= *b;
});

impl_unary_op!(Neg, neg, Quaternion, Quaternion, |val| {
    Quaternion::wrap(-val.inner)
});

// nalgebra's own comparison treats `q` and `-q` as equal, which is only
// appropriate for rotations
impl_abs_diff_eq!(Quaternion, |a, b, epsilon| {
    ::approx::AbsDiffEq::abs_diff_eq(&a.inner.coords, &b.inner.coords, epsilon)
});

impl_relative_eq!(Quaternion, |a, b, epsilon, max_relative| {
    ::approx::RelativeEq::relative_eq(
        &a.inner.coords,
        &b.inner.coords,
        epsilon,
        max_relative,
    )
});

impl fmt::Debug for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quaternion")
            .field("w", &self.w())
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .finish()
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {}i + {}j + {}k",
            self.w(),
            self.x(),
            self.y(),
            self.z()
        )
    }
}

/// Rotates the given point by `angle` radians about `axis`, using the
/// sandwich product `q * p * conjugate(q)` with `q = (cos(θ/2), sin(θ/2) *
/// axis)` and the point embedded as the pure quaternion `p`.
pub fn rotate_point(point: &Vector3, angle: f64, axis: &UnitVector3) -> Vector3 {
    rotate_point_with(point, &Quaternion::from_axis_angle(axis, angle))
}

/// Applies the given rotation quaternion to the point through the sandwich
/// product `rotation * p * conjugate(rotation)`. The rotation is used as is,
/// so a non-unit quaternion also scales the point by its squared norm.
pub fn rotate_point_with(point: &Vector3, rotation: &Quaternion) -> Vector3 {
    rotation.sandwich(&Quaternion::from_imag(*point)).imag()
}

/// Reflects the given point through the plane through the origin with the
/// given normal. The normal is normalized and embedded as the pure
/// quaternion `n`, and the result is the imaginary part of `n * p * n`.
///
/// # Errors
/// Returns [`QuaternionError::ZeroNorm`] if the normal is the zero vector.
pub fn reflect_point(point: &Vector3, normal: &Vector3) -> Result<Vector3> {
    let normal = UnitVector3::normalized_from_if_above(*normal, 0.0).ok_or(
        QuaternionError::ZeroNorm {
            operation: "reflect through",
        },
    )?;
    let n = Quaternion::from_imag(*normal.as_vector());
    Ok((n * Quaternion::from_imag(*point) * n).imag())
}

/// Reflects the given point through the plane represented by the given
/// quaternion. The real part of the quaternion is ignored, and the imaginary
/// part is used as the plane normal as in [`reflect_point`].
///
/// # Errors
/// Returns [`QuaternionError::ZeroNorm`] if the imaginary part of `plane` is
/// zero.
pub fn reflect_point_in_plane(point: &Vector3, plane: &Quaternion) -> Result<Vector3> {
    reflect_point(point, &plane.imag())
}
