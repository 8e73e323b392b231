//! Minimal linear algebra for widget tracking.
//!
//! Only what the widgets need: 3D vectors, unit quaternions for single-axis
//! rotations, a rigid reference frame and a handful of scalar helpers. All
//! trigonometry goes through `libm` so the crate stays `no_std`.

use core::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Lengths below this are treated as degenerate directions.
pub const DIRECTION_EPSILON: f32 = 1e-5;

/// 3D vector in a right-handed, Y-up frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length(self) -> f32 {
        libm::sqrtf(self.dot(self))
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Unit vector in the same direction, or `None` when the vector is too
    /// short (or not finite) to have a meaningful direction.
    pub fn try_normalize(self) -> Option<Self> {
        let len = self.length();
        if !len.is_finite() || len < DIRECTION_EPSILON {
            return None;
        }
        Some(self * (1.0 / len))
    }

    /// Drops the vertical (spin axis) component.
    #[inline]
    pub fn flatten(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    /// Drops the X component, leaving the YZ plane a hinge swings in.
    #[inline]
    pub fn flatten_x(self) -> Self {
        Self::new(0.0, self.y, self.z)
    }

    /// Linear interpolation, `t` not clamped.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Unit quaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Rotation of `degrees` about `axis`. The axis is normalized here; a
    /// degenerate axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, degrees: f32) -> Self {
        let Some(axis) = axis.try_normalize() else {
            return Self::IDENTITY;
        };
        let half = degrees.to_radians() * 0.5;
        let s = libm::sinf(half);
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: libm::cosf(half),
        }
    }

    pub fn conjugate(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Rotates `v` by this quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }
}

impl Mul for Quat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate(rhs)
    }
}

/// Rigid reference frame (a widget's placement in the world).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Frame {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// World direction expressed in this frame.
    pub fn inverse_transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation.conjugate().rotate(direction)
    }

    /// World point expressed in this frame.
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.inverse_transform_direction(point - self.position)
    }

    /// Local point expressed in world space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation.rotate(point)
    }

    /// Local direction expressed in world space.
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation.rotate(direction)
    }
}

/// Heading of the XZ projection of `direction`, in degrees, measured from +X
/// toward +Z.
#[inline]
pub fn heading_degrees(direction: Vec3) -> f32 {
    libm::atan2f(direction.z, direction.x).to_degrees()
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[inline]
pub fn lerp_unclamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Where `value` sits between `a` and `b`, clamped to 0..1. A degenerate
/// range maps to 0.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// Blend factor for exponential easing at `rate` (1/s) over `dt` seconds.
#[inline]
pub fn exp_blend(rate: f32, dt: f32) -> f32 {
    if dt <= 0.0 || rate <= 0.0 {
        return 0.0;
    }
    1.0 - libm::expf(-rate * dt)
}

/// Critically damped approach of `current` toward `target`.
///
/// `velocity` carries state between ticks and must be kept by the caller.
/// The approach reaches the target in roughly `smooth_time` seconds and never
/// overshoots it.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Clamp overshoot
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }

    output
}

#[cfg(feature = "mint")]
mod mint_interop {
    use super::{Quat, Vec3};

    impl From<mint::Vector3<f32>> for Vec3 {
        fn from(v: mint::Vector3<f32>) -> Self {
            Self::new(v.x, v.y, v.z)
        }
    }

    impl From<Vec3> for mint::Vector3<f32> {
        fn from(v: Vec3) -> Self {
            mint::Vector3 { x: v.x, y: v.y, z: v.z }
        }
    }

    impl From<mint::Quaternion<f32>> for Quat {
        fn from(q: mint::Quaternion<f32>) -> Self {
            Self {
                x: q.v.x,
                y: q.v.y,
                z: q.v.z,
                w: q.s,
            }
        }
    }

    impl From<Quat> for mint::Quaternion<f32> {
        fn from(q: Quat) -> Self {
            mint::Quaternion {
                v: mint::Vector3 { x: q.x, y: q.y, z: q.z },
                s: q.w,
            }
        }
    }
}
