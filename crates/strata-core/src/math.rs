//! Vector, quaternion and pose primitives for source positioning.
//!
//! Scene coordinates follow the usual graphics convention: x right, y up,
//! -z forward. Panning directions use x forward, y left, z up, so azimuth is
//! 0 straight ahead and 90 to the left, and elevation is positive upward.

use core::ops::{Add, Mul, Neg, Sub};

/// Below this magnitude a vector has no usable direction.
const DIRECTION_EPSILON: f64 = 1e-9;

/// 3D vector in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
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
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy, or `None` for a (near) zero vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len < DIRECTION_EPSILON || !len.is_finite() {
            None
        } else {
            Some(self * (1.0 / len))
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Unit quaternion `w + xi + yj + zk` describing an orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `angle` radians around `axis` (right-hand rule).
    ///
    /// A zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        match axis.normalized() {
            Some(axis) => {
                let (s, c) = (angle * 0.5).sin_cos();
                Self::new(c, axis.x * s, axis.y * s, axis.z * s)
            }
            None => Self::IDENTITY,
        }
    }

    /// Yaw around up, then pitch around right, then roll around forward.
    ///
    /// Angles in radians. Positive yaw turns front toward the left and
    /// positive pitch turns front upward.
    pub fn from_euler(yaw: f64, pitch: f64, roll: f64) -> Self {
        let yaw = Self::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), yaw);
        let pitch = Self::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), pitch);
        let roll = Self::from_axis_angle(Vec3::new(0.0, 0.0, -1.0), roll);
        yaw * pitch * roll
    }

    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn magnitude(self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length copy; a degenerate quaternion becomes the identity.
    pub fn normalized(self) -> Self {
        let mag = self.magnitude();
        if mag < DIRECTION_EPSILON || !mag.is_finite() {
            Self::IDENTITY
        } else {
            let inv = 1.0 / mag;
            Self::new(self.w * inv, self.x * inv, self.y * inv, self.z * inv)
        }
    }

    /// Rotate `v` by this quaternion (`q v q*`).
    #[inline]
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product: `(a * b).rotate(v) == a.rotate(b.rotate(v))`.
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

/// Position and orientation of a source relative to the listener.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    position: Vec3,
    orientation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation: orientation.normalized(),
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Source position relative to the listener.
    #[inline]
    pub fn vec(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn quat(&self) -> Quat {
        self.orientation
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation.normalized();
    }
}

/// Source direction in panning coordinates, in degrees.
///
/// - `azimuth`: -180 to 180, 0 = front, 90 = left, -90 = right
/// - `elevation`: -90 to 90, 0 = ear level, positive = up
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Direction {
    pub azimuth: f32,
    pub elevation: f32,
}

impl Direction {
    pub fn new(azimuth: f32, elevation: f32) -> Self {
        Self { azimuth, elevation }
    }

    /// Direction of a pose's source after applying its orientation.
    ///
    /// A source straight above or below the listener has azimuth 0 and
    /// elevation +/-90. A source coincident with the listener has no direction
    /// and maps to front at ear level.
    pub fn from_pose(pose: &Pose) -> Self {
        let rotated = pose.quat().rotate(pose.vec());
        // Scene (x right, y up, -z forward) to panning (x forward, y left, z up)
        let x = -rotated.z;
        let y = -rotated.x;
        let z = rotated.y;

        let horizontal = (x * x + y * y).sqrt();
        if !(horizontal.is_finite() && z.is_finite()) {
            return Self::default();
        }
        if horizontal < DIRECTION_EPSILON {
            if z.abs() < DIRECTION_EPSILON {
                return Self::default();
            }
            return Self::new(0.0, 90.0_f32.copysign(z as f32));
        }

        let elevation = (z / horizontal).atan().to_degrees();
        let azimuth = y.atan2(x).to_degrees();
        Self::new(azimuth as f32, elevation as f32)
    }

    /// Unit vector in scene coordinates pointing along this direction.
    pub fn to_vector(self) -> Vec3 {
        let az = f64::from(self.azimuth).to_radians();
        let el = f64::from(self.elevation).to_radians();
        let (forward, left, up) = (az.cos() * el.cos(), az.sin() * el.cos(), el.sin());
        Vec3::new(-left, up, -forward)
    }

    /// Pose at `distance` along this direction with identity orientation.
    pub fn to_pose(self, distance: f64) -> Pose {
        Pose::from_position(self.to_vector() * distance)
    }
}
