//! Scalar and vector helpers shared by the timing engine.

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp `x` to `[lo, hi]`.
pub fn clip(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Map `alpha` in `[0, 1]` over the integer range `[start, end)` to an
/// `(index, residue)` pair.
///
/// The index is clamped to `[start, end - 1]` so `alpha = 1.0` resolves to the
/// last cell with residue `1.0` rather than stepping past the end. This is the
/// discretizing rule sequential groups use to pick the active child.
pub fn integer_interpolate(start: i64, end: i64, alpha: f64) -> (i64, f64) {
    let scaled = start as f64 + alpha * (end - start) as f64;
    let index = (scaled.floor() as i64).clamp(start, end - 1);
    (index, scaled - index as f64)
}

/// Minimal 2-D vector used by the spatial entity capability.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}
