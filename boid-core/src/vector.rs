/// A 2D vector used for position, velocity and steering
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Unit vector in the same direction. Finite vectors of any size keep
    /// their heading; zero and non-finite input give zero.
    pub fn normalize(&self) -> Self {
        let scale = self.x.abs().max(self.y.abs());
        if !(scale > 0.0 && scale.is_finite()) {
            return Self::zero();
        }
        let v = *self / scale;
        v / v.magnitude()
    }

    /// Like [`Vector2D::normalize`], but infinite components decide the
    /// heading instead of collapsing to zero. NaN components count as zero.
    pub fn direction(&self) -> Self {
        if self.is_finite() {
            return self.normalize();
        }
        let axis = |c: f64| if c.is_infinite() { c.signum() } else { 0.0 };
        Self::new(axis(self.x), axis(self.y)).normalize()
    }

    /// Clamps infinities to `±f64::MAX` and NaN to zero.
    pub fn saturate(&self) -> Self {
        let clamp = |c: f64| if c.is_nan() { 0.0 } else { c.clamp(-f64::MAX, f64::MAX) };
        Self::new(clamp(self.x), clamp(self.y))
    }

    /// Rescales to `max` if longer, keeping direction. Zero stays zero.
    pub fn limit(&self, max: f64) -> Self {
        let mag = self.magnitude();
        if mag > max {
            self.normalize() * max
        } else {
            *self
        }
    }
}

macro_rules! componentwise {
    ($($op:ident::$f:ident, $assign:ident::$af:ident, $sym:tt;)*) => {$(
        impl core::ops::$op for Vector2D {
            type Output = Self;

            fn $f(self, other: Self) -> Self {
                Self::new(self.x $sym other.x, self.y $sym other.y)
            }
        }

        impl core::ops::$assign for Vector2D {
            fn $af(&mut self, other: Self) {
                *self = *self $sym other;
            }
        }
    )*};
}

macro_rules! scalar {
    ($($op:ident::$f:ident, $sym:tt;)*) => {$(
        impl core::ops::$op<f64> for Vector2D {
            type Output = Self;

            fn $f(self, k: f64) -> Self {
                Self::new(self.x $sym k, self.y $sym k)
            }
        }
    )*};
}

componentwise! {
    Add::add, AddAssign::add_assign, +;
    Sub::sub, SubAssign::sub_assign, -;
}

scalar! {
    Mul::mul, *;
    Div::div, /;
}
