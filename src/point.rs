use crate::error::Error;
use ordered_float::NotNan;
use std::ops::Sub;

/// A 2-D point in normalized image coordinates, guaranteed to be finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Result<Self, Error> {
        let x = NotNan::new(x).map_err(|e| Error::ConstructNotNan(e, x))?;
        let y = NotNan::new(y).map_err(|e| Error::ConstructNotNan(e, y))?;
        if !(x.is_finite() && y.is_finite()) {
            return Err(Error::NonFiniteCoordinate(x.into_inner(), y.into_inner()));
        }
        Ok(Self {
            x: x.into_inner(),
            y: y.into_inner(),
        })
    }

    /// Direction of the vector from the origin to this point, in radians.
    #[inline]
    pub(crate) fn heading(self) -> f64 {
        f64::from(self.y).atan2(f64::from(self.x))
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.y
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
