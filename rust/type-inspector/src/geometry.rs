use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// A point in viewport (client) coordinates, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_subtracts_componentwise() {
        let pointer = Point::new(100.0, 100.0);
        let origin = Point::new(32.0, 32.0);

        assert_eq!(pointer - origin, Point::new(68.0, 68.0));
        assert_eq!(Point::new(150.0, 130.0) - Point::new(68.0, 68.0), Point::new(82.0, 62.0));
    }
}
