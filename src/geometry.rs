use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Screen-space rectangle. Origin is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::new(0.0, 0.0),
        size: Size::new(0.0, 0.0),
    };

    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(Point::new(self.origin.x + dx, self.origin.y + dy), self.size)
    }

    /// Translate so the result lies entirely inside `bounds`, when it fits.
    pub fn clamped_within(&self, bounds: Rect) -> Rect {
        let mut rect = *self;
        if rect.max_x() > bounds.max_x() {
            rect.origin.x = bounds.max_x() - rect.size.width;
        }
        if rect.min_x() < bounds.min_x() {
            rect.origin.x = bounds.min_x();
        }
        if rect.max_y() > bounds.max_y() {
            rect.origin.y = bounds.max_y() - rect.size.height;
        }
        if rect.min_y() < bounds.min_y() {
            rect.origin.y = bounds.min_y();
        }
        rect
    }

    /// Rectangle of `size` centered on this rectangle's center.
    pub fn centered(&self, size: Size) -> Rect {
        let center = self.center();
        Rect::new(
            Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::from_xywh(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(29.9, 29.9)));
        assert!(!rect.contains(Point::new(30.0, 10.0)));
        assert!(!rect.contains(Point::new(10.0, 30.0)));
    }

    #[test]
    fn clamped_within_keeps_size() {
        let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let rect = Rect::from_xywh(90.0, -10.0, 30.0, 30.0);
        let clamped = rect.clamped_within(bounds);
        assert_eq!(clamped, Rect::from_xywh(70.0, 0.0, 30.0, 30.0));
    }
}
