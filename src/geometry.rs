//! Small 2-D helpers shared by gestures, entities and collision.

/// A point in screen space (pixels, y-down) or in normalized landmark space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        distance(self, other)
    }

    /// Move a fraction `amt` of the way toward `target`.
    pub fn lerp(self, target: Point, amt: f32) -> Point {
        Point {
            x: lerp(self.x, target.x, amt),
            y: lerp(self.y, target.y, amt),
        }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Map a normalized `[0, 1]` coordinate pair to pixels.
    pub fn to_screen(&self, normalized: Point) -> Point {
        Point {
            x: normalized.x * self.width,
            y: normalized.y * self.height,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

pub fn distance(a: Point, b: Point) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

pub fn lerp(start: f32, end: f32, amt: f32) -> f32 {
    (1.0 - amt) * start + amt * end
}
