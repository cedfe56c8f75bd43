//! Geometry primitives for pointer-relative tilt computation.

/// An on-screen rectangle used as the reference frame for pointer math.
///
/// For a tilt surface this is the cached bounding box: it is captured once
/// when the pointer enters and reused for every move during that hover
/// interaction (layout is assumed stable while hovering).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Center point in the same coordinate space as the rect itself.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// A rect with zero (or negative) extent cannot anchor a tilt update;
    /// normalizing against it would produce NaN or Infinity.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Padding for the card style bundle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::all(0.0)
    }
}

/// One absolute pointer position, at most one per animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(rect.contains(50.0, 40.0));
        assert!(rect.contains(10.0, 20.0));
        assert!(!rect.contains(110.0, 70.0));
        assert!(!rect.contains(5.0, 40.0));
        assert!(!rect.contains(50.0, 100.0));
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(rect.center(), (100.0, 50.0));

        let offset = Rect::new(10.0, 20.0, 100.0, 60.0);
        assert_eq!(offset.center(), (60.0, 50.0));
    }

    #[test]
    fn test_rect_is_empty() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(0.0, 0.0, 0.0, 100.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 100.0, -1.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_padding_all() {
        let padding = Padding::all(30.0);
        assert_eq!(padding.top, 30.0);
        assert_eq!(padding.right, 30.0);
        assert_eq!(padding.bottom, 30.0);
        assert_eq!(padding.left, 30.0);
    }

    #[test]
    fn test_padding_symmetric_sums() {
        let padding = Padding::symmetric(15.0, 10.0);
        assert_eq!(padding.horizontal(), 30.0);
        assert_eq!(padding.vertical(), 20.0);
    }
}
