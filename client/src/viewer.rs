//! Pan/zoom/rotate state of the record image viewer.

const ZOOM_FACTOR: f64 = 1.5;
const MAX_SCALE: f64 = 26.0;
const MIN_SCALE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn clockwise(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    pub fn counter_clockwise(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg270,
            Rotation::Deg90 => Rotation::Deg0,
            Rotation::Deg180 => Rotation::Deg90,
            Rotation::Deg270 => Rotation::Deg180,
        }
    }
}

/// Translation change for a pointer move of `(dx, dy)` screen pixels.
///
/// The translation is applied after rotation and scaling, so the screen delta
/// has to be rotated back into image space and divided by the scale.
pub fn drag_delta(rotation: Rotation, dx: f64, dy: f64, scale: f64) -> (f64, f64) {
    let (dx, dy) = (dx / scale, dy / scale);
    match rotation {
        Rotation::Deg0 => (dx, dy),
        Rotation::Deg90 => (dy, -dx),
        Rotation::Deg180 => (-dx, -dy),
        Rotation::Deg270 => (-dy, dx),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageTransform {
    pub scale: f64,
    pub rotation: Rotation,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: Rotation::Deg0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl ImageTransform {
    /// Returns false when already at the maximum zoom.
    pub fn zoom_in(&mut self) -> bool {
        if self.scale >= MAX_SCALE {
            return false;
        }
        self.scale *= ZOOM_FACTOR;
        true
    }

    /// Returns false when already at the minimum zoom.
    pub fn zoom_out(&mut self) -> bool {
        if self.scale <= MIN_SCALE {
            return false;
        }
        self.scale /= ZOOM_FACTOR;
        true
    }

    pub fn rotate_left(&mut self) {
        self.rotation = self.rotation.counter_clockwise();
    }

    pub fn rotate_right(&mut self) {
        self.rotation = self.rotation.clockwise();
    }

    /// Pointer moved by `(dx, dy)` screen pixels while dragging.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        let (tx, ty) = drag_delta(self.rotation, dx, dy, self.scale);
        self.translate_x += tx;
        self.translate_y += ty;
    }

    pub fn css(&self) -> String {
        format!(
            "scale({}) rotate({}deg) translate({}px, {}px)",
            self.scale,
            self.rotation.degrees(),
            self.translate_x,
            self.translate_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_delta_per_rotation() {
        assert_eq!(drag_delta(Rotation::Deg0, 4.0, -2.0, 2.0), (2.0, -1.0));
        assert_eq!(drag_delta(Rotation::Deg90, 4.0, -2.0, 2.0), (-1.0, -2.0));
        assert_eq!(drag_delta(Rotation::Deg180, 4.0, -2.0, 2.0), (-2.0, 1.0));
        assert_eq!(drag_delta(Rotation::Deg270, 4.0, -2.0, 2.0), (1.0, 2.0));
    }

    #[test]
    fn test_rotation_wraps() {
        let mut transform = ImageTransform::default();
        transform.rotate_left();
        assert_eq!(transform.rotation, Rotation::Deg270);
        for _ in 0..4 {
            transform.rotate_right();
        }
        assert_eq!(transform.rotation, Rotation::Deg270);
        transform.rotate_right();
        assert_eq!(transform.rotation.degrees(), 0);
    }

    #[test]
    fn test_zoom_bounds() {
        let mut transform = ImageTransform::default();
        let mut steps = 0;
        while transform.zoom_in() {
            steps += 1;
        }
        assert_eq!(steps, 9);
        assert!(transform.scale >= MAX_SCALE);
        assert!(!transform.zoom_in());

        let mut transform = ImageTransform::default();
        while transform.zoom_out() {}
        assert!(transform.scale <= MIN_SCALE);
        assert!(transform.scale > MIN_SCALE / ZOOM_FACTOR);
    }

    #[test]
    fn test_drag_and_css() {
        let mut transform = ImageTransform::default();
        transform.rotate_right();
        transform.drag(10.0, 0.0);
        assert_eq!(transform.css(), "scale(1) rotate(90deg) translate(0px, -10px)");
    }
}
