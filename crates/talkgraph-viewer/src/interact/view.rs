use bevy::prelude::{Resource, Vec2};

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 4.0;

/// Pan/zoom mapping from simulation coordinates (y up, origin at the layout
/// center) to screen coordinates (y down, origin top-left). Owned by the
/// interaction controller; the renderer only ever reads it. Never mutates
/// node positions.
#[derive(Debug, Clone, Copy, PartialEq, Resource)]
pub struct ViewTransform {
    pub scale: f32,
    pub translate: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn sim_to_screen(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x * self.scale + self.translate.x,
            -p.y * self.scale + self.translate.y,
        )
    }

    pub fn screen_to_sim(&self, s: Vec2) -> Vec2 {
        Vec2::new(
            (s.x - self.translate.x) / self.scale,
            -(s.y - self.translate.y) / self.scale,
        )
    }

    pub fn pan_by(&mut self, screen_delta: Vec2) {
        self.translate += screen_delta;
    }

    /// Multiplies the scale, clamped to [MIN_ZOOM, MAX_ZOOM], keeping the
    /// simulation point under `cursor` fixed on screen.
    pub fn zoom_about(&mut self, cursor: Vec2, factor: f32) {
        let next = (self.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let applied = next / self.scale;
        self.translate = cursor + (self.translate - cursor) * applied;
        self.scale = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_sim_round_trip() {
        let view = ViewTransform {
            scale: 1.7,
            translate: Vec2::new(320.0, 240.0),
        };
        let p = Vec2::new(-42.5, 13.0);
        let back = view.screen_to_sim(view.sim_to_screen(p));
        assert!(back.distance(p) < 1e-3);
    }

    #[test]
    fn zoom_clamps_to_bounds() {
        let mut view = ViewTransform::default();
        view.zoom_about(Vec2::ZERO, 100.0);
        assert_eq!(view.scale, MAX_ZOOM);
        view.zoom_about(Vec2::ZERO, 1e-6);
        assert_eq!(view.scale, MIN_ZOOM);
    }

    #[test]
    fn zoom_keeps_cursor_point_fixed() {
        let mut view = ViewTransform {
            scale: 1.0,
            translate: Vec2::new(400.0, 300.0),
        };
        let cursor = Vec2::new(150.0, 220.0);
        let anchor = view.screen_to_sim(cursor);

        view.zoom_about(cursor, 2.0);
        assert!(view.sim_to_screen(anchor).distance(cursor) < 1e-3);
    }

    #[test]
    fn pan_shifts_translate_only() {
        let mut view = ViewTransform::default();
        view.pan_by(Vec2::new(10.0, -4.0));
        assert_eq!(view.translate, Vec2::new(10.0, -4.0));
        assert_eq!(view.scale, 1.0);
    }
}
