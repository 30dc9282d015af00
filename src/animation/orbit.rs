use glam::Vec3;

/// Circular path on the XZ plane around a fixed center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub center: Vec3,
    pub radius: f32,
    pub angle: f32,
    pub speed: f32,
    pub height: f32,
}

impl Orbit {
    pub fn new(center: Vec3, radius: f32, angle: f32, speed: f32, height: f32) -> Self {
        Self {
            center,
            radius,
            angle,
            speed,
            height,
        }
    }

    /// Orbit that passes through `position`, keeping its height
    pub fn around(center: Vec3, position: Vec3, speed: f32) -> Self {
        let offset = position - center;
        Self {
            center,
            radius: (offset.x * offset.x + offset.z * offset.z).sqrt(),
            angle: offset.z.atan2(offset.x),
            speed,
            height: offset.y,
        }
    }

    /// Move `steps` increments of `speed` along the circle (negative goes back)
    pub fn advance(&mut self, steps: f32) -> Vec3 {
        self.angle += steps * self.speed;
        self.position()
    }

    pub fn position(&self) -> Vec3 {
        self.center
            + Vec3::new(
                self.radius * self.angle.cos(),
                self.height,
                self.radius * self.angle.sin(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn around_reproduces_start_position() {
        let start = Vec3::new(-2.0, 2.0, -2.0);
        let orbit = Orbit::around(Vec3::ZERO, start, 1.0);

        assert_relative_eq!(orbit.radius, 8.0f32.sqrt());
        let p = orbit.position();
        assert_relative_eq!(p.x, start.x, epsilon = 1e-5);
        assert_relative_eq!(p.y, start.y, epsilon = 1e-5);
        assert_relative_eq!(p.z, start.z, epsilon = 1e-5);
    }

    #[test]
    fn advance_keeps_radius_and_height() {
        let mut orbit = Orbit::new(Vec3::new(0.0, 20.0, 0.0), 100.0, 0.0, 0.01, 80.0);

        for _ in 0..250 {
            let p = orbit.advance(1.0);
            let flat = Vec3::new(p.x, 0.0, p.z).length();
            assert_relative_eq!(flat, 100.0, epsilon = 1e-3);
            assert_relative_eq!(p.y, 100.0);
        }
        assert_relative_eq!(orbit.angle, 2.5, epsilon = 1e-4);
    }

    #[test]
    fn advance_backwards_undoes_forward() {
        let mut orbit = Orbit::around(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 0.04);
        assert_relative_eq!(orbit.angle, FRAC_PI_2, epsilon = 1e-6);

        orbit.advance(1.0);
        orbit.advance(-1.0);

        assert_relative_eq!(orbit.angle, FRAC_PI_2, epsilon = 1e-6);
    }
}
