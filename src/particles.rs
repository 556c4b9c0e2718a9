#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Particle {
    /// `random` yields values in `[0, 1)`.
    pub fn spawn(width: f64, height: f64, random: &mut impl FnMut() -> f64) -> Self {
        Self {
            x: random() * width,
            y: random() * height,
            radius: random() * 2.0 + 1.0,
            vx: random() * 0.5 - 0.25,
            vy: random() * 0.5 - 0.25,
        }
    }

    pub fn step(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;
        bounce(&mut self.x, &mut self.vx, width);
        bounce(&mut self.y, &mut self.vy, height);
    }
}

/// Elastic wall bounce on one axis: flip the velocity and fold the position
/// back into `[0, extent]`.
fn bounce(position: &mut f64, velocity: &mut f64, extent: f64) {
    let extent = extent.max(0.0);

    if *position < 0.0 {
        *velocity = -*velocity;
        *position = (-*position).min(extent);
    } else if *position > extent {
        *velocity = -*velocity;
        *position = (2.0 * extent - *position).clamp(0.0, extent);
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn populate(count: usize, width: f64, height: f64, mut random: impl FnMut() -> f64) -> Self {
        let particles = (0..count)
            .map(|_| Particle::spawn(width, height, &mut random))
            .collect();

        Self { particles }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn step(&mut self, width: f64, height: f64) {
        for particle in &mut self.particles {
            particle.step(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            x,
            y,
            radius: 1.0,
            vx,
            vy,
        }
    }

    #[test]
    fn left_wall_flips_velocity_and_stays_in_bounds() {
        let mut particle = still(0.0, 50.0, -0.1, 0.0);

        particle.step(200.0, 100.0);

        assert_eq!(particle.vx, 0.1);
        assert!((0.0..=200.0).contains(&particle.x));
    }

    #[test]
    fn right_wall_folds_back_inside() {
        let mut particle = still(199.9, 50.0, 0.25, 0.0);

        particle.step(200.0, 100.0);

        assert_eq!(particle.vx, -0.25);
        assert!(particle.x <= 200.0);
    }

    #[test]
    fn shrunken_canvas_pulls_stragglers_back_on_next_step() {
        let mut particle = still(900.0, 700.0, 0.2, 0.2);

        particle.step(400.0, 300.0);

        assert!((0.0..=400.0).contains(&particle.x));
        assert!((0.0..=300.0).contains(&particle.y));
        assert!(particle.vx < 0.0 && particle.vy < 0.0);
    }

    #[test]
    fn spawn_respects_documented_ranges() {
        let mut samples = [0.0, 0.999, 0.5, 0.0, 0.999].into_iter().cycle();
        let field = ParticleField::populate(4, 300.0, 150.0, move || samples.next().unwrap_or(0.0));

        assert_eq!(field.particles().len(), 4);
        for particle in field.particles() {
            assert!((0.0..300.0).contains(&particle.x));
            assert!((0.0..150.0).contains(&particle.y));
            assert!((1.0..3.0).contains(&particle.radius));
            assert!((-0.25..0.25).contains(&particle.vx));
            assert!((-0.25..0.25).contains(&particle.vy));
        }
    }
}
