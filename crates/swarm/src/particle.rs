//! Particle state and the per-particle force terms.

use glyphswarm_core::prng::RandomSource;
use glyphswarm_core::DVec2;

/// A simulated point. `target` indexes the swarm's current target list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub target: usize,
}

impl Particle {
    /// Spawns a particle at a uniformly random canvas position with each
    /// velocity component uniform in [-1, 1).
    pub fn spawn(target: usize, size: DVec2, rng: &mut dyn RandomSource) -> Self {
        let x = rng.next_range(0.0, size.x);
        let y = rng.next_range(0.0, size.y);
        let vx = rng.next_range(-1.0, 1.0);
        let vy = rng.next_range(-1.0, 1.0);
        Self {
            position: DVec2::new(x, y),
            velocity: DVec2::new(vx, vy),
            target,
        }
    }
}

/// Spawns `count` particles assigned round-robin over `target_count` targets.
///
/// With no targets there is nothing to attract to, so no particles are spawned.
pub fn spawn_all(
    count: usize,
    target_count: usize,
    size: DVec2,
    rng: &mut dyn RandomSource,
) -> Vec<Particle> {
    if target_count == 0 {
        return Vec::new();
    }
    (0..count)
        .map(|i| Particle::spawn(i % target_count, size, rng))
        .collect()
}

/// Linear spring toward `target`: farther particles are pulled harder.
pub fn attraction(position: DVec2, target: DVec2, strength: f64) -> DVec2 {
    (target - position) * strength
}

/// Added to the pointer distance before normalizing.
const DISTANCE_EPS: f64 = 1e-6;

/// Push away from `pointer` with quadratic falloff.
///
/// Zero at or beyond `radius`; `force` at the pointer itself. A particle
/// sitting exactly on the pointer has no direction and is pushed along +x.
pub fn repulsion(position: DVec2, pointer: DVec2, radius: f64, force: f64) -> DVec2 {
    let away = position - pointer;
    let distance = away.length();
    if !(distance < radius) {
        return DVec2::ZERO;
    }
    let falloff = 1.0 - distance / radius;
    let direction = if distance > 0.0 {
        away / (distance + DISTANCE_EPS)
    } else {
        DVec2::X
    };
    direction * (force * falloff * falloff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphswarm_core::Xorshift64;

    #[test]
    fn spawn_stays_inside_canvas_with_bounded_velocity() {
        let mut rng = Xorshift64::new(4);
        let size = DVec2::new(2400.0, 800.0);
        for _ in 0..1000 {
            let p = Particle::spawn(0, size, &mut rng);
            assert!((0.0..2400.0).contains(&p.position.x));
            assert!((0.0..800.0).contains(&p.position.y));
            assert!((-1.0..1.0).contains(&p.velocity.x));
            assert!((-1.0..1.0).contains(&p.velocity.y));
        }
    }

    #[test]
    fn spawn_all_assigns_targets_round_robin() {
        let mut rng = Xorshift64::new(4);
        let particles = spawn_all(7, 3, DVec2::new(10.0, 10.0), &mut rng);
        let targets: Vec<usize> = particles.iter().map(|p| p.target).collect();
        assert_eq!(targets, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn spawn_all_without_targets_is_empty() {
        let mut rng = Xorshift64::new(4);
        assert!(spawn_all(1200, 0, DVec2::new(10.0, 10.0), &mut rng).is_empty());
    }

    #[test]
    fn attraction_is_linear_in_distance() {
        let near = attraction(DVec2::ZERO, DVec2::new(10.0, 0.0), 0.055);
        let far = attraction(DVec2::ZERO, DVec2::new(20.0, 0.0), 0.055);
        assert!((near.x - 0.55).abs() < 1e-12);
        assert!((far.x - 2.0 * near.x).abs() < 1e-12);
    }

    #[test]
    fn repulsion_is_zero_outside_radius() {
        let r = repulsion(DVec2::new(200.0, 0.0), DVec2::ZERO, 140.0, 2.4);
        assert_eq!(r, DVec2::ZERO);
        let edge = repulsion(DVec2::new(140.0, 0.0), DVec2::ZERO, 140.0, 2.4);
        assert_eq!(edge, DVec2::ZERO);
    }

    #[test]
    fn repulsion_points_away_with_quadratic_falloff() {
        let r = repulsion(DVec2::new(0.0, 70.0), DVec2::ZERO, 140.0, 2.4);
        assert!(r.x.abs() < 1e-12);
        assert!((r.y - 2.4 * 0.25).abs() < 1e-6, "y = {}", r.y);
    }

    #[test]
    fn repulsion_at_pointer_is_full_force_without_nan() {
        let r = repulsion(DVec2::new(5.0, 5.0), DVec2::new(5.0, 5.0), 140.0, 2.4);
        assert!(r.is_finite());
        assert!((r.length() - 2.4).abs() < 1e-12);
    }

    #[test]
    fn repulsion_vanishes_continuously_at_radius() {
        let mut last = f64::INFINITY;
        for i in 1..=100 {
            let d = 140.0 - 1.0 / f64::from(i);
            let m = repulsion(DVec2::new(d, 0.0), DVec2::ZERO, 140.0, 2.4).length();
            assert!(m < last);
            last = m;
        }
        assert!(last < 1e-6);
    }

    #[test]
    fn repulsion_stays_finite_and_bounded_near_the_pointer() {
        for d in [1e-300, 1e-12, 1e-7, 1e-3] {
            let r = repulsion(DVec2::new(d, 0.0), DVec2::ZERO, 140.0, 2.4);
            assert!(r.is_finite(), "d = {d}");
            assert!(r.x >= 0.0 && r.length() <= 2.4, "d = {d}, r = {r}");
        }
    }

    #[test]
    fn repulsion_with_zero_radius_is_zero() {
        let r = repulsion(DVec2::ZERO, DVec2::ZERO, 0.0, 2.4);
        assert_eq!(r, DVec2::ZERO);
    }
}
