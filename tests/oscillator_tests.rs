use approx::assert_relative_eq;
use motion_viewer::animation::{BoundaryPolicy, Bounds, Direction, OscillatorState, Step};

fn pen_step() -> Step {
    Step::from_tilt(0.001, 20.0, 0.0024).unwrap()
}

fn pen_bounds() -> Bounds {
    Bounds::new(-0.85, 2.0).unwrap()
}

/// Ticks until the direction first differs from `from`
fn ticks_until_flip(osc: &mut OscillatorState, step: &Step, from: Direction) -> usize {
    let mut ticks = 0;
    while osc.direction() == from {
        osc.update(step);
        ticks += 1;
        assert!(ticks < 1_000_000, "oscillator never flipped");
    }
    ticks
}

/// The pen cap loop as the page first ran it: two direction checks in sequence
struct TwoCheckLoop {
    y: f32,
    opening: bool,
}

impl TwoCheckLoop {
    fn tick(&mut self, dy: f32, bounds: &Bounds) {
        if self.opening && self.y <= bounds.max() {
            self.y += dy;
        } else {
            self.opening = false;
        }
        if !self.opening && self.y >= bounds.min() {
            self.y -= dy;
        } else {
            self.opening = true;
        }
    }
}

#[cfg(test)]
mod oscillator_tests {
    use super::*;

    #[test]
    fn test_pen_cap_reaches_max_then_turns_down() {
        for policy in [BoundaryPolicy::ClampThenFlip, BoundaryPolicy::Overshoot] {
            let step = pen_step();
            let mut osc = OscillatorState::new(-0.85, Direction::Increasing, pen_bounds()).with_policy(policy);

            ticks_until_flip(&mut osc, &step, Direction::Increasing);

            assert!(osc.position() >= 2.0, "{:?} stopped at {}", policy, osc.position());
            assert_eq!(osc.direction(), Direction::Decreasing);
        }
    }

    #[test]
    fn test_clamp_policy_stays_within_bounds() {
        let step = pen_step();
        let bounds = pen_bounds();
        let mut osc = OscillatorState::new(-0.85, Direction::Increasing, bounds);

        for _ in 0..20_000 {
            osc.update(&step);
            assert!(bounds.contains(osc.position()), "escaped to {}", osc.position());
        }
    }

    #[test]
    fn test_overshoot_policy_exceeds_by_at_most_one_step() {
        let step = pen_step();
        let bounds = pen_bounds();
        let mut osc =
            OscillatorState::new(-0.85, Direction::Increasing, bounds).with_policy(BoundaryPolicy::Overshoot);

        for _ in 0..20_000 {
            osc.update(&step);
            let p = osc.position();
            assert!(p >= bounds.min() - step.dy() - 1e-5 && p <= bounds.max() + step.dy() + 1e-5);
        }
    }

    #[test]
    fn test_overshoot_policy_follows_two_check_loop() {
        let step = pen_step();
        let bounds = pen_bounds();
        let mut osc =
            OscillatorState::new(-0.85, Direction::Increasing, bounds).with_policy(BoundaryPolicy::Overshoot);
        let mut legacy = TwoCheckLoop { y: -0.85, opening: true };

        // Several full cycles, each with one turn at either end
        for tick in 0..10_000 {
            osc.update(&step);
            legacy.tick(step.dy(), &bounds);
            assert!(
                (osc.position() - legacy.y).abs() <= 1e-5,
                "tick {}: {} vs {}",
                tick,
                osc.position(),
                legacy.y
            );
        }
    }

    #[test]
    fn test_flip_happens_exactly_when_step_crosses_bound() {
        let step = Step::new(0.0, 0.1).unwrap();
        let bounds = Bounds::new(0.0, 1.0).unwrap();

        for policy in [BoundaryPolicy::ClampThenFlip, BoundaryPolicy::Overshoot] {
            for i in 0..=20 {
                let start = i as f32 * 0.05;
                for direction in [Direction::Increasing, Direction::Decreasing] {
                    let mut osc = OscillatorState::new(start, direction, bounds).with_policy(policy);
                    let crosses = match direction {
                        Direction::Increasing => start + step.dy() > bounds.max(),
                        Direction::Decreasing => start - step.dy() < bounds.min(),
                    };

                    osc.update(&step);

                    assert_eq!(
                        osc.direction() != direction,
                        crosses,
                        "start {} {:?} {:?}",
                        start,
                        direction,
                        policy
                    );
                }
            }
        }
    }

    #[test]
    fn test_oscillation_period_matches_span() {
        let step = pen_step();
        let bounds = pen_bounds();
        let mut osc = OscillatorState::new(bounds.min(), Direction::Increasing, bounds);

        let up = ticks_until_flip(&mut osc, &step, Direction::Increasing);
        let down = ticks_until_flip(&mut osc, &step, Direction::Decreasing);

        let expected = 2.0 * bounds.span() / step.dy();
        assert!(((up + down) as f32 - expected).abs() <= 3.0, "period {} vs {}", up + down, expected);
        assert!((osc.position() - bounds.min()).abs() <= step.dy());
    }

    #[test]
    fn test_cycles_repeat_identically() {
        let step = pen_step();
        let mut osc = OscillatorState::new(-0.85, Direction::Increasing, pen_bounds());

        let first = ticks_until_flip(&mut osc, &step, Direction::Increasing)
            + ticks_until_flip(&mut osc, &step, Direction::Decreasing);
        let second = ticks_until_flip(&mut osc, &step, Direction::Increasing)
            + ticks_until_flip(&mut osc, &step, Direction::Decreasing);

        assert!((first as i64 - second as i64).abs() <= 1);
    }

    #[test]
    fn test_secondary_axis_tracks_primary() {
        let step = pen_step();
        let mut osc = OscillatorState::new(-0.85, Direction::Increasing, pen_bounds());
        let mut x = 0.0f32;

        for _ in 0..500 {
            let rise = osc.update(&step);
            x += step.along(rise).x;
        }

        assert_relative_eq!(x, 0.5, epsilon = 1e-3);
    }
}
