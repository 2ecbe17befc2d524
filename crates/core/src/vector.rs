//! Small vector helpers shared by the force model and integrator.

use glam::DVec2;

/// Clamps the magnitude of `v` to `max`.
///
/// Vectors longer than `max` are rescaled to exactly `max`; shorter ones are
/// returned unchanged. A negative or NaN `max` is treated as 0.
pub fn limit(v: DVec2, max: f64) -> DVec2 {
    let max = if max > 0.0 { max } else { 0.0 };
    let len_sq = v.length_squared();
    if len_sq > max * max {
        v * (max / len_sq.sqrt())
    } else {
        v
    }
}

/// Wraps a single coordinate around `[-margin, extent + margin]`.
///
/// Leaving one side by more than `margin` re-enters on the opposite side's
/// margin. A coordinate exactly on the margin stays where it is.
pub fn wrap_coord(value: f64, extent: f64, margin: f64) -> f64 {
    if value < -margin {
        extent + margin
    } else if value > extent + margin {
        -margin
    } else {
        value
    }
}

/// Toroidal wrap of a position over a `size` canvas with a pixel `margin`.
pub fn wrap(pos: DVec2, size: DVec2, margin: f64) -> DVec2 {
    DVec2::new(
        wrap_coord(pos.x, size.x, margin),
        wrap_coord(pos.y, size.y, margin),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_leaves_short_vectors_untouched() {
        let v = DVec2::new(0.3, -0.4);
        assert_eq!(limit(v, 1.0), v);
    }

    #[test]
    fn limit_leaves_vector_at_limit_untouched() {
        let v = DVec2::new(3.0, 4.0);
        assert_eq!(limit(v, 5.0), v);
    }

    #[test]
    fn limit_rescales_long_vectors_preserving_direction() {
        let v = DVec2::new(5.5, 5.5);
        let out = limit(v, 1.2);
        assert!((out.length() - 1.2).abs() < 1e-12);
        assert!((out.x - out.y).abs() < 1e-12);
    }

    #[test]
    fn limit_with_zero_or_negative_max_yields_zero() {
        assert_eq!(limit(DVec2::new(1.0, 1.0), 0.0), DVec2::ZERO);
        assert_eq!(limit(DVec2::new(1.0, 1.0), -2.0), DVec2::ZERO);
    }

    #[test]
    fn limit_of_zero_vector_is_zero() {
        assert_eq!(limit(DVec2::ZERO, 1.0), DVec2::ZERO);
    }

    #[test]
    fn wrap_moves_past_right_edge_to_left_margin() {
        assert_eq!(wrap_coord(2410.5, 2400.0, 10.0), -10.0);
    }

    #[test]
    fn wrap_moves_past_left_edge_to_right_margin() {
        assert_eq!(wrap_coord(-10.5, 2400.0, 10.0), 2410.0);
    }

    #[test]
    fn wrap_leaves_coordinate_exactly_on_margin() {
        assert_eq!(wrap_coord(2410.0, 2400.0, 10.0), 2410.0);
        assert_eq!(wrap_coord(-10.0, 2400.0, 10.0), -10.0);
    }

    #[test]
    fn wrap_handles_both_axes() {
        let size = DVec2::new(200.0, 100.0);
        assert_eq!(wrap(DVec2::new(211.0, -11.0), size, 10.0), DVec2::new(-10.0, 110.0));
        assert_eq!(wrap(DVec2::new(-11.0, 111.0), size, 10.0), DVec2::new(210.0, -10.0));
        assert_eq!(wrap(DVec2::new(50.0, 50.0), size, 10.0), DVec2::new(50.0, 50.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn limit_never_increases_or_exceeds(
                x in -1e6_f64..1e6,
                y in -1e6_f64..1e6,
                max in 0.0_f64..1e3,
            ) {
                let v = DVec2::new(x, y);
                let out = limit(v, max);
                prop_assert!(out.length() <= v.length() + 1e-9);
                prop_assert!(out.length() <= max * (1.0 + 1e-12) + 1e-12);
                if v.length_squared() <= max * max {
                    prop_assert_eq!(out, v);
                }
            }

            #[test]
            fn wrapped_coordinates_stay_within_margins(
                value in -5000.0_f64..5000.0,
                extent in 1.0_f64..4000.0,
            ) {
                let w = wrap_coord(value, extent, 10.0);
                prop_assert!((-10.0..=extent + 10.0).contains(&w));
            }
        }
    }
}
