//! Cubic curve evaluation
//!
//! Both families take four control points and a local parameter t in [0, 1]:
//! - Bézier interpolates its end points (t = 0 gives p0, t = 1 gives p3)
//! - Uniform cubic B-spline only approximates them, and is smoother for it

use glam::Vec3;

use crate::wrap01;

/// Cubic Bézier in Bernstein form
pub fn evaluate_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    let u2 = u * u;
    let t2 = t * t;
    p0 * (u2 * u) + p1 * (3.0 * u2 * t) + p2 * (3.0 * u * t2) + p3 * (t2 * t)
}

/// Basis weights of the uniform cubic B-spline (they sum to 1 for every t)
#[inline]
pub fn bspline_weights(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        (-t3 + 3.0 * t2 - 3.0 * t + 1.0) / 6.0,
        (3.0 * t3 - 6.0 * t2 + 4.0) / 6.0,
        (-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0) / 6.0,
        t3 / 6.0,
    ]
}

/// Uniform cubic B-spline segment
pub fn evaluate_bspline(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let [b0, b1, b2, b3] = bspline_weights(t);
    p0 * b0 + p1 * b1 + p2 * b2 + p3 * b3
}

/// Central-difference derivative of a closed curve
///
/// Each probe is wrapped onto [0, 1) on its own, so the result stays valid
/// right at the start/finish seam. The returned vector is not normalized.
pub fn central_difference<F>(curve: F, t: f32, epsilon: f32) -> Vec3
where
    F: Fn(f32) -> Vec3,
{
    let ahead = curve(wrap01(t + epsilon));
    let behind = curve(wrap01(t - epsilon));
    ahead - behind
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon() -> [Vec3; 4] {
        [
            Vec3::new(-140.0, 0.0, 0.0),
            Vec3::new(-60.0, 0.0, 160.0),
            Vec3::new(120.0, 0.0, 160.0),
            Vec3::new(-140.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_bezier_interpolates_endpoints_exactly() {
        let p = [
            Vec3::new(1.5, -2.25, 3.0),
            Vec3::new(7.0, 4.0, -1.0),
            Vec3::new(-3.0, 9.5, 2.0),
            Vec3::new(0.125, 6.0, -8.0),
        ];
        assert_eq!(evaluate_bezier(p[0], p[1], p[2], p[3], 0.0), p[0]);
        assert_eq!(evaluate_bezier(p[0], p[1], p[2], p[3], 1.0), p[3]);
    }

    #[test]
    fn test_bspline_misses_endpoints() {
        let [p0, p1, p2, p3] = polygon();
        let start = evaluate_bspline(p0, p1, p2, p3, 0.0);
        let end = evaluate_bspline(p0, p1, p2, p3, 1.0);
        assert!(start.distance(p0) > 1.0);
        assert!(end.distance(p3) > 1.0);
        // At t = 0 the B-spline sits at (p0 + 4 p1 + p2) / 6
        let expected = (p0 + p1 * 4.0 + p2) / 6.0;
        assert!(start.distance(expected) < 1e-3);
    }

    #[test]
    fn test_bspline_weights_partition_unity() {
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let sum: f32 = bspline_weights(t).iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "t={} sum={}", t, sum);
        }
    }

    #[test]
    fn test_central_difference_across_seam() {
        let [p0, p1, p2, p3] = polygon();
        let curve = |t: f32| evaluate_bezier(p0, p1, p2, p3, t);
        // At t = 0 the behind probe wraps to t = 0.999
        let d = central_difference(curve, 0.0, 0.001);
        assert!(d.is_finite());
        assert!(d.length() > 0.0);
        // Near the seam the curve heads from p2 back toward p3, then out toward p1
        let expected = curve(0.001) - curve(0.999);
        assert!(d.distance(expected) < 1e-2);
    }

    #[test]
    fn test_central_difference_on_line() {
        let curve = |t: f32| Vec3::new(t * 10.0, 0.0, 0.0);
        let d = central_difference(curve, 0.5, 0.01);
        assert!((d.x - 0.2).abs() < 1e-4);
    }
}
