//! Per-frame exponential smoothing.
//!
//! Every value the renderer reads is pulled a fixed fraction of the way toward
//! its target each frame: `current += (target - current) * factor`. With a
//! factor in `(0, 1]` the value converges monotonically and never overshoots.

use glam::Vec3;

use crate::palette::Rgb;

/// Types that can be blended toward a target.
pub trait Lerp: Copy {
    fn lerp_to(self, target: Self, factor: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp_to(self, target: Self, factor: f32) -> Self {
        self + (target - self) * factor
    }
}

impl Lerp for Vec3 {
    fn lerp_to(self, target: Self, factor: f32) -> Self {
        self.lerp(target, factor)
    }
}

impl Lerp for Rgb {
    fn lerp_to(self, target: Self, factor: f32) -> Self {
        Rgb {
            r: self.r.lerp_to(target.r, factor),
            g: self.g.lerp_to(target.g, factor),
            b: self.b.lerp_to(target.b, factor),
        }
    }
}

/// A value that relaxes toward whatever target it is handed each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothed<T> {
    value: T,
    factor: f32,
}

impl<T: Lerp> Smoothed<T> {
    /// `factor` is clamped into `(0, 1]`.
    pub fn new(initial: T, factor: f32) -> Self {
        Self {
            value: initial,
            factor: factor.clamp(f32::EPSILON, 1.0),
        }
    }

    pub fn step(&mut self, target: T) -> T {
        self.value = self.value.lerp_to(target, self.factor);
        self.value
    }

    pub fn get(&self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_monotonically_without_overshoot() {
        for factor in [0.05, 0.1, 0.5, 1.0] {
            for (start, target) in [(0.0_f32, 1.0_f32), (2.0, 0.02), (-1.0, -3.0)] {
                let mut s = Smoothed::new(start, factor);
                let mut gap = (target - start).abs();
                for _ in 0..400 {
                    let v = s.step(target);
                    let next_gap = (target - v).abs();
                    assert!(next_gap <= gap + 1e-6, "factor={factor} v={v}");
                    // Never crosses to the far side of the target.
                    assert!((v - target) * (start - target) >= -1e-6);
                    gap = next_gap;
                }
                assert!(gap < 1e-3, "factor={factor} gap={gap}");
            }
        }
    }

    #[test]
    fn unit_factor_snaps() {
        let mut s = Smoothed::new(Vec3::ZERO, 1.0);
        assert_eq!(s.step(Vec3::new(4.0, 0.0, 9.0)), Vec3::new(4.0, 0.0, 9.0));
    }

    #[test]
    fn factor_is_clamped() {
        assert_eq!(Smoothed::new(0.0_f32, 3.0).step(5.0), 5.0);
        let mut stalled = Smoothed::new(0.0_f32, 0.0);
        let next = stalled.step(1.0);
        assert!(next > 0.0 && next < 1e-3, "next={next}");
    }

    #[test]
    fn colors_blend_per_channel() {
        let mut s = Smoothed::new(Rgb::hex(0x000000), 0.5);
        let c = s.step(Rgb::hex(0xffffff));
        assert!((c.r - 0.5).abs() < 1e-6 && (c.g - 0.5).abs() < 1e-6 && (c.b - 0.5).abs() < 1e-6);
    }
}
