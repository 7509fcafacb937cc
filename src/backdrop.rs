//! Layered hexagon lattice behind the canvas. Each layer scales and turns
//! with progress, suggesting crystal growth as the page scrolls.

use crate::progress::Progress;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerTransform {
    pub scale: f32,
    pub rotate_deg: f32,
    pub opacity: f32,
}

impl LayerTransform {
    pub fn transform_css(&self) -> String {
        format!("scale({}) rotate({}deg)", self.scale, self.rotate_deg)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Backdrop {
    /// Outer hexagon.
    pub base: LayerTransform,
    /// Dashed lattice, counter-rotating.
    pub lattice: LayerTransform,
    /// Full-screen grid that fades in after the intro.
    pub field: LayerTransform,
}

impl Backdrop {
    pub fn at(progress: Progress) -> Self {
        let p = progress.get();
        Self {
            base: LayerTransform {
                scale: 1.0 + p * 2.0,
                rotate_deg: p * 90.0,
                opacity: 1.0,
            },
            lattice: LayerTransform {
                scale: 0.5 + p * 1.5,
                rotate_deg: p * -180.0,
                opacity: 1.0,
            },
            field: LayerTransform {
                scale: 1.0 + p,
                rotate_deg: 0.0,
                opacity: ((p - 0.2) * 2.0).clamp(0.0, 1.0),
            },
        }
    }
}
