//! The "CRYSTAL GRIMOIRE" title: huge and centred at the top of the page,
//! shrinking into the top-left corner over the first tenth of the scroll.

use crate::progress::Progress;

/// Fraction of total progress over which the title settles.
pub const SETTLE_SPAN: f32 = 0.1;

pub const START_SCALE: f32 = 4.0;
pub const START_LETTER_SPACING_EM: f32 = 1.0;
pub const END_LETTER_SPACING_EM: f32 = 0.2;
pub const MAX_BLUR_PX: f32 = 8.0;
/// Corner offset the title settles at.
pub const CORNER_OFFSET: &str = "3rem";

pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderTransform {
    /// Linear settle progress in `[0, 1]`.
    pub title_progress: f32,
    /// Eased settle progress.
    pub eased: f32,
    pub scale: f32,
    pub letter_spacing_em: f32,
    pub blur_px: f32,
    pub shadow_opacity: f32,
    pub subtitle_opacity: f32,
}

impl HeaderTransform {
    pub fn at(progress: Progress) -> Self {
        let title_progress = (progress.get() / SETTLE_SPAN).min(1.0);
        let e = ease_out_cubic(title_progress);
        Self {
            title_progress,
            eased: e,
            scale: mix(START_SCALE, 1.0, e),
            letter_spacing_em: mix(START_LETTER_SPACING_EM, END_LETTER_SPACING_EM, e),
            blur_px: (1.0 - e) * MAX_BLUR_PX,
            shadow_opacity: 1.0 - e,
            subtitle_opacity: (1.0 - title_progress * 3.0).max(0.0),
        }
    }

    /// Value for both `top` and `left`.
    pub fn position_css(&self) -> String {
        format!(
            "calc(50% * {} + {} * {})",
            1.0 - self.eased,
            CORNER_OFFSET,
            self.eased
        )
    }

    pub fn transform_css(&self) -> String {
        format!("translate(-50%, -50%) scale({})", self.scale)
    }

    pub fn letter_spacing_css(&self) -> String {
        format!("{}em", self.letter_spacing_em)
    }

    pub fn blur_css(&self) -> String {
        format!("blur({}px)", self.blur_px)
    }

    /// Glow behind the first word.
    pub fn crystal_glow_css(&self) -> String {
        glow(30.0, (165, 243, 252), 0.5, self.shadow_opacity)
    }

    /// Glow behind the second word.
    pub fn grimoire_glow_css(&self) -> String {
        glow(40.0, (216, 180, 254), 0.8, self.shadow_opacity)
    }
}

// Exact at both ends, unlike `a + (b - a) * t`.
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

fn glow(radius: f32, rgb: (u8, u8, u8), alpha: f32, strength: f32) -> String {
    format!(
        "0 0 {}px rgba({},{},{}, {})",
        radius * strength,
        rgb.0,
        rgb.1,
        rgb.2,
        alpha * strength
    )
}
