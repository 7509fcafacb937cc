//! Colors used by the crystal material and the page chrome.

/// An sRGB color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Rgb {
            r: ((value >> 16) & 0xff) as f32 / 255.0,
            g: ((value >> 8) & 0xff) as f32 / 255.0,
            b: (value & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// CSS `#rrggbb` form.
    pub fn to_css(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

pub const MYSTIC: Rgb = Rgb::hex(0x1a103c);
pub const CRYSTAL: Rgb = Rgb::hex(0xa5f3fc);
pub const VOID: Rgb = Rgb::hex(0x020204);
pub const DEEP_INDIGO: Rgb = Rgb::hex(0x1e1b4b);
pub const INDIGO: Rgb = Rgb::hex(0x818cf8);
pub const DEEP_VIOLET: Rgb = Rgb::hex(0x2e0236);
pub const LIGHT_VIOLET: Rgb = Rgb::hex(0xd8b4fe);
pub const SLATE: Rgb = Rgb::hex(0x111827);
pub const OFF_WHITE: Rgb = Rgb::hex(0xf3f4f6);
pub const DARK_AMBER: Rgb = Rgb::hex(0x451a03);
pub const GOLD: Rgb = Rgb::hex(0xfbbf24);
pub const DEEP_EMERALD: Rgb = Rgb::hex(0x064e3b);
pub const EMERALD: Rgb = Rgb::hex(0x34d399);
pub const BLACK: Rgb = Rgb::hex(0x000000);
pub const WHITE: Rgb = Rgb::hex(0xffffff);
