//! sRGB color helpers.
//!
//! Scene colors are authored as web-style hex literals. They are stored as
//! `Vec3` sRGB components in `[0, 1]`; [`srgb_to_linear`] converts for
//! shading.

use glam::Vec3;

use crate::errors::{FajrError, Result};

/// Converts a packed `0xRRGGBB` value to sRGB components.
#[must_use]
pub fn hex(rgb: u32) -> Vec3 {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}

/// Parses `#rrggbb` or the shorthand `#rgb`.
pub fn parse_hex(literal: &str) -> Result<Vec3> {
    let invalid = || FajrError::InvalidColor(literal.to_string());

    let digits = literal.strip_prefix('#').ok_or_else(invalid)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let packed = match digits.len() {
        6 => u32::from_str_radix(digits, 16).map_err(|_| invalid())?,
        3 => {
            let short = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
            let (r, g, b) = ((short >> 8) & 0xf, (short >> 4) & 0xf, short & 0xf);
            ((r * 0x11) << 16) | ((g * 0x11) << 8) | (b * 0x11)
        }
        _ => return Err(invalid()),
    };

    Ok(hex(packed))
}

/// Formats sRGB components back to `#rrggbb`.
#[must_use]
pub fn to_hex_string(color: Vec3) -> String {
    let [r, g, b] = color.clamp(Vec3::ZERO, Vec3::ONE).to_array().map(|c| (c * 255.0).round() as u8);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Formats an sRGB color with alpha as a CSS `rgba()` expression.
#[must_use]
pub fn css_rgba(color: Vec3, alpha: f32) -> String {
    let [r, g, b] = color.clamp(Vec3::ZERO, Vec3::ONE).to_array().map(|c| (c * 255.0).round() as u8);
    format!("rgba({r}, {g}, {b}, {alpha})")
}

/// sRGB transfer function, per channel.
#[must_use]
pub fn srgb_to_linear(color: Vec3) -> Vec3 {
    let f = |c: f32| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(f(color.x), f(color.y), f(color.z))
}
