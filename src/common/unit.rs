//! Unit conversion utilities.
//!
//! Presentation markup stores every linear measurement as an integer count of
//! English Metric Units (EMU) and every angle, percentage and font size as a scaled
//! integer. The parsed model keeps those raw integers; these helpers convert them on
//! demand for consumers.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_PT: i64 = 12_700;
pub const POINTS_PER_INCH: f64 = 72.0;

/// Angles are stored in 60,000ths of a degree.
pub const ANGLE_UNITS_PER_DEGREE: f64 = 60_000.0;
/// Percentages are stored in 1,000ths of a percent.
pub const PERCENT_UNITS: f64 = 1_000.0;
/// Color modifiers are stored in 100,000ths (100000 = 100%).
pub const MODIFIER_UNITS: f64 = 100_000.0;
/// Font sizes are stored in 100ths of a point.
pub const FONT_SIZE_UNITS: f64 = 100.0;

/// Default text body insets (left, top, right, bottom) in EMU.
pub const DEFAULT_INSET_LR: i64 = 91_440;
pub const DEFAULT_INSET_TB: i64 = 45_720;

/// EMU to pixels at the given DPI: `emu / 914400 * dpi`.
#[inline]
pub fn emu_to_pixels(emu: i64, dpi: f64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64 * dpi
}

/// EMU to points: `emu / 914400 * 72`.
#[inline]
pub fn emu_to_points(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64 * POINTS_PER_INCH
}

#[inline]
pub fn emu_to_cm(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_CM as f64
}

#[inline]
pub fn points_to_emu(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64).round() as i64
}

/// Raw angle (60,000ths of a degree) to degrees.
#[inline]
pub fn angle_to_degrees(raw: i64) -> f64 {
    raw as f64 / ANGLE_UNITS_PER_DEGREE
}

/// Raw percentage (1,000ths of a percent) to percent.
#[inline]
pub fn percent_from_raw(raw: i64) -> f64 {
    raw as f64 / PERCENT_UNITS
}

/// Raw color modifier (100,000ths) to a fraction, so 50000 becomes 0.5.
#[inline]
pub fn modifier_fraction(raw: i32) -> f64 {
    raw as f64 / MODIFIER_UNITS
}

/// Raw font size (100ths of a point) to points.
#[inline]
pub fn font_size_to_points(raw: i64) -> f64 {
    raw as f64 / FONT_SIZE_UNITS
}

/// Raw line/paragraph spacing in points (100ths of a point) to points.
#[inline]
pub fn spacing_points(raw: i64) -> f64 {
    raw as f64 / FONT_SIZE_UNITS
}
