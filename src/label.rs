//! YOLO label lines.

use std::fmt;

use crate::bbox::YoloBox;

/// Class id written for every plate; CCPD has a single object class.
pub const PLATE_CLASS_ID: u32 = 0;

/// One object row of a YOLO label file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YoloLabel {
    pub class_id: u32,
    pub bbox: YoloBox,
}

impl YoloLabel {
    /// A label for the license plate class.
    pub fn plate(bbox: YoloBox) -> Self {
        Self {
            class_id: PLATE_CLASS_ID,
            bbox,
        }
    }
}

/// Renders `"<class_id> <x_center> <y_center> <width> <height>"` with no
/// trailing newline.
impl fmt::Display for YoloLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_id)?;
        for value in self.bbox.values() {
            write!(f, " {}", FloatText(value))?;
        }
        Ok(())
    }
}

/// Shortest round-trip text that always keeps a fractional part (`1.0`, not
/// `1`).
///
/// Values whose decimal exponent is below -4 or at least 16 are written in
/// exponent form with a signed two-digit exponent (`8.333333333333333e-05`,
/// `1e+16`).
struct FloatText(f64);

impl FloatText {
    /// Decimal exponent of the value, `None` for zero and non-finite values.
    fn exponent(&self) -> Option<(String, i32)> {
        if self.0 == 0.0 || !self.0.is_finite() {
            return None;
        }
        let sci = format!("{:e}", self.0);
        let (mantissa, exp) = sci.split_once('e')?;
        let exp = exp.parse().ok()?;
        Some((mantissa.to_string(), exp))
    }
}

impl fmt::Display for FloatText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((mantissa, exp)) = self.exponent() {
            if !(-4..16).contains(&exp) {
                let sign = if exp < 0 { '-' } else { '+' };
                return write!(f, "{mantissa}e{sign}{:02}", exp.abs());
            }
        }

        let text = self.0.to_string();
        if self.0.is_finite() && !text.contains('.') {
            write!(f, "{text}.0")
        } else {
            f.write_str(&text)
        }
    }
}
