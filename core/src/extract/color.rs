use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// The RGB color the extraction engine searches for. Derived once from a
/// picked hex string; does not mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TargetColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> CoreResult<Self> {
        let clean = hex.strip_prefix('#').unwrap_or(hex);
        if clean.len() != 6 || !clean.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidColor(format!(
                "expected #RRGGBB, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&clean[range], 16)
                .map_err(|e| CoreError::InvalidColor(format!("bad channel in {hex:?}: {e}")))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Euclidean RGB distance to another color; alpha is never considered.
    pub fn distance(self, r: u8, g: u8, b: u8) -> f64 {
        let dr = self.r as f64 - r as f64;
        let dg = self.g as f64 - g as f64;
        let db = self.b as f64 - b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}
