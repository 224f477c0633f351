use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The eight creature types, smallest balance band first.
///
/// A closed set: an unknown tag fails to parse and the descriptor carrying it
/// is skipped, it never reaches motion dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Species {
    Shrimp = 0,
    Crab = 1,
    Octopus = 2,
    Fish = 3,
    Tuna = 4,
    Dolphin = 5,
    Shark = 6,
    Whale = 7,
}

/// Sizing parameters for one species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRule {
    /// Pixel size at scale 1.0.
    pub base: f32,
    /// Balance at which the scale factor is 1.0.
    pub origin: f64,
    /// Balance needed per +1.0 of scale.
    pub per_unit: f64,
    /// Added to the scale factor before clamping.
    pub offset: f64,
    /// Upper clamp of the scale factor.
    pub max_multiplier: f64,
}

impl SizeRule {
    /// Scale factor for a balance, clamped into `[1, max_multiplier]`.
    pub fn scale(&self, balance: f64) -> f64 {
        let raw = (balance - self.origin) / self.per_unit + self.offset;
        raw.min(self.max_multiplier).max(1.0)
    }
}

impl Species {
    /// Total number of species.
    pub const COUNT: usize = 8;

    /// All species, smallest band first.
    pub const ALL: [Species; Self::COUNT] = [
        Species::Shrimp,
        Species::Crab,
        Species::Octopus,
        Species::Fish,
        Species::Tuna,
        Species::Dolphin,
        Species::Shark,
        Species::Whale,
    ];

    /// Lower edge of each balance band, indexed like [`Species::ALL`].
    const BAND_FLOORS: [f64; Self::COUNT] =
        [0.0, 100.0, 1_000.0, 3_000.0, 10_000.0, 40_000.0, 100_000.0, 300_000.0];

    /// Wire tag used by block data (`"shrimp"`, `"crab"`, ...).
    pub fn tag(self) -> &'static str {
        match self {
            Species::Shrimp => "shrimp",
            Species::Crab => "crab",
            Species::Octopus => "octopus",
            Species::Fish => "fish",
            Species::Tuna => "tuna",
            Species::Dolphin => "dolphin",
            Species::Shark => "shark",
            Species::Whale => "whale",
        }
    }

    /// Parse a wire tag. Case-sensitive, like the upstream classifier output.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }

    /// Half-open balance band `[low, high)`; the largest band is unbounded.
    pub fn band(self) -> (f64, Option<f64>) {
        let idx = self as usize;
        (Self::BAND_FLOORS[idx], Self::BAND_FLOORS.get(idx + 1).copied())
    }

    /// Band label for the info panel, e.g. "3,000 - 9,999 ADA".
    pub fn band_label(self) -> String {
        match self.band() {
            (low, Some(high)) if low <= 0.0 => format!("< {} ADA", grouped(high as u64)),
            (low, Some(high)) => format!(
                "{} - {} ADA",
                grouped(low as u64),
                grouped(high as u64 - 1)
            ),
            (low, None) => format!("{}+ ADA", grouped(low as u64)),
        }
    }

    pub fn size_rule(self) -> SizeRule {
        let rule = |base, origin, per_unit, offset, max_multiplier| SizeRule {
            base,
            origin,
            per_unit,
            offset,
            max_multiplier,
        };
        match self {
            Species::Shrimp => rule(20.0, 0.0, 50.0, 0.0, 2.0),
            Species::Crab => rule(30.0, 100.0, 450.0, 1.0, 2.0),
            Species::Octopus => rule(45.0, 1_000.0, 1_000.0, 1.0, 2.0),
            Species::Fish => rule(40.0, 3_000.0, 3_500.0, 1.0, 1.5),
            Species::Tuna => rule(80.0, 10_000.0, 15_000.0, 1.0, 2.0),
            Species::Dolphin => rule(120.0, 40_000.0, 30_000.0, 1.0, 2.2),
            Species::Shark => rule(180.0, 100_000.0, 100_000.0, 1.0, 2.5),
            Species::Whale => rule(350.0, 300_000.0, 200_000.0, 1.0, 3.0),
        }
    }

    /// Rendered pixel size (width and height) for a balance.
    pub fn size_for(self, balance: f64) -> f32 {
        let rule = self.size_rule();
        (rule.base as f64 * rule.scale(balance)).floor() as f32
    }

    /// Vertical offset at which the sprite is drawn below its origin.
    pub fn render_offset_y(self) -> f32 {
        match self {
            Species::Whale => 100.0,
            _ => 0.0,
        }
    }
}

/// Decimal digits with comma thousands separators.
fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a species tag is not one of the eight known tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown species tag {0:?}")]
pub struct UnknownSpecies(pub String);

impl FromStr for Species {
    type Err = UnknownSpecies;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownSpecies(s.to_string()))
    }
}
