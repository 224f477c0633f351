use serde::{Deserialize, Serialize};

use crate::core::viewport::{Reservations, WindowExtent};

/// Configuration for the engine, provided by the shell at init.
/// Every field has a default, so a partial JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AquariumConfig {
    /// Initial window extent in CSS pixels.
    pub window: WindowExtent,
    /// Screen space held back for the title, info panel and margins.
    pub reservations: Reservations,
    /// Scheduler quantum in milliseconds (default: 10).
    pub tick_ms: u32,
    /// Maximum quanta run per frame before the backlog is dropped (default: 25).
    pub max_catch_up_ticks: u32,
    /// Seed for spawn placement and shrimp drift.
    pub seed: u64,
    /// Added to a creature's larger dimension to size the selection highlight.
    pub highlight_padding: f32,
    /// Refresh period of the selection highlight tracker in milliseconds.
    pub highlight_period_ms: u32,
    /// Maximum creature instances in the render buffer (default: 512).
    pub max_creatures: usize,
    /// Maximum transfer arrows in the render buffer (default: 64).
    pub max_arrows: usize,
    /// Maximum shell events held between drains (default: 32).
    pub max_events: usize,
}

impl Default for AquariumConfig {
    fn default() -> Self {
        Self {
            window: WindowExtent::new(1280.0, 800.0),
            reservations: Reservations::default(),
            tick_ms: 10,
            max_catch_up_ticks: 25,
            seed: 42,
            highlight_padding: 40.0,
            highlight_period_ms: 50,
            max_creatures: 512,
            max_arrows: 64,
            max_events: 32,
        }
    }
}

impl AquariumConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
