/// Shared-memory layout read by the JS shell.
/// Must stay in sync with the shell's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 24 floats]
/// [Creatures: max_creatures × 8 floats]
/// [Arrows: max_arrows × 5 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The shell reads them from the header to compute offsets.

use crate::api::config::AquariumConfig;
use crate::api::types::ShellEvent;
use crate::renderer::instance::{ArrowInstance, CreatureInstance, RenderBuffer};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 24;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_CREATURES: usize = 2;
pub const HEADER_CREATURE_COUNT: usize = 3;
pub const HEADER_MAX_ARROWS: usize = 4;
pub const HEADER_ARROW_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_WINDOW_WIDTH: usize = 8;
pub const HEADER_WINDOW_HEIGHT: usize = 9;
pub const HEADER_BOUNDARY_X: usize = 10;
pub const HEADER_BOUNDARY_Y: usize = 11;
pub const HEADER_BOUNDARY_W: usize = 12;
pub const HEADER_BOUNDARY_H: usize = 13;
pub const HEADER_HIGHLIGHT_VISIBLE: usize = 14;
pub const HEADER_HIGHLIGHT_X: usize = 15;
pub const HEADER_HIGHLIGHT_Y: usize = 16;
pub const HEADER_HIGHLIGHT_SIZE: usize = 17;
/// Selected creature id, or -1.
pub const HEADER_SELECTED_ID: usize = 18;
/// Held creature id, or -1.
pub const HEADER_DRAGGED_ID: usize = 19;
pub const HEADER_PAUSED: usize = 20;
/// Block height of the loaded block, or -1.
pub const HEADER_BLOCK_HEIGHT: usize = 21;
// 22..24 reserved.

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per creature instance (wire format, never changes).
pub const CREATURE_FLOATS: usize = CreatureInstance::FLOATS;

/// Floats per arrow: x1, y1, x2, y2, kind (wire format, never changes).
pub const ARROW_FLOATS: usize = ArrowInstance::FLOATS;

/// Floats per shell event: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = ShellEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_creatures: usize,
    pub max_arrows: usize,
    pub max_events: usize,

    /// Size of the creature section in floats.
    pub creature_data_floats: usize,
    pub arrow_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where creature data begins.
    pub creature_data_offset: usize,
    pub arrow_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_creatures: usize, max_arrows: usize, max_events: usize) -> Self {
        let creature_data_floats = max_creatures * CREATURE_FLOATS;
        let arrow_data_floats = max_arrows * ARROW_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let creature_data_offset = HEADER_FLOATS;
        let arrow_data_offset = creature_data_offset + creature_data_floats;
        let event_data_offset = arrow_data_offset + arrow_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_creatures,
            max_arrows,
            max_events,
            creature_data_floats,
            arrow_data_floats,
            event_data_floats,
            creature_data_offset,
            arrow_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &AquariumConfig) -> Self {
        Self::new(config.max_creatures, config.max_arrows, config.max_events)
    }
}

/// Per-frame scalar state that goes into the header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameHeader {
    pub frame: u32,
    pub window_width: f32,
    pub window_height: f32,
    pub selected: Option<u32>,
    pub dragged: Option<u32>,
    pub paused: bool,
    pub block_height: Option<u64>,
}

fn id_or_none(id: Option<u32>) -> f32 {
    id.map_or(-1.0, |id| id as f32)
}

/// Serialize one frame into `out` (resized to the layout's total).
/// Sections are truncated to their capacities.
pub fn write_frame(
    layout: &ProtocolLayout,
    header: &FrameHeader,
    render: &RenderBuffer,
    events: &[ShellEvent],
    out: &mut Vec<f32>,
) {
    out.clear();
    out.resize(layout.buffer_total_floats, 0.0);

    let creatures = render.instances.len().min(layout.max_creatures);
    let arrows = render.arrows.len().min(layout.max_arrows);
    let event_count = events.len().min(layout.max_events);

    let h = &mut out[..HEADER_FLOATS];
    h[HEADER_FRAME_COUNTER] = header.frame as f32;
    h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    h[HEADER_MAX_CREATURES] = layout.max_creatures as f32;
    h[HEADER_CREATURE_COUNT] = creatures as f32;
    h[HEADER_MAX_ARROWS] = layout.max_arrows as f32;
    h[HEADER_ARROW_COUNT] = arrows as f32;
    h[HEADER_MAX_EVENTS] = layout.max_events as f32;
    h[HEADER_EVENT_COUNT] = event_count as f32;
    h[HEADER_WINDOW_WIDTH] = header.window_width;
    h[HEADER_WINDOW_HEIGHT] = header.window_height;
    h[HEADER_BOUNDARY_X] = render.boundary.x;
    h[HEADER_BOUNDARY_Y] = render.boundary.y;
    h[HEADER_BOUNDARY_W] = render.boundary.w;
    h[HEADER_BOUNDARY_H] = render.boundary.h;
    if let Some(rect) = render.highlight {
        h[HEADER_HIGHLIGHT_VISIBLE] = 1.0;
        h[HEADER_HIGHLIGHT_X] = rect.x;
        h[HEADER_HIGHLIGHT_Y] = rect.y;
        h[HEADER_HIGHLIGHT_SIZE] = rect.w;
    }
    h[HEADER_SELECTED_ID] = id_or_none(header.selected);
    h[HEADER_DRAGGED_ID] = id_or_none(header.dragged);
    h[HEADER_PAUSED] = if header.paused { 1.0 } else { 0.0 };
    h[HEADER_BLOCK_HEIGHT] = header.block_height.map_or(-1.0, |b| b as f32);

    let creature_floats: &[f32] = bytemuck::cast_slice(&render.instances[..creatures]);
    out[layout.creature_data_offset..layout.creature_data_offset + creature_floats.len()]
        .copy_from_slice(creature_floats);

    let arrow_floats: &[f32] = bytemuck::cast_slice(&render.arrows[..arrows]);
    out[layout.arrow_data_offset..layout.arrow_data_offset + arrow_floats.len()]
        .copy_from_slice(arrow_floats);

    let event_floats: &[f32] = bytemuck::cast_slice(&events[..event_count]);
    out[layout.event_data_offset..layout.event_data_offset + event_floats.len()]
        .copy_from_slice(event_floats);
}
