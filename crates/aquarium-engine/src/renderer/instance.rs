use bytemuck::{Pod, Zeroable};

use crate::core::viewport::Rect;

/// Per-creature render data written to shared memory for the JS shell.
/// Must match the shell's protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CreatureInstance {
    /// Engine-assigned creature id.
    pub id: f32,
    /// Origin (top-left) in screen space. The render offset is not applied.
    pub x: f32,
    pub y: f32,
    /// Pixel size (width = height).
    pub size: f32,
    /// `Species` discriminant, 0 = shrimp .. 7 = whale.
    pub species: f32,
    /// +1 facing right, -1 facing left (horizontal sprite scale).
    pub facing: f32,
    /// 0 = swimming sprite, 1 = held sprite.
    pub visual: f32,
    /// Extra downward draw offset for species drawn below their origin.
    pub offset_y: f32,
}

impl CreatureInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One transfer arrow between two creature centers.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ArrowInstance {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    /// 1 = sent by the selected creature, 2 = received by it.
    pub kind: f32,
}

impl ArrowInstance {
    pub const FLOATS: usize = 5;
}

/// Everything the shell draws in one frame.
pub struct RenderBuffer {
    /// Creatures in draw order (later on top).
    pub instances: Vec<CreatureInstance>,
    pub arrows: Vec<ArrowInstance>,
    /// Frame around the swimming area.
    pub boundary: Rect,
    /// Bounding square of the selection highlight, if shown.
    pub highlight: Option<Rect>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(512),
            arrows: Vec::with_capacity(64),
            boundary: Rect::default(),
            highlight: None,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.arrows.clear();
        self.highlight = None;
    }

    pub fn push(&mut self, instance: CreatureInstance) {
        self.instances.push(instance);
    }

    pub fn push_arrow(&mut self, arrow: ArrowInstance) {
        self.arrows.push(arrow);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn arrow_count(&self) -> u32 {
        self.arrows.len() as u32
    }

    /// Raw pointer to instance data for shared-memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn arrows_ptr(&self) -> *const f32 {
        self.arrows.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
