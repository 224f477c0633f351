use crate::components::creature::{Creature, Visual};
use crate::core::store::CreatureStore;
use crate::core::viewport::{Rect, Viewport};
use crate::renderer::instance::{ArrowInstance, CreatureInstance, RenderBuffer};
use crate::systems::overlay::Overlays;
use crate::systems::selection::Highlight;

fn instance_for(creature: &Creature) -> CreatureInstance {
    CreatureInstance {
        id: creature.id.0 as f32,
        x: creature.motion.pos.x,
        y: creature.motion.pos.y,
        size: creature.width(),
        species: creature.species() as u8 as f32,
        facing: creature.motion.facing.sign(),
        visual: match creature.visual {
            Visual::Swimming => 0.0,
            Visual::Held => 1.0,
        },
        offset_y: creature.species().render_offset_y(),
    }
}

/// Build the render buffer from the store and overlays.
/// Detached creatures are skipped; output is truncated to the given capacities.
pub fn build_render_buffer(
    store: &CreatureStore,
    viewport: &Viewport,
    highlight: &Highlight,
    overlays: &Overlays,
    max_creatures: usize,
    max_arrows: usize,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();
    buffer.boundary = viewport.boundary_rect();

    for creature in store.iter().filter(|c| c.attached).take(max_creatures) {
        buffer.push(instance_for(creature));
    }

    for arrow in overlays.arrows() {
        if buffer.arrows.len() >= max_arrows {
            break;
        }
        if let Some((from, to)) = arrow.endpoints(store) {
            buffer.push_arrow(ArrowInstance {
                x1: from.x,
                y1: from.y,
                x2: to.x,
                y2: to.y,
                kind: arrow.kind.code(),
            });
        }
    }

    if highlight.visible {
        let origin = highlight.origin();
        buffer.highlight = Some(Rect {
            x: origin.x,
            y: origin.y,
            w: highlight.diameter,
            h: highlight.diameter,
        });
    }
}
