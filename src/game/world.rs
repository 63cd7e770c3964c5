// Layered world state with the per-frame update and draw passes

use log::trace;

use super::object::{Facing, GameObject};
use super::player::update_player;
use super::resources::Resources;
use super::stats::{GRAVITY, SPRITE_SIZE};
use crate::core::math::Rect;
use crate::engine::input::MovementInput;
use crate::engine::renderer::{Canvas, Flip};

/// Update and draw priority groups, processed in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Static level tiles
    Level,
    /// Player and other moving characters
    Characters,
}

impl Layer {
    fn index(self) -> usize {
        match self {
            Layer::Level => 0,
            Layer::Characters => 1,
        }
    }
}

/// What to do about two overlapping objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapResponse {
    /// Leave both objects as they are
    #[default]
    Ignore,
}

/// Hook called by the update pass for every overlapping pair
///
/// There is no collision response yet: the default handler ignores every
/// overlap, and the world does not act on any other response.
pub trait OverlapHandler {
    fn on_overlap(&mut self, a: &GameObject, b: &GameObject, overlap: Rect) -> OverlapResponse;
}

/// Overlap handler that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreOverlaps;

impl OverlapHandler for IgnoreOverlaps {
    fn on_overlap(&mut self, _a: &GameObject, _b: &GameObject, _overlap: Rect) -> OverlapResponse {
        OverlapResponse::Ignore
    }
}

/// Per-frame inputs to the update pass
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub input: MovementInput,
    pub resources: &'a Resources,
    /// Seconds since the previous frame
    pub dt: f32,
}

/// All objects in the game, grouped into ordered layers
#[derive(Debug, Default)]
pub struct World {
    layers: [Vec<GameObject>; 2],
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object to the end of a layer
    pub fn push(&mut self, layer: Layer, object: GameObject) {
        self.layers[layer.index()].push(object);
    }

    pub fn layer(&self, layer: Layer) -> &[GameObject] {
        &self.layers[layer.index()]
    }

    /// Every object in update/draw order: layer by layer, then insertion order
    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.layers.iter().flatten()
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.layers.iter_mut().flatten()
    }

    /// The first player object, if any
    pub fn player(&self) -> Option<&GameObject> {
        self.objects().find(|obj| obj.is_player())
    }

    /// Total number of objects
    pub fn len(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Advance every object by one frame, then report overlaps
    pub fn update(&mut self, ctx: &FrameContext<'_>, overlaps: &mut impl OverlapHandler) {
        assert!(
            ctx.dt.is_finite() && ctx.dt >= 0.0,
            "world updated with invalid delta time {}",
            ctx.dt
        );

        for obj in self.objects_mut() {
            update_object(obj, ctx);
        }

        self.report_overlaps(overlaps);
    }

    /// Queue every object on the canvas, in update order
    pub fn draw(&self, canvas: &mut impl Canvas) {
        for obj in self.objects() {
            draw_object(obj, canvas);
        }
    }

    /// Call the overlap hook for each intersecting pair involving a dynamic object
    fn report_overlaps(&self, overlaps: &mut impl OverlapHandler) {
        let objects: Vec<&GameObject> = self.objects().collect();

        for (i, a) in objects.iter().enumerate() {
            for b in &objects[i + 1..] {
                if !a.dynamic && !b.dynamic {
                    continue;
                }

                if let Some(overlap) = a.bounds().intersection(&b.bounds()) {
                    match overlaps.on_overlap(a, b, overlap) {
                        OverlapResponse::Ignore => {
                            trace!("Ignoring overlap {:?} between {:?} and {:?}", overlap, a.kind, b.kind)
                        }
                    }
                }
            }
        }
    }
}

/// Gravity, player behaviour, integration and animation for one object
fn update_object(obj: &mut GameObject, ctx: &FrameContext<'_>) {
    let dt = ctx.dt;

    if obj.dynamic {
        obj.velocity += GRAVITY * dt;
    }

    if obj.is_player() {
        update_player(obj, ctx.input, &ctx.resources.player, dt);
    }

    // Semi-implicit Euler: this frame's velocity moves the object this frame
    obj.position += obj.velocity * dt;

    if let Some(animation) = obj.current_animation_mut() {
        animation.step(dt);
    }
}

fn draw_object(obj: &GameObject, canvas: &mut impl Canvas) {
    let src_x = obj
        .current_animation()
        .map(|animation| animation.current_frame() as f32 * SPRITE_SIZE)
        .unwrap_or(0.0);

    let src = Rect::new(src_x, 0.0, SPRITE_SIZE, SPRITE_SIZE);
    let dst = Rect::square(obj.position, SPRITE_SIZE);
    let flip = match obj.facing {
        Facing::Left => Flip::Horizontal,
        Facing::Right => Flip::None,
    };

    canvas.draw_texture(obj.texture, src, dst, flip);
}
