use glam::Vec2;
use smallvec::SmallVec;

use crate::{
    engine::{
        depth::DepthBuffer,
        types::{TexStep, View},
    },
    renderer::{PixelSink, same_rgb},
    world::{Sprite, Texture, TextureBank, TextureId},
};

/// Draw order for one frame: `(index into the sprite list, squared distance)`.
pub type SpriteOrder = SmallVec<[(usize, f32); 32]>;

/// A sprite projected onto the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisSprite {
    pub x0: i32, // first column, may be off-screen
    pub x1: i32, // one past the last column
    pub top: i32,
    pub bottom: i32, // exclusive
    pub depth: f32,  // camera-space distance along the view axis
    pub left: f32,   // lateral offset of the left edge, map units
    pub span: f32,   // world width, map units
    pub tex: TextureId,
}

impl VisSprite {
    #[inline]
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Farthest first. Equal distances keep their list order.
pub fn sort_far_to_near(eye: Vec2, sprites: &[Sprite]) -> SpriteOrder {
    let mut order: SpriteOrder = sprites
        .iter()
        .enumerate()
        .map(|(i, s)| (i, s.pos.distance_squared(eye)))
        .collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1));
    order
}

/// Screen rectangle of `sprite`, or `None` when it is behind the camera or
/// entirely off to one side.
pub fn project_sprite(view: &View, sprite: &Sprite) -> Option<VisSprite> {
    let cam = view.camera.to_cam(view.trig, sprite.pos);
    let depth = cam.y;
    if depth <= 0.0 {
        return None;
    }

    // plane units back to map units
    let lateral = cam.x * view.camera.plane(view.trig).length();
    let span = view.cfg.wall_height as f32;
    let left = lateral - span * 0.5;

    // columns are one angle unit apart: cover every column whose ray
    // crosses the sprite
    let a = view.trig.angles;
    let bearing = |x: f32| a.a30 as f32 + x.atan2(depth) * a.per_radian();
    let x0 = bearing(left).ceil() as i32;
    let x1 = bearing(left + span).floor() as i32 + 1;
    if x0 >= x1 || x1 <= 0 || x0 >= view.width as i32 {
        return None;
    }

    let size = view.proj * span / depth;

    // same rows a wall at this depth covers
    let bottom = view.horizon as f32 + view.camera.eye_height as f32 * view.proj / depth;
    let top = bottom - size;

    Some(VisSprite {
        x0,
        x1,
        top: top.floor() as i32,
        bottom: bottom.floor() as i32,
        depth,
        left,
        span,
        tex: sprite.texture,
    })
}

/// Rasterise one projected sprite, column by column, behind nearer walls.
pub fn draw_sprite<S: PixelSink + ?Sized>(
    sink: &mut S,
    view: &View,
    depth: &DepthBuffer,
    vis: &VisSprite,
    tex: &Texture,
) {
    let (w, h) = (sink.width() as i32, sink.height() as i32);
    let key = view.cfg.transparent_key;
    let a = view.trig.angles;
    let tex_w = tex.width() as f32;

    let c0 = vis.x0.max(0);
    let c1 = vis.x1.min(w);
    let y0 = vis.top.max(0);
    let y1 = vis.bottom.min(h);
    if c0 >= c1 || y0 >= y1 {
        return;
    }

    for col in c0..c1 {
        if !depth.admits(col as usize, vis.depth) {
            continue;
        }
        // where this column's ray crosses the sprite
        let rel = (col - a.a30 as i32) as f32 / a.per_radian();
        let lateral = vis.depth * rel.tan();
        let u = ((lateral - vis.left) / vis.span * tex_w).clamp(0.0, tex_w - 1.0) as i32;

        let mut v = TexStep::new(tex.height(), vis.height(), y0 - vis.top);
        for y in y0..y1 {
            let texel = tex.sample(u, v.texel());
            if !same_rgb(texel, key) {
                sink.put_pixel(col as usize, y as usize, texel);
            }
            v.advance();
        }
    }
}

/// Sprite pass: painter's order over the whole list, z-tested per column.
pub fn draw_sprites<S: PixelSink + ?Sized>(
    sink: &mut S,
    view: &View,
    sprites: &[Sprite],
    bank: &TextureBank,
    depth: &DepthBuffer,
) {
    for (i, _) in sort_far_to_near(view.camera.pos, sprites) {
        let Some(vis) = project_sprite(view, &sprites[i]) else {
            continue;
        };
        let Ok(tex) = bank.texture(vis.tex) else {
            continue;
        };
        draw_sprite(sink, view, depth, &vis, tex);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
