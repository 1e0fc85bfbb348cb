use glam::Vec2;

use crate::{
    config::{Config, ConfigError},
    engine::{
        depth::DepthBuffer,
        planes::{draw_column, open_rows},
        sprites::draw_sprites,
        trig::TrigTables,
        types::View,
        walls::{cast_column, draw_slice},
    },
    renderer::{FrameBuffer, PixelSink},
    sim::{InputCmd, MovementController},
    world::{
        CEILING_TEXTURE, Camera, FLOOR_TEXTURE, Level, Sprite, TextureBank, TextureError,
        TextureId, TileMap,
    },
};

/// Everything that is drawn but never changes during a session.
pub struct Scene {
    pub map: TileMap,
    pub textures: TextureBank,
    pub sprites: Vec<Sprite>, // map units
    pub floor_texture: TextureId,
    pub ceiling_texture: TextureId,
}

/// Reasons a session cannot start.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("camera starts inside a wall at cell ({x}, {y})")]
    StartInWall { x: i32, y: i32 },

    #[error("camera eye height {eye} outside 0..{wall}")]
    EyeHeight { eye: i32, wall: i32 },

    #[error("map has no empty cell to start in")]
    NoOpenCell,
}

/// Session context: owns the tables, the camera and the per-frame buffers.
pub struct Engine {
    cfg: Config,
    trig: TrigTables,
    scene: Scene,
    camera: Camera,
    movement: MovementController,
    depth: DepthBuffer,
    frame: FrameBuffer,
}

impl Engine {
    pub fn new(cfg: Config, scene: Scene, mut camera: Camera) -> Result<Self, EngineError> {
        cfg.validate()?;

        // every id the passes may look up must resolve
        for id in scene.map.wall_ids() {
            scene.textures.texture(TextureId::from(id))?;
        }
        scene.textures.texture(scene.floor_texture)?;
        scene.textures.texture(scene.ceiling_texture)?;
        for s in &scene.sprites {
            scene.textures.texture(s.texture)?;
        }

        let cell = camera.cell(cfg.tile_size);
        if scene.map.is_solid(cell.x, cell.y) {
            return Err(EngineError::StartInWall {
                x: cell.x,
                y: cell.y,
            });
        }
        if camera.eye_height <= 0 || camera.eye_height >= cfg.wall_height {
            return Err(EngineError::EyeHeight {
                eye: camera.eye_height,
                wall: cfg.wall_height,
            });
        }

        let trig = TrigTables::new(cfg.screen_width, cfg.tile_size);
        camera.angle = trig.angles.wrap(camera.angle as i64);
        let movement = MovementController::new(&cfg, &trig.angles);

        log::info!(
            "engine: {}×{} screen, {}×{} map, {} textures, {} sprites",
            cfg.screen_width,
            cfg.screen_height,
            scene.map.width(),
            scene.map.height(),
            scene.textures.len(),
            scene.sprites.len()
        );

        Ok(Self {
            depth: DepthBuffer::new(cfg.screen_width),
            frame: FrameBuffer::new(cfg.screen_width, cfg.screen_height),
            cfg,
            trig,
            scene,
            camera,
            movement,
        })
    }

    /// Start at the level's `@` (or the first empty cell), facing east,
    /// using the built-in floor and ceiling ids.
    pub fn from_level(cfg: Config, level: Level, textures: TextureBank) -> Result<Self, EngineError> {
        let (cx, cy) = match level.start {
            Some(start) => start,
            None => first_open_cell(&level.map).ok_or(EngineError::NoOpenCell)?,
        };
        let t = cfg.tile_size as f32;
        let pos = Vec2::new((cx as f32 + 0.5) * t, (cy as f32 + 0.5) * t);
        let camera = Camera::new(pos, 0, cfg.eye_height);

        let scene = Scene {
            sprites: level.scaled_sprites(cfg.tile_size),
            map: level.map,
            textures,
            floor_texture: FLOOR_TEXTURE,
            ceiling_texture: CEILING_TEXTURE,
        };
        Self::new(cfg, scene, camera)
    }

    /// Move the camera by one frame of input, then render.
    pub fn frame(&mut self, cmd: &InputCmd) -> &FrameBuffer {
        self.settle_angle();
        self.movement
            .update(&mut self.camera, &self.scene.map, &self.trig, cmd);

        self.frame
            .begin_frame(self.cfg.screen_width, self.cfg.screen_height);
        render_frame(
            &mut self.frame,
            &self.cfg,
            &self.trig,
            &self.scene,
            &self.camera,
            &mut self.depth,
        );
        &self.frame
    }

    /// Render the current view into a caller-owned sink.
    pub fn render_into<S: PixelSink + ?Sized>(&mut self, sink: &mut S) {
        self.settle_angle();
        render_frame(
            sink,
            &self.cfg,
            &self.trig,
            &self.scene,
            &self.camera,
            &mut self.depth,
        );
    }

    /// Fold an angle set through `camera_mut` back into one turn.
    #[inline]
    fn settle_angle(&mut self) {
        self.camera.angle = self.trig.angles.wrap(self.camera.angle as i64);
    }

    /* ---------------------------------------------------------------- */

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn trig(&self) -> &TrigTables {
        &self.trig
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Depth of the last rendered frame.
    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }
}

fn first_open_cell(map: &TileMap) -> Option<(usize, usize)> {
    (0..map.height())
        .flat_map(|y| (0..map.width()).map(move |x| (x, y)))
        .find(|&(x, y)| !map.is_solid(x as i32, y as i32))
}

/// One full frame: walls (filling `depth`), then floor and ceiling around
/// each slice, then sprites tested against `depth`.
pub fn render_frame<S: PixelSink + ?Sized>(
    sink: &mut S,
    cfg: &Config,
    trig: &TrigTables,
    scene: &Scene,
    camera: &Camera,
    depth: &mut DepthBuffer,
) {
    let view = View::new(cfg, trig, camera);
    let cols = view.width.min(sink.width());
    depth.reset(view.width);

    let planes = scene
        .textures
        .texture(scene.floor_texture)
        .ok()
        .zip(scene.textures.texture(scene.ceiling_texture).ok());

    for col in 0..cols {
        let wall = cast_column(&view, &scene.map, &scene.textures, depth, col);
        if let Some((slice, tex)) = &wall {
            draw_slice(sink, col, slice, tex);
        }
        if let Some((floor, ceiling)) = planes {
            let open = open_rows(&view, wall.as_ref().map(|(s, _)| s));
            draw_column(
                sink,
                &view,
                &scene.map,
                col,
                view.cast_angle(col),
                open,
                floor,
                ceiling,
            );
        }
    }

    draw_sprites(sink, &view, &scene.sprites, &scene.textures, depth);
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
