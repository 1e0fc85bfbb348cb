mod camera;
mod level;
mod map;
mod patterns;
mod texture;

pub use camera::Camera;

pub use level::{Level, LevelError, SPRITE_TEXTURE_BASE, Sprite};

pub use map::{EMPTY, MapError, TileId, TileMap};

pub use patterns::{CEILING_TEXTURE, FLOOR_TEXTURE};

pub use texture::{PACK_MAGIC, Texture, TextureBank, TextureError, TextureId};
