#![warn(missing_docs)]

//! Text tile-map loader for a small Macroquad town game, plus the player
//! movement and sprite animation that run on top of it.

mod assets;
mod config;
mod error;
mod ir_map;
mod level;
mod loader {
    pub mod text_loader;
}
mod map;
mod player;
mod report;
mod sprite;

pub use assets::AssetPaths;
pub use config::{GameConfig, PlayerConfig};
pub use error::{MapError, TileError};
pub use ir_map::{IrMap, TileRecord, TileShape, TileSize};
pub use level::Level;
pub use loader::text_loader::{
    classify_token, decode_map_file_to_ir, parse_map_str, parse_tile_size, split_tokens,
    TileDelimiter, TokenMatch,
};
pub use map::{flat_map_source, write_flat_map, Map};
pub use player::{Direction, MoveInput, Player};
pub use report::{Diagnostic, Reporter, TracingReporter};
pub use sprite::{lerp, SpriteAnimator};
