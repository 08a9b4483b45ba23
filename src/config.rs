use crate::error::MapError;
use macroquad::prelude::Conf;
use serde::Deserialize;
use std::path::Path;

/// Game settings, read from a JSON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window caption.
    pub window_title: String,
    /// Initial window width in pixels.
    pub window_width: i32,
    /// Initial window height in pixels.
    pub window_height: i32,
    /// Map file, relative to the config file's directory.
    pub map: String,
    /// See [`crate::TileDelimiter`].
    pub tile_delimiter: String,
    /// Player spawn and movement.
    pub player: PlayerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "Town Game".to_owned(),
            window_width: 800,
            window_height: 600,
            map: "Assets/Maps/default.map".to_owned(),
            tile_delimiter: "), ".to_owned(),
            player: PlayerConfig::default(),
        }
    }
}

/// Movement and sprite settings for the player.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn position in pixels.
    pub start: [f32; 2],
    /// Pixels per second, per axis.
    pub max_speed: f32,
    /// Pixels per second squared while a key is held.
    pub acceleration: f32,
    /// Pixels per second squared, always applied toward rest.
    pub friction: f32,
    /// Sprite sheet cell size in pixels.
    pub frame_size: [u32; 2],
    /// Seconds per animation frame.
    pub frame_time: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: [400.0, 300.0],
            max_speed: 200.0,
            acceleration: 500.0,
            friction: 300.0,
            frame_size: [32, 32],
            frame_time: 0.18,
        }
    }
}

impl GameConfig {
    /// Reads and decodes a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&txt).map_err(|source| MapError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Decodes config text; missing fields take their defaults.
    pub fn from_json(txt: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(txt)
    }

    /// Window settings for `#[macroquad::main(...)]`.
    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: self.window_title.clone(),
            window_width: self.window_width,
            window_height: self.window_height,
            ..Default::default()
        }
    }
}
