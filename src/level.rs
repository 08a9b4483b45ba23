use crate::assets::AssetPaths;
use crate::config::GameConfig;
use crate::loader::text_loader::TileDelimiter;
use crate::map::Map;
use crate::player::{MoveInput, Player};
use crate::report::TracingReporter;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything needed to run one level: settings, map and player.
pub struct Level {
    /// Settings the level was built from.
    pub config: GameConfig,
    /// Asset root, the config file's directory for [`Level::load`].
    pub assets: AssetPaths,
    /// Decoded map; always has a tile size.
    pub map: Map,
    /// Player spawned from `config.player`.
    pub player: Player,
}

impl Level {
    /// Reads the config at `config_path`, then the map it names (relative
    /// to the config's directory).
    pub fn load(config_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = config_path.as_ref();
        let config = GameConfig::load(config_path)
            .with_context(|| format!("Loading config {}", config_path.display()))?;

        let root = config_path
            .parent()
            .map(|d| d.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./"));
        Self::from_config(config, AssetPaths::new(root))
    }

    /// Builds a level from settings already in memory.
    pub fn from_config(config: GameConfig, assets: AssetPaths) -> anyhow::Result<Self> {
        let delimiter = TileDelimiter::new(&config.tile_delimiter)
            .with_context(|| format!("Invalid tile delimiter {:?}", config.tile_delimiter))?;

        let map_path = assets.resolve(&config.map);
        debug!(path = %map_path.display(), "loading level map");
        let map = Map::load_with(&map_path, &delimiter, TracingReporter)
            .with_context(|| format!("Loading map {}", map_path.display()))?;
        if map.tile_size.is_none() {
            anyhow::bail!("Map {} has no valid tile size header", map_path.display());
        }

        let player = Player::new(&config.player);

        Ok(Self {
            config,
            assets,
            map,
            player,
        })
    }

    /// One simulation step of `dt` seconds.
    pub fn update(&mut self, input: MoveInput, dt: f32) {
        self.player.update(input, dt);
    }
}
