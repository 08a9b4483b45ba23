// tests/integration_example.rs

use std::path::PathBuf;
use town_map::{Level, MoveInput, TileShape};

#[test]
fn example_level_loads() -> anyhow::Result<()> {
    let mut config = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    config.push("assets");
    config.push("town.json");

    let mut level = Level::load(&config)?;
    assert_eq!(level.map.tiles().len(), 14);
    assert_eq!(level.map.entities().count(), 2);
    assert_eq!(level.map.tiles()[13].shape(), TileShape::PlainEntity);
    assert_eq!(level.config.window_conf().window_title, "Town Game");

    let start = level.player.position;
    level.update(MoveInput { down: true, ..Default::default() }, 0.1);
    assert!(level.player.position.y > start.y);
    Ok(())
}
