// tests/load_tests.rs

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use town_map::{write_flat_map, Diagnostic, Level, Map, MapError, TileDelimiter, TileError, TileSize};

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("town_map_{tag}_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

#[test]
fn integration_load_from_file_and_str() {
    let src = "Tile Size: 4x4\nsand(1, 2)\n";
    let map = Map::parse(src);
    assert_eq!(map.tiles()[0].position.to_array(), [4, 8]);

    let dir = temp_dir("file_and_str");
    let path = dir.join("small.map");
    fs::write(&path, src).unwrap();
    let map2 = Map::load(&path).unwrap();
    assert_eq!(map2.tile_size, TileSize::new(4, 4));
    assert_eq!(map2.tiles(), map.tiles());
    assert_eq!(map2.base_dir, dir);
    fs::remove_file(&path).unwrap();
}

#[test]
fn integration_missing_file_is_io_error() {
    let err = Map::load("definitely/not/here.map").unwrap_err();
    match err {
        MapError::Io { path, .. } => assert_eq!(path, PathBuf::from("definitely/not/here.map")),
        other => panic!("expected Io, got {:?}", other),
    }
}

#[test]
fn diagnostics_carry_line_numbers() {
    let dir = temp_dir("diagnostics");
    let path = dir.join("broken.map");
    fs::write(&path, "Tile Size: 8x8\n\ngrass(0, 0), oops, grass(1, 0)\n").unwrap();

    let mut diags: Vec<Diagnostic> = Vec::new();
    let map = Map::load_with(&path, &TileDelimiter::default(), &mut diags).unwrap();
    assert_eq!(map.tiles().len(), 1);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].line, 3);
    assert!(matches!(diags[0].error, TileError::UnrecognizedToken(_)));
}

#[test]
fn generated_flat_map_loads_back() {
    let dir = temp_dir("flat");
    let path = dir.join("default.map");
    write_flat_map(&path, "grass", 50, 38, TileSize::new(16, 16).unwrap()).unwrap();

    let map = Map::load(&path).unwrap();
    assert_eq!(map.tiles().len(), 50 * 38);
    let last = map.tiles().last().unwrap();
    assert_eq!(last.position.to_array(), [49 * 16, 37 * 16]);
    let b = map.bounds().unwrap();
    assert_eq!((b.w, b.h), (800.0, 608.0));
}

#[test]
fn level_rejects_map_without_header() {
    let dir = temp_dir("no_header");
    fs::write(dir.join("level.map"), "grass(0, 0)\n").unwrap();
    fs::write(dir.join("game.json"), r#"{ "map": "level.map" }"#).unwrap();

    let err = Level::load(dir.join("game.json")).err().expect("expected load error");
    assert!(err.to_string().contains("tile size"), "{err}");
}

#[test]
fn level_rejects_bad_delimiter() {
    let dir = temp_dir("bad_delim");
    fs::write(dir.join("level.map"), "Tile Size: 8x8\ngrass(0, 0)\n").unwrap();
    fs::write(dir.join("game.json"), r#"{ "map": "level.map", "tile_delimiter": ", " }"#).unwrap();

    let err = Level::load(dir.join("game.json")).err().expect("expected load error");
    assert!(format!("{err:#}").contains("delimiter"));
}
