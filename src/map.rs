use crate::error::MapError;
use crate::ir_map::*;
use crate::loader::text_loader::*;
use crate::report::{Reporter, TracingReporter};
use macroquad::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// A decoded level layout.
///
/// Records are kept in source order, which is also the draw order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    /// Size from the `Tile Size:` header, if one was valid.
    pub tile_size: Option<TileSize>,
    tiles: Vec<TileRecord>,
    /// Directory the map was loaded from; texture names resolve against it.
    pub base_dir: PathBuf,
}

impl Map {
    /// Loads a map with the default `"), "` delimiter, logging skipped
    /// entries through `tracing`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        Self::load_with(path, &TileDelimiter::default(), TracingReporter)
    }

    /// Loads a map with an explicit delimiter and diagnostics sink.
    pub fn load_with(
        path: impl AsRef<Path>,
        delimiter: &TileDelimiter,
        reporter: impl Reporter,
    ) -> Result<Self, MapError> {
        let path = path.as_ref();
        let (ir, base_dir) = decode_map_file_to_ir(path, delimiter, reporter)?;
        let map = Self::from_ir(ir, base_dir);

        info!(
            path = %path.display(),
            tiles = map.tiles.len(),
            entities = map.entities().count(),
            tile_size = %map.tile_size.map(|t| t.to_string()).unwrap_or_else(|| "unset".into()),
            "loaded map"
        );
        Ok(map)
    }

    /// Decodes in-memory map text; texture names resolve against `./`.
    pub fn parse(source: &str) -> Self {
        let ir = parse_map_str(source, &TileDelimiter::default(), TracingReporter);
        Self::from_ir(ir, PathBuf::from("./"))
    }

    /// Wraps decoded records; `base_dir` is where the map file lives.
    pub fn from_ir(ir: IrMap, base_dir: PathBuf) -> Self {
        Self {
            tile_size: ir.tile_size,
            tiles: ir.tiles,
            base_dir,
        }
    }

    /// All records in draw order.
    pub fn tiles(&self) -> &[TileRecord] {
        &self.tiles
    }

    /// Dynamic objects, in source order.
    pub fn entities(&self) -> impl Iterator<Item = &TileRecord> {
        self.tiles.iter().filter(|t| t.is_entity)
    }

    /// Static tiles, in source order.
    pub fn background(&self) -> impl Iterator<Item = &TileRecord> {
        self.tiles.iter().filter(|t| !t.is_entity)
    }

    /// Records drawn from the atlas called `name`.
    pub fn atlas_tiles<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TileRecord> + 'a {
        self.tiles
            .iter()
            .filter(move |t| t.using_texture_atlas() && t.texture_name == name)
    }

    /// Pixel rectangle covering every record, one tile-size cell per record.
    /// `None` for an empty map.
    pub fn bounds(&self) -> Option<Rect> {
        let ts = self.tile_size?;
        let first = self.tiles.first()?.position;

        let (min, max) = self
            .tiles
            .iter()
            .fold((first, first), |(lo, hi), t| (lo.min(t.position), hi.max(t.position)));

        Some(Rect::new(
            min.x as f32,
            min.y as f32,
            (max.x - min.x) as f32 + ts.width as f32,
            (max.y - min.y) as f32 + ts.height as f32,
        ))
    }

    /// Consumes the map, keeping only its records.
    pub fn into_tiles(self) -> Vec<TileRecord> {
        self.tiles
    }
}

/// Map text covering a `grid_w` by `grid_h` area with one plain texture.
pub fn flat_map_source(texture: &str, grid_w: u32, grid_h: u32, tile_size: TileSize) -> String {
    let mut out = String::from("# All lines beginning with # will be ignored.\n");
    out.push_str(&format!("# Flat {texture} map, {grid_w}x{grid_h} cells\n\n"));
    out.push_str(&format!("{TILE_SIZE_MARKER} {tile_size}\n"));

    for y in 0..grid_h {
        let row: Vec<String> = (0..grid_w).map(|x| format!("{texture}({x}, {y})")).collect();
        out.push_str(&row.join(", "));
        out.push('\n');
    }
    out
}

/// Writes [`flat_map_source`] to `path`.
pub fn write_flat_map(
    path: impl AsRef<Path>,
    texture: &str,
    grid_w: u32,
    grid_h: u32,
    tile_size: TileSize,
) -> Result<(), MapError> {
    let path = path.as_ref();
    std::fs::write(path, flat_map_source(texture, grid_w, grid_h, tile_size)).map_err(|source| {
        MapError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(path = %path.display(), grid_w, grid_h, "wrote flat map");
    Ok(())
}
