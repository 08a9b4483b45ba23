// src/ir_map.rs
use macroquad::prelude::*;
use std::fmt;

/// Pixel size of one grid cell. Both sides are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSize {
    /// Cell width in pixels.
    pub width: u32,
    /// Cell height in pixels.
    pub height: u32,
}

impl TileSize {
    /// Returns `None` when either side is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// Scales grid coordinates to pixels, `None` on `i32` overflow.
    pub fn to_pixels(self, gx: u32, gy: u32) -> Option<IVec2> {
        let x = gx.checked_mul(self.width)?;
        let y = gy.checked_mul(self.height)?;
        Some(ivec2(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The four record shapes a token can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileShape {
    /// `(entity): name->(id)(x,y,WxH)`
    AtlasEntity,
    /// `(entity): "name"(x,y)?`
    PlainEntity,
    /// `name->(id)(x,y)`
    AtlasTile,
    /// `name(x, y)`
    PlainTile,
}

/// One placed tile or entity, in pixel space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    /// Atlas name, or the standalone texture name.
    pub texture_name: String,
    /// Sub-texture index; present exactly when the record uses an atlas.
    pub texture_id: Option<u32>,
    /// Dynamic object rather than static background.
    pub is_entity: bool,
    /// Grid coordinates scaled by the map's [`TileSize`].
    pub position: IVec2,
    /// Unscaled grid coordinates.
    pub grid: UVec2,
    /// Inner frame size of atlas entities (`WxH`).
    pub frame_size: Option<UVec2>,
}

impl TileRecord {
    /// Whether the record draws a sub-texture of an atlas.
    #[inline]
    pub fn using_texture_atlas(&self) -> bool {
        self.texture_id.is_some()
    }

    /// Token shape the record was decoded from.
    pub fn shape(&self) -> TileShape {
        match (self.is_entity, self.using_texture_atlas()) {
            (true, true) => TileShape::AtlasEntity,
            (true, false) => TileShape::PlainEntity,
            (false, true) => TileShape::AtlasTile,
            (false, false) => TileShape::PlainTile,
        }
    }
}

/// Canonical result of decoding one map description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrMap {
    /// `None` when the source had no valid `Tile Size:` header.
    pub tile_size: Option<TileSize>,
    /// Records in source order: line, then left to right.
    pub tiles: Vec<TileRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_tiles_are_rejected() {
        assert_eq!(TileSize::new(0, 16), None);
        assert_eq!(TileSize::new(16, 0), None);
        assert!(TileSize::new(1, 1).is_some());
    }

    #[test]
    fn to_pixels_detects_overflow() {
        let ts = TileSize::new(32, 16).unwrap();
        assert_eq!(ts.to_pixels(2, 1), Some(ivec2(64, 16)));
        assert_eq!(ts.to_pixels(u32::MAX, 0), None);
        assert_eq!(ts.to_pixels(i32::MAX as u32 / 32 + 1, 0), None);
    }

    #[test]
    fn shape_follows_flags() {
        let mut rec = TileRecord {
            texture_name: "grass".into(),
            texture_id: None,
            is_entity: false,
            position: IVec2::ZERO,
            grid: UVec2::ZERO,
            frame_size: None,
        };
        assert_eq!(rec.shape(), TileShape::PlainTile);
        rec.texture_id = Some(3);
        assert_eq!(rec.shape(), TileShape::AtlasTile);
        rec.is_entity = true;
        assert_eq!(rec.shape(), TileShape::AtlasEntity);
        rec.texture_id = None;
        assert_eq!(rec.shape(), TileShape::PlainEntity);
    }
}
