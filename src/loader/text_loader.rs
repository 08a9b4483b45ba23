// src/loader/text_loader.rs
use crate::error::{MapError, TileError};
use crate::ir_map::*;
use crate::report::{Diagnostic, Reporter};
use macroquad::prelude::*;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

pub const TILE_SIZE_MARKER: &str = "Tile Size:";
pub const COMMENT_MARKER: char = '#';
pub const ENTITY_MARKER: &str = "(entity):";

/// Suffix allowed between a token's closing part and the separator.
const ENTITY_SUFFIX: char = '?';

// Precedence matters: atlas shapes first, or `name(x, y)` would claim
// prefixes of atlas tokens.
static ENTITY_PATTERNS: LazyLock<[(TileShape, Regex); 2]> = LazyLock::new(|| {
    [
        (
            TileShape::AtlasEntity,
            pattern(r"^\(entity\):\s*(?P<name>\w+)->\((?P<id>\d+)\)\((?P<x>\d+),\s*(?P<y>\d+),\s*(?P<w>\d+)x(?P<h>\d+)\)$"),
        ),
        (
            TileShape::PlainEntity,
            pattern(r#"^\(entity\):\s*"(?P<name>[^"]+)"\((?P<x>\d+),\s*(?P<y>\d+)\)\?$"#),
        ),
    ]
});

static TILE_PATTERNS: LazyLock<[(TileShape, Regex); 2]> = LazyLock::new(|| {
    [
        (
            TileShape::AtlasTile,
            pattern(r"^(?P<name>\w+)->\((?P<id>\d+)\)\((?P<x>\d+),\s*(?P<y>\d+)\)$"),
        ),
        (
            TileShape::PlainTile,
            pattern(r"^(?P<name>\w+)\((?P<x>\d+),\s*(?P<y>\d+)\)$"),
        ),
    ]
});

fn pattern(src: &str) -> Regex {
    Regex::new(src).expect("built-in tile pattern must compile")
}

/// Marks where one tile token ends on a line.
///
/// The delimiter is cut after its last `)`: the closing part stays with the
/// token, the separator is dropped. With the default `"), "` the line
/// `a(0, 0), b(1, 0)` yields `a(0, 0)` and `b(1, 0)`. A `?` right after the
/// closing part is kept too, so plain entities can sit mid-line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDelimiter {
    close: String,
    separator: String,
}

impl TileDelimiter {
    /// `None` unless the delimiter has a `)` followed by a non-empty separator.
    pub fn new(delimiter: &str) -> Option<Self> {
        let cut = delimiter.rfind(')')? + 1;
        let (close, separator) = delimiter.split_at(cut);
        if separator.is_empty() {
            return None;
        }
        Some(Self {
            close: close.to_owned(),
            separator: separator.to_owned(),
        })
    }
}

impl Default for TileDelimiter {
    fn default() -> Self {
        Self {
            close: ")".to_owned(),
            separator: ", ".to_owned(),
        }
    }
}

/// Fields captured from one token, before scaling to pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    /// Pattern that matched.
    pub shape: TileShape,
    /// Texture or atlas name, unquoted.
    pub name: String,
    /// Atlas sub-texture index.
    pub texture_id: Option<u32>,
    /// Grid coordinates as written.
    pub grid: UVec2,
    /// `WxH` of atlas entities.
    pub frame_size: Option<UVec2>,
}

impl TokenMatch {
    fn into_record(self, tile_size: TileSize, token: &str) -> Result<TileRecord, TileError> {
        let position = tile_size
            .to_pixels(self.grid.x, self.grid.y)
            .ok_or_else(|| TileError::NumericFieldInvalid {
                field: "position",
                token: token.to_owned(),
            })?;
        let is_entity = matches!(self.shape, TileShape::AtlasEntity | TileShape::PlainEntity);

        Ok(TileRecord {
            texture_name: self.name,
            texture_id: self.texture_id,
            is_entity,
            position,
            grid: self.grid,
            frame_size: self.frame_size,
        })
    }
}

enum Line<'a> {
    Skip,
    Header(&'a str),
    Tiles(&'a str),
}

fn classify_line(raw: &str) -> Line<'_> {
    let line = raw.trim_matches(|c| c == ' ' || c == '\t');
    if line.is_empty() || line.starts_with(COMMENT_MARKER) {
        Line::Skip
    } else if line.contains(TILE_SIZE_MARKER) {
        Line::Header(line)
    } else {
        Line::Tiles(line)
    }
}

/// Parses a `Tile Size: <int>x<int>` line. A trailing `# note` is ignored.
pub fn parse_tile_size(line: &str) -> Result<TileSize, TileError> {
    let malformed = || TileError::MalformedHeader(line.to_owned());

    let (_, value) = line.split_once(TILE_SIZE_MARKER).ok_or_else(malformed)?;
    let value = value.split_once(COMMENT_MARKER).map_or(value, |(v, _)| v);
    let (w, h) = value.trim().split_once('x').ok_or_else(malformed)?;
    let w: u32 = w.trim().parse().map_err(|_| malformed())?;
    let h: u32 = h.trim().parse().map_err(|_| malformed())?;

    TileSize::new(w, h).ok_or_else(malformed)
}

/// Splits one content line into tile tokens, in order.
///
/// Whatever follows the last delimiter is the final token, with or without
/// a trailing delimiter. Empty tokens are dropped.
pub fn split_tokens<'a>(line: &'a str, delimiter: &TileDelimiter) -> Vec<&'a str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut search = 0;

    while let Some(found) = line[search..].find(delimiter.close.as_str()) {
        let close_end = search + found + delimiter.close.len();
        let mut end = close_end;
        if line[end..].starts_with(ENTITY_SUFFIX) {
            end += ENTITY_SUFFIX.len_utf8();
        }

        if line[end..].starts_with(delimiter.separator.as_str()) {
            push_token(&mut tokens, &line[start..end]);
            start = end + delimiter.separator.len();
            search = start;
        } else {
            search = close_end;
        }
    }
    push_token(&mut tokens, &line[start..]);

    tokens
}

fn push_token<'a>(tokens: &mut Vec<&'a str>, raw: &'a str) {
    let token = raw.trim();
    if !token.is_empty() {
        tokens.push(token);
    }
}

/// Matches one token against the known shapes, first match wins.
pub fn classify_token(token: &str) -> Result<TokenMatch, TileError> {
    let body = token.trim().trim_end_matches(',').trim_end();

    let candidates = if body.contains(ENTITY_MARKER) {
        &*ENTITY_PATTERNS
    } else {
        &*TILE_PATTERNS
    };

    for (shape, regex) in candidates {
        if let Some(caps) = regex.captures(body) {
            return token_match(*shape, &caps, token);
        }
    }

    Err(TileError::UnrecognizedToken(token.to_owned()))
}

fn token_match(shape: TileShape, caps: &Captures<'_>, token: &str) -> Result<TokenMatch, TileError> {
    let number = |field: &'static str| -> Result<Option<u32>, TileError> {
        caps.name(field)
            .map(|m| {
                m.as_str().parse::<u32>().map_err(|_| TileError::NumericFieldInvalid {
                    field,
                    token: token.to_owned(),
                })
            })
            .transpose()
    };

    let x = number("x")?.unwrap_or_default();
    let y = number("y")?.unwrap_or_default();
    let frame_size = match (number("w")?, number("h")?) {
        (Some(w), Some(h)) => Some(uvec2(w, h)),
        _ => None,
    };

    Ok(TokenMatch {
        shape,
        name: caps["name"].to_owned(),
        texture_id: number("id")?,
        grid: uvec2(x, y),
        frame_size,
    })
}

/// Decodes map text into records.
///
/// Runs in two passes: the first finds the tile size, the second converts
/// tile lines. A header may therefore sit anywhere in the file. Problems
/// with single lines or tokens go to `reporter`; the rest of the map is
/// still decoded.
pub fn parse_map_str(
    source: &str,
    delimiter: &TileDelimiter,
    mut reporter: impl Reporter,
) -> IrMap {
    let lines: Vec<(usize, Line<'_>)> = source
        .lines()
        .enumerate()
        .map(|(i, raw)| (i + 1, classify_line(raw)))
        .collect();

    let mut tile_size: Option<TileSize> = None;
    for (line_no, line) in &lines {
        let Line::Header(text) = line else { continue };
        match (parse_tile_size(text), tile_size) {
            (Ok(size), None) => tile_size = Some(size),
            (Ok(size), Some(first)) if size != first => reporter.report(Diagnostic {
                line: *line_no,
                error: TileError::DuplicateHeader {
                    first: first.to_string(),
                    ignored: (*text).to_owned(),
                },
            }),
            (Ok(_), Some(_)) => {}
            (Err(error), _) => reporter.report(Diagnostic {
                line: *line_no,
                error,
            }),
        }
    }

    let mut tiles = Vec::new();
    for (line_no, line) in &lines {
        let Line::Tiles(text) = line else { continue };
        let Some(size) = tile_size else {
            reporter.report(Diagnostic {
                line: *line_no,
                error: TileError::MissingTileSize((*text).to_owned()),
            });
            continue;
        };

        for token in split_tokens(text, delimiter) {
            match classify_token(token).and_then(|m| m.into_record(size, token)) {
                Ok(record) => tiles.push(record),
                Err(error) => reporter.report(Diagnostic {
                    line: *line_no,
                    error,
                }),
            }
        }
    }

    debug!(
        lines = lines.len(),
        tiles = tiles.len(),
        tile_size = ?tile_size,
        "decoded map text"
    );

    IrMap { tile_size, tiles }
}

/// Reads and decodes a map file. Returns the records and the directory the
/// map lives in, for resolving texture names.
pub fn decode_map_file_to_ir(
    path: &Path,
    delimiter: &TileDelimiter,
    reporter: impl Reporter,
) -> Result<(IrMap, PathBuf), MapError> {
    let bytes = std::fs::read(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let txt = String::from_utf8(bytes).map_err(|err| {
        MapError::InvalidMap(format!("{} is not UTF-8 text: {err}", path.display()))
    })?;

    debug!(path = %path.display(), bytes = txt.len(), "read map file");

    let map_dir = path
        .parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"));

    Ok((parse_map_str(&txt, delimiter, reporter), map_dir))
}
