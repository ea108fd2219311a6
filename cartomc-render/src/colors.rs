//! Block color lookup.
//!
//! The table is precomputed offline from game assets and shipped as JSON:
//! `{"blocks": {"stone": {"r": 116, "g": 116, "b": 116, "a": 255}, ...}}`.
//! Keys are short names, without the namespace prefix.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Magenta, so unmapped blocks stay visible in the output instead of
/// blending in.
pub const UNKNOWN_COLOR: Rgb = Rgb {
    r: 255,
    g: 0,
    b: 255,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Deserialize)]
struct TableEntry {
    r: u8,
    g: u8,
    b: u8,
    // Alpha is carried by the artifact but the map is drawn fully opaque.
    #[serde(default, rename = "a")]
    _a: Option<u8>,
}

#[derive(Deserialize)]
struct ColorTableFile {
    blocks: HashMap<String, TableEntry>,
}

pub struct BlockColors {
    blocks: HashMap<String, Rgb>,
}

impl BlockColors {
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening block color table {path:?}"))?;
        let table: ColorTableFile =
            serde_json::from_reader(BufReader::new(file)).context("malformed block color table")?;
        let blocks = table
            .blocks
            .into_iter()
            .map(|(name, c)| (name, Rgb { r: c.r, g: c.g, b: c.b }))
            .collect();
        Ok(Self { blocks })
    }

    #[cfg(test)]
    pub fn from_entries(entries: &[(&str, Rgb)]) -> Self {
        Self {
            blocks: entries
                .iter()
                .map(|(name, color)| (name.to_string(), *color))
                .collect(),
        }
    }

    /// Resolve a block id to its map color. Total: unknown blocks get the
    /// magenta sentinel.
    pub fn resolve(&self, block_id: &str) -> Rgb {
        self.blocks
            .get(normalize(block_id))
            .copied()
            .unwrap_or(UNKNOWN_COLOR)
    }
}

/// Strip state properties (`grass_block[snowy=true]`) and the namespace
/// prefix (`minecraft:`) to match the table's short names.
fn normalize(block_id: &str) -> &str {
    let base = block_id.split('[').next().unwrap_or(block_id);
    match base.split_once(':') {
        Some((_namespace, short)) => short,
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STONE: Rgb = Rgb {
        r: 116,
        g: 116,
        b: 116,
    };

    fn table() -> BlockColors {
        BlockColors::from_entries(&[("stone", STONE), ("grass_block", Rgb { r: 80, g: 120, b: 40 })])
    }

    #[test]
    fn unknown_block_is_magenta() {
        let colors = table();
        assert_eq!(
            colors.resolve("unknown_material"),
            Rgb { r: 255, g: 0, b: 255 }
        );
    }

    #[test]
    fn strips_namespace_prefix() {
        assert_eq!(table().resolve("minecraft:stone"), STONE);
        assert_eq!(table().resolve("stone"), STONE);
    }

    #[test]
    fn strips_state_properties() {
        let colors = table();
        assert_eq!(
            colors.resolve("minecraft:grass_block[snowy=true]"),
            Rgb { r: 80, g: 120, b: 40 }
        );
    }
}
