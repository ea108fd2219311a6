use serde::{Deserialize, Serialize};

/// Root of the chunk NBT hierarchy as stored in .mca files.
///
/// Only the fields the renderer needs are modeled; everything else in the
/// compound (heightmaps, entities, lighting) is ignored by serde.
#[derive(Serialize, Deserialize, Debug)]
pub struct ChunkRoot {
    #[serde(rename = "DataVersion", default, skip_serializing_if = "Option::is_none")]
    pub data_version: Option<i32>,
    #[serde(rename = "xPos", default, skip_serializing_if = "Option::is_none")]
    pub x_pos: Option<i32>,
    #[serde(rename = "zPos", default, skip_serializing_if = "Option::is_none")]
    pub z_pos: Option<i32>,
    // Not guaranteed to be sorted on disk.
    #[serde(rename = "sections", default)]
    pub sections: Vec<Section>,
}

// --- Section (16x16x16 cube) ---
#[derive(Serialize, Deserialize, Debug)]
pub struct Section {
    // Vertical index of this section (e.g. -4 for the bottom, up to 19).
    // Capitalization varies between data versions.
    #[serde(rename = "Y", alias = "y")]
    pub y: i8,
    // Empty sections omit this entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_states: Option<BlockStates>,
}

// --- Block palette ---
// Paletted storage: a list of unique blocks plus packed indices into it.
#[derive(Serialize, Deserialize, Debug)]
pub struct BlockStates {
    pub palette: Vec<PaletteEntry>,
    // Packed palette indices, one per position. Omitted when the palette has
    // a single entry. fastnbt::LongArray keeps the full 64-bit pattern; the
    // unpacker reinterprets it as unsigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<fastnbt::LongArray>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PaletteEntry {
    #[serde(rename = "Name")]
    pub name: String,
    // Properties (waterlogged, facing, ...) are irrelevant to a top-down map.
}
