//! Topmost-block lookup for a single world column.

use std::cmp::Reverse;

use crate::chunk::ChunkRoot;
use crate::packed::{bits_per_block, unpack};

pub const AIR: &str = "minecraft:air";
const CAVE_AIR: &str = "minecraft:cave_air";

fn is_air(name: &str) -> bool {
    name == AIR || name == CAVE_AIR
}

/// Result of a column scan. `corrupt_indices` counts packed values that fell
/// outside the palette; those positions were read as air.
pub struct SurfaceSample<'a> {
    pub block: &'a str,
    pub corrupt_indices: u32,
}

/// Find the topmost non-air block at chunk-local `(local_x, local_z)`.
///
/// Sections are scanned from the highest Y index down (they are not sorted
/// on disk), and within each section from y 15 down to 0, so the first hit
/// is the visible surface. Sections without block states, empty palettes and
/// out-of-range palette indices all read as air; a section with a single
/// palette entry applies it to every position without consulting the packed
/// data.
pub fn top_block<'a>(chunk: &'a ChunkRoot, local_x: usize, local_z: usize) -> SurfaceSample<'a> {
    let mut sections: Vec<_> = chunk.sections.iter().collect();
    sections.sort_by_key(|s| Reverse(s.y));

    let mut corrupt_indices = 0u32;

    for section in sections {
        let Some(states) = &section.block_states else {
            continue;
        };
        let palette = &states.palette;
        if palette.is_empty() {
            continue;
        }

        if palette.len() == 1 {
            let name = palette[0].name.as_str();
            if !is_air(name) {
                return SurfaceSample {
                    block: name,
                    corrupt_indices,
                };
            }
            continue;
        }

        // Missing data with a multi-entry palette reads as all zeroes,
        // i.e. the first palette entry everywhere.
        let words: &[i64] = match &states.data {
            Some(data) => data,
            None => &[],
        };
        let bits = bits_per_block(palette.len());

        for y in (0..16).rev() {
            let position = y * 256 + local_z * 16 + local_x;
            let palette_index = unpack(words, position, bits) as usize;
            match palette.get(palette_index) {
                Some(entry) if !is_air(&entry.name) => {
                    return SurfaceSample {
                        block: &entry.name,
                        corrupt_indices,
                    };
                }
                Some(_) => {}
                None => corrupt_indices += 1,
            }
        }
    }

    SurfaceSample {
        block: AIR,
        corrupt_indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{BlockStates, PaletteEntry, Section};

    fn entry(name: &str) -> PaletteEntry {
        PaletteEntry {
            name: name.to_string(),
        }
    }

    fn uniform_section(y: i8, name: &str) -> Section {
        Section {
            y,
            block_states: Some(BlockStates {
                palette: vec![entry(name)],
                data: None,
            }),
        }
    }

    // Pack one palette index per position, mirroring the on-disk layout.
    fn pack(indices: &[usize], bits: u32) -> fastnbt::LongArray {
        let per_word = (64 / bits) as usize;
        let mut words = vec![0u64; indices.len().div_ceil(per_word)];
        for (i, &idx) in indices.iter().enumerate() {
            words[i / per_word] |= (idx as u64) << ((i % per_word) as u32 * bits);
        }
        fastnbt::LongArray::new(words.into_iter().map(|w| w as i64).collect())
    }

    fn chunk_of(sections: Vec<Section>) -> ChunkRoot {
        ChunkRoot {
            data_version: None,
            x_pos: None,
            z_pos: None,
            sections,
        }
    }

    #[test]
    fn single_entry_palette_ignores_packed_data() {
        let mut section = uniform_section(0, "minecraft:stone");
        // Garbage data must not be consulted when the palette is singular.
        section.block_states.as_mut().unwrap().data =
            Some(fastnbt::LongArray::new(vec![-1; 256]));
        let chunk = chunk_of(vec![section]);

        for z in 0..16 {
            for x in 0..16 {
                assert_eq!(top_block(&chunk, x, z).block, "minecraft:stone");
            }
        }
    }

    #[test]
    fn higher_section_wins_regardless_of_input_order() {
        // Lower grass listed first; the air section above must be scanned
        // first and skipped.
        let chunk = chunk_of(vec![
            uniform_section(2, "minecraft:grass_block"),
            uniform_section(5, "minecraft:air"),
        ]);
        for z in 0..16 {
            for x in 0..16 {
                assert_eq!(top_block(&chunk, x, z).block, "minecraft:grass_block");
            }
        }
    }

    #[test]
    fn picks_highest_non_air_block_within_a_section() {
        // Palette: air, stone, dirt. Column (3, 5): dirt at y 2, stone at
        // y 7, air above.
        let mut indices = vec![0usize; 4096];
        indices[2 * 256 + 5 * 16 + 3] = 2;
        indices[7 * 256 + 5 * 16 + 3] = 1;
        let chunk = chunk_of(vec![Section {
            y: 0,
            block_states: Some(BlockStates {
                palette: vec![
                    entry("minecraft:air"),
                    entry("minecraft:stone"),
                    entry("minecraft:dirt"),
                ],
                data: Some(pack(&indices, 4)),
            }),
        }]);

        assert_eq!(top_block(&chunk, 3, 5).block, "minecraft:stone");
        assert_eq!(top_block(&chunk, 0, 0).block, AIR);
    }

    #[test]
    fn cave_air_is_air() {
        let chunk = chunk_of(vec![
            uniform_section(1, "minecraft:cave_air"),
            uniform_section(0, "minecraft:deepslate"),
        ]);
        assert_eq!(top_block(&chunk, 8, 8).block, "minecraft:deepslate");
    }

    #[test]
    fn out_of_range_index_reads_as_air_and_is_counted() {
        // Two-entry palette but every position packed as index 7.
        let indices = vec![7usize; 4096];
        let chunk = chunk_of(vec![Section {
            y: 0,
            block_states: Some(BlockStates {
                palette: vec![entry("minecraft:air"), entry("minecraft:stone")],
                data: Some(pack(&indices, 4)),
            }),
        }]);

        let sample = top_block(&chunk, 0, 0);
        assert_eq!(sample.block, AIR);
        assert_eq!(sample.corrupt_indices, 16);
    }

    #[test]
    fn truncated_data_reads_as_first_palette_entry() {
        // Multi-entry palette with no data at all: every position unpacks
        // to 0.
        let chunk = chunk_of(vec![Section {
            y: 0,
            block_states: Some(BlockStates {
                palette: vec![entry("minecraft:bedrock"), entry("minecraft:stone")],
                data: None,
            }),
        }]);
        assert_eq!(top_block(&chunk, 4, 4).block, "minecraft:bedrock");
    }

    #[test]
    fn sectionless_chunk_is_air() {
        let chunk = chunk_of(vec![]);
        let sample = top_block(&chunk, 0, 0);
        assert_eq!(sample.block, AIR);
        assert_eq!(sample.corrupt_indices, 0);
    }
}
