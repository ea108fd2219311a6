//! Reading side of the Minecraft anvil world format.
//!
//! A region file (`r.X.Z.mca`) holds up to 32x32 chunks behind an offset
//! table. Chunks are stored compressed as NBT; block contents are palette
//! indices packed into 64-bit longs.

pub mod chunk;
pub mod decode;
pub mod packed;
pub mod region;
pub mod surface;

pub use chunk::{BlockStates, ChunkRoot, PaletteEntry, Section};
pub use decode::decode_chunk;
pub use region::{RawChunk, RegionFile};
pub use surface::{SurfaceSample, top_block};
