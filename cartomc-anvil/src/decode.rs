use std::io::Read;

use anyhow::{Context, Result, bail};
use flate2::read::{GzDecoder, ZlibDecoder};

use crate::chunk::ChunkRoot;
use crate::region::RawChunk;

/// Decompress a raw chunk per its compression tag and parse the NBT tree.
///
/// Tags: 1 = gzip, 2 = zlib, 3 = uncompressed. Anything else (including the
/// newer lz4 tag) is rejected; the caller skips the chunk.
pub fn decode_chunk(raw: &RawChunk) -> Result<ChunkRoot> {
    let nbt = match raw.compression {
        1 => {
            let mut buf = Vec::new();
            GzDecoder::new(raw.data.as_slice())
                .read_to_end(&mut buf)
                .context("gzip decompression failed")?;
            buf
        }
        2 => {
            let mut buf = Vec::new();
            ZlibDecoder::new(raw.data.as_slice())
                .read_to_end(&mut buf)
                .context("zlib decompression failed")?;
            buf
        }
        3 => raw.data.clone(),
        tag => bail!("unsupported compression type {tag}"),
    };

    fastnbt::from_bytes(&nbt).context("malformed chunk NBT")
}
