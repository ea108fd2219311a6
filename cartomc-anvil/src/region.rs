use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::{Context, Result};

pub const SECTOR_BYTES: u64 = 4096; // minecraft uses 4096 bytes per sector
pub const HEADER_BYTES: usize = 8192; // header is 8192 bytes (2 sectors)
pub const CHUNKS_PER_REGION: usize = 1024; // 32x32 chunk slots

/// A region file holding up to 32x32 chunks.
///
/// The header's location table is read up front; chunk bodies are read on
/// demand via seek. The handle is stateful and sequential, so one value
/// serves exactly one reader, and the file is closed when it is dropped --
/// on every exit path.
pub struct RegionFile<S> {
    stream: S,
    // One u32 per slot: top 3 bytes sector offset, low byte sector count
    // (unused here). Offset 0 means the chunk was never written.
    locations: [u32; CHUNKS_PER_REGION],
}

/// Raw chunk bytes as stored: still compressed, tagged with the compression
/// scheme (1 = gzip, 2 = zlib, 3 = uncompressed).
pub struct RawChunk {
    pub compression: u8,
    pub data: Vec<u8>,
}

impl RegionFile<File> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening region file {path:?}"))?;
        Self::from_stream(file)
    }
}

impl<S: Read + Seek> RegionFile<S> {
    /// Read the full 8 KiB header. Files shorter than the header are
    /// rejected here; the body is only trusted as far as each read goes.
    pub fn from_stream(mut stream: S) -> Result<Self> {
        let mut header = [0u8; HEADER_BYTES];
        stream
            .read_exact(&mut header)
            .context("region file shorter than its header")?;

        let mut locations = [0u32; CHUNKS_PER_REGION];
        for (i, entry) in locations.iter_mut().enumerate() {
            let raw = &header[i * 4..i * 4 + 4];
            *entry = u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]);
        }
        // Second 4096 bytes are timestamps, unused.

        Ok(Self { stream, locations })
    }

    // 32x32 chunks per region, index from 0 to 1023.
    fn slot(local_x: i32, local_z: i32) -> usize {
        ((local_x & 31) + (local_z & 31) * 32) as usize
    }

    fn sector_offset(&self, local_x: i32, local_z: i32) -> u64 {
        (self.locations[Self::slot(local_x, local_z)] >> 8) as u64
    }

    /// Whether the slot for `(local_x, local_z)` holds chunk data.
    pub fn has_chunk(&self, local_x: i32, local_z: i32) -> bool {
        self.sector_offset(local_x, local_z) != 0
    }

    /// Read the raw compressed chunk at `(local_x, local_z)`, or `None` if
    /// the slot is empty.
    ///
    /// A short read anywhere in the body is an error: once an offset points
    /// past the data we have no way to re-synchronize, so the caller should
    /// abandon the rest of this file.
    pub fn read_chunk(&mut self, local_x: i32, local_z: i32) -> Result<Option<RawChunk>> {
        let offset = self.sector_offset(local_x, local_z);
        if offset == 0 {
            return Ok(None);
        }

        self.stream.seek(SeekFrom::Start(offset * SECTOR_BYTES))?;

        // Chunk header: 4-byte big-endian length (counts the tag byte),
        // then the compression tag itself.
        let mut chunk_header = [0u8; 5];
        self.stream
            .read_exact(&mut chunk_header)
            .context("truncated chunk header")?;
        let length = u32::from_be_bytes([
            chunk_header[0],
            chunk_header[1],
            chunk_header[2],
            chunk_header[3],
        ]);
        let compression = chunk_header[4];

        let mut data = vec![0u8; (length as usize).saturating_sub(1)];
        self.stream
            .read_exact(&mut data)
            .context("truncated chunk body")?;

        Ok(Some(RawChunk { compression, data }))
    }
}
