//! Region-walking orchestration: world rectangle in, PNG + stats out.

use std::path::Path;

use anyhow::{Result, bail};
use log::{debug, info, warn};

use cartomc_anvil::region::CHUNKS_PER_REGION;
use cartomc_anvil::{RegionFile, decode_chunk, top_block};

use crate::area::RenderArea;
use crate::canvas::MapCanvas;
use crate::colors::BlockColors;
use crate::stats::RenderStats;

/// Render every column of `area` from the region files in `region_dir` and
/// write the finished PNG to `output`.
///
/// Missing region files and undecodable chunks are absorbed into the skip
/// counters; only a missing region directory or an unwritable output aborts
/// the run.
pub fn render_world_map(
    region_dir: &Path,
    area: &RenderArea,
    colors: &BlockColors,
    output: &Path,
) -> Result<RenderStats> {
    if !region_dir.is_dir() {
        bail!("region directory {region_dir:?} does not exist");
    }

    let mut canvas = MapCanvas::new(*area);
    let mut stats = RenderStats::new();

    // 16 blocks per chunk, 32 chunks per region; max bound is exclusive.
    let min_chunk_x = area.min_x.div_euclid(16);
    let max_chunk_x = (area.max_x - 1).div_euclid(16);
    let min_chunk_z = area.min_z.div_euclid(16);
    let max_chunk_z = (area.max_z - 1).div_euclid(16);

    let min_region_x = min_chunk_x.div_euclid(32);
    let max_region_x = max_chunk_x.div_euclid(32);
    let min_region_z = min_chunk_z.div_euclid(32);
    let max_region_z = max_chunk_z.div_euclid(32);

    let region_count =
        (max_region_x - min_region_x + 1) as u64 * (max_region_z - min_region_z + 1) as u64;
    info!("processing {region_count} region files");

    for region_z in min_region_z..=max_region_z {
        for region_x in min_region_x..=max_region_x {
            let path = region_dir.join(format!("r.{region_x}.{region_z}.mca"));
            if !path.is_file() {
                debug!("no region file at {path:?}");
                stats.record_skipped(CHUNKS_PER_REGION as u64);
                continue;
            }

            info!("processing r.{region_x}.{region_z}.mca");
            let mut region = match RegionFile::open(&path) {
                Ok(region) => region,
                Err(err) => {
                    warn!("skipping {path:?}: {err:#}");
                    stats.record_skipped(CHUNKS_PER_REGION as u64);
                    continue;
                }
            };

            render_region(
                &mut region, region_x, region_z, area, colors, &mut canvas, &mut stats,
            );
            // The file handle drops here, even if the region was abandoned.
        }
    }

    info!("writing {output:?}");
    canvas.save(output)?;

    Ok(stats)
}

/// Walk all 1024 slots of one open region. An I/O error abandons the file:
/// offsets can no longer be trusted, so every slot not yet visited counts
/// as skipped.
fn render_region<S: std::io::Read + std::io::Seek>(
    region: &mut RegionFile<S>,
    region_x: i32,
    region_z: i32,
    area: &RenderArea,
    colors: &BlockColors,
    canvas: &mut MapCanvas,
    stats: &mut RenderStats,
) {
    let mut visited = 0u64;

    'region: for local_z in 0..32 {
        for local_x in 0..32 {
            let raw = if region.has_chunk(local_x, local_z) {
                region.read_chunk(local_x, local_z)
            } else {
                Ok(None)
            };

            match raw {
                Ok(Some(raw)) => match decode_chunk(&raw) {
                    Ok(chunk) => {
                        render_chunk(
                            &chunk,
                            region_x * 32 + local_x,
                            region_z * 32 + local_z,
                            area,
                            colors,
                            canvas,
                            stats,
                        );
                        stats.record_processed();
                    }
                    Err(err) => {
                        warn!(
                            "undecodable chunk ({local_x}, {local_z}) in r.{region_x}.{region_z}.mca: {err:#}"
                        );
                        stats.record_skipped(1);
                    }
                },
                Ok(None) => stats.record_skipped(1),
                Err(err) => {
                    warn!("abandoning r.{region_x}.{region_z}.mca: {err:#}");
                    stats.record_skipped(CHUNKS_PER_REGION as u64 - visited);
                    break 'region;
                }
            }
            visited += 1;
        }
    }
}

fn render_chunk(
    chunk: &cartomc_anvil::ChunkRoot,
    chunk_x: i32,
    chunk_z: i32,
    area: &RenderArea,
    colors: &BlockColors,
    canvas: &mut MapCanvas,
    stats: &mut RenderStats,
) {
    for z in 0..16 {
        for x in 0..16 {
            let world_x = chunk_x * 16 + x as i32;
            let world_z = chunk_z * 16 + z as i32;
            if !area.contains(world_x, world_z) {
                continue;
            }

            let sample = top_block(chunk, x, z);
            let color = colors.resolve(sample.block);

            stats.record_block(sample.block);
            stats.record_corrupt(sample.corrupt_indices as u64);
            canvas.set_block_pixel(world_x, world_z, color);
        }
    }
}
