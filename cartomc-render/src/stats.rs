use std::collections::HashMap;

/// Counters accumulated over a whole run.
///
/// Block tallies are keyed by the raw id exactly as it appeared in the
/// palette, and remember the order ids were first seen so that frequency
/// ties report deterministically.
#[derive(Debug, Default)]
pub struct RenderStats {
    pub processed_chunks: u64,
    pub skipped_chunks: u64,
    // Packed values that pointed outside their palette. These never change
    // the image (they render as air) but they are a sign of damaged data.
    pub corrupt_indices: u64,
    blocks: HashMap<String, Tally>,
}

#[derive(Debug)]
struct Tally {
    first_seen: usize,
    count: u64,
}

impl RenderStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_processed(&mut self) {
        self.processed_chunks += 1;
    }

    pub fn record_skipped(&mut self, count: u64) {
        self.skipped_chunks += count;
    }

    pub fn record_corrupt(&mut self, count: u64) {
        self.corrupt_indices += count;
    }

    pub fn record_block(&mut self, block_id: &str) {
        if let Some(tally) = self.blocks.get_mut(block_id) {
            tally.count += 1;
        } else {
            let first_seen = self.blocks.len();
            self.blocks.insert(
                block_id.to_string(),
                Tally {
                    first_seen,
                    count: 1,
                },
            );
        }
    }

    /// The `n` most frequent blocks, ties broken by first-seen order.
    pub fn top_blocks(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.blocks.iter().collect();
        entries.sort_by_key(|(_, tally)| (std::cmp::Reverse(tally.count), tally.first_seen));
        entries
            .into_iter()
            .take(n)
            .map(|(name, tally)| (name.as_str(), tally.count))
            .collect()
    }

    /// End-of-run summary on stdout.
    pub fn print_summary(&self, top_n: usize) {
        println!("\nProcessed {} chunks", self.processed_chunks);
        println!("Skipped {} chunks", self.skipped_chunks);
        if self.corrupt_indices > 0 {
            println!("Corrupt palette indices: {}", self.corrupt_indices);
        }

        println!("\nBlock types found:");
        for (block_id, count) in self.top_blocks(top_n) {
            println!("  {block_id}: {count} blocks");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_first_seen_order() {
        let mut stats = RenderStats::new();
        for _ in 0..5 {
            stats.record_block("minecraft:stone");
        }
        for _ in 0..5 {
            stats.record_block("minecraft:dirt");
        }
        stats.record_block("minecraft:air");

        let top = stats.top_blocks(2);
        assert_eq!(top, vec![("minecraft:stone", 5), ("minecraft:dirt", 5)]);
    }

    #[test]
    fn top_blocks_orders_by_frequency() {
        let mut stats = RenderStats::new();
        stats.record_block("minecraft:air");
        for _ in 0..3 {
            stats.record_block("minecraft:grass_block");
        }
        stats.record_block("minecraft:air");

        let top = stats.top_blocks(10);
        assert_eq!(
            top,
            vec![("minecraft:grass_block", 3), ("minecraft:air", 2)]
        );
    }

    #[test]
    fn chunk_counters_accumulate() {
        let mut stats = RenderStats::new();
        stats.record_processed();
        stats.record_processed();
        stats.record_skipped(1024);
        stats.record_skipped(1);
        stats.record_corrupt(3);

        assert_eq!(stats.processed_chunks, 2);
        assert_eq!(stats.skipped_chunks, 1025);
        assert_eq!(stats.corrupt_indices, 3);
    }
}
