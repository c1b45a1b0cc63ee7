use crate::hash::fnv1a;
use crate::table::{Table, MERGE_SLOTS};

/// Folds per-worker tables into one merge table. Runs on a single thread
/// after every worker has been joined; keys are borrowed straight from the
/// source slots, which all reference the same mapping.
pub fn merge_tables<'a>(shards: &[Table<'a>]) -> Table<'a> {
    let mut merged = Table::with_slots(MERGE_SLOTS);

    for shard in shards {
        for (key, agg) in shard.entries() {
            merged.absorb(fnv1a(key), key, agg);
        }
    }

    merged
}
