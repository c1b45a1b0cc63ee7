use std::ops::Range;

use crate::byte_search::FindByte;
use crate::decode;
use crate::hash::fnv1a;
use crate::table::{Table, WORKER_SLOTS};

/// Scans one shard of the input and aggregates it into a fresh table.
///
/// `range.start` must be 0 or just past a line terminator, and the byte
/// before `range.end` must be a terminator or the end of input, as the
/// chunker guarantees. Keys in the returned table borrow from `data`.
pub fn scan_shard<'a>(data: &'a [u8], range: Range<usize>, find: FindByte) -> Table<'a> {
    let mut table = Table::with_slots(WORKER_SLOTS);

    let end = range.end;
    let mut pos = range.start;

    while pos < end {
        let semi = find(data, pos, end, b';');
        let key = &data[pos..semi];
        let hash = fnv1a(key);

        let field = semi + 1;
        let newline = find(data, field, end, b'\n');

        // The branchless decoder loads eight bytes; only the final record of
        // the input can sit too close to the end of the mapping for that.
        let temp = if field + 8 <= data.len() {
            unsafe { decode::fixed_unchecked(&data[field..newline]) }
        } else {
            decode::fixed(&data[field..newline])
        };

        table.record(hash, key, temp);

        pos = newline + 1;
    }

    table
}
