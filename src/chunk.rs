use std::ops::Range;

/// Partitions `data` into `workers` contiguous ranges, each ending just past
/// a line terminator (or at end of input). Boundaries start at equal strides
/// and advance forward to the next `\n`, so no record is split. Degenerate
/// inputs produce empty ranges.
pub fn shard_ranges(data: &[u8], workers: usize) -> Vec<Range<usize>> {
    assert!(workers > 0, "at least one worker range is required");

    let stride = data.len() / workers;
    let mut ranges = Vec::with_capacity(workers);
    let mut begin = 0;

    for i in 1..workers {
        let target = (i * stride).max(begin);
        let end = match data[target..].iter().position(|&b| b == b'\n') {
            Some(offset) => target + offset + 1,
            None => data.len(),
        };
        ranges.push(begin..end);
        begin = end;
    }

    ranges.push(begin..data.len());
    ranges
}
