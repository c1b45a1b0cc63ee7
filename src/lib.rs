//! Parallel min/mean/max summarizer for newline-delimited `station;temp`
//! measurement files.
//!
//! The input is memory-mapped, split into one shard per worker at line
//! boundaries, scanned by independent threads into per-shard hash tables,
//! folded into a single merge table, and formatted as one sorted summary
//! line.

pub mod byte_search;
pub mod chunk;
pub mod decode;
pub mod error;
pub mod hash;
pub mod merge;
pub mod report;
pub mod table;
pub mod worker;

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::thread;

use memmap2::{Mmap, MmapOptions};

pub use error::{Result, SummaryError};
pub use table::{Aggregate, Table};

/// Aggregates a full input buffer using `workers` parallel scans.
///
/// The shards are scanned by scoped threads with no shared mutable state;
/// every reduction is commutative, so the result does not depend on the
/// worker count.
pub fn aggregate(data: &[u8], workers: usize) -> Table<'_> {
    let find = byte_search::selected();
    let ranges = chunk::shard_ranges(data, workers);

    let shards: Vec<Table<'_>> = thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .map(|range| scope.spawn(move || worker::scan_shard(data, range, find)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker thread panicked"))
            .collect()
    });

    merge::merge_tables(&shards)
}

/// Opens, maps, aggregates, and formats a measurement file.
///
/// The mapping stays alive until the summary has been written; every key in
/// the intermediate tables borrows from it.
pub fn summarize<W: Write>(path: &Path, workers: usize, out: &mut W) -> Result<()> {
    let file = File::open(path).map_err(|source| SummaryError::Open {
        path: path.to_owned(),
        source,
    })?;

    let metadata = file.metadata().map_err(|source| SummaryError::Stat {
        path: path.to_owned(),
        source,
    })?;

    if !metadata.is_file() {
        return Err(SummaryError::NotAFile {
            path: path.to_owned(),
        });
    }

    // A zero-length file cannot be mapped; it also has a known answer.
    if metadata.len() == 0 {
        out.write_all(b"{}\n")?;
        return Ok(());
    }

    let map = map_input(&file, path)?;
    let merged = aggregate(&map, workers);
    report::write_summary(&merged, out)?;

    Ok(())
}

fn map_input(file: &File, path: &Path) -> Result<Mmap> {
    let mut options = MmapOptions::new();

    // Pre-fault the whole mapping where the kernel supports it; cold page
    // faults in the scan loop would serialize the workers on disk I/O.
    #[cfg(target_os = "linux")]
    options.populate();

    let map = unsafe { options.map(file) }.map_err(|source| SummaryError::Map {
        path: path.to_owned(),
        source,
    })?;

    #[cfg(unix)]
    map.advise(memmap2::Advice::Sequential)
        .map_err(|source| SummaryError::Map {
            path: path.to_owned(),
            source,
        })?;

    Ok(map)
}
