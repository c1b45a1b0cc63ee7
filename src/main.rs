use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

use anyhow::Context;
use clap::Parser;

/// Summarize per-station min/mean/max temperatures from a measurements file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Newline-delimited `station;temp` measurements file
    input: PathBuf,

    /// Write a CPU flamegraph of the run to this path
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let profiler = match &args.profile {
        Some(_) => Some(
            pprof::ProfilerGuardBuilder::default()
                .frequency(997)
                .build()
                .context("failed to start CPU profiler")?,
        ),
        None => None,
    };

    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);

    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    wxsum::summarize(&args.input, workers, &mut out)?;
    out.flush().context("failed to flush summary")?;

    if let (Some(path), Some(profiler)) = (&args.profile, profiler) {
        let report = profiler
            .report()
            .build()
            .context("failed to collect CPU profile")?;
        let file = File::create(path)
            .with_context(|| format!("cannot create profile output {:?}", path))?;
        report
            .flamegraph(file)
            .context("failed to write flamegraph")?;
    }

    Ok(())
}
