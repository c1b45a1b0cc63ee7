use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context};
use clap::Parser;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Generate a measurements file from a station seed list.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of records to generate; underscores are allowed (1_000_000)
    count: String,

    /// Seed CSV of `station;mean` lines; `#` lines are comments
    #[arg(long, default_value = "data/weather_stations.csv")]
    stations: PathBuf,

    /// Output measurements file
    #[arg(long, default_value = "measurements.txt")]
    out: PathBuf,
}

#[derive(Debug)]
struct Station {
    name: String,
    distribution: Normal<f64>,
}

impl FromStr for Station {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let Some((name, mean)) = line.split_once(';') else {
            bail!("seed line has no semicolon: {line:?}");
        };
        let mean: f64 = mean
            .parse()
            .with_context(|| format!("bad mean for station {name:?}"))?;
        let distribution =
            Normal::new(mean, 10.0).with_context(|| format!("bad distribution for {name:?}"))?;

        Ok(Self {
            name: name.to_string(),
            distribution,
        })
    }
}

impl Station {
    fn sample(&self, rng: &mut impl Rng) -> f64 {
        self.distribution.sample(rng).clamp(-99.9, 99.9)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let count: u64 = args
        .count
        .replace('_', "")
        .parse()
        .context("record count must be an integer")?;

    let stations: Vec<Station> = fs::read_to_string(&args.stations)
        .with_context(|| format!("could not read {:?}", args.stations))?
        .lines()
        .filter(|line| !line.starts_with('#') && !line.is_empty())
        .map(str::parse)
        .collect::<anyhow::Result<_>>()?;

    if stations.is_empty() {
        bail!("no stations in {:?}", args.stations);
    }

    let file = File::create(&args.out).with_context(|| format!("cannot create {:?}", args.out))?;
    let mut out = BufWriter::new(file);

    let mut rng = rand::rng();
    for _ in 0..count {
        let station = &stations[rng.random_range(0..stations.len())];
        writeln!(out, "{};{:.1}", station.name, station.sample(&mut rng))?;
    }

    out.flush()?;
    Ok(())
}
