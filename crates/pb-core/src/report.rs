//! Run results and their text/JSON rendering

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::bucket::Bucket;
use crate::error::Result;
use crate::sampler::SamplerKind;
use crate::tally::{Tally, expected_frequencies};

/// Outcome of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub sampler: SamplerKind,
    pub seed: u64,
    pub tally: Tally,
}

/// One line of a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketRow {
    pub bucket: Bucket,
    pub count: u64,
    pub frequency: f64,
}

#[derive(Serialize)]
struct FrequencyRow {
    bucket: Bucket,
    frequency: f64,
}

#[derive(Serialize)]
struct JsonFrequencies {
    buckets: Vec<FrequencyRow>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    sampler: SamplerKind,
    seed: u64,
    trials: u64,
    buckets: &'a [BucketRow],
}

impl Report {
    pub fn trials(&self) -> u64 {
        self.tally.total()
    }

    /// Rows in report order
    pub fn rows(&self) -> Vec<BucketRow> {
        self.tally
            .iter()
            .map(|(bucket, count)| BucketRow {
                bucket,
                count,
                frequency: self.tally.frequency(bucket),
            })
            .collect()
    }

    /// Largest |empirical - exact| over the buckets
    pub fn max_deviation(&self) -> f64 {
        expected_frequencies()
            .iter()
            .map(|&(bucket, p)| (self.tally.frequency(bucket) - p).abs())
            .fold(0.0, f64::max)
    }

    /// `label<TAB>frequency`, one line per bucket
    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        let rows = self.rows();
        write_frequencies(out, rows.iter().map(|r| (r.bucket, r.frequency)))
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        let rows = self.rows();
        let json = JsonReport {
            sampler: self.sampler,
            seed: self.seed,
            trials: self.trials(),
            buckets: &rows,
        };
        serde_json::to_writer_pretty(&mut *out, &json)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Write `label<TAB>frequency` lines
pub fn write_frequencies<W, I>(out: &mut W, rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (Bucket, f64)>,
{
    for (bucket, frequency) in rows {
        writeln!(out, "{}\t{}", bucket, frequency)?;
    }
    Ok(())
}

/// Write `{"buckets": [{"bucket", "frequency"}, ...]}`
pub fn write_frequencies_json<W, I>(out: &mut W, rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (Bucket, f64)>,
{
    let json = JsonFrequencies {
        buckets: rows
            .into_iter()
            .map(|(bucket, frequency)| FrequencyRow { bucket, frequency })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}
