//! Input files: the three-line text format and a random generator for it.
//!
//! ```text
//! 5        <- arm count
//! 1000     <- iteration (round) count
//! 0.1      <- exploration rate
//! ```
//!
//! Each line is trimmed before parsing; anything after the third line is
//! ignored. Only the structure is checked here. Domain checks (arm count >= 2
//! and so on) happen in [`crate::SimulationConfig::validate`].

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{BanditError, Result};
use crate::simulation::SimulationConfig;

/// Parameters read from one input file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationInput {
    pub arm_count: usize,
    pub round_count: usize,
    pub exploration_rate: f64,
}

fn field<T: std::str::FromStr>(line: Option<&str>, what: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let raw = line
        .map(str::trim)
        .ok_or_else(|| BanditError::InputFormat(format!("missing {what} line")))?;
    raw.parse::<T>()
        .map_err(|e| BanditError::InputFormat(format!("invalid {what} {raw:?}: {e}")))
}

impl SimulationInput {
    /// Parse the three-line format.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut lines = contents.lines();
        Ok(Self {
            arm_count: field(lines.next(), "arm count")?,
            round_count: field(lines.next(), "iteration count")?,
            exploration_rate: field(lines.next(), "exploration rate")?,
        })
    }

    /// Read and parse a `.txt` input file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_txt = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
        if !is_txt {
            return Err(BanditError::InputFormat(format!(
                "{} is not a .txt file",
                path.display()
            )));
        }
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Render in the three-line format (with a trailing newline).
    pub fn to_file_contents(&self) -> String {
        format!(
            "{}\n{}\n{}\n",
            self.arm_count, self.round_count, self.exploration_rate
        )
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_file_contents())?;
        Ok(())
    }

    /// Simulation parameters for this input, with `seed`.
    pub fn to_config(&self, seed: u64) -> SimulationConfig {
        SimulationConfig::new(self.arm_count, self.round_count, self.exploration_rate).seed(seed)
    }
}

/// Writes `input1.txt ..= inputN.txt` with random, valid parameters.
///
/// Ranges: arm count in `[2, 10]`, iterations in `[500, 1500]`, exploration
/// rate in `[0.05, 0.3]` rounded to two decimals.
#[derive(Debug, Clone)]
pub struct InputGenerator {
    count: usize,
    rng: StdRng,
}

impl InputGenerator {
    pub const ARM_RANGE: std::ops::RangeInclusive<usize> = 2..=10;
    pub const ROUND_RANGE: std::ops::RangeInclusive<usize> = 500..=1500;
    pub const RATE_RANGE: std::ops::RangeInclusive<f64> = 0.05..=0.3;

    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw one random input.
    pub fn sample(&mut self) -> SimulationInput {
        let rate: f64 = self.rng.random_range(Self::RATE_RANGE);
        SimulationInput {
            arm_count: self.rng.random_range(Self::ARM_RANGE),
            round_count: self.rng.random_range(Self::ROUND_RANGE),
            exploration_rate: (rate * 100.0).round() / 100.0,
        }
    }

    /// Write the files into `dir` (created if missing); returns their paths.
    pub fn generate(&mut self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let mut paths = Vec::with_capacity(self.count);
        for i in 1..=self.count {
            let path = dir.join(format!("input{i}.txt"));
            self.sample().write_to(&path)?;
            tracing::debug!(path = %path.display(), "wrote input file");
            paths.push(path);
        }
        Ok(paths)
    }
}
