// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "contract-generation",
    about = "Generate well-typed contract programs for compiler fuzzing"
)]
pub struct Args {
    /// Number of structured inputs to generate and adapt
    #[structopt(short = "i", long, default_value = "10")]
    pub iterations: u64,
    /// Seed for input generation; seeded from entropy when absent
    #[structopt(short = "s", long)]
    pub seed: Option<u64>,
    /// Directory the rendered programs are written into
    #[structopt(short = "o", long, parse(from_os_str))]
    pub output_dir: Option<PathBuf>,
}
