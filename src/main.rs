// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use anyhow::Result;
use contract_generation::{config::Args, run_generation};
use structopt::StructOpt;

fn setup_log() {
    tracing::subscriber::set_global_default(tracing_subscriber::FmtSubscriber::new()).unwrap();
}

pub fn main() -> Result<()> {
    setup_log();
    let args = Args::from_args();
    run_generation(args)
}
