// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Structured-input generator for a smart-contract compiler fuzzer.
//!
//! A coverage-guided structured fuzzer hands this crate a tree-shaped
//! program description. The adaptor walks it once, bottom-up, and builds a
//! typed model of libraries, interfaces, contracts, their inheritance
//! graphs and every derived override decision, arranged so that the
//! resulting program is well-typed and carries a single entry point
//! `test()` whose correct execution returns unsigned zero. A thin renderer
//! turns the model into Solidity source; the compile/deploy/execute
//! harness is an external collaborator whose interface lives in
//! [`harness`].

pub mod builder;
pub mod common;
pub mod config;
pub mod contract;
pub mod error;
pub mod functions;
pub mod harness;
pub mod interface;
pub mod library;
pub mod names;
pub mod overrides;
pub mod program;
#[cfg(any(test, feature = "fuzzing"))]
pub mod proptest_types;
pub mod render;
pub mod rng;

use crate::{config::Args, program::ProgramInput};
use anyhow::{Context, Result};
use arbitrary::{Arbitrary, Unstructured};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::fs;
use tracing::{debug, info};

/// Generate `args.iterations` structured inputs, adapt each one, and
/// report how many produced testable programs. When an output directory is
/// given, every rendered program is written there as `<index>.sol`, the
/// way a fuzzing corpus is seeded.
pub fn run_generation(args: Args) -> Result<()> {
    let mut entropy = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    }

    let mut generated = 0u64;
    let mut discarded = 0u64;
    let mut raw = vec![0u8; common::INPUT_BYTE_BUDGET];
    for index in 0..args.iterations {
        entropy.fill_bytes(&mut raw);
        let input = match ProgramInput::arbitrary_take_rest(Unstructured::new(&raw)) {
            Ok(input) => input,
            Err(_) => {
                discarded += 1;
                continue;
            }
        };
        match builder::build(&input) {
            Some(built) => {
                generated += 1;
                let source = render::program_source(&built);
                debug!("program {}:\n{}", index, source);
                if let Some(dir) = &args.output_dir {
                    let path = dir.join(format!("{}.sol", index));
                    fs::write(&path, &source)
                        .with_context(|| format!("Failed to write to file: {:?}", path))?;
                }
            }
            None => discarded += 1,
        }
    }
    info!(
        "{} programs generated, {} inputs discarded",
        generated, discarded
    );
    Ok(())
}
