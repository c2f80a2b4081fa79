// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Harness-internal failures. Oracle outcomes are not errors; they are
/// reported through `harness::Verdict`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("error accessing {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("method identifier for {0} is not valid hex: {1}")]
    MethodIdentifier(String, #[source] hex::FromHexError),
}

/// The compiler collaborator's failure modes. Stack-too-deep is the one
/// kind the fuzzer ignores; everything else is a finding.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("stack too deep")]
    StackTooDeep,
    #[error("compilation failed: {0}")]
    Failed(String),
}
