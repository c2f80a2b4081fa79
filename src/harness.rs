// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The harness boundary: the compile/deploy/execute collaborators are
//! external, so this module only fixes their interface, the oracle, and
//! the per-case driver that strings them together.

use crate::{
    builder::BuiltProgram,
    error::{CompileError, Error},
    render,
};
use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};

/// Address of a deployed artifact in the execution engine.
pub type Address = [u8; 20];

/// ABI signature of the oracle entry point.
pub const TEST_METHOD: &str = "test()";

/// The oracle: a correct run of `test()` returns the 32-byte big-endian
/// encoding of unsigned zero.
pub const EXPECTED_OUTPUT: [u8; 32] = [0u8; 32];

/// If set, the rendered source is written to this path before compilation.
pub const DUMP_PATH_VAR: &str = "PROTO_FUZZER_DUMP_PATH";
/// If set, the rendered source is replaced by this file's contents. Dump
/// runs first, load second, so both can be set at once.
pub const DEBUG_FILE_VAR: &str = "SOL_DEBUG_FILE";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OptimizationLevel {
    Minimal,
    Standard,
}

#[derive(Clone, Debug, Default)]
pub struct CompiledContract {
    pub bytecode: Vec<u8>,
    /// ABI signature -> hex-encoded selector.
    pub method_identifiers: BTreeMap<String, String>,
}

pub trait SolidityCompiler {
    fn compile(
        &mut self,
        source: &str,
        contract_name: &str,
        libraries: &BTreeMap<String, Address>,
        optimization: OptimizationLevel,
    ) -> Result<CompiledContract, CompileError>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CallOutcome {
    Success(Vec<u8>),
    Revert,
    /// Any engine failure other than a revert. Not an oracle outcome;
    /// the case is dropped.
    OtherFailure,
}

pub trait ExecutionHost {
    fn deploy(&mut self, bytecode: &[u8]) -> Option<Address>;
    fn call(&mut self, address: Address, calldata: &[u8]) -> CallOutcome;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DiscardReason {
    StackTooDeep,
    ExecutionFailed,
}

/// A bug the fuzzer reports.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Finding {
    CompileFailure(String),
    /// `test()` is missing from the compiler's method-identifier map.
    MissingTestMethod,
    DeploymentFailure,
    Reverted,
    WrongOutput(Vec<u8>),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Verdict {
    Pass,
    Discarded(DiscardReason),
    Finding(Finding),
}

/// Drive one built program through the collaborators and judge the oracle.
pub fn execute_case<C, H>(
    built: &BuiltProgram,
    compiler: &mut C,
    host: &mut H,
) -> Result<Verdict, Error>
where
    C: SolidityCompiler,
    H: ExecutionHost,
{
    let source = render::program_source(built);
    let dump = env::var_os(DUMP_PATH_VAR).map(PathBuf::from);
    let load = env::var_os(DEBUG_FILE_VAR).map(PathBuf::from);
    let source = apply_debug_overrides(source, dump.as_deref(), load.as_deref())?;
    run_source(&source, built, compiler, host)
}

/// The debugging-aid environment variables, with the paths made explicit
/// so the behavior is testable without touching the process environment.
pub fn apply_debug_overrides(
    source: String,
    dump: Option<&Path>,
    load: Option<&Path>,
) -> Result<String, Error> {
    if let Some(path) = dump {
        fs::write(path, &source).map_err(|e| Error::Io(path.display().to_string(), e))?;
    }
    if let Some(path) = load {
        return fs::read_to_string(path).map_err(|e| Error::Io(path.display().to_string(), e));
    }
    Ok(source)
}

fn run_source<C, H>(
    source: &str,
    built: &BuiltProgram,
    compiler: &mut C,
    host: &mut H,
) -> Result<Verdict, Error>
where
    C: SolidityCompiler,
    H: ExecutionHost,
{
    // A chosen library is compiled and deployed first so its address can
    // be substituted into the contract build.
    let mut libraries = BTreeMap::new();
    if let Some(library) = &built.library_name {
        let compiled = match compiler.compile(
            source,
            library,
            &BTreeMap::new(),
            OptimizationLevel::Minimal,
        ) {
            Ok(compiled) => compiled,
            Err(CompileError::StackTooDeep) => {
                return Ok(Verdict::Discarded(DiscardReason::StackTooDeep))
            }
            Err(CompileError::Failed(message)) => {
                return Ok(Verdict::Finding(Finding::CompileFailure(message)))
            }
        };
        let address = match host.deploy(&compiled.bytecode) {
            Some(address) => address,
            None => return Ok(Verdict::Finding(Finding::DeploymentFailure)),
        };
        libraries.insert(library.clone(), address);
    }

    let compiled = match compiler.compile(
        source,
        built.test_contract_name(),
        &libraries,
        OptimizationLevel::Minimal,
    ) {
        Ok(compiled) => compiled,
        Err(CompileError::StackTooDeep) => {
            return Ok(Verdict::Discarded(DiscardReason::StackTooDeep))
        }
        Err(CompileError::Failed(message)) => {
            return Ok(Verdict::Finding(Finding::CompileFailure(message)))
        }
    };
    let selector = match compiled.method_identifiers.get(TEST_METHOD) {
        Some(encoded) => hex::decode(encoded)
            .map_err(|e| Error::MethodIdentifier(TEST_METHOD.to_string(), e))?,
        None => return Ok(Verdict::Finding(Finding::MissingTestMethod)),
    };
    let address = match host.deploy(&compiled.bytecode) {
        Some(address) => address,
        None => return Ok(Verdict::Finding(Finding::DeploymentFailure)),
    };

    match host.call(address, &selector) {
        CallOutcome::Revert => Ok(Verdict::Finding(Finding::Reverted)),
        CallOutcome::OtherFailure => Ok(Verdict::Discarded(DiscardReason::ExecutionFailed)),
        CallOutcome::Success(output) => {
            if output.as_slice() == EXPECTED_OUTPUT {
                Ok(Verdict::Pass)
            } else {
                Ok(Verdict::Finding(Finding::WrongOutput(output)))
            }
        }
    }
}
