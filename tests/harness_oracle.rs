// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

use contract_generation::{
    builder::{self, BuiltProgram},
    error::CompileError,
    harness::{
        apply_debug_overrides, execute_case, Address, CallOutcome, CompiledContract,
        DiscardReason, ExecutionHost, Finding, OptimizationLevel, SolidityCompiler, Verdict,
        EXPECTED_OUTPUT, TEST_METHOD,
    },
    program::{LibraryFunctionInput, LibraryInput, ProgramKind},
};
use std::collections::BTreeMap;

mod common;

const TEST_SELECTOR: &str = "f8a8fd6d";

#[derive(Default)]
struct MockCompiler {
    stack_too_deep: bool,
    fail: bool,
    omit_test_method: bool,
    compiled: Vec<String>,
}

impl SolidityCompiler for MockCompiler {
    fn compile(
        &mut self,
        _source: &str,
        contract_name: &str,
        _libraries: &BTreeMap<String, Address>,
        _optimization: OptimizationLevel,
    ) -> Result<CompiledContract, CompileError> {
        self.compiled.push(contract_name.to_string());
        if self.stack_too_deep {
            return Err(CompileError::StackTooDeep);
        }
        if self.fail {
            return Err(CompileError::Failed("parser error".to_string()));
        }
        let mut method_identifiers = BTreeMap::new();
        if !self.omit_test_method {
            method_identifiers.insert(TEST_METHOD.to_string(), TEST_SELECTOR.to_string());
        }
        Ok(CompiledContract {
            bytecode: vec![0x60, 0x00],
            method_identifiers,
        })
    }
}

struct MockHost {
    deploy_fails: bool,
    outcome: CallOutcome,
    deployments: usize,
    calls: Vec<Vec<u8>>,
}

impl MockHost {
    fn returning(outcome: CallOutcome) -> Self {
        Self {
            deploy_fails: false,
            outcome,
            deployments: 0,
            calls: Vec::new(),
        }
    }

    fn passing() -> Self {
        Self::returning(CallOutcome::Success(EXPECTED_OUTPUT.to_vec()))
    }
}

impl ExecutionHost for MockHost {
    fn deploy(&mut self, _bytecode: &[u8]) -> Option<Address> {
        if self.deploy_fails {
            return None;
        }
        self.deployments += 1;
        Some([7u8; 20])
    }

    fn call(&mut self, _address: Address, calldata: &[u8]) -> CallOutcome {
        self.calls.push(calldata.to_vec());
        self.outcome.clone()
    }
}

fn contract_program() -> BuiltProgram {
    let input = common::program(
        0,
        ProgramKind::Contract(common::concrete_contract(
            vec![],
            vec![common::public_pure_function()],
        )),
    );
    builder::build(&input).expect("valid test")
}

fn library_program() -> BuiltProgram {
    let input = common::program(
        0,
        ProgramKind::Library(LibraryInput {
            functions: vec![LibraryFunctionInput {
                public: true,
                view: false,
            }],
        }),
    );
    builder::build(&input).expect("valid test")
}

#[test]
fn correct_output_passes() {
    let built = contract_program();
    let mut compiler = MockCompiler::default();
    let mut host = MockHost::passing();
    let verdict = execute_case(&built, &mut compiler, &mut host).unwrap();
    assert_eq!(verdict, Verdict::Pass);
    assert_eq!(compiler.compiled, vec!["C".to_string()]);
    // The call carries the selector from the method-identifier map.
    assert_eq!(host.calls, vec![hex::decode(TEST_SELECTOR).unwrap()]);
}

#[test]
fn library_is_compiled_and_deployed_first() {
    let built = library_program();
    let mut compiler = MockCompiler::default();
    let mut host = MockHost::passing();
    let verdict = execute_case(&built, &mut compiler, &mut host).unwrap();
    assert_eq!(verdict, Verdict::Pass);
    assert_eq!(compiler.compiled, vec!["LibB".to_string(), "C".to_string()]);
    assert_eq!(host.deployments, 2);
}

#[test]
fn wrong_output_is_a_finding() {
    let built = contract_program();
    let mut compiler = MockCompiler::default();
    let mut host = MockHost::returning(CallOutcome::Success(vec![1u8; 32]));
    let verdict = execute_case(&built, &mut compiler, &mut host).unwrap();
    assert_eq!(verdict, Verdict::Finding(Finding::WrongOutput(vec![1u8; 32])));
}

#[test]
fn revert_is_a_finding() {
    let built = contract_program();
    let mut compiler = MockCompiler::default();
    let mut host = MockHost::returning(CallOutcome::Revert);
    let verdict = execute_case(&built, &mut compiler, &mut host).unwrap();
    assert_eq!(verdict, Verdict::Finding(Finding::Reverted));
}

#[test]
fn other_engine_failures_are_ignored() {
    let built = contract_program();
    let mut compiler = MockCompiler::default();
    let mut host = MockHost::returning(CallOutcome::OtherFailure);
    let verdict = execute_case(&built, &mut compiler, &mut host).unwrap();
    assert_eq!(verdict, Verdict::Discarded(DiscardReason::ExecutionFailed));
}

#[test]
fn stack_too_deep_discards_silently() {
    let built = contract_program();
    let mut compiler = MockCompiler {
        stack_too_deep: true,
        ..MockCompiler::default()
    };
    let mut host = MockHost::passing();
    let verdict = execute_case(&built, &mut compiler, &mut host).unwrap();
    assert_eq!(verdict, Verdict::Discarded(DiscardReason::StackTooDeep));
}

#[test]
fn other_compile_failures_are_findings() {
    let built = contract_program();
    let mut compiler = MockCompiler {
        fail: true,
        ..MockCompiler::default()
    };
    let mut host = MockHost::passing();
    let verdict = execute_case(&built, &mut compiler, &mut host).unwrap();
    assert_eq!(
        verdict,
        Verdict::Finding(Finding::CompileFailure("parser error".to_string()))
    );
}

#[test]
fn missing_test_method_is_a_finding() {
    let built = contract_program();
    let mut compiler = MockCompiler {
        omit_test_method: true,
        ..MockCompiler::default()
    };
    let mut host = MockHost::passing();
    let verdict = execute_case(&built, &mut compiler, &mut host).unwrap();
    assert_eq!(verdict, Verdict::Finding(Finding::MissingTestMethod));
}

#[test]
fn deployment_failure_is_a_finding() {
    let built = contract_program();
    let mut compiler = MockCompiler::default();
    let mut host = MockHost {
        deploy_fails: true,
        ..MockHost::passing()
    };
    let verdict = execute_case(&built, &mut compiler, &mut host).unwrap();
    assert_eq!(verdict, Verdict::Finding(Finding::DeploymentFailure));
}

#[test]
fn dump_then_load_applies_both() {
    let dir = std::env::temp_dir();
    let dump = dir.join(format!("contract-generation-dump-{}.sol", std::process::id()));
    let load = dir.join(format!("contract-generation-load-{}.sol", std::process::id()));
    std::fs::write(&load, "pragma solidity >=0.0;\ncontract C {}\n").unwrap();

    let replaced = apply_debug_overrides(
        "contract Original {}".to_string(),
        Some(&dump),
        Some(&load),
    )
    .unwrap();
    // Dump ran first with the original source, load replaced it second.
    assert_eq!(
        std::fs::read_to_string(&dump).unwrap(),
        "contract Original {}"
    );
    assert!(replaced.contains("contract C {}"));

    std::fs::remove_file(&dump).unwrap();
    std::fs::remove_file(&load).unwrap();
}
