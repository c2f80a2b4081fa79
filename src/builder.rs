// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The program builder: one pass over a structured input producing the
//! typed element tree and the oracle test case, or nothing when the input
//! cannot yield a testable program.

use crate::{
    contract::{BaseElement, Contract},
    interface::Interface,
    library::Library,
    names::NameSupply,
    program::{ProgramInput, ProgramKind},
    rng::GeneratorRng,
};
use std::rc::Rc;
use tracing::debug;

/// The top-level concrete contract is always named `C`; the harness
/// compiles and deploys it by this name.
pub const TEST_CONTRACT_NAME: &str = "C";

/// The single top-level element of a built program.
#[derive(Debug)]
pub enum ProgramElement {
    /// A library plus a synthesized invoker contract (the renderer emits
    /// the invoker).
    Library(Rc<Library>),
    /// A concrete contract together with its transitive bases.
    Contract(Rc<Contract>),
}

/// The function the synthetic `test()` entry point calls, and the literal
/// its correct execution returns.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestCase {
    pub contract_name: String,
    pub function_name: String,
    pub expected_value: u64,
}

#[derive(Debug)]
pub struct BuiltProgram {
    pub element: ProgramElement,
    pub test: TestCase,
    /// Reported to the harness so library addresses can be substituted
    /// before the contract is compiled.
    pub library_name: Option<String>,
}

impl BuiltProgram {
    pub fn test_contract_name(&self) -> &str {
        &self.test.contract_name
    }

    pub fn test_method(&self) -> &'static str {
        crate::harness::TEST_METHOD
    }

    /// The oracle: what a correct run of `test()` returns.
    pub fn expected_output(&self) -> [u8; 32] {
        crate::harness::EXPECTED_OUTPUT
    }
}

/// Adapt one structured input. `None` means the input cannot produce a
/// testable program and is discarded, silently from the fuzzer's point of
/// view.
pub fn build(input: &ProgramInput) -> Option<BuiltProgram> {
    let mut rng = GeneratorRng::from_seed(input.seed);
    let mut names = NameSupply::new();
    match &input.kind {
        ProgramKind::Library(library_input) => {
            let library = Library::build(library_input, names.next_library_name());
            if !library.valid_test() {
                debug!("discarding library program with no public function");
                return None;
            }
            let (function_name, expected_value) = library.pseudo_random_test(&mut rng)?;
            Some(BuiltProgram {
                library_name: Some(library.name().to_string()),
                element: ProgramElement::Library(library),
                test: TestCase {
                    contract_name: TEST_CONTRACT_NAME.to_string(),
                    function_name,
                    expected_value,
                },
            })
        }
        ProgramKind::Contract(contract_input) => {
            let contract = Contract::build(
                contract_input,
                TEST_CONTRACT_NAME.to_string(),
                &mut rng,
                &mut names,
                0,
            );
            finish_contract(contract, &mut rng)
        }
        ProgramKind::Interface(interface_input) => {
            // The interface form reduces to the contract form: a concrete
            // contract with the interface as its only base is obliged to
            // implement every declared function.
            let interface = Interface::build(
                interface_input,
                names.next_interface_name(),
                &mut rng,
                &mut names,
                0,
            );
            let contract = Contract::assemble(
                TEST_CONTRACT_NAME.to_string(),
                false,
                vec![BaseElement::Interface(interface)],
                &[],
                &mut rng,
            );
            finish_contract(contract, &mut rng)
        }
    }
}

fn finish_contract(contract: Rc<Contract>, rng: &mut GeneratorRng) -> Option<BuiltProgram> {
    if !contract.valid_test() {
        debug!("discarding untestable contract program");
        return None;
    }
    let (contract_name, function_name, expected_value) = contract.pseudo_random_test(rng)?;
    Some(BuiltProgram {
        element: ProgramElement::Contract(contract),
        test: TestCase {
            contract_name,
            function_name,
            expected_value,
        },
        library_name: None,
    })
}
