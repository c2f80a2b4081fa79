// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use contract_generation::program::{
    BaseInput, ContractFunctionInput, ContractInput, InterfaceFunctionInput, InterfaceInput,
    MutabilityInput, ProgramInput, ProgramKind, VisibilityInput,
};

pub fn program(seed: u64, kind: ProgramKind) -> ProgramInput {
    ProgramInput { seed, kind }
}

pub fn contract_function(
    visibility: VisibilityInput,
    mutability: MutabilityInput,
    is_virtual: bool,
    implemented: bool,
) -> ContractFunctionInput {
    ContractFunctionInput {
        visibility,
        mutability,
        is_virtual,
        implemented,
    }
}

pub fn public_pure_function() -> ContractFunctionInput {
    contract_function(VisibilityInput::Public, MutabilityInput::Pure, false, true)
}

pub fn concrete_contract(
    bases: Vec<BaseInput>,
    functions: Vec<ContractFunctionInput>,
) -> ContractInput {
    ContractInput {
        is_abstract: false,
        bases,
        functions,
    }
}

pub fn abstract_contract(
    bases: Vec<BaseInput>,
    functions: Vec<ContractFunctionInput>,
) -> ContractInput {
    ContractInput {
        is_abstract: true,
        bases,
        functions,
    }
}

/// A base-less interface declaring `count` functions of the given
/// mutability.
pub fn flat_interface(count: usize, mutability: MutabilityInput) -> InterfaceInput {
    InterfaceInput {
        bases: Vec::new(),
        functions: vec![InterfaceFunctionInput { mutability }; count],
    }
}
