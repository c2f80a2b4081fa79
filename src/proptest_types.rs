// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Proptest strategies over the structured-input schema, for property
//! tests and corpus generation.

use crate::program::{
    BaseInput, ContractFunctionInput, ContractInput, InterfaceFunctionInput, InterfaceInput,
    LibraryFunctionInput, LibraryInput, MutabilityInput, ProgramInput, ProgramKind,
    VisibilityInput,
};
use proptest::{collection::vec, prelude::*};

pub fn visibility_strategy() -> impl Strategy<Value = VisibilityInput> {
    prop_oneof![
        Just(VisibilityInput::Public),
        Just(VisibilityInput::Private),
        Just(VisibilityInput::Internal),
        Just(VisibilityInput::External),
    ]
}

pub fn mutability_strategy() -> impl Strategy<Value = MutabilityInput> {
    prop_oneof![
        Just(MutabilityInput::Pure),
        Just(MutabilityInput::View),
        Just(MutabilityInput::Payable),
    ]
}

pub fn contract_function_strategy() -> impl Strategy<Value = ContractFunctionInput> {
    (
        visibility_strategy(),
        mutability_strategy(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(visibility, mutability, is_virtual, implemented)| ContractFunctionInput {
                visibility,
                mutability,
                is_virtual,
                implemented,
            },
        )
}

pub fn interface_function_strategy() -> impl Strategy<Value = InterfaceFunctionInput> {
    mutability_strategy().prop_map(|mutability| InterfaceFunctionInput { mutability })
}

pub fn library_input_strategy() -> impl Strategy<Value = LibraryInput> {
    vec(
        (any::<bool>(), any::<bool>())
            .prop_map(|(public, view)| LibraryFunctionInput { public, view }),
        0..6,
    )
    .prop_map(|functions| LibraryInput { functions })
}

pub fn interface_input_strategy() -> BoxedStrategy<InterfaceInput> {
    let leaf = vec(interface_function_strategy(), 0..4).prop_map(|functions| InterfaceInput {
        bases: Vec::new(),
        functions,
    });
    leaf.prop_recursive(
        3,  // levels deep
        16, // max size
        3,  // max bases per level
        |inner| {
            (vec(inner, 0..3), vec(interface_function_strategy(), 0..4)).prop_map(
                |(bases, functions)| InterfaceInput { bases, functions },
            )
        },
    )
    .boxed()
}

pub fn contract_input_strategy() -> BoxedStrategy<ContractInput> {
    let leaf = (any::<bool>(), vec(contract_function_strategy(), 0..4)).prop_map(
        |(is_abstract, functions)| ContractInput {
            is_abstract,
            bases: Vec::new(),
            functions,
        },
    );
    leaf.prop_recursive(3, 24, 3, |inner| {
        let base = prop_oneof![
            inner.prop_map(|contract| BaseInput::Contract(Box::new(contract))),
            interface_input_strategy()
                .prop_map(|interface| BaseInput::Interface(Box::new(interface))),
        ];
        (
            any::<bool>(),
            vec(base, 0..3),
            vec(contract_function_strategy(), 0..4),
        )
            .prop_map(|(is_abstract, bases, functions)| ContractInput {
                is_abstract,
                bases,
                functions,
            })
    })
    .boxed()
}

pub fn program_input_strategy() -> BoxedStrategy<ProgramInput> {
    let kind = prop_oneof![
        contract_input_strategy().prop_map(ProgramKind::Contract),
        library_input_strategy().prop_map(ProgramKind::Library),
        interface_input_strategy().prop_map(ProgramKind::Interface),
    ];
    (any::<u64>(), kind)
        .prop_map(|(seed, kind)| ProgramInput { seed, kind })
        .boxed()
}
