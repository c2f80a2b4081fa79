// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

use contract_generation::{
    builder::{self, BuiltProgram, ProgramElement},
    contract::Contract,
    program::{BaseInput, InterfaceInput, MutabilityInput, ProgramKind},
    render,
};
use std::rc::Rc;

mod common;

fn built_contract(built: &BuiltProgram) -> &Rc<Contract> {
    match &built.element {
        ProgramElement::Contract(contract) => contract,
        ProgramElement::Library(_) => panic!("expected a contract program"),
    }
}

#[test]
fn diamond_over_interfaces_lists_both_bases() {
    // Two sibling interfaces both declare f0() external pure; the
    // implementing contract must name both in the override list.
    let input = common::program(
        0,
        ProgramKind::Contract(common::concrete_contract(
            vec![
                BaseInput::Interface(Box::new(common::flat_interface(1, MutabilityInput::Pure))),
                BaseInput::Interface(Box::new(common::flat_interface(1, MutabilityInput::Pure))),
            ],
            vec![],
        )),
    );
    let built = builder::build(&input).expect("diamond resolves");
    let contract = built_contract(&built);
    assert_eq!(contract.interface_overrides().len(), 1);
    let group = &contract.interface_overrides()[0];
    assert_eq!(group.function.name, "f0");
    assert!(group.decision().implemented);
    assert_eq!(group.base_names(), vec!["IB", "IBB"]);

    let source = render::program_source(&built);
    assert!(source.contains("interface IB {"));
    assert!(source.contains("interface IBB {"));
    assert!(source.contains("function f0() external pure returns (uint);"));
    assert!(source.contains("override(IB, IBB)"));
    assert!(source.contains("contract C is IB, IBB {"));
}

#[test]
fn incompatible_mutabilities_poison_the_program() {
    // Same name, different mutability, reachable through two bases: the
    // emitted source could never be well-typed, so the input is discarded.
    let input = common::program(
        0,
        ProgramKind::Contract(common::concrete_contract(
            vec![
                BaseInput::Interface(Box::new(common::flat_interface(1, MutabilityInput::Pure))),
                BaseInput::Interface(Box::new(common::flat_interface(1, MutabilityInput::View))),
            ],
            vec![common::public_pure_function()],
        )),
    );
    assert!(builder::build(&input).is_none());
}

#[test]
fn interface_program_wraps_into_an_implementing_contract() {
    // A diamond inside the interface itself: the derived interface must
    // re-declare the shared function naming both bases; the synthesized
    // contract then overrides the re-declaration alone.
    let diamond = InterfaceInput {
        bases: vec![
            common::flat_interface(1, MutabilityInput::View),
            common::flat_interface(1, MutabilityInput::View),
        ],
        functions: vec![],
    };
    let input = common::program(13, ProgramKind::Interface(diamond));
    let built = builder::build(&input).expect("interface program resolves");
    let contract = built_contract(&built);
    assert!(!contract.is_abstract());
    assert_eq!(contract.bases().len(), 1);
    assert_eq!(contract.bases()[0].name(), "IB");

    // The nearest declarer of f0 is the re-declaring interface IB, not
    // the original declarers IBB/IBBB.
    assert_eq!(contract.interface_overrides().len(), 1);
    let group = &contract.interface_overrides()[0];
    assert!(group.decision().implemented);
    assert_eq!(group.base_names(), vec!["IB"]);

    let source = render::program_source(&built);
    assert!(source.contains("interface IB is IBB, IBBB {"));
    assert!(source.contains("function f0() external view override(IBB, IBBB) returns (uint);"));
    assert!(source.contains("contract C is IB {"));
}

#[test]
fn single_base_redeclaration_is_a_coin_toss() {
    for seed in 0..16 {
        let inner = common::flat_interface(1, MutabilityInput::Pure);
        let outer = InterfaceInput {
            bases: vec![inner],
            functions: vec![],
        };
        let input = common::program(seed, ProgramKind::Interface(outer));
        let built = builder::build(&input).expect("valid test");
        let contract = built_contract(&built);
        let outer_interface = match &contract.bases()[0] {
            contract_generation::contract::BaseElement::Interface(interface) => interface.clone(),
            _ => panic!("expected interface base"),
        };
        // Re-declaring a single-path inherited function is optional, but
        // when it happens the record carries exactly that one base.
        assert!(outer_interface.override_groups().len() <= 1);
        if let Some(group) = outer_interface.override_groups().first() {
            assert_eq!(group.base_names(), vec!["IBB"]);
            assert!(group.decision().explicitly_inherited);
            assert!(!group.decision().implemented);
        }
        // Either way the concrete contract implements f0 exactly once.
        assert_eq!(contract.interface_overrides().len(), 1);
        assert!(contract.interface_overrides()[0].decision().implemented);
    }
}

#[test]
fn contract_taking_over_an_interface_function_exports_it_onward() {
    // An abstract contract inherits an interface; whatever it decides, a
    // concrete derived of it ends up with exactly one implementation of
    // the interface function.
    for seed in 0..32 {
        let middle = common::abstract_contract(
            vec![BaseInput::Interface(Box::new(common::flat_interface(
                1,
                MutabilityInput::Pure,
            )))],
            vec![],
        );
        let input = common::program(
            seed,
            ProgramKind::Contract(common::concrete_contract(
                vec![BaseInput::Contract(Box::new(middle))],
                vec![],
            )),
        );
        let built = builder::build(&input).expect("obligation resolves");
        let contract = built_contract(&built);
        let f0_entries: Vec<_> = contract
            .registered_functions()
            .iter()
            .filter(|(name, _)| name == "f0")
            .collect();
        assert_eq!(f0_entries.len(), 1, "seed {}", seed);
    }
}

#[test]
fn effective_set_spans_transitive_bases() {
    // outer interface adds its own function on top of an inherited one;
    // the implementing contract must implement both.
    let outer = InterfaceInput {
        bases: vec![common::flat_interface(1, MutabilityInput::Pure)],
        functions: vec![contract_generation::program::InterfaceFunctionInput {
            mutability: MutabilityInput::View,
        }],
    };
    let input = common::program(3, ProgramKind::Interface(outer));
    let built = builder::build(&input).expect("valid test");
    let contract = built_contract(&built);
    let mut names: Vec<_> = contract
        .interface_overrides()
        .iter()
        .map(|group| group.function.name.clone())
        .collect();
    names.sort();
    assert_eq!(names, vec!["f0".to_string(), "f1".to_string()]);
    // Own numbering of the outer interface continues after its base.
    let source = render::program_source(&built);
    assert!(source.contains("function f1() external view returns (uint);"));
}
