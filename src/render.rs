// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The renderer: a pure, read-only traversal of the built element tree
//! producing Solidity source text. Base definitions are emitted before
//! their deriveds, each definition exactly once; the synthetic `test()`
//! entry point is appended to the test contract.

use crate::{
    builder::{BuiltProgram, ProgramElement, TestCase},
    contract::{BaseElement, Contract},
    interface::Interface,
    library::Library,
};
use std::{collections::HashSet, fmt::Write, rc::Rc};

/// Render one built program as a complete source file.
pub fn program_source(built: &BuiltProgram) -> String {
    let mut out = String::new();
    out.push_str("pragma solidity >=0.0;\n\n");
    match &built.element {
        ProgramElement::Library(library) => {
            out.push_str(&library_source(library));
            out.push('\n');
            let call = format!("{}.{}()", library.name(), built.test.function_name);
            let _ = writeln!(out, "contract {} {{", built.test.contract_name);
            out.push_str(&test_function(&call, built.test.expected_value));
            out.push_str("}\n");
        }
        ProgramElement::Contract(contract) => {
            let mut seen = HashSet::new();
            emit_contract(&mut out, contract, &mut seen, Some(&built.test));
        }
    }
    out
}

fn emit_bases(out: &mut String, bases: &[BaseElement], seen: &mut HashSet<String>) {
    for base in bases {
        match base {
            BaseElement::Interface(interface) => emit_interface(out, interface, seen),
            BaseElement::Contract(contract) => emit_contract(out, contract, seen, None),
        }
    }
}

fn emit_interface(out: &mut String, interface: &Rc<Interface>, seen: &mut HashSet<String>) {
    if !seen.insert(interface.name().to_string()) {
        return;
    }
    for base in interface.bases() {
        emit_interface(out, base, seen);
    }
    out.push_str(&interface_source(interface));
    out.push('\n');
}

fn emit_contract(
    out: &mut String,
    contract: &Rc<Contract>,
    seen: &mut HashSet<String>,
    test: Option<&TestCase>,
) {
    if !seen.insert(contract.name().to_string()) {
        return;
    }
    emit_bases(out, contract.bases(), seen);
    out.push_str(&contract_source(contract, test));
    out.push('\n');
}

pub fn library_source(library: &Library) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "library {} {{", library.name());
    for function in library.functions() {
        let visibility = if function.public { "public" } else { "internal" };
        let _ = writeln!(
            out,
            "    function {}() {} {} returns (uint) {{ return {}; }}",
            function.name, visibility, function.mutability, function.return_value
        );
    }
    out.push_str("}\n");
    out
}

pub fn interface_source(interface: &Interface) -> String {
    let mut out = String::new();
    let bases: Vec<&str> = interface.bases().iter().map(|base| base.name()).collect();
    if bases.is_empty() {
        let _ = writeln!(out, "interface {} {{", interface.name());
    } else {
        let _ = writeln!(out, "interface {} is {} {{", interface.name(), bases.join(", "));
    }
    for function in interface.own_functions() {
        let _ = writeln!(
            out,
            "    function {}() external {} returns (uint);",
            function.name, function.mutability
        );
    }
    for group in interface.override_groups() {
        let _ = writeln!(
            out,
            "    function {}() external {} {} returns (uint);",
            group.function.name,
            group.function.mutability,
            override_clause(&group.base_names())
        );
    }
    out.push_str("}\n");
    out
}

pub fn contract_source(contract: &Contract, test: Option<&TestCase>) -> String {
    let mut out = String::new();
    let keyword = if contract.is_abstract() {
        "abstract contract"
    } else {
        "contract"
    };
    let bases: Vec<&str> = contract.bases().iter().map(|base| base.name()).collect();
    if bases.is_empty() {
        let _ = writeln!(out, "{} {} {{", keyword, contract.name());
    } else {
        let _ = writeln!(out, "{} {} is {} {{", keyword, contract.name(), bases.join(", "));
    }

    for function in contract.own_functions() {
        if function.disallowed() {
            continue;
        }
        let virtual_marker = if function.is_virtual { " virtual" } else { "" };
        if function.implemented {
            let _ = writeln!(
                out,
                "    function {}() {} {}{} returns (uint) {{ return {}; }}",
                function.name,
                function.visibility,
                function.mutability,
                virtual_marker,
                function.return_value
            );
        } else {
            let _ = writeln!(
                out,
                "    function {}() {} {}{} returns (uint);",
                function.name, function.visibility, function.mutability, virtual_marker
            );
        }
    }

    for group in contract.contract_overrides() {
        let decision = group.decision();
        let function = &group.function;
        let virtual_marker = if decision.virtualized { " virtual" } else { "" };
        let clause = override_clause(&group.base_names());
        if decision.implemented {
            let _ = writeln!(
                out,
                "    function {}() {} {}{} {} returns (uint) {{ return {}; }}",
                function.name,
                function.visibility,
                function.mutability,
                virtual_marker,
                clause,
                decision.return_value.unwrap_or(0)
            );
        } else {
            let _ = writeln!(
                out,
                "    function {}() {} {}{} {} returns (uint);",
                function.name, function.visibility, function.mutability, virtual_marker, clause
            );
        }
    }

    for group in contract.interface_overrides() {
        let decision = group.decision();
        let function = &group.function;
        let virtual_marker = if decision.virtualized { " virtual" } else { "" };
        let clause = override_clause(&group.base_names());
        if decision.implemented {
            let _ = writeln!(
                out,
                "    function {}() external {}{} {} returns (uint) {{ return {}; }}",
                function.name,
                function.mutability,
                virtual_marker,
                clause,
                decision.return_value.unwrap_or(0)
            );
        } else {
            let _ = writeln!(
                out,
                "    function {}() external {}{} {} returns (uint);",
                function.name, function.mutability, virtual_marker, clause
            );
        }
    }

    if let Some(test) = test {
        // The chosen function may be external-only, so the call always
        // goes through `this`.
        let call = format!("this.{}()", test.function_name);
        out.push_str(&test_function(&call, test.expected_value));
    }
    out.push_str("}\n");
    out
}

fn test_function(call: &str, expected: u64) -> String {
    format!(
        "    function test() public returns (uint) {{\n        if ({} == {}) return 0;\n        return 1;\n    }}\n",
        call, expected
    )
}

/// A bare `override` resolves a single base; a diamond enumerates every
/// base the declaration is reachable through.
fn override_clause(base_names: &[&str]) -> String {
    if base_names.len() <= 1 {
        "override".to_string()
    } else {
        format!("override({})", base_names.join(", "))
    }
}
