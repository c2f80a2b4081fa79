// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The interface model.
//!
//! Building is recursive and depth-first: bases are constructed first,
//! then own functions are appended, then the override walk decides, for
//! every declaration visible through the bases, whether this interface
//! explicitly re-declares it. A declaration reachable through two or more
//! bases (a diamond) must be re-declared; a single-path declaration is
//! re-declared on a coin toss.

use crate::{
    common::{MAX_BASES, MAX_FUNCTIONS, MAX_INHERITANCE_DEPTH},
    functions::InterfaceFunction,
    names::NameSupply,
    overrides::{DerivedKind, InterfaceOverride, InterfaceOverrideGroup, OverrideDecision},
    program::InterfaceInput,
    rng::GeneratorRng,
};
use std::rc::Rc;

/// One declaration visible on an interface, together with the set of
/// nearest declarers through which it is reachable. A re-declaration
/// resets the set to the re-declaring interface.
#[derive(Clone, Debug)]
pub(crate) struct InterfaceDecl {
    pub function: Rc<InterfaceFunction>,
    pub sources: Vec<Rc<Interface>>,
}

#[derive(Debug)]
pub struct Interface {
    name: String,
    bases: Vec<Rc<Interface>>,
    functions: Vec<Rc<InterfaceFunction>>,
    override_groups: Vec<InterfaceOverrideGroup>,
    function_total: u32,
    conflict: bool,
}

impl Interface {
    pub fn build(
        input: &InterfaceInput,
        name: String,
        rng: &mut GeneratorRng,
        names: &mut NameSupply,
        depth: u32,
    ) -> Rc<Interface> {
        let mut bases = Vec::new();
        if depth < MAX_INHERITANCE_DEPTH {
            for base in input.bases.iter().take(MAX_BASES) {
                let base_name = names.next_interface_name();
                bases.push(Interface::build(base, base_name, rng, names, depth + 1));
            }
        }
        let mut conflict = bases.iter().any(|base| base.conflict);

        // Own functions are numbered after the bases' totals, so they can
        // never collide with an inherited name.
        let function_index_start: u32 = bases.iter().map(|base| base.function_total).sum();
        let mut functions = Vec::new();
        for (offset, function) in input.functions.iter().take(MAX_FUNCTIONS).enumerate() {
            functions.push(Rc::new(InterfaceFunction::new(
                format!("f{}", function_index_start + offset as u32),
                function.mutability.into(),
            )));
        }
        let function_total = function_index_start + functions.len() as u32;

        let (inherited, merge_conflict) = merged_base_declarations(&bases);
        conflict |= merge_conflict;

        let mut override_groups = Vec::new();
        for decl in inherited {
            let forced = decl.sources.len() >= 2;
            if !forced && !rng.coin() {
                continue;
            }
            let records = decl
                .sources
                .iter()
                .map(|source| InterfaceOverride {
                    base: source.clone(),
                    function: decl.function.clone(),
                    derived_name: name.clone(),
                    derived_kind: DerivedKind::Interface,
                    decision: OverrideDecision::interface_redeclaration(),
                })
                .collect();
            override_groups.push(InterfaceOverrideGroup {
                function: decl.function,
                records,
            });
        }

        Rc::new(Interface {
            name,
            bases,
            functions,
            override_groups,
            function_total,
            conflict,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[Rc<Interface>] {
        &self.bases
    }

    pub fn own_functions(&self) -> &[Rc<InterfaceFunction>] {
        &self.functions
    }

    pub fn override_groups(&self) -> &[InterfaceOverrideGroup] {
        &self.override_groups
    }

    /// True when a name conflict anywhere in this interface's inheritance
    /// DAG forced a declaration to be dropped. Such a program cannot be
    /// well-typed and is discarded by the builder.
    pub fn conflict(&self) -> bool {
        self.conflict
    }

    pub(crate) fn function_total(&self) -> u32 {
        self.function_total
    }

    /// The effective function set of this interface: own declarations plus
    /// everything visible through the bases, deduplicated by
    /// (name, mutability), each entry carrying its nearest declarers.
    pub(crate) fn visible_functions(self_rc: &Rc<Interface>) -> Vec<InterfaceDecl> {
        let (mut merged, _) = merged_base_declarations(&self_rc.bases);
        for group in &self_rc.override_groups {
            if let Some(entry) = merged.iter_mut().find(|e| e.function == group.function) {
                entry.sources = vec![self_rc.clone()];
            }
        }
        for function in &self_rc.functions {
            merged.push(InterfaceDecl {
                function: function.clone(),
                sources: vec![self_rc.clone()],
            });
        }
        merged
    }
}

/// Merge the visible declarations of `bases` into one list, deduplicating
/// by (name, mutability) and unioning provenance. Two declarations that
/// share a name but not a mutability cannot coexist; the later one is
/// dropped and the conflict reported.
pub(crate) fn merged_base_declarations(bases: &[Rc<Interface>]) -> (Vec<InterfaceDecl>, bool) {
    let mut merged: Vec<InterfaceDecl> = Vec::new();
    let mut conflict = false;
    for base in bases {
        for decl in Interface::visible_functions(base) {
            match merged
                .iter()
                .position(|e| e.function.name == decl.function.name)
            {
                None => merged.push(decl),
                Some(position) => {
                    let entry = &mut merged[position];
                    if entry.function.mutability == decl.function.mutability {
                        for source in decl.sources {
                            if !entry.sources.iter().any(|s| s.name() == source.name()) {
                                entry.sources.push(source);
                            }
                        }
                    } else {
                        conflict = true;
                    }
                }
            }
        }
    }
    (merged, conflict)
}
