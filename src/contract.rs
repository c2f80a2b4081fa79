// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The contract model — the central component of the adaptor.
//!
//! Construction follows the input walk in three phases: bases first
//! (recursively, interfaces and contracts mixed), then own functions,
//! then the override walk that decides what this contract does about
//! every function it inherits. A concrete contract must end the walk with
//! exactly one reachable implementation for every inherited function; if
//! the input forces a state where that cannot be arranged, the contract is
//! poisoned and the builder discards the program.

use crate::{
    common::{MAX_BASES, MAX_FUNCTIONS, MAX_INHERITANCE_DEPTH},
    functions::{ContractFunction, Visibility},
    interface::{Interface, InterfaceDecl},
    names::NameSupply,
    overrides::{
        ContractOverride, ContractOverrideGroup, DerivedKind, InterfaceOverride,
        InterfaceOverrideGroup, OverrideDecision,
    },
    program::{BaseInput, ContractFunctionInput, ContractInput},
    rng::GeneratorRng,
};
use std::rc::Rc;

/// A base list entry: a contract inherits from a mix of interfaces and
/// other contracts.
#[derive(Clone, Debug)]
pub enum BaseElement {
    Interface(Rc<Interface>),
    Contract(Rc<Contract>),
}

impl BaseElement {
    pub fn name(&self) -> &str {
        match self {
            BaseElement::Interface(interface) => interface.name(),
            BaseElement::Contract(contract) => contract.name(),
        }
    }

    fn conflict(&self) -> bool {
        match self {
            BaseElement::Interface(interface) => interface.conflict(),
            BaseElement::Contract(contract) => contract.poisoned,
        }
    }

    fn function_total(&self) -> u32 {
        match self {
            BaseElement::Interface(interface) => interface.function_total(),
            BaseElement::Contract(contract) => contract.function_total,
        }
    }
}

/// One contract function visible on a contract, merged across paths:
/// nearest declarers, whether every path still allows overriding, how
/// many paths carry an implementation, and the resolved return literal
/// when exactly one does.
#[derive(Clone, Debug)]
pub(crate) struct ContractDecl {
    pub function: Rc<ContractFunction>,
    pub sources: Vec<Rc<Contract>>,
    pub virtual_now: bool,
    pub implemented_paths: usize,
    pub return_value: Option<u64>,
}

#[derive(Debug)]
pub struct Contract {
    name: String,
    is_abstract: bool,
    bases: Vec<BaseElement>,
    functions: Vec<Rc<ContractFunction>>,
    contract_overrides: Vec<ContractOverrideGroup>,
    interface_overrides: Vec<InterfaceOverrideGroup>,
    /// Externally callable resolved function name -> expected return.
    /// Only filled for concrete contracts.
    registry: Vec<(String, u64)>,
    function_total: u32,
    poisoned: bool,
}

fn next_return(counter: &mut u64) -> u64 {
    let value = *counter;
    *counter += 1;
    value
}

impl Contract {
    pub fn build(
        input: &ContractInput,
        name: String,
        rng: &mut GeneratorRng,
        names: &mut NameSupply,
        depth: u32,
    ) -> Rc<Contract> {
        let mut bases = Vec::new();
        if depth < MAX_INHERITANCE_DEPTH {
            for base in input.bases.iter().take(MAX_BASES) {
                let base = match base {
                    BaseInput::Contract(contract) => {
                        let base_name = names.next_contract_name();
                        BaseElement::Contract(Contract::build(
                            contract,
                            base_name,
                            rng,
                            names,
                            depth + 1,
                        ))
                    }
                    BaseInput::Interface(interface) => {
                        let base_name = names.next_interface_name();
                        BaseElement::Interface(Interface::build(
                            interface,
                            base_name,
                            rng,
                            names,
                            depth + 1,
                        ))
                    }
                };
                bases.push(base);
            }
        }
        Contract::assemble(name, input.is_abstract, bases, &input.functions, rng)
    }

    /// Build a contract from already-constructed bases. Also the entry
    /// point for the builder's synthesized implementing contract.
    pub(crate) fn assemble(
        name: String,
        is_abstract: bool,
        bases: Vec<BaseElement>,
        function_inputs: &[ContractFunctionInput],
        rng: &mut GeneratorRng,
    ) -> Rc<Contract> {
        let mut poisoned = bases.iter().any(|base| base.conflict());
        let function_index_start: u32 = bases.iter().map(|base| base.function_total()).sum();
        let mut return_counter: u64 = 0;

        let mut functions = Vec::new();
        for (offset, function) in function_inputs.iter().take(MAX_FUNCTIONS).enumerate() {
            // A concrete contract cannot carry a bodyless function, so the
            // input's implemented bit only applies to abstract contracts.
            let implemented = if is_abstract {
                function.implemented
            } else {
                true
            };
            functions.push(Rc::new(ContractFunction {
                contract_name: name.clone(),
                name: format!("f{}", function_index_start + offset as u32),
                visibility: function.visibility.into(),
                mutability: function.mutability.into(),
                is_virtual: function.is_virtual,
                implemented,
                return_value: next_return(&mut return_counter),
            }));
        }
        let function_total = function_index_start + functions.len() as u32;

        let (contract_decls, obligations, merge_conflict) = merged_base_surface(&bases);
        poisoned |= merge_conflict;

        let derived_kind = if is_abstract {
            DerivedKind::AbstractContract
        } else {
            DerivedKind::Contract
        };

        let mut registry = Vec::new();
        if !is_abstract {
            for function in &functions {
                if !function.disallowed()
                    && function.implemented
                    && function.visibility.externally_callable()
                {
                    registry.push((function.name.clone(), function.return_value));
                }
            }
        }

        // Contract-over-contract decisions.
        let mut contract_overrides = Vec::new();
        for decl in &contract_decls {
            let diamond = decl.sources.len() >= 2;
            if !decl.virtual_now {
                // Overriding is forbidden; the inherited implementation is
                // final. A diamond over a non-overridable function cannot
                // be resolved at all.
                if diamond || decl.implemented_paths != 1 {
                    poisoned = true;
                } else if !is_abstract && decl.function.visibility.externally_callable() {
                    registry.push((decl.function.name.clone(), decl.return_value.unwrap()));
                }
                continue;
            }
            let decision = if !is_abstract {
                let must = diamond || decl.implemented_paths != 1;
                if must || rng.coin() {
                    Some(OverrideDecision {
                        implemented: true,
                        virtualized: rng.coin(),
                        explicitly_inherited: false,
                        return_value: Some(next_return(&mut return_counter)),
                    })
                } else {
                    None
                }
            } else {
                let implemented = rng.coin();
                if implemented {
                    // The chain must remain virtual below a concrete
                    // implementation.
                    Some(OverrideDecision {
                        implemented: true,
                        virtualized: true,
                        explicitly_inherited: false,
                        return_value: Some(next_return(&mut return_counter)),
                    })
                } else if diamond || rng.coin() {
                    Some(OverrideDecision::explicit_inherit())
                } else {
                    None
                }
            };
            match decision {
                Some(decision) => {
                    if !is_abstract
                        && decision.implemented
                        && decl.function.visibility.externally_callable()
                    {
                        registry.push((decl.function.name.clone(), decision.return_value.unwrap()));
                    }
                    let records = decl
                        .sources
                        .iter()
                        .map(|source| ContractOverride {
                            base: source.clone(),
                            function: decl.function.clone(),
                            derived_name: name.clone(),
                            derived_kind,
                            decision: decision.clone(),
                        })
                        .collect();
                    contract_overrides.push(ContractOverrideGroup {
                        function: decl.function.clone(),
                        records,
                    });
                }
                None => {
                    if !is_abstract
                        && decl.implemented_paths == 1
                        && decl.function.visibility.externally_callable()
                    {
                        registry.push((decl.function.name.clone(), decl.return_value.unwrap()));
                    }
                }
            }
        }

        // Interface-over-contract decisions. Obligations reaching this
        // point are never implemented yet: base contracts that implemented
        // an interface function export it on the contract side.
        let mut interface_overrides = Vec::new();
        for obligation in &obligations {
            let diamond = obligation.sources.len() >= 2;
            let decision = if !is_abstract {
                // Every open obligation must be implemented here.
                Some(OverrideDecision {
                    implemented: true,
                    virtualized: rng.coin(),
                    explicitly_inherited: false,
                    return_value: Some(next_return(&mut return_counter)),
                })
            } else {
                let implemented = rng.coin();
                if implemented {
                    // The chain must remain virtual below a concrete
                    // implementation.
                    Some(OverrideDecision {
                        implemented: true,
                        virtualized: true,
                        explicitly_inherited: false,
                        return_value: Some(next_return(&mut return_counter)),
                    })
                } else if diamond || rng.coin() {
                    Some(OverrideDecision::explicit_inherit())
                } else {
                    None
                }
            };
            if let Some(decision) = decision {
                if !is_abstract && decision.implemented {
                    registry.push((
                        obligation.function.name.clone(),
                        decision.return_value.unwrap(),
                    ));
                }
                let records = obligation
                    .sources
                    .iter()
                    .map(|source| InterfaceOverride {
                        base: source.clone(),
                        function: obligation.function.clone(),
                        derived_name: name.clone(),
                        derived_kind,
                        decision: decision.clone(),
                    })
                    .collect();
                interface_overrides.push(InterfaceOverrideGroup {
                    function: obligation.function.clone(),
                    records,
                });
            }
        }

        Rc::new(Contract {
            name,
            is_abstract,
            bases,
            functions,
            contract_overrides,
            interface_overrides,
            registry,
            function_total,
            poisoned,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn bases(&self) -> &[BaseElement] {
        &self.bases
    }

    pub fn own_functions(&self) -> &[Rc<ContractFunction>] {
        &self.functions
    }

    pub fn contract_overrides(&self) -> &[ContractOverrideGroup] {
        &self.contract_overrides
    }

    pub fn interface_overrides(&self) -> &[InterfaceOverrideGroup] {
        &self.interface_overrides
    }

    pub fn registered_functions(&self) -> &[(String, u64)] {
        &self.registry
    }

    /// True when this contract can host the oracle: concrete, free of
    /// unresolvable inheritance, and exposing at least one callable
    /// function with a known return.
    pub fn valid_test(&self) -> bool {
        !self.is_abstract && !self.poisoned && !self.registry.is_empty()
    }

    /// Pick one (contract name, function name, expected return) from the
    /// registry of this contract, via the PRNG.
    pub fn valid_contract_test(&self, rng: &mut GeneratorRng) -> Option<(String, String, u64)> {
        if !self.valid_test() {
            return None;
        }
        let index = rng.bounded(self.registry.len() as u32) as usize;
        let (function, value) = &self.registry[index];
        Some((self.name.clone(), function.clone(), *value))
    }

    pub fn pseudo_random_test(&self, rng: &mut GeneratorRng) -> Option<(String, String, u64)> {
        self.valid_contract_test(rng)
    }

    /// The surface this contract presents to a derived contract: its
    /// contract functions (own, inherited and re-declared, including
    /// interface functions it has taken over) and the interface
    /// obligations it passes through untouched.
    pub(crate) fn exported(self_rc: &Rc<Contract>) -> (Vec<ContractDecl>, Vec<InterfaceDecl>) {
        let (mut decls, mut obligations, _) = merged_base_surface(&self_rc.bases);

        for group in &self_rc.contract_overrides {
            if let Some(entry) = decls.iter_mut().find(|e| e.function == group.function) {
                let decision = group.decision();
                entry.sources = vec![self_rc.clone()];
                entry.virtual_now = decision.virtualized;
                entry.implemented_paths = decision.implemented as usize;
                entry.return_value = decision.return_value;
            }
        }

        // An interface function this contract re-declared is a contract
        // function from the point of view of further deriveds.
        for group in &self_rc.interface_overrides {
            obligations.retain(|o| o.function != group.function);
            let decision = group.decision();
            let function = Rc::new(ContractFunction {
                contract_name: self_rc.name.clone(),
                name: group.function.name.clone(),
                visibility: Visibility::External,
                mutability: group.function.mutability,
                is_virtual: decision.virtualized,
                implemented: decision.implemented,
                return_value: decision.return_value.unwrap_or(0),
            });
            decls.push(ContractDecl {
                function,
                sources: vec![self_rc.clone()],
                virtual_now: decision.virtualized,
                implemented_paths: decision.implemented as usize,
                return_value: decision.return_value,
            });
        }

        for function in &self_rc.functions {
            if function.disallowed() || function.visibility == Visibility::Private {
                continue;
            }
            decls.push(ContractDecl {
                function: function.clone(),
                sources: vec![self_rc.clone()],
                virtual_now: function.is_virtual,
                implemented_paths: function.implemented as usize,
                return_value: if function.implemented {
                    Some(function.return_value)
                } else {
                    None
                },
            });
        }

        (decls, obligations)
    }
}

/// Merge the surfaces of all bases. Contract functions merge by
/// (name, visibility, mutability); interface obligations by
/// (name, mutability). A name shared between incompatible declarations —
/// or between the contract side and the interface side — cannot be
/// resolved in the derived contract: the later declaration is dropped and
/// the conflict reported.
pub(crate) fn merged_base_surface(
    bases: &[BaseElement],
) -> (Vec<ContractDecl>, Vec<InterfaceDecl>, bool) {
    let mut decls: Vec<ContractDecl> = Vec::new();
    let mut obligations: Vec<InterfaceDecl> = Vec::new();
    let mut conflict = false;

    let merge_obligation =
        |obligations: &mut Vec<InterfaceDecl>, decls: &[ContractDecl], decl: InterfaceDecl| {
            if decls
                .iter()
                .any(|e| e.function.name == decl.function.name)
            {
                return true;
            }
            match obligations
                .iter()
                .position(|o| o.function.name == decl.function.name)
            {
                None => {
                    obligations.push(decl);
                    false
                }
                Some(position) => {
                    let entry = &mut obligations[position];
                    if entry.function.mutability != decl.function.mutability {
                        return true;
                    }
                    for source in decl.sources {
                        if !entry.sources.iter().any(|s| s.name() == source.name()) {
                            entry.sources.push(source);
                        }
                    }
                    false
                }
            }
        };

    for base in bases {
        match base {
            BaseElement::Contract(contract) => {
                let (base_decls, base_obligations) = Contract::exported(contract);
                for decl in base_decls {
                    match decls
                        .iter()
                        .position(|e| e.function.name == decl.function.name)
                    {
                        None => {
                            if obligations
                                .iter()
                                .any(|o| o.function.name == decl.function.name)
                            {
                                conflict = true;
                            } else {
                                decls.push(decl);
                            }
                        }
                        Some(position) => {
                            let entry = &mut decls[position];
                            if entry.function != decl.function {
                                conflict = true;
                                continue;
                            }
                            for source in decl.sources {
                                if !entry.sources.iter().any(|s| s.name() == source.name()) {
                                    entry.sources.push(source);
                                }
                            }
                            entry.virtual_now &= decl.virtual_now;
                            entry.implemented_paths += decl.implemented_paths;
                            entry.return_value = entry.return_value.or(decl.return_value);
                        }
                    }
                }
                for obligation in base_obligations {
                    conflict |= merge_obligation(&mut obligations, &decls, obligation);
                }
            }
            BaseElement::Interface(interface) => {
                for decl in Interface::visible_functions(interface) {
                    conflict |= merge_obligation(&mut obligations, &decls, decl);
                }
            }
        }
    }
    (decls, obligations, conflict)
}
