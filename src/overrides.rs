// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Override records: one derived element's bookkeeping for one inherited
//! function.
//!
//! A derived element records, per inherited declaration, one record for
//! every base through which the declaration is reachable. All records of
//! one declaration share the same decision; the per-base split is what the
//! renderer needs to emit `override(B1, B2, …)` lists in the presence of
//! diamonds.

use crate::{
    contract::Contract,
    functions::{ContractFunction, InterfaceFunction},
    interface::Interface,
};
use std::rc::Rc;

/// What kind of element carries the record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DerivedKind {
    Interface,
    AbstractContract,
    Contract,
}

/// The decisions made for one inherited declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OverrideDecision {
    /// The derived element re-declares the function with a body.
    pub implemented: bool,
    /// The re-declaration is itself marked virtual. Forced true whenever
    /// the chain must stay overridable (bodyless re-declarations, any
    /// record on an abstract derived that implements an interface
    /// function).
    pub virtualized: bool,
    /// Re-declared without a body. Only reachable on abstract deriveds.
    pub explicitly_inherited: bool,
    /// Literal returned by the body when `implemented`.
    pub return_value: Option<u64>,
}

impl OverrideDecision {
    /// A bodyless re-declaration that only restates the inherited
    /// signature. The chain must stay overridable, so virtual is forced.
    pub fn explicit_inherit() -> Self {
        Self {
            implemented: false,
            virtualized: true,
            explicitly_inherited: true,
            return_value: None,
        }
    }

    /// An interface re-declaring a base interface's function. Interface
    /// functions are implicitly virtual, so no virtual marker is carried.
    pub fn interface_redeclaration() -> Self {
        Self {
            implemented: false,
            virtualized: false,
            explicitly_inherited: true,
            return_value: None,
        }
    }
}

/// One decision about one contract function inherited through one base
/// contract.
#[derive(Clone, Debug)]
pub struct ContractOverride {
    pub base: Rc<Contract>,
    pub function: Rc<ContractFunction>,
    pub derived_name: String,
    pub derived_kind: DerivedKind,
    pub decision: OverrideDecision,
}

/// One decision about one interface function, made by a derived interface
/// or by a contract that (transitively) inherits the interface.
#[derive(Clone, Debug)]
pub struct InterfaceOverride {
    pub base: Rc<Interface>,
    pub function: Rc<InterfaceFunction>,
    pub derived_name: String,
    pub derived_kind: DerivedKind,
    pub decision: OverrideDecision,
}

/// All records one derived element holds for one inherited contract
/// function. Invariant: non-empty, one record per reachable base, all
/// records share one decision.
#[derive(Clone, Debug)]
pub struct ContractOverrideGroup {
    pub function: Rc<ContractFunction>,
    pub records: Vec<ContractOverride>,
}

impl ContractOverrideGroup {
    pub fn decision(&self) -> &OverrideDecision {
        &self.records[0].decision
    }

    /// Base names for the rendered `override(...)` list, in declaration
    /// order.
    pub fn base_names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.base.name()).collect()
    }
}

/// All records one derived element holds for one inherited interface
/// function. Same invariants as [`ContractOverrideGroup`].
#[derive(Clone, Debug)]
pub struct InterfaceOverrideGroup {
    pub function: Rc<InterfaceFunction>,
    pub records: Vec<InterfaceOverride>,
}

impl InterfaceOverrideGroup {
    pub fn decision(&self) -> &OverrideDecision {
        &self.records[0].decision
    }

    pub fn base_names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.base.name()).collect()
    }
}
