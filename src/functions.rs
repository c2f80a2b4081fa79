// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Value records describing single function declarations.
//!
//! Equality and hashing are content-based on the identifying fields
//! (name + mutability for interface functions, name + visibility +
//! mutability for contract functions) because the override bookkeeping
//! groups inherited declarations by these keys.

use crate::program::{MutabilityInput, VisibilityInput};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Visibility {
    Public,
    Private,
    Internal,
    External,
}

impl Visibility {
    /// Callable from outside the contract, so eligible for the public
    /// function registry.
    pub fn externally_callable(self) -> bool {
        matches!(self, Visibility::Public | Visibility::External)
    }
}

impl From<VisibilityInput> for Visibility {
    fn from(input: VisibilityInput) -> Self {
        match input {
            VisibilityInput::Public => Visibility::Public,
            VisibilityInput::Private => Visibility::Private,
            VisibilityInput::Internal => Visibility::Internal,
            VisibilityInput::External => Visibility::External,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let keyword = match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
            Visibility::External => "external",
        };
        write!(f, "{}", keyword)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Mutability {
    Pure,
    View,
    Payable,
}

impl From<MutabilityInput> for Mutability {
    fn from(input: MutabilityInput) -> Self {
        match input {
            MutabilityInput::Pure => Mutability::Pure,
            MutabilityInput::View => Mutability::View,
            MutabilityInput::Payable => Mutability::Payable,
        }
    }
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let keyword = match self {
            Mutability::Pure => "pure",
            Mutability::View => "view",
            Mutability::Payable => "payable",
        };
        write!(f, "{}", keyword)
    }
}

/// Library functions may not mutate state, so payable is not a choice.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LibraryMutability {
    Pure,
    View,
}

impl fmt::Display for LibraryMutability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let keyword = match self {
            LibraryMutability::Pure => "pure",
            LibraryMutability::View => "view",
        };
        write!(f, "{}", keyword)
    }
}

/// An interface function declaration. Always external, implicitly
/// virtual, never carries a body.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct InterfaceFunction {
    pub name: String,
    pub mutability: Mutability,
}

impl InterfaceFunction {
    pub fn new(name: String, mutability: Mutability) -> Self {
        Self { name, mutability }
    }
}

/// A contract function declaration, owned by the contract it was declared
/// in.
#[derive(Clone, Debug)]
pub struct ContractFunction {
    /// Name of the contract the declaration originates in.
    pub contract_name: String,
    pub name: String,
    pub visibility: Visibility,
    pub mutability: Mutability,
    pub is_virtual: bool,
    pub implemented: bool,
    /// Literal returned by the body when implemented.
    pub return_value: u64,
}

impl ContractFunction {
    /// True for combinations the language rejects outright. Disallowed
    /// functions stay in the model but are never rendered, never
    /// registered publicly and never inherited.
    pub fn disallowed(&self) -> bool {
        if self.visibility == Visibility::Private && self.is_virtual {
            return true;
        }
        if self.mutability == Mutability::Payable && !self.visibility.externally_callable() {
            return true;
        }
        // A bodyless function that cannot be overridden can never be
        // completed by a derived contract.
        if !self.implemented && !self.is_virtual {
            return true;
        }
        false
    }

    fn key(&self) -> (&str, Visibility, Mutability) {
        (&self.name, self.visibility, self.mutability)
    }
}

impl PartialEq for ContractFunction {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ContractFunction {}

impl std::hash::Hash for ContractFunction {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// A library function. Restricted: no virtual, always a body, public or
/// internal, pure or view.
#[derive(Clone, Debug)]
pub struct LibraryFunction {
    pub library_name: String,
    pub name: String,
    pub public: bool,
    pub mutability: LibraryMutability,
    pub return_value: u64,
}
