// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The structured-input schema.
//!
//! A coverage-guided structured fuzzer hands the generator a tree-shaped
//! program description rather than raw bytes. The schema below is that
//! tree: three top-level variants, with contracts and interfaces
//! recursively carrying base descriptions and function descriptors. The
//! adaptor depends only on the fields listed here.

use arbitrary::Arbitrary;

/// One fuzzer input: a seed for the generator's PRNG plus the program
/// description to adapt.
#[derive(Arbitrary, Clone, Debug, PartialEq)]
pub struct ProgramInput {
    pub seed: u64,
    pub kind: ProgramKind,
}

/// The top-level program form.
#[derive(Arbitrary, Clone, Debug, PartialEq)]
pub enum ProgramKind {
    Contract(ContractInput),
    Library(LibraryInput),
    Interface(InterfaceInput),
}

#[derive(Arbitrary, Clone, Debug, Default, PartialEq)]
pub struct ContractInput {
    pub is_abstract: bool,
    pub bases: Vec<BaseInput>,
    pub functions: Vec<ContractFunctionInput>,
}

#[derive(Arbitrary, Clone, Debug, Default, PartialEq)]
pub struct InterfaceInput {
    pub bases: Vec<InterfaceInput>,
    pub functions: Vec<InterfaceFunctionInput>,
}

#[derive(Arbitrary, Clone, Debug, Default, PartialEq)]
pub struct LibraryInput {
    pub functions: Vec<LibraryFunctionInput>,
}

/// A base list entry of a contract: either another contract or an
/// interface.
#[derive(Arbitrary, Clone, Debug, PartialEq)]
pub enum BaseInput {
    Contract(Box<ContractInput>),
    Interface(Box<InterfaceInput>),
}

#[derive(Arbitrary, Clone, Copy, Debug, PartialEq)]
pub struct ContractFunctionInput {
    pub visibility: VisibilityInput,
    pub mutability: MutabilityInput,
    pub is_virtual: bool,
    pub implemented: bool,
}

#[derive(Arbitrary, Clone, Copy, Debug, PartialEq)]
pub struct InterfaceFunctionInput {
    pub mutability: MutabilityInput,
}

#[derive(Arbitrary, Clone, Copy, Debug, PartialEq)]
pub struct LibraryFunctionInput {
    pub public: bool,
    pub view: bool,
}

#[derive(Arbitrary, Clone, Copy, Debug, PartialEq)]
pub enum VisibilityInput {
    Public,
    Private,
    Internal,
    External,
}

#[derive(Arbitrary, Clone, Copy, Debug, PartialEq)]
pub enum MutabilityInput {
    Pure,
    View,
    Payable,
}
