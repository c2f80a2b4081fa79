// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The library model: a flat container of library functions plus the
//! registry of publicly exposed ones.

use crate::{
    common::MAX_FUNCTIONS,
    functions::{LibraryFunction, LibraryMutability},
    program::LibraryInput,
    rng::GeneratorRng,
};
use std::rc::Rc;

#[derive(Debug)]
pub struct Library {
    name: String,
    functions: Vec<LibraryFunction>,
    /// Publicly exposed function name -> literal its body returns.
    registry: Vec<(String, u64)>,
}

impl Library {
    /// Build the library in one pass over the input. Function names and
    /// return literals are fresh per function, so both are unique within
    /// the library.
    pub fn build(input: &LibraryInput, name: String) -> Rc<Library> {
        let mut library = Library {
            name,
            functions: Vec::new(),
            registry: Vec::new(),
        };
        for function in input.functions.iter().take(MAX_FUNCTIONS) {
            let index = library.functions.len();
            let mutability = if function.view {
                LibraryMutability::View
            } else {
                LibraryMutability::Pure
            };
            let function = LibraryFunction {
                library_name: library.name.clone(),
                name: format!("f{}", index),
                public: function.public,
                mutability,
                return_value: index as u64,
            };
            if function.public {
                library
                    .registry
                    .push((function.name.clone(), function.return_value));
            }
            library.functions.push(function);
        }
        Rc::new(library)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn functions(&self) -> &[LibraryFunction] {
        &self.functions
    }

    pub fn registered_functions(&self) -> &[(String, u64)] {
        &self.registry
    }

    /// A library is testable iff it exposes at least one public function.
    pub fn valid_test(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Pick one public function and its expected return, via the PRNG.
    pub fn pseudo_random_test(&self, rng: &mut GeneratorRng) -> Option<(String, u64)> {
        if self.registry.is_empty() {
            return None;
        }
        let index = rng.bounded(self.registry.len() as u32) as usize;
        let (name, value) = &self.registry[index];
        Some((name.clone(), *value))
    }
}
