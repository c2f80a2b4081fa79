// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

/// Program-wide supply of base element names.
///
/// Every new base lengthens a single chain by one `'B'`, yielding
/// `B, BB, BBB, …` across the whole program regardless of nesting, so
/// base names can never collide with each other, with generated function
/// names (`f0, f1, …`) or with the builder-supplied top-level name `C`.
/// Interface names carry an `I` prefix and library names a `Lib` prefix,
/// keeping the three families disjoint.
#[derive(Debug, Default)]
pub struct NameSupply {
    chain: String,
}

impl NameSupply {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name for the next base contract: `B`, `BB`, `BBB`, …
    pub fn next_contract_name(&mut self) -> String {
        self.chain.push('B');
        self.chain.clone()
    }

    /// Name for the next interface: `IB`, `IBB`, …
    pub fn next_interface_name(&mut self) -> String {
        self.chain.push('B');
        format!("I{}", self.chain)
    }

    /// Name for the next library: `LibB`, `LibBB`, …
    pub fn next_library_name(&mut self) -> String {
        self.chain.push('B');
        format!("Lib{}", self.chain)
    }
}
