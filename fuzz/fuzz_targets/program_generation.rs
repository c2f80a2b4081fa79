//! Fuzz target for the program adaptor.
//!
//! Checks that arbitrary structured inputs never panic the builder or the
//! renderer, and that every accepted input yields a program carrying the
//! oracle entry point.

#![no_main]

use contract_generation::{builder, program::ProgramInput, render};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: ProgramInput| {
    if let Some(built) = builder::build(&input) {
        assert_eq!(built.test_contract_name(), "C");
        assert_eq!(built.expected_output(), [0u8; 32]);
        let source = render::program_source(&built);
        assert!(source.contains("function test() public returns (uint)"));
        // Rendering is a pure function of the element tree.
        assert_eq!(source, render::program_source(&built));
    }
});
