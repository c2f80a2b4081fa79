// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

use arbitrary::{Arbitrary, Unstructured};
use contract_generation::{
    builder, program::ProgramInput, proptest_types::program_input_strategy, render,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn identical_input_identical_program(input in program_input_strategy()) {
        let first = builder::build(&input);
        let second = builder::build(&input);
        match (first, second) {
            (None, None) => {}
            (Some(first), Some(second)) => {
                prop_assert_eq!(&first.test, &second.test);
                prop_assert_eq!(&first.library_name, &second.library_name);
                prop_assert_eq!(
                    render::program_source(&first),
                    render::program_source(&second)
                );
            }
            _ => prop_assert!(false, "builds of one input diverged"),
        }
    }

    #[test]
    fn rendering_is_pure(input in program_input_strategy()) {
        if let Some(built) = builder::build(&input) {
            prop_assert_eq!(
                render::program_source(&built),
                render::program_source(&built)
            );
        }
    }

    #[test]
    fn raw_bytes_decode_deterministically(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let first = ProgramInput::arbitrary_take_rest(Unstructured::new(&bytes));
        let second = ProgramInput::arbitrary_take_rest(Unstructured::new(&bytes));
        match (first, second) {
            (Ok(first), Ok(second)) => prop_assert_eq!(first, second),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "decoding of one byte string diverged"),
        }
    }

    #[test]
    fn no_disallowed_function_is_rendered(input in program_input_strategy()) {
        if let Some(built) = builder::build(&input) {
            let source = render::program_source(&built);
            let mut in_interface = false;
            for line in source.lines() {
                if line.starts_with("interface ") {
                    in_interface = true;
                } else if line.starts_with("}") {
                    in_interface = false;
                }
                prop_assert!(
                    !(line.contains("private") && line.contains("virtual")),
                    "private virtual function rendered: {}",
                    line
                );
                if line.contains("payable") {
                    prop_assert!(
                        !line.contains("internal") && !line.contains("private"),
                        "payable function with uncallable visibility rendered: {}",
                        line
                    );
                    prop_assert!(
                        line.contains("public") || line.contains("external"),
                        "payable function without callable visibility rendered: {}",
                        line
                    );
                }
                // Outside interfaces, a bodyless declaration must stay
                // overridable.
                if !in_interface
                    && line.trim_start().starts_with("function")
                    && line.trim_end().ends_with(");")
                {
                    prop_assert!(
                        line.contains("virtual"),
                        "bodyless non-virtual function rendered: {}",
                        line
                    );
                }
            }
        }
    }

    #[test]
    fn chosen_test_targets_the_top_level_contract(input in program_input_strategy()) {
        if let Some(built) = builder::build(&input) {
            prop_assert_eq!(built.test_contract_name(), "C");
            prop_assert_eq!(built.expected_output(), [0u8; 32]);
        }
    }
}
