//! APU unit tests

mod register_tests;
