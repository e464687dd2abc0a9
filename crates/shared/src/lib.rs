pub mod domain;
pub mod error;

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod domain_tests;
