//! Test: Deriving `LogFields` on a type with a lifetime parameter should fail.
//!
//! Metadata is cached per `TypeId`, which only exists for `'static` types.
//! Store owned data, or log a `'static` projection of the borrowed value.

use logfields::LogFields;

#[derive(LogFields)]
// ERROR: lifetime parameters are rejected
pub struct Borrowed<'a> {
    pub name: &'a str,
}

fn main() {}
