//! Test: Deriving `LogFields` on an enum should fail.
//!
//! Only structs have a fixed set of fields to describe.

use logfields::LogFields;

// ERROR: LogFields can only be derived for structs
#[derive(LogFields)]
pub enum Status {
    Active,
    Closed,
}

fn main() {}
