//! Test: A field type without a `ToParamValue` conversion should fail.
//!
//! External types like `std::time::SystemTime` don't implement `ToParamValue`.
//! Use `#[log_fields(debug)]`, `#[log_fields(display)]` or `#[log_fields(skip)]`.

use logfields::LogFields;
use std::time::SystemTime;

#[derive(LogFields)]
pub struct Record {
    pub id: u64,
    // ERROR: SystemTime doesn't implement ToParamValue
    pub created_at: SystemTime,
}

fn main() {}
