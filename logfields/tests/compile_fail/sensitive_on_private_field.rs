//! Test: `#[sensitive]` on a private field should fail.
//!
//! Private fields are not params unless the type opts in with
//! `#[log_fields(include_private)]`, so the marker would do nothing.

use logfields::LogFields;

#[derive(LogFields)]
pub struct Login {
    pub user: String,
    // ERROR: make the field `pub` or add #[log_fields(include_private)]
    #[sensitive(secretive)]
    password: String,
}

fn main() {}
