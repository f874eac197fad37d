
/// Guest RAM region tests.
pub mod memory;
