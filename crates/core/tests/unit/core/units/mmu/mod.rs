
/// Software TLB tests.
pub mod tlb;
