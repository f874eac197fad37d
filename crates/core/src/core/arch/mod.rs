//! Architectural state the translation core depends on.
//!
//! 1. **Privilege modes:** User, Supervisor, and Machine levels.
//! 2. **CSR slice:** the SATP and MSTATUS fields translation reads.

/// SATP/MSTATUS fields and the paging mode decoder.
pub mod csr;

/// Privilege mode definitions.
pub mod mode;

pub use csr::{CsrFile, MmuMode};
pub use mode::PrivilegeMode;
