//! Memory Management Unit (MMU).
//!
//! This module implements virtual-to-physical address translation for the
//! RISC-V paged virtual memory modes (Bare, Sv32, Sv39, Sv48, Sv57). It
//! blends the hart's effective privilege from MSTATUS (MPRV, MXR), consults
//! the software TLB, and falls back to the page table walker.

/// Page table walker shared by all paged modes.
pub mod ptw;

/// Software TLB caching successful walks as host-pointer biases.
pub mod tlb;

use crate::common::AccessType;
use crate::core::arch::csr::CsrFile;
use crate::core::arch::mode::PrivilegeMode;
use crate::core::arch::MmuMode;
use crate::soc::PhysMap;

use self::tlb::Tlb;

/// Per-hart MMU: the software TLB plus translation entry points.
pub struct Mmu {
    /// Direct-mapped TLB.
    pub tlb: Tlb,
    /// TLB hit counter (for diagnostics).
    pub tlb_hits: u64,
    /// TLB miss counter (for diagnostics).
    pub tlb_misses: u64,
}

impl Mmu {
    /// Creates an MMU with the given TLB entry count.
    pub fn new(tlb_entries: usize) -> Self {
        Self {
            tlb: Tlb::new(tlb_entries),
            tlb_hits: 0,
            tlb_misses: 0,
        }
    }

    /// Translates a virtual address to a physical address.
    ///
    /// Applies MPRV/MXR privilege blending, takes the identity shortcut for
    /// Machine mode and Bare translation, and otherwise walks the page
    /// tables. Returns `None` when no valid translation exists; the caller
    /// converts that into the page fault matching the access type.
    ///
    /// The TLB is not consulted here; the dispatch layer checks it first
    /// and only reaches this translate on a miss.
    pub fn translate(
        &self,
        csrs: &CsrFile,
        privilege: PrivilegeMode,
        pam: &PhysMap,
        vaddr: u64,
        access: AccessType,
    ) -> Option<u64> {
        let mut privilege = privilege;
        // MPRV redirects loads and stores (never fetches) to the privilege
        // held in MPP.
        if csrs.mprv() && access != AccessType::Fetch {
            privilege = csrs.mpp();
        }

        // MXR makes execute-only pages readable: a read walks with the
        // execute permission bit instead.
        let perm = match access {
            AccessType::Read if csrs.mxr() => ptw::PTE_EXEC,
            AccessType::Read => ptw::PTE_READ,
            AccessType::Write => ptw::PTE_WRITE,
            AccessType::Fetch => ptw::PTE_EXEC,
        };

        if privilege == PrivilegeMode::Machine {
            return Some(vaddr);
        }

        match MmuMode::from_satp(csrs.satp_mode()) {
            Some(MmuMode::Bare) => Some(vaddr),
            Some(MmuMode::Sv32) => ptw::walk(csrs, pam, vaddr, perm, &ptw::SV32),
            Some(MmuMode::Sv39) => ptw::walk(csrs, pam, vaddr, perm, &ptw::SV39),
            Some(MmuMode::Sv48) => ptw::walk(csrs, pam, vaddr, perm, &ptw::SV48),
            Some(MmuMode::Sv57) => ptw::walk(csrs, pam, vaddr, perm, &ptw::SV57),
            None => {
                // SATP is WARL; an unknown mode here means the CSR layer let
                // an illegal write through.
                log::error!("unknown SATP mode {:#x} in translation", csrs.satp_mode());
                None
            }
        }
    }
}
