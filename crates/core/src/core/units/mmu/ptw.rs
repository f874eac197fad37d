//! Page Table Walker (PTW).
//!
//! One walk routine serves every paged mode; Sv32, Sv39, Sv48 and Sv57
//! differ only in their geometry (VPN bits per level, level count, physical
//! address width, PTE size). The walker traverses the tree from the root in
//! SATP, rejects non-canonical virtual addresses and malformed entries, and
//! updates the accessed/dirty flags of the leaf it resolves through.
//!
//! PTE loads and flag updates go straight to host memory through the
//! physical address map. Other harts walk the same tables concurrently, so
//! flag updates use compare-and-swap at the PTE's natural width.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::common::constants::PAGE_SHIFT;
use crate::core::arch::csr::CsrFile;
use crate::soc::PhysMap;

/// PTE valid bit (bit 0).
pub const PTE_VALID: u64 = 1 << 0;

/// PTE read permission bit (bit 1).
pub const PTE_READ: u64 = 1 << 1;

/// PTE write permission bit (bit 2).
pub const PTE_WRITE: u64 = 1 << 2;

/// PTE execute permission bit (bit 3).
pub const PTE_EXEC: u64 = 1 << 3;

/// PTE accessed bit (bit 6).
pub const PTE_ACCESSED: u64 = 1 << 6;

/// PTE dirty bit (bit 7).
pub const PTE_DIRTY: u64 = 1 << 7;

/// An entry with any of R/W/X set is a leaf.
const PTE_LEAF: u64 = PTE_READ | PTE_WRITE | PTE_EXEC;

/// Bit position where the PPN field starts in a PTE.
const PTE_PPN_SHIFT: u64 = 10;

/// Per-mode walk geometry.
pub(crate) struct PagingGeometry {
    /// VPN bits consumed per level.
    pub vpn_bits: u64,
    /// Number of page-table levels.
    pub levels: u64,
    /// Implemented physical address width.
    pub phys_bits: u64,
    /// PTE size in bytes.
    pub pte_bytes: u64,
}

/// Sv32: two levels of 10-bit VPNs, 34-bit physical addresses, 32-bit PTEs.
pub(crate) const SV32: PagingGeometry = PagingGeometry {
    vpn_bits: 10,
    levels: 2,
    phys_bits: 34,
    pte_bytes: 4,
};

/// Sv39: three levels of 9-bit VPNs, 56-bit physical addresses, 64-bit PTEs.
pub(crate) const SV39: PagingGeometry = PagingGeometry {
    vpn_bits: 9,
    levels: 3,
    phys_bits: 56,
    pte_bytes: 8,
};

/// Sv48: four levels.
pub(crate) const SV48: PagingGeometry = PagingGeometry {
    vpn_bits: 9,
    levels: 4,
    phys_bits: 56,
    pte_bytes: 8,
};

/// Sv57: five levels.
pub(crate) const SV57: PagingGeometry = PagingGeometry {
    vpn_bits: 9,
    levels: 5,
    phys_bits: 56,
    pte_bytes: 8,
};

/// Returns a mask of the low `bits` bits.
#[inline(always)]
fn bit_mask(bits: u64) -> u64 {
    (1u64 << bits) - 1
}

/// Sign-extends `val` from bit position `bit` upward.
#[inline(always)]
fn sign_extend(val: u64, bit: u64) -> u64 {
    let shift = 63 - bit;
    (((val << shift) as i64) >> shift) as u64
}

/// Loads a PTE word from host memory, little-endian.
///
/// Tables are page-aligned and entries naturally aligned within them, so
/// the host pointer is always aligned for an atomic load.
#[inline(always)]
fn load_pte(host: *mut u8, pte_bytes: u64) -> u64 {
    unsafe {
        if pte_bytes == 4 {
            u32::from_le((*(host as *const AtomicU32)).load(Ordering::Relaxed)) as u64
        } else {
            u64::from_le((*(host as *const AtomicU64)).load(Ordering::Relaxed))
        }
    }
}

/// Publishes updated A/D flags with a compare-and-swap at the PTE's width.
///
/// A failed exchange is not retried: the only contending writers are other
/// walkers setting the same or stronger flags, so the architectural effect
/// is achieved either way.
#[inline(always)]
fn store_pte_flags(host: *mut u8, pte_bytes: u64, old: u64, new: u64) {
    unsafe {
        if pte_bytes == 4 {
            let word = &*(host as *const AtomicU32);
            let _ = word.compare_exchange(
                (old as u32).to_le(),
                (new as u32).to_le(),
                Ordering::Relaxed,
                Ordering::Relaxed,
            );
        } else {
            let word = &*(host as *const AtomicU64);
            let _ = word.compare_exchange(
                old.to_le(),
                new.to_le(),
                Ordering::Relaxed,
                Ordering::Relaxed,
            );
        }
    }
}

/// Walks the page tables for `vaddr`, requiring the permission bit `perm`
/// (one of `PTE_READ`, `PTE_WRITE`, `PTE_EXEC`) on the resolved leaf.
///
/// Returns the translated physical address, or `None` when no valid
/// translation exists: non-canonical address, a PTE outside RAM, an invalid
/// or reserved entry, a missing permission, a misaligned superpage, or a
/// tree deeper than the mode allows.
pub(crate) fn walk(
    csrs: &CsrFile,
    pam: &PhysMap,
    vaddr: u64,
    perm: u64,
    geo: &PagingGeometry,
) -> Option<u64> {
    let mut pagetable = csrs.root_page_table();
    let mut bit_off = (geo.levels - 1) * geo.vpn_bits + PAGE_SHIFT;

    if geo.pte_bytes == 8 {
        // Bits above the top implemented VPN bit must be its sign extension.
        let top_bit = bit_off + geo.vpn_bits - 1;
        if vaddr != sign_extend(vaddr, top_bit) {
            return None;
        }
    }

    for _ in 0..geo.levels {
        let index = (vaddr >> bit_off) & bit_mask(geo.vpn_bits);
        let pte_host = pam.phys_to_host(pagetable + index * geo.pte_bytes)?;
        let pte = load_pte(pte_host, geo.pte_bytes);

        if pte & PTE_VALID == 0 || (pte & PTE_READ == 0 && pte & PTE_WRITE != 0) {
            return None;
        }

        if pte & PTE_LEAF != 0 {
            if pte & perm == 0 {
                return None;
            }

            let vmask = bit_mask(bit_off);
            let pmask = bit_mask(geo.phys_bits - bit_off) << bit_off;
            let pte_shift = pte << 2;

            // PPN bits below this level must be zero, otherwise the
            // superpage is misaligned.
            if (pte >> PTE_PPN_SHIFT) & bit_mask(bit_off - PAGE_SHIFT) != 0 {
                return None;
            }

            let flags = pte
                | PTE_ACCESSED
                | if perm == PTE_WRITE { PTE_DIRTY } else { 0 };
            if flags != pte {
                store_pte_flags(pte_host, geo.pte_bytes, pte, flags);
            }

            return Some((pte_shift & pmask) | (vaddr & vmask));
        }

        // Pointer to the next-level table.
        pagetable = ((pte >> PTE_PPN_SHIFT) << PAGE_SHIFT) & bit_mask(geo.phys_bits);
        bit_off -= geo.vpn_bits;
    }

    None
}
