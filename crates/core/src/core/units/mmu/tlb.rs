//! Translation Lookaside Buffer (TLB).
//!
//! A direct-mapped, per-hart cache of successful page walks into RAM. Each
//! slot carries three independent tags, one per access kind, plus a single
//! host-pointer bias:
//!
//! * A tag equal to the looked-up VPN is a hit for that access kind.
//! * `host_bias` is the page's host pointer minus the page's virtual base,
//!   so turning a virtual address into a host address on a hit is one add.
//!
//! Separate R/W/X tags let a write-capable fill also serve reads without a
//! second walk, while a later write to a read-only fill still misses and
//! re-walks (which is what updates the PTE dirty bit). Fetch is tracked on
//! its own because MXR and MPRV give it different blending rules.

use crate::common::AccessType;
use crate::common::constants::PAGE_SHIFT;

/// Tag value that can never equal a real VPN, marking a sub-entry invalid.
const INVALID_TAG: u64 = u64::MAX;

/// A single direct-mapped TLB slot.
#[derive(Clone, Copy)]
struct TlbEntry {
    /// Read tag (VPN, or `INVALID_TAG`).
    tag_r: u64,
    /// Write tag.
    tag_w: u64,
    /// Execute tag.
    tag_x: u64,
    /// Host pointer of the mapped page minus the page's virtual base,
    /// as a wrapping usize.
    host_bias: usize,
}

impl Default for TlbEntry {
    fn default() -> Self {
        Self {
            tag_r: INVALID_TAG,
            tag_w: INVALID_TAG,
            tag_x: INVALID_TAG,
            host_bias: 0,
        }
    }
}

/// Direct-mapped software TLB.
pub struct Tlb {
    entries: Vec<TlbEntry>,
    mask: u64,
}

impl Tlb {
    /// Creates a TLB with the given entry count, rounded up to a power of two.
    pub fn new(entries: usize) -> Self {
        let size = if entries.is_power_of_two() {
            entries
        } else {
            entries.next_power_of_two()
        };

        Self {
            entries: vec![TlbEntry::default(); size],
            mask: (size - 1) as u64,
        }
    }

    /// Looks up a VPN for the given access kind.
    ///
    /// Returns the host-pointer bias on a hit. Adding the full virtual
    /// address to the bias yields the host address of the access.
    #[inline(always)]
    pub fn lookup(&self, vpn: u64, access: AccessType) -> Option<usize> {
        let idx = (vpn & self.mask) as usize;

        // SAFETY: idx is masked with (len - 1) and len is a power of two,
        // so idx is always in bounds.
        let entry = unsafe { self.entries.get_unchecked(idx) };

        let tag = match access {
            AccessType::Read => entry.tag_r,
            AccessType::Write => entry.tag_w,
            AccessType::Fetch => entry.tag_x,
        };
        if tag == vpn {
            return Some(entry.host_bias);
        }
        None
    }

    /// Installs a translation after a successful walk into RAM.
    ///
    /// Only the tag for the requested access kind is set (a write fill also
    /// serves reads); sibling tags holding a different VPN are invalidated
    /// so the slot never mixes two pages. Filling exactly the requested
    /// access is what keeps the accessed/dirty protocol honest: a page must
    /// be re-walked before the first write through it.
    pub fn put(&mut self, vaddr: u64, host_bias: usize, access: AccessType) {
        let vpn = vaddr >> PAGE_SHIFT;
        let idx = (vpn & self.mask) as usize;
        let entry = &mut self.entries[idx];

        match access {
            AccessType::Read => {
                entry.tag_r = vpn;
                if entry.tag_w != vpn {
                    entry.tag_w = INVALID_TAG;
                }
                if entry.tag_x != vpn {
                    entry.tag_x = INVALID_TAG;
                }
            }
            AccessType::Write => {
                entry.tag_r = vpn;
                entry.tag_w = vpn;
                if entry.tag_x != vpn {
                    entry.tag_x = INVALID_TAG;
                }
            }
            AccessType::Fetch => {
                if entry.tag_r != vpn {
                    entry.tag_r = INVALID_TAG;
                }
                if entry.tag_w != vpn {
                    entry.tag_w = INVALID_TAG;
                }
                entry.tag_x = vpn;
            }
        }

        entry.host_bias = host_bias;
    }

    /// Invalidates every entry.
    ///
    /// Called on SFENCE.VMA with no address, SATP writes, and privilege or
    /// MSTATUS changes that affect translation.
    pub fn flush(&mut self) {
        for entry in &mut self.entries {
            *entry = TlbEntry::default();
        }
    }

    /// Invalidates the slot covering one virtual address.
    ///
    /// Called on SFENCE.VMA with an address argument. Other slots keep
    /// their translations.
    pub fn flush_page(&mut self, vaddr: u64) {
        let vpn = vaddr >> PAGE_SHIFT;
        self.entries[(vpn & self.mask) as usize] = TlbEntry::default();
    }
}
