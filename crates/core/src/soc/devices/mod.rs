//! Device trait for memory-mapped I/O.
//!
//! This module defines the `MmioDevice` trait implemented by all device
//! models attached to the physical address map. It provides:
//! 1. **Identification:** `name` and `address_range` for routing.
//! 2. **Operation Window:** the `[min_op_size, max_op_size]` band of access
//!    sizes the device decodes natively; the MMIO adapter widens and splits
//!    accesses to fit it.
//! 3. **Access:** byte-buffer read/write at device-relative offsets.
//!
//! All implementors must be `Send + Sync`; harts on different host threads
//! may reach the same device. Internal locking is the device's concern.

/// Trait for memory-mapped I/O devices attached to the physical address map.
///
/// `read` and `write` are only ever called with a buffer length inside the
/// device's declared operation window and an offset aligned to
/// `min_op_size`; the adapter in [`crate::soc::mmio`] takes care of
/// everything else. Returning `false` signals an access error inside the
/// decoded range (for example a register hole), which the dispatcher turns
/// into an access fault.
pub trait MmioDevice: Send + Sync {
    /// Returns a short name for this device (e.g. `"UART0"`, `"CLINT"`).
    fn name(&self) -> &str;

    /// Returns `(base_address, size_in_bytes)` of the device's MMIO region.
    fn address_range(&self) -> (u64, u64);

    /// Returns `(min_op_size, max_op_size)` in bytes.
    ///
    /// Both must be powers of two with `min <= max <= 16`. The default
    /// window accepts any power-of-two access up to a doubleword.
    fn op_size_range(&self) -> (u64, u64) {
        (1, 8)
    }

    /// Reads `buf.len()` bytes at the given device-relative offset.
    fn read(&mut self, buf: &mut [u8], offset: u64) -> bool;

    /// Writes `buf.len()` bytes at the given device-relative offset.
    fn write(&mut self, buf: &[u8], offset: u64) -> bool;
}
