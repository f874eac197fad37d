//! MMIO size and alignment adapter.
//!
//! Device models declare an `[min_op_size, max_op_size]` window of access
//! sizes they decode natively. Guest accesses do not respect that window:
//! a byte store may land in a register file that only decodes words, and a
//! page-crossing split can produce odd sizes. This module adapts any access
//! to the device's window:
//! 1. **Widening:** accesses smaller than `min_op_size` (or misaligned to
//!    it) are served through a power-of-two window read into a scratch
//!    buffer; writes do read-modify-write at window granularity.
//! 2. **Splitting:** accesses larger than `max_op_size` are halved until
//!    they fit.
//!
//! Each step either raises the size to at least `min_op_size` or halves it,
//! so the recursion depth is bounded by log2 of the 16-byte scratch.

use crate::soc::devices::MmioDevice;

/// Largest operation any device may declare, and the scratch size used for
/// widening.
const MAX_MMIO_OP: usize = 16;

/// Computes the widening window for an access of `size` bytes at `offset`.
///
/// Returns `(aligned_offset, offset_diff, window_size)`, or `None` when the
/// window would exceed the scratch buffer.
fn widen_window(min: u64, offset: u64, size: usize) -> Option<(u64, usize, usize)> {
    let aligned = offset & !(min - 1);
    let diff = (offset - aligned) as usize;
    let mut window = min as usize;
    while window < size + diff {
        window <<= 1;
    }
    if window > MAX_MMIO_OP {
        return None;
    }
    Some((aligned, diff, window))
}

/// Reads `buf.len()` bytes from a device at the given device-relative offset,
/// adapting the access to the device's operation window.
pub fn read(dev: &mut dyn MmioDevice, buf: &mut [u8], offset: u64) -> bool {
    if buf.is_empty() {
        return true;
    }
    let (min, max) = dev.op_size_range();
    let size = buf.len();

    if (size as u64) < min || offset & (min - 1) != 0 {
        // Too small or misaligned: read a covering window, use part of it.
        let Some((aligned, diff, window)) = widen_window(min, offset, size) else {
            return false;
        };
        let mut tmp = [0u8; MAX_MMIO_OP];
        if !read(dev, &mut tmp[..window], aligned) {
            return false;
        }
        buf.copy_from_slice(&tmp[diff..diff + size]);
        return true;
    }

    if size as u64 > max {
        let half = size / 2;
        let (lo, hi) = buf.split_at_mut(half);
        return read(dev, lo, offset) && read(dev, hi, offset + half as u64);
    }

    dev.read(buf, offset)
}

/// Writes `buf.len()` bytes to a device at the given device-relative offset,
/// adapting the access to the device's operation window.
///
/// Sub-window writes are performed as read-modify-write at the device's
/// minimum operation size, which is the widening a real bus bridge would do.
pub fn write(dev: &mut dyn MmioDevice, buf: &[u8], offset: u64) -> bool {
    if buf.is_empty() {
        return true;
    }
    let (min, max) = dev.op_size_range();
    let size = buf.len();

    if (size as u64) < min || offset & (min - 1) != 0 {
        let Some((aligned, diff, window)) = widen_window(min, offset, size) else {
            return false;
        };
        let mut tmp = [0u8; MAX_MMIO_OP];
        if !read(dev, &mut tmp[..window], aligned) {
            return false;
        }
        tmp[diff..diff + size].copy_from_slice(buf);
        return write(dev, &tmp[..window], aligned);
    }

    if size as u64 > max {
        let half = size / 2;
        return write(dev, &buf[..half], offset) && write(dev, &buf[half..], offset + half as u64);
    }

    dev.write(buf, offset)
}
