//! Single-pass printable-byte counter.

use super::histogram::Histogram;

/// Counts the printable bytes (0x20..=0x7E) in `buf` and builds the
/// per-character delta in one pass.
///
/// Pure: the same buffer always yields the same pair. The count fits a
/// `u32` because the wire protocol caps a payload at `u32::MAX` bytes.
pub fn count_printable(buf: &[u8]) -> (u32, Histogram) {
    let mut delta = Histogram::zeroed();
    let mut count = 0u32;
    for &byte in buf {
        if delta.record(byte) {
            count += 1;
        }
    }
    (count, delta)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world_counts_all_but_the_newline() {
        let (count, delta) = count_printable(b"Hello, World!\n");
        assert_eq!(count, 13);
        assert_eq!(delta.count_of(b'l'), Some(3));
        assert_eq!(delta.count_of(b'o'), Some(2));
        assert_eq!(delta.count_of(b'\n'), None);
    }

    #[test]
    fn test_boundary_bytes_are_both_counted() {
        let (count, delta) = count_printable(&[0x20, 0x7E]);
        assert_eq!(count, 2);
        assert_eq!(delta.count_of(0x20), Some(1));
        assert_eq!(delta.count_of(0x7E), Some(1));
    }

    #[test]
    fn test_bytes_just_outside_the_range_are_not_counted() {
        let (count, delta) = count_printable(&[0x1F, 0x7F]);
        assert_eq!(count, 0);
        assert_eq!(delta.total(), 0);
    }

    #[test]
    fn test_empty_buffer_yields_zero_and_a_zero_delta() {
        let (count, delta) = count_printable(&[]);
        assert_eq!(count, 0);
        assert_eq!(delta, Histogram::zeroed());
    }

    #[test]
    fn test_hundred_nul_bytes_yield_zero() {
        let (count, delta) = count_printable(&[0u8; 100]);
        assert_eq!(count, 0);
        assert_eq!(delta, Histogram::zeroed());
    }

    #[test]
    fn test_delta_total_equals_count() {
        let buf: Vec<u8> = (0u8..=255).cycle().take(1000).collect();
        let (count, delta) = count_printable(&buf);
        assert_eq!(delta.total(), u64::from(count));
    }

    #[test]
    fn test_counting_is_idempotent() {
        let buf = b"same input, same answer";
        assert_eq!(count_printable(buf), count_printable(buf));
    }
}
