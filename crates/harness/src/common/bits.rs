//! Bit-field helpers for 32-bit register words.

/// Returns `true` if bit `n` of `word` is set.
#[inline]
pub const fn bit(word: u32, n: u32) -> bool {
    word & (1 << n) != 0
}

/// Returns `word` with bit `n` cleared.
#[inline]
pub const fn clear_bit(word: u32, n: u32) -> u32 {
    word & !(1 << n)
}

/// Extracts `word[hi:lo]` (inclusive).
#[inline]
pub const fn bits(word: u32, hi: u32, lo: u32) -> u32 {
    let width = hi - lo + 1;
    let mask = if width >= 32 { u32::MAX } else { (1 << width) - 1 };
    (word >> lo) & mask
}

/// Splits a 64-bit counter into `(low, high)` words.
#[inline]
pub const fn split_u64(value: u64) -> (u32, u32) {
    (value as u32, (value >> 32) as u32)
}
