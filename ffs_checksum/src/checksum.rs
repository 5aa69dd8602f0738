//! 8-bit two's complement checksums used by the FFS integrity fields.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

/// Wrapping 8-bit sum of all bytes in the buffer.
pub fn sum8(buffer: &[u8]) -> u8 {
    buffer.iter().fold(0u8, |sum, value| sum.wrapping_add(*value))
}

/// Two's complement checksum of the buffer.
///
/// Appending the returned byte to the buffer makes the whole sum to zero
/// mod 256. A buffer that already sums to zero yields a checksum of zero.
pub fn checksum8(buffer: &[u8]) -> u8 {
    0u8.wrapping_sub(sum8(buffer))
}
