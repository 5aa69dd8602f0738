//! Error types for FFS checksum recalculation.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

use core::fmt;

/// Error definitions for FFS checksum recalculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfsChecksumError {
    /// The input ended before the declared header or payload size.
    TruncatedInput {
        /// Number of bytes required.
        expected: usize,
        /// Number of bytes available.
        actual: usize,
    },
    /// The declared file size is smaller than the file header.
    InvalidSize(u32),
    /// The file uses the large-file (EFI_FFS_FILE_HEADER2) layout.
    UnsupportedLargeFile,
}

impl fmt::Display for FfsChecksumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfsChecksumError::TruncatedInput { expected, actual } => {
                write!(f, "truncated input: needed {} bytes, got {}", expected, actual)
            }
            FfsChecksumError::InvalidSize(size) => {
                write!(f, "declared size {} is smaller than the {}-byte file header", size, crate::file::HEADER_SIZE)
            }
            FfsChecksumError::UnsupportedLargeFile => {
                write!(f, "FFS_ATTRIB_LARGE_FILE is set; large files are not supported")
            }
        }
    }
}
