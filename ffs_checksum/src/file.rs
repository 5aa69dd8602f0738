//! Firmware File System (FFS) file header layout.
//!
//! Based on the values defined in the UEFI Platform Initialization (PI)
//! Specification V1.8A Section 3.2.3.1 EFI_FFS_FILE_HEADER.
//!
//! The header is decoded and encoded field by field with a defined byte
//! order rather than overlaid on the buffer, so the layout holds on any
//! target regardless of alignment or endianness.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!

use crate::FfsChecksumError;
use r_efi::efi;

/// Serialized size of EFI_FFS_FILE_HEADER in bytes.
///
/// This is a wire-compatibility constant shared with other firmware
/// tooling and must not change.
pub const HEADER_SIZE: usize = 24;

/// Value of the file checksum field when the checksum attribute is clear.
pub const FFS_FIXED_CHECKSUM: u8 = 0xAA;

/// Raw FFS attribute constant definitions
pub mod attributes {
    /// Large file attribute
    pub const LARGE_FILE: u8 = 0x01;
    /// 2-byte data alignment
    pub const DATA_ALIGNMENT_2: u8 = 0x02;
    /// File must be at a fixed address
    pub const FIXED: u8 = 0x04;
    /// Data alignment mask
    pub const DATA_ALIGNMENT: u8 = 0x38;
    /// File checksum attribute
    pub const CHECKSUM: u8 = 0x40;
}

/// Raw FFS file state bit definitions
pub mod state {
    /// File header is under construction
    pub const HEADER_CONSTRUCTION: u8 = 0x01;
    /// File header is valid
    pub const HEADER_VALID: u8 = 0x02;
    /// File data is valid
    pub const DATA_VALID: u8 = 0x04;
    /// File is marked for update
    pub const MARKED_FOR_UPDATE: u8 = 0x08;
    /// File has been deleted
    pub const DELETED: u8 = 0x10;
    /// File header is invalid
    pub const HEADER_INVALID: u8 = 0x20;
}

/// Owned value representation of EFI_FFS_FILE_HEADER.
///
/// The size field is kept as a `u32` decoded from the 3-byte little-endian
/// wire field; only the low 24 bits are representable on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Unique file GUID identifier, opaque to this crate.
    pub name: efi::Guid,
    /// Header checksum value
    pub integrity_check_header: u8,
    /// File checksum value
    pub integrity_check_file: u8,
    /// Type of file, opaque to this crate.
    pub file_type: u8,
    /// File attributes
    pub attributes: u8,
    /// Total file size in bytes, including the header.
    pub size: u32,
    /// File state (see state constants)
    pub state: u8,
}

impl Header {
    /// Decode the first [`HEADER_SIZE`] bytes of `buffer` as an FFS file header.
    ///
    /// Errors
    /// - [`FfsChecksumError::TruncatedInput`]: buffer shorter than a header.
    /// - [`FfsChecksumError::UnsupportedLargeFile`]: large-file attribute set;
    ///   the 3-byte size field is not authoritative in that layout.
    /// - [`FfsChecksumError::InvalidSize`]: declared size smaller than the header.
    pub fn decode(buffer: &[u8]) -> Result<Self, FfsChecksumError> {
        if buffer.len() < HEADER_SIZE {
            Err(FfsChecksumError::TruncatedInput { expected: HEADER_SIZE, actual: buffer.len() })?;
        }

        let file_attributes = buffer[19];
        if file_attributes & attributes::LARGE_FILE != 0 {
            Err(FfsChecksumError::UnsupportedLargeFile)?;
        }

        let size = (buffer[22] as u32) << 16 | (buffer[21] as u32) << 8 | buffer[20] as u32;
        if (size as usize) < HEADER_SIZE {
            Err(FfsChecksumError::InvalidSize(size))?;
        }

        let mut name = [0u8; 16];
        name.copy_from_slice(&buffer[0..16]);

        Ok(Self {
            name: efi::Guid::from_bytes(&name),
            integrity_check_header: buffer[16],
            integrity_check_file: buffer[17],
            file_type: buffer[18],
            attributes: file_attributes,
            size,
            state: buffer[23],
        })
    }

    /// Serialize the header into exactly [`HEADER_SIZE`] bytes.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buffer = [0u8; HEADER_SIZE];
        buffer[0..16].copy_from_slice(self.name.as_bytes());
        buffer[16] = self.integrity_check_header;
        buffer[17] = self.integrity_check_file;
        buffer[18] = self.file_type;
        buffer[19] = self.attributes;
        buffer[20..23].copy_from_slice(&self.size.to_le_bytes()[0..3]);
        buffer[23] = self.state;
        buffer
    }

    /// Length of the file payload following the header, in bytes.
    pub fn payload_len(&self) -> usize {
        self.size as usize - HEADER_SIZE
    }

    /// Returns `true` if the file has the data checksum attribute set.
    pub fn is_data_checksum(&self) -> bool {
        self.attributes & attributes::CHECKSUM != 0
    }

    /// Returns `true` if the file uses the large-file header layout.
    pub fn is_large_file(&self) -> bool {
        self.attributes & attributes::LARGE_FILE != 0
    }
}
