//! Checksum recalculation for Firmware File System (FFS) files.
//!
//! After a build tool edits or assembles an FFS file, the two integrity
//! fields in its header are stale. This crate recomputes both the header
//! checksum and the file data checksum per the UEFI Platform Initialization
//! Specification V1.8A Section 3.2.3.1 (EFI_FFS_FILE_HEADER) and produces
//! the patched file bytes.
//!
//! Files using the large-file header variant (EFI_FFS_FILE_HEADER2) are
//! rejected rather than patched.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod checksum;
pub mod err;
pub mod file;
pub mod patch;

pub use err::FfsChecksumError;
