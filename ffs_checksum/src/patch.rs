//! Recomputation of the FFS file integrity fields.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent

use crate::{
    FfsChecksumError, checksum,
    file::{self, Header},
};

use alloc::vec::Vec;

/// Recompute both integrity fields of a serialized FFS file.
///
/// Takes the raw file bytes (header followed by payload) and returns the
/// patched file bytes. The header checksum is computed over the header with
/// the header checksum, file checksum, and state fields all zero, such that
/// the header sums to zero mod 256. The file checksum covers the payload
/// when FFS_ATTRIB_CHECKSUM is set and is otherwise the fixed value 0xAA.
/// The state field is preserved verbatim in the output.
///
/// Bytes beyond the declared file size are not part of the file and are not
/// carried into the output.
///
/// Errors
/// - [`FfsChecksumError::TruncatedInput`]: input shorter than the header or
///   the declared payload length.
/// - [`FfsChecksumError::InvalidSize`]: declared size smaller than the header.
/// - [`FfsChecksumError::UnsupportedLargeFile`]: large-file attribute set.
pub fn fix_checksums(input: &[u8]) -> Result<Vec<u8>, FfsChecksumError> {
    let mut header = Header::decode(input)?;

    let payload_len = header.payload_len();
    let available = input.len() - file::HEADER_SIZE;
    if available < payload_len {
        Err(FfsChecksumError::TruncatedInput { expected: payload_len, actual: available })?;
    }
    let payload = &input[file::HEADER_SIZE..file::HEADER_SIZE + payload_len];

    // The header checksum is defined with the file checksum and state fields
    // assumed zero; all three must be zero while it is computed.
    let old_state = header.state;
    header.integrity_check_header = 0;
    header.integrity_check_file = 0;
    header.state = 0;
    header.integrity_check_header = checksum::checksum8(&header.encode());

    if header.is_data_checksum() {
        header.integrity_check_file = checksum::checksum8(payload);
    } else {
        header.integrity_check_file = file::FFS_FIXED_CHECKSUM;
    }

    header.state = old_state;

    log::debug!(
        "header checksum {:#04x}, file checksum {:#04x}",
        header.integrity_check_header,
        header.integrity_check_file
    );

    let mut output = Vec::with_capacity(file::HEADER_SIZE + payload_len);
    output.extend_from_slice(&header.encode());
    output.extend_from_slice(payload);
    Ok(output)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::file::attributes;
    use log::{Level, LevelFilter, Metadata, Record};

    // Sample logger for log crate to dump stuff in tests
    struct SimpleLogger;
    impl log::Log for SimpleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Debug
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                println!("{}", record.args());
            }
        }

        fn flush(&self) {}
    }
    static LOGGER: SimpleLogger = SimpleLogger;

    fn set_logger() {
        let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug));
    }

    fn build_file(attributes: u8, state: u8, payload: &[u8]) -> Vec<u8> {
        let size = file::HEADER_SIZE + payload.len();
        let mut bytes = Vec::with_capacity(size);
        bytes.extend_from_slice(&[0u8; 16]);
        bytes.push(0); // header checksum
        bytes.push(0); // file checksum
        bytes.push(0); // file type
        bytes.push(attributes);
        bytes.extend_from_slice(&size.to_le_bytes()[0..3]);
        bytes.push(state);
        bytes.extend_from_slice(payload);
        bytes
    }

    // Per PI spec: with state and the file checksum backed out, the header
    // bytes must sum to zero.
    fn assert_header_sums_to_zero(output: &[u8]) {
        let sum = checksum::sum8(&output[..file::HEADER_SIZE]);
        let sum = sum.wrapping_sub(output[23]);
        let sum = sum.wrapping_sub(output[17]);
        assert_eq!(sum, 0);
    }

    #[test]
    fn end_to_end_example() {
        set_logger();
        let input = build_file(attributes::CHECKSUM, 0x07, &[0x01, 0x02, 0x03, 0x04]);
        let output = fix_checksums(&input).unwrap();

        assert_eq!(output.len(), input.len());
        // file checksum: (0x100 - 10) mod 256
        assert_eq!(output[17], 0xF6);
        // header checksum over zeroed fields: name 0s + type 0 + attr 0x40 + size 28
        assert_eq!(output[16], 0u8.wrapping_sub(0x40 + 28));
        // state restored
        assert_eq!(output[23], 0x07);
        // payload untouched
        assert_eq!(&output[24..], &[0x01, 0x02, 0x03, 0x04]);
        assert_header_sums_to_zero(&output);
    }

    #[test]
    fn fixed_checksum_when_attribute_clear() {
        let input = build_file(0, 0x07, &[0x01, 0x02, 0x03, 0x04]);
        let output = fix_checksums(&input).unwrap();
        assert_eq!(output[17], file::FFS_FIXED_CHECKSUM);
        assert_header_sums_to_zero(&output);
    }

    #[test]
    fn idempotent_on_patched_output() {
        let input = build_file(attributes::CHECKSUM, 0xF8, &[0xDE, 0xAD, 0xBE, 0xEF, 0x42]);
        let first = fix_checksums(&input).unwrap();
        let second = fix_checksums(&first).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn state_is_preserved() {
        for state in [0x00, 0x07, 0x1F, 0xF8, 0xFF] {
            let input = build_file(attributes::CHECKSUM, state, b"payload");
            let output = fix_checksums(&input).unwrap();
            assert_eq!(output[23], state);
            // state must not leak into the header checksum
            assert_header_sums_to_zero(&output);
        }
    }

    #[test]
    fn header_checksum_independent_of_state_and_file_checksum() {
        let a = fix_checksums(&build_file(attributes::CHECKSUM, 0x07, b"abc")).unwrap();
        let b = fix_checksums(&build_file(attributes::CHECKSUM, 0xF8, b"xyz")).unwrap();
        assert_eq!(a[16], b[16]);
    }

    #[test]
    fn zero_length_payload() {
        let input = build_file(attributes::CHECKSUM, 0x07, &[]);
        let output = fix_checksums(&input).unwrap();
        assert_eq!(output.len(), file::HEADER_SIZE);
        // empty payload sums to zero, so its checksum is zero
        assert_eq!(output[17], 0x00);
        assert_header_sums_to_zero(&output);
    }

    #[test]
    fn rejects_large_file() {
        let input = build_file(attributes::LARGE_FILE, 0x07, &[0x01, 0x02]);
        assert_eq!(fix_checksums(&input), Err(FfsChecksumError::UnsupportedLargeFile));
    }

    #[test]
    fn rejects_truncated_payload() {
        let mut input = build_file(attributes::CHECKSUM, 0x07, &[0x01, 0x02, 0x03, 0x04]);
        input.truncate(input.len() - 2);
        assert_eq!(
            fix_checksums(&input),
            Err(FfsChecksumError::TruncatedInput { expected: 4, actual: 2 })
        );
    }

    #[test]
    fn rejects_truncated_header() {
        let input = [0u8; file::HEADER_SIZE - 1];
        assert_eq!(
            fix_checksums(&input),
            Err(FfsChecksumError::TruncatedInput {
                expected: file::HEADER_SIZE,
                actual: file::HEADER_SIZE - 1
            })
        );
    }

    #[test]
    fn trailing_bytes_beyond_declared_size_are_dropped() {
        let mut input = build_file(attributes::CHECKSUM, 0x07, &[0x01, 0x02, 0x03, 0x04]);
        let expected = fix_checksums(&input).unwrap();
        input.extend_from_slice(&[0xEE, 0xEE]);
        let output = fix_checksums(&input).unwrap();
        assert_eq!(output, expected);
    }
}
