//! Executable for fixing the checksums of an FFS file in place.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!

use clap::Parser;
use std::{fs, path::PathBuf, process::ExitCode};

#[derive(Parser, Debug)]
struct Args {
    /// Path to the FFS file whose checksums should be recomputed.
    input_path: PathBuf,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Usage errors (including a missing argument) exit with status 1;
            // --help and --version are not failures.
            let code = if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
            let _ = err.print();
            return code;
        }
    };

    let buffer = match fs::read(&args.input_path) {
        Ok(buffer) => buffer,
        Err(err) => {
            eprintln!("Error: failed to read {}: {}", args.input_path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let patched = match ffs_checksum::patch::fix_checksums(&buffer) {
        Ok(patched) => patched,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // The file is only opened for writing once the computation has succeeded,
    // so a failure never leaves a half-written file behind.
    if let Err(err) = fs::write(&args.input_path, &patched) {
        eprintln!("Error: failed to write {}: {}", args.input_path.display(), err);
        return ExitCode::FAILURE;
    }

    println!("Successfully updated checksums");
    ExitCode::SUCCESS
}
