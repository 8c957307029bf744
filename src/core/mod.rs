//! Purpose: Core behavior behind the `edtools` commands.
//! Exports: `canon` (canonical JSON), `error` (error type + exit codes).
//! Invariants: No global state; every operation takes explicit inputs.
pub mod canon;
pub mod error;

pub use canon::{canonical_json, canonicalize_file, parse_document};
pub use error::{Error, ErrorKind, to_exit_code};
