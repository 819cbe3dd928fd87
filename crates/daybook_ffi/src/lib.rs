//! FFI crate exposing daybook core use-cases to the Flutter shell.

pub mod api;
