//! Core pipeline module: values, fields, handlers, validators, containers.

pub use remould_core::*;
