//! C ABI over the temperature model
//!
//! Lets a host UI (Android via JNI, iOS via Swift, or plain C) own the slider
//! widgets while the model, its conversions and its persistence stay in Rust.
//! The generated header is written to `TempConverterFFI.h` at the workspace root.
//!
//! # Conventions
//! - Every fallible function returns `TempConvErrorCode`; `Ok` is 0.
//! - Results come back through out-parameters.
//! - On failure, `temp_conv_get_last_error()` describes what went wrong.
//! - Instances are single-threaded: use them from the UI thread only.

mod controls;
mod error;
mod helpers;
mod instance;
mod model;
mod persistence;
mod subscription;

pub use controls::*;
pub use error::*;
pub use instance::*;
pub use model::*;
pub use persistence::*;
pub use subscription::*;
