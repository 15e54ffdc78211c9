//! Image encoding for stored uploads.
//!
//! Every upload is stored as JPEG, whatever format it arrived in.

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError};
