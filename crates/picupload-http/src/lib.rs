//! picupload HTTP - multipart upload endpoint for picupload-core
//!
//! # Module Structure
//!
//! - `config` - Environment configuration
//! - `multipart` - [`upload_file`], the form-to-pipeline adapter
//! - `routes` - axum handlers and router
//! - `error` - JSON error responses
//!
//! # Usage
//!
//! ```text
//! curl -F get_picture=@photo.png 'http://localhost:3000/upload/avatar-42?width=320'
//! {"path":"/images/avatar-42.jpg"}
//! ```

pub mod config;
pub mod error;
pub mod multipart;
pub mod routes;

pub use error::ApiError;
pub use multipart::{upload_file, FORM_FIELD};
pub use routes::{router, AppState};
