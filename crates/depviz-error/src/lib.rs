//! # depviz-error
//!
//! One error type for every depviz crate: an [`ErrorKind`], a message, the
//! operation that failed plus the ones it passed through, key/value context
//! such as the path involved, and the wrapped foreign error if there is one.
//!
//! ```rust
//! use depviz_error::{Error, ErrorKind};
//!
//! fn load() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::DeserializationFailed, "expected value at line 1")
//!         .with_operation("collect::load_forest")
//!         .with_context("path", "tree.json"))
//! }
//!
//! assert_eq!(load().unwrap_err().context_value("path"), Some("tree.json"));
//! ```

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

pub type Result<T> = std::result::Result<T, Error>;
