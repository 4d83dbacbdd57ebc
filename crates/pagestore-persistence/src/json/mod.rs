//! Flat-file JSON backend
//!
//! One file per collection holds the whole collection as a JSON array.
//! Every write rewrites the file through a temporary file in the same
//! directory followed by a rename, so readers only ever see the previous or
//! the next complete version.
//!
//! The rename is atomic only while the temporary file and the target share
//! a filesystem; the temporary file is always created next to the target.

mod file;
mod repository;

pub use file::JsonFile;
pub use repository::JsonFileRepository;
