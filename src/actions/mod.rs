//! File actions module.
//!
//! This module provides functionality for carrying out a deletion plan:
//! - Permanent deletion (default)
//! - Move to system trash
//! - Sequential, fail-fast execution with progress callbacks
//!
//! ```no_run
//! use bagdupe::actions::{delete_file, DeleteMethod};
//! use std::path::Path;
//!
//! let result = delete_file(Path::new("bag/data/copy.txt"), DeleteMethod::Trash);
//! ```

pub mod delete;

// Re-export commonly used types
pub use delete::{
    delete_file, execute_plan, BatchDeleteResult, DeleteError, DeleteMethod,
    DeleteProgressCallback, DeleteResult, NoProgress,
};
