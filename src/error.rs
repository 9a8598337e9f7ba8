//! # Set errors.
//!
//! Key operations never fail. Errors only arise from handles that no longer
//! refer to an element of the set.

use thiserror::Error;

use crate::set::Handle;

/// Set error
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    #[error("Handle {0:?} refers to an element that has been removed.")]
    StaleHandle(Handle),
}

pub type Result<T> = std::result::Result<T, Error>;
