// Low-level database access traits.
//
// None of these traits validate or escape their arguments.
// Implementations that concatenate arguments into SQL text
// say so in the method documentation.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait CommentRepository {
    /// Create the comment table if it does not exist yet.
    ///
    /// Idempotent, safe to call on every request.
    fn ensure_schema(&self) -> Result<()>;

    /// Append a comment with bound parameters and return its new identity.
    fn insert_comment(&self, comment: NewComment) -> Result<CommentId>;

    /// All comments, newest first.
    fn select_all_comments(&self) -> Result<Vec<Comment>>;

    /// Comments whose author contains `term`, newest first.
    ///
    /// The term is pasted verbatim into the SQL text of a `LIKE` clause
    /// without binding or quoting. Any quote character in `term` changes
    /// the structure of the query.
    fn select_comments_by_author_substring(&self, term: &str) -> Result<Vec<Comment>>;
}

pub trait LabProbeRepository {
    /// Look up a lab account by name with the name pasted verbatim into
    /// the SQL text. Returns the number of rows reported by the engine.
    fn probe_user_lookup(&self, name: &str) -> Result<usize>;
}
