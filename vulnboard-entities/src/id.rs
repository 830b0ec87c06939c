use std::fmt;

/// Row identity of a comment, assigned by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommentId(i64);

impl CommentId {
    pub const fn new(rowid: i64) -> Self {
        Self(rowid)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
