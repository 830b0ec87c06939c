use crate::{id::*, time::*};

/// A persisted comment.
///
/// `author` and `body` hold exactly what was submitted, markup included.
/// The creation time is `None` if the database row has no parsable value.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id         : CommentId,
    pub author     : String,
    pub body       : String,
    pub created_at : Option<Timestamp>,
}

/// A comment that has not been stored yet.
///
/// Identity and creation time are assigned by the database.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub author : String,
    pub body   : String,
}
