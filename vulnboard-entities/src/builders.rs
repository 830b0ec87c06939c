pub use comment_builder::*;

pub mod comment_builder {
    use crate::{comment::*, id::*, time::*};

    #[derive(Debug)]
    pub struct CommentBuild {
        comment: Comment,
    }

    impl CommentBuild {
        pub fn id(mut self, id: i64) -> Self {
            self.comment.id = CommentId::new(id);
            self
        }
        pub fn author(mut self, author: &str) -> Self {
            self.comment.author = author.into();
            self
        }
        pub fn body(mut self, body: &str) -> Self {
            self.comment.body = body.into();
            self
        }
        pub fn created_at(mut self, created_at: Timestamp) -> Self {
            self.comment.created_at = Some(created_at);
            self
        }
        pub fn finish(self) -> Comment {
            self.comment
        }
    }

    impl Comment {
        pub fn build() -> CommentBuild {
            CommentBuild {
                comment: Comment {
                    id: CommentId::new(0),
                    author: String::new(),
                    body: String::new(),
                    created_at: Some(Timestamp::now()),
                },
            }
        }
    }
}
