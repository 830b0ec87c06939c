use super::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The raw term if the substring search was used.
    pub term: Option<String>,
    pub comments: Vec<Comment>,
}

/// List comments, filtered by author if a non-empty term is given.
///
/// The term is handed to the store unmodified.
pub fn handle_search<R>(repo: &R, raw_term: Option<&str>) -> Result<SearchResult>
where
    R: CommentRepository,
{
    match raw_term {
        Some(term) if !term.is_empty() => {
            log::debug!("Searching comments by author");
            let comments = repo.select_comments_by_author_substring(term)?;
            Ok(SearchResult {
                term: Some(term.to_owned()),
                comments,
            })
        }
        _ => Ok(SearchResult {
            term: None,
            comments: repo.select_all_comments()?,
        }),
    }
}
