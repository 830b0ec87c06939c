use super::prelude::*;

/// Raw form fields of a comment submission.
///
/// A field is `None` if it was not sent at all.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Submission {
    pub author: Option<String>,
    pub body: Option<String>,
}

/// Store the submitted comment exactly as received.
///
/// Returns `None` without touching the store if a field is missing.
pub fn handle_submission<R>(repo: &R, submission: Submission) -> Result<Option<CommentId>>
where
    R: CommentRepository,
{
    let Submission { author, body } = submission;
    let (Some(author), Some(body)) = (author, body) else {
        log::debug!("Ignoring incomplete submission");
        return Ok(None);
    };
    let id = repo.insert_comment(NewComment { author, body })?;
    log::info!("Stored comment {id}");
    Ok(Some(id))
}
