use super::prelude::*;

pub fn ensure_schema<R: CommentRepository>(repo: &R) -> Result<()> {
    log::debug!("Ensuring comment schema");
    Ok(repo.ensure_schema()?)
}
