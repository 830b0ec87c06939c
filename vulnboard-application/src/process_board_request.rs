use super::*;
use crate::usecases::{LabProbes, SearchResult, Submission};

/// Everything a single page request asks for.
#[derive(Debug, Default, Clone)]
pub struct BoardRequest {
    pub submission: Option<Submission>,
    pub search_term: Option<String>,
    /// `None` if the lab probes are disabled.
    pub probes: Option<LabProbes>,
}

#[derive(Debug)]
pub struct BoardResponse {
    /// A new comment has been stored, even if listing failed afterwards.
    pub comment_added: bool,
    pub listing: Result<BoardListing>,
}

#[derive(Debug)]
pub struct BoardListing {
    pub search_term: Option<String>,
    pub comments: Vec<Comment>,
    pub debug_notes: Vec<DebugNote>,
}

pub fn process_board_request(
    connections: &sqlite::Connections,
    request: BoardRequest,
) -> BoardResponse {
    let BoardRequest {
        submission,
        search_term,
        probes,
    } = request;
    let mut comment_added = false;
    let listing = match store_submission(connections, submission) {
        Ok(added) => {
            comment_added = added;
            load_listing(connections, search_term.as_deref(), probes.as_ref())
        }
        Err(err) => Err(err),
    };
    if let Err(err) = &listing {
        warn!("Failed to process board request: {err}");
    }
    BoardResponse {
        comment_added,
        listing,
    }
}

fn store_submission(
    connections: &sqlite::Connections,
    submission: Option<Submission>,
) -> Result<bool> {
    let db = connections.exclusive()?;
    usecases::ensure_schema(&db)?;
    let Some(submission) = submission else {
        return Ok(false);
    };
    let Some(id) = usecases::handle_submission(&db, submission)? else {
        debug!("Incomplete submission ignored");
        return Ok(false);
    };
    debug!("Stored comment #{id}");
    Ok(true)
}

fn load_listing(
    connections: &sqlite::Connections,
    search_term: Option<&str>,
    probes: Option<&LabProbes>,
) -> Result<BoardListing> {
    let db = connections.shared()?;
    let SearchResult { term, comments } = usecases::handle_search(&db, search_term)?;
    let debug_notes = probes
        .map(|probes| usecases::run_lab_probes(&db, probes))
        .unwrap_or_default();
    Ok(BoardListing {
        search_term: term,
        comments,
        debug_notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    fn submit(
        connections: &sqlite::Connections,
        author: Option<&str>,
        body: Option<&str>,
    ) -> BoardResponse {
        process_board_request(
            connections,
            BoardRequest {
                submission: Some(Submission {
                    author: author.map(Into::into),
                    body: body.map(Into::into),
                }),
                ..Default::default()
            },
        )
    }

    fn search(connections: &sqlite::Connections, term: &str) -> BoardResponse {
        process_board_request(
            connections,
            BoardRequest {
                search_term: Some(term.into()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn create_schema_on_first_request() {
        let connections = setup();
        let res = process_board_request(&connections, BoardRequest::default());
        assert!(!res.comment_added);
        let listing = res.listing.unwrap();
        assert!(listing.comments.is_empty());
        assert!(listing.search_term.is_none());
        assert!(listing.debug_notes.is_empty());
    }

    #[test]
    fn submit_then_list() {
        let connections = setup();
        let res = submit(&connections, Some("A"), Some("B"));
        assert!(res.comment_added);
        let comments = res.listing.unwrap().comments;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author, "A");
        assert_eq!(comments[0].body, "B");
    }

    #[test]
    fn ignore_submission_without_author() {
        let connections = setup();
        submit(&connections, Some("A"), Some("B"));
        let res = submit(&connections, None, Some("B"));
        assert!(!res.comment_added);
        assert_eq!(res.listing.unwrap().comments.len(), 1);
    }

    #[test]
    fn echo_search_term() {
        let connections = setup();
        submit(&connections, Some("Alice"), Some("1"));
        submit(&connections, Some("Bob"), Some("2"));
        let listing = search(&connections, "A").listing.unwrap();
        assert_eq!(listing.search_term.as_deref(), Some("A"));
        assert_eq!(listing.comments.len(), 1);
        assert_eq!(listing.comments[0].author, "Alice");
    }

    #[test]
    fn report_raw_database_error() {
        let connections = setup();
        let err = search(&connections, "'").listing.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unrecognized token"), "{msg}");
    }

    #[test]
    fn keep_added_flag_when_listing_fails() {
        let connections = setup();
        let res = process_board_request(
            &connections,
            BoardRequest {
                submission: Some(Submission {
                    author: Some("A".into()),
                    body: Some("B".into()),
                }),
                search_term: Some("'".into()),
                probes: None,
            },
        );
        assert!(res.comment_added);
        assert!(res.listing.is_err());
    }

    #[test]
    fn run_enabled_lab_probes() {
        let connections = setup();
        let res = process_board_request(
            &connections,
            BoardRequest {
                probes: Some(LabProbes {
                    user: Some("admin".into()),
                    force_error: true,
                }),
                ..Default::default()
            },
        );
        let notes: Vec<_> = res
            .listing
            .unwrap()
            .debug_notes
            .into_iter()
            .map(|n| n.to_string())
            .collect();
        assert!(notes.contains(&"SQL error: no such table: usuarios".to_string()));
        assert!(notes
            .contains(&"DEBUG EXCEPTION: FORZADO: Detalle interno de prueba".to_string()));
    }
}
