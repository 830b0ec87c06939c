use super::*;
use diesel::{dsl::sql, sql_types::BigInt};

const CREATE_COMMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    author TEXT NOT NULL,
    body TEXT NOT NULL,
    createdAt DATETIME DEFAULT CURRENT_TIMESTAMP
);
"#;

impl<'a> CommentRepository for DbReadWrite<'a> {
    fn ensure_schema(&self) -> Result<()> {
        ensure_schema(&mut self.conn.borrow_mut())
    }
    fn insert_comment(&self, comment: NewComment) -> Result<CommentId> {
        insert_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn select_all_comments(&self) -> Result<Vec<Comment>> {
        select_all_comments(&mut self.conn.borrow_mut())
    }
    fn select_comments_by_author_substring(&self, term: &str) -> Result<Vec<Comment>> {
        select_comments_by_author_substring(&mut self.conn.borrow_mut(), term)
    }
}

impl<'a> CommentRepository for DbReadOnly<'a> {
    fn ensure_schema(&self) -> Result<()> {
        unreachable!();
    }
    fn insert_comment(&self, _comment: NewComment) -> Result<CommentId> {
        unreachable!();
    }
    fn select_all_comments(&self) -> Result<Vec<Comment>> {
        select_all_comments(&mut self.conn.borrow_mut())
    }
    fn select_comments_by_author_substring(&self, term: &str) -> Result<Vec<Comment>> {
        select_comments_by_author_substring(&mut self.conn.borrow_mut(), term)
    }
}

fn ensure_schema(conn: &mut SqliteConnection) -> Result<()> {
    conn.batch_execute(CREATE_COMMENTS_TABLE)
        .map_err(from_diesel_err)
}

fn insert_comment(conn: &mut SqliteConnection, comment: NewComment) -> Result<CommentId> {
    let NewComment { author, body } = comment;
    let new_comment = models::NewComment {
        author: &author,
        body: &body,
    };
    conn.transaction::<_, DieselError, _>(|conn| {
        let _count = diesel::insert_into(schema::comments::table)
            .values(&new_comment)
            .execute(conn)?;
        debug_assert_eq!(1, _count);
        diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result::<i64>(conn)
    })
    .map(CommentId::new)
    .map_err(from_diesel_err)
}

fn select_all_comments(conn: &mut SqliteConnection) -> Result<Vec<Comment>> {
    use schema::comments::dsl;
    Ok(schema::comments::table
        .select((dsl::id, dsl::author, dsl::body, dsl::created_at))
        .order_by((dsl::created_at.desc(), dsl::id.desc()))
        .load::<models::Comment>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}

// The term is concatenated into the statement text on purpose.
// Do not replace this with a bound parameter, the injection is
// the behavior under test.
fn select_comments_by_author_substring(
    conn: &mut SqliteConnection,
    term: &str,
) -> Result<Vec<Comment>> {
    let query = format!(
        "SELECT id, author, body, createdAt AS created_at FROM comments \
         WHERE author LIKE '%{term}%' ORDER BY createdAt DESC, id DESC"
    );
    log::debug!("Executing raw query: {query}");
    Ok(diesel::sql_query(query)
        .load::<models::CommentRow>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}

fn parse_created_at(created_at: Option<String>) -> Option<Timestamp> {
    let created_at = created_at?;
    Timestamp::parse_sqlite(&created_at)
        .inspect_err(|err| log::warn!("Unexpected creation time '{created_at}': {err}"))
        .ok()
}

impl From<models::Comment> for Comment {
    fn from(from: models::Comment) -> Self {
        let models::Comment {
            id,
            author,
            body,
            created_at,
        } = from;
        Self {
            id: CommentId::new(id),
            author,
            body,
            created_at: parse_created_at(created_at),
        }
    }
}

impl From<models::CommentRow> for Comment {
    fn from(from: models::CommentRow) -> Self {
        let models::CommentRow {
            id,
            author,
            body,
            created_at,
        } = from;
        Self {
            id: CommentId::new(id.unwrap_or_default()),
            author: author.unwrap_or_default(),
            body: body.unwrap_or_default(),
            created_at: parse_created_at(created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connections {
        let connections = Connections::init(":memory:", 1).unwrap();
        connections.exclusive().unwrap().ensure_schema().unwrap();
        connections
    }

    fn insert(db: &DbReadWrite, author: &str, body: &str) -> CommentId {
        db.insert_comment(NewComment {
            author: author.into(),
            body: body.into(),
        })
        .unwrap()
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let connections = setup();
        let db = connections.exclusive().unwrap();
        db.ensure_schema().unwrap();
        db.ensure_schema().unwrap();
        assert!(db.select_all_comments().unwrap().is_empty());
    }

    #[test]
    fn insert_and_list_comment() {
        let connections = setup();
        let db = connections.exclusive().unwrap();
        let id = insert(&db, "A", "B");
        let comments = db.select_all_comments().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, id);
        assert_eq!(comments[0].author, "A");
        assert_eq!(comments[0].body, "B");
        assert!(comments[0].created_at.is_some());
    }

    #[test]
    fn assign_strictly_increasing_ids() {
        let connections = setup();
        let db = connections.exclusive().unwrap();
        let first = insert(&db, "A", "B");
        let second = insert(&db, "A", "B");
        let third = insert(&db, "C", "D");
        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn list_newest_first() {
        let connections = setup();
        let db = connections.exclusive().unwrap();
        let ids: Vec<_> = (0..5).map(|i| insert(&db, &format!("a{i}"), "b")).collect();
        let listed: Vec<_> = db
            .select_all_comments()
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(listed.len(), 5);
        assert_eq!(listed, ids.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn order_by_creation_time_before_id() {
        let connections = setup();
        let db = connections.exclusive().unwrap();
        let recent = insert(&db, "recent", "b");
        db.conn
            .borrow_mut()
            .batch_execute(
                "INSERT INTO comments (author, body, createdAt) \
                 VALUES ('old', 'b', '2001-02-03 04:05:06')",
            )
            .unwrap();
        let comments = db.select_all_comments().unwrap();
        assert_eq!(comments[0].id, recent);
        assert_eq!(comments[1].author, "old");
        assert_eq!(
            comments[1].created_at.unwrap().to_string(),
            "2001-02-03 04:05:06"
        );
    }

    #[test]
    fn keep_markup_verbatim() {
        let connections = setup();
        let db = connections.exclusive().unwrap();
        let body = "<script>alert('XSS')</script>";
        insert(&db, "<b>Mallory</b>", body);
        let comments = db.select_all_comments().unwrap();
        assert_eq!(comments[0].author, "<b>Mallory</b>");
        assert_eq!(comments[0].body, body);
    }

    #[test]
    fn search_author_substring_case_sensitively() {
        let connections = setup();
        {
            let db = connections.exclusive().unwrap();
            insert(&db, "Alice", "1");
            insert(&db, "Bob", "2");
            insert(&db, "Carl", "3");
        }
        let db = connections.shared().unwrap();
        let comments = db.select_comments_by_author_substring("A").unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author, "Alice");
        let comments = db.select_comments_by_author_substring("ar").unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author, "Carl");
        assert!(db
            .select_comments_by_author_substring("Dave")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn search_is_injectable() {
        let connections = setup();
        {
            let db = connections.exclusive().unwrap();
            insert(&db, "Alice", "1");
            insert(&db, "Bob", "2");
            insert(&db, "Carl", "3");
        }
        let db = connections.shared().unwrap();
        let comments = db
            .select_comments_by_author_substring("x' OR '1'='1' --")
            .unwrap();
        assert_eq!(comments.len(), 3);
    }

    #[test]
    fn search_leaks_schema_through_union() {
        let connections = setup();
        insert(&connections.exclusive().unwrap(), "Alice", "1");
        let db = connections.shared().unwrap();
        let comments = db
            .select_comments_by_author_substring(
                "' UNION SELECT null, sql, null, null FROM sqlite_master--",
            )
            .unwrap();
        assert!(comments.iter().any(|c| c.author == "Alice"));
        assert!(comments
            .iter()
            .any(|c| c.author.contains("CREATE TABLE comments")));
    }

    #[test]
    fn search_with_unbalanced_quote_fails_with_raw_message() {
        let connections = setup();
        let db = connections.shared().unwrap();
        let err = db.select_comments_by_author_substring("'").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
