use super::schema::*;
use diesel::sql_types::{BigInt, Nullable, Text};

#[derive(Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment<'a> {
    pub author: &'a str,
    pub body: &'a str,
}

#[derive(Queryable)]
pub struct Comment {
    pub id: i64,
    pub author: String,
    pub body: String,
    pub created_at: Option<String>,
}

// Rows of hand-written queries. Every column is nullable because
// the query text may have been altered by its input.
#[derive(QueryableByName)]
pub struct CommentRow {
    #[diesel(sql_type = Nullable<BigInt>)]
    pub id: Option<i64>,
    #[diesel(sql_type = Nullable<Text>)]
    pub author: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub body: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub created_at: Option<String>,
}
