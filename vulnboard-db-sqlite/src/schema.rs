table! {
    comments (id) {
        id -> BigInt,
        author -> Text,
        body -> Text,
        #[sql_name = "createdAt"]
        created_at -> Nullable<Text>,
    }
}
