use rusqlite::Connection;
use std::path::Path;

/// Forum schema subset the two search templates read from
pub const FORUM_SCHEMA: &str = r#"
    CREATE TABLE vb_post (
        postid INTEGER PRIMARY KEY,
        forumid INTEGER NOT NULL,
        title TEXT,
        text TEXT NOT NULL
    );
    CREATE TABLE vb_searchresult (
        searchid TEXT NOT NULL,
        postid INTEGER NOT NULL,
        forumid INTEGER NOT NULL
    );
"#;

/// Populate `conn` with the schema and a handful of rows
#[allow(dead_code)]
pub fn seed_forum(conn: &Connection) {
    conn.execute_batch(FORUM_SCHEMA).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO vb_post (postid, forumid, title, text) VALUES
            (1, 5, 'staff', 'cats in the staff room'),
            (2, 7, 'pets', 'my cats are great'),
            (3, 7, NULL, 'dogs only'),
            (4, 9, 'more', 'CATS shouting');
        INSERT INTO vb_searchresult (searchid, postid, forumid) VALUES
            ('42', 1, 5),
            ('42', 2, 7),
            ('43', 3, 7);
        "#,
    )
    .unwrap();
}

/// Create a seeded on-disk database at `path`
#[allow(dead_code)]
pub fn create_forum_db(path: &Path) {
    let conn = Connection::open(path).unwrap();
    seed_forum(&conn);
}
