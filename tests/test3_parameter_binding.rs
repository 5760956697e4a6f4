// Adversarial inputs bound as parameters must land in the database as
// literal data; the executed SQL structure never changes.

use sql_facade::prelude::*;

async fn setup() -> Result<SqliteConnection, SqlFacadeError> {
    let ctx = OpContext::background();
    let conn = SqliteConnection::builder(":memory:".to_string()).open().await?;
    conn.execute_batch(
        &ctx,
        "CREATE TABLE user (username TEXT PRIMARY KEY, password TEXT NOT NULL);",
    )
    .await?;
    conn.execute(
        &ctx,
        "INSERT INTO user (username, password) VALUES (?1, ?2)",
        &[RowValues::Text("admin".into()), RowValues::Text("admin".into())],
    )
    .await?;
    Ok(conn)
}

#[tokio::test]
async fn bound_injection_string_matches_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = OpContext::background();
    let conn = setup().await?;

    // The classic comment-out-the-password probe. Bound, it is just a string.
    let mut cursor = conn
        .query(
            &ctx,
            "SELECT username FROM user WHERE username = ?1 AND password = ?2 LIMIT 1",
            &[
                RowValues::Text("admin';#".into()),
                RowValues::Text("wrong".into()),
            ],
        )
        .await?;
    assert!(cursor.next_row().is_none(), "login must fail");

    // The legitimate credentials still match exactly one row.
    let mut cursor = conn
        .query(
            &ctx,
            "SELECT username FROM user WHERE username = ?1 AND password = ?2 LIMIT 1",
            &[RowValues::Text("admin".into()), RowValues::Text("admin".into())],
        )
        .await?;
    let row = cursor.next_row().expect("login must succeed");
    assert_eq!(row.get("username").unwrap().as_text(), Some("admin"));
    assert!(cursor.next_row().is_none());

    conn.close().await?;
    Ok(())
}

#[tokio::test]
async fn bound_drop_table_string_is_stored_literally() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = OpContext::background();
    let conn = setup().await?;

    let hostile = "eko'; DROP TABLE user; #";
    conn.execute(
        &ctx,
        "INSERT INTO user (username, password) VALUES (?1, ?2)",
        &[RowValues::Text(hostile.into()), RowValues::Text("eko".into())],
    )
    .await?;

    // The table survived and the hostile string is plain row data.
    let mut cursor = conn
        .query(
            &ctx,
            "SELECT username FROM user WHERE username = ?1",
            &[RowValues::Text(hostile.into())],
        )
        .await?;
    let row = cursor.next_row().expect("row stored as data");
    assert_eq!(row.get("username").unwrap().as_text(), Some(hostile));

    let mut cursor = conn
        .query(&ctx, "SELECT COUNT(*) AS cnt FROM user", &[])
        .await?;
    assert_eq!(
        cursor.next_row().unwrap().get("cnt").unwrap().as_int(),
        Some(&2)
    );

    conn.close().await?;
    Ok(())
}
