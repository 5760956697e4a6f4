use std::sync::Arc;
use std::time::{Duration, Instant};

use sql_facade::prelude::*;
use tokio_util::sync::CancellationToken;

// Unbounded recursive CTE; only an interrupt stops it.
const RUNAWAY: &str =
    "WITH RECURSIVE c(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM c) SELECT COUNT(*) FROM c";

#[tokio::test]
async fn deadline_aborts_inflight_statement() -> Result<(), Box<dyn std::error::Error>> {
    let conn = SqliteConnection::builder(":memory:".to_string()).open().await?;

    let started = Instant::now();
    let ctx = OpContext::with_timeout(Duration::from_millis(200));
    let res = conn.query(&ctx, RUNAWAY, &[]).await;
    assert!(matches!(res, Err(SqlFacadeError::Cancelled(_))), "got {res:?}");
    assert!(
        started.elapsed() < Duration::from_secs(10),
        "interrupt must abort the statement promptly"
    );

    // The connection survives an interrupted statement.
    let ctx = OpContext::background();
    let mut cursor = conn.query(&ctx, "SELECT 1 AS one", &[]).await?;
    assert_eq!(cursor.next_row().unwrap().get("one").unwrap().as_int(), Some(&1));

    conn.close().await?;
    Ok(())
}

#[tokio::test]
async fn cancelled_token_aborts_inflight_statement() -> Result<(), Box<dyn std::error::Error>> {
    let conn = SqliteConnection::builder(":memory:".to_string()).open().await?;

    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let ctx = OpContext::with_token(token);
    let res = conn.query(&ctx, RUNAWAY, &[]).await;
    assert!(matches!(res, Err(SqlFacadeError::Cancelled(_))), "got {res:?}");

    conn.close().await?;
    Ok(())
}

#[tokio::test]
async fn pre_cancelled_context_fails_before_touching_db()
-> Result<(), Box<dyn std::error::Error>> {
    let conn = SqliteConnection::builder(":memory:".to_string()).open().await?;
    conn.execute_batch(&OpContext::background(), "CREATE TABLE t (id INTEGER);")
        .await?;

    let token = CancellationToken::new();
    token.cancel();
    let ctx = OpContext::with_token(token);

    let res = conn
        .execute(&ctx, "INSERT INTO t (id) VALUES (?1)", &[RowValues::Int(1)])
        .await;
    assert!(matches!(res, Err(SqlFacadeError::Cancelled(_))));

    // Nothing was written.
    let mut cursor = conn
        .query(&OpContext::background(), "SELECT COUNT(*) AS cnt FROM t", &[])
        .await?;
    assert_eq!(cursor.next_row().unwrap().get("cnt").unwrap().as_int(), Some(&0));

    conn.close().await?;
    Ok(())
}

#[tokio::test]
async fn cancel_signal_only_affects_its_own_operation() -> Result<(), Box<dyn std::error::Error>>
{
    let conn = Arc::new(SqliteConnection::builder(":memory:".to_string()).open().await?);

    // A holds the connection with a long-running statement under its own
    // token.
    let a_token = CancellationToken::new();
    let a_ctx = OpContext::with_token(a_token.clone());
    let a_conn = Arc::clone(&conn);
    let a = tokio::spawn(async move { a_conn.query(&a_ctx, RUNAWAY, &[]).await });

    // Let A acquire the connection and start executing.
    tokio::time::sleep(Duration::from_millis(200)).await;

    // B's deadline expires while waiting for the connection. B must be
    // cancelled without interrupting A's statement.
    let b_ctx = OpContext::with_timeout(Duration::from_millis(100));
    let b = conn.query(&b_ctx, "SELECT 1 AS one", &[]).await;
    assert!(matches!(b, Err(SqlFacadeError::Cancelled(_))), "got {b:?}");
    assert!(!a.is_finished(), "A must keep running past B's deadline");

    // Only A's own signal stops A.
    a_token.cancel();
    let a_res = a.await?;
    assert!(matches!(a_res, Err(SqlFacadeError::Cancelled(_))), "got {a_res:?}");

    let conn = Arc::into_inner(conn).expect("sole owner once A and B are done");
    let ctx = OpContext::background();
    let mut cursor = conn.query(&ctx, "SELECT 1 AS one", &[]).await?;
    assert_eq!(cursor.next_row().unwrap().get("one").unwrap().as_int(), Some(&1));

    conn.close().await?;
    Ok(())
}

#[tokio::test]
async fn completed_statement_wins_a_late_cancel() -> Result<(), Box<dyn std::error::Error>> {
    let conn = SqliteConnection::builder(":memory:".to_string()).open().await?;

    // Generous deadline: the statement finishes long before the signal.
    let ctx = OpContext::with_timeout(Duration::from_secs(30));
    let mut cursor = conn.query(&ctx, "SELECT 42 AS answer", &[]).await?;
    assert_eq!(
        cursor.next_row().unwrap().get("answer").unwrap().as_int(),
        Some(&42)
    );

    conn.close().await?;
    Ok(())
}
