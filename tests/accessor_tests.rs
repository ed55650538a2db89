//! End-to-end accessor scenarios against an in-memory SQLite database.

mod common;

use common::{memory_accessor, seeded_accessor};
use dbharness_rs::{DataAccessor, DbError, QueryError, Value};
use std::collections::HashMap;

#[tokio::test]
async fn test_batch_insert_then_ordered_read() {
    let accessor = seeded_accessor().await;

    accessor
        .write_batch(
            "INSERT INTO T (A, B) VALUES (?, ?)",
            Some(&[
                vec![Value::Integer(1), Value::Text("x".into())],
                vec![Value::Integer(2), Value::Text("y".into())],
            ]),
        )
        .await;

    let rows = accessor
        .read("SELECT A, B FROM T ORDER BY A", None)
        .await;

    assert_eq!(rows.len(), 2);
    let labels: Vec<&str> = rows[0].labels().collect();
    assert_eq!(labels, vec!["A", "B"]);
    assert_eq!(rows[0].get("A"), Some(&Value::Integer(1)));
    assert_eq!(rows[0].get("B"), Some(&Value::Text("x".into())));
    assert_eq!(rows[1].get("A"), Some(&Value::Integer(2)));
    assert_eq!(rows[1].get("B"), Some(&Value::Text("y".into())));
}

#[tokio::test]
async fn test_grouped_update_and_delete() {
    let accessor = seeded_accessor().await;
    accessor
        .write_batch(
            "INSERT INTO T (A, B) VALUES (?, ?)",
            Some(&[
                vec![Value::Integer(1), Value::Text("x".into())],
                vec![Value::Integer(2), Value::Text("y".into())],
            ]),
        )
        .await;

    let mut request = HashMap::new();
    request.insert(
        "UPDATE T SET B = ? WHERE A = ?".to_string(),
        vec![vec![Value::Text("z".into()), Value::Integer(1)]],
    );
    request.insert(
        "DELETE FROM T WHERE A = ?".to_string(),
        vec![vec![Value::Integer(2)]],
    );

    accessor.write_grouped(&request).await;

    let rows = accessor.read("SELECT A, B FROM T", None).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("A"), Some(&Value::Integer(1)));
    assert_eq!(rows[0].get("B"), Some(&Value::Text("z".into())));
}

#[tokio::test]
async fn test_read_on_disconnected_accessor_is_empty() {
    // A target in a missing directory leaves the accessor disconnected.
    let accessor = DataAccessor::connect("/no/such/directory/fixtures.db", "", "").await;
    assert!(!accessor.is_connected().await);

    let rows = accessor.read("SELECT 1", None).await;
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_parameter_mismatch_does_not_corrupt_accessor() {
    let accessor = seeded_accessor().await;
    accessor
        .write(
            "INSERT INTO T (A, B) VALUES (?, ?)",
            Some(&vec![Value::Integer(1), Value::Text("x".into())]),
        )
        .await;

    // Too few parameters: swallowed by the fail-soft surface.
    accessor
        .write(
            "INSERT INTO T (A, B) VALUES (?, ?)",
            Some(&vec![Value::Integer(2)]),
        )
        .await;

    // The strict surface reports it as a binding failure.
    let err = accessor
        .try_write(
            "INSERT INTO T (A, B) VALUES (?, ?)",
            Some(&vec![Value::Integer(2)]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Query(QueryError::BindingFailed(_))));

    // A subsequent read still works.
    let rows = accessor.read("SELECT A, B FROM T", None).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("A"), Some(&Value::Integer(1)));
}

#[tokio::test]
async fn test_empty_batch_executes_nothing() {
    let accessor = seeded_accessor().await;

    accessor
        .write_batch("INSERT INTO T (A, B) VALUES (?, ?)", Some(&[]))
        .await;

    let rows = accessor.read("SELECT A FROM T", None).await;
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_batch_none_equals_single_bare_execution() {
    let accessor = seeded_accessor().await;
    accessor
        .write_batch(
            "INSERT INTO T (A, B) VALUES (?, ?)",
            Some(&[vec![Value::Integer(1), Value::Text("x".into())]]),
        )
        .await;

    accessor.write_batch("DELETE FROM T", None).await;

    let rows = accessor.read("SELECT A FROM T", None).await;
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let mut accessor = memory_accessor().await;
    assert!(accessor.close().await);
    assert!(accessor.close().await);
    assert!(!accessor.is_connected().await);
}

#[tokio::test]
async fn test_grouped_write_failure_does_not_block_other_statements() {
    let accessor = seeded_accessor().await;

    let mut request = HashMap::new();
    request.insert(
        "INSERT INTO NO_SUCH_TABLE (A) VALUES (?)".to_string(),
        vec![vec![Value::Integer(1)]],
    );
    request.insert(
        "INSERT INTO T (A, B) VALUES (?, ?)".to_string(),
        vec![vec![Value::Integer(1), Value::Text("x".into())]],
    );

    // Fail-soft: the malformed entry is logged, the other one runs.
    accessor.write_grouped(&request).await;

    let rows = accessor.read("SELECT A FROM T", None).await;
    assert_eq!(rows.len(), 1);

    // Strict form reports the failure after attempting every entry.
    assert!(accessor.try_write_grouped(&request).await.is_err());
    let rows = accessor.read("SELECT A FROM T", None).await;
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_batch_failure_aborts_remainder_of_that_batch() {
    let accessor = memory_accessor().await;
    accessor
        .try_write("CREATE TABLE T (A INTEGER PRIMARY KEY)", None)
        .await
        .unwrap();

    // The duplicate key fails mid-batch; the third set never runs.
    accessor
        .write_batch(
            "INSERT INTO T (A) VALUES (?)",
            Some(&[
                vec![Value::Integer(1)],
                vec![Value::Integer(1)],
                vec![Value::Integer(3)],
            ]),
        )
        .await;

    let rows = accessor.read("SELECT A FROM T", None).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("A"), Some(&Value::Integer(1)));
}

#[tokio::test]
async fn test_try_read_distinguishes_no_rows_from_failure() {
    let accessor = seeded_accessor().await;

    // No rows is a successful, empty result.
    let rows = accessor.try_read("SELECT A FROM T", None).await.unwrap();
    assert!(rows.is_empty());

    // A failed query is an error, not an empty result.
    let err = accessor
        .try_read("SELECT A FROM NO_SUCH_TABLE", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Query(_)));
}

#[tokio::test]
async fn test_read_duplicate_labels_last_write_wins() {
    let accessor = seeded_accessor().await;
    accessor
        .write(
            "INSERT INTO T (A, B) VALUES (?, ?)",
            Some(&vec![Value::Integer(1), Value::Text("x".into())]),
        )
        .await;

    // Both selected columns carry the label N; the projection keeps one
    // entry at the first-seen position holding the last value.
    let rows = accessor
        .read("SELECT A AS N, B AS N FROM T", None)
        .await;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 1);
    assert_eq!(rows[0].get("N"), Some(&Value::Text("x".into())));
}

#[tokio::test]
async fn test_null_parameters_round_trip() {
    let accessor = seeded_accessor().await;
    accessor
        .write(
            "INSERT INTO T (A, B) VALUES (?, ?)",
            Some(&vec![Value::Integer(1), Value::Null]),
        )
        .await;

    let rows = accessor.read("SELECT B FROM T", None).await;
    assert_eq!(rows[0].get("B"), Some(&Value::Null));
}

#[tokio::test]
async fn test_operations_after_close_fail_gracefully() {
    let mut accessor = seeded_accessor().await;
    assert!(accessor.close().await);

    accessor
        .write("INSERT INTO T (A, B) VALUES (1, 'x')", None)
        .await;
    let rows = accessor.read("SELECT A FROM T", None).await;
    assert!(rows.is_empty());
}
