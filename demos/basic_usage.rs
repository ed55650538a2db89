//! Basic usage of the data accessor against an in-memory SQLite database.
//!
//! Run with: `cargo run --example basic_usage`

use dbharness_rs::{DataAccessor, Value};
use std::collections::HashMap;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut accessor = DataAccessor::connect(":memory:", "", "").await;

    accessor
        .write("CREATE TABLE USERS (ID INTEGER, NAME TEXT)", None)
        .await;

    // One statement, many parameter sets, one round trip.
    accessor
        .write_batch(
            "INSERT INTO USERS (ID, NAME) VALUES (?, ?)",
            Some(&[
                vec![Value::Integer(1), Value::Text("alice".into())],
                vec![Value::Integer(2), Value::Text("bob".into())],
                vec![Value::Integer(3), Value::Text("carol".into())],
            ]),
        )
        .await;

    // Grouped writes: each statement gets its own batch.
    let mut request = HashMap::new();
    request.insert(
        "UPDATE USERS SET NAME = ? WHERE ID = ?".to_string(),
        vec![vec![Value::Text("carole".into()), Value::Integer(3)]],
    );
    request.insert(
        "DELETE FROM USERS WHERE ID = ?".to_string(),
        vec![vec![Value::Integer(2)]],
    );
    accessor.write_grouped(&request).await;

    let rows = accessor
        .read("SELECT ID, NAME FROM USERS ORDER BY ID", None)
        .await;

    for row in &rows {
        let pairs: Vec<String> = row
            .iter()
            .map(|(label, value)| format!("{label}={value}"))
            .collect();
        println!("{}", pairs.join(", "));
    }

    if !accessor.close().await {
        eprintln!("failed to close the connection");
    }
}
