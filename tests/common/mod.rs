//! Shared helpers for integration tests.

use dbharness_rs::DataAccessor;

/// Connect an accessor to a fresh in-memory database.
pub async fn memory_accessor() -> DataAccessor {
    let accessor = DataAccessor::connect(":memory:", "", "").await;
    assert!(accessor.is_connected().await, "in-memory connect failed");
    accessor
}

/// Connect an accessor and create the shared test table.
///
/// Schema: `T (A INTEGER, B TEXT)`.
pub async fn seeded_accessor() -> DataAccessor {
    let accessor = memory_accessor().await;
    accessor
        .try_write("CREATE TABLE T (A INTEGER, B TEXT)", None)
        .await
        .expect("schema creation failed");
    accessor
}
