//! Connection parameter handling.
//!
//! This module provides connection target parsing and parameter building
//! for the accessor and the bundled driver.
//!
//! # Example
//!
//! ```
//! # use dbharness_rs::connection::{ConnectionBuilder, ConnectionParams};
//! # use std::str::FromStr;
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Using ConnectionBuilder
//! let params = ConnectionBuilder::new()
//!     .target("/var/data/fixtures.db")
//!     .username("tester")
//!     .password("secret")
//!     .connection_timeout(std::time::Duration::from_secs(10))
//!     .build()?;
//!
//! // Or parse from connection string
//! let params = ConnectionParams::from_str("sqlite://tester:secret@/var/data/fixtures.db?timeout=10")?;
//! # Ok(())
//! # }
//! ```

pub mod params;

pub use params::{ConnectionBuilder, ConnectionParams};
