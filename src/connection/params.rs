//! Connection parameter parsing and validation.
//!
//! This module handles parsing connection strings and building connection
//! parameters with validation.

use crate::error::ConnectionError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Connection parameters for establishing a database connection.
#[derive(Clone)]
pub struct ConnectionParams {
    /// Driver-specific connection target (a filesystem path or `:memory:`
    /// for the bundled SQLite driver)
    pub target: String,

    /// Principal (username) for authentication
    pub username: String,

    /// Secret (password) for authentication, never logged
    password: String,

    /// Connection timeout
    pub connection_timeout: Duration,

    /// Additional connection attributes
    pub attributes: HashMap<String, String>,
}

impl ConnectionParams {
    /// Get the password (for internal use only, never logged).
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Create a new ConnectionBuilder.
    pub fn builder() -> ConnectionBuilder {
        ConnectionBuilder::new()
    }
}

impl FromStr for ConnectionParams {
    type Err = ConnectionError;

    /// Parse a connection string in the format:
    /// `sqlite://[username[:password]@]target[?param=value&...]`
    ///
    /// # Examples
    ///
    /// ```
    /// # use dbharness_rs::connection::ConnectionParams;
    /// # use std::str::FromStr;
    /// // In-memory database
    /// let params = ConnectionParams::from_str("sqlite://:memory:")?;
    ///
    /// // File-backed database with credentials
    /// let params = ConnectionParams::from_str("sqlite://tester:secret@/tmp/fixtures.db")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = s.trim();

        if !url.starts_with("sqlite://") {
            return Err(ConnectionError::ParseError(
                "Connection string must start with 'sqlite://'".to_string(),
            ));
        }

        let url = &url[9..]; // Skip "sqlite://"

        // Split into main part and query string
        let (main_part, query_string) = match url.split_once('?') {
            Some((main, query)) => (main, Some(query)),
            None => (url, None),
        };

        let params = parse_query_params(query_string)?;

        // Split main part into auth@target
        let (auth_part, target) = match main_part.rfind('@') {
            Some(pos) => (Some(&main_part[..pos]), &main_part[pos + 1..]),
            None => (None, main_part),
        };

        let (username, password) = match auth_part {
            Some(auth) => parse_auth(auth)?,
            None => (String::new(), String::new()),
        };

        let mut builder = ConnectionBuilder::new()
            .target(target)
            .username(&username)
            .password(&password);

        for (key, value) in params {
            match key.as_str() {
                "timeout" | "connection_timeout" => {
                    let secs: u64 =
                        value
                            .parse()
                            .map_err(|_| ConnectionError::InvalidParameter {
                                parameter: key.clone(),
                                message: format!("Invalid timeout value: {}", value),
                            })?;
                    builder = builder.connection_timeout(Duration::from_secs(secs));
                }
                _ => {
                    builder = builder.attribute(&key, &value);
                }
            }
        }

        builder.build()
    }
}

// Prevent password from being displayed in debug or display output
impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("target", &self.target)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("connection_timeout", &self.connection_timeout)
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl fmt::Display for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConnectionParams {{ target: {}, username: {} }}",
            self.target, self.username
        )
    }
}

/// Builder for constructing ConnectionParams with validation.
#[derive(Debug, Clone, Default)]
pub struct ConnectionBuilder {
    target: Option<String>,
    username: Option<String>,
    password: Option<String>,
    connection_timeout: Option<Duration>,
    attributes: HashMap<String, String>,
}

impl ConnectionBuilder {
    /// Create a new ConnectionBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connection target.
    pub fn target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    /// Set the username.
    pub fn username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    /// Set the password.
    pub fn password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    /// Set the connection timeout.
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = Some(timeout);
        self
    }

    /// Add a custom connection attribute.
    pub fn attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Build the ConnectionParams with validation.
    pub fn build(self) -> Result<ConnectionParams, ConnectionError> {
        let target = self
            .target
            .ok_or_else(|| ConnectionError::InvalidParameter {
                parameter: "target".to_string(),
                message: "Target is required".to_string(),
            })?;

        if target.is_empty() {
            return Err(ConnectionError::InvalidParameter {
                parameter: "target".to_string(),
                message: "Target cannot be empty".to_string(),
            });
        }

        Ok(ConnectionParams {
            target,
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            connection_timeout: self.connection_timeout.unwrap_or(Duration::from_secs(30)),
            attributes: self.attributes,
        })
    }
}

/// Parse query parameters from URL query string.
fn parse_query_params(query: Option<&str>) -> Result<HashMap<String, String>, ConnectionError> {
    let mut params = HashMap::new();

    if let Some(query) = query {
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }

            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => {
                    return Err(ConnectionError::ParseError(format!(
                        "Invalid query parameter format: {}",
                        pair
                    )));
                }
            };

            let key = urlencoding::decode(key)
                .map_err(|e| ConnectionError::ParseError(format!("Failed to decode key: {}", e)))?
                .into_owned();
            let value = urlencoding::decode(value)
                .map_err(|e| ConnectionError::ParseError(format!("Failed to decode value: {}", e)))?
                .into_owned();

            params.insert(key, value);
        }
    }

    Ok(params)
}

/// Parse authentication part (username:password).
fn parse_auth(auth: &str) -> Result<(String, String), ConnectionError> {
    match auth.split_once(':') {
        Some((user, pass)) => {
            let user = urlencoding::decode(user)
                .map_err(|e| {
                    ConnectionError::ParseError(format!("Failed to decode username: {}", e))
                })?
                .into_owned();
            let pass = urlencoding::decode(pass)
                .map_err(|e| {
                    ConnectionError::ParseError(format!("Failed to decode password: {}", e))
                })?
                .into_owned();
            Ok((user, pass))
        }
        None => {
            let user = urlencoding::decode(auth)
                .map_err(|e| {
                    ConnectionError::ParseError(format!("Failed to decode username: {}", e))
                })?
                .into_owned();
            Ok((user, String::new()))
        }
    }
}
