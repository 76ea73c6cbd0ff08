//! Session builder.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use snmp_tables::session::SessionBuilder;
//! use snmp_tables::transport::MockAgent;
//! use snmp_tables::Version;
//!
//! let session = SessionBuilder::new()
//!     .version(Version::V2c)
//!     .timeout(Duration::from_secs(2))
//!     .max_repetitions(50)
//!     .use_long_names(true)
//!     .build(MockAgent::default());
//!
//! assert!(session.use_long_names());
//! assert!(!session.use_numeric());
//! ```

use std::time::Duration;

use crate::transport::Transport;
use crate::version::Version;

use super::{Session, SessionConfig};

/// Builder for [`Session`].
///
/// Starts from [`SessionConfig::default()`].
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    config: SessionConfig,
}

impl SessionBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the protocol version spoken by the engine.
    ///
    /// SNMPv1 walks use GETNEXT instead of GETBULK.
    pub fn version(mut self, version: Version) -> Self {
        self.config.version = version;
        self
    }

    /// Bound every transport call by `timeout`.
    ///
    /// Expiry surfaces as a timeout error. The transport's own timeout and
    /// retry policy still applies underneath.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set max-repetitions for walk GETBULK requests (minimum 1).
    pub fn max_repetitions(mut self, max: u32) -> Self {
        self.config.max_repetitions = max.max(1);
        self
    }

    /// Render tags as fully qualified paths.
    pub fn use_long_names(mut self, enabled: bool) -> Self {
        self.config.use_long_names = enabled;
        self
    }

    /// Address objects by dotted-numeric OID.
    pub fn use_numeric(mut self, enabled: bool) -> Self {
        self.config.use_numeric = enabled;
        self
    }

    /// Build the session over a transport.
    pub fn build<T: Transport>(self, transport: T) -> Session<T> {
        Session::with_config(transport, self.config)
    }
}
