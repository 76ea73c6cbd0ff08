//! # snmp-tables
//!
//! Subtree walks, MIB table materialization and typed agent errors on top
//! of an SNMP engine.
//!
//! ## Features
//!
//! - Bounded subtree walks over repeated GETBULK (GETNEXT on SNMPv1),
//!   symbolic or dotted-numeric
//! - Column-major walk results reshaped into indexed table rows
//! - GET / GETNEXT / SET facade that unwraps single results
//! - One [`Error`] type classifying agent error codes, timeouts and
//!   client-side failures by [`ErrorKind`]
//! - Async-first API built on Tokio; the engine plugs in through the
//!   [`Transport`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snmp_tables::{Session, SessionBuilder, Transport};
//! use std::time::Duration;
//!
//! async fn dump<T: Transport>(engine: T) -> snmp_tables::Result<()> {
//!     let session = SessionBuilder::new()
//!         .timeout(Duration::from_secs(5))
//!         .build(engine);
//!
//!     let table = session.table("ifTable").await?;
//!     for (index, row) in &table {
//!         println!("{index}: {:?}", row.get("ifDescr"));
//!     }
//!
//!     let uptime = session.get("sysUpTime.0").await?;
//!     println!("sysUpTime: {:?}", uptime);
//!     Ok(())
//! }
//! ```
//!
//! ## Testing
//!
//! The `testing` feature exposes [`transport::MockAgent`], an in-memory
//! agent that implements [`Transport`].

pub mod error;
pub mod oid;
pub mod prelude;
pub mod session;
pub mod transport;
pub mod value;
pub mod varbind;
pub mod version;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Fault, Result, TIMEOUT_ERROR_INDEX};
pub use oid::IntoOids;
pub use session::{OneOrMany, Session, SessionBuilder, SessionConfig, Table, TableRow};
pub use transport::{RequestMode, Transport, TransportResult};
pub use value::{Value, ValueType};
pub use varbind::VarBind;
pub use version::Version;
