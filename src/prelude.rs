//! Prelude module for convenient imports.
//!
//! ```rust
//! use snmp_tables::prelude::*;
//! ```
//!
//! This imports:
//! - Core types: [`Session`], [`Table`], [`TableRow`], [`Value`], [`VarBind`]
//! - Error handling: [`Error`], [`ErrorKind`], [`Result`]
//! - The [`Transport`] trait and [`IntoOids`] for OID-list arguments

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::oid::IntoOids;
pub use crate::session::{OneOrMany, Session, SessionBuilder, Table, TableRow};
pub use crate::transport::Transport;
pub use crate::value::Value;
pub use crate::varbind::VarBind;
pub use crate::version::Version;
