//! Transport layer abstraction.
//!
//! The SNMP engine itself (PDU encoding, sockets, wire-level retries,
//! USM) lives outside this crate. [`Transport`] is the seam a session
//! talks through: one method per protocol operation, each a single round
//! trip over varbinds whose names the engine renders according to the
//! [`RequestMode`] it is given.

#[cfg(any(test, feature = "testing"))]
mod mock;
#[cfg(any(test, feature = "testing"))]
mod oid_table;

#[cfg(any(test, feature = "testing"))]
pub use mock::*;

use std::future::Future;

use crate::error::Fault;
use crate::varbind::VarBind;

/// Outcome of one transport call: the response varbinds, in request order,
/// or the engine's structured last-error.
pub type TransportResult = std::result::Result<Vec<VarBind>, Fault>;

/// How the engine should render object names for one request.
///
/// Computed once per session call and passed by value; nothing about it
/// is shared or mutated behind the caller's back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequestMode {
    /// Use dotted-numeric OIDs and skip symbolic translation.
    pub numeric: bool,
    /// Render `tag` as the fully qualified path instead of the leaf name.
    pub long_names: bool,
}

impl RequestMode {
    /// Mode used by subtree walks: long names forced on, and numeric
    /// addressing switched on when `oid` is dotted-numeric.
    pub fn for_walk(self, oid: &str) -> Self {
        Self {
            numeric: self.numeric || crate::oid::is_numeric(oid),
            long_names: true,
        }
    }
}

/// Client-side engine abstraction.
///
/// Every method is one request/response exchange. Request varbinds carry
/// the object name (in `tag`, optionally split with `index`) and, for SET,
/// the value to write; GET-style requests use [`VarBind::null`]. Responses
/// come back as new varbinds with `tag`/`index` rendered per `mode`.
///
/// Failures are reported as a [`Fault`] rather than an error type of the
/// engine's own; the session classifies them. A fault whose index is
/// [`TIMEOUT_ERROR_INDEX`](crate::error::TIMEOUT_ERROR_INDEX) is a timeout.
///
/// Implementations are expected to apply their own timeout and retry
/// policy. The session never retries.
pub trait Transport: Send + Sync {
    /// GET each requested name.
    fn get(
        &self,
        mode: RequestMode,
        varbinds: &[VarBind],
    ) -> impl Future<Output = TransportResult> + Send;

    /// GETNEXT for each requested name.
    fn get_next(
        &self,
        mode: RequestMode,
        varbinds: &[VarBind],
    ) -> impl Future<Output = TransportResult> + Send;

    /// GETBULK (SNMPv2c/v3).
    ///
    /// The first `non_repeaters` names get a single GETNEXT each; the rest
    /// are repeated up to `max_repetitions` times. Agents may truncate the
    /// response to whatever fits in one message.
    fn get_bulk(
        &self,
        mode: RequestMode,
        non_repeaters: u32,
        max_repetitions: u32,
        varbinds: &[VarBind],
    ) -> impl Future<Output = TransportResult> + Send;

    /// SET every varbind in one PDU. Either all are applied or the fault's
    /// index names the offending varbind.
    fn set(
        &self,
        mode: RequestMode,
        varbinds: &[VarBind],
    ) -> impl Future<Output = TransportResult> + Send;

    /// The agent this transport talks to, for diagnostics.
    fn target(&self) -> &str;
}
