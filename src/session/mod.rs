//! SNMP session: scalar facade, subtree walks and table materialization.
//!
//! A [`Session`] wraps one [`Transport`] (one agent) together with a
//! [`SessionConfig`]. Every operation computes a [`RequestMode`] once and
//! passes it down; walks and tables use their own mode without touching the
//! session's flags.

mod builder;
mod table;
mod walk;

pub use builder::SessionBuilder;
pub use table::{Table, TableRow};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::error::{Error, ErrorKind, Fault, Result};
use crate::oid::IntoOids;
use crate::transport::{RequestMode, Transport, TransportResult};
use crate::value::Value;
use crate::varbind::VarBind;
use crate::version::Version;

/// Session configuration.
///
/// Most users should use [`SessionBuilder`] rather than constructing this
/// directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// SNMP version (default: V2c)
    pub version: Version,
    /// Upper bound on each transport call (default: None, the transport's
    /// own timeout applies)
    pub timeout: Option<Duration>,
    /// Max-repetitions for walk GETBULK requests (default: 1000, at least 1
    /// is sent)
    pub max_repetitions: u32,
    /// Render tags as fully qualified paths (default: false)
    pub use_long_names: bool,
    /// Address objects by dotted-numeric OID (default: false)
    pub use_numeric: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            version: Version::V2c,
            timeout: None,
            max_repetitions: 1000,
            use_long_names: false,
            use_numeric: false,
        }
    }
}

/// A single value when one object was requested, an ordered list otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    /// Exactly one object was requested.
    One(T),
    /// Zero or several objects were requested; results follow request order.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Unwrap a single result. `None` for [`OneOrMany::Many`].
    pub fn one(self) -> Option<T> {
        match self {
            Self::One(item) => Some(item),
            Self::Many(_) => None,
        }
    }

    /// All results as a vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }

    /// All results as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(item) => std::slice::from_ref(item),
            Self::Many(items) => items,
        }
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether there are no results.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Map every result, keeping the shape.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> OneOrMany<U> {
        match self {
            Self::One(item) => OneOrMany::One(f(item)),
            Self::Many(items) => OneOrMany::Many(items.into_iter().map(f).collect()),
        }
    }

    fn from_response(requested: usize, mut items: Vec<T>) -> Result<Self> {
        if requested != 1 {
            return Ok(Self::Many(items));
        }
        match (items.pop(), items.is_empty()) {
            (Some(item), true) => Ok(Self::One(item)),
            (item, _) => Err(Error::new(
                ErrorKind::Generic,
                format!(
                    "expected 1 varbind in response, got {}",
                    items.len() + usize::from(item.is_some())
                ),
            )),
        }
    }
}

impl<T> IntoIterator for OneOrMany<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

/// Session over one agent.
///
/// Generic over the transport so that any engine (or the in-memory
/// [`MockAgent`](crate::transport::MockAgent)) can sit underneath.
///
/// # Example
///
/// ```rust
/// use snmp_tables::transport::MockAgent;
/// use snmp_tables::{OneOrMany, Session, Value};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> snmp_tables::Result<()> {
/// let agent = MockAgent::new("192.0.2.1:161");
/// agent
///     .define("iso.org.dod.internet.mgmt.mib-2.system.sysDescr", "1.3.6.1.2.1.1.1")
///     .define("iso.org.dod.internet.mgmt.mib-2.system.sysName", "1.3.6.1.2.1.1.5");
/// agent.insert("sysDescr.0", "Linux core-rtr").insert("sysName.0", "core-rtr");
///
/// let session = Session::new(agent);
///
/// let name = session.get("sysName.0").await?;
/// assert_eq!(name, OneOrMany::One(Value::from("core-rtr")));
///
/// let both = session.get("sysDescr.0 sysName.0").await?.into_vec();
/// assert_eq!(both.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Session<T: Transport> {
    transport: T,
    config: SessionConfig,
}

impl<T: Transport> Session<T> {
    /// Create a session with default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, SessionConfig::default())
    }

    /// Create a session with the given configuration.
    pub fn with_config(transport: T, config: SessionConfig) -> Self {
        Self { transport, config }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether tags are rendered as fully qualified paths.
    pub fn use_long_names(&self) -> bool {
        self.config.use_long_names
    }

    /// Whether objects are addressed by dotted-numeric OID.
    pub fn use_numeric(&self) -> bool {
        self.config.use_numeric
    }

    /// Render tags as fully qualified paths in later calls.
    pub fn set_use_long_names(&mut self, enabled: bool) {
        self.config.use_long_names = enabled;
    }

    /// Address objects by dotted-numeric OID in later calls.
    pub fn set_use_numeric(&mut self, enabled: bool) {
        self.config.use_numeric = enabled;
    }

    /// Request mode derived from the session flags.
    pub fn mode(&self) -> RequestMode {
        RequestMode {
            numeric: self.config.use_numeric,
            long_names: self.config.use_long_names,
        }
    }

    /// GET one or more objects, returning their values.
    ///
    /// One requested name yields [`OneOrMany::One`]; otherwise the values
    /// come back in request order. A single string is split on whitespace
    /// and commas.
    #[instrument(skip_all, err, fields(snmp.target = %self.transport.target()))]
    pub async fn get(&self, oids: impl IntoOids) -> Result<OneOrMany<Value>> {
        Ok(self
            .get_with_metadata(oids)
            .await?
            .map(|vb| vb.value))
    }

    /// GET one or more objects, returning full varbinds.
    #[instrument(skip_all, err, fields(snmp.target = %self.transport.target()))]
    pub async fn get_with_metadata(&self, oids: impl IntoOids) -> Result<OneOrMany<VarBind>> {
        let request = null_varbinds(oids);
        if request.is_empty() {
            return Ok(OneOrMany::Many(Vec::new()));
        }
        let response = self.transport_get(self.mode(), &request).await?;
        OneOrMany::from_response(request.len(), response)
    }

    /// GETNEXT for one or more objects, returning values.
    #[instrument(skip_all, err, fields(snmp.target = %self.transport.target()))]
    pub async fn get_next(&self, oids: impl IntoOids) -> Result<OneOrMany<Value>> {
        Ok(self
            .get_next_with_metadata(oids)
            .await?
            .map(|vb| vb.value))
    }

    /// GETNEXT for one or more objects, returning full varbinds.
    #[instrument(skip_all, err, fields(snmp.target = %self.transport.target()))]
    pub async fn get_next_with_metadata(
        &self,
        oids: impl IntoOids,
    ) -> Result<OneOrMany<VarBind>> {
        let request = null_varbinds(oids);
        if request.is_empty() {
            return Ok(OneOrMany::Many(Vec::new()));
        }
        let response = self.transport_get_next(self.mode(), &request).await?;
        OneOrMany::from_response(request.len(), response)
    }

    /// SET objects to values, paired positionally.
    ///
    /// A count mismatch leaves an OID or a value missing, which is rejected
    /// like any incomplete pair in [`set_pairs`](Self::set_pairs).
    #[instrument(skip_all, err, fields(snmp.target = %self.transport.target()))]
    pub async fn set<V: Into<Value>>(
        &self,
        oids: impl IntoOids,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Vec<VarBind>> {
        let mut oids = oids.into_oids().into_iter();
        let mut values = values.into_iter();
        let mut pairs = Vec::new();
        loop {
            match (oids.next(), values.next()) {
                (None, None) => break,
                pair => pairs.push(pair),
            }
        }
        self.set_pairs(pairs).await
    }

    /// SET explicit `(oid, value)` pairs in a single PDU.
    ///
    /// Any pair missing its OID (absent or empty) or its value fails with
    /// [`ErrorKind::InvalidRequest`] before the transport is contacted; the
    /// error index is the 1-based position of that pair. On success returns
    /// the varlist echoed by the agent.
    #[instrument(skip_all, err, fields(snmp.target = %self.transport.target()))]
    pub async fn set_pairs<S, V>(
        &self,
        pairs: impl IntoIterator<Item = (Option<S>, Option<V>)>,
    ) -> Result<Vec<VarBind>>
    where
        S: AsRef<str>,
        V: Into<Value>,
    {
        let mut request = Vec::new();
        for (i, pair) in pairs.into_iter().enumerate() {
            let position = i as i32 + 1;
            match pair {
                (Some(oid), Some(value)) if !oid.as_ref().is_empty() => {
                    request.push(VarBind::new(oid.as_ref(), "", value.into()));
                }
                (_, Some(_)) => {
                    return Err(
                        Error::new(ErrorKind::InvalidRequest, "set pair is missing an OID")
                            .with_index(position),
                    );
                }
                (_, None) => {
                    return Err(
                        Error::new(ErrorKind::InvalidRequest, "set pair is missing a value")
                            .with_index(position),
                    );
                }
            }
        }
        if request.is_empty() {
            return Err(Error::new(ErrorKind::InvalidRequest, "nothing to set"));
        }
        self.transport_set(self.mode(), &request).await
    }

    /// Whether `oid` currently holds a value.
    ///
    /// True when the GET returns at least one varbind and none of them is
    /// NULL or an exception. Any error, including a timeout, yields false.
    /// An empty string value counts as present.
    #[instrument(skip(self), fields(snmp.target = %self.transport.target()))]
    pub async fn contains(&self, oid: &str) -> bool {
        match self.get_with_metadata(oid).await {
            Ok(response) => {
                !response.is_empty()
                    && response
                        .as_slice()
                        .iter()
                        .all(|vb| !vb.value.is_exception() && vb.value != Value::Null)
            }
            Err(err) => {
                tracing::debug!(target: "snmp_tables::session", { error = %err }, "existence check failed");
                false
            }
        }
    }

    /// Fetch selected columns of one table row with a single GET.
    ///
    /// Requests `column.index` for every column and returns a row whose
    /// fields are named after the columns, in input order.
    #[instrument(skip(self, columns), err, fields(snmp.target = %self.transport.target()))]
    pub async fn row(&self, index: &str, columns: impl IntoOids) -> Result<TableRow> {
        let columns = columns.into_oids();
        if columns.is_empty() {
            return Ok(TableRow::new(Arc::from(Vec::new()), Vec::new()));
        }
        let request: Vec<VarBind> = columns
            .iter()
            .map(|column| VarBind::null(format!("{column}.{index}")))
            .collect();
        let response = self.transport_get(self.mode(), &request).await?;
        if response.len() != columns.len() {
            return Err(Error::new(
                ErrorKind::Generic,
                format!(
                    "expected {} varbinds in response, got {}",
                    columns.len(),
                    response.len()
                ),
            ));
        }
        let names = table::column_names(columns);
        Ok(TableRow::new(
            Arc::from(names),
            response.into_iter().map(|vb| vb.value).collect(),
        ))
    }

    pub(crate) async fn transport_get(
        &self,
        mode: RequestMode,
        varbinds: &[VarBind],
    ) -> Result<Vec<VarBind>> {
        self.call("GET", varbinds, self.transport.get(mode, varbinds))
            .await
    }

    pub(crate) async fn transport_get_next(
        &self,
        mode: RequestMode,
        varbinds: &[VarBind],
    ) -> Result<Vec<VarBind>> {
        self.call("GETNEXT", varbinds, self.transport.get_next(mode, varbinds))
            .await
    }

    pub(crate) async fn transport_get_bulk(
        &self,
        mode: RequestMode,
        varbinds: &[VarBind],
    ) -> Result<Vec<VarBind>> {
        // Zero repetitions would return an empty batch and end every walk.
        let max_repetitions = self.config.max_repetitions.max(1);
        self.call(
            "GETBULK",
            varbinds,
            self.transport.get_bulk(mode, 0, max_repetitions, varbinds),
        )
        .await
    }

    pub(crate) async fn transport_set(
        &self,
        mode: RequestMode,
        varbinds: &[VarBind],
    ) -> Result<Vec<VarBind>> {
        self.call("SET", varbinds, self.transport.set(mode, varbinds))
            .await
    }

    /// Run one transport call, applying the session timeout and classifying
    /// any fault against the request varlist.
    async fn call(
        &self,
        op: &'static str,
        varbinds: &[VarBind],
        request: impl Future<Output = TransportResult>,
    ) -> Result<Vec<VarBind>> {
        tracing::trace!(target: "snmp_tables::transport", { snmp.op = op, snmp.varbind_count = varbinds.len() }, "sending {} request", op);

        let result = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .unwrap_or_else(|_| Err(Fault::timeout())),
            None => request.await,
        };

        match result {
            Ok(response) => {
                tracing::trace!(target: "snmp_tables::transport", { snmp.op = op, snmp.varbind_count = response.len() }, "received {} response", op);
                Ok(response)
            }
            Err(fault) => {
                let err = Error::from_fault(fault, Some(varbinds.to_vec()));
                tracing::debug!(target: "snmp_tables::session", { snmp.op = op, snmp.target = %self.transport.target(), kind = %err.kind(), code = ?err.code(), index = ?err.index() }, "{} failed: {}", op, err.message());
                Err(err)
            }
        }
    }
}

fn null_varbinds(oids: impl IntoOids) -> Vec<VarBind> {
    oids.into_oids().into_iter().map(VarBind::null).collect()
}
