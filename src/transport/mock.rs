//! In-memory agent for testing.
//!
//! [`MockAgent`] implements [`Transport`] against a small MIB held in
//! memory. It resolves symbolic and numeric names, renders responses per
//! [`RequestMode`], honours GETNEXT/GETBULK ordering, and can truncate
//! bulk responses, fail or stall selected requests, and reject writes.
//!
//! # Example
//!
//! ```rust
//! use snmp_tables::transport::{MockAgent, RequestMode, Transport};
//! use snmp_tables::{Value, VarBind};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let agent = MockAgent::new("192.0.2.1:161");
//! agent.define("iso.org.dod.internet.mgmt.mib-2.system.sysName", "1.3.6.1.2.1.1.5");
//! agent.insert("sysName.0", "core-rtr");
//!
//! let response = agent
//!     .get(RequestMode::default(), &[VarBind::null("sysName.0")])
//!     .await
//!     .unwrap();
//! assert_eq!(response[0].tag, "sysName");
//! assert_eq!(response[0].index, "0");
//! assert_eq!(response[0].value, Value::from("core-rtr"));
//! # }
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use super::oid_table::OidTable;
use super::{RequestMode, Transport, TransportResult};
use crate::error::Fault;
use crate::oid::leaf;
use crate::value::Value;
use crate::varbind::VarBind;

/// Protocol operation recorded by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    GetNext,
    GetBulk,
    Set,
}

/// A request received by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Which operation was invoked.
    pub operation: Operation,
    /// Naming mode the caller asked for.
    pub mode: RequestMode,
    /// `max_repetitions` for GETBULK, `None` otherwise.
    pub max_repetitions: Option<u32>,
    /// The request varbinds, as passed in.
    pub varbinds: Vec<VarBind>,
}

impl RecordedRequest {
    /// Full names of the requested objects.
    pub fn names(&self) -> Vec<String> {
        self.varbinds.iter().map(VarBind::name).collect()
    }
}

/// Failure injected into one request.
#[derive(Debug, Clone)]
pub enum MockFault {
    /// Answer with this fault instead of a response.
    Fail(Fault),
    /// Never answer.
    Stall,
}

/// A registered MIB node: numeric arcs plus the fully qualified name.
#[derive(Debug, Clone)]
struct Node {
    arcs: Vec<u32>,
    path: String,
}

#[derive(Debug, Default)]
struct MockAgentInner {
    nodes: Vec<Node>,
    objects: OidTable<Value>,
    read_only: Vec<Vec<u32>>,
    max_batch: Option<usize>,
    faults: HashMap<usize, MockFault>,
    requests: Vec<RecordedRequest>,
}

enum Outcome {
    Ready(TransportResult),
    Stall,
}

impl Outcome {
    async fn resolve(self) -> TransportResult {
        match self {
            Outcome::Ready(result) => result,
            Outcome::Stall => std::future::pending().await,
        }
    }
}

/// In-memory SNMP agent implementing [`Transport`].
///
/// Cloning shares state, so a test can keep a handle for inspection after
/// handing the agent to a session.
#[derive(Debug, Clone)]
pub struct MockAgent {
    target: Arc<str>,
    inner: Arc<Mutex<MockAgentInner>>,
}

impl MockAgent {
    /// Create an empty agent.
    pub fn new(target: impl Into<Arc<str>>) -> Self {
        Self {
            target: target.into(),
            inner: Arc::new(Mutex::new(MockAgentInner::default())),
        }
    }

    /// Register a MIB node.
    ///
    /// `path` is the fully qualified name (`iso.org...ifTable`, a leading
    /// `.` is optional) and `numeric` its dotted-numeric OID. Responses are
    /// named after the deepest registered node covering each object.
    ///
    /// # Panics
    ///
    /// Panics if `numeric` is not a dotted-numeric OID.
    pub fn define(&self, path: &str, numeric: &str) -> &Self {
        let arcs = parse_arcs(numeric)
            .unwrap_or_else(|| panic!("MockAgent::define: invalid numeric OID {numeric:?}"));
        let path = path.strip_prefix('.').unwrap_or(path).to_owned();
        self.inner.lock().unwrap().nodes.push(Node { arcs, path });
        self
    }

    /// Store an object instance.
    ///
    /// `name` may be numeric, fully qualified, or a leaf name with an
    /// instance suffix (`ifDescr.2`).
    ///
    /// # Panics
    ///
    /// Panics if `name` cannot be resolved.
    pub fn insert(&self, name: &str, value: impl Into<Value>) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        let arcs = inner
            .resolve(name)
            .unwrap_or_else(|| panic!("MockAgent::insert: cannot resolve {name:?}"));
        inner.objects.insert(arcs, value.into());
        self
    }

    /// Reject SETs to anything at or below `name` with `notWritable`.
    ///
    /// # Panics
    ///
    /// Panics if `name` cannot be resolved.
    pub fn mark_read_only(&self, name: &str) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        let arcs = inner
            .resolve(name)
            .unwrap_or_else(|| panic!("MockAgent::mark_read_only: cannot resolve {name:?}"));
        inner.read_only.push(arcs);
        self
    }

    /// Cap the number of varbinds in any GETBULK response.
    pub fn set_max_batch(&self, max: usize) {
        self.inner.lock().unwrap().max_batch = Some(max);
    }

    /// Inject a failure into the request with the given 0-based sequence
    /// number (counting every operation).
    pub fn fail_on(&self, request: usize, fault: MockFault) {
        self.inner.lock().unwrap().faults.insert(request, fault);
    }

    /// Inject a failure into the next request.
    pub fn fail_next(&self, fault: MockFault) {
        let mut inner = self.inner.lock().unwrap();
        let next = inner.requests.len();
        inner.faults.insert(next, fault);
    }

    /// Current value of an object, if present.
    pub fn value(&self, name: &str) -> Option<Value> {
        let inner = self.inner.lock().unwrap();
        let arcs = inner.resolve(name)?;
        inner.objects.get(&arcs).cloned()
    }

    /// Number of stored object instances.
    pub fn object_count(&self) -> usize {
        self.inner.lock().unwrap().objects.len()
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    /// Forget recorded requests. Scheduled faults keep their numbering
    /// relative to the cleared history.
    pub fn clear_requests(&self) {
        self.inner.lock().unwrap().requests.clear();
    }

    fn handle(
        &self,
        operation: Operation,
        mode: RequestMode,
        max_repetitions: Option<u32>,
        varbinds: &[VarBind],
        respond: impl FnOnce(&mut MockAgentInner) -> TransportResult,
    ) -> Outcome {
        let mut inner = self.inner.lock().unwrap();
        let seq = inner.requests.len();
        inner.requests.push(RecordedRequest {
            operation,
            mode,
            max_repetitions,
            varbinds: varbinds.to_vec(),
        });
        match inner.faults.remove(&seq) {
            Some(MockFault::Fail(fault)) => Outcome::Ready(Err(fault)),
            Some(MockFault::Stall) => Outcome::Stall,
            None => Outcome::Ready(respond(&mut *inner)),
        }
    }
}

impl Default for MockAgent {
    fn default() -> Self {
        Self::new("mock-agent")
    }
}

impl Transport for MockAgent {
    fn get(
        &self,
        mode: RequestMode,
        varbinds: &[VarBind],
    ) -> impl Future<Output = TransportResult> + Send {
        self.handle(Operation::Get, mode, None, varbinds, |inner| {
            Ok(varbinds.iter().map(|vb| inner.get(mode, vb)).collect())
        })
        .resolve()
    }

    fn get_next(
        &self,
        mode: RequestMode,
        varbinds: &[VarBind],
    ) -> impl Future<Output = TransportResult> + Send {
        self.handle(Operation::GetNext, mode, None, varbinds, |inner| {
            Ok(varbinds
                .iter()
                .filter_map(|vb| inner.resolve(&vb.name()))
                .map(|arcs| inner.next_after(mode, &arcs).0)
                .collect())
        })
        .resolve()
    }

    fn get_bulk(
        &self,
        mode: RequestMode,
        non_repeaters: u32,
        max_repetitions: u32,
        varbinds: &[VarBind],
    ) -> impl Future<Output = TransportResult> + Send {
        self.handle(
            Operation::GetBulk,
            mode,
            Some(max_repetitions),
            varbinds,
            |inner| Ok(inner.get_bulk(mode, non_repeaters, max_repetitions, varbinds)),
        )
        .resolve()
    }

    fn set(
        &self,
        mode: RequestMode,
        varbinds: &[VarBind],
    ) -> impl Future<Output = TransportResult> + Send {
        self.handle(Operation::Set, mode, None, varbinds, |inner| {
            inner.set(mode, varbinds)
        })
        .resolve()
    }

    fn target(&self) -> &str {
        &self.target
    }
}

impl MockAgentInner {
    /// Resolve a numeric, fully qualified, or leaf-plus-suffix name.
    fn resolve(&self, name: &str) -> Option<Vec<u32>> {
        let trimmed = name.strip_prefix('.').unwrap_or(name);
        if let Some(arcs) = parse_arcs(trimmed) {
            return Some(arcs);
        }
        let parts: Vec<&str> = trimmed.split('.').collect();
        for split in (1..=parts.len()).rev() {
            let (head, tail) = parts.split_at(split);
            let Some(node) = self.lookup(head) else {
                continue;
            };
            let Some(suffix) = tail
                .iter()
                .map(|arc| arc.parse::<u32>().ok())
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            let mut arcs = node.arcs.clone();
            arcs.extend(suffix);
            return Some(arcs);
        }
        None
    }

    fn lookup(&self, head: &[&str]) -> Option<&Node> {
        let joined = head.join(".");
        self.nodes
            .iter()
            .find(|node| node.path == joined || (head.len() == 1 && leaf(&node.path) == joined))
    }

    fn render(&self, mode: RequestMode, arcs: &[u32], value: Value) -> VarBind {
        let node = if mode.numeric {
            None
        } else {
            self.nodes
                .iter()
                .filter(|node| arcs.starts_with(&node.arcs))
                .max_by_key(|node| node.arcs.len())
        };
        match node {
            Some(node) => {
                let tag = if mode.long_names {
                    format!(".{}", node.path)
                } else {
                    leaf(&node.path).to_owned()
                };
                VarBind::new(tag, join_arcs(&arcs[node.arcs.len()..]), value)
            }
            // Numeric rendering puts the final arc in the index.
            None => match arcs.split_last() {
                Some((last, head)) if !head.is_empty() => {
                    VarBind::new(format!(".{}", join_arcs(head)), last.to_string(), value)
                }
                _ => VarBind::new(format!(".{}", join_arcs(arcs)), "", value),
            },
        }
    }

    fn get(&self, mode: RequestMode, vb: &VarBind) -> VarBind {
        let name = vb.name();
        let Some(arcs) = self.resolve(&name) else {
            return VarBind::new(name, "", Value::NoSuchObject);
        };
        let value = match self.objects.get(&arcs) {
            Some(value) => value.clone(),
            None if self.nodes.iter().any(|n| arcs.starts_with(&n.arcs)) => Value::NoSuchInstance,
            None => Value::NoSuchObject,
        };
        self.render(mode, &arcs, value)
    }

    /// The varbind following `arcs`, and the cursor to continue from.
    /// Past the last object this is `endOfMibView` at `arcs` itself.
    fn next_after(&self, mode: RequestMode, arcs: &[u32]) -> (VarBind, Option<Vec<u32>>) {
        match self.objects.get_next(arcs) {
            Some((next, value)) => (self.render(mode, next, value.clone()), Some(next.to_vec())),
            None => (self.render(mode, arcs, Value::EndOfMibView), None),
        }
    }

    fn get_bulk(
        &self,
        mode: RequestMode,
        non_repeaters: u32,
        max_repetitions: u32,
        varbinds: &[VarBind],
    ) -> Vec<VarBind> {
        let split = (non_repeaters as usize).min(varbinds.len());
        let (singles, repeaters) = varbinds.split_at(split);

        let mut out: Vec<VarBind> = singles
            .iter()
            .filter_map(|vb| self.resolve(&vb.name()))
            .map(|arcs| self.next_after(mode, &arcs).0)
            .collect();

        let mut cursors: Vec<Vec<u32>> = repeaters
            .iter()
            .filter_map(|vb| self.resolve(&vb.name()))
            .collect();

        for _ in 0..max_repetitions {
            if cursors.is_empty() {
                break;
            }
            let mut advanced = false;
            for cursor in &mut cursors {
                let (vb, next) = self.next_after(mode, cursor);
                out.push(vb);
                if let Some(next) = next {
                    *cursor = next;
                    advanced = true;
                }
            }
            if !advanced {
                break;
            }
        }

        if let Some(max) = self.max_batch {
            out.truncate(max);
        }
        out
    }

    fn set(&mut self, mode: RequestMode, varbinds: &[VarBind]) -> TransportResult {
        let mut writes = Vec::with_capacity(varbinds.len());
        for (i, vb) in varbinds.iter().enumerate() {
            let position = i as i32 + 1;
            let Some(arcs) = self.resolve(&vb.name()) else {
                return Err(Fault::status("noCreation", 11, position));
            };
            if self.read_only.iter().any(|ro| arcs.starts_with(ro)) {
                return Err(Fault::status("notWritable", 17, position));
            }
            writes.push((arcs, vb.value.clone()));
        }

        let mut echoed = Vec::with_capacity(writes.len());
        for (arcs, value) in writes {
            echoed.push(self.render(mode, &arcs, value.clone()));
            self.objects.insert(arcs, value);
        }
        Ok(echoed)
    }
}

fn parse_arcs(s: &str) -> Option<Vec<u32>> {
    let s = s.strip_prefix('.').unwrap_or(s);
    if s.is_empty() {
        return None;
    }
    s.split('.').map(|arc| arc.parse::<u32>().ok()).collect()
}

fn join_arcs(arcs: &[u32]) -> String {
    arcs.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
