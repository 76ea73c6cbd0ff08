//! Subtree walks.
//!
//! A walk fetches everything at or below a root with repeated GETBULK
//! requests (GETNEXT on SNMPv1), each seeded with the last varbind of the
//! previous batch, until a batch ends outside the subtree.

use std::collections::HashSet;

use tracing::instrument;

use crate::error::{Error, ErrorKind, Result};
use crate::oid::{in_subtree, root_prefix};
use crate::transport::{RequestMode, Transport};
use crate::value::Value;
use crate::varbind::VarBind;

use super::Session;

/// Whether `vb` belongs to the subtree rooted at `root`.
fn inside(vb: &VarBind, root: &str) -> bool {
    !matches!(vb.value, Value::EndOfMibView) && in_subtree(&vb.tag, root)
}

impl<T: Transport> Session<T> {
    /// Walk the subtree at or below `oid`.
    ///
    /// Returns every varbind under the root in agent traversal order, with
    /// fully qualified tags. A dotted-numeric `oid` switches the walk to
    /// numeric addressing. Nothing under the name yields an empty result.
    ///
    /// The session's own naming flags are left untouched.
    #[instrument(skip(self), err, fields(snmp.target = %self.transport.target()))]
    pub async fn walk(&self, oid: &str) -> Result<Vec<VarBind>> {
        let mode = self.mode().for_walk(oid);

        let root = if mode.numeric {
            oid.to_owned()
        } else {
            match self.first_entry(mode, oid).await? {
                Some(first) => match root_prefix(&first.tag, oid) {
                    Some(root) => root.to_owned(),
                    None => {
                        tracing::debug!(target: "snmp_tables::session", { snmp.oid = oid, first = %first.tag }, "no objects under name");
                        return Ok(Vec::new());
                    }
                },
                None => return Ok(Vec::new()),
            }
        };

        self.walk_from(mode, oid, &root).await
    }

    /// Walk `oid` and return only the values.
    pub async fn walk_values(&self, oid: &str) -> Result<Vec<Value>> {
        Ok(self
            .walk(oid)
            .await?
            .into_iter()
            .map(|vb| vb.value)
            .collect())
    }

    /// Row indices of the table at `oid`, in traversal order.
    ///
    /// Walks only the first column. Empty when nothing exists under the
    /// name.
    #[instrument(skip(self), err, fields(snmp.target = %self.transport.target()))]
    pub async fn table_indices(&self, oid: &str) -> Result<Vec<String>> {
        let mode = self.mode().for_walk(oid);

        let Some(first) = self.first_entry(mode, oid).await? else {
            return Ok(Vec::new());
        };
        let in_table = if mode.numeric {
            in_subtree(&first.tag, oid)
        } else {
            root_prefix(&first.tag, oid).is_some()
        };
        if !in_table {
            return Ok(Vec::new());
        }

        let column = first.tag;
        Ok(self
            .walk_from(mode, &column, &column)
            .await?
            .into_iter()
            .map(|vb| vb.index)
            .collect())
    }

    /// GETNEXT on `oid`; `None` when the agent has nothing after it.
    async fn first_entry(&self, mode: RequestMode, oid: &str) -> Result<Option<VarBind>> {
        let response = self
            .transport_get_next(mode, &[VarBind::null(oid)])
            .await?;
        Ok(response
            .into_iter()
            .next()
            .filter(|vb| !matches!(vb.value, Value::EndOfMibView)))
    }

    /// Batch loop: seed with `oid`, keep going while each batch ends inside
    /// `root`, then keep the in-subtree head of the final batch.
    ///
    /// Every cursor used as a seed is remembered; one coming back fails the
    /// walk with [`ErrorKind::NonIncreasingOid`].
    async fn walk_from(&self, mode: RequestMode, oid: &str, root: &str) -> Result<Vec<VarBind>> {
        let mut seed = VarBind::null(oid);
        let mut seen = HashSet::from([seed.name()]);
        let mut results = Vec::new();
        let mut batches = 0usize;

        loop {
            let batch = self.next_batch(mode, &seed).await?;
            batches += 1;

            let Some(last) = batch.last() else {
                tracing::debug!(target: "snmp_tables::session", { snmp.oid = oid, batches }, "empty batch ends walk");
                break;
            };

            if !inside(last, root) {
                results.extend(batch.into_iter().take_while(|vb| inside(vb, root)));
                break;
            }

            let cursor = last.name();
            if !seen.insert(cursor.clone()) {
                tracing::warn!(target: "snmp_tables::session", { snmp.oid = oid, cursor = %cursor, batches }, "agent returned non-increasing OID");
                return Err(Error::new(
                    ErrorKind::NonIncreasingOid,
                    format!("walk of {oid} revisited {cursor}"),
                ));
            }

            seed = VarBind::new(last.tag.clone(), last.index.clone(), Value::Null);
            tracing::debug!(target: "snmp_tables::session", { snmp.oid = oid, batch_len = batch.len(), cursor = %seed.name() }, "continuing walk");
            results.extend(batch);
        }

        tracing::debug!(target: "snmp_tables::session", { snmp.oid = oid, snmp.root = root, results = results.len(), batches }, "walk complete");
        Ok(results)
    }

    async fn next_batch(&self, mode: RequestMode, seed: &VarBind) -> Result<Vec<VarBind>> {
        let request = std::slice::from_ref(seed);
        if self.config.version.supports_bulk() {
            self.transport_get_bulk(mode, request).await
        } else {
            self.transport_get_next(mode, request).await
        }
    }
}
