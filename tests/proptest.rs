//! Property-based tests for snmp-tables.
//!
//! Walk properties run against a fresh in-memory agent per case, driven by
//! one shared current-thread runtime.

mod common;

use std::sync::OnceLock;

use proptest::prelude::*;
use snmp_tables::oid::in_subtree;
use snmp_tables::transport::MockAgent;
use snmp_tables::{Session, Table, Value, VarBind};
use tokio::runtime::Runtime;

const ACME_TABLE: &str = "iso.org.dod.internet.private.enterprises.acme.acmeTable";
const ACME_ENTRY: &str = "iso.org.dod.internet.private.enterprises.acme.acmeTable.acmeEntry";

fn runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("failed to create runtime")
    })
}

/// Agent holding a `rows` x `columns` table, a sibling table sharing its
/// name as a string prefix, and a trailing scalar.
fn acme_agent(rows: &[u32], columns: usize) -> MockAgent {
    let agent = MockAgent::new("acme");
    agent
        .define(ACME_TABLE, "1.3.6.1.4.1.9999.1")
        .define(ACME_ENTRY, "1.3.6.1.4.1.9999.1.1")
        .define(&format!("{ACME_TABLE}2"), "1.3.6.1.4.1.9999.2")
        .define(
            "iso.org.dod.internet.private.enterprises.acme.acmeUptime",
            "1.3.6.1.4.1.9999.3",
        );
    for c in 1..=columns {
        agent.define(
            &format!("{ACME_ENTRY}.col{c}"),
            &format!("1.3.6.1.4.1.9999.1.1.{c}"),
        );
        for &r in rows {
            agent.insert(
                &format!("1.3.6.1.4.1.9999.1.1.{c}.{r}"),
                Value::Gauge32(r * 100 + c as u32),
            );
        }
    }
    agent
        .insert("1.3.6.1.4.1.9999.2.1.1.1", 1)
        .insert("1.3.6.1.4.1.9999.3.0", Value::TimeTicks(1));
    agent
}

fn arb_rows() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(1u32..10_000, 1..20).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every object under the table comes back exactly once, in order,
    /// whatever the response size.
    #[test]
    fn walk_is_complete_under_any_batching(
        rows in arb_rows(),
        columns in 1usize..6,
        max_batch in 1usize..40,
    ) {
        let agent = acme_agent(&rows, columns);
        agent.set_max_batch(max_batch);
        let session = Session::new(agent);

        let walked = runtime().block_on(session.walk("acmeTable")).unwrap();

        let expected: Vec<String> = (1..=columns)
            .flat_map(|c| rows.iter().map(move |r| format!("col{c}.{r}")))
            .collect();
        prop_assert_eq!(common::short_names(&walked), expected);
    }

    /// Numeric walks agree with symbolic walks on values.
    #[test]
    fn numeric_and_symbolic_walks_agree(
        rows in arb_rows(),
        columns in 1usize..4,
        max_batch in 1usize..20,
    ) {
        let agent = acme_agent(&rows, columns);
        agent.set_max_batch(max_batch);
        let session = Session::new(agent);

        let symbolic = runtime().block_on(session.walk_values("acmeTable")).unwrap();
        let numeric = runtime().block_on(session.walk_values("1.3.6.1.4.1.9999.1")).unwrap();
        prop_assert_eq!(symbolic, numeric);
    }

    /// An R x C column-major list reshapes into R rows of C fields.
    #[test]
    fn table_reshape_matches_positions(rows in 1usize..30, columns in 1usize..8) {
        let flat: Vec<VarBind> = (0..columns)
            .flat_map(|c| {
                (0..rows).map(move |r| {
                    VarBind::new(
                        format!(".acme.acmeTable.acmeEntry.col{c}"),
                        format!("{}", r + 1),
                        Value::Integer((c * 1000 + r) as i32),
                    )
                })
            })
            .collect();

        let table = Table::from_subtree(&flat).unwrap();

        prop_assert_eq!(table.len(), rows);
        prop_assert_eq!(table.columns().len(), columns);
        for (r, (index, row)) in table.iter().enumerate() {
            prop_assert_eq!(index, (r + 1).to_string());
            prop_assert_eq!(row.len(), columns);
            for c in 0..columns {
                prop_assert_eq!(&row[c], &flat[c * rows + r].value);
            }
        }
    }

    /// A name that only shares a string prefix is never inside the root.
    #[test]
    fn prefix_sibling_is_outside(
        root in "[a-zA-Z][a-zA-Z0-9]{0,12}",
        suffix in "[a-zA-Z0-9]{1,6}",
        tail in prop::collection::vec("[a-zA-Z0-9]{1,6}", 0..4),
    ) {
        let mut sibling = format!(".iso.org.{root}{suffix}");
        for part in &tail {
            sibling.push('.');
            sibling.push_str(part);
        }
        let root_name = format!(".iso.org.{root}");
        prop_assert!(!in_subtree(&sibling, &root_name));

        let mut child = format!(".iso.org.{root}");
        for part in &tail {
            child.push('.');
            child.push_str(part);
        }
        prop_assert!(in_subtree(&child, &root_name));
    }
}
