//! Common test fixtures and constants.

use snmp_tables::transport::MockAgent;
use snmp_tables::{Session, SessionBuilder, VarBind, Version};

// =============================================================================
// Fully qualified names
// =============================================================================

pub const MIB_2: &str = "iso.org.dod.internet.mgmt.mib-2";
pub const SYSTEM: &str = "iso.org.dod.internet.mgmt.mib-2.system";
pub const INTERFACES: &str = "iso.org.dod.internet.mgmt.mib-2.interfaces";
pub const IF_TABLE: &str = "iso.org.dod.internet.mgmt.mib-2.interfaces.ifTable";
pub const IF_ENTRY: &str = "iso.org.dod.internet.mgmt.mib-2.interfaces.ifTable.ifEntry";
pub const IF_TABLE2: &str = "iso.org.dod.internet.mgmt.mib-2.interfaces.ifTable2";

/// `ifTable` as the engine renders it with long names.
pub const IF_TABLE_TAG: &str = ".iso.org.dod.internet.mgmt.mib-2.interfaces.ifTable";

/// Numeric OID of `ifTable`.
pub const IF_TABLE_OID: &str = "1.3.6.1.2.1.2.2";

// =============================================================================
// Logging
// =============================================================================

/// Route crate tracing output to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Agent contents
// =============================================================================

/// `(ifIndex, ifDescr, ifType, ifMtu)` for each interface row.
pub const INTERFACES_ROWS: [(i32, &str, i32, i32); 3] = [
    (1, "lo", 24, 65536),
    (2, "eth0", 6, 1500),
    (3, "eth1", 6, 9000),
];

/// Column leaf names of `ifTable`, in OID order.
pub const IF_COLUMNS: [&str; 4] = ["ifIndex", "ifDescr", "ifType", "ifMtu"];

/// Number of objects under `ifTable`.
pub const IF_TABLE_LEN: usize = INTERFACES_ROWS.len() * IF_COLUMNS.len();

/// Agent with the system group, `ifTable`, a sibling `ifTable2` whose name
/// shares `ifTable` as a string prefix, an empty `ipAddrTable`, and one
/// object after it.
pub fn agent() -> MockAgent {
    init_tracing();
    let agent = MockAgent::new("192.0.2.1:161");

    agent
        .define(MIB_2, "1.3.6.1.2.1")
        .define(SYSTEM, "1.3.6.1.2.1.1")
        .define(&format!("{SYSTEM}.sysDescr"), "1.3.6.1.2.1.1.1")
        .define(&format!("{SYSTEM}.sysUpTime"), "1.3.6.1.2.1.1.3")
        .define(&format!("{SYSTEM}.sysContact"), "1.3.6.1.2.1.1.4")
        .define(&format!("{SYSTEM}.sysName"), "1.3.6.1.2.1.1.5")
        .define(&format!("{SYSTEM}.sysLocation"), "1.3.6.1.2.1.1.6")
        .define(INTERFACES, "1.3.6.1.2.1.2")
        .define(IF_TABLE, IF_TABLE_OID)
        .define(IF_ENTRY, "1.3.6.1.2.1.2.2.1")
        .define(&format!("{IF_ENTRY}.ifIndex"), "1.3.6.1.2.1.2.2.1.1")
        .define(&format!("{IF_ENTRY}.ifDescr"), "1.3.6.1.2.1.2.2.1.2")
        .define(&format!("{IF_ENTRY}.ifType"), "1.3.6.1.2.1.2.2.1.3")
        .define(&format!("{IF_ENTRY}.ifMtu"), "1.3.6.1.2.1.2.2.1.4")
        .define(IF_TABLE2, "1.3.6.1.2.1.2.3")
        .define(&format!("{IF_TABLE2}.ifEntry2"), "1.3.6.1.2.1.2.3.1")
        .define(&format!("{IF_TABLE2}.ifEntry2.ifIndex2"), "1.3.6.1.2.1.2.3.1.1")
        .define(&format!("{IF_TABLE2}.ifEntry2.ifDescr2"), "1.3.6.1.2.1.2.3.1.2")
        .define(&format!("{MIB_2}.ip.ipAddrTable"), "1.3.6.1.2.1.4.20")
        .define(&format!("{MIB_2}.snmp.snmpInPkts"), "1.3.6.1.2.1.11.1");

    agent
        .insert("sysDescr.0", "Linux core-rtr 6.1.0")
        .insert("sysUpTime.0", snmp_tables::Value::TimeTicks(123_456))
        .insert("sysContact.0", "noc@example.net")
        .insert("sysName.0", "core-rtr")
        .insert("sysLocation.0", "");

    for (index, descr, if_type, mtu) in INTERFACES_ROWS {
        agent
            .insert(&format!("ifIndex.{index}"), index)
            .insert(&format!("ifDescr.{index}"), descr)
            .insert(&format!("ifType.{index}"), if_type)
            .insert(&format!("ifMtu.{index}"), mtu);
    }

    for index in [1, 2] {
        agent
            .insert(&format!("ifIndex2.{index}"), index)
            .insert(&format!("ifDescr2.{index}"), format!("tun{index}"));
    }

    agent.insert("snmpInPkts.0", snmp_tables::Value::Counter32(42));
    agent
}

/// Session with default configuration over [`agent()`].
pub fn session() -> (Session<MockAgent>, MockAgent) {
    let agent = agent();
    (Session::new(agent.clone()), agent)
}

/// SNMPv1 session over [`agent()`].
pub fn v1_session() -> (Session<MockAgent>, MockAgent) {
    let agent = agent();
    let session = SessionBuilder::new()
        .version(Version::V1)
        .build(agent.clone());
    (session, agent)
}

/// `leaf.index` for each varbind, for compact assertions.
pub fn short_names(varbinds: &[VarBind]) -> Vec<String> {
    varbinds
        .iter()
        .map(|vb| format!("{}.{}", snmp_tables::oid::leaf(&vb.tag), vb.index))
        .collect()
}

/// Expected `short_names` of a full `ifTable` walk.
pub fn if_table_names() -> Vec<String> {
    IF_COLUMNS
        .iter()
        .flat_map(|column| {
            INTERFACES_ROWS
                .iter()
                .map(move |(index, ..)| format!("{column}.{index}"))
        })
        .collect()
}
