//! GET / GETNEXT / SET facade and error classification tests.

mod common;

use common::*;
use snmp_tables::transport::{MockFault, Operation};
use snmp_tables::{ErrorKind, Fault, OneOrMany, TIMEOUT_ERROR_INDEX, Value, ValueType};

#[tokio::test]
async fn get_single_is_unwrapped() {
    let (session, _agent) = session();

    let value = session.get(["sysName.0"]).await.unwrap();
    assert_eq!(value, OneOrMany::One(Value::from("core-rtr")));
}

#[tokio::test]
async fn get_many_follows_request_order() {
    let (session, agent) = session();

    let values = session.get(["sysName.0", "sysDescr.0"]).await.unwrap();
    assert_eq!(
        values,
        OneOrMany::Many(vec![
            Value::from("core-rtr"),
            Value::from("Linux core-rtr 6.1.0")
        ])
    );
    assert_eq!(agent.request_count(), 1);
}

#[tokio::test]
async fn get_accepts_compact_string() {
    let (session, agent) = session();

    let values = session
        .get("sysName.0, sysContact.0 ifDescr.3")
        .await
        .unwrap()
        .into_vec();
    assert_eq!(values.len(), 3);
    assert_eq!(values[2], Value::from("eth1"));
    assert_eq!(
        agent.requests()[0].names(),
        ["sysName.0", "sysContact.0", "ifDescr.3"]
    );
}

#[tokio::test]
async fn get_with_metadata_reports_tag_index_type() {
    let (session, _agent) = session();

    let vbs = session
        .get_with_metadata("sysUpTime.0 ifMtu.9")
        .await
        .unwrap()
        .into_vec();

    assert_eq!(vbs[0].tag, "sysUpTime");
    assert_eq!(vbs[0].index, "0");
    assert_eq!(vbs[0].value_type(), ValueType::TimeTicks);
    assert_eq!(vbs[1].tag, "ifMtu");
    assert_eq!(vbs[1].index, "9");
    assert_eq!(vbs[1].value, Value::NoSuchInstance);
}

#[tokio::test]
async fn get_next_returns_following_object() {
    let (session, _agent) = session();

    let vb = session
        .get_next_with_metadata("sysName.0")
        .await
        .unwrap()
        .one()
        .unwrap();
    assert_eq!(vb.tag, "sysLocation");
    assert_eq!(vb.index, "0");

    let values = session
        .get_next("ifDescr.1 ifDescr.2")
        .await
        .unwrap()
        .into_vec();
    assert_eq!(values, [Value::from("eth0"), Value::from("eth1")]);
}

#[tokio::test]
async fn set_rejects_missing_value_without_transport() {
    let (session, agent) = session();

    let err = session
        .set_pairs([(Some("sysContact.0"), None::<Value>)])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(err.index(), Some(1));
    assert_eq!(agent.request_count(), 0);
}

#[tokio::test]
async fn set_rejects_missing_oid_without_transport() {
    let (session, agent) = session();

    let err = session
        .set_pairs([
            (Some("sysContact.0"), Some(Value::from("ops"))),
            (None, Some(Value::from("x"))),
        ])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(err.index(), Some(2));

    let err = session
        .set_pairs([(Some(""), Some(Value::from("x")))])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);

    assert_eq!(agent.request_count(), 0);
}

#[tokio::test]
async fn set_count_mismatch_is_rejected() {
    let (session, agent) = session();

    let err = session
        .set("sysContact.0 sysLocation.0", ["ops"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(err.index(), Some(2));

    let err = session
        .set("sysContact.0", ["ops", "extra"])
        .await
        .unwrap_err();
    assert_eq!(err.index(), Some(2));

    assert_eq!(agent.request_count(), 0);
}

#[tokio::test]
async fn set_applies_all_pairs_in_one_request() {
    let (session, agent) = session();

    let echoed = session
        .set("sysContact.0 sysLocation.0", ["ops@example.net", "rack 4"])
        .await
        .unwrap();

    assert_eq!(echoed.len(), 2);
    assert_eq!(echoed[1].tag, "sysLocation");
    assert_eq!(agent.request_count(), 1);
    assert_eq!(agent.requests()[0].operation, Operation::Set);
    assert_eq!(agent.value("sysContact.0"), Some(Value::from("ops@example.net")));
    assert_eq!(
        session.get("sysLocation.0").await.unwrap(),
        OneOrMany::One(Value::from("rack 4"))
    );
}

#[tokio::test]
async fn set_failure_is_atomic_and_classified() {
    let (session, agent) = session();
    agent.mark_read_only("sysUpTime");

    let err = session
        .set_pairs([
            (Some("sysContact.0"), Some(Value::from("ops"))),
            (Some("sysUpTime.0"), Some(Value::TimeTicks(0))),
        ])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotWritable);
    assert_eq!(err.code(), Some(17));
    assert_eq!(err.index(), Some(2));
    assert_eq!(err.varlist().unwrap().len(), 2);
    assert_eq!(agent.value("sysContact.0"), Some(Value::from("noc@example.net")));
}

#[tokio::test]
async fn contains_reports_presence() {
    let (session, _agent) = session();

    assert!(session.contains("sysName.0").await);
    // Present but empty.
    assert!(session.contains("sysLocation.0").await);
    assert!(!session.contains("ifDescr.9").await);
    assert!(!session.contains("noSuchThing.0").await);
}

#[tokio::test]
async fn contains_is_false_on_any_error() {
    let (session, agent) = session();

    agent.fail_next(MockFault::Fail(Fault::timeout()));
    assert!(!session.contains("sysName.0").await);

    agent.fail_next(MockFault::Fail(Fault::status("authorizationError", 16, 0)));
    assert!(!session.contains("sysName.0").await);

    assert!(session.contains("sysName.0").await);
}

#[tokio::test]
async fn timeout_index_wins_over_code() {
    let (session, agent) = session();
    agent.fail_next(MockFault::Fail(Fault::status("Timeout", 17, TIMEOUT_ERROR_INDEX)));

    let err = session.get("sysName.0").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(err.is_timeout());
}

#[tokio::test]
async fn agent_codes_map_to_kinds() {
    let cases = [
        (1, ErrorKind::TooBig),
        (2, ErrorKind::NoSuchName),
        (6, ErrorKind::NoAccess),
        (11, ErrorKind::NoCreation),
        (16, ErrorKind::Authorization),
        (17, ErrorKind::NotWritable),
        (18, ErrorKind::InconsistentName),
    ];
    for (code, kind) in cases {
        let (session, agent) = session();
        agent.fail_next(MockFault::Fail(Fault::status("agent error", code, 3)));

        let err = session.get("sysName.0").await.unwrap_err();
        assert_eq!(err.kind(), kind, "code {code}");
        assert_eq!(err.index(), Some(3));
    }
}

#[tokio::test]
async fn unmapped_code_is_generic_and_preserved() {
    let (session, agent) = session();
    agent.fail_next(MockFault::Fail(Fault::status("vendor failure", 99, 2)));

    let err = session.get("sysName.0 sysDescr.0").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert_eq!(err.message(), "vendor failure");
    assert_eq!(err.code(), Some(99));
    assert_eq!(err.index(), Some(2));
    assert_eq!(
        err.to_string(),
        "vendor failure Error Number: 99 Error Index: 2"
    );
}

#[tokio::test]
async fn flags_change_rendering_of_later_calls() {
    let (mut session, _agent) = session();

    session.set_use_long_names(true);
    let vb = session
        .get_with_metadata("sysName.0")
        .await
        .unwrap()
        .one()
        .unwrap();
    assert_eq!(vb.tag, format!(".{SYSTEM}.sysName"));

    session.set_use_numeric(true);
    let vb = session
        .get_with_metadata("sysName.0")
        .await
        .unwrap()
        .one()
        .unwrap();
    assert_eq!(vb.tag, ".1.3.6.1.2.1.1.5");
    assert_eq!(vb.index, "0");
}
