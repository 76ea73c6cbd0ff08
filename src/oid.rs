//! String-level OID helpers.
//!
//! Object names travel through this crate as rendered strings, either
//! symbolic (`ifTable`, `.iso.org.dod.internet.mgmt.mib-2.interfaces.ifTable`)
//! or dotted-numeric (`.1.3.6.1.2.1.2.2`). Resolution between the two is the
//! engine's job; these helpers only answer structural questions.

/// Whether `oid` looks like a dotted-numeric OID.
///
/// Every dot-separated component after the first must parse as an integer,
/// and there must be at least one such component. The first component is
/// not inspected, so both `1.3.6.1` and `.1.3.6.1` qualify.
pub fn is_numeric(oid: &str) -> bool {
    let mut rest = oid.split('.').skip(1).peekable();
    if rest.peek().is_none() {
        return false;
    }
    rest.all(|arc| arc.parse::<u64>().is_ok())
}

/// Whether `tag` lies at or below `root`.
///
/// True when the two are equal, or when `tag` continues `root` with a `.`
/// separator. A plain string prefix is not enough: `ifTable2` is not inside
/// `ifTable`. One leading `.` on either side is ignored so that a numeric
/// root written `1.3.6.1` matches tags rendered `.1.3.6.1...`.
pub fn in_subtree(tag: &str, root: &str) -> bool {
    let tag = tag.strip_prefix('.').unwrap_or(tag);
    let root = root.strip_prefix('.').unwrap_or(root);
    match tag.strip_prefix(root) {
        Some("") => true,
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}

/// The final dot-separated component of `tag`.
pub fn leaf(tag: &str) -> &str {
    tag.rsplit('.').next().unwrap_or(tag)
}

/// Cut `tag` right after the last occurrence of `name`.
///
/// GETNEXT on a table name answers with the first leaf below it, e.g.
/// `.iso...ifTable.ifEntry.ifIndex` for `ifTable`. The prefix up to and
/// including `ifTable` spans every column, not just the first one.
pub fn root_prefix<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }
    tag.rfind(name).map(|pos| &tag[..pos + name.len()])
}

/// Split a compact OID list on whitespace and commas.
///
/// `"sysDescr.0, sysName.0 sysLocation.0"` yields three names.
pub fn split_oid_list(s: &str) -> Vec<&str> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Conversion into an ordered list of object names.
///
/// Implemented for slices, vectors and arrays of names, and for a single
/// `&str`, which is split with [`split_oid_list`].
pub trait IntoOids {
    /// Convert into owned names, preserving order.
    fn into_oids(self) -> Vec<String>;
}

impl IntoOids for &str {
    fn into_oids(self) -> Vec<String> {
        split_oid_list(self).into_iter().map(str::to_owned).collect()
    }
}

impl IntoOids for &String {
    fn into_oids(self) -> Vec<String> {
        self.as_str().into_oids()
    }
}

impl<S: AsRef<str>> IntoOids for &[S] {
    fn into_oids(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_owned()).collect()
    }
}

impl<S: AsRef<str>> IntoOids for &Vec<S> {
    fn into_oids(self) -> Vec<String> {
        self.as_slice().into_oids()
    }
}

impl<S: AsRef<str>> IntoOids for Vec<S> {
    fn into_oids(self) -> Vec<String> {
        self.as_slice().into_oids()
    }
}

impl<S: AsRef<str>, const N: usize> IntoOids for [S; N] {
    fn into_oids(self) -> Vec<String> {
        self.as_slice().into_oids()
    }
}
