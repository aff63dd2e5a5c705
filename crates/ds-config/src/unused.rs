//! Unused-key guard.
//!
//! "Consumed pointers" are JSON Pointer prefixes. A leaf under any consumed
//! prefix is consumed; any other leaf is unused (usually a typo such as
//! `paging/pagesize`).

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Every pointer [`AppConfig`](crate::AppConfig) reads.
pub const CONSUMED_POINTERS: &[&str] = &["/api/base_url", "/storage/data_dir", "/paging/page_size"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Sorted, unique.
    pub consumed_prefixes: Vec<String>,
    /// Sorted.
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// With `Warn` this always returns the report (and logs each unused key);
/// with `Fail` unused keys are an error.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed_prefixes: Vec<String> = CONSUMED_POINTERS
        .iter()
        .map(|p| canonical_pointer(p))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let unused: Vec<String> = leaf_pointers(config_json)
        .into_iter()
        .filter(|leaf| !consumed_prefixes.iter().any(|p| covers(p, leaf)))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let report = UnusedKeyReport {
        consumed_prefixes,
        unused_leaf_pointers: unused,
    };

    match policy {
        UnusedKeyPolicy::Fail if !report.is_clean() => bail!(
            "CONFIG_UNUSED_KEYS: {} unused config key(s): {:?}",
            report.unused_leaf_pointers.len(),
            report.unused_leaf_pointers
        ),
        UnusedKeyPolicy::Warn => {
            for p in &report.unused_leaf_pointers {
                tracing::warn!(pointer = %p, "config key is not used");
            }
        }
        UnusedKeyPolicy::Fail => {}
    }

    Ok(report)
}

fn canonical_pointer(p: &str) -> String {
    match p.trim().trim_matches('/') {
        "" => "/".to_string(),
        inner => format!("/{inner}"),
    }
}

/// `/paging` covers `/paging` and `/paging/page_size`, not `/pagingx`.
fn covers(prefix: &str, leaf: &str) -> bool {
    prefix == "/"
        || leaf
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// JSON pointers of every scalar in `root`. Empty maps and lists have none.
fn leaf_pointers(root: &Value) -> Vec<String> {
    let mut out = Vec::new();
    let mut pending: Vec<(String, &Value)> = vec![(String::new(), root)];
    while let Some((at, v)) = pending.pop() {
        match v {
            Value::Object(map) => {
                pending.extend(map.iter().map(|(k, child)| (format!("{at}/{}", token(k)), child)))
            }
            Value::Array(items) => {
                pending.extend(items.iter().enumerate().map(|(i, child)| (format!("{at}/{i}"), child)))
            }
            _ if at.is_empty() => out.push("/".to_string()),
            _ => out.push(at),
        }
    }
    out
}

/// RFC 6901 escaping of one reference token.
fn token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cover_respects_token_boundary() {
        assert!(covers("/api", "/api/base_url"));
        assert!(covers("/api/base_url", "/api/base_url"));
        assert!(!covers("/api", "/apis/x"));
        assert!(covers("/", "/anything"));
    }

    #[test]
    fn pointer_tokens_are_escaped() {
        assert_eq!(leaf_pointers(&json!({"a/b": {"c~d": 1}})), vec!["/a~1b/c~0d".to_string()]);
    }

    #[test]
    fn empty_containers_have_no_leaves() {
        assert!(leaf_pointers(&json!({})).is_empty());
        assert!(leaf_pointers(&json!({"a": [], "b": {}})).is_empty());
    }

    #[test]
    fn list_items_are_indexed() {
        let mut leaves = leaf_pointers(&json!({"a": [1, {"b": 2}]}));
        leaves.sort();
        assert_eq!(leaves, vec!["/a/0".to_string(), "/a/1/b".to_string()]);
    }

    #[test]
    fn canonical_forms() {
        assert_eq!(canonical_pointer("api/"), "/api");
        assert_eq!(canonical_pointer(" /paging/page_size "), "/paging/page_size");
        assert_eq!(canonical_pointer(""), "/");
    }
}
