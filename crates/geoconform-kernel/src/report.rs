//! Failure records, warnings and conformance reports.
//!
//! Every failure carries a deterministic witness identifier, so two runs
//! over the same graph report the same ids:
//!
//! 1. Build the canonical key `{schema, kind, category, message, path, details}`
//! 2. Serialize it canonically (sorted keys, no whitespace)
//! 3. `witnessId = "f1_" || base32hex_lower(SHA256(keyBytes))`

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::category::Category;

/// Schema version written into every report.
pub const REPORT_SCHEMA: u32 = 1;

/// Compute the witness id of a failure from its canonical key fields.
pub fn compute_failure_id(
    kind: FailureKind,
    category: Category,
    message: &str,
    path: &str,
    details: Option<&Value>,
) -> String {
    let key = canonical_failure_key(kind, category, message, path, details);
    let hash = Sha256::digest(canonical_bytes(&key));
    format!("f1_{}", base32hex_lower_no_pad(&hash))
}

fn canonical_failure_key(
    kind: FailureKind,
    category: Category,
    message: &str,
    path: &str,
    details: Option<&Value>,
) -> Value {
    let mut map = serde_json::Map::new();
    map.insert("schema".to_string(), Value::Number(REPORT_SCHEMA.into()));
    map.insert("kind".to_string(), Value::String(kind.as_str().to_string()));
    map.insert(
        "category".to_string(),
        Value::String(category.as_str().to_string()),
    );
    map.insert("message".to_string(), Value::String(message.to_string()));
    map.insert("path".to_string(), Value::String(path.to_string()));
    map.insert(
        "details".to_string(),
        details.cloned().unwrap_or(Value::Null),
    );
    Value::Object(map)
}

/// Canonical JSON bytes: object keys sorted, no insignificant whitespace.
fn canonical_bytes(value: &Value) -> Vec<u8> {
    match value {
        Value::Array(items) => {
            let mut buf = vec![b'['];
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                buf.extend_from_slice(&canonical_bytes(item));
            }
            buf.push(b']');
            buf
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut buf = vec![b'{'];
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                buf.extend_from_slice(Value::String((*key).clone()).to_string().as_bytes());
                buf.push(b':');
                buf.extend_from_slice(&canonical_bytes(&map[*key]));
            }
            buf.push(b'}');
            buf
        }
        scalar => scalar.to_string().into_bytes(),
    }
}

/// RFC 4648 base32hex, lowercase, without padding.
fn base32hex_lower_no_pad(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuv";

    let mut out = String::with_capacity(data.len() * 8 / 5 + 1);
    let mut bits: u64 = 0;
    let mut pending: u32 = 0;
    for &byte in data {
        bits = (bits << 8) | u64::from(byte);
        pending += 8;
        while pending >= 5 {
            pending -= 5;
            out.push(ALPHABET[((bits >> pending) & 0x1f) as usize] as char);
        }
    }
    if pending > 0 {
        out.push(ALPHABET[((bits << (5 - pending)) & 0x1f) as usize] as char);
    }
    out
}

/// Severity class of a failure. Both are reported the same way; the kind
/// says whether one accessor or a combination of accessors was at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    HardFailure,
    StructuralInconsistency,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HardFailure => "hard_failure",
            Self::StructuralInconsistency => "structural_inconsistency",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    pub witness_id: String,
    pub kind: FailureKind,
    pub category: Category,
    pub message: String,
    /// Location in the walked graph, e.g. `$.coordinateSystem.axis[1]`.
    pub path: String,
    /// Offending values, when the check has any to show.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Failure {
    pub fn new(
        kind: FailureKind,
        category: Category,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let path = path.into();
        Self {
            witness_id: compute_failure_id(kind, category, &message, &path, None),
            kind,
            category,
            message,
            path,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.witness_id = compute_failure_id(
            self.kind,
            self.category,
            &self.message,
            &self.path,
            Some(&details),
        );
        self.details = Some(details);
        self
    }
}

/// A policy downgrade: a mandatory or forbidden rule that the category's
/// policy does not enforce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub category: Category,
    pub message: String,
    pub path: String,
}

/// Outcome of one top-level validation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConformanceReport {
    pub schema: u32,
    /// "accepted" or "rejected".
    pub result: String,
    /// In walk order.
    pub failures: Vec<Failure>,
    pub warnings: Vec<Warning>,
}

impl ConformanceReport {
    pub fn new(failures: Vec<Failure>, warnings: Vec<Warning>) -> Self {
        let result = if failures.is_empty() {
            "accepted"
        } else {
            "rejected"
        };
        Self {
            schema: REPORT_SCHEMA,
            result: result.to_string(),
            failures,
            warnings,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.result == "accepted"
    }

    /// Warnings grouped by the category that downgraded them.
    pub fn warnings_by_category(&self) -> BTreeMap<Category, Vec<&Warning>> {
        let mut grouped: BTreeMap<Category, Vec<&Warning>> = BTreeMap::new();
        for warning in &self.warnings {
            grouped.entry(warning.category).or_default().push(warning);
        }
        grouped
    }

    pub fn failures_in(&self, category: Category) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(move |f| f.category == category)
    }

    /// Whether some failure message contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.failures.iter().any(|f| f.message.contains(needle))
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} failures, {} warnings)",
            self.result,
            self.failures.len(),
            self.warnings.len()
        )
    }
}
