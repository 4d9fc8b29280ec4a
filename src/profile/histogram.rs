//! Value stringification and per-field frequency counters

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bson::Bson;
use chrono::SecondsFormat;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Histogram key used for null values
pub const NULL_KEY: &str = "null";

/// Deterministic string key for a scalar value.
///
/// Values that are equal by type and contents always produce the same key.
pub fn value_key(value: &Bson) -> String {
    match value {
        Bson::Null => NULL_KEY.to_string(),
        Bson::Boolean(b) => b.to_string(),
        Bson::Int32(i) => i.to_string(),
        Bson::Int64(i) => i.to_string(),
        // Debug keeps the fractional part ("1.0"), unlike Display
        Bson::Double(f) => format!("{:?}", f),
        Bson::String(s) => s.clone(),
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::DateTime(dt) => dt.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true),
        Bson::Decimal128(d) => d.to_string(),
        Bson::RegularExpression(regex) => format!("/{}/{}", regex.pattern, regex.options),
        Bson::Binary(binary) => STANDARD.encode(&binary.bytes),
        other => other.to_string(),
    }
}

/// A histogram entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: u64,
}

/// Frequency counter for the stringified values seen at one field.
///
/// Entries keep first-seen order. With a capacity the histogram becomes a
/// Space-Saving top-K tracker: a new key arriving when full replaces the
/// lowest count (earliest seen among equals) and inherits that count plus
/// one. Counts are then upper bounds, but their sum still equals the number
/// of recorded observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueHistogram {
    counts: IndexMap<String, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capacity: Option<usize>,
    observations: u64,
    evictions: u64,
}

impl ValueHistogram {
    /// Exact, unbounded histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounded histogram tracking at most `capacity` distinct values
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::default()
        }
    }

    /// Count one occurrence of `key`
    pub fn record(&mut self, key: String) {
        self.observations += 1;

        if let Some(count) = self.counts.get_mut(&key) {
            *count += 1;
            return;
        }

        match self.capacity {
            Some(capacity) if self.counts.len() >= capacity => {
                let evicted = self
                    .counts
                    .values()
                    .enumerate()
                    .min_by_key(|(_, count)| **count)
                    .map(|(idx, count)| (idx, *count));
                if let Some((idx, min)) = evicted {
                    self.counts.shift_remove_index(idx);
                    self.counts.insert(key, min + 1);
                    self.evictions += 1;
                }
            }
            _ => {
                self.counts.insert(key, 1);
            }
        }
    }

    /// Count of a key, if tracked
    pub fn get(&self, key: &str) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Entries sorted by descending count, ties in first-seen order, limited to `k`
    pub fn top(&self, k: usize) -> Vec<ValueCount> {
        let mut entries: Vec<(&String, &u64)> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1));
        entries
            .into_iter()
            .take(k)
            .map(|(value, count)| ValueCount {
                value: value.clone(),
                count: *count,
            })
            .collect()
    }

    /// Number of tracked distinct values
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total recorded observations (sum of all counts)
    pub fn total(&self) -> u64 {
        self.observations
    }

    /// Whether counts are approximate because values were evicted
    pub fn is_approximate(&self) -> bool {
        self.evictions > 0
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Snapshot of the counts in first-seen order
    pub fn to_map(&self) -> IndexMap<String, u64> {
        self.counts.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use bson::spec::BinarySubtype;
    use bson::{Binary, Regex};

    #[test]
    fn test_value_keys() {
        assert_eq!(value_key(&Bson::Null), "null");
        assert_eq!(value_key(&Bson::Boolean(false)), "false");
        assert_eq!(value_key(&Bson::Int32(-4)), "-4");
        assert_eq!(value_key(&Bson::Int64(9_000_000_000)), "9000000000");
        assert_eq!(value_key(&Bson::Double(1.0)), "1.0");
        assert_eq!(value_key(&Bson::Double(2.5)), "2.5");
        assert_eq!(value_key(&Bson::Double(1e16)), "1e16");
        assert_eq!(value_key(&Bson::Double(1e-7)), "1e-7");
        assert_eq!(value_key(&Bson::String("hi".to_string())), "hi");

        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(value_key(&Bson::ObjectId(oid)), "507f1f77bcf86cd799439011");

        let date = bson::DateTime::from_millis(1_705_314_600_000);
        assert_eq!(value_key(&Bson::DateTime(date)), "2024-01-15T10:30:00.000Z");

        let regex = Regex {
            pattern: "^ab+".to_string(),
            options: "i".to_string(),
        };
        assert_eq!(value_key(&Bson::RegularExpression(regex)), "/^ab+/i");

        let binary = Binary {
            subtype: BinarySubtype::Generic,
            bytes: b"hello".to_vec(),
        };
        assert_eq!(value_key(&Bson::Binary(binary)), "aGVsbG8=");
    }

    #[test]
    fn test_value_key_is_deterministic() {
        let a = Bson::Double(0.1 + 0.2);
        let b = Bson::Double(0.1 + 0.2);
        assert_eq!(value_key(&a), value_key(&b));
    }

    #[test]
    fn test_exact_histogram() {
        let mut h = ValueHistogram::new();
        for key in ["a", "b", "a", "c", "a", "b"] {
            h.record(key.to_string());
        }
        assert_eq!(h.get("a"), Some(3));
        assert_eq!(h.get("b"), Some(2));
        assert_eq!(h.len(), 3);
        assert_eq!(h.total(), 6);
        assert!(!h.is_approximate());
    }

    #[test]
    fn test_top_ties_keep_first_seen_order() {
        let mut h = ValueHistogram::new();
        for key in ["x", "y", "z", "y"] {
            h.record(key.to_string());
        }
        let top: Vec<_> = h.top(10).into_iter().map(|v| v.value).collect();
        assert_eq!(top, vec!["y", "x", "z"]);
        assert_eq!(h.top(1)[0].count, 2);
    }

    #[test]
    fn test_bounded_histogram_evicts_lowest() {
        let mut h = ValueHistogram::bounded(2);
        for key in ["a", "a", "a", "b", "c"] {
            h.record(key.to_string());
        }
        // "b" (count 1) is replaced by "c" inheriting 1 + 1
        assert_eq!(h.len(), 2);
        assert_eq!(h.get("a"), Some(3));
        assert_eq!(h.get("b"), None);
        assert_eq!(h.get("c"), Some(2));
        assert!(h.is_approximate());
        let mass: u64 = h.iter().map(|(_, c)| c).sum();
        assert_eq!(mass, h.total());
    }

    #[test]
    fn test_bounded_histogram_keeps_heavy_hitters() {
        let mut h = ValueHistogram::bounded(3);
        for i in 0..100 {
            h.record("hot".to_string());
            h.record(format!("cold-{}", i));
        }
        assert_eq!(h.top(1)[0].value, "hot");
        assert!(h.len() <= 3);
    }
}
