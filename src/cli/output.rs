//! Output formatting for CLI

use bson_schema_profiler::{ProfileConfig, ProfileStats};

/// Summary printed to stderr once profiling finishes
pub fn format_summary(stats: &ProfileStats, config: &ProfileConfig) -> String {
    let mut output = String::new();

    output.push_str("Profiling complete:\n");
    output.push_str(&format!("  Records analyzed: {}\n", stats.records_processed));
    output.push_str(&format!("  Fields discovered: {}\n", stats.fields_discovered));
    output.push_str(&format!(
        "  Distinct values tracked: {}\n",
        stats.histogram_entries
    ));

    if let Some(capacity) = config.histogram_capacity() {
        output.push_str(&format!(
            "  Histogram capacity: {} values per field ({} field(s) approximate)\n",
            capacity, stats.approximate_fields
        ));
    }
    if config.sample_size > 0 {
        output.push_str(&format!("  Sample size: {}\n", config.sample_size));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mentions_counts() {
        let stats = ProfileStats {
            records_processed: 3,
            fields_discovered: 2,
            histogram_entries: 4,
            approximate_fields: 0,
        };
        let summary = format_summary(&stats, &ProfileConfig::default());
        assert!(summary.contains("Records analyzed: 3"));
        assert!(summary.contains("Fields discovered: 2"));
        assert!(!summary.contains("Histogram capacity"));
    }
}
