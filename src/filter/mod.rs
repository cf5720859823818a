//! Record filtering
//!
//! Decides, per record set, whether it is exported to the locals files and
//! whether an import block is generated for it. The decision is a pure
//! function of the record and the configured [`FilterRules`].

use crate::error::{ExportError, ExportResult};
use crate::route53::Record;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;

/// Record types dropped entirely unless configured otherwise. Route53 creates
/// and owns the apex NS and SOA sets.
pub const DEFAULT_SKIP_RECORD_TYPES: &[&str] = &["NS", "SOA"];

/// Record types subject to hostname filtering unless configured otherwise
pub const DEFAULT_SKIPPABLE_IMPORT_TYPES: &[&str] = &["A", "CNAME"];

/// Outcome of filtering one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDecision {
    /// Record appears in the generated locals
    pub exported: bool,
    /// Record gets an import block; never true unless `exported` is
    pub import_eligible: bool,
}

impl FilterDecision {
    const EXCLUDED: FilterDecision = FilterDecision {
        exported: false,
        import_eligible: false,
    };

    const INCLUDED: FilterDecision = FilterDecision {
        exported: true,
        import_eligible: true,
    };
}

/// Compiled filtering configuration
#[derive(Debug, Clone)]
pub struct FilterRules {
    skip_record_types: BTreeSet<String>,
    skippable_import_types: BTreeSet<String>,
    skip_hostnames: Vec<Regex>,
    only_hostnames: Vec<Regex>,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            skip_record_types: upper_set(DEFAULT_SKIP_RECORD_TYPES),
            skippable_import_types: upper_set(DEFAULT_SKIPPABLE_IMPORT_TYPES),
            skip_hostnames: Vec::new(),
            only_hostnames: Vec::new(),
        }
    }
}

impl FilterRules {
    /// Compile filter rules. Empty type lists fall back to the defaults;
    /// an invalid pattern is a configuration error.
    pub fn new<S: AsRef<str>>(
        skip_record_types: &[S],
        skippable_import_types: &[S],
        skip_hostnames: &[S],
        only_hostnames: &[S],
    ) -> ExportResult<Self> {
        let mut rules = Self::default();

        if !skip_record_types.is_empty() {
            rules.skip_record_types = upper_set(skip_record_types);
        }
        if !skippable_import_types.is_empty() {
            rules.skippable_import_types = upper_set(skippable_import_types);
        }

        rules.skip_hostnames = compile_patterns(skip_hostnames)?;
        rules.only_hostnames = compile_patterns(only_hostnames)?;

        Ok(rules)
    }

    pub fn skip_record_types(&self) -> &BTreeSet<String> {
        &self.skip_record_types
    }

    pub fn skippable_import_types(&self) -> &BTreeSet<String> {
        &self.skippable_import_types
    }

    /// Decide what happens to a record
    pub fn decide(&self, record: &Record) -> FilterDecision {
        let record_type = record.record_type.to_uppercase();

        if self.skip_record_types.contains(&record_type) {
            return FilterDecision::EXCLUDED;
        }

        if !self.skippable_import_types.contains(&record_type) {
            return FilterDecision::INCLUDED;
        }

        let exported = self.hostname_allowed(&record.hostname());

        // Import generation applies the same hostname rule, so a filtered
        // record is neither exported nor imported
        FilterDecision {
            exported,
            import_eligible: exported,
        }
    }

    /// Inclusion first, then exclusion; exclusion wins when both match
    fn hostname_allowed(&self, hostname: &str) -> bool {
        let included = self.only_hostnames.is_empty()
            || self
                .only_hostnames
                .iter()
                .any(|pattern| pattern.is_match(hostname));

        included
            && !self
                .skip_hostnames
                .iter()
                .any(|pattern| pattern.is_match(hostname))
    }
}

fn upper_set<S: AsRef<str>>(values: &[S]) -> BTreeSet<String> {
    values
        .iter()
        .map(|value| value.as_ref().trim().to_uppercase())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Compile hostname patterns. Each entry may hold several comma-separated
/// expressions; blanks are skipped. Matching is case-insensitive and
/// unanchored.
pub fn compile_patterns<S: AsRef<str>>(raw: &[S]) -> ExportResult<Vec<Regex>> {
    let mut patterns = Vec::new();

    for entry in raw {
        for token in entry.as_ref().split(',') {
            let expression = token.trim();
            if expression.is_empty() {
                continue;
            }

            let pattern = RegexBuilder::new(expression)
                .case_insensitive(true)
                .build()
                .map_err(|err| {
                    ExportError::Configuration(format!(
                        "invalid hostname pattern '{}': {}",
                        expression, err
                    ))
                })?;
            patterns.push(pattern);
        }
    }

    Ok(patterns)
}
