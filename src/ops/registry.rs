//! Static registry of the available manipulations.
//!
//! Each entry declares, up front, how an operation consumes and
//! produces tracks: its arity, its input and output field schemas, and
//! whether it needs a chromosome length from the metadata layer.
//! Callers that dispatch by name (pipeline drivers, bindings) resolve
//! against this table once at setup; there is no runtime discovery.

use crate::feature::{FEATURE_FIELDS, INTERVAL_FIELDS, SIGNAL_FIELDS};

/// How many tracks an operation takes, resolved once at call setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// One feature stream.
    Single,
    /// Exactly two feature streams.
    Pair,
    /// A homogeneous collection of streams.
    Many,
}

/// Descriptor of one manipulation.
#[derive(Debug, Clone, Copy)]
pub struct Manipulation {
    pub name: &'static str,
    pub kind: InputKind,
    pub input_fields: &'static [&'static str],
    pub output_fields: &'static [&'static str],
    /// Whether the operation consults the chromosome length.
    pub needs_chrom_length: bool,
}

/// All manipulations this crate ships.
pub const MANIPULATIONS: &[Manipulation] = &[
    Manipulation {
        name: "overlap",
        kind: InputKind::Pair,
        input_fields: FEATURE_FIELDS,
        output_fields: FEATURE_FIELDS,
        needs_chrom_length: false,
    },
    Manipulation {
        name: "filter",
        kind: InputKind::Pair,
        input_fields: FEATURE_FIELDS,
        output_fields: FEATURE_FIELDS,
        needs_chrom_length: false,
    },
    Manipulation {
        name: "complement",
        kind: InputKind::Single,
        input_fields: INTERVAL_FIELDS,
        output_fields: INTERVAL_FIELDS,
        needs_chrom_length: true,
    },
    Manipulation {
        name: "concatenate",
        kind: InputKind::Many,
        input_fields: FEATURE_FIELDS,
        output_fields: FEATURE_FIELDS,
        needs_chrom_length: false,
    },
    Manipulation {
        name: "fusion",
        kind: InputKind::Single,
        input_fields: FEATURE_FIELDS,
        output_fields: FEATURE_FIELDS,
        needs_chrom_length: false,
    },
    Manipulation {
        name: "difference",
        kind: InputKind::Pair,
        input_fields: INTERVAL_FIELDS,
        output_fields: INTERVAL_FIELDS,
        needs_chrom_length: true,
    },
    Manipulation {
        name: "merge_scores",
        kind: InputKind::Many,
        input_fields: SIGNAL_FIELDS,
        output_fields: SIGNAL_FIELDS,
        needs_chrom_length: false,
    },
    Manipulation {
        name: "mean_score_by_feature",
        kind: InputKind::Pair,
        input_fields: SIGNAL_FIELDS,
        output_fields: FEATURE_FIELDS,
        needs_chrom_length: false,
    },
    Manipulation {
        name: "window_smoothing",
        kind: InputKind::Single,
        input_fields: SIGNAL_FIELDS,
        output_fields: SIGNAL_FIELDS,
        needs_chrom_length: true,
    },
    Manipulation {
        name: "neighborhood",
        kind: InputKind::Single,
        input_fields: FEATURE_FIELDS,
        output_fields: FEATURE_FIELDS,
        needs_chrom_length: true,
    },
    Manipulation {
        name: "custom_boolean",
        kind: InputKind::Many,
        input_fields: INTERVAL_FIELDS,
        output_fields: INTERVAL_FIELDS,
        needs_chrom_length: false,
    },
    Manipulation {
        name: "threshold",
        kind: InputKind::Single,
        input_fields: FEATURE_FIELDS,
        output_fields: FEATURE_FIELDS,
        needs_chrom_length: false,
    },
];

/// Look up a manipulation descriptor by name.
pub fn find(name: &str) -> Option<&'static Manipulation> {
    MANIPULATIONS.iter().find(|m| m.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_operation() {
        let m = find("overlap").unwrap();
        assert_eq!(m.kind, InputKind::Pair);
        assert!(!m.needs_chrom_length);
    }

    #[test]
    fn test_lookup_unknown_operation() {
        assert!(find("transmogrify").is_none());
    }

    #[test]
    fn test_boundary_sensitive_operations_declare_length() {
        for name in ["complement", "difference", "neighborhood", "window_smoothing"] {
            assert!(find(name).unwrap().needs_chrom_length, "{}", name);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = MANIPULATIONS.iter().map(|m| m.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MANIPULATIONS.len());
    }
}
