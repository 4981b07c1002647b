//! Prefix matching and completion results.

use serde::Serialize;

/// One candidate continuation of a partially typed segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Replacement text, starting at the result offset.
    pub value: String,
    /// Human-readable description shown next to the value.
    pub description: String,
}

/// Completions for an address, and where in the address they apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    /// Byte offset into the address at which every completion value starts.
    pub offset: usize,
    pub completions: Vec<Completion>,
}

/// Candidates whose key starts with `prefix`, in candidate order.
///
/// Matching is case-sensitive.
pub fn get_prefix_matches_with_descriptions<T>(
    prefix: &str,
    candidates: impl IntoIterator<Item = T>,
    key_fn: impl Fn(&T) -> String,
    desc_fn: impl Fn(&T) -> String,
) -> Vec<Completion> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let value = key_fn(&candidate);
            value.starts_with(prefix).then(|| Completion {
                value,
                description: desc_fn(&candidate),
            })
        })
        .collect()
}

/// Shifts `result` so its offset is relative to a string `offset` bytes longer
/// on the left.
pub fn apply_completion_offset(offset: usize, result: CompletionResult) -> CompletionResult {
    CompletionResult {
        offset: offset + result.offset,
        completions: result.completions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names() -> Vec<(&'static str, &'static str)> {
        vec![("10", "ten"), ("1", "one"), ("2", "two"), ("Abc", "letters")]
    }

    #[test]
    fn test_matches_keep_candidate_order() {
        let matches = get_prefix_matches_with_descriptions(
            "1",
            names(),
            |(key, _)| key.to_string(),
            |(_, desc)| desc.to_string(),
        );
        let values: Vec<&str> = matches.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["10", "1"]);
        assert_eq!(matches[0].description, "ten");
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        let matches = get_prefix_matches_with_descriptions(
            "",
            names(),
            |(key, _)| key.to_string(),
            |(_, desc)| desc.to_string(),
        );
        assert_eq!(matches.len(), 4);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let matches = get_prefix_matches_with_descriptions(
            "a",
            names(),
            |(key, _)| key.to_string(),
            |(_, desc)| desc.to_string(),
        );
        assert!(matches.is_empty());
    }

    #[test]
    fn test_apply_completion_offset() {
        let result = CompletionResult {
            offset: 4,
            completions: vec![Completion {
                value: "3/".to_string(),
                description: "stack".to_string(),
            }],
        };
        let shifted = apply_completion_offset(27, result.clone());
        assert_eq!(shifted.offset, 31);
        assert_eq!(shifted.completions, result.completions);
    }

    proptest! {
        #[test]
        fn prop_matches_are_exactly_prefixed_candidates(
            prefix in "[a-c]{0,2}",
            keys in proptest::collection::vec("[a-c]{0,4}", 0..12),
        ) {
            let matches = get_prefix_matches_with_descriptions(
                &prefix,
                keys.iter(),
                |k| k.to_string(),
                |_| String::new(),
            );
            let expected: Vec<&String> = keys.iter().filter(|k| k.starts_with(&prefix)).collect();

            prop_assert_eq!(matches.len(), expected.len());
            for (m, k) in matches.iter().zip(expected) {
                prop_assert_eq!(&m.value, k);
            }
        }
    }
}
