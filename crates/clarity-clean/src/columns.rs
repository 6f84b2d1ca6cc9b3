//! Column-name standardisation.

use std::collections::BTreeSet;

/// Name used when standardisation strips every character.
const EMPTY_NAME: &str = "column";

/// Normalises one column name: lower-case, space and hyphen to `_`, then
/// drop anything that is not alphanumeric or `_`.
pub fn standardize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Standardises every name in order, keeping the result unique.
///
/// An empty result becomes `column`; a name already produced earlier in the
/// pass takes the first free suffix `_2`, `_3`, ...
pub fn standardize_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut taken: BTreeSet<String> = BTreeSet::new();
    names
        .iter()
        .map(|name| {
            let mut base = standardize_name(name.as_ref());
            if base.is_empty() {
                base = EMPTY_NAME.to_string();
            }
            let mut candidate = base.clone();
            let mut suffix = 2;
            while taken.contains(&candidate) {
                candidate = format!("{base}_{suffix}");
                suffix += 1;
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}
