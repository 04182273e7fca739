//! Dependency discovery in rendered items.

use serde_json::Value;
use std::collections::BTreeSet;

use crate::template::RenderedItem;

/// Union of `spec.dependencies` and `spec.optionalDependencies` across all
/// ClowdApp items (kind matched case-insensitively).
///
/// Required and optional dependencies are not distinguished. The set is
/// ordered, so dependencies are visited in name order.
pub fn collect_dependencies(items: &[RenderedItem]) -> BTreeSet<String> {
    let mut dependencies = BTreeSet::new();

    for item in items.iter().filter(|i| i.is_kind_ignore_case("clowdapp")) {
        let Some(spec) = item.spec() else {
            continue;
        };

        for field in ["dependencies", "optionalDependencies"] {
            if let Some(Value::Array(names)) = spec.get(field) {
                dependencies.extend(names.iter().filter_map(Value::as_str).map(String::from));
            }
        }
    }

    dependencies
}
