//! Helpers for comma-separated list leaves.

/// Split a comma-separated list into trimmed, non-empty items.
///
/// `"anode, cathode,"` yields `["anode", "cathode"]`.
pub fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// Join items into the comma-separated form read by [`split_list`].
pub fn join_list<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
