//! Ordered string lists stored as indexed keys.
//!
//! The configuration store has no native sequence type, so a list is kept in
//! its own group as `"0" = first`, `"1" = second`, ... The encoding rules are:
//!
//! - **Contiguous**: decoding starts at key `"0"` and stops at the first key
//!   that is absent *or* holds an empty string. Anything after a gap is never
//!   read.
//! - **Shrink-safe**: encoding writes the items, then blanks every existing
//!   key past the end until it reaches an absent key, so a shorter list never
//!   resurrects stale trailing entries.
//!
//! - **Non-empty**: an empty item would end the list early on the next read,
//!   so [`write_list`] drops empty items and keeps the rest contiguous.

use super::store::ConfigStore;

/// Read the list stored in `section.group`.
pub fn read_list(store: &dyn ConfigStore, section: &str, group: &str) -> Vec<String> {
    let mut items = Vec::new();
    for index in 0usize.. {
        match store.get_string(section, group, &index.to_string()) {
            Some(value) if !value.is_empty() => items.push(value),
            _ => break,
        }
    }
    items
}

/// Write `items` to `section.group`, clearing any stale trailing entries.
pub fn write_list<S: AsRef<str>>(store: &dyn ConfigStore, section: &str, group: &str, items: &[S]) {
    let mut written = 0usize;
    for item in items.iter().map(AsRef::as_ref).filter(|item| !item.is_empty()) {
        store.set_value(section, group, &written.to_string(), item);
        written += 1;
    }

    let skipped = items.len() - written;
    if skipped > 0 {
        tracing::debug!(group, skipped, "Skipped empty list entries");
    }

    let mut cleared = 0usize;
    for index in written.. {
        let key = index.to_string();
        if store.get_string(section, group, &key).is_none() {
            break;
        }
        store.set_value(section, group, &key, "");
        cleared += 1;
    }

    if cleared > 0 {
        tracing::debug!(group, cleared, "Cleared stale list entries");
    }
}
