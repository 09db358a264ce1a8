//! Primary-object resolution — the fixed-priority rule that picks the one
//! "best" entry from a detail collection for display purposes.
//!
//! The rule, first success wins:
//!   1. drop entries located at "Fax";
//!   2. exactly one entry at "Work" → that entry;
//!   3. exactly one entry at "Office" → that entry;
//!   4. the first remaining entry, in the collection's natural order;
//!   5. nothing remains → `None`.
//!
//! Steps 2 and 3 use an exact-one lookup: zero matches AND two-or-more
//! matches both fall through to the next rule. Pure and side-effect-free.

use crate::location::Location;

const FAX: &str = "Fax";
const PREFERRED: [&str; 2] = ["Work", "Office"];

/// Return the single item matching `pred`, or `None` when zero or more than
/// one item matches. Not a first-match lookup.
pub fn find_exactly_one<T>(
  items: impl IntoIterator<Item = T>,
  pred: impl Fn(&T) -> bool,
) -> Option<T> {
  let mut matches = items.into_iter().filter(|item| pred(item));
  match (matches.next(), matches.next()) {
    (Some(only), None) => Some(only),
    _ => None,
  }
}

/// Resolve the primary entry of a located detail collection. `entries` must
/// be in the collection's natural (insertion) order; the final fallback
/// returns its first element.
pub fn resolve_primary<T>(entries: &[(T, Location)]) -> Option<&(T, Location)> {
  let eligible: Vec<&(T, Location)> =
    entries.iter().filter(|entry| entry.1.name != FAX).collect();

  for name in PREFERRED {
    let hit =
      find_exactly_one(eligible.iter().copied(), |entry| entry.1.name == name);
    if hit.is_some() {
      return hit;
    }
  }

  eligible.first().copied()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::location::NewLocation;

  fn at(name: &str) -> (u32, Location) {
    static NEXT: std::sync::atomic::AtomicU32 =
      std::sync::atomic::AtomicU32::new(0);
    let n = NEXT.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    (n, NewLocation::new(name).build().unwrap())
  }

  #[test]
  fn find_exactly_one_zero_matches_is_none() {
    assert_eq!(find_exactly_one([1, 2, 3], |n| *n > 5), None);
  }

  #[test]
  fn find_exactly_one_single_match() {
    assert_eq!(find_exactly_one([1, 2, 3], |n| *n == 2), Some(2));
  }

  #[test]
  fn find_exactly_one_multiple_matches_is_none() {
    assert_eq!(find_exactly_one([1, 2, 3], |n| *n > 1), None);
  }

  #[test]
  fn single_work_entry_wins() {
    let entries = vec![at("Home"), at("Work"), at("Fax")];
    let primary = resolve_primary(&entries).unwrap();
    assert_eq!(primary.1.name, "Work");
  }

  #[test]
  fn office_wins_when_no_work() {
    let entries = vec![at("Home"), at("Office")];
    let primary = resolve_primary(&entries).unwrap();
    assert_eq!(primary.1.name, "Office");
  }

  #[test]
  fn fax_excluded_falls_to_first_remaining() {
    // Locations {Fax, Home}: Fax is excluded, no Work/Office exists, so the
    // first of the restricted set wins.
    let entries = vec![at("Fax"), at("Home")];
    let primary = resolve_primary(&entries).unwrap();
    assert_eq!(primary.1.name, "Home");
  }

  #[test]
  fn duplicate_work_entries_fall_through() {
    // Two Work entries: the exact-one lookup fails on both Work and Office,
    // so the first entry of the restricted set is returned — which here is
    // the first Work entry by position, not by label preference.
    let entries = vec![at("Home"), at("Work"), at("Work")];
    let primary = resolve_primary(&entries).unwrap();
    assert_eq!(primary.1.name, "Home");
    assert_eq!(primary.0, entries[0].0);
  }

  #[test]
  fn only_fax_resolves_to_none() {
    let entries = vec![at("Fax")];
    assert!(resolve_primary(&entries).is_none());
  }

  #[test]
  fn empty_collection_resolves_to_none() {
    let entries: Vec<(u32, Location)> = Vec::new();
    assert!(resolve_primary(&entries).is_none());
  }

  #[test]
  fn match_is_case_sensitive() {
    // "work" is not "Work"; the lookup is exact.
    let entries = vec![at("home"), at("work")];
    let primary = resolve_primary(&entries).unwrap();
    assert_eq!(primary.0, entries[0].0);
  }
}
