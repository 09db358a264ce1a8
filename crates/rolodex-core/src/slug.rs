//! Slug derivation for contacts, locations, and groups.

/// Lowercase the input and join alphanumeric runs with single hyphens.
/// Everything else (punctuation, whitespace) collapses into separators.
pub fn slugify(name: &str) -> String {
  let mut slug = String::with_capacity(name.len());
  let mut pending_sep = false;
  for c in name.chars() {
    if c.is_alphanumeric() {
      if pending_sep && !slug.is_empty() {
        slug.push('-');
      }
      pending_sep = false;
      slug.extend(c.to_lowercase());
    } else {
      pending_sep = true;
    }
  }
  slug
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lowercases_and_hyphenates() {
    assert_eq!(slugify("Head Office"), "head-office");
  }

  #[test]
  fn collapses_punctuation_runs() {
    assert_eq!(slugify("Acme, Inc.  (EU)"), "acme-inc-eu");
  }

  #[test]
  fn trims_leading_and_trailing_separators() {
    assert_eq!(slugify("  --Work--  "), "work");
  }

  #[test]
  fn empty_input_gives_empty_slug() {
    assert_eq!(slugify(""), "");
    assert_eq!(slugify("!!!"), "");
  }
}
