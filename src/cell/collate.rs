use std::cmp::Ordering;

use icu::collator::options::{CollatorOptions, Strength};
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::Locale;

/// Locale-aware, case-insensitive string ordering with digit runs compared
/// by numeric value ("Skill 9" sorts before "Skill 10").
pub struct SortCollator {
    collator: Option<CollatorBorrowed<'static>>,
}

impl std::fmt::Debug for SortCollator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortCollator")
            .field("locale_aware", &self.collator.is_some())
            .finish()
    }
}

impl Default for SortCollator {
    fn default() -> Self {
        SortCollator::new("und")
    }
}

impl SortCollator {
    /// Build a collator for a BCP 47 locale. Unknown locales fall back to
    /// the root collation.
    pub fn new(locale: &str) -> Self {
        // `-u-kn` turns on numeric ordering of digit runs
        let tagged = format!("{locale}-u-kn");
        let locale: Locale = match tagged.parse().or_else(|_| "und-u-kn".parse()) {
            Ok(l) => l,
            Err(e) => {
                tracing::debug!(error = %e, "no usable sort locale, using plain ordering");
                return SortCollator { collator: None };
            }
        };
        let mut options = CollatorOptions::default();
        options.strength = Some(Strength::Secondary);
        let collator = match Collator::try_new(locale.into(), options) {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::debug!(error = %e, "collation data unavailable, using plain ordering");
                None
            }
        };
        SortCollator { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(c) => c.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}
