//! Uniqueness resolution for suggested filenames.
//!
//! Policy:
//! - An unclaimed candidate is returned untouched; a suffix is never added
//!   unless a collision actually occurred.
//! - On collision the suggester is re-invoked up to MAX_REGEN_ATTEMPTS times;
//!   the first unclaimed regenerated name wins.
//! - If regeneration keeps colliding (or is unavailable), fall back to
//!   deterministic suffixing of the ORIGINAL candidate: "report" -> "report-1",
//!   "report-2", ... smallest unclaimed number. A candidate that already ends
//!   in "-N" is suffixed as supplied ("report-1" -> "report-1-1"); we do not
//!   strip existing numbers.
//!
//! Notes:
//! - No I/O happens here. The claimed set is seeded and grown by the caller;
//!   the caller must insert the returned name before resolving the next file.

use std::collections::HashSet;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

/// How many times the suggester is re-invoked before suffixing kicks in.
pub const MAX_REGEN_ATTEMPTS: usize = 3;

/// Names considered taken at a point in time within one batch: existing
/// directory entries plus names already finalized for earlier files.
///
/// Membership follows host filesystem semantics: case-insensitive folding on
/// Windows and macOS, case-sensitive elsewhere. Construct with `new` to
/// override (tests, network mounts).
#[derive(Debug, Clone, Default)]
pub struct ClaimedNames {
    names: HashSet<String>,
    fold_case: bool,
}

impl ClaimedNames {
    /// Empty set with explicit case handling.
    pub fn new(fold_case: bool) -> Self {
        Self {
            names: HashSet::new(),
            fold_case,
        }
    }

    /// Empty set using the host's usual filename case rules.
    pub fn host_default() -> Self {
        Self::new(cfg!(any(windows, target_os = "macos")))
    }

    fn key(&self, name: &str) -> String {
        if self.fold_case {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&self.key(name))
    }

    /// Claim a name. Returns false if it was already claimed.
    pub fn insert(&mut self, name: &str) -> bool {
        let key = self.key(name);
        self.names.insert(key)
    }

    /// Seed the set with the entries of `dir` (names including extension).
    /// Returns how many entries were added.
    pub fn seed_from_dir(&mut self, dir: &Path) -> io::Result<usize> {
        let mut added = 0usize;
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.insert(&name) {
                added += 1;
            }
        }
        debug!(dir = %dir.display(), added, "seeded claimed names from directory");
        Ok(added)
    }
}

/// Split a candidate into (stem, extension) the way `Path` does, so suffixes
/// land before the extension. Dotfiles (".env") count as extensionless.
fn split_candidate(name: &str) -> (&str, Option<&str>) {
    let p = Path::new(name);
    let stem = p.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    let ext = p.extension().and_then(|e| e.to_str());
    (stem, ext)
}

fn with_suffix(stem: &str, ext: Option<&str>, n: u32) -> String {
    match ext {
        Some(e) => format!("{stem}-{n}.{e}"),
        None => format!("{stem}-{n}"),
    }
}

/// Turn `original` into a name guaranteed absent from `claimed`.
///
/// `regen` produces a fresh candidate on each call; `None` means the
/// suggester cannot retry (unavailable), which ends regeneration early and
/// falls through to suffixing. The function is total: it always returns a
/// name, in at most MAX_REGEN_ATTEMPTS regenerations plus one suffix probe
/// per claimed name.
pub fn resolve_unique<F>(original: &str, claimed: &ClaimedNames, mut regen: F) -> String
where
    F: FnMut() -> Option<String>,
{
    if !claimed.contains(original) {
        return original.to_string();
    }

    for attempt in 1..=MAX_REGEN_ATTEMPTS {
        match regen() {
            Some(candidate) if !candidate.is_empty() && !claimed.contains(&candidate) => {
                trace!(attempt, from = original, to = %candidate, "regeneration produced a free name");
                return candidate;
            }
            Some(_) => continue,
            None => break,
        }
    }

    // Suffix from the original candidate, not a regenerated one, so repeated
    // runs over the same inputs stay deterministic.
    let (stem, ext) = split_candidate(original);
    let mut n: u32 = 1;
    loop {
        let candidate = with_suffix(stem, ext, n);
        if !claimed.contains(&candidate) {
            trace!(from = original, to = %candidate, "resolved collision with numeric suffix");
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claimed(names: &[&str]) -> ClaimedNames {
        let mut set = ClaimedNames::new(false);
        for n in names {
            set.insert(n);
        }
        set
    }

    fn no_regen() -> Option<String> {
        None
    }

    #[test]
    fn unclaimed_candidate_passes_through() {
        let set = claimed(&[]);
        assert_eq!(resolve_unique("report", &set, no_regen), "report");
    }

    #[test]
    fn stubborn_suggester_falls_back_to_first_suffix() {
        let set = claimed(&["report"]);
        let got = resolve_unique("report", &set, || Some("report".into()));
        assert_eq!(got, "report-1");
    }

    #[test]
    fn suffix_skips_already_claimed_numbers() {
        let set = claimed(&["report", "report-1"]);
        let got = resolve_unique("report", &set, || Some("report".into()));
        assert_eq!(got, "report-2");
    }

    #[test]
    fn regenerated_free_name_wins_over_suffix() {
        let set = claimed(&["notes"]);
        let got = resolve_unique("notes", &set, || Some("meeting-notes".into()));
        assert_eq!(got, "meeting-notes");
    }

    #[test]
    fn regeneration_is_bounded() {
        let set = claimed(&["x"]);
        let mut calls = 0usize;
        let got = resolve_unique("x", &set, || {
            calls += 1;
            Some("x".into())
        });
        assert_eq!(calls, MAX_REGEN_ATTEMPTS);
        assert_eq!(got, "x-1");
    }

    #[test]
    fn unavailable_suggester_goes_straight_to_suffix() {
        let set = claimed(&["x"]);
        let mut calls = 0usize;
        let got = resolve_unique("x", &set, || {
            calls += 1;
            None
        });
        assert_eq!(calls, 1);
        assert_eq!(got, "x-1");
    }

    #[test]
    fn suffix_lands_before_extension() {
        let set = claimed(&["report.txt"]);
        let got = resolve_unique("report.txt", &set, no_regen);
        assert_eq!(got, "report-1.txt");
    }

    #[test]
    fn dotfile_is_suffixed_whole() {
        let set = claimed(&[".env"]);
        let got = resolve_unique(".env", &set, no_regen);
        assert_eq!(got, ".env-1");
    }

    #[test]
    fn numeric_looking_candidate_is_not_stripped() {
        let set = claimed(&["report-1"]);
        let got = resolve_unique("report-1", &set, no_regen);
        assert_eq!(got, "report-1-1");
    }

    #[test]
    fn resolution_is_idempotent_against_unchanged_set() {
        let set = claimed(&["draft", "draft-1"]);
        let a = resolve_unique("draft", &set, no_regen);
        let b = resolve_unique("draft", &set, no_regen);
        assert_eq!(a, b);
        assert_eq!(a, "draft-2");
    }

    #[test]
    fn result_is_never_in_claimed_set() {
        let set = claimed(&["a", "a-1", "a-2", "a-3", "a-5"]);
        let got = resolve_unique("a", &set, || Some("a-1".into()));
        assert!(!set.contains(&got));
        assert_eq!(got, "a-4");
    }

    #[test]
    fn case_folding_matches_claims_on_insensitive_hosts() {
        let mut set = ClaimedNames::new(true);
        set.insert("Report");
        assert!(set.contains("report"));
        let got = resolve_unique("REPORT", &set, no_regen);
        assert_eq!(got, "REPORT-1");
    }

    #[test]
    fn batch_sequence_matches_running_claims() {
        // Two files both suggesting "notes": the first keeps it, the second
        // sees it claimed and suffixes.
        let mut set = claimed(&[]);
        let first = resolve_unique("notes", &set, || Some("notes".into()));
        assert_eq!(first, "notes");
        set.insert(&first);
        let second = resolve_unique("notes", &set, || Some("notes".into()));
        assert_eq!(second, "notes-1");
    }
}
