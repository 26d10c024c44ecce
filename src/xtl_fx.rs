// Post-processing effect discovery
// Scans the shaders directory once at startup and builds a slot-indexed name table

use std::fs;
use std::path::Path;

/// Fixed capacity of the slot table; files claiming a slot at or beyond
/// this bound are ignored rather than growing the table without limit.
pub const MAX_EFFECT_SLOTS: usize = 64;

/// Slot-indexed table of discovered post-processing effects.
///
/// Slot 0 is always the built-in "None" entry. Slots with no discovered
/// file are stored as `None` placeholders so indexing stays dense, but they
/// are excluded from the selection cycle and never shown to the user.
/// The table is built once at startup and read-only afterwards.
pub struct EffectCatalog {
    names: Vec<Option<String>>, // index = slot; None = gap
}

impl EffectCatalog {
    /// Discover effects from a directory (non-recursive).
    ///
    /// A missing or unreadable directory is the same as an empty one:
    /// "None" stays the only entry and the settings screen still works.
    pub fn scan(dir: &Path) -> EffectCatalog {
        let mut file_names = Vec::new();
        if let Ok(entries) = fs::read_dir(dir) {
            for entry in entries.flatten() {
                if let Some(name) = entry.file_name().to_str() {
                    file_names.push(name.to_string());
                }
            }
        }
        EffectCatalog::from_file_names(file_names)
    }

    /// Build the table from plugin file names in enumeration order.
    /// First-writer-wins: a later file naming an already-filled slot is
    /// ignored, so duplicate or conflicting plugin files cannot crash or
    /// reshuffle the table.
    pub fn from_file_names<I, S>(file_names: I) -> EffectCatalog
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names = vec![Some("None".to_string())]; // slot 0 is reserved
        for file_name in file_names {
            let (slot, label) = match parse_effect_file_name(file_name.as_ref()) {
                Some(parsed) => parsed,
                None => continue, // not a plugin file
            };
            if slot == 0 || slot >= MAX_EFFECT_SLOTS {
                continue;
            }
            if names.len() <= slot {
                names.resize(slot + 1, None);
            }
            if names[slot].is_none() {
                names[slot] = Some(label.to_string());
            }
        }
        EffectCatalog { names }
    }

    /// Logical table size: highest occupied slot + 1.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Display name for a slot; `None` for gaps and out-of-range slots.
    pub fn name(&self, slot: usize) -> Option<&str> {
        self.names.get(slot).and_then(|n| n.as_deref())
    }

    pub fn is_selectable(&self, slot: usize) -> bool {
        self.name(slot).is_some()
    }

    /// Number of effects the user can actually pick (gaps excluded).
    pub fn selectable_count(&self) -> usize {
        self.names.iter().filter(|n| n.is_some()).count()
    }

    /// The persisted slot if it still names an effect, otherwise 0 ("None").
    pub fn clamp(&self, slot: usize) -> usize {
        if self.is_selectable(slot) { slot } else { 0 }
    }

    /// Next selectable slot after `from`, wrapping past the end.
    /// Always terminates: slot 0 is selectable by construction.
    pub fn next_selectable(&self, from: usize) -> usize {
        let mut slot = from;
        loop {
            slot = if slot + 1 < self.len() { slot + 1 } else { 0 };
            if self.is_selectable(slot) || slot == from {
                return slot;
            }
        }
    }

    /// Previous selectable slot before `from`, wrapping past zero.
    pub fn prev_selectable(&self, from: usize) -> usize {
        let mut slot = from;
        loop {
            slot = if slot > 0 { slot - 1 } else { self.len() - 1 };
            if self.is_selectable(slot) || slot == from {
                return slot;
            }
        }
    }
}

/// Tokenize a plugin file name of the form `<slot>_<name>_<suffix>`.
/// Returns `None` for anything that does not fit the convention: a missing
/// underscore, a non-numeric slot token, or an empty display name.
fn parse_effect_file_name(file_name: &str) -> Option<(usize, &str)> {
    let (slot_text, rest) = file_name.split_once('_')?;
    let slot = slot_text.parse::<usize>().ok()?;
    let (label, _suffix) = rest.split_once('_')?;
    if label.is_empty() {
        return None;
    }
    Some((slot, label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn slot_zero_is_always_none() {
        let empty = EffectCatalog::from_file_names(["not a plugin"]);
        assert_eq!(empty.name(0), Some("None"));
        assert_eq!(empty.len(), 1);

        // a file claiming slot 0 cannot overwrite the reserved entry
        let claimed = EffectCatalog::from_file_names(["0_Override_frag"]);
        assert_eq!(claimed.name(0), Some("None"));
    }

    #[test]
    fn first_writer_wins_for_a_contested_slot() {
        let catalog = EffectCatalog::from_file_names(["3_Sepia_frag", "3_Invert_frag"]);
        assert_eq!(catalog.name(3), Some("Sepia"));
    }

    #[test]
    fn table_size_is_highest_slot_plus_one() {
        let catalog = EffectCatalog::from_file_names(["5_Bloom_frag", "2_Blur_frag"]);
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.name(2), Some("Blur"));
        assert_eq!(catalog.name(5), Some("Bloom"));
    }

    #[test]
    fn gap_slots_are_placeholders_and_not_selectable() {
        let catalog = EffectCatalog::from_file_names(["4_Bloom_frag"]);
        assert_eq!(catalog.name(2), None);
        assert!(!catalog.is_selectable(2));
        assert_eq!(catalog.selectable_count(), 2); // None + Bloom
    }

    #[test]
    fn selection_cycle_skips_gaps_in_both_directions() {
        let catalog = EffectCatalog::from_file_names(["4_Bloom_frag", "1_Sepia_frag"]);
        assert_eq!(catalog.next_selectable(0), 1);
        assert_eq!(catalog.next_selectable(1), 4);
        assert_eq!(catalog.next_selectable(4), 0); // wraps
        assert_eq!(catalog.prev_selectable(0), 4); // wraps backwards
        assert_eq!(catalog.prev_selectable(4), 1);
    }

    #[test]
    fn malformed_file_names_are_skipped() {
        let catalog = EffectCatalog::from_file_names([
            "README.md",          // no underscore
            "x_Sepia_frag",       // non-numeric slot
            "2Sepia_frag",        // digit run not terminated by underscore
            "3_Bloom",            // missing second underscore
            "4__frag",            // empty display name
            "5_CRT_scanline_cg",  // valid; extra underscores belong to the suffix
        ]);
        assert_eq!(catalog.selectable_count(), 2); // None + CRT
        assert_eq!(catalog.name(5), Some("CRT"));
    }

    #[test]
    fn slots_beyond_the_capacity_bound_are_ignored() {
        let catalog = EffectCatalog::from_file_names(["64_TooFar_frag", "63_Last_frag"]);
        assert_eq!(catalog.len(), 64);
        assert_eq!(catalog.name(63), Some("Last"));
    }

    #[test]
    fn stale_slot_clamps_to_none() {
        let catalog = EffectCatalog::from_file_names(["1_Sepia_frag"]);
        assert_eq!(catalog.clamp(1), 1);
        assert_eq!(catalog.clamp(7), 0);
    }

    #[test]
    fn missing_directory_scans_as_empty() {
        let dir = tempdir().unwrap();
        let catalog = EffectCatalog::scan(&dir.path().join("no_such_dir"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.name(0), Some("None"));
    }

    #[test]
    fn scan_picks_up_plugin_files_from_disk() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("2_Vignette_frag.glsl"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        let catalog = EffectCatalog::scan(dir.path());
        assert_eq!(catalog.name(2), Some("Vignette"));
        assert_eq!(catalog.selectable_count(), 2);
    }
}
