// Option persistence and session state
// Handles the options.cfg key=value codec, defaults, and the final session outcome

use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::xtl_fx::EffectCatalog;
use crate::xtl_text::{ANTI_ALIASING_NAMES, LANGUAGE_NAMES, RESOLUTION_NAMES};

/// The persisted preference bundle.
/// Index fields select into the fixed name tables in `xtl_text`;
/// `postfx` selects into the runtime-discovered effect catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    pub resolution: usize,   // index into RESOLUTION_NAMES
    pub bilinear: bool,      // force bilinear texture filtering
    pub language: usize,     // index into LANGUAGE_NAMES
    pub antialiasing: usize, // index into ANTI_ALIASING_NAMES
    pub postfx: usize,       // effect slot, validated against the catalog
}

impl Default for OptionSet {
    /// First-run defaults, applied when no options file exists.
    fn default() -> Self {
        OptionSet {
            resolution: 0,
            bilinear: false,
            language: 0,
            antialiasing: 2, // MSAA 4x
            postfx: 0,
        }
    }
}

impl OptionSet {
    /// All-zero set used as the base for decoding an existing file.
    /// Keys absent from the file keep these values, not the first-run defaults.
    fn zeroed() -> Self {
        OptionSet {
            resolution: 0,
            bilinear: false,
            language: 0,
            antialiasing: 0,
            postfx: 0,
        }
    }
}

/// Clamp a decoded integer into `[0, limit)`, substituting the field default
/// for negative or out-of-range values so an invalid index never reaches the
/// settings screen.
fn indexed(value: i64, limit: usize, fallback: usize) -> usize {
    if value >= 0 && (value as usize) < limit {
        value as usize
    } else {
        fallback
    }
}

/// Load the option set from an options file.
///
/// A file that cannot be opened yields the first-run defaults. A readable
/// file is decoded line by line over a zeroed set: each line must be
/// `<key>=<integer>`; unrecognized keys are skipped for forward
/// compatibility, and the first line that does not fit the shape stops the
/// scan while keeping everything parsed so far. This tolerates truncated or
/// partially written files.
pub fn load_options(path: &Path) -> OptionSet {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return OptionSet::default(),
    };

    let mut opts = OptionSet::zeroed();
    for line in text.lines() {
        let (key, value) = match line.split_once('=') {
            Some(kv) => kv,
            None => break,
        };
        let value = match value.trim().parse::<i64>() {
            Ok(v) => v,
            Err(_) => break,
        };
        match key {
            "resolution" => opts.resolution = indexed(value, RESOLUTION_NAMES.len(), 0),
            "bilinear" => opts.bilinear = value != 0,
            "language" => opts.language = indexed(value, LANGUAGE_NAMES.len(), 0),
            "antialiasing" => opts.antialiasing = indexed(value, ANTI_ALIASING_NAMES.len(), 2),
            // Range-checked against the effect catalog at model construction
            "postfx" => opts.postfx = if value >= 0 { value as usize } else { 0 },
            _ => {}
        }
    }
    opts
}

/// Save the option set as five `key=value` lines in a fixed order.
///
/// Best-effort: the parent directory is created if missing, and a failed
/// write only reports through the returned bool. Losing the file merely
/// resets preferences to defaults on the next run.
pub fn save_options(path: &Path, opts: &OptionSet) -> bool {
    let text = format!(
        "resolution={}\nbilinear={}\nlanguage={}\nantialiasing={}\npostfx={}\n",
        opts.resolution,
        opts.bilinear as u8,
        opts.language,
        opts.antialiasing,
        opts.postfx,
    );
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    fs::write(path, text).is_ok()
}

/// Get the default options file path
/// Uses platform-specific config directory (e.g., ~/.config/xtlnchr/options.cfg on Linux)
/// Falls back to current directory if ProjectDirs is unavailable
pub fn config_path() -> Option<PathBuf> {
    if let Ok(exe) = env::current_exe() {
        if let Some(name) = exe.file_stem().and_then(|s| s.to_str()) {
            if let Some(proj) = ProjectDirs::from("com", "xhbl", name) {
                let mut path = proj.config_dir().to_path_buf();
                path.push("options.cfg");
                return Some(path);
            } else if let Ok(mut path) = env::current_dir() {
                path.push("options.cfg");
                return Some(path);
            }
        }
    }
    None
}

/// The four ways a session can end. Exactly one is produced per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitAction {
    SaveAndExit,
    SaveAndLaunch,
    DiscardAndExit,
    DiscardAndLaunch,
}

impl ExitAction {
    /// Button order on the settings screen, matching `ACTION_LABELS`.
    pub const ALL: [ExitAction; 4] = [
        ExitAction::SaveAndExit,
        ExitAction::SaveAndLaunch,
        ExitAction::DiscardAndExit,
        ExitAction::DiscardAndLaunch,
    ];

    /// Whether the option set should be written back to disk.
    pub fn persist(self) -> bool {
        matches!(self, ExitAction::SaveAndExit | ExitAction::SaveAndLaunch)
    }

    /// Whether the game should be started after the editor exits.
    pub fn launch(self) -> bool {
        matches!(self, ExitAction::SaveAndLaunch | ExitAction::DiscardAndLaunch)
    }
}

/// Wraparound stepping through a fixed-size enumerated set.
fn cycle(current: usize, limit: usize, step: isize) -> usize {
    (current as isize + step).rem_euclid(limit as isize) as usize
}

/// Owns the live option values while the settings screen runs.
/// The presentation layer only mutates fields through the cycling methods,
/// so every field stays inside its enumerated range for the whole session.
pub struct OptionsModel {
    opts: OptionSet,
}

impl OptionsModel {
    /// Build the session model from the decoded set, clamping the persisted
    /// postfx slot against what the catalog actually discovered (a slot that
    /// vanished or was never valid falls back to "None").
    pub fn new(mut opts: OptionSet, catalog: &EffectCatalog) -> Self {
        opts.postfx = catalog.clamp(opts.postfx);
        OptionsModel { opts }
    }

    pub fn options(&self) -> &OptionSet {
        &self.opts
    }

    pub fn cycle_resolution(&mut self, step: isize) {
        self.opts.resolution = cycle(self.opts.resolution, RESOLUTION_NAMES.len(), step);
    }

    pub fn toggle_bilinear(&mut self) {
        self.opts.bilinear = !self.opts.bilinear;
    }

    pub fn cycle_language(&mut self, step: isize) {
        self.opts.language = cycle(self.opts.language, LANGUAGE_NAMES.len(), step);
    }

    pub fn cycle_antialiasing(&mut self, step: isize) {
        self.opts.antialiasing = cycle(self.opts.antialiasing, ANTI_ALIASING_NAMES.len(), step);
    }

    /// Step through discovered effects only; gap slots are skipped entirely.
    pub fn cycle_postfx(&mut self, step: isize, catalog: &EffectCatalog) {
        self.opts.postfx = if step >= 0 {
            catalog.next_selectable(self.opts.postfx)
        } else {
            catalog.prev_selectable(self.opts.postfx)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xtl_fx::EffectCatalog;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_first_run_defaults() {
        let dir = tempdir().unwrap();
        let opts = load_options(&dir.path().join("no_such.cfg"));
        assert_eq!(
            opts,
            OptionSet {
                resolution: 0,
                bilinear: false,
                language: 0,
                antialiasing: 2,
                postfx: 0,
            }
        );
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.cfg");
        let opts = OptionSet {
            resolution: 2,
            bilinear: true,
            language: 5,
            antialiasing: 1,
            postfx: 3,
        };
        assert!(save_options(&path, &opts));
        assert_eq!(load_options(&path), opts);
    }

    #[test]
    fn save_writes_fixed_line_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.cfg");
        let opts = OptionSet {
            resolution: 1,
            bilinear: true,
            language: 3,
            antialiasing: 0,
            postfx: 2,
        };
        assert!(save_options(&path, &opts));
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "resolution=1\nbilinear=1\nlanguage=3\nantialiasing=0\npostfx=2\n"
        );
    }

    #[test]
    fn malformed_line_stops_the_scan_but_keeps_earlier_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.cfg");
        std::fs::write(&path, "resolution=1\nbilinear=1\ngarbage\nlanguage=3\n").unwrap();
        let opts = load_options(&path);
        assert_eq!(opts.resolution, 1);
        assert!(opts.bilinear);
        // language came after the malformed line, so it keeps the zeroed value
        assert_eq!(opts.language, 0);
    }

    #[test]
    fn non_numeric_value_also_stops_the_scan() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.cfg");
        std::fs::write(&path, "resolution=2\nbilinear=yes\nlanguage=3\n").unwrap();
        let opts = load_options(&path);
        assert_eq!(opts.resolution, 2);
        assert!(!opts.bilinear);
        assert_eq!(opts.language, 0);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.cfg");
        std::fs::write(&path, "foo=9\nresolution=2\n").unwrap();
        assert_eq!(load_options(&path).resolution, 2);
    }

    #[test]
    fn keys_absent_from_an_existing_file_stay_zeroed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.cfg");
        std::fs::write(&path, "resolution=1\n").unwrap();
        let opts = load_options(&path);
        assert_eq!(opts.resolution, 1);
        // zeroed base, not the first-run default of MSAA 4x
        assert_eq!(opts.antialiasing, 0);
    }

    #[test]
    fn out_of_range_indices_clamp_to_field_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.cfg");
        std::fs::write(&path, "resolution=99\nlanguage=-4\nantialiasing=7\n").unwrap();
        let opts = load_options(&path);
        assert_eq!(opts.resolution, 0);
        assert_eq!(opts.language, 0);
        assert_eq!(opts.antialiasing, 2);
    }

    #[test]
    fn any_nonzero_bilinear_value_means_enabled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.cfg");
        std::fs::write(&path, "bilinear=5\n").unwrap();
        assert!(load_options(&path).bilinear);
    }

    #[test]
    fn exit_actions_cover_all_four_outcomes() {
        let outcomes: Vec<(bool, bool)> = ExitAction::ALL
            .iter()
            .map(|a| (a.persist(), a.launch()))
            .collect();
        assert_eq!(
            outcomes,
            vec![(true, false), (true, true), (false, false), (false, true)]
        );
    }

    #[test]
    fn model_clamps_stale_postfx_slot() {
        let catalog = EffectCatalog::from_file_names(["1_Sepia_frag"]);
        let mut opts = OptionSet::default();
        opts.postfx = 9; // persisted from a run with more effects installed
        let model = OptionsModel::new(opts, &catalog);
        assert_eq!(model.options().postfx, 0);
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        let catalog = EffectCatalog::from_file_names(["1_Sepia_frag"]);
        let mut model = OptionsModel::new(OptionSet::default(), &catalog);
        model.cycle_resolution(-1);
        assert_eq!(model.options().resolution, 2);
        model.cycle_resolution(1);
        assert_eq!(model.options().resolution, 0);
        model.toggle_bilinear();
        assert!(model.options().bilinear);
    }
}
