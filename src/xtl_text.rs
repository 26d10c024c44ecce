// Fixed display-name tables and option descriptions
// Every selectable set except PostFX is closed at compile time

/// Internal resolution choices, indexed by the `resolution` option.
pub const RESOLUTION_NAMES: [&str; 3] = ["544p", "720p", "1080i"];

/// Anti-aliasing choices, indexed by the `antialiasing` option.
pub const ANTI_ALIASING_NAMES: [&str; 3] = ["Disabled", "MSAA 2x", "MSAA 4x"];

/// Game language choices, indexed by the `language` option.
/// Index 0 is "Auto" (decided from the system language at game startup).
pub const LANGUAGE_NAMES: [&str; 7] = [
    "Auto",
    "Japanese",
    "English",
    "French",
    "German",
    "Italian",
    "Spanish",
];

// Description texts shown for the focused settings row
pub const DESC_RESOLUTION: &str = "Internal resolution to use. Resolutions higher \
    than 544p may require extra GPU headroom.\nThe default value is: 544p.";
pub const DESC_BILINEAR: &str = "When enabled, forces bilinear filtering for all \
    game's textures.\nThe default value is: Disabled.";
pub const DESC_ANTIALIASING: &str = "Anti-Aliasing is a technique used to reduce \
    graphical artifacts surrounding 3D models. Greatly improves graphics quality \
    at the cost of some GPU power.\nThe default value is: MSAA 4x.";
pub const DESC_LANGUAGE: &str = "Language to use for the game. When Auto is used, \
    language will be decided based on system language.\nThe default value is: Auto.";
pub const DESC_POSTFX: &str = "Enables usage of a post processing effect through \
    shaders. May impact performances.\nThe default value is: None.";

/// Labels for the four terminal action buttons, in the same order as
/// `ExitAction::ALL`.
pub const ACTION_LABELS: [&str; 4] = [
    " Save and Exit ",
    " Save and Launch ",
    " Discard and Exit ",
    " Discard and Launch ",
];

/// Display text for a language index, resolving "Auto" to the system
/// language when it matches one of the game's languages.
/// Falls back to plain "Auto" when the locale is unknown or unsupported.
pub fn language_display(index: usize) -> String {
    if index != 0 {
        return LANGUAGE_NAMES.get(index).copied().unwrap_or("Auto").to_string();
    }
    match auto_language() {
        Some(name) => format!("Auto ({})", name),
        None => "Auto".to_string(),
    }
}

/// Maps the system locale to one of the game's language names.
fn auto_language() -> Option<&'static str> {
    let locale = sys_locale::get_locale()?.to_lowercase();
    let name = match locale.get(..2)? {
        "ja" => "Japanese",
        "en" => "English",
        "fr" => "French",
        "de" => "German",
        "it" => "Italian",
        "es" => "Spanish",
        _ => return None,
    };
    Some(name)
}
