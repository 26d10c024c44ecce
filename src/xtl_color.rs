// Cross-platform color handling for the settings screen
// Downgrades the Windows Terminal (Campbell) palette to what the terminal supports

use ratatui::style::Color;
use term_color_support::ColorSupport;

// Campbell sample per ANSI 16 color: (ANSI variant, (R, G, B), 256-color index)
const CAMPBELL: [(Color, (u8, u8, u8), u8); 16] = [
    (Color::Black, (12, 12, 12), 232),
    (Color::Red, (197, 15, 31), 160),
    (Color::Green, (19, 161, 14), 28),
    (Color::Yellow, (193, 156, 0), 178),
    (Color::Blue, (0, 55, 218), 20),
    (Color::Magenta, (136, 23, 152), 90),
    (Color::Cyan, (58, 150, 221), 38),
    (Color::Gray, (204, 204, 204), 250),
    (Color::DarkGray, (118, 118, 118), 243),
    (Color::LightRed, (231, 72, 86), 203),
    (Color::LightGreen, (22, 198, 12), 46),
    (Color::LightYellow, (249, 241, 165), 229),
    (Color::LightBlue, (59, 120, 255), 63),
    (Color::LightMagenta, (180, 0, 158), 163),
    (Color::LightCyan, (97, 214, 214), 116),
    (Color::White, (242, 242, 242), 255),
];

/// Adjusts an ANSI 16 color to match the Windows Terminal visual style,
/// picking the best representation the current terminal can display.
/// Rgb/Indexed inputs are returned unchanged.
pub fn wtmatch(color: Color) -> Color {
    let support = ColorSupport::stdout();
    for (ansi, (r, g, b), index256) in CAMPBELL {
        if ansi == color {
            return if support.has_16m {
                Color::Rgb(r, g, b)
            } else if support.has_256 {
                Color::Indexed(index256)
            } else {
                color
            };
        }
    }
    color
}

/// All colors the settings screen draws with, resolved once at startup
/// (ColorSupport probes the terminal, so this should not run per frame).
pub struct Palette {
    pub section_fg: Color,   // "Graphics" / "Misc" section headings
    pub value_fg: Color,     // current value of an option row
    pub focus_bg: Color,     // background of the focused row or button
    pub focus_fg: Color,     // foreground on top of focus_bg
    pub button_fg: Color,    // unfocused action buttons
    pub desc_fg: Color,      // description panel text
    pub warn_fg: Color,      // terminal-too-small warning
}

impl Palette {
    pub fn new() -> Self {
        Palette {
            section_fg: wtmatch(Color::Yellow),
            value_fg: wtmatch(Color::LightCyan),
            focus_bg: wtmatch(Color::LightBlue),
            focus_fg: wtmatch(Color::Black),
            button_fg: wtmatch(Color::Gray),
            desc_fg: wtmatch(Color::DarkGray),
            warn_fg: wtmatch(Color::LightRed),
        }
    }
}
