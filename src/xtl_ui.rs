// Settings screen rendering and event handling
// Thin ratatui layer over OptionsModel; runs until one of the four exit actions

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Span, Spans, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::error::Error;
use std::io;
use std::time::Duration;

use crate::xtl_color::Palette;
use crate::xtl_fx::EffectCatalog;
use crate::xtl_opts::{ExitAction, OptionsModel};
use crate::xtl_text::{
    ACTION_LABELS, ANTI_ALIASING_NAMES, DESC_ANTIALIASING, DESC_BILINEAR, DESC_LANGUAGE,
    DESC_POSTFX, DESC_RESOLUTION, RESOLUTION_NAMES, language_display,
};
use unicode_width::UnicodeWidthStr;

// Focusable rows, top to bottom. BUTTONS is the action-button row.
const ROW_RESOLUTION: usize = 0;
const ROW_BILINEAR: usize = 1;
const ROW_ANTIALIASING: usize = 2;
const ROW_POSTFX: usize = 3;
const ROW_LANGUAGE: usize = 4;
const ROW_BUTTONS: usize = 5;

const OPTION_LABELS: [&str; 5] = [
    "Resolution:",
    "Bilinear Filter:",
    "Anti-Aliasing:",
    "PostFX Effect:",
    "Language:",
];

/// Run the settings screen until the user picks a terminal action.
/// The four exit buttons are the only way out of the loop; every other key
/// just edits the model in place.
pub fn run(
    model: &mut OptionsModel,
    catalog: &EffectCatalog,
) -> Result<ExitAction, Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let palette = Palette::new();
    let mut focus: usize = ROW_RESOLUTION;
    let mut button_focus: usize = 0;
    let tick_rate = Duration::from_millis(200);

    let action = loop {
        terminal.draw(|f| {
            draw(f, model, catalog, &palette, focus, button_focus);
        })?;

        if !event::poll(tick_rate)? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => code,
            _ => continue,
        };
        match key {
            KeyCode::Up => {
                if focus > 0 {
                    focus -= 1;
                }
            }
            KeyCode::Down => {
                if focus < ROW_BUTTONS {
                    focus += 1;
                }
            }
            KeyCode::Left => step_focused(model, catalog, focus, &mut button_focus, -1),
            KeyCode::Right => step_focused(model, catalog, focus, &mut button_focus, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if focus == ROW_BUTTONS {
                    break ExitAction::ALL[button_focus];
                } else if focus == ROW_BILINEAR {
                    model.toggle_bilinear();
                } else {
                    // stepping forward is the natural "activate" on a value row
                    step_focused(model, catalog, focus, &mut button_focus, 1);
                }
            }
            _ => {}
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(action)
}

/// Apply a Left/Right step to whatever row has focus.
fn step_focused(
    model: &mut OptionsModel,
    catalog: &EffectCatalog,
    focus: usize,
    button_focus: &mut usize,
    step: isize,
) {
    match focus {
        ROW_RESOLUTION => model.cycle_resolution(step),
        ROW_BILINEAR => model.toggle_bilinear(),
        ROW_ANTIALIASING => model.cycle_antialiasing(step),
        ROW_POSTFX => model.cycle_postfx(step, catalog),
        ROW_LANGUAGE => model.cycle_language(step),
        ROW_BUTTONS => {
            let count = ACTION_LABELS.len() as isize;
            *button_focus = (*button_focus as isize + step).rem_euclid(count) as usize;
        }
        _ => {}
    }
}

/// Description paragraph for the focused row; the button row has none.
fn description_for(focus: usize) -> Option<&'static str> {
    match focus {
        ROW_RESOLUTION => Some(DESC_RESOLUTION),
        ROW_BILINEAR => Some(DESC_BILINEAR),
        ROW_ANTIALIASING => Some(DESC_ANTIALIASING),
        ROW_POSTFX => Some(DESC_POSTFX),
        ROW_LANGUAGE => Some(DESC_LANGUAGE),
        _ => None,
    }
}

fn draw(
    f: &mut ratatui::Frame<CrosstermBackend<io::Stdout>>,
    model: &OptionsModel,
    catalog: &EffectCatalog,
    palette: &Palette,
    focus: usize,
    button_focus: usize,
) {
    let size = f.size();
    let min_twidth = 70u16;
    let min_theight = 20u16;
    // If terminal too small, render a centered warning and skip normal UI
    if size.width < min_twidth || size.height < min_theight {
        let warn_lines = vec![
            Spans::from(Span::raw("Terminal size too small.")),
            Spans::from(Span::raw(format!(
                "Minimum required: {} x {}",
                min_twidth, min_theight
            ))),
        ];
        let warn = Paragraph::new(Text::from(warn_lines))
            .style(Style::default().fg(palette.warn_fg))
            .block(Block::default().borders(Borders::ALL).title("Resize Terminal"))
            .alignment(Alignment::Center);
        let w = 40u16.min(size.width.saturating_sub(2));
        let h = 5u16.min(size.height.saturating_sub(2));
        f.render_widget(warn, center_rect(w, h, size));
        return;
    }

    // layout: title row, option rows, button row, description panel
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(6),
            ]
            .as_ref(),
        )
        .split(size);

    let title = Paragraph::new(Spans::from(vec![
        Span::styled(
            env!("CARGO_PKG_DESCRIPTION"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  v{}", env!("CARGO_PKG_VERSION"))),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    // current value text per option row
    let opts = model.options();
    let bilinear_value = if opts.bilinear { "[x] Enabled" } else { "[ ] Disabled" };
    let values: [String; 5] = [
        RESOLUTION_NAMES[opts.resolution].to_string(),
        bilinear_value.to_string(),
        ANTI_ALIASING_NAMES[opts.antialiasing].to_string(),
        catalog.name(opts.postfx).unwrap_or("None").to_string(),
        language_display(opts.language),
    ];

    // pad labels to a common column so values line up (display width, not bytes)
    let label_w = OPTION_LABELS.iter().map(|l| l.width()).max().unwrap_or(0);

    let mut lines: Vec<Spans> = vec![Spans::from(Span::raw(""))];
    let section = |name: &str| {
        Spans::from(vec![
            Span::raw(" "),
            Span::styled(
                name.to_string(),
                Style::default().fg(palette.section_fg).add_modifier(Modifier::BOLD),
            ),
        ])
    };
    let row = |index: usize| {
        let label = OPTION_LABELS[index];
        let pad = " ".repeat(label_w.saturating_sub(label.width()) + 2);
        let value_style = if focus == index {
            Style::default().bg(palette.focus_bg).fg(palette.focus_fg)
        } else {
            Style::default().fg(palette.value_fg)
        };
        let value = if focus == index {
            format!("◄ {} ►", values[index])
        } else {
            format!("  {}  ", values[index])
        };
        Spans::from(vec![
            Span::raw("   "),
            Span::raw(label.to_string()),
            Span::raw(pad),
            Span::styled(value, value_style),
        ])
    };

    lines.push(section("Graphics"));
    lines.push(Spans::from(Span::raw("")));
    lines.push(row(ROW_RESOLUTION));
    lines.push(Spans::from(Span::raw("")));
    lines.push(row(ROW_BILINEAR));
    lines.push(Spans::from(Span::raw("")));
    lines.push(row(ROW_ANTIALIASING));
    lines.push(Spans::from(Span::raw("")));
    lines.push(row(ROW_POSTFX));
    lines.push(Spans::from(Span::raw("")));
    lines.push(section("Misc"));
    lines.push(Spans::from(Span::raw("")));
    lines.push(row(ROW_LANGUAGE));

    let options_block = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Options"))
        .alignment(Alignment::Left);
    f.render_widget(options_block, chunks[1]);

    // action buttons, centered as one row
    let mut button_spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, label) in ACTION_LABELS.iter().enumerate() {
        if i > 0 {
            button_spans.push(Span::raw("  "));
        }
        let style = if focus == ROW_BUTTONS && button_focus == i {
            Style::default()
                .bg(palette.focus_bg)
                .fg(palette.focus_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.button_fg)
        };
        button_spans.push(Span::styled(label.to_string(), style));
    }
    button_spans.push(Span::raw(" "));
    let buttons = Paragraph::new(Spans::from(button_spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(buttons, chunks[2]);

    // description panel for the focused option
    let desc_text = description_for(focus).unwrap_or("");
    let mut desc_lines: Vec<Spans> = desc_text
        .split('\n')
        .map(|l| Spans::from(Span::raw(format!(" {}", l))))
        .collect();
    if focus == ROW_POSTFX {
        desc_lines.push(Spans::from(Span::raw(format!(
            " Installed effects: {}",
            catalog.selectable_count().saturating_sub(1)
        ))));
    }
    let desc = Paragraph::new(Text::from(desc_lines))
        .style(Style::default().fg(palette.desc_fg))
        .block(Block::default().borders(Borders::ALL).title("Description"))
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);
    f.render_widget(desc, chunks[3]);
}

fn center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
