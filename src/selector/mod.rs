//! The catalog/configurator TUI.
//!
//! Two panes: the effect list on the left, the selected effect's
//! description and saved options on the right. `Enter` installs the hook
//! script, `C` opens the option editor, `P` previews in a window, `R`
//! restores the stock hook.

pub mod catalog;
pub mod editor;
pub mod hook;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::error::Result;
use crate::supervisor::Supervisor;
use self::catalog::CatalogEntry;
use self::editor::EditorState;

/// Left pane width in columns
const LIST_WIDTH: u16 = 34;
/// Rows reserved for the header and footer chrome
const CHROME_ROWS: u16 = 4;

/// Word-wrap to a column budget, breaking on spaces
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line = word.to_string();
        } else if line.len() + 1 + word.len() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

enum Mode {
    Browse,
    Edit(EditorState),
}

struct App {
    entries: Vec<CatalogEntry>,
    selected: usize,
    scroll: usize,
    mode: Mode,
    status: String,
    preview: Supervisor,
    pending_g: bool,
    quit: bool,
}

/// Restores the terminal even on early returns and panics
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen, Show, ResetColor);
        let _ = terminal::disable_raw_mode();
    }
}

impl App {
    fn new() -> Self {
        Self {
            entries: catalog::catalog(),
            selected: 0,
            scroll: 0,
            mode: Mode::Browse,
            status: String::from("Pick a screensaver. Enter installs it."),
            preview: Supervisor::new(),
            pending_g: false,
            quit: false,
        }
    }

    fn effect_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn list_rows(height: u16) -> usize {
        height.saturating_sub(CHROME_ROWS).max(1) as usize
    }

    fn select(&mut self, idx: usize, height: u16) {
        self.selected = idx.min(self.entries.len() - 1);
        let rows = Self::list_rows(height);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + rows {
            self.scroll = self.selected + 1 - rows;
        }
    }

    fn move_selection(&mut self, delta: i32, height: u16) {
        let len = self.entries.len() as i32;
        let next = (self.selected as i32 + delta).clamp(0, len - 1);
        self.select(next as usize, height);
    }

    fn install_selected(&mut self) {
        let entry = &self.entries[self.selected];
        match hook::install(entry.key, &entry.option_string) {
            Ok(path) => {
                self.status = format!("Installed {} -> {}", entry.title, path.display());
            },
            Err(e) => {
                self.status = format!("Install failed: {}", e);
            },
        }
    }

    fn preview_selected(&mut self) {
        let entry = &self.entries[self.selected];
        let bin = Self::effect_dir().join(entry.key);

        let mut args: Vec<String> = entry
            .option_string
            .split_whitespace()
            .map(String::from)
            .collect();
        args.push("-f".into());
        args.push("0".into());

        match self.preview.launch(&bin.to_string_lossy(), &args, &[]) {
            Ok(()) => self.status = format!("Previewing {} (any input in it exits)", entry.title),
            Err(e) => self.status = format!("Preview failed: {}", e),
        }
    }

    fn restore_default(&mut self) {
        match hook::restore_default() {
            Ok(path) => self.status = format!("Restored stock hook at {}", path.display()),
            Err(e) => self.status = format!("Restore failed: {}", e),
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode, mods: KeyModifiers, height: u16) {
        let rows = Self::list_rows(height) as i32;
        let was_pending_g = self.pending_g;
        self.pending_g = false;

        match code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => {
                self.move_selection(-1, height);
            },
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
                self.move_selection(1, height);
            },
            KeyCode::PageUp => self.move_selection(-rows, height),
            KeyCode::PageDown => self.move_selection(rows, height),
            KeyCode::Char('u') if mods.contains(KeyModifiers::CONTROL) => {
                self.move_selection(-rows / 2, height);
            },
            KeyCode::Char('d') if mods.contains(KeyModifiers::CONTROL) => {
                self.move_selection(rows / 2, height);
            },
            KeyCode::Char('g') => {
                if was_pending_g {
                    self.select(0, height);
                } else {
                    self.pending_g = true;
                }
            },
            KeyCode::Char('G') => self.select(self.entries.len() - 1, height),
            KeyCode::Enter => self.install_selected(),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                let entry = &self.entries[self.selected];
                if !entry.options.is_empty() {
                    self.mode = Mode::Edit(EditorState::open(entry));
                }
            },
            KeyCode::Char('p') | KeyCode::Char('P') => self.preview_selected(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.restore_default(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
            _ => {},
        }
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        let Mode::Edit(editor) = &mut self.mode else {
            return;
        };

        // Inline text input takes the whole key stream
        if let Some(input) = &mut editor.text_input {
            match code {
                KeyCode::Enter => editor.commit_text_input(),
                KeyCode::Esc => editor.text_input = None,
                KeyCode::Backspace => {
                    input.pop();
                },
                KeyCode::Char(c) => input.push(c),
                _ => {},
            }
            return;
        }

        match code {
            KeyCode::Up | KeyCode::Char('k') => editor.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => editor.move_cursor(1),
            KeyCode::Char('+') | KeyCode::Char('=') => editor.adjust(true),
            KeyCode::Char('-') | KeyCode::Char('_') => editor.adjust(false),
            KeyCode::Enter => {
                if editor.on_text_option() {
                    editor.begin_text_input();
                }
            },
            KeyCode::Char('s') | KeyCode::Char('S') => {
                let composed = editor.compose();
                self.entries[self.selected].option_string = composed;
                self.status = format!("Saved options for {}", self.entries[self.selected].title);
                self.mode = Mode::Browse;
            },
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                self.status = "Edit cancelled".into();
            },
            _ => {},
        }
    }

    fn draw(&self, stdout: &mut impl Write, width: u16, height: u16) -> io::Result<()> {
        queue!(stdout, Clear(ClearType::All))?;

        let accent = Color::Yellow;
        let normal = Color::White;
        let dim = Color::DarkGrey;

        // Header
        queue!(
            stdout,
            MoveTo(0, 0),
            SetForegroundColor(accent),
            Print(" nightwall "),
            SetForegroundColor(dim),
            Print("- screensaver selector"),
        )?;

        // Left pane: the list
        let rows = Self::list_rows(height);
        for (row, idx) in (self.scroll..self.entries.len()).take(rows).enumerate() {
            let entry = &self.entries[idx];
            let marker = if idx == self.selected { ">" } else { " " };
            let line = format!(
                "{} {:>2}. {} {}",
                marker,
                idx + 1,
                entry.icon,
                entry.title
            );
            let color = if idx == self.selected { accent } else { normal };
            queue!(
                stdout,
                MoveTo(0, row as u16 + 1),
                SetForegroundColor(color),
                Print(truncate(&line, LIST_WIDTH as usize - 1)),
            )?;
        }

        // Right pane
        let rx = LIST_WIDTH + 1;
        let rwidth = width.saturating_sub(rx + 1) as usize;
        match &self.mode {
            Mode::Browse => self.draw_details(stdout, rx, rwidth, accent, normal, dim)?,
            Mode::Edit(editor) => {
                self.draw_editor(stdout, editor, rx, rwidth, accent, normal, dim)?;
            },
        }

        // Footer: keys, then status
        let keys = match self.mode {
            Mode::Browse => {
                "jk/arrows move  gg/G ends  ^U/^D half  PgUp/PgDn  Enter install  C configure  P preview  R restore  Q quit"
            },
            Mode::Edit(_) => "jk/arrows move  +/- adjust  Enter edit text  S save  Esc cancel",
        };
        queue!(
            stdout,
            MoveTo(0, height.saturating_sub(2)),
            SetForegroundColor(dim),
            Print(truncate(keys, width as usize)),
            MoveTo(0, height.saturating_sub(1)),
            SetForegroundColor(accent),
            Print(truncate(&self.status, width as usize)),
            ResetColor,
        )?;

        stdout.flush()
    }

    fn draw_details(
        &self,
        stdout: &mut impl Write,
        rx: u16,
        rwidth: usize,
        accent: Color,
        normal: Color,
        dim: Color,
    ) -> io::Result<()> {
        let entry = &self.entries[self.selected];
        let mut row = 1u16;

        queue!(
            stdout,
            MoveTo(rx, row),
            SetForegroundColor(accent),
            Print(format!("{} {}", entry.icon, entry.title)),
        )?;
        row += 2;

        queue!(stdout, SetForegroundColor(normal))?;
        for line in wrap(entry.description, rwidth) {
            queue!(stdout, MoveTo(rx, row), Print(line))?;
            row += 1;
        }
        row += 1;

        if entry.option_string.is_empty() {
            queue!(
                stdout,
                MoveTo(rx, row),
                SetForegroundColor(dim),
                Print("Options: (defaults)"),
            )?;
        } else {
            queue!(
                stdout,
                MoveTo(rx, row),
                SetForegroundColor(normal),
                Print(format!("Options: {}", entry.option_string)),
            )?;
        }
        row += 1;

        if !entry.options.is_empty() {
            queue!(
                stdout,
                MoveTo(rx, row),
                SetForegroundColor(dim),
                Print("Press C to configure"),
            )?;
        }

        Ok(())
    }

    fn draw_editor(
        &self,
        stdout: &mut impl Write,
        editor: &EditorState,
        rx: u16,
        rwidth: usize,
        accent: Color,
        normal: Color,
        dim: Color,
    ) -> io::Result<()> {
        let entry = &self.entries[self.selected];
        let mut row = 1u16;

        queue!(
            stdout,
            MoveTo(rx, row),
            SetForegroundColor(accent),
            Print(format!("Configure {}", entry.title)),
        )?;
        row += 2;

        for (i, spec) in editor.specs.iter().enumerate() {
            let marker = if i == editor.cursor { ">" } else { " " };
            let value = if i == editor.cursor {
                match &editor.text_input {
                    Some(input) => format!("{}_", input),
                    None => editor.value_label(i),
                }
            } else {
                editor.value_label(i)
            };
            let color = if i == editor.cursor { accent } else { normal };
            queue!(
                stdout,
                MoveTo(rx, row),
                SetForegroundColor(color),
                Print(truncate(
                    &format!("{} {:<12} {}", marker, spec.label, value),
                    rwidth
                )),
            )?;
            row += 1;
        }
        row += 1;

        let desc = editor.specs[editor.cursor].description;
        queue!(stdout, SetForegroundColor(dim))?;
        for line in wrap(desc, rwidth) {
            queue!(stdout, MoveTo(rx, row), Print(line))?;
            row += 1;
        }

        Ok(())
    }
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

/// Run the selector until the user quits
pub fn run() -> Result<()> {
    terminal::enable_raw_mode().map_err(|e| crate::Error::InitFailure(e.to_string()))?;
    let _guard = TerminalGuard;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| crate::Error::InitFailure(e.to_string()))?;
    // Mouse support is best effort; selection works without it
    let _ = execute!(stdout, EnableMouseCapture);

    let mut app = App::new();

    while !app.quit {
        let (width, height) = terminal::size().unwrap_or((80, 24));
        app.draw(&mut stdout, width, height)?;

        if !event::poll(Duration::from_millis(250)).unwrap_or(false) {
            continue;
        }
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match app.mode {
                Mode::Browse => app.handle_browse_key(key.code, key.modifiers, height),
                Mode::Edit(_) => app.handle_edit_key(key.code),
            },
            Ok(Event::Mouse(mouse)) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    // Clicks in the list pane select the clicked row
                    if mouse.column < LIST_WIDTH && mouse.row >= 1 {
                        let idx = app.scroll + (mouse.row - 1) as usize;
                        if idx < app.entries.len() && matches!(app.mode, Mode::Browse) {
                            app.select(idx, height);
                        }
                    }
                }
            },
            _ => {},
        }
    }

    app.preview.shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("one two three four five six seven", 10);
        assert!(lines.iter().all(|l| l.len() <= 10));
        assert_eq!(lines.join(" "), "one two three four five six seven");
    }

    #[test]
    fn test_wrap_single_long_word() {
        let lines = wrap("antidisestablishmentarianism", 10);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let mut app = App::new();
        let height = 10; // 6 visible rows
        app.select(0, height);
        assert_eq!(app.scroll, 0);

        app.select(12, height);
        assert!(app.scroll > 0);
        let rows = App::list_rows(height);
        assert!(app.selected >= app.scroll && app.selected < app.scroll + rows);
    }

    #[test]
    fn test_gg_jumps_to_top() {
        let mut app = App::new();
        app.select(10, 24);
        app.handle_browse_key(KeyCode::Char('g'), KeyModifiers::NONE, 24);
        assert_eq!(app.selected, 10, "single g must not move");
        app.handle_browse_key(KeyCode::Char('g'), KeyModifiers::NONE, 24);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_capital_g_jumps_to_bottom() {
        let mut app = App::new();
        app.handle_browse_key(KeyCode::Char('G'), KeyModifiers::NONE, 24);
        assert_eq!(app.selected, app.entries.len() - 1);
    }

    #[test]
    fn test_editor_save_writes_option_string() {
        let mut app = App::new();
        // fishsaver is entry index 1
        app.select(1, 24);
        app.handle_browse_key(KeyCode::Char('c'), KeyModifiers::NONE, 24);
        assert!(matches!(app.mode, Mode::Edit(_)));

        app.handle_edit_key(KeyCode::Char('+'));
        app.handle_edit_key(KeyCode::Char('s'));
        assert!(matches!(app.mode, Mode::Browse));
        assert_eq!(app.entries[1].option_string, "-t 13");
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = App::new();
            app.handle_browse_key(code, KeyModifiers::NONE, 24);
            assert!(app.quit);
        }
    }
}
