use crate::terminal::event::{
    CursorPos, KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize,
};
use crate::ui::renderer::RenderFrame;
use crate::ui::span::SpanLine;
use crate::ui::style::Color;
use crossterm::cursor::{Hide, MoveTo, Show, position};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent,
    KeyEventKind, KeyModifiers as CrosstermKeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{
    Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
    EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen, ScrollUp,
};
use crossterm::{execute, queue};
use serde::Deserialize;
use std::io::{self, Stdout, Write};
use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    AltScreen,
    Inline,
}

#[derive(Debug, Default)]
struct InlineState {
    block_start_row: u16,
    last_drawn_count: usize,
    last_frame: Vec<SpanLine>,
    last_cursor: Option<CursorPos>,
    has_rendered_once: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InlineLayoutPlan {
    block_start_row: u16,
    draw_count: usize,
    skip: usize,
}

/// Places a frame of `frame_len` lines starting at `prev_block_start_row`,
/// shifting the block up when it would run past the bottom of the screen.
fn plan_inline_layout(height: usize, frame_len: usize, prev_block_start_row: u16) -> InlineLayoutPlan {
    if height == 0 {
        return InlineLayoutPlan {
            block_start_row: 0,
            draw_count: 0,
            skip: 0,
        };
    }

    let max_row = height.saturating_sub(1) as u16;
    let mut block_start = prev_block_start_row.min(max_row) as usize;
    let desired_visible = frame_len.min(height);
    let available = height.saturating_sub(block_start);

    if desired_visible > available {
        let need = desired_visible - available;
        block_start = block_start.saturating_sub(need.min(block_start));
    }

    let draw_count = frame_len.min(height.saturating_sub(block_start));
    InlineLayoutPlan {
        block_start_row: block_start.min(u16::MAX as usize) as u16,
        draw_count,
        skip: frame_len.saturating_sub(draw_count),
    }
}

pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    mode: RenderMode,
    inline: InlineState,
    last_frame: Vec<SpanLine>,
    /// Set when the terminal accepted the kitty keyboard flags in `enter`.
    keyboard_enhanced: bool,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize { width, height },
            mode: RenderMode::default(),
            inline: InlineState::default(),
            last_frame: Vec::new(),
            keyboard_enhanced: false,
        })
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn set_size(&mut self, size: TerminalSize) {
        self.size = size;
    }

    pub fn enter(&mut self) -> io::Result<()> {
        self.refresh_size()?;
        terminal::enable_raw_mode()?;
        self.push_keyboard_enhancement();
        match self.mode {
            RenderMode::AltScreen => execute!(self.stdout, EnterAlternateScreen, Hide),
            RenderMode::Inline => {
                let (_, row) = position()?;
                self.inline.block_start_row = row.min(self.size.height.saturating_sub(1));
                execute!(self.stdout, DisableLineWrap, Hide)
            }
        }
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if std::mem::take(&mut self.keyboard_enhanced) {
            execute!(self.stdout, PopKeyboardEnhancementFlags)?;
        }
        terminal::disable_raw_mode()?;
        match self.mode {
            RenderMode::AltScreen => {
                execute!(self.stdout, LeaveAlternateScreen, EnableLineWrap, Show)?;
                let last_frame = std::mem::take(&mut self.last_frame);
                for line in &last_frame {
                    self.write_span_line(line, self.size.width, false)?;
                    self.stdout.write_all(b"\n")?;
                }
            }
            RenderMode::Inline => {
                let max_row = self.size.height.saturating_sub(1);
                let last_row = self
                    .inline
                    .block_start_row
                    .saturating_add(self.inline.last_drawn_count.saturating_sub(1) as u16)
                    .min(max_row);
                execute!(self.stdout, MoveTo(0, last_row), EnableLineWrap, Show)?;
                self.stdout.write_all(b"\n")?;
            }
        }
        self.stdout.flush()
    }

    /// Ctrl+Enter only reaches the textarea as its own key when the terminal
    /// disambiguates escape codes. Terminals without support keep the legacy
    /// encoding, where it arrives as Ctrl+J.
    fn push_keyboard_enhancement(&mut self) {
        if !terminal::supports_keyboard_enhancement().unwrap_or(false) {
            return;
        }
        self.keyboard_enhanced = execute!(
            self.stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )
        .is_ok();
    }

    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<TerminalEvent> {
        if !event::poll(timeout)? {
            return Ok(TerminalEvent::Tick);
        }
        match event::read()? {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                Ok(TerminalEvent::Key(map_key_event(key)))
            }
            CrosstermEvent::Resize(width, height) => {
                Ok(TerminalEvent::Resize(TerminalSize { width, height }))
            }
            _ => Ok(TerminalEvent::Tick),
        }
    }

    pub fn render_frame(&mut self, frame: &RenderFrame) -> io::Result<()> {
        self.refresh_size()?;
        if self.size.width == 0 || self.size.height == 0 {
            return Ok(());
        }
        self.last_frame.clone_from(&frame.lines);
        match self.mode {
            RenderMode::AltScreen => self.render_altscreen(frame),
            RenderMode::Inline => self.render_inline(frame),
        }
    }

    fn refresh_size(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.size = TerminalSize { width, height };
        Ok(())
    }

    fn render_altscreen(&mut self, frame: &RenderFrame) -> io::Result<()> {
        let height = self.size.height as usize;
        let width = self.size.width;
        let max_offset = frame.lines.len().saturating_sub(height);
        let scroll_offset = match frame.cursor {
            Some(cur) => (cur.row as usize)
                .saturating_sub(height.saturating_sub(1))
                .min(max_offset),
            None => 0,
        };

        queue!(self.stdout, BeginSynchronizedUpdate, MoveTo(0, 0), Clear(ClearType::All))?;
        for (row_idx, line) in frame.lines.iter().skip(scroll_offset).take(height).enumerate() {
            queue!(self.stdout, MoveTo(0, row_idx as u16))?;
            self.write_span_line(line, width, true)?;
        }
        self.place_cursor(frame.cursor, scroll_offset, 0)?;
        queue!(self.stdout, EndSynchronizedUpdate)?;
        self.stdout.flush()
    }

    fn render_inline(&mut self, frame: &RenderFrame) -> io::Result<()> {
        if self.inline.has_rendered_once
            && self.inline.last_frame == frame.lines
            && self.inline.last_cursor == frame.cursor
        {
            return Ok(());
        }

        let height = self.size.height as usize;
        let width = self.size.width;
        let prev_start = self.inline.block_start_row;
        let plan = plan_inline_layout(height, frame.lines.len(), prev_start);
        let scroll_up = prev_start.saturating_sub(plan.block_start_row);

        queue!(self.stdout, BeginSynchronizedUpdate, Hide)?;
        if scroll_up > 0 {
            queue!(
                self.stdout,
                MoveTo(0, self.size.height.saturating_sub(1)),
                ScrollUp(scroll_up)
            )?;
        }
        queue!(
            self.stdout,
            MoveTo(0, plan.block_start_row),
            Clear(ClearType::FromCursorDown)
        )?;
        for visible_row in 0..plan.draw_count {
            let target_row = plan.block_start_row.saturating_add(visible_row as u16);
            queue!(self.stdout, MoveTo(0, target_row))?;
            if let Some(line) = frame.lines.get(plan.skip + visible_row) {
                self.write_span_line(line, width, true)?;
            }
        }
        self.place_cursor(frame.cursor, plan.skip, plan.block_start_row)?;
        queue!(self.stdout, EndSynchronizedUpdate)?;

        self.inline.block_start_row = plan.block_start_row;
        self.inline.last_drawn_count = plan.draw_count;
        self.inline.last_frame.clone_from(&frame.lines);
        self.inline.last_cursor = frame.cursor;
        self.inline.has_rendered_once = true;

        self.stdout.flush()
    }

    fn place_cursor(&mut self, cursor: Option<CursorPos>, skip: usize, origin_row: u16) -> io::Result<()> {
        let visible = cursor.and_then(|cur| {
            let row = (cur.row as usize).checked_sub(skip)?;
            (row < self.size.height as usize).then_some((cur.col, row as u16))
        });
        match visible {
            Some((col, row)) => {
                let col = col.min(self.size.width.saturating_sub(1));
                queue!(self.stdout, MoveTo(col, origin_row.saturating_add(row)), Show)
            }
            None => queue!(self.stdout, Hide),
        }
    }

    fn write_span_line(&mut self, line: &SpanLine, width: u16, keep_margin: bool) -> io::Result<()> {
        let render_width = (if keep_margin && width > 1 { width - 1 } else { width }) as usize;
        let mut used = 0usize;
        for span in line {
            if used >= render_width {
                break;
            }
            let clipped = clip_to_width(&span.text, render_width - used);
            if clipped.is_empty() {
                continue;
            }
            if let Some(color) = span.style.color {
                queue!(self.stdout, SetForegroundColor(map_color(color)))?;
            }
            if let Some(background) = span.style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(background)))?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            if span.style.dim {
                queue!(self.stdout, SetAttribute(Attribute::Dim))?;
            }
            queue!(self.stdout, Print(clipped.as_str()), ResetColor)?;
            if span.style.bold || span.style.dim {
                queue!(self.stdout, SetAttribute(Attribute::NormalIntensity))?;
            }
            used = used.saturating_add(UnicodeWidthStr::width(clipped.as_str()));
        }
        Ok(())
    }
}

fn map_color(color: Color) -> CrosstermColor {
    match color {
        Color::Reset => CrosstermColor::Reset,
        Color::Black => CrosstermColor::Black,
        Color::DarkGrey => CrosstermColor::DarkGrey,
        Color::Red => CrosstermColor::Red,
        Color::Green => CrosstermColor::Green,
        Color::Yellow => CrosstermColor::DarkYellow,
        Color::Blue => CrosstermColor::DarkBlue,
        Color::Magenta => CrosstermColor::DarkMagenta,
        Color::Cyan => CrosstermColor::DarkCyan,
        Color::White => CrosstermColor::White,
    }
}

fn map_key_event(key: CrosstermKeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(key.code),
        modifiers: map_key_modifiers(key.modifiers),
    }
}

fn map_key_code(code: CrosstermKeyCode) -> KeyCode {
    match code {
        CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Tab => KeyCode::Tab,
        CrosstermKeyCode::BackTab => KeyCode::BackTab,
        CrosstermKeyCode::Esc => KeyCode::Esc,
        CrosstermKeyCode::Backspace => KeyCode::Backspace,
        CrosstermKeyCode::Delete => KeyCode::Delete,
        CrosstermKeyCode::Home => KeyCode::Home,
        CrosstermKeyCode::End => KeyCode::End,
        CrosstermKeyCode::Left => KeyCode::Left,
        CrosstermKeyCode::Right => KeyCode::Right,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        _ => KeyCode::Unknown,
    }
}

fn map_key_modifiers(modifiers: CrosstermKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::NONE;
    if modifiers.contains(CrosstermKeyModifiers::SHIFT) {
        out = out | KeyModifiers::SHIFT;
    }
    if modifiers.contains(CrosstermKeyModifiers::CONTROL) {
        out = out | KeyModifiers::CONTROL;
    }
    if modifiers.contains(CrosstermKeyModifiers::ALT) {
        out = out | KeyModifiers::ALT;
    }
    out
}

fn clip_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0usize;
    let mut out = String::new();
    for ch in text.chars().filter(|ch| !matches!(ch, '\n' | '\r')) {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used.saturating_add(ch_width) > max_width {
            break;
        }
        out.push(ch);
        used = used.saturating_add(ch_width);
    }
    out
}
