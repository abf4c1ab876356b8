use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::{Buffer, Cell};
use crate::document::Document;
use crate::render::render_to_buffer;
use crate::stylesheet::Stylesheet;
use crate::text::char_width;
use crate::types::Rgb;

/// Raw-mode, alternate-screen terminal with mouse capture. Frames are
/// diffed against the previous one and only changed cells are written.
pub struct Terminal {
    stdout: io::Stdout,
    current: Buffer,
    previous: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            current: Buffer::new(width, height),
            previous: Buffer::new(width, height),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current.width(), self.current.height())
    }

    /// Wait for input. With a timeout, returns every event that arrived,
    /// possibly none; without one, blocks for a single event.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let Some(timeout) = timeout else {
            return Ok(vec![event::read()?]);
        };

        let mut events = Vec::new();
        if event::poll(timeout)? {
            events.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }
        Ok(events)
    }

    pub fn draw(&mut self, doc: &Document, sheet: &Stylesheet) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if (width, height) != self.size() {
            self.current = Buffer::new(width, height);
            self.previous = Buffer::new(width, height);
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        self.current.reset();
        render_to_buffer(doc.root(), doc.layout(), sheet, &mut self.current);
        self.flush_diff()?;
        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(())
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut pen: Option<(u16, u16)> = None;
        let mut last: Option<Cell> = None;

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current.diff(&self.previous) {
            // The wide symbol to the left already covers it.
            if cell.wide_continuation {
                continue;
            }
            if pen != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            let changed = |f: fn(&Cell) -> bool| last.as_ref().is_none_or(|prev| f(prev) != f(cell));
            if last.is_none_or(|prev| prev.fg != cell.fg) {
                queue!(self.stdout, SetForegroundColor(ct_color(cell.fg)))?;
            }
            if last.is_none_or(|prev| prev.bg != cell.bg) {
                queue!(self.stdout, SetBackgroundColor(ct_color(cell.bg)))?;
            }
            if changed(|c| c.style.bold) || changed(|c| c.style.dim) {
                queue!(self.stdout, SetAttribute(Attribute::NormalIntensity))?;
                if cell.style.bold {
                    queue!(self.stdout, SetAttribute(Attribute::Bold))?;
                }
                if cell.style.dim {
                    queue!(self.stdout, SetAttribute(Attribute::Dim))?;
                }
            }
            if changed(|c| c.style.italic) {
                let attr = if cell.style.italic {
                    Attribute::Italic
                } else {
                    Attribute::NoItalic
                };
                queue!(self.stdout, SetAttribute(attr))?;
            }
            if changed(|c| c.style.underline) {
                let attr = if cell.style.underline {
                    Attribute::Underlined
                } else {
                    Attribute::NoUnderline
                };
                queue!(self.stdout, SetAttribute(attr))?;
            }

            queue!(self.stdout, Print(cell.symbol))?;

            let advance = char_width(cell.symbol).max(1) as u16;
            pen = Some((x + advance, y));
            last = Some(*cell);
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

fn ct_color(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
