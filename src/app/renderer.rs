use std::io::Write;

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use super::canvas::{Canvas, Glyph};

pub struct Renderer<W: Write> {
    /// Output handle to write the frames to
    out: W,
    /// Last frame drawn, used to redraw only the glyphs that changed
    previous: Option<Canvas>,
}

impl<W: Write> Renderer<W> {
    /// Number of terminal rows below the canvas used for the status lines
    pub const NUM_STATUS_ROWS: u16 = 2;

    pub fn new(out: W) -> Self {
        Self {
            out,
            previous: None,
        }
    }

    /// Forget the last frame so the next one is drawn from scratch.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Checks if a canvas fits a terminal of the given size, status lines included.
    pub fn fits(canvas: &Canvas, (term_width, term_height): (u16, u16)) -> bool {
        canvas.width() * Glyph::WIDTH as usize <= term_width as usize
            && canvas.height() + Self::NUM_STATUS_ROWS as usize <= term_height as usize
    }

    /// Draw a frame and the status lines under it.
    pub fn draw(
        &mut self,
        canvas: Canvas,
        status: &[String],
        term_size: (u16, u16),
    ) -> std::io::Result<()> {
        if !Self::fits(&canvas, term_size) {
            return self.draw_too_small(&canvas, term_size);
        }

        match self.previous.as_ref() {
            Some(previous)
                if previous.width() == canvas.width() && previous.height() == canvas.height() =>
            {
                for (row, (old, new)) in previous.rows().zip(canvas.rows()).enumerate() {
                    for (col, (old, new)) in old.iter().zip(new).enumerate() {
                        if old != new {
                            queue!(
                                self.out,
                                cursor::MoveTo(col as u16 * Glyph::WIDTH, row as u16),
                                style::Print(new)
                            )?;
                        }
                    }
                }
            }
            _ => {
                queue!(self.out, terminal::Clear(ClearType::All))?;
                for (row, glyphs) in canvas.rows().enumerate() {
                    queue!(self.out, cursor::MoveTo(0, row as u16))?;
                    for glyph in glyphs {
                        queue!(self.out, style::Print(glyph))?;
                    }
                }
            }
        }

        let (term_width, _) = term_size;
        let first_status_row = canvas.height() as u16;
        for (i, line) in status
            .iter()
            .take(Self::NUM_STATUS_ROWS as usize)
            .enumerate()
        {
            let (text, _) = line.unicode_truncate(term_width as usize);
            let styled = if i == 0 {
                text.with(Color::Green).attribute(Attribute::Bold)
            } else {
                text.with(Color::Cyan)
            };
            queue!(
                self.out,
                cursor::MoveTo(0, first_status_row + i as u16),
                terminal::Clear(ClearType::CurrentLine),
                style::PrintStyledContent(styled)
            )?;
        }
        self.out.flush()?;

        self.previous = Some(canvas);
        Ok(())
    }

    fn draw_too_small(
        &mut self,
        canvas: &Canvas,
        (term_width, term_height): (u16, u16),
    ) -> std::io::Result<()> {
        let msg = format!(
            "Terminal size ({}x{}) is too small for the maze ({}x{}). Enlarge the terminal, shrink the cells with '-', or press Esc to exit.",
            term_width,
            term_height,
            canvas.width() * Glyph::WIDTH as usize,
            canvas.height() + Self::NUM_STATUS_ROWS as usize,
        );
        let (msg, _) = msg.unicode_truncate(term_width as usize);
        queue!(
            self.out,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold))
        )?;
        self.out.flush()?;
        // Whatever was on screen is gone now
        self.previous = None;
        Ok(())
    }

    #[cfg(test)]
    fn take_output(&mut self) -> String
    where
        W: Into<Vec<u8>> + Default,
    {
        let bytes: Vec<u8> = std::mem::take(&mut self.out).into();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}
