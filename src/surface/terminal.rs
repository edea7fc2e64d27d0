use super::canvas::Canvas;
use crate::color::Rgb;
use std::io::Write;

// Sentinel that never matches a real colour on the first cell of a row
const RESET: Option<Rgb> = None;

/// Writes a [`Canvas`] to a true-colour terminal, two raster rows per text row
/// using the lower half block: background is the top pixel, foreground the bottom.
#[derive(Default)]
pub struct TerminalPresenter {
    output_buf: Vec<u8>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self { output_buf: Vec::new() }
    }

    pub fn present<W: Write>(&mut self, canvas: &Canvas, out: &mut W) -> std::io::Result<()> {
        let (width, height) = canvas.raster_size();
        self.output_buf.clear();
        self.output_buf.reserve(width * height * 20);
        self.output_buf.extend_from_slice(b"\x1b[H");

        for y in (0..height).step_by(2) {
            let mut prev_top = RESET;
            let mut prev_bot = RESET;

            for x in 0..width {
                let top = canvas.pixel(x, y);
                let bot = if y + 1 < height { canvas.pixel(x, y + 1) } else { top };

                if prev_top != Some(top) {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = Some(top);
                }
                if prev_bot != Some(bot) {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = Some(bot);
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            if y + 2 < height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()
    }
}
