//! Rendering layer: all terminal I/O lives here.
//!
//! The game core draws circles, lines and text in pixel space through the
//! `Canvas` trait.  `TerminalCanvas` rasterizes those calls into a grid of
//! coloured cells (one cell = `CELL_W` × `CELL_H` pixels), and `present`
//! writes the grid plus HUD and overlays to the terminal.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use gesture_shooter::canvas::{self, Canvas};
use gesture_shooter::geometry::{Point, Viewport};
use gesture_shooter::state::{GameStatus, HudSnapshot};

/// Pixel size of one terminal cell.
pub const CELL_W: f32 = 8.0;
pub const CELL_H: f32 = 16.0;

/// Rows reserved outside the play grid: HUD on top, hint at the bottom.
pub const CHROME_ROWS: u16 = 2;

/// Cells fainter than this are not drawn at all.
const MIN_VISIBLE_ALPHA: f32 = 0.15;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;
const C_ERROR: Color = Color::Red;

// ── Cell grid ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
enum Cell {
    Empty,
    Glyph(char, Color),
    /// Right half of a double-width glyph.
    Continuation,
}

pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    offset: Point,
    alpha: f32,
}

impl TerminalCanvas {
    /// `cols` × `rows` is the play grid, not the whole terminal.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::Empty; cols as usize * rows as usize],
            offset: Point::default(),
            alpha: 1.0,
        }
    }

    /// Size the grid to a terminal of `width` × `height` cells.
    pub fn for_terminal(width: u16, height: u16) -> Self {
        Self::new(width, height.saturating_sub(CHROME_ROWS))
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.cols as f32 * CELL_W, self.rows as f32 * CELL_H)
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    fn cell_center(col: i32, row: i32) -> Point {
        Point::new((col as f32 + 0.5) * CELL_W, (row as f32 + 0.5) * CELL_H)
    }

    fn cell_of(p: Point) -> (i32, i32) {
        ((p.x / CELL_W).floor() as i32, (p.y / CELL_H).floor() as i32)
    }

    /// Inclusive cell range covering `center ± reach` pixels.
    fn cell_box(center: Point, reach: f32) -> (i32, i32, i32, i32) {
        let (c0, r0) = Self::cell_of(center.offset(-reach, -reach));
        let (c1, r1) = Self::cell_of(center.offset(reach, reach));
        (c0, r0, c1, r1)
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            None
        } else {
            Some(row as usize * self.cols as usize + col as usize)
        }
    }

    /// Terminal colour for `paint` at the current alpha, dimmed toward black.
    fn shade(&self, paint: canvas::Color) -> Option<Color> {
        let a = paint.a * self.alpha;
        if a < MIN_VISIBLE_ALPHA {
            return None;
        }
        let dim = |c: u8| (c as f32 * a).round() as u8;
        Some(Color::Rgb {
            r: dim(paint.r),
            g: dim(paint.g),
            b: dim(paint.b),
        })
    }

    fn plot(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell::Glyph(ch, color);
        }
    }

    fn glyph_at(&self, col: i32, row: i32) -> Option<char> {
        match self.index(col, row).map(|i| self.cells[i]) {
            Some(Cell::Glyph(ch, _)) => Some(ch),
            _ => None,
        }
    }
}

impl Canvas for TerminalCanvas {
    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = Cell::Empty);
        self.offset = Point::default();
        self.alpha = 1.0;
    }

    fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: canvas::Color) {
        let Some(color) = self.shade(color) else { return };
        let center = center.offset(self.offset.x, self.offset.y);
        let (c0, r0, c1, r1) = Self::cell_box(center, radius);

        let mut covered = false;
        for row in r0..=r1 {
            for col in c0..=c1 {
                if Self::cell_center(col, row).distance(center) <= radius {
                    self.plot(col, row, '█', color);
                    covered = true;
                }
            }
        }
        // Too small to cover a cell centre: mark the cell it sits in.
        if !covered {
            let (col, row) = Self::cell_of(center);
            self.plot(col, row, '•', color);
        }
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f32,
        color: canvas::Color,
        _line_width: f32,
    ) {
        let Some(color) = self.shade(color) else { return };
        let center = center.offset(self.offset.x, self.offset.y);
        let tolerance = CELL_W * 0.6;
        let (c0, r0, c1, r1) = Self::cell_box(center, radius + tolerance);

        for row in r0..=r1 {
            for col in c0..=c1 {
                let d = Self::cell_center(col, row).distance(center);
                if (d - radius).abs() <= tolerance {
                    self.plot(col, row, '·', color);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: canvas::Color, _line_width: f32) {
        let Some(color) = self.shade(color) else { return };
        let from = from.offset(self.offset.x, self.offset.y);
        let to = to.offset(self.offset.x, self.offset.y);
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let horizontal = dx.abs() / CELL_W >= dy.abs() / CELL_H;
        let (ch, cross) = if horizontal { ('─', '│') } else { ('│', '─') };

        let steps = (dx.abs() / CELL_W).max(dy.abs() / CELL_H).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let p = from.lerp(to, i as f32 / steps as f32);
            let (col, row) = Self::cell_of(p);
            let glyph = if self.glyph_at(col, row) == Some(cross) { '┼' } else { ch };
            self.plot(col, row, glyph, color);
        }
    }

    fn fill_text(&mut self, text: &str, at: Point, color: canvas::Color) {
        let Some(color) = self.shade(color) else { return };
        let (mut col, row) = Self::cell_of(at.offset(self.offset.x, self.offset.y));
        for ch in text.chars() {
            self.plot(col, row, ch, color);
            col += 1;
            // Emoji and pictographs take two cells.
            if ch as u32 >= 0x1F000 {
                if let Some(i) = self.index(col, row) {
                    self.cells[i] = Cell::Continuation;
                }
                col += 1;
            }
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn present<W: Write>(
    out: &mut W,
    grid: &TerminalCanvas,
    hud: &HudSnapshot,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_grid(out, grid)?;
    draw_hud(out, grid.cols(), hud)?;
    draw_controls_hint(out, grid.rows() + 1)?;

    if hud.status == GameStatus::GameOver {
        draw_game_over(out, grid.cols(), grid.rows() + CHROME_ROWS, hud)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, grid.rows() + 1))?;
    out.flush()?;
    Ok(())
}

fn draw_grid<W: Write>(out: &mut W, grid: &TerminalCanvas) -> std::io::Result<()> {
    for row in 0..grid.rows() {
        out.queue(cursor::MoveTo(0, row + 1))?;
        let mut current: Option<Color> = None;
        let mut prev_wide = false;
        for col in 0..grid.cols() {
            let i = row as usize * grid.cols() as usize + col as usize;
            match grid.cells[i] {
                Cell::Glyph(ch, color) => {
                    if current != Some(color) {
                        out.queue(style::SetForegroundColor(color))?;
                        current = Some(color);
                    }
                    out.queue(Print(ch))?;
                    prev_wide = ch as u32 >= 0x1F000;
                }
                // The wide glyph already filled this column.
                Cell::Continuation if prev_wide => prev_wide = false,
                Cell::Empty | Cell::Continuation => {
                    out.queue(Print(' '))?;
                    prev_wide = false;
                }
            }
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, width: u16, hud: &HudSnapshot) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", hud.score)))?;

    let level_str = format!("[ LEVEL {} ]", hud.level);
    let lx = (width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    let lives_str = format!("Lives:{}", "♥".repeat(hud.lives as usize));
    let rx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "Mouse : Aim   Hold button : Pinch   Hold F : Fist   H : Hide hand   M : Mute   Q : Quit",
    ))?;
    Ok(())
}

// ── Start screen ──────────────────────────────────────────────────────────────

/// Title screen.  `error` is shown when the last start attempt failed.
pub fn draw_start_screen<W: Write>(out: &mut W, error: Option<&str>) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let lines: &[(&str, Color)] = &[
        ("✋  PINCH  SHOOTER  ✋", C_TITLE),
        ("", C_HINT),
        ("Aim with the mouse; your cursor is the index fingertip.", Color::White),
        ("Pinch (hold a mouse button) or make a fist (hold F) to shoot.", Color::White),
        ("Don't let targets cross the screen. Grab 💣 to clear the field.", Color::White),
        ("", C_HINT),
        ("ENTER / S : Start      Q : Quit", Color::Yellow),
    ];

    let start_row = cy.saturating_sub(lines.len() as u16 / 2 + 1);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    if let Some(err) = error {
        let msg = format!("Could not start hand tracking: {err}");
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + lines.len() as u16 + 1))?;
        out.queue(style::SetForegroundColor(C_ERROR))?;
        out.queue(Print(&msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    hud: &HudSnapshot,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", hud.score);
    let level_line = format!("Reached level {}", hud.level);

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (level_line.as_str(), Color::DarkGrey),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
