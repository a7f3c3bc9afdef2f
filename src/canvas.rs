//! Drawing surface boundary.
//!
//! Entities and the simulation loop draw through the `Canvas` trait so the
//! core never touches a concrete backend.  Coordinates are pixels, y-down.

use crate::geometry::Point;

// ── Colour ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const CROSSHAIR: Color = Color::rgb(0, 255, 0);
    pub const SHOT_FLASH: Color = Color::rgba(255, 255, 0, 0.5);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// HSL → RGB.  `hue` in degrees, `saturation` and `lightness` in `[0, 1]`.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(channel(r1), channel(g1), channel(b1))
    }
}

// ── Surface trait ─────────────────────────────────────────────────────────────

pub trait Canvas {
    /// Wipe the whole surface and reset offset and alpha.
    fn clear(&mut self);

    /// Translate every following draw call (screen shake).
    fn set_offset(&mut self, offset: Point);

    /// Global opacity multiplier for following draw calls.
    fn set_alpha(&mut self, alpha: f32);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, line_width: f32);

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, line_width: f32);

    fn fill_text(&mut self, text: &str, at: Point, color: Color);
}

// ── Recording canvas ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    SetOffset(Point),
    SetAlpha(f32),
    FillCircle { center: Point, radius: f32, color: Color },
    StrokeCircle { center: Point, radius: f32, color: Color, line_width: f32 },
    StrokeLine { from: Point, to: Point, color: Color, line_width: f32 },
    FillText { text: String, at: Point, color: Color },
}

/// A `Canvas` that keeps every call so a frame can be inspected or replayed.
#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay the recorded frame onto another surface.
    pub fn replay(&self, target: &mut impl Canvas) {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Clear => target.clear(),
                DrawCommand::SetOffset(p) => target.set_offset(*p),
                DrawCommand::SetAlpha(a) => target.set_alpha(*a),
                DrawCommand::FillCircle { center, radius, color } => {
                    target.fill_circle(*center, *radius, *color)
                }
                DrawCommand::StrokeCircle { center, radius, color, line_width } => {
                    target.stroke_circle(*center, *radius, *color, *line_width)
                }
                DrawCommand::StrokeLine { from, to, color, line_width } => {
                    target.stroke_line(*from, *to, *color, *line_width)
                }
                DrawCommand::FillText { text, at, color } => target.fill_text(text, *at, *color),
            }
        }
    }

    pub fn filled_circles(&self) -> impl Iterator<Item = (Point, f32, Color)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillCircle { center, radius, color } => Some((*center, *radius, *color)),
            _ => None,
        })
    }
}

impl Canvas for CommandBuffer {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn set_offset(&mut self, offset: Point) {
        self.commands.push(DrawCommand::SetOffset(offset));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::SetAlpha(alpha));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius, color, line_width });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeLine { from, to, color, line_width });
    }

    fn fill_text(&mut self, text: &str, at: Point, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
            color,
        });
    }
}
