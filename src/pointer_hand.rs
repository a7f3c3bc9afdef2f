//! Mouse-driven stand-in for a camera hand tracker.
//!
//! The terminal mouse position becomes the index fingertip of a synthetic
//! 21-point hand.  Holding a mouse button closes the thumb onto the index
//! tip (pinch); holding F curls all four fingers (fist); H hides the hand
//! as if it left the camera frame.

use std::collections::HashMap;
use std::io::stdout;

use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEvent, MouseEventKind,
    },
    ExecutableCommand,
};
use gesture_shooter::error::GameError;
use gesture_shooter::perception::*;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 8;

/// Horizontal spacing between finger columns (normalized).
const FINGER_SPREAD: f32 = 0.03;

/// (mcp, pip, dip, tip, column) per non-thumb finger.
const FINGER_CHAINS: [(usize, usize, usize, usize, f32); 4] = [
    (INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP, 0.0),
    (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP, 1.0),
    (RING_MCP, RING_PIP, RING_DIP, RING_TIP, 2.0),
    (PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP, 3.0),
];

pub struct PointerHand {
    slot: LandmarkSlot,
    /// Play-grid size in cells.
    cols: u16,
    rows: u16,
    /// Cursor cell within the play grid.
    cursor: (u16, u16),
    /// First terminal row of the play grid.
    grid_top: u16,
    button_down: bool,
    key_frame: HashMap<KeyCode, u64>,
    visible: bool,
    capturing: bool,
}

impl PointerHand {
    pub fn new(cols: u16, rows: u16, grid_top: u16) -> Self {
        Self {
            slot: LandmarkSlot::new(),
            cols: cols.max(1),
            rows: rows.max(1),
            cursor: (cols / 2, rows / 2),
            grid_top,
            button_down: false,
            key_frame: HashMap::new(),
            visible: true,
            capturing: false,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.cursor = (self.cursor.0.min(self.cols - 1), self.cursor.1.min(self.rows - 1));
    }

    /// Feed one terminal event seen during `frame`.
    pub fn handle_event(&mut self, event: &Event, frame: u64) {
        match event {
            Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                let row = row.saturating_sub(self.grid_top);
                self.cursor = ((*column).min(self.cols - 1), row.min(self.rows - 1));
                match kind {
                    MouseEventKind::Down(_) => self.button_down = true,
                    MouseEventKind::Up(_) => self.button_down = false,
                    _ => {}
                }
            }
            Event::Key(KeyEvent { code, kind, .. }) => match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if *kind == KeyEventKind::Press && is_hide_key(code) {
                        self.visible = !self.visible;
                    }
                    self.key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(code);
                }
            },
            _ => {}
        }
    }

    /// Publish the pose for this frame.  Call once per frame after input.
    pub fn update(&mut self, frame: u64) {
        if !self.capturing {
            return;
        }
        let fist = [KeyCode::Char('f'), KeyCode::Char('F')]
            .iter()
            .any(|k| self.is_held(k, frame));
        let hand = self.visible.then(|| self.pose(self.button_down, fist));
        self.slot.publish(hand);
    }

    fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn fingertip(&self) -> Landmark {
        Landmark::new(
            (self.cursor.0 as f32 + 0.5) / self.cols as f32,
            (self.cursor.1 as f32 + 0.5) / self.rows as f32,
        )
    }

    /// Build a hand whose index tip sits under the cursor.
    fn pose(&self, pinch: bool, fist: bool) -> HandLandmarks {
        let tip = self.fingertip();
        let at = |dx: f32, dy: f32| {
            Landmark::new((tip.x + dx).clamp(0.0, 1.0), (tip.y + dy).clamp(0.0, 1.0))
        };
        let mut hand = HandLandmarks::new([Landmark::default(); LANDMARK_COUNT]);

        // Open: tips far from the wrist.  Fist: wrist pulled close under the
        // tips and joints folded back above them.
        let (wrist_dy, mcp_dy, pip_dy, dip_dy) = if fist {
            (0.12, 0.03, -0.03, -0.015)
        } else {
            (0.30, 0.15, 0.09, 0.045)
        };
        let wrist_dx = 1.5 * FINGER_SPREAD;
        hand.set(WRIST, at(wrist_dx, wrist_dy));

        for (mcp, pip, dip, finger_tip, column) in FINGER_CHAINS {
            let dx = column * FINGER_SPREAD;
            hand.set(mcp, at(dx, mcp_dy));
            hand.set(pip, at(dx, pip_dy));
            hand.set(dip, at(dx, dip_dy));
            hand.set(finger_tip, at(dx, 0.0));
        }

        hand.set(THUMB_CMC, at(wrist_dx - 0.04, wrist_dy - 0.03));
        hand.set(THUMB_MCP, at(wrist_dx - 0.07, wrist_dy - 0.07));
        hand.set(THUMB_IP, at(wrist_dx - 0.09, wrist_dy - 0.11));
        let thumb_tip = if pinch { at(0.01, 0.0) } else { at(-0.12, 0.14) };
        hand.set(THUMB_TIP, thumb_tip);

        hand
    }
}

fn is_hide_key(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Char('h') | KeyCode::Char('H'))
}

impl PerceptionSource for PointerHand {
    fn start(&mut self) -> Result<(), GameError> {
        stdout()
            .execute(EnableMouseCapture)
            .map_err(|e| GameError::PerceptionUnavailable(format!("mouse capture: {e}")))?;
        self.capturing = true;
        self.visible = true;
        log::info!("pointer hand tracking started on a {}x{} grid", self.cols, self.rows);
        Ok(())
    }

    fn stop(&mut self) {
        if let Err(e) = stdout().execute(DisableMouseCapture) {
            log::warn!("could not release mouse capture: {e}");
        }
        self.capturing = false;
        self.button_down = false;
        self.slot.clear();
    }

    fn latest(&self) -> Option<&HandLandmarks> {
        self.slot.latest()
    }
}
