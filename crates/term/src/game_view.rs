//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O) and reads the snapshot only.

use crate::core::shapes::cells;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GamePhase, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end state shown next to the game that the snapshot does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudStatus {
    pub muted: bool,
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
/// Locked cells have no shape identity, so they share one color.
const LOCKED_FG: Rgb = Rgb::new(148, 163, 184);
const GRID_FG: Rgb = Rgb::new(90, 90, 100);

/// Draws the board, the falling piece, the side panel and overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Where the board frame landed in the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_hud(snap, HudStatus::default(), viewport, fb);
    }

    pub fn render_into_with_hud(
        &self,
        snap: &GameSnapshot,
        hud: HudStatus,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = BOARD_WIDTH as u16 * self.cell_w;
        let board_px_h = BOARD_HEIGHT as u16 * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_px_w + 2) / 2,
            y: viewport.height.saturating_sub(board_px_h + 2) / 2,
            w: board_px_w + 2,
            h: board_px_h + 2,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(GRID_FG, PLAYFIELD_BG),
        );
        draw_border(fb, frame);

        let grid = CellStyle::new(GRID_FG, PLAYFIELD_BG).dim();
        let locked = CellStyle::new(LOCKED_FG, PLAYFIELD_BG);
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let (ch, style) = if cell == EMPTY { ('·', grid) } else { ('█', locked) };
                self.fill_cell(fb, frame, x as i8, y as i8, ch, style);
            }
        }

        if let Some(active) = snap.active {
            let style = CellStyle::new(active.kind.color(), PLAYFIELD_BG).bold();
            for (dx, dy) in cells(active.kind, active.rotation) {
                self.fill_cell(fb, frame, active.x + dx, active.y + dy, '█', style);
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, frame);

        let overlay = match snap.phase {
            GamePhase::Idle => Some("PRESS ENTER"),
            GamePhase::Paused => Some("PAUSED"),
            GamePhase::Over => Some("GAME OVER"),
            GamePhase::Running => None,
        };
        if let Some(text) = overlay {
            draw_overlay_text(fb, frame, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Paint one board cell; cells off the board (e.g. above it) are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: HudStatus,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        if snap.combo > 1 {
            let w = fb.put_str(panel_x, y, "COMBO x", label);
            fb.put_u32(panel_x + w, y, snap.combo, label);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        draw_preview(fb, panel_x, y + 1, snap.next, false);
        y = y.saturating_add(4);

        fb.put_str(panel_x, y, "HOLD", label);
        draw_preview(fb, panel_x, y + 1, snap.hold, !snap.can_hold);
        y = y.saturating_add(4);

        fb.put_str(panel_x, y, "SOUND", label);
        fb.put_str(panel_x + 6, y, if hud.muted { "OFF" } else { "ON" }, value);
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Spawn-orientation bitmap of a shape, two columns per cell
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, kind: Option<ShapeKind>, dimmed: bool) {
    let Some(kind) = kind else {
        fb.put_str(x, y, "-", CellStyle::default().dim());
        return;
    };
    let mut style = CellStyle::new(kind.color(), Rgb::new(0, 0, 0));
    if dimmed {
        style = style.dim();
    }
    for (dx, dy) in cells(kind, 0) {
        let px = x + dx as u16 * 2;
        fb.fill_rect(px, y + dy as u16, 2, 1, '█', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str(x, mid_y, text, style);
}
