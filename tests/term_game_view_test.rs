use drop_tetris::core::{GameState, ShapeCycle};
use drop_tetris::term::{GameView, HudStatus, Presenter, Viewport};
use drop_tetris::types::{ShapeKind, FILLED};

fn started(script: &str) -> GameState {
    let mut state = GameState::new(Box::new(ShapeCycle::parse(script).unwrap()));
    state.start();
    state
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::with_seed(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::with_seed(1).snapshot();
    snap.board[19][0] = FILLED;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_spawned_piece_partially() {
    // T at y=-1: only its bottom row is on the board.
    let snap = started("T").snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    let color = ShapeKind::T.color();
    for x in [7u16, 8, 9, 10, 11, 12] {
        assert_eq!(fb.get(x, 1).unwrap().style.fg, color, "x={}", x);
    }
    assert_ne!(fb.get(13, 1).unwrap().style.fg, color);
}

#[test]
fn term_view_side_panel_shows_next_and_hold() {
    let mut state = started("TIO");
    state.hold();
    let snap = state.snapshot();

    let fb = GameView::default().render(&snap, Viewport::new(60, 24));
    assert!(fb.contains_text("NEXT"));
    assert!(fb.contains_text("HOLD"));

    // The hold preview is dimmed until the next lock.
    let hold_row = (0..24).find(|&y| fb.row_text(y).contains("HOLD")).unwrap();
    let dimmed = (0..60)
        .filter_map(|x| fb.get(x, hold_row + 1))
        .find(|c| c.ch == '█')
        .unwrap();
    assert!(dimmed.style.dim);
    assert_eq!(dimmed.style.fg, ShapeKind::T.color());
}

#[test]
fn term_view_sound_indicator() {
    let snap = started("T").snapshot();
    let view = GameView::default();
    let mut fb = view.render(&snap, Viewport::new(60, 24));
    assert!(fb.contains_text("SOUND ON"));

    view.render_into_with_hud(&snap, HudStatus { muted: true }, Viewport::new(60, 24), &mut fb);
    assert!(fb.contains_text("SOUND OFF"));
}

#[test]
fn term_view_tiny_viewport_does_not_panic() {
    let snap = started("I").snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(5, 3));
    assert_eq!((fb.width(), fb.height()), (5, 3));
}

#[test]
fn presenter_only_rewrites_changed_cells() {
    let view = GameView::default();
    let vp = Viewport::new(40, 24);
    let mut presenter = Presenter::new(Vec::new());

    let mut state = started("O");
    let mut fb = view.render(&state.snapshot(), vp);
    presenter.present(&mut fb).unwrap();
    let full = presenter.get_ref().len();

    state.move_left();
    view.render_into(&state.snapshot(), vp, &mut fb);
    presenter.present(&mut fb).unwrap();
    let diff = presenter.get_ref().len() - full;

    assert!(diff > 0);
    assert!(diff < full / 4);
}
