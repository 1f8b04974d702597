use std::time::Duration;

use ratatui::layout::Rect;
use term_popup::popup::{Anchor, Geometry, Phase, Popup, PopupEvent};

const VIEWPORT: Rect = Rect {
    x: 0,
    y: 0,
    width: 80,
    height: 24,
};

fn animated_popup() -> Popup {
    let mut popup = Popup::new();
    popup.set_preferred_size(40, 12);
    popup.set_transition_duration(Duration::from_millis(100));
    popup.sync(VIEWPORT);
    popup
}

#[test]
fn full_cycle_returns_to_the_canonical_closed_geometry() {
    let mut popup = animated_popup();
    popup.open();
    assert_eq!(popup.phase(), Phase::Opening);
    assert!(popup.transition_in_flight());

    popup.tick(Duration::from_millis(50));
    assert_eq!(popup.phase(), Phase::Opening);
    let midway = popup.sync(VIEWPORT);
    assert!(midway.y > -12 && midway.y < 6, "midway at {midway:?}");

    popup.tick(Duration::from_millis(60));
    assert_eq!(popup.phase(), Phase::Open);
    assert_eq!(popup.sync(VIEWPORT).y, 6);

    popup.close();
    assert_eq!(popup.phase(), Phase::Closing);
    popup.tick(Duration::from_millis(200));
    assert_eq!(popup.phase(), Phase::Closed);
    assert!(popup.geometry().is_offscreen_default());
    assert_eq!(
        popup.drain_events(),
        vec![PopupEvent::Open, PopupEvent::Close]
    );
}

#[test]
fn reopening_mid_close_recentres_and_keeps_the_phase_opening() {
    let mut popup = animated_popup();
    popup.open();
    popup.tick(Duration::from_millis(200));
    popup.close();
    popup.tick(Duration::from_millis(30));
    popup.open();
    assert_eq!(popup.phase(), Phase::Opening);
    assert_eq!(popup.geometry().transform, Geometry::centered_transform());
    popup.tick(Duration::from_millis(200));
    assert_eq!(popup.phase(), Phase::Open);
}

#[test]
fn open_twice_emits_one_event() {
    let mut popup = animated_popup();
    popup.open();
    popup.open();
    popup.close();
    popup.close();
    assert_eq!(
        popup.drain_events(),
        vec![PopupEvent::Open, PopupEvent::Close]
    );
}

#[test]
fn close_after_drag_exits_from_the_dragged_position() {
    use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    let mouse = |kind, column, row| {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    };

    let mut popup = animated_popup();
    popup.set_movable(true);
    popup.open();
    popup.tick(Duration::from_millis(200));
    popup.sync(VIEWPORT);

    popup.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 22, 6));
    popup.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 12, 3));
    popup.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 12, 3));
    assert_eq!(popup.geometry().anchor, Anchor::Origin);

    popup.close();
    assert_eq!(
        popup.geometry().transform_css(),
        "translate(min(100vw - 100%, 12.50vw), min(100vh - 100%, 12.50vh)) translate(0, -100vh)"
    );
    popup.tick(Duration::from_millis(200));
    assert!(popup.geometry().is_offscreen_default());
}

#[test]
fn resized_panel_forgets_its_size_after_closing() {
    use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    let mouse = |kind, column, row| {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    };

    let mut popup = animated_popup();
    popup.set_transition_duration(Duration::ZERO);
    popup.set_resizable(true);
    popup.open();
    assert_eq!(popup.phase(), Phase::Open);

    popup.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 59, 17));
    popup.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 10, 2));
    popup.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 10, 2));
    // Dragging past the panel origin leaves a negative, unclamped size.
    assert_eq!(popup.geometry().width, Some(-9));
    assert_eq!(popup.sync(VIEWPORT).width, 0);

    popup.close();
    assert_eq!(popup.phase(), Phase::Closed);
    assert_eq!(popup.geometry().width, None);
}
