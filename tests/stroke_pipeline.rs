use doodle_pad::canvas::brush::{parse_width, DEFAULT_WIDTH};
use doodle_pad::canvas::{Brush, DrawingSurface, StrokeTracker};
use eframe::egui::{Color32, Pos2};

fn ink_at(surface: &DrawingSurface, x: u32, y: u32) -> bool {
    surface.image().get_pixel(x, y).0[3] != 0
}

#[test]
fn pointer_sequence_rasterizes_a_connected_polyline() {
    let mut surface = DrawingSurface::new(128, 128);
    let mut tracker = StrokeTracker::default();
    let brush = Brush::default();

    let points = [
        Pos2::new(10.0, 10.0),
        Pos2::new(40.0, 20.0),
        Pos2::new(60.0, 70.0),
        Pos2::new(100.0, 90.0),
    ];

    tracker.pointer_down(points[0]);
    for pos in &points[1..] {
        let (start, end) = tracker.pointer_moved(*pos).expect("active stroke");
        surface.line(start, end, brush.color, brush.width());
    }
    tracker.pointer_up();

    // Every recorded position is on the polyline.
    for pos in points {
        assert!(
            ink_at(&surface, pos.x as u32, pos.y as u32),
            "no ink at recorded position {pos:?}"
        );
    }
}

#[test]
fn each_segment_uses_the_settings_active_when_it_was_drawn() {
    let mut surface = DrawingSurface::new(64, 64);
    let mut tracker = StrokeTracker::default();
    let mut brush = Brush {
        color: Color32::RED,
        ..Brush::default()
    };

    tracker.pointer_down(Pos2::new(5.0, 10.0));
    let (start, end) = tracker.pointer_moved(Pos2::new(25.0, 10.0)).expect("segment");
    surface.line(start, end, brush.color, brush.width());

    // Color changes mid-stroke; the next segment picks it up.
    brush.color = Color32::BLUE;
    let (start, end) = tracker.pointer_moved(Pos2::new(45.0, 10.0)).expect("segment");
    surface.line(start, end, brush.color, brush.width());

    let first_half = surface.image().get_pixel(15, 10);
    let second_half = surface.image().get_pixel(40, 10);
    assert_eq!(first_half.0[0], 255, "first segment should be red");
    assert_eq!(second_half.0[2], 255, "second segment should be blue");
}

#[test]
fn no_ink_between_release_and_the_next_press() {
    let mut surface = DrawingSurface::new(128, 128);
    let mut tracker = StrokeTracker::default();
    let brush = Brush::default();

    tracker.pointer_down(Pos2::new(10.0, 10.0));
    let (start, end) = tracker.pointer_moved(Pos2::new(20.0, 10.0)).expect("segment");
    surface.line(start, end, brush.color, brush.width());
    tracker.pointer_up();

    // Moves while the button is up must not draw anything.
    for pos in [Pos2::new(60.0, 60.0), Pos2::new(100.0, 100.0)] {
        assert_eq!(tracker.pointer_moved(pos), None);
    }
    assert!(!ink_at(&surface, 60, 60));
    assert!(!ink_at(&surface, 100, 100));

    // A fresh press starts a new stroke with no segment back to (20, 10).
    tracker.pointer_down(Pos2::new(100.0, 100.0));
    let (start, end) = tracker
        .pointer_moved(Pos2::new(110.0, 100.0))
        .expect("segment");
    surface.line(start, end, brush.color, brush.width());
    assert!(!ink_at(&surface, 60, 55), "phantom segment across the gap");
}

#[test]
fn invalid_width_text_falls_back_to_default_for_the_next_segment() {
    let brush = Brush {
        width_input: "thick".into(),
        ..Brush::default()
    };
    assert_eq!(brush.width(), DEFAULT_WIDTH);
    assert_eq!(parse_width("thick"), DEFAULT_WIDTH);

    let mut surface = DrawingSurface::new(32, 32);
    let mut tracker = StrokeTracker::default();
    tracker.pointer_down(Pos2::new(4.0, 16.0));
    let (start, end) = tracker.pointer_moved(Pos2::new(28.0, 16.0)).expect("segment");
    surface.line(start, end, brush.color, brush.width());

    // Default width 3 covers one pixel above and below the centerline.
    assert!(surface.image().get_pixel(16, 15).0[3] != 0);
    assert!(surface.image().get_pixel(16, 17).0[3] != 0);
    assert!(surface.image().get_pixel(16, 11).0[3] == 0);
}
