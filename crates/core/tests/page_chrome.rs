//! Page chrome driven the way a page would drive it

use plexus_core::core_types::{Percent, Pixels, Seconds, Vec2};
use plexus_core::ui::{
    BackgroundFade, Carousel, CursorFollower, CursorVariant, FlowPointer, LoadProgress,
    LoaderPhase, ScrollReveal, TextScramble,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_loader_reaches_full_while_assets_trickle_in() {
    let mut loader = LoadProgress::default();
    let frame = Seconds::new(1.0 / 60.0);
    let mut last = Percent::ZERO;

    for i in 0..600 {
        // Assets arrive in bursts over the first five seconds
        loader.report(((i / 30) * 10) as f32);
        loader.advance(frame);
        assert!(loader.shown() >= last);
        assert!(loader.shown() <= Percent::FULL);
        last = loader.shown();
    }

    assert_eq!(loader.shown(), Percent::FULL);
    assert_eq!(loader.phase(), LoaderPhase::Dismissed);
}

#[test]
fn test_cursor_tracks_hover_changes() {
    let mut cursor = CursorFollower::default();
    let frame = Seconds::new(1.0 / 60.0);

    cursor.set_pointer(Pixels::new(640.0), Pixels::new(360.0));
    for _ in 0..90 {
        cursor.update(frame);
    }
    let resting = cursor.state();
    assert!((resting.position.x - 636.0).abs() < 0.5);
    assert!((resting.scale - 1.0).abs() < 1e-2);

    cursor.set_variant(CursorVariant::Button);
    for _ in 0..90 {
        cursor.update(frame);
    }
    assert!((cursor.state().scale - 1.5).abs() < 1e-2);

    cursor.set_variant(CursorVariant::Text);
    for _ in 0..90 {
        cursor.update(frame);
    }
    assert!(cursor.state().opacity < 1e-2);
}

#[test]
fn test_scramble_label_settles() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut label = TextScramble::new("VIEW PROJECT");
    assert!(label.start());

    let mut ticks = 0;
    while label.is_running() {
        let shown = label.tick(&mut rng).to_string();
        assert_eq!(shown.chars().count(), 12);
        assert_eq!(shown.chars().nth(4), Some(' '));
        ticks += 1;
    }

    assert_eq!(label.display(), "VIEW PROJECT");
    assert_eq!(ticks, 3 * 12 + 1);
}

/// Fraction of a section `[top, top + height)` inside a viewport of `vh`
fn visible_ratio(top: f32, height: f32, vh: f32) -> f32 {
    let visible = (top + height).min(vh) - top.max(0.0);
    (visible / height).max(0.0)
}

#[test]
fn test_scrolling_past_project_section() {
    let vh = 1000.0;
    let (section_top, section_height) = (2000.0, 1500.0);
    let frame = Seconds::new(1.0 / 60.0);

    let mut reveal = ScrollReveal::default();
    let mut fade = BackgroundFade::default();
    let mut hidden_at = None;
    let mut shown_again_at = None;

    // Scroll down at 20 px per frame until the section is far above
    for step in 0..=250 {
        let scroll = step as f32 * 20.0;
        let top = section_top - scroll;

        reveal.observe(Pixels::new(top), Pixels::new(section_height), Pixels::new(vh));
        reveal.advance(frame);

        let was_hidden = fade.is_hidden();
        fade.observe(visible_ratio(top, section_height, vh));
        fade.advance(frame);

        if !was_hidden && fade.is_hidden() && hidden_at.is_none() {
            hidden_at = Some(scroll);
        }
        if was_hidden && !fade.is_hidden() && shown_again_at.is_none() {
            shown_again_at = Some(scroll);
        }
    }

    // Section top enters the viewport after 1000 px of scroll
    let hidden_at = hidden_at.expect("background never hid");
    assert!((1000.0..=1040.0).contains(&hidden_at));
    // And leaves it once it is fully above the viewport
    let shown_again_at = shown_again_at.expect("background never came back");
    assert!((3500.0..=3540.0).contains(&shown_again_at));

    assert!(reveal.is_finished());
    assert_eq!(reveal.style().opacity, 1.0);
    assert!(fade.opacity() > 0.99);
}

#[test]
fn test_carousel_between_clicks() {
    let mut carousel = Carousel::new(4).unwrap();
    let frame = Seconds::new(1.0 / 60.0);

    for _ in 0..(60 * 5 + 1) {
        carousel.advance(frame);
    }
    assert_eq!(carousel.index(), 1);

    // Clicking back just before the next auto-advance restarts the timer
    for _ in 0..(60 * 4) {
        carousel.advance(frame);
    }
    carousel.prev();
    assert_eq!(carousel.index(), 0);
    for _ in 0..(60 * 4) {
        carousel.advance(frame);
    }
    assert_eq!(carousel.index(), 0);
}

#[test]
fn test_flow_pointer_follows_drag_then_rests() {
    let mut flow = FlowPointer::default();
    let (w, h) = (Pixels::new(1200.0), Pixels::new(600.0));
    flow.resize(w, h);

    // Drag right at 600 px/s, one event per frame
    let mut t = 0.0;
    let mut x = 100.0;
    for _ in 0..30 {
        flow.pointer_moved(Pixels::new(x), Pixels::new(300.0), w, h, Seconds::new(t));
        let sample = flow.update();
        assert!(sample.mouse.x > 0.0);
        t += 1.0 / 60.0;
        x += 10.0;
    }
    // 10 px per 16.7 ms
    assert!((flow.sample().velocity.x - 0.6).abs() < 0.01);
    assert!(flow.sample().velocity.y.abs() < 1e-6);

    // Pointer stops: parked and decaying
    for _ in 0..120 {
        flow.update();
    }
    let rest = flow.sample();
    assert_eq!(rest.mouse, Vec2::new(-1.0, -1.0));
    assert!(rest.velocity.norm() < 1e-4);
}
