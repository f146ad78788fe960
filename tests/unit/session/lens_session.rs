use super::*;
use crate::foundation::core::Rect;
use crate::render::surface::Surface;

fn config(show_frames: u32) -> LensConfig {
    LensConfig {
        radius: 20.0,
        follow: 1.0,
        show_frames,
        ..LensConfig::default()
    }
}

fn session(show_frames: u32) -> LensSession {
    let mut s = LensSession::new(config(show_frames), Viewport::new(200.0, 100.0)).unwrap();
    s.set_image(SourceImage::solid(200, 100, [200, 200, 200, 255]).unwrap());
    s
}

#[test]
fn idle_without_pointer() {
    let mut s = session(4);
    let mut target = Surface::new(200, 100);
    let r = s.tick(&mut target);
    assert_eq!(r.outcome, Some(RenderOutcome::Hidden));
    assert_eq!(r.transition, LoopTransition::StayIdle);
    assert!(!s.is_animating());
}

#[test]
fn show_animation_grows_radius_to_full() {
    let mut s = session(4);
    let mut target = Surface::new(200, 100);
    s.pointer_move(100.0, 50.0);

    let first = s.tick(&mut target);
    assert_eq!(first.transition, LoopTransition::Start);
    assert!(first.radius > 0.0 && first.radius < 20.0);

    let mut last = first;
    for _ in 0..3 {
        last = s.tick(&mut target);
    }
    assert_eq!(last.radius, 20.0);
    assert_eq!(
        last.outcome,
        Some(RenderOutcome::Drawn(crate::lens::published::LensCircle {
            x: 100.0,
            y: 50.0,
            r: 20.0
        }))
    );
    assert_eq!(last.transition, LoopTransition::Continue);
}

#[test]
fn leave_hides_after_animation_and_stops_loop() {
    let mut s = session(2);
    let mut target = Surface::new(200, 100);
    s.pointer_move(100.0, 50.0);
    s.tick(&mut target);
    s.tick(&mut target);
    assert!(s.renderer().published().is_some());

    s.pointer_leave();
    let shrinking = s.tick(&mut target);
    assert!(matches!(shrinking.outcome, Some(RenderOutcome::Drawn(_))));
    assert!(shrinking.radius < 20.0);

    let gone = s.tick(&mut target);
    assert_eq!(gone.outcome, Some(RenderOutcome::Hidden));
    assert_eq!(s.renderer().published(), None);
    assert_eq!(gone.transition, LoopTransition::Stop);
    assert!(!s.is_animating());
}

#[test]
fn overlays_see_the_same_frame_circle() {
    let mut s = session(0);
    let id = s.attach_overlay(vec![
        FloatingTag::new("near", Rect::new(110.0, 40.0, 130.0, 60.0)),
        FloatingTag::new("far", Rect::new(0.0, 0.0, 10.0, 10.0)),
    ]);
    let mut target = Surface::new(200, 100);

    s.pointer_move(100.0, 50.0);
    let r = s.tick(&mut target);
    assert_eq!(r.visible_tags, 1);
    let ids: Vec<_> = s.overlay(id).unwrap().visible_ids().collect();
    assert_eq!(ids, ["near"]);

    s.pointer_move(5.0, 5.0);
    let r = s.tick(&mut target);
    assert_eq!(r.visible_tags, 1);
    let ids: Vec<_> = s.overlay(id).unwrap().visible_ids().collect();
    assert_eq!(ids, ["far"]);

    s.pointer_leave();
    let r = s.tick(&mut target);
    assert_eq!(r.visible_tags, 0);
}

#[test]
fn unavailable_target_is_reported_not_fatal() {
    let mut s = session(0);
    s.pointer_move(100.0, 50.0);
    let mut broken = Surface {
        width: 200,
        height: 100,
        data: Vec::new(),
    };
    let r = s.tick(&mut broken);
    assert!(r.outcome.is_none());
    assert!(matches!(r.error, Some(LensError::RenderTargetUnavailable(_))));

    let mut good = Surface::new(200, 100);
    let r = s.tick(&mut good);
    assert!(matches!(r.outcome, Some(RenderOutcome::Drawn(_))));
}

#[test]
fn non_finite_pointer_keeps_last_coordinate() {
    let mut s = session(0);
    let mut target = Surface::new(200, 100);
    s.pointer_move(40.0, 30.0);
    s.pointer_move(f64::NAN, 60.0);
    let r = s.tick(&mut target);
    assert_eq!(r.center, Some(Point::new(40.0, 60.0)));
}

#[test]
fn reentry_snaps_to_new_pointer() {
    let mut s = LensSession::new(
        LensConfig {
            follow: 0.1,
            show_frames: 0,
            ..config(0)
        },
        Viewport::new(200.0, 100.0),
    )
    .unwrap();
    s.set_image(SourceImage::solid(4, 4, [0, 0, 0, 255]).unwrap());
    let mut target = Surface::new(200, 100);
    s.pointer_move(10.0, 10.0);
    s.tick(&mut target);
    s.pointer_leave();
    s.tick(&mut target);
    s.pointer_move(150.0, 80.0);
    let r = s.tick(&mut target);
    assert_eq!(r.center, Some(Point::new(150.0, 80.0)));
}
