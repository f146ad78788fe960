/// Easing curves for the show/hide radius animation.
pub mod ease;
/// Pointer smoothing and radius animation, advanced once per frame.
pub mod follow;
/// Idle/animating frame scheduling.
pub mod frame_loop;
