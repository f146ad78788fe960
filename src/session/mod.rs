/// Frame-driven lens session tying pointer input, animation, rendering and overlays together.
pub mod lens_session;
