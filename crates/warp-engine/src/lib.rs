//! HorizonLock Warp Engine
//!
//! Applies a per-frame rotation-and-scale transform to RGBA8 pixel
//! buffers. Purely functional: each call takes a frame and a transform
//! and produces a freshly allocated output frame of identical declared
//! dimensions, so downstream encoders never see a varying frame size.

pub mod warper;

pub use warper::FrameWarper;
