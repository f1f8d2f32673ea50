//! Animation core for prismloop.
//!
//! Everything in this crate is plain state arithmetic: no GPU, no window
//! system, no timers. Hosts feed in elapsed time, pointer positions, and
//! visibility transitions; the crate answers with rotation matrices, scroll
//! offsets, and start/stop decisions. That split keeps every motion rule
//! testable with synthetic time.
//!
//! ```text
//!   scenecfg::SceneConfig
//!          │ PrismParams::resolve
//!          ▼
//!   PrismAnimator ──▶ FrameUpdate (rotation, wobble flag, keep-running)
//!   LoopDriver    ──▶ StartLoop / StopLoop
//!   Marquee       ──▶ wrapped scroll offset
//! ```

mod animator;
mod driver;
mod marquee;
mod params;
mod rotation;

pub use animator::{FrameUpdate, Pointer, PrismAnimator};
pub use driver::{LoopAction, LoopDriver, LoopEvent, LoopState};
pub use marquee::{Marquee, SequenceLayout, SEQUENCE_COPIES};
pub use params::{effective_dpr, pixel_scale, Environment, PrismParams};
pub use rotation::{mat3_from_euler, Mat3, MAT3_IDENTITY};
