//! Drivers around [`pf_detect::PupilPipeline`].
//!
//! Frames come from a [`FrameSource`] (a directory of exported frames or a
//! single still), are cropped to the configured window, run through the
//! pipeline and handed to a [`FrameSink`]. [`BenchHarness`] owns that loop
//! and reports frame count, wall time and average FPS. [`sweep`] scores a
//! grid of Canny threshold and median aperture settings over a folder.

pub mod config;
pub mod harness;
pub mod io;
pub mod sink;
pub mod source;
pub mod stop;
pub mod sweep;

pub use config::RunnerConfig;
pub use harness::{BenchHarness, BenchReport, StopReason};
pub use sink::{FrameSink, NullSink, PngSequenceSink};
pub use source::{
    FrameSource, ImageSequenceSource, StillSource, check_source_dims, list_frame_files, open_source,
};
pub use stop::{StopSignal, is_quit_command, spawn_stdin_watcher, watch_lines};
pub use sweep::{SweepCell, SweepGrid, SweepOutcome, run_sweep};
