//! Hand landmarks in, fingerspelled text out.
//!
//! A frame source yields 21-point hand skeletons; [`pipeline::FrameObserver`]
//! turns each into a [`text::DetectionEvent`] (space gesture or classified
//! letter) and a [`text::TextSession`] decides when held letters and pauses
//! become committed words and sentences.

pub mod capture;
pub mod classifier;
pub mod landmarks;
pub mod output;
pub mod pipeline;
pub mod text;
