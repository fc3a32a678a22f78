//! Hand photo processing: crease map, silhouette mask and glow compositing.
//!
//! [`edges`] and [`segmentation`] are the two independent processing units;
//! [`pipeline`] runs them together and [`composite`] renders their outputs.
//! [`capture`] and [`output`] connect the pipeline to cameras, files and
//! v4l2loopback devices.

pub mod capture;
pub mod composite;
pub mod config;
pub mod edges;
pub mod error;
pub mod frame;
pub mod landmarks;
pub mod output;
pub mod pipeline;
pub mod segmentation;

pub use config::PipelineConfig;
pub use edges::{detect_edges, EdgeClass, EdgeMask};
pub use error::FrameError;
pub use frame::Frame;
pub use pipeline::{process, Pipeline, PipelineOutput};
pub use segmentation::{segment_region, AlphaMask, GuidePoint};
