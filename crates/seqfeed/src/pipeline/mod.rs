//! # Pipeline
//!
//! [`PipelineConfig`] names the resource files and options;
//! [`Pipeline`] wires them into vocab tables, a batched dataset,
//! and an embedding loader.
//!
//! ## Resource Directory
//!
//! Relative resource files resolve against, in order:
//! * `PipelineConfig::resource_dir`,
//! * `$SEQFEED_RESOURCE_DIR`,
//! * the working directory.
pub mod pipeline_config;
pub mod resource_paths;
pub mod training_pipeline;

#[doc(inline)]
pub use pipeline_config::{PipelineConfig, ResourcePaths};
#[doc(inline)]
pub use resource_paths::SEQFEED_RESOURCE_DIR;
#[doc(inline)]
pub use training_pipeline::Pipeline;
