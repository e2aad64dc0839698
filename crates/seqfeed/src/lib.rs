//! # `seqfeed` Seq2Seq Training Data Pipeline
//!
//! This crate turns a parallel text corpus into padded, length-bucketed
//! mini-batches of token ids, and loads pretrained word vectors into an
//! embedding matrix aligned with the vocabulary.
//!
//! See:
//! * [`vocab`] to build source / target lookup tables.
//! * [`corpus`] to read aligned sentence pairs.
//! * [`batching`] to shuffle, bucket and pad batches.
//! * [`embedding`] to load word vectors.
//! * [`pipeline`] to wire all of the above from a JSON config.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
#![doc = document_features::document_features!()]
//!
//! ## Building Batches
//!
//! ```rust,no_run
//! use seqfeed::pipeline::{Pipeline, PipelineConfig};
//!
//! fn example() -> seqfeed::errors::SeqfeedResult<()> {
//!     let config = PipelineConfig::load_json_path("pipeline.json")?;
//!     let pipeline: Pipeline<u32> = Pipeline::init(config)?;
//!
//!     for batch in pipeline.iter()? {
//!         let batch = batch?;
//!         println!("bucket {}: {:?}", batch.bucket, batch.source.shape());
//!     }
//!
//!     let embedding = pipeline.load_embedding()?;
//!     println!("{:?}", embedding.shape());
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod batching;
pub mod corpus;
pub mod embedding;
pub mod errors;
pub mod pipeline;
pub mod types;
pub mod vocab;
