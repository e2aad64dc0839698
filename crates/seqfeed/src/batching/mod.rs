//! # Bucketed Batching
//!
//! [`BatchedDataset`] / [`get_iterator`] build a [`BatchIterator`],
//! which yields padded [`BatchedInput`] mini-batches of examples of
//! similar length.
//!
//! ```rust,no_run
//! use seqfeed::{
//!     batching::{BatchIteratorOptions, BatchedDataset},
//!     vocab::create_vocab_tables,
//! };
//!
//! fn example() -> seqfeed::errors::SeqfeedResult<()> {
//!     let tables = create_vocab_tables::<u32, _, _>(
//!         "source_vocab.txt",
//!         "target_vocab.txt",
//!         None,
//!         None,
//!         false,
//!     )?;
//!     let options = BatchIteratorOptions::new(32).with_random_seed(Some(7));
//!     let dataset = BatchedDataset::new("source.txt", "target.txt", tables, options)?;
//!
//!     for batch in dataset.iter()? {
//!         let batch = batch?;
//!         println!("{:?}", batch.source.shape());
//!     }
//!     Ok(())
//! }
//! ```
pub mod batch_iterator;
pub mod batch_options;
pub mod bucketing;
pub mod padded_batch;
pub mod parallel_map;
pub mod shuffle;

#[doc(inline)]
pub use batch_iterator::{BatchIterator, BatchedDataset, ExampleEncoder, get_iterator};
#[doc(inline)]
pub use batch_options::BatchIteratorOptions;
#[doc(inline)]
pub use bucketing::{GroupByWindow, bucket_id, bucket_width};
#[doc(inline)]
pub use padded_batch::{BatchedInput, EncodedExample, PaddedMatrix};
#[doc(inline)]
pub use parallel_map::ChunkedMap;
#[doc(inline)]
pub use shuffle::ShuffleBuffer;
