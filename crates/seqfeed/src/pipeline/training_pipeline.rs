//! # Training Data Pipeline

use crate::{
    batching::{BatchIterator, BatchedDataset},
    embedding::{EmbeddingMatrix, load_word2vec_embedding_path},
    errors::SeqfeedResult,
    pipeline::pipeline_config::{PipelineConfig, ResourcePaths},
    types::{TokenType, token_from_index},
    vocab::{VocabTables, count_vocab_lines_path, create_vocab_tables},
};

/// The vocab tables, batched dataset and embedding source for a config.
#[derive(Debug, Clone)]
pub struct Pipeline<T: TokenType> {
    config: PipelineConfig,
    paths: ResourcePaths,
    vocab_size: usize,
    dataset: BatchedDataset<T>,
}

impl<T: TokenType> Pipeline<T> {
    /// Initialize a pipeline.
    ///
    /// Counts the source vocabulary and builds both tables with
    /// the unknown id set to that count, and padding one past it.
    /// The corpus and the word vectors are not read here.
    pub fn init(config: PipelineConfig) -> SeqfeedResult<Self> {
        config.embedding.validate()?;
        let paths = config.resolved_paths()?;

        let vocab_size = count_vocab_lines_path(&paths.src_vocab_file)?;
        let unknown_id: T = token_from_index(vocab_size)?;
        log::info!(
            "source vocab {}: {} tokens",
            paths.src_vocab_file.display(),
            vocab_size
        );

        let tables = create_vocab_tables(
            &paths.src_vocab_file,
            &paths.tgt_vocab_file,
            Some(unknown_id),
            Some(unknown_id),
            config.share_vocab,
        )?;

        let dataset = BatchedDataset::new(
            &paths.src_file,
            &paths.tgt_file,
            tables,
            config.batching.clone(),
        )?;

        Ok(Self {
            config,
            paths,
            vocab_size,
            dataset,
        })
    }

    /// The config.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The resolved resource paths.
    pub fn paths(&self) -> &ResourcePaths {
        &self.paths
    }

    /// The source vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// The vocab tables.
    pub fn tables(&self) -> &VocabTables<T> {
        self.dataset.tables()
    }

    /// The batched dataset.
    pub fn dataset(&self) -> &BatchedDataset<T> {
        &self.dataset
    }

    /// Start a new pass over the corpus.
    pub fn iter(&self) -> SeqfeedResult<BatchIterator<T>> {
        self.dataset.iter()
    }

    /// Load the source embedding matrix.
    ///
    /// Reads the whole word vector file on every call.
    pub fn load_embedding(&self) -> SeqfeedResult<EmbeddingMatrix> {
        load_word2vec_embedding_path(
            &self.paths.word_embedding_file,
            self.vocab_size,
            &self.config.embedding,
        )
    }
}
