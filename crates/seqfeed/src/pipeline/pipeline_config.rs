//! # Pipeline Configuration

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    batching::BatchIteratorOptions,
    embedding::EmbeddingOptions,
    errors::SeqfeedResult,
    pipeline::resource_paths::{SEQFEED_RESOURCE_CONFIG, join_resource},
};

/// Default source corpus file.
pub const DEFAULT_SRC_FILE: &str = "resource/source.txt";
/// Default target corpus file.
pub const DEFAULT_TGT_FILE: &str = "resource/target.txt";
/// Default source vocab file.
pub const DEFAULT_SRC_VOCAB_FILE: &str = "resource/source_vocab.txt";
/// Default target vocab file.
pub const DEFAULT_TGT_VOCAB_FILE: &str = "resource/target_vocab.txt";
/// Default pretrained word vector file.
pub const DEFAULT_WORD_EMBEDDING_FILE: &str = "resource/wiki.zh.vec";
/// Default pipeline batch size.
pub const DEFAULT_PIPELINE_BATCH_SIZE: usize = 3;

/// Resource files and options for a [`crate::pipeline::Pipeline`].
///
/// Relative files resolve against the resource directory;
/// see [`Self::resolved_paths`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Base directory for relative resource files.
    pub resource_dir: Option<String>,

    /// Source corpus.
    pub src_file: String,

    /// Target corpus.
    pub tgt_file: String,

    /// Source vocab.
    pub src_vocab_file: String,

    /// Target vocab.
    pub tgt_vocab_file: String,

    /// Pretrained word vectors, aligned with the source vocab.
    pub word_embedding_file: String,

    /// Use the source vocab for both sides.
    pub share_vocab: bool,

    /// Batch iterator options.
    pub batching: BatchIteratorOptions,

    /// Embedding loader options.
    pub embedding: EmbeddingOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            resource_dir: None,
            src_file: DEFAULT_SRC_FILE.to_string(),
            tgt_file: DEFAULT_TGT_FILE.to_string(),
            src_vocab_file: DEFAULT_SRC_VOCAB_FILE.to_string(),
            tgt_vocab_file: DEFAULT_TGT_VOCAB_FILE.to_string(),
            word_embedding_file: DEFAULT_WORD_EMBEDDING_FILE.to_string(),
            share_vocab: false,
            batching: BatchIteratorOptions::new(DEFAULT_PIPELINE_BATCH_SIZE),
            embedding: EmbeddingOptions::default(),
        }
    }
}

/// Fully resolved resource paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
    /// Source corpus.
    pub src_file: PathBuf,
    /// Target corpus.
    pub tgt_file: PathBuf,
    /// Source vocab.
    pub src_vocab_file: PathBuf,
    /// Target vocab.
    pub tgt_vocab_file: PathBuf,
    /// Pretrained word vectors.
    pub word_embedding_file: PathBuf,
}

impl PipelineConfig {
    /// Set the resource directory.
    pub fn with_resource_dir<S: Into<String>>(
        mut self,
        resource_dir: Option<S>,
    ) -> Self {
        self.resource_dir = resource_dir.map(Into::into);
        self
    }

    /// Set vocab sharing.
    pub fn with_share_vocab(
        mut self,
        share_vocab: bool,
    ) -> Self {
        self.share_vocab = share_vocab;
        self
    }

    /// Set the batch iterator options.
    pub fn with_batching(
        mut self,
        batching: BatchIteratorOptions,
    ) -> Self {
        self.batching = batching;
        self
    }

    /// Set the embedding options.
    pub fn with_embedding(
        mut self,
        embedding: EmbeddingOptions,
    ) -> Self {
        self.embedding = embedding;
        self
    }

    /// Load a config from a JSON file.
    ///
    /// Missing fields take their defaults.
    pub fn load_json_path<P: AsRef<Path>>(path: P) -> SeqfeedResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Save the config to a JSON file.
    pub fn save_json_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> SeqfeedResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Resolve the resource files.
    ///
    /// The base directory is `resource_dir`, else `$SEQFEED_RESOURCE_DIR`,
    /// else the working directory.
    pub fn resolved_paths(&self) -> SeqfeedResult<ResourcePaths> {
        let base = SEQFEED_RESOURCE_CONFIG.resolve(self.resource_dir.as_deref())?;
        let base = base.as_deref();
        Ok(ResourcePaths {
            src_file: join_resource(base, &self.src_file)?,
            tgt_file: join_resource(base, &self.tgt_file)?,
            src_vocab_file: join_resource(base, &self.src_vocab_file)?,
            tgt_vocab_file: join_resource(base, &self.tgt_vocab_file)?,
            word_embedding_file: join_resource(base, &self.word_embedding_file)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.src_file, "resource/source.txt");
        assert_eq!(config.word_embedding_file, "resource/wiki.zh.vec");
        assert_eq!(config.batching.batch_size, 3);
        assert_eq!(config.embedding.width, 30);
        assert!(!config.share_vocab);
    }

    #[test]
    fn test_resolved_paths() {
        let config = PipelineConfig::default().with_resource_dir(Some("/srv/nmt"));
        let paths = config.resolved_paths().unwrap();
        assert_eq!(paths.src_file, PathBuf::from("/srv/nmt/resource/source.txt"));
        assert_eq!(
            paths.tgt_vocab_file,
            PathBuf::from("/srv/nmt/resource/target_vocab.txt")
        );
    }

    #[test]
    fn test_json_round_trip() -> SeqfeedResult<()> {
        let dir = tempdir::TempDir::new("pipeline_config")?;
        let path = dir.path().join("config.json");

        let config = PipelineConfig::default()
            .with_share_vocab(true)
            .with_batching(BatchIteratorOptions::new(64).with_random_seed(Some(11)));
        config.save_json_path(&path)?;
        assert_eq!(PipelineConfig::load_json_path(&path)?, config);

        std::fs::write(&path, r#"{"src_file": "a.txt", "batching": {"batch_size": 8}}"#)?;
        let partial = PipelineConfig::load_json_path(&path)?;
        assert_eq!(partial.src_file, "a.txt");
        assert_eq!(partial.tgt_file, DEFAULT_TGT_FILE);
        assert_eq!(partial.batching, BatchIteratorOptions::new(8));

        Ok(())
    }
}
