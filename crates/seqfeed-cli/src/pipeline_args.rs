use seqfeed::pipeline::{Pipeline, PipelineConfig};

/// Pipeline config arg group.
#[derive(clap::Args, Debug)]
pub struct PipelineArgs {
    /// Optional JSON pipeline config; defaults are used when absent.
    #[clap(long, default_value = None)]
    pub config: Option<String>,

    /// Override the config's resource directory.
    #[clap(long, default_value = None)]
    pub resource_dir: Option<String>,
}

impl PipelineArgs {
    /// Load the config, applying overrides.
    pub fn load_config(&self) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("loading pipeline config {path}");
                PipelineConfig::load_json_path(path)?
            }
            None => PipelineConfig::default(),
        };
        if self.resource_dir.is_some() {
            config.resource_dir = self.resource_dir.clone();
        }
        Ok(config)
    }

    /// Initialize a pipeline from a loaded config.
    pub fn init_pipeline(
        &self,
        config: PipelineConfig,
    ) -> Result<Pipeline<u32>, Box<dyn std::error::Error>> {
        let pipeline = Pipeline::init(config)?;
        log::info!(
            "pipeline ready: source vocab {}, target vocab {}",
            pipeline.vocab_size(),
            pipeline.tables().target.len()
        );
        Ok(pipeline)
    }
}
