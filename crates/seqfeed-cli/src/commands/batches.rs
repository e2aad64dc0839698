use std::io::Write;

use crate::{input_output::OutputArgs, logging::LogArgs, pipeline_args::PipelineArgs};

/// Args for the batches command.
#[derive(clap::Args, Debug)]
pub struct BatchesArgs {
    #[command(flatten)]
    pipeline: PipelineArgs,

    #[clap(flatten)]
    pub logging: LogArgs,

    /// Max batches to write; all when absent.
    #[arg(long)]
    count: Option<usize>,

    /// Override the shuffle seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the map stage thread count.
    #[arg(long)]
    threads: Option<usize>,

    #[command(flatten)]
    output: OutputArgs,
}

impl BatchesArgs {
    /// Run the batches command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let mut config = self.pipeline.load_config()?;
        if self.seed.is_some() {
            config.batching.random_seed = self.seed;
        }
        if let Some(threads) = self.threads {
            config.batching.num_threads = threads;
        }
        let pipeline = self.pipeline.init_pipeline(config)?;

        let mut writer = self.output.open_writer()?;
        let mut written = 0;
        for batch in pipeline.iter()?.take(self.count.unwrap_or(usize::MAX)) {
            let batch = batch?;
            log::debug!(
                "batch {written}: bucket {}, rows {}",
                batch.bucket,
                batch.batch_size()
            );
            serde_json::to_writer(&mut writer, &batch)?;
            writeln!(writer)?;
            written += 1;
        }
        writer.flush()?;

        log::info!("wrote {written} batches");
        Ok(())
    }
}
