use std::io::Write;

use crate::{input_output::OutputArgs, logging::LogArgs, pipeline_args::PipelineArgs};

/// Args for the embed command.
#[derive(clap::Args, Debug)]
pub struct EmbedArgs {
    #[command(flatten)]
    pipeline: PipelineArgs,

    #[clap(flatten)]
    pub logging: LogArgs,

    /// Token ids to look up, comma separated.
    #[arg(long, value_delimiter = ',')]
    ids: Vec<u32>,

    #[command(flatten)]
    output: OutputArgs,
}

impl EmbedArgs {
    /// Run the embed command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let config = self.pipeline.load_config()?;
        let pipeline = self.pipeline.init_pipeline(config)?;
        let embedding = pipeline.load_embedding()?;

        let mut writer = self.output.open_writer()?;
        let (rows, width) = embedding.shape();
        writeln!(writer, "shape: [{rows}, {width}]")?;

        let gathered = embedding.gather(&self.ids)?;
        for (id, row) in self.ids.iter().zip(gathered) {
            let values: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
            writeln!(writer, "{id}: {}", values.join(" "))?;
        }
        writer.flush()?;
        Ok(())
    }
}
