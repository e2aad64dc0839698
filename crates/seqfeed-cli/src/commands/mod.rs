use crate::commands::{batches::BatchesArgs, embed::EmbedArgs, vocab_size::VocabSizeArgs};

pub mod batches;
pub mod embed;
pub mod vocab_size;

/// Subcommands for seqfeed.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the number of tokens in a vocab file.
    VocabSize(VocabSizeArgs),

    /// Build the pipeline and write batches as JSON lines.
    Batches(BatchesArgs),

    /// Load the word embedding and print gathered rows.
    Embed(EmbedArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::VocabSize(cmd) => cmd.run(),
            Commands::Batches(cmd) => cmd.run(),
            Commands::Embed(cmd) => cmd.run(),
        }
    }
}
