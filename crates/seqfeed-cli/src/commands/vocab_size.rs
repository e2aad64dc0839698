use seqfeed::vocab::count_vocab_lines_path;

use crate::logging::LogArgs;

/// Args for the vocab-size command.
#[derive(clap::Args, Debug)]
pub struct VocabSizeArgs {
    /// Vocab file; one token per line.
    file: String,

    #[clap(flatten)]
    pub logging: LogArgs,
}

impl VocabSizeArgs {
    /// Run the vocab-size command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let size = count_vocab_lines_path(&self.file)?;
        log::debug!("{}: {size} tokens", self.file);
        println!("{size}");
        Ok(())
    }
}
