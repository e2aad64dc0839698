use stderrlog::{LogLevelNum, Timestamp};

/// Logging arg group shared by the pipeline commands.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Log more; each -v raises the level one step above the command default.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Prefix log lines with a timestamp.
    #[clap(short, long)]
    pub ts: bool,
}

impl LogArgs {
    /// The numeric level: 0 off, 1 error, 2 warn, 3 info, 4 debug, 5+ trace.
    fn level(
        &self,
        default: u8,
    ) -> u8 {
        default.saturating_add(self.verbose)
    }

    /// Install the stderr logger.
    pub fn setup_logging(
        &self,
        default: u8,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let verbosity = match self.level(default) {
            0 => LogLevelNum::Off,
            1 => LogLevelNum::Error,
            2 => LogLevelNum::Warn,
            3 => LogLevelNum::Info,
            4 => LogLevelNum::Debug,
            _ => LogLevelNum::Trace,
        };
        let timestamp = if self.ts {
            Timestamp::Second
        } else {
            Timestamp::Off
        };

        stderrlog::new()
            .quiet(self.quiet)
            .verbosity(verbosity)
            .timestamp(timestamp)
            .init()?;

        Ok(())
    }
}
