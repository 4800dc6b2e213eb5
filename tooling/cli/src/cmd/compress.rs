use {
    super::Command,
    anyhow::Result,
    argh::FromArgs,
    fourier_compressor::{compress, decompress, read_signal, write_signal, DEFAULT_NUM_FREQUENCIES},
    std::io,
    tracing::{info, instrument},
};

/// Compress a real signal read from stdin (the sample count followed by the
/// samples) and print the reconstruction, or the retained bins as JSON.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "compress")]
pub struct Args {
    /// number of retained frequency bins
    #[argh(option, short = 'k', default = "DEFAULT_NUM_FREQUENCIES")]
    num_frequencies: usize,

    /// print the retained bins as JSON instead of reconstructing
    #[argh(switch)]
    encoded: bool,
}

impl Command for Args {
    #[instrument(skip_all)]
    fn run(&self) -> Result<()> {
        let signal = read_signal(io::stdin().lock())?;
        let encoded = compress(&signal, self.num_frequencies)?;
        info!(
            samples = signal.len(),
            bins = encoded.len(),
            "compressed signal"
        );

        if self.encoded {
            serde_json::to_writer_pretty(io::stdout().lock(), &encoded)?;
            println!();
        } else {
            let reconstruction = decompress(&encoded, signal.len())?;
            write_signal(io::stdout().lock(), &reconstruction)?;
        }
        Ok(())
    }
}
