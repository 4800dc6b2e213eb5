mod compress;
mod fft;
mod ntt;
mod poly;

use {anyhow::Result, argh::FromArgs};

pub trait Command {
    fn run(&self) -> Result<()>;
}

/// Fourier transforms, polynomial products and signal compression over
/// stdin/stdout.
#[derive(FromArgs, PartialEq, Debug)]
pub struct Args {
    #[argh(subcommand)]
    subcommand: Commands,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
enum Commands {
    Fft(fft::Args),
    Ntt(ntt::Args),
    Poly(poly::Args),
    Compress(compress::Args),
}

impl Command for Args {
    fn run(&self) -> Result<()> {
        self.subcommand.run()
    }
}

impl Command for Commands {
    fn run(&self) -> Result<()> {
        match self {
            Self::Fft(args) => args.run(),
            Self::Ntt(args) => args.run(),
            Self::Poly(args) => args.run(),
            Self::Compress(args) => args.run(),
        }
    }
}
