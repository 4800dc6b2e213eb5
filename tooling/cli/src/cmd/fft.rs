use {
    super::Command,
    anyhow::{bail, Context, Result},
    argh::FromArgs,
    fourier_dft::{iterative, naive, parallel, recursive, Complex64},
    fourier_parallel::FixedThreadsParallelizer,
    std::io::Read,
    tracing::instrument,
};

/// Transform a complex sequence read from stdin: the length N followed by N
/// samples, each written `re` or `re,im`.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "fft")]
pub struct Args {
    /// compute the inverse transform
    #[argh(switch, short = 'i')]
    inverse: bool,

    /// engine: naive, recursive or iterative
    #[argh(option, default = "String::from(\"iterative\")")]
    engine: String,

    /// run on a bounded thread pool instead of sequentially
    #[argh(switch)]
    parallel: bool,
}

fn parse_complex(token: &str) -> Result<Complex64> {
    let (re, im) = match token.split_once(',') {
        Some((re, im)) => (re, im),
        None => (token, "0"),
    };
    Ok(Complex64::new(
        re.parse().with_context(|| format!("invalid sample {token:?}"))?,
        im.parse().with_context(|| format!("invalid sample {token:?}"))?,
    ))
}

impl Command for Args {
    #[instrument(skip_all)]
    fn run(&self) -> Result<()> {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        let mut tokens = text.split_whitespace();

        let length: usize = tokens
            .next()
            .context("missing sequence length")?
            .parse()
            .context("invalid sequence length")?;
        let mut data = tokens
            .take(length)
            .map(parse_complex)
            .collect::<Result<Vec<_>>>()?;
        if data.len() != length {
            bail!("expected {length} samples, got {}", data.len());
        }

        let pool = FixedThreadsParallelizer::default();
        match (self.engine.as_str(), self.parallel, self.inverse) {
            ("naive", false, false) => naive::dft_in_place(&mut data)?,
            ("naive", false, true) => naive::idft_in_place(&mut data)?,
            ("naive", true, false) => parallel::naive::dft_in_place(&mut data, &pool)?,
            ("naive", true, true) => parallel::naive::idft_in_place(&mut data, &pool)?,
            ("recursive", false, false) => recursive::dft_in_place(&mut data)?,
            ("recursive", false, true) => recursive::idft_in_place(&mut data)?,
            ("recursive", true, false) => parallel::recursive::dft_in_place(&mut data, &pool)?,
            ("recursive", true, true) => parallel::recursive::idft_in_place(&mut data, &pool)?,
            ("iterative", false, false) => iterative::dft_in_place(&mut data)?,
            ("iterative", false, true) => iterative::idft_in_place(&mut data)?,
            ("iterative", true, false) => parallel::iterative::dft_in_place(&mut data, &pool)?,
            ("iterative", true, true) => parallel::iterative::idft_in_place(&mut data, &pool)?,
            (engine, ..) => bail!("unknown engine {engine:?}"),
        }

        for value in &data {
            println!("{},{}", value.re, value.im);
        }
        Ok(())
    }
}
