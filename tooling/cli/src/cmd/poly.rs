use {
    super::Command,
    anyhow::{bail, Context, Result},
    argh::FromArgs,
    fourier_polynomial::{integer_multiply, real_multiply, Polynomial},
    std::{io::Read, str::FromStr},
    tracing::instrument,
};

/// Multiply two polynomials read from stdin: the degree of the first
/// operand, its coefficients lowest first, then the same for the second.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "poly")]
pub struct Args {
    /// coefficient mode: integer (exact) or real
    #[argh(option, default = "String::from(\"integer\")")]
    mode: String,
}

fn read_polynomial<'a, T, I>(tokens: &mut I) -> Result<Polynomial<T>>
where
    T: num_traits::Zero + FromStr,
    I: Iterator<Item = &'a str>,
{
    let degree: usize = tokens
        .next()
        .context("missing polynomial degree")?
        .parse()
        .context("invalid polynomial degree")?;

    let mut coefficients = Vec::with_capacity(degree + 1);
    for _ in 0..=degree {
        let token = tokens.next().context("missing coefficient")?;
        let coefficient = token
            .parse()
            .ok()
            .with_context(|| format!("invalid coefficient {token:?}"))?;
        coefficients.push(coefficient);
    }
    Ok(Polynomial::new(coefficients))
}

impl Command for Args {
    #[instrument(skip_all)]
    fn run(&self) -> Result<()> {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        let mut tokens = text.split_whitespace();

        match self.mode.as_str() {
            "integer" => {
                let a: Polynomial<i64> = read_polynomial(&mut tokens)?;
                let b = read_polynomial(&mut tokens)?;
                println!("{}", integer_multiply(&a, &b)?);
            }
            "real" => {
                let a: Polynomial<f64> = read_polynomial(&mut tokens)?;
                let b = read_polynomial(&mut tokens)?;
                println!("{}", real_multiply(&a, &b));
            }
            mode => bail!("unknown mode {mode:?}"),
        }
        Ok(())
    }
}
