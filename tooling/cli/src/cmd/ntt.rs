use {
    super::Command,
    anyhow::Result,
    argh::FromArgs,
    fourier_dft::modular,
    fourier_number_theory::{find_prime_in_ap, primitive_root_mod_prime},
    tracing::instrument,
};

/// Demonstrate the modular transform on a ramp: discover a suitable prime
/// and primitive root, transform, and invert.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "ntt")]
pub struct Args {
    /// log2 of the transform length
    #[argh(option, default = "5")]
    log2_size: u32,
}

impl Command for Args {
    #[instrument(skip_all)]
    fn run(&self) -> Result<()> {
        let n = 1_usize << self.log2_size;
        let p = find_prime_in_ap(n as i64)?;
        let g = primitive_root_mod_prime(p);
        println!("N = {n}, p = {p}, g = {g}");

        let integers: Vec<i64> = (0..n as i64).collect();
        println!("Integers:");
        print_values(&integers);

        let mut out = vec![0; n];
        modular::ntt_into(&integers, &mut out, p, g)?;
        println!("\nNTT:");
        print_values(&out);

        modular::intt_in_place(&mut out, p, g)?;
        println!("\nInverse NTT:");
        print_values(&out);
        Ok(())
    }
}

fn print_values(values: &[i64]) {
    let line = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{line}");
}
