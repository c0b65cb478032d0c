//! sf2-wavetable CLI: export one SoundFont sample as packed wavetable words.
//!
//! Usage:
//!   sf2-wavetable bank.sf2 --list
//!   sf2-wavetable bank.sf2 --sample 3 --encoding ulaw --out-dir firmware/src
//!   sf2-wavetable bank.sf2            (prompts for a sample)

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use wt_master::{Controller, Encoding, ExportOptions, SampleInfo};

#[derive(Parser, Debug)]
#[command(name = "sf2-wavetable", version, about)]
struct Args {
    /// SoundFont bank to read
    sf2: PathBuf,

    /// Sample to export, 0-based; prompts with a 1-based listing when omitted
    #[arg(short, long)]
    sample: Option<usize>,

    /// List the bank's samples and exit
    #[arg(short, long)]
    list: bool,

    /// Output sample encoding
    #[arg(short, long, value_enum, default_value_t = EncodingArg::Pcm)]
    encoding: EncodingArg,

    /// Directory that receives the generated .cpp/.h pair
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Export even if the sample's loop points fail validation
    #[arg(long)]
    force: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EncodingArg {
    /// 16-bit PCM
    Pcm,
    /// 8-bit µ-law
    Ulaw,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Pcm => Encoding::Pcm,
            EncodingArg::Ulaw => Encoding::Ulaw,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    let data = std::fs::read(&args.sf2)
        .with_context(|| format!("failed to read {}", args.sf2.display()))?;
    let mut ctrl = Controller::new();
    ctrl.load_sf2(&data)
        .with_context(|| format!("failed to parse {}", args.sf2.display()))?;

    println!("Bank:     {}", ctrl.bank_name());
    println!("Samples:  {}", ctrl.samples().len());
    println!();

    if args.list {
        print_samples(ctrl.samples());
        return Ok(());
    }

    let index = match args.sample {
        Some(index) => index,
        None => {
            print_samples(ctrl.samples());
            prompt_for_sample(ctrl.samples().len())?
        }
    };

    let options = ExportOptions {
        encoding: args.encoding.into(),
        force: args.force,
    };
    let artifact = ctrl.export(index, &options)?;

    let [attack, sustain, decay] = artifact.encoded.word_counts();
    println!("Sample:   {}", artifact.sample);
    println!(
        "Array:    {}_sample[{}] ({:?})",
        artifact.identifier,
        artifact.encoded.declared_len(),
        options.encoding
    );
    println!("Regions:  attack {}, loop {}, decay {} words", attack, sustain, decay);

    let paths = artifact
        .write_to(&args.out_dir)
        .with_context(|| format!("failed to export to {}", args.out_dir.display()))?;
    for path in &paths {
        println!("Wrote     {}", path.display());
    }
    Ok(())
}

fn print_samples(samples: &[SampleInfo]) {
    for (i, sample) in samples.iter().enumerate() {
        println!("{:>4}. {}", i + 1, sample.name);
    }
}

/// Read a 1-based selection from stdin and return it 0-based.
fn prompt_for_sample(count: usize) -> Result<usize> {
    if count == 0 {
        bail!("bank has no samples");
    }
    print!("Select a sample (1-{}): ", count);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let choice: usize = line
        .trim()
        .parse()
        .with_context(|| format!("not a sample number: {:?}", line.trim()))?;
    if !(1..=count).contains(&choice) {
        bail!("sample number {} out of range 1-{}", choice, count);
    }
    Ok(choice - 1)
}
