use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::warn;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use idx_mnist::stream::FileStreamProvider;
use idx_mnist::{Decoder, Error, Label, RawRecord, Result, ShapeConfig};

#[derive(Parser)]
#[command(version, about = "Decode IDX image/label files (plain or gzip)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print counts, dimensions and the label histogram
    Inspect {
        #[arg(long)]
        images: PathBuf,
        #[arg(long)]
        labels: Option<PathBuf>,
        #[arg(long, default_value_t = 2)]
        pad_width: usize,
    },
    /// Write image/label pairs as CSV (label first, then pixels)
    Export {
        #[arg(long)]
        images: PathBuf,
        #[arg(long)]
        labels: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Render one image as ASCII art
    Show {
        #[arg(long)]
        images: PathBuf,
        /// Record to show; a random one is picked when omitted
        #[arg(long)]
        index: Option<usize>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Also save the record as a PNG
        #[arg(long)]
        png: Option<PathBuf>,
        #[arg(long, default_value_t = 2)]
        pad_width: usize,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect {
            images,
            labels,
            pad_width,
        } => inspect(&images, labels.as_deref(), pad_width),
        Commands::Export {
            images,
            labels,
            output,
            limit,
        } => export(&images, &labels, &output, limit),
        Commands::Show {
            images,
            index,
            seed,
            png,
            pad_width,
        } => show(&images, index, seed, png.as_deref(), pad_width),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// Image and label files share nothing, so decode them side by side
fn decode_pair(
    decoder: &Decoder,
    images: &Path,
    labels: &Path,
) -> Result<(Vec<RawRecord>, Vec<Label>)> {
    let (images, labels) = rayon::join(
        || decoder.decode_raw_images(images),
        || decoder.decode_labels(labels),
    );
    let (_, records) = images?;
    let labels = labels?;
    // Nothing in the format ties the two files together
    if records.len() != labels.len() {
        warn!(
            "image file has {} records but label file has {}",
            records.len(),
            labels.len()
        );
    }
    Ok((records, labels))
}

fn inspect(images: &Path, labels: Option<&Path>, pad_width: usize) -> Result<()> {
    let decoder =
        Decoder::new(FileStreamProvider).with_shape(ShapeConfig::with_pad_width(pad_width));
    let (records, labels) = match labels {
        Some(labels) => {
            let (records, labels) = decode_pair(&decoder, images, labels)?;
            (records, Some(labels))
        }
        None => (decoder.decode_raw_images(images)?.1, None),
    };

    println!("Images: {} ({})", records.len(), images.display());
    if let Some(first) = records.first() {
        let dims = first.dims();
        println!("Dimensions: {}x{}", dims.rows, dims.cols);
        let (r, c, d) = decoder.shape_config().check(dims)?;
        println!("Tensor shape: {}x{}x{}", r, c, d);
    }

    if let Some(labels) = labels {
        println!("Labels: {}", labels.len());
        let mut histogram = [0_usize; 256];
        labels.iter().for_each(|&l| histogram[l as usize] += 1);
        for (label, count) in histogram.iter().enumerate().filter(|(_, count)| **count > 0) {
            println!("  {:>3}: {}", label, count);
        }
    }
    Ok(())
}

fn export(images: &Path, labels: &Path, output: &Path, limit: Option<usize>) -> Result<()> {
    let decoder = Decoder::new(FileStreamProvider);
    let (records, labels) = decode_pair(&decoder, images, labels)?;
    let file = BufWriter::new(File::create(output)?);
    let written = idx_mnist::export::write_csv(file, &records, &labels, limit)?;
    println!("Wrote {} rows to {}", written, output.display());
    Ok(())
}

// Darkest pixels get the densest glyphs
const SHADES: &[u8] = b" .:-=+*#%@";

fn show(
    images: &Path,
    index: Option<usize>,
    seed: u64,
    png: Option<&Path>,
    pad_width: usize,
) -> Result<()> {
    let decoder =
        Decoder::new(FileStreamProvider).with_shape(ShapeConfig::with_pad_width(pad_width));
    let (dims, records) = decoder.decode_raw_images(images)?;
    if records.is_empty() {
        println!("{} has no records", images.display());
        return Ok(());
    }

    let index = match index {
        Some(i) if i < records.len() => i,
        Some(i) => {
            return Err(Error::IndexOutOfRange {
                index: i,
                len: records.len(),
            })
        }
        None => SmallRng::seed_from_u64(seed).gen_range(0..records.len()),
    };
    let record = &records[index];

    println!("Record {} of {}", index, records.len());
    for y in 0..dims.rows {
        let line: String = (0..dims.cols)
            .map(|x| SHADES[record.at(x, y) as usize * (SHADES.len() - 1) / 255] as char)
            .collect();
        println!("{}", line);
    }
    decoder.shape_config().check(dims)?;
    let tensor = decoder.shape_config().shape(record);
    println!("Padded tensor shape: {:?}", tensor.dim());

    if let Some(png) = png {
        record.to_gray_image().save(png)?;
        println!("Saved {}", png.display());
    }
    Ok(())
}
