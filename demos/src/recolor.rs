use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use image::{ColorType, GenericImageView};
use indicatif::{ProgressBar, ProgressStyle};
use kmeans::{plot::dump_scatter, KMeans, Point};
use rand::{rngs::StdRng, SeedableRng};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug, Clone)]
#[clap(version, about = "Recolor an image with the mean colors of its k-means clusters")]
pub struct Args {
    pub image: PathBuf,

    /// Number of clusters
    #[clap(default_value_t = 3)]
    pub k: usize,

    #[clap(default_value_t = 1)]
    pub iterations: usize,

    /// Seed for picking the initial centers, random if not set
    #[clap(long)]
    pub seed: Option<u64>,

    /// Defaults to `<image stem>-k<k>.png` next to the input
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Write the final centers and assignment as JSON
    #[clap(long)]
    pub palette: Option<PathBuf>,

    /// Write a scatter plot of the pixels, colored by cluster
    #[clap(long)]
    pub plot: Option<PathBuf>,

    #[clap(long, default_value_t = 0)]
    pub plot_x: usize,

    #[clap(long, default_value_t = 1)]
    pub plot_y: usize,

    /// Stop as soon as an iteration leaves all centers unchanged
    #[clap(long, default_value_t = false)]
    pub until_stable: bool,

    #[clap(long, short, default_value_t = false)]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let img = image::open(&args.image)
        .with_context(|| format!("Failed to open image {}", args.image.display()))?;
    let (width, height) = (img.width(), img.height());
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.image, args.k));

    let saved = if img.color().has_alpha() {
        let pixels: Vec<[u8; 4]> = img.to_rgba8().pixels().map(|p| p.0).collect();
        let data = recolor(&args, &pixels)?;
        image::save_buffer(&output, &data, width, height, ColorType::Rgba8)
    } else {
        let pixels: Vec<[u8; 3]> = img.to_rgb8().pixels().map(|p| p.0).collect();
        let data = recolor(&args, &pixels)?;
        image::save_buffer(&output, &data, width, height, ColorType::Rgb8)
    };
    saved.with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Saved {}", output.display());
    Ok(())
}

/// Clusters the pixels and returns the recolored image data.
fn recolor<P>(args: &Args, pixels: &[P]) -> Result<Vec<u8>>
where
    P: Point<Coord = u8> + Serialize + DeserializeOwned,
{
    let kmeans = KMeans::new(args.k, args.iterations)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let clustering = if args.until_stable {
        let (clustering, rounds) = kmeans.fit_until_stable(pixels, &mut rng)?;
        info!("Stopped after {rounds} of at most {} iterations", args.iterations);
        clustering
    } else {
        let progress_bar = ProgressBar::new(args.iterations as u64);
        let progress_style = ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] {wide_bar} {pos}/{len} (eta:{eta})")
            .context("Failed to create progress style")?;
        progress_bar.set_style(progress_style);
        progress_bar.set_message("KMeans");
        let clustering = kmeans.fit_observed(pixels, &mut rng, |_, _| progress_bar.inc(1))?;
        progress_bar.finish();
        clustering
    };

    for (center, size) in clustering.centers().iter().zip(clustering.cluster_sizes()) {
        info!("Center {:?}: {} pixels", center.coords(), size);
    }

    if let Some(path) = &args.palette {
        clustering
            .save(path)
            .with_context(|| format!("Failed to write palette {}", path.display()))?;
    }
    if let Some(path) = &args.plot {
        dump_scatter(pixels, &clustering, (args.plot_x, args.plot_y), path)
            .with_context(|| format!("Failed to write plot {}", path.display()))?;
    }

    Ok(clustering
        .recolor()
        .iter()
        .flat_map(|color| color.coords().iter().copied())
        .collect())
}

fn default_output(image: &Path, k: usize) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!("{stem}-k{k}.png"))
}
