use clap::Parser;
use image::RgbImage;
use quantree::{ClusterCount, ImageBuf, Pipeline, smooth::GaussianSmoothing};
use std::path::PathBuf;

#[derive(Parser)]
struct Options {
    /// Number of colors in the output image
    #[arg(short, long, default_value_t = 16, value_parser = parse_cluster_count)]
    k: u32,

    /// Gaussian smoothing sigma applied before quantization
    #[arg(long)]
    sigma: Option<f64>,

    /// Gaussian kernel size, used together with --sigma
    #[arg(long, default_value_t = 5)]
    filter_size: u32,

    /// Print the distinct-color count, MST cost, and per-stage timings
    #[arg(long)]
    verbose: bool,

    input: PathBuf,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_cluster_count(s: &str) -> Result<u32, String> {
    let value: u32 = s.parse().map_err(|e| format!("{e}"))?;
    ClusterCount::new(value)
        .map(|k| k.as_u32())
        .ok_or_else(|| "k must be at least 1".into())
}

fn main() {
    let Options { k, sigma, filter_size, verbose, input, output } = Options::parse();

    macro_rules! log {
        ($name: literal, $val: expr) => {
            if verbose {
                let time = std::time::Instant::now();
                let value = $val;
                println!("{} took {}ms", $name, time.elapsed().as_millis());
                value
            } else {
                $val
            }
        };
    }

    let image = log!("decode", image::open(&input).unwrap().into_rgb8());
    let image = ImageBuf::try_from(image).unwrap();

    let mut pipeline = Pipeline::new().cluster_count(ClusterCount::new(k).unwrap());
    if let Some(sigma) = sigma {
        let smoothing =
            GaussianSmoothing::new(filter_size, sigma).expect("sigma must be positive and finite");
        pipeline = pipeline.smoothing(smoothing);
    }
    #[cfg(feature = "threads")]
    {
        pipeline = pipeline.parallel(true);
    }

    let quantized = log!(
        "quantize",
        pipeline.input_image(image.as_ref()).quantize().unwrap()
    );

    if verbose {
        println!("distinct colors: {}", quantized.distinct_colors());
        println!("mst cost: {}", quantized.mst_cost());
        println!("palette size: {}", quantized.palette().len());
    }

    let output = output.unwrap_or_else(|| {
        let mut path = input.clone();
        path.set_extension("quantized.png");
        path
    });
    let image: RgbImage = quantized.into_image().into();
    log!("encode", image.save(output).unwrap());
}
