use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pdf_photos::{PaperSize, PhotoPdfOptions};
use pdf_photos_runtime::AppLogger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfp", about = "Combine photos into a PDF, one per page", version)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a PDF with one centered photo per page
    Build {
        /// Input image file(s), in page order
        #[arg(short, long, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        page: PageArgs,

        /// JPEG quality for page images (1-100)
        #[arg(long)]
        quality: Option<u8>,

        /// Document title
        #[arg(long)]
        title: Option<String>,
    },

    /// Print where each photo would be placed, in points
    Layout {
        /// Input image file(s), in page order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Args)]
struct PageArgs {
    /// Options file (JSON); flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Page orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<PaperArg> for pdf_photos::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for pdf_photos::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl PageArgs {
    async fn options(&self) -> Result<PhotoPdfOptions> {
        let mut options = match &self.config {
            Some(path) => PhotoPdfOptions::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => PhotoPdfOptions::default(),
        };
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }
        Ok(options)
    }
}

fn describe_paper(paper: PaperSize) -> String {
    let (w, h) = paper.dimensions_mm();
    format!("{:?} ({} x {} mm)", paper, w, h)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    AppLogger::new(1000)
        .with_level(level)
        .with_echo(true)
        .init()
        .context("Failed to install logger")?;

    match cli.command {
        Commands::Build {
            input,
            output,
            page,
            quality,
            title,
        } => {
            let mut options = page.options().await?;
            if let Some(quality) = quality {
                options.jpeg_quality = quality;
            }
            if let Some(title) = title {
                options.title = title;
            }

            let images = pdf_photos::load_images(&input).await?;
            match pdf_photos::assemble_document(&images, &options).await? {
                Some(doc) => {
                    pdf_photos::save_pdf(&doc, &output).await?;
                    println!(
                        "Combined {} photo(s) → {}",
                        doc.page_count(),
                        output.display()
                    );
                }
                None => println!("Nothing to do"),
            }
        }

        Commands::Layout { input, page } => {
            let options = page.options().await?;
            options.validate()?;
            let page_size = options.page_size();

            let images = pdf_photos::load_images(&input).await?;
            let dimensions = pdf_photos::probe_dimensions(&images).await?;
            let placements = pdf_photos::plan_pages(&dimensions, page_size)?;

            println!(
                "Page: {}, {:?}, {:.2} x {:.2} pt",
                describe_paper(options.paper_size),
                options.orientation,
                page_size.width,
                page_size.height
            );
            for (index, ((image, (w, h)), placement)) in images
                .iter()
                .zip(&dimensions)
                .zip(&placements)
                .enumerate()
            {
                let rect = placement.content_rect;
                println!(
                    "  {:>3}. {} ({}x{} px): {:?}-constrained, {:.2} x {:.2} pt at ({:.2}, {:.2}), scale {:.4}",
                    index + 1,
                    image.label,
                    w,
                    h,
                    placement.fit,
                    rect.width,
                    rect.height,
                    rect.x,
                    rect.y,
                    placement.scale
                );
            }
        }
    }

    Ok(())
}
