//! CLI for ImgForge - AI image creation and editing.

use clap::{Args, Parser, Subcommand, ValueEnum};
use imgforge::{
    AspectRatio, CreateFunction, EditFunction, GeminiService, ImageData, Mode, Studio, UploadSlot,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "imgforge")]
#[command(about = "Create and edit images via Google's generative image APIs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an image from a text prompt
    Create(CreateArgs),

    /// Edit an existing image with a text instruction
    Edit(EditArgs),

    /// Merge two images into one
    Compose(ComposeArgs),
}

#[derive(Args)]
struct CreateArgs {
    /// The text prompt describing the image
    prompt: String,

    /// Output file path
    #[arg(short, long)]
    output: PathBuf,

    /// Prompt styling to apply
    #[arg(short, long, value_enum, default_value = "free")]
    function: CreateFunctionArg,

    /// Output aspect ratio
    #[arg(long, value_enum, default_value = "1:1")]
    aspect_ratio: AspectRatioArg,
}

#[derive(Args)]
struct EditArgs {
    /// The edit instruction (a generic one is sent when omitted)
    prompt: Option<String>,

    /// Image to edit
    #[arg(short, long)]
    input: PathBuf,

    /// Output file path
    #[arg(short, long)]
    output: PathBuf,

    /// Edit function to select
    #[arg(short, long, value_enum, default_value = "add-remove")]
    function: EditFunctionArg,
}

#[derive(Args)]
struct ComposeArgs {
    /// Instruction describing how to merge (a generic one is sent when omitted)
    prompt: Option<String>,

    /// First source image
    #[arg(long)]
    first: PathBuf,

    /// Second source image
    #[arg(long)]
    second: PathBuf,

    /// Output file path
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CreateFunctionArg {
    Free,
    Sticker,
    Text,
    Comic,
}

impl From<CreateFunctionArg> for CreateFunction {
    fn from(arg: CreateFunctionArg) -> Self {
        match arg {
            CreateFunctionArg::Free => CreateFunction::Free,
            CreateFunctionArg::Sticker => CreateFunction::Sticker,
            CreateFunctionArg::Text => CreateFunction::Text,
            CreateFunctionArg::Comic => CreateFunction::Comic,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EditFunctionArg {
    AddRemove,
    Retouch,
    Style,
}

impl From<EditFunctionArg> for EditFunction {
    fn from(arg: EditFunctionArg) -> Self {
        match arg {
            EditFunctionArg::AddRemove => EditFunction::AddRemove,
            EditFunctionArg::Retouch => EditFunction::Retouch,
            EditFunctionArg::Style => EditFunction::Style,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AspectRatioArg {
    #[value(name = "1:1")]
    Square,
    #[value(name = "16:9")]
    Landscape,
    #[value(name = "9:16")]
    Portrait,
    #[value(name = "4:3")]
    Standard,
    #[value(name = "3:4")]
    StandardPortrait,
}

impl From<AspectRatioArg> for AspectRatio {
    fn from(arg: AspectRatioArg) -> Self {
        match arg {
            AspectRatioArg::Square => AspectRatio::Square,
            AspectRatioArg::Landscape => AspectRatio::Landscape,
            AspectRatioArg::Portrait => AspectRatio::Portrait,
            AspectRatioArg::Standard => AspectRatio::Standard,
            AspectRatioArg::StandardPortrait => AspectRatio::StandardPortrait,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut studio = Studio::new(GeminiService::builder().build()?);

    let output = match cli.command {
        Commands::Create(args) => {
            let controller = studio.controller_mut();
            controller.set_mode(Mode::Create);
            controller.set_create_function(args.function.into());
            controller.set_aspect_ratio(args.aspect_ratio.into());
            controller.set_prompt(args.prompt);
            args.output
        }
        Commands::Edit(args) => {
            let input = read_image(&args.input)?;
            let controller = studio.controller_mut();
            controller.set_mode(Mode::Edit);
            controller.set_edit_function(args.function.into());
            controller.record_upload(UploadSlot::Primary, input);
            controller.set_prompt(args.prompt.unwrap_or_default());
            args.output
        }
        Commands::Compose(args) => {
            let first = read_image(&args.first)?;
            let second = read_image(&args.second)?;
            let controller = studio.controller_mut();
            controller.set_mode(Mode::Edit);
            controller.set_edit_function(EditFunction::Compose);
            controller.record_upload(UploadSlot::Secondary1, first);
            controller.record_upload(UploadSlot::Secondary2, second);
            controller.set_prompt(args.prompt.unwrap_or_default());
            args.output
        }
    };

    let image = studio.generate().await?;
    image.save(&output)?;

    if cli.json {
        let result = serde_json::json!({
            "success": true,
            "output": output.display().to_string(),
            "size_bytes": image.size(),
            "mime_type": image.mime_type,
            "format": image.detected_format().map(|f| f.extension()),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Saved {} ({} bytes, {})",
            output.display(),
            image.size(),
            image.mime_type
        );
    }

    Ok(())
}

fn read_image(path: &Path) -> anyhow::Result<ImageData> {
    let data = std::fs::read(path)?;
    ImageData::from_bytes(data).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}
