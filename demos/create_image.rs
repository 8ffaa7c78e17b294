//! Text-to-image example - renders a sticker-styled prompt to a PNG.
//!
//! Run with: `cargo run --example create_image`
//!
//! Requires `GOOGLE_API_KEY` environment variable.

use imgforge::{AspectRatio, CreateFunction, GeminiService, Studio};

#[tokio::main]
async fn main() -> imgforge::Result<()> {
    let mut studio = Studio::new(GeminiService::builder().build()?);

    let controller = studio.controller_mut();
    controller.set_create_function(CreateFunction::Sticker);
    controller.set_aspect_ratio(AspectRatio::Square);
    controller.set_prompt("a smiling golden retriever puppy");

    let image = studio.generate().await?;
    image.save("sticker.png")?;
    println!("Saved sticker.png ({} bytes)", image.size());

    Ok(())
}
