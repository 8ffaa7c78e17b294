//! Iterative workflow example - generate an image, then edit the result.
//!
//! Run with: `cargo run --example iterate`
//!
//! Requires `GOOGLE_API_KEY` environment variable.

use imgforge::{GeminiService, Studio};

#[tokio::main]
async fn main() -> imgforge::Result<()> {
    let mut studio = Studio::new(GeminiService::builder().build()?);

    studio
        .controller_mut()
        .set_prompt("a lighthouse on a rocky coast at dusk");
    let first = studio.generate().await?;
    first.save("lighthouse.png")?;

    // Feed the result back in as the image to edit.
    studio.controller_mut().adopt_result_as_input();
    studio
        .controller_mut()
        .set_prompt("add a full moon behind the lighthouse");
    let second = studio.generate().await?;
    second.save("lighthouse-moon.png")?;

    println!(
        "Saved lighthouse.png ({} bytes) and lighthouse-moon.png ({} bytes)",
        first.size(),
        second.size()
    );

    Ok(())
}
