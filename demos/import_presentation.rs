use std::env;
use std::fs;

use anyhow::{bail, Context};
use gslides_import::{
    import_presentation, CancelHandle, ImageDataMap, ImportEvent, ImportOptions, MemoryHost, Presentation,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level.
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("Usage: cargo run --example import_presentation -- <PRESENTATION_JSON> [IMAGES_JSON] [OPTIONS_JSON]");
    }

    log::info!("Loading presentation from {}...", args[1]);
    let json = fs::read_to_string(&args[1]).with_context(|| format!("reading {}", args[1]))?;
    let presentation = Presentation::from_json(&json).context("parsing presentation JSON")?;

    let images: ImageDataMap = match args.get(2) {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?).context("parsing image map")?,
        None => ImageDataMap::new(),
    };
    let options = match args.get(3) {
        Some(path) => ImportOptions::from_json(&fs::read_to_string(path)?)?,
        None => ImportOptions::default(),
    };

    let mut host = MemoryHost::new();
    let result = import_presentation(
        &mut host,
        &presentation,
        &images,
        &options,
        &CancelHandle::new(),
        &mut |event| match &event {
            ImportEvent::Progress { progress, text } => log::info!("[{:>3}%] {}", progress, text),
            other => log::info!("{:?}", other),
        },
    )
    .await;

    let report = result.context("import failed")?;
    for failure in report.failures() {
        log::warn!("{} '{}' at {}: {}", failure.kind, failure.object_id, failure.path, failure.message);
    }
    for substitution in &report.substitutions {
        log::info!("Font {} -> {}", substitution.requested, substitution.resolved);
    }

    let output_path = "imported_scene.json";
    fs::write(output_path, serde_json::to_string_pretty(&host.snapshot())?)
        .with_context(|| format!("writing {}", output_path))?;
    log::info!("Scene with {} nodes saved to {}", host.nodes().count(), output_path);
    Ok(())
}
