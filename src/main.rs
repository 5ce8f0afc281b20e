use prismix::{Config, MixOrchestrator, OutputHandle, StyleProfile, common::logger};
use tracing::{info, warn};

const USAGE: &str = "usage: prismix <music-ref> <voice-text> [style] [out.wav]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(music), Some(text)) = (args.next(), args.next()) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };
    let style: StyleProfile = match args.next() {
        Some(name) => name.parse()?,
        None => StyleProfile::default(),
    };
    let out_path = args.next().unwrap_or_else(|| "mix.wav".to_string());

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}; using built-in defaults", e);
            Config::default()
        }
    };
    logger::init(&config);

    let orchestrator = MixOrchestrator::from_config(&config)?;
    let request = orchestrator.request(&music, &text).with_style(style);
    let result = orchestrator.produce_mix(request).await;

    match &result.output_handle {
        OutputHandle::Resource(handle) => {
            if let Some(resource) = orchestrator.resources().get(handle) {
                tokio::fs::write(&out_path, &resource.bytes).await?;
                info!(
                    "Wrote {} ({:.2}s, {} bytes)",
                    out_path,
                    result.duration_seconds,
                    resource.bytes.len()
                );
            }
            orchestrator.resources().release(handle);
        }
        OutputHandle::Original(original) => {
            warn!(
                "Mix degraded ({}); play the original track: {}",
                result.reason.as_deref().unwrap_or("unknown reason"),
                original
            );
        }
    }

    Ok(())
}
