use super::Workspace;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use streamui_catalog::SPACE_MISSION_EXAMPLE;
use streamui_server::{GenerationService, ScriptedGenerator, CATALOG_PATH, GENERATE_PATH};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// JSONL script to replay for every prompt (defaults to the demo page)
    #[arg(long)]
    pub script: Option<PathBuf>,
}

/// Scripted generator from `--script` or the demo page, chunked per config
pub fn scripted_generator(script: Option<&PathBuf>, workspace: &Workspace) -> Result<ScriptedGenerator> {
    let generator = match script {
        Some(path) => {
            let path = workspace.path(path);
            let script = std::fs::read_to_string(&path)
                .with_context(|| format!("Cannot read script {}", path.display()))?;
            ScriptedGenerator::new(script)
        }
        None => ScriptedGenerator::demo(),
    };
    Ok(generator
        .with_chunk_size(workspace.config.server.chunk_size)
        .with_delay(workspace.config.chunk_delay()))
}

pub fn generation_service(generator: ScriptedGenerator, workspace: &Workspace) -> GenerationService {
    let service = GenerationService::new(Arc::new(generator), workspace.catalog.clone())
        .with_max_duration(workspace.config.max_duration());
    if workspace.custom_catalog {
        service
    } else {
        service.with_example(SPACE_MISSION_EXAMPLE)
    }
}

pub async fn serve(args: ServeArgs, workspace: &Workspace) -> Result<()> {
    let generator = scripted_generator(args.script.as_ref(), workspace)?;
    let service = generation_service(generator, workspace);

    let port = args.port.unwrap_or(workspace.config.server.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind {}", addr))?;

    println!("{}", "🚀 StreamUI generation server".bright_blue().bold());
    println!("   POST http://{}{}", addr, GENERATE_PATH);
    println!("   GET  http://{}{}", addr, CATALOG_PATH);

    streamui_server::serve(listener, service).await?;
    Ok(())
}
