use super::serve::{generation_service, scripted_generator};
use super::{print_diagnostics, Workspace};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use streamui_renderer::render;
use streamui_server::LocalTransport;
use streamui_session::{SessionConfig, SessionStatus, UiStream};

#[derive(Debug, Args)]
pub struct StreamArgs {
    /// Prompt sent to the generator
    pub prompt: String,

    /// JSONL script the generator replays (defaults to the demo page)
    #[arg(long)]
    pub script: Option<PathBuf>,
}

pub async fn stream(args: StreamArgs, workspace: &Workspace) -> Result<()> {
    let generator = scripted_generator(args.script.as_ref(), workspace)?;
    let transport = LocalTransport::new(generation_service(generator, workspace));
    let ui = UiStream::new(Arc::new(transport), workspace.catalog.clone()).with_config(SessionConfig {
        max_duration: workspace.config.max_duration(),
    });

    let registry = workspace.registry();
    let context = workspace.context(None);

    let generation = ui.send(args.prompt);
    let mut updates = ui.updates();
    let mut last_version = None;

    let state = loop {
        let Some(state) = updates.next().await else {
            break ui.state();
        };
        if state.generation != generation {
            continue;
        }

        let version = state.snapshot.version();
        if last_version != Some(version) {
            last_version = Some(version);
            let tree = render(&state.snapshot, &registry, &context);
            println!(
                "{}",
                format!("── v{} ({} elements) ──", version, state.snapshot.len()).dimmed()
            );
            println!("{}", tree.outline());
        }

        if !state.is_streaming() {
            break state;
        }
    };

    if !state.diagnostics.is_empty() {
        eprintln!("  {} {} diagnostics", "✗".red(), state.diagnostics.len());
        print_diagnostics(&state.diagnostics);
    }

    match &state.status {
        SessionStatus::Completed => {
            println!("{} Stream completed", "✅".green());
            Ok(())
        }
        SessionStatus::TimedOut => {
            println!("{} Stream cut at the maximum duration", "⚠️".yellow());
            Ok(())
        }
        SessionStatus::Failed(message) => Err(anyhow!("{}", message)),
        other => Err(anyhow!("Stream ended as {:?}", other)),
    }
}
