use super::{format_tree, parse_data, print_diagnostics, OutputFormat, Workspace};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use streamui_protocol::LineAssembler;
use streamui_renderer::{render, HtmlOptions, RenderedTree};
use streamui_tree::Interpreter;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSONL file holding a recorded patch stream
    pub file: PathBuf,

    /// Bytes per simulated network chunk
    #[arg(long, default_value_t = 64)]
    pub chunk_size: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Outline)]
    pub format: OutputFormat,

    /// Render after every applied line
    #[arg(long)]
    pub steps: bool,

    /// Data model: inline JSON or @file
    #[arg(long)]
    pub data: Option<String>,

    /// Dispatch the action bound to this element after the final render
    #[arg(long)]
    pub trigger: Option<String>,

    /// Wrap HTML output in a complete document
    #[arg(long)]
    pub document: bool,
}

pub fn replay(args: ReplayArgs, workspace: &Workspace) -> Result<()> {
    let path = workspace.path(&args.file);
    let bytes = std::fs::read(&path).with_context(|| format!("Cannot read {}", path.display()))?;

    let data = args
        .data
        .as_deref()
        .map(|raw| parse_data(&workspace.cwd, raw))
        .transpose()?;
    let registry = workspace.registry();
    let context = workspace.context(data);
    let options = HtmlOptions {
        document: args.document,
        ..workspace.html_options()
    };

    let mut assembler = LineAssembler::new();
    let mut interpreter = Interpreter::new(workspace.catalog.clone());
    let mut step = 0;

    let mut apply = |line: String, interpreter: &mut Interpreter| -> Result<()> {
        let outcome = interpreter.apply(&line);
        if args.steps && outcome.changed() {
            step += 1;
            let tree = render(&interpreter.snapshot(), &registry, &context);
            println!("{}", format!("── step {} (v{}) ──", step, tree.version).dimmed());
            println!("{}", format_tree(&tree, args.format, &options)?);
        }
        Ok(())
    };

    for chunk in bytes.chunks(args.chunk_size.max(1)) {
        for line in assembler.feed_bytes(chunk) {
            apply(line, &mut interpreter)?;
        }
    }
    if let Some(line) = assembler.finish() {
        apply(line, &mut interpreter)?;
    }

    let snapshot = interpreter.snapshot();
    let tree = render(&snapshot, &registry, &context);
    if !args.steps {
        println!("{}", format_tree(&tree, args.format, &options)?);
    }

    report(&interpreter, &tree);

    if let Some(key) = &args.trigger {
        trigger(&tree, key, &context)?;
    }

    Ok(())
}

fn report(interpreter: &Interpreter, tree: &RenderedTree) {
    let snapshot = interpreter.snapshot();
    eprintln!();
    eprintln!(
        "{} {} lines, {} elements, version {}",
        "✓".green(),
        interpreter.lines_applied(),
        snapshot.len(),
        snapshot.version()
    );

    let pending = tree.pending();
    if !pending.is_empty() {
        eprintln!("  {} never arrived: {}", "⚠️".yellow(), pending.join(", "));
    }

    if !interpreter.diagnostics().is_empty() {
        eprintln!(
            "  {} {} diagnostics",
            "✗".red(),
            interpreter.diagnostics().len()
        );
        print_diagnostics(interpreter.diagnostics());
    }
}

fn trigger(tree: &RenderedTree, key: &str, context: &streamui_renderer::RenderContext) -> Result<()> {
    if tree.find(key).is_none() {
        return Err(anyhow!("No rendered element '{}'", key));
    }
    let action = tree
        .action_for(key)
        .ok_or_else(|| anyhow!("Element '{}' has no action", key))?;

    if !context.dispatch(action, None) {
        eprintln!("  {} no handler for '{}'", "⚠️".yellow(), action);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamui_catalog::SPACE_MISSION_EXAMPLE;

    fn args(file: &str) -> ReplayArgs {
        ReplayArgs {
            file: PathBuf::from(file),
            chunk_size: 7,
            format: OutputFormat::Html,
            steps: true,
            data: None,
            trigger: None,
            document: false,
        }
    }

    #[test]
    fn test_replay_with_trigger() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.jsonl"), SPACE_MISSION_EXAMPLE).unwrap();
        let workspace = Workspace::load(dir.path(), None).unwrap();

        let replay_args = ReplayArgs {
            trigger: Some("cta".to_string()),
            ..args("page.jsonl")
        };
        assert!(replay(replay_args, &workspace).is_ok());

        let missing = ReplayArgs {
            trigger: Some("nowhere".to_string()),
            ..args("page.jsonl")
        };
        assert!(replay(missing, &workspace).is_err());
    }

    #[test]
    fn test_replay_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::load(dir.path(), None).unwrap();
        assert!(replay(args("absent.jsonl"), &workspace).is_err());
    }
}
