use super::{print_diagnostics, Workspace};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use streamui_protocol::LineAssembler;
use streamui_tree::Interpreter;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// JSONL file holding a recorded patch stream
    pub file: PathBuf,
}

pub fn check(args: CheckArgs, workspace: &Workspace) -> Result<()> {
    let path = workspace.path(&args.file);
    let bytes = std::fs::read(&path).with_context(|| format!("Cannot read {}", path.display()))?;

    println!(
        "🔍 {} {} against {}",
        "Checking".green().bold(),
        args.file.display(),
        workspace.catalog.name.bright_white()
    );

    let mut assembler = LineAssembler::new();
    let mut interpreter = Interpreter::new(workspace.catalog.clone());
    interpreter.apply_all(assembler.feed_bytes(&bytes));
    interpreter.apply_all(assembler.finish());

    let snapshot = interpreter.snapshot();
    let dangling = snapshot.dangling();
    if snapshot.root().is_none() {
        println!("  {} no root was set", "⚠️".yellow());
    }
    if !dangling.is_empty() {
        println!("  {} unresolved children: {}", "⚠️".yellow(), dangling.join(", "));
    }

    let diagnostics = interpreter.diagnostics();
    if diagnostics.is_empty() {
        println!(
            "{} {} lines, {} elements, no diagnostics",
            "✅".green(),
            interpreter.lines_applied(),
            snapshot.len()
        );
        return Ok(());
    }

    print_diagnostics(diagnostics);
    Err(anyhow!(
        "{} of {} lines produced diagnostics",
        diagnostics.len(),
        interpreter.lines_applied()
    ))
}
