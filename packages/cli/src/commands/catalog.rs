use super::Workspace;
use anyhow::Result;
use clap::Args;
use streamui_catalog::{instructions, SPACE_MISSION_EXAMPLE};

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Print the producer system prompt instead of the catalog document
    #[arg(long)]
    pub prompt: bool,
}

pub fn catalog(args: CatalogArgs, workspace: &Workspace) -> Result<()> {
    if args.prompt {
        let example = (!workspace.custom_catalog).then_some(SPACE_MISSION_EXAMPLE);
        println!("{}", instructions::system_prompt(&workspace.catalog, example));
    } else {
        println!("{}", workspace.catalog.to_json_pretty());
    }
    Ok(())
}
