use clap::Subcommand;

use crate::api::reference::ReferenceItem;
use crate::cli::context::CliContext;
use crate::cli::utils::*;
use crate::router::HOME_PATH;

#[derive(Subcommand)]
pub enum RefCommands {
    #[command(about = "List subjects")]
    Subjects,

    #[command(about = "List job titles")]
    Jobs,

    #[command(about = "List education levels")]
    EduLevels,
}

pub async fn handle(cmd: RefCommands, ctx: &CliContext) -> anyhow::Result<()> {
    // Lookups are readable by any signed-in user
    ctx.enter(HOME_PATH)?;
    let reference = ctx.client.reference();

    let (name, envelope) = match cmd {
        RefCommands::Subjects => ("subjects", reference.subjects().await?),
        RefCommands::Jobs => ("job_titles", reference.job_titles().await?),
        RefCommands::EduLevels => ("edu_levels", reference.edu_levels().await?),
    };

    let items: Vec<ReferenceItem> = unwrap_envelope(envelope)?;
    output_list(
        &ctx.output,
        name,
        &items,
        &format!("{:<6} {}", "ID", "NAME"),
        |item| format!("{:<6} {}", item.id, item.name),
    )
}
