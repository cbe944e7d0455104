use clap::Subcommand;

use crate::cli::context::CliContext;
use crate::cli::utils::*;
use crate::types::PageRequest;

const SCREEN: &str = "/log";

#[derive(Subcommand)]
pub enum LogCommands {
    #[command(about = "List activity log entries")]
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
}

pub async fn handle(cmd: LogCommands, ctx: &CliContext) -> anyhow::Result<()> {
    ctx.enter(SCREEN)?;

    match cmd {
        LogCommands::List { page, page_size } => {
            let request = PageRequest::new(page, page_size);
            let result = unwrap_envelope(ctx.client.activity_logs().find(&request).await?)?;
            output_page(
                &ctx.output,
                "logs",
                &result,
                &format!("{:<12} {:<20} {:<40} {:>8}", "OPERATOR", "TIME", "METHOD", "MS"),
                |l| {
                    format!(
                        "{:<12} {:<20} {:<40} {:>8}",
                        l.operator,
                        display_opt(&l.operate_time),
                        format!("{}.{}", l.class_name.rsplit('.').next().unwrap_or(""), l.method_name),
                        l.duration
                    )
                },
            )
        }
    }
}
