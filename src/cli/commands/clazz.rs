use chrono::NaiveDate;
use clap::Subcommand;

use crate::api::clazz::{AddClazzRequest, SearchClazzRequest, UpdateClazzRequest};
use crate::cli::context::CliContext;
use crate::cli::utils::*;

const SCREEN: &str = "/clazz";

#[derive(Subcommand)]
pub enum ClazzCommands {
    #[command(about = "Search classes")]
    Search {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
        #[arg(long, help = "Class name substring")]
        name: Option<String>,
        #[arg(long, help = "Ends on or after (YYYY-MM-DD)")]
        start_date: Option<NaiveDate>,
        #[arg(long, help = "Ends on or before (YYYY-MM-DD)")]
        end_date: Option<NaiveDate>,
    },

    #[command(about = "Show one class")]
    Get {
        #[arg(help = "Class ID")]
        id: i64,
    },

    #[command(about = "Create class from JSON on stdin")]
    Add,

    #[command(about = "Update class from JSON on stdin")]
    Update {
        #[arg(help = "Class ID (overrides any id in the input)")]
        id: Option<i64>,
    },

    #[command(about = "Delete class")]
    Delete {
        #[arg(help = "Class ID")]
        id: i64,
    },
}

pub async fn handle(cmd: ClazzCommands, ctx: &CliContext) -> anyhow::Result<()> {
    ctx.enter(SCREEN)?;
    let classes = ctx.client.classes();

    match cmd {
        ClazzCommands::Search { page, page_size, name, start_date, end_date } => {
            let request = SearchClazzRequest { page, page_size, name, start_date, end_date };
            let result = unwrap_envelope(classes.search(&request).await?)?;
            output_page(
                &ctx.output,
                "classes",
                &result,
                &format!("{:<6} {:<20} {:<16} {:<12} {:<12}", "ID", "NAME", "TEACHER", "START", "END"),
                |c| {
                    format!(
                        "{:<6} {:<20} {:<16} {:<12} {:<12}",
                        c.id,
                        c.clazz_name,
                        display_opt(&c.teacher_name),
                        display_opt(&c.start_date),
                        display_opt(&c.end_date)
                    )
                },
            )
        }
        ClazzCommands::Get { id } => {
            let detail = unwrap_envelope(classes.find_by_id(id).await?)?;
            output_record(&ctx.output, &detail, |c| {
                println!("ID:      {}", display_opt(&c.id));
                println!("Name:    {}", c.name);
                println!("Start:   {}", display_opt(&c.start_date));
                println!("End:     {}", display_opt(&c.end_date));
                println!("Teacher: {}", display_opt(&c.teacher_id));
                println!("Subject: {}", display_opt(&c.subject));
            })
        }
        ClazzCommands::Add => {
            ctx.ensure_can_edit()?;
            let request: AddClazzRequest = read_json_stdin()?;
            let envelope = classes.add(&request).await?;
            output_mutation(&ctx.output, envelope, &format!("Class '{}' created", request.name))
        }
        ClazzCommands::Update { id } => {
            ctx.ensure_can_edit()?;
            let mut request: UpdateClazzRequest = read_json_stdin()?;
            if id.is_some() {
                request.id = id;
            }
            let envelope = classes.update(&request).await?;
            output_mutation(&ctx.output, envelope, &format!("Class {} updated", display_opt(&request.id)))
        }
        ClazzCommands::Delete { id } => {
            ctx.ensure_can_edit()?;
            let envelope = classes.delete(id).await?;
            output_mutation(&ctx.output, envelope, &format!("Class {} deleted", id))
        }
    }
}
