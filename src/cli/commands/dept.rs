use clap::Subcommand;

use crate::api::department::{AddDepartmentRequest, UpdateDepartmentRequest};
use crate::cli::context::CliContext;
use crate::cli::utils::*;

const SCREEN: &str = "/dept";

#[derive(Subcommand)]
pub enum DeptCommands {
    #[command(about = "List all departments")]
    List,

    #[command(about = "Show one department")]
    Get {
        #[arg(help = "Department ID")]
        id: i64,
    },

    #[command(about = "Create department")]
    Add {
        #[arg(help = "Department name")]
        name: String,
    },

    #[command(about = "Rename department")]
    Update {
        #[arg(help = "Department ID")]
        id: i64,
        #[arg(help = "New department name")]
        name: String,
    },

    #[command(about = "Delete department")]
    Delete {
        #[arg(help = "Department ID")]
        id: i64,
    },
}

pub async fn handle(cmd: DeptCommands, ctx: &CliContext) -> anyhow::Result<()> {
    ctx.enter(SCREEN)?;
    let departments = ctx.client.departments();

    match cmd {
        DeptCommands::List => {
            let rows = unwrap_envelope(departments.find_all().await?)?;
            output_list(
                &ctx.output,
                "departments",
                &rows,
                &format!("{:<6} {:<24} {}", "ID", "NAME", "UPDATED"),
                |d| format!("{:<6} {:<24} {}", d.id, d.name, display_opt(&d.update_time)),
            )
        }
        DeptCommands::Get { id } => {
            let dept = unwrap_envelope(departments.find_by_id(id).await?)?;
            output_record(&ctx.output, &dept, |d| {
                println!("ID:      {}", d.id);
                println!("Name:    {}", d.name);
                println!("Updated: {}", display_opt(&d.update_time));
            })
        }
        DeptCommands::Add { name } => {
            ctx.ensure_can_edit()?;
            let envelope = departments.add(&AddDepartmentRequest { name: name.clone() }).await?;
            output_mutation(&ctx.output, envelope, &format!("Department '{}' created", name))
        }
        DeptCommands::Update { id, name } => {
            ctx.ensure_can_edit()?;
            let request = UpdateDepartmentRequest {
                id: Some(id),
                department: AddDepartmentRequest { name },
            };
            let envelope = departments.update(&request).await?;
            output_mutation(&ctx.output, envelope, &format!("Department {} updated", id))
        }
        DeptCommands::Delete { id } => {
            ctx.ensure_can_edit()?;
            let envelope = departments.delete(id).await?;
            output_mutation(&ctx.output, envelope, &format!("Department {} deleted", id))
        }
    }
}
