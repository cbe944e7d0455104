use chrono::NaiveDate;
use clap::Subcommand;

use crate::api::employee::{AddEmployeeRequest, SearchEmployeeRequest, UpdateEmployeeRequest};
use crate::cli::context::CliContext;
use crate::cli::utils::*;

const SCREEN: &str = "/emp";

#[derive(Subcommand)]
pub enum EmpCommands {
    #[command(about = "Search employees")]
    Search {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
        #[arg(long, help = "Name substring")]
        name: Option<String>,
        #[arg(long, help = "Gender code")]
        gender: Option<String>,
        #[arg(long, help = "Hired on or after (YYYY-MM-DD)")]
        start_date: Option<NaiveDate>,
        #[arg(long, help = "Hired on or before (YYYY-MM-DD)")]
        end_date: Option<NaiveDate>,
    },

    #[command(about = "Show one employee")]
    Get {
        #[arg(help = "Employee ID")]
        id: i64,
    },

    #[command(about = "Create employee from JSON on stdin")]
    Add,

    #[command(about = "Update employee from JSON on stdin")]
    Update {
        #[arg(help = "Employee ID (overrides any id in the input)")]
        id: Option<i64>,
    },

    #[command(about = "Delete one or more employees")]
    Delete {
        #[arg(required = true, help = "Employee IDs, comma or space separated")]
        ids: Vec<String>,
    },
}

pub async fn handle(cmd: EmpCommands, ctx: &CliContext) -> anyhow::Result<()> {
    ctx.enter(SCREEN)?;
    let employees = ctx.client.employees();

    match cmd {
        EmpCommands::Search { page, page_size, name, gender, start_date, end_date } => {
            let request = SearchEmployeeRequest { page, page_size, name, gender, start_date, end_date };
            let result = unwrap_envelope(employees.search(&request).await?)?;
            output_page(
                &ctx.output,
                "employees",
                &result,
                &format!("{:<6} {:<16} {:<8} {:<16} {:<16} {:<12}", "ID", "NAME", "GENDER", "DEPARTMENT", "JOB TITLE", "HIRED"),
                |e| {
                    format!(
                        "{:<6} {:<16} {:<8} {:<16} {:<16} {:<12}",
                        e.id,
                        e.name,
                        e.gender,
                        display_opt(&e.dept_name),
                        display_opt(&e.job_title),
                        display_opt(&e.hire_date)
                    )
                },
            )
        }
        EmpCommands::Get { id } => {
            let detail = unwrap_envelope(employees.find_by_id(id).await?)?;
            output_record(&ctx.output, &detail, |e| {
                println!("ID:         {}", display_opt(&e.id));
                println!("Username:   {}", e.username);
                println!("Name:       {}", e.name);
                println!("Gender:     {}", display_opt(&e.gender));
                println!("Phone:      {}", e.phone);
                println!("Job title:  {}", display_opt(&e.job_title));
                println!("Department: {}", display_opt(&e.dept_id));
                println!("Hired:      {}", display_opt(&e.hire_date));
            })
        }
        EmpCommands::Add => {
            ctx.ensure_can_edit()?;
            let request: AddEmployeeRequest = read_json_stdin()?;
            let envelope = employees.add(&request).await?;
            output_mutation(&ctx.output, envelope, &format!("Employee '{}' created", request.name))
        }
        EmpCommands::Update { id } => {
            ctx.ensure_can_edit()?;
            let mut request: UpdateEmployeeRequest = read_json_stdin()?;
            if id.is_some() {
                request.id = id;
            }
            let envelope = employees.update(&request).await?;
            output_mutation(&ctx.output, envelope, &format!("Employee {} updated", display_opt(&request.id)))
        }
        EmpCommands::Delete { ids } => {
            ctx.ensure_can_edit()?;
            let ids = parse_ids(&ids)?;
            let envelope = employees.delete(&ids).await?;
            output_mutation(&ctx.output, envelope, &format!("Deleted {} employee(s)", ids.len()))
        }
    }
}
