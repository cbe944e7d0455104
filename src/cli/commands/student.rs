use clap::Subcommand;

use crate::api::student::{AddStudentRequest, SearchStudentRequest, UpdateStudentRequest};
use crate::cli::context::CliContext;
use crate::cli::utils::*;

const SCREEN: &str = "/stud";

#[derive(Subcommand)]
pub enum StudentCommands {
    #[command(about = "Search students")]
    Search {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
        #[arg(long, help = "Name substring")]
        name: Option<String>,
        #[arg(long, help = "Education level ID")]
        education_level: Option<i64>,
        #[arg(long, help = "Class ID")]
        clazz_id: Option<i64>,
    },

    #[command(about = "Show one student")]
    Get {
        #[arg(help = "Student ID")]
        id: i64,
    },

    #[command(about = "Create student from JSON on stdin")]
    Add,

    #[command(about = "Update student from JSON on stdin")]
    Update {
        #[arg(help = "Student ID (overrides any id in the input)")]
        id: Option<i64>,
    },

    #[command(about = "Delete one or more students")]
    Delete {
        #[arg(required = true, help = "Student IDs, comma or space separated")]
        ids: Vec<String>,
    },
}

pub async fn handle(cmd: StudentCommands, ctx: &CliContext) -> anyhow::Result<()> {
    ctx.enter(SCREEN)?;
    let students = ctx.client.students();

    match cmd {
        StudentCommands::Search { page, page_size, name, education_level, clazz_id } => {
            let request = SearchStudentRequest { page, page_size, name, education_level, clazz_id };
            let result = unwrap_envelope(students.search(&request).await?)?;
            output_page(
                &ctx.output,
                "students",
                &result,
                &format!("{:<6} {:<12} {:<16} {:<8} {:<12} {:<16} {:<12}", "ID", "NO", "NAME", "GENDER", "EDUCATION", "CLASS", "INTAKE"),
                |s| {
                    format!(
                        "{:<6} {:<12} {:<16} {:<8} {:<12} {:<16} {:<12}",
                        s.id,
                        s.no,
                        s.name,
                        s.gender,
                        s.education_level,
                        display_opt(&s.clazz_name),
                        display_opt(&s.intake_date)
                    )
                },
            )
        }
        StudentCommands::Get { id } => {
            let detail = unwrap_envelope(students.find_by_id(id).await?)?;
            output_record(&ctx.output, &detail, |s| {
                println!("ID:        {}", display_opt(&s.id));
                println!("Name:      {}", s.name);
                println!("Gender:    {}", display_opt(&s.gender));
                println!("Birthdate: {}", display_opt(&s.birthdate));
                println!("Phone:     {}", s.phone);
                println!("Email:     {}", s.email);
                println!("Address:   {}", s.address);
                println!("Education: {}", display_opt(&s.education_level));
                println!("Class:     {}", display_opt(&s.clazz_id));
                println!("Intake:    {}", display_opt(&s.intake_date));
            })
        }
        StudentCommands::Add => {
            ctx.ensure_can_edit()?;
            let request: AddStudentRequest = read_json_stdin()?;
            let envelope = students.add(&request).await?;
            output_mutation(&ctx.output, envelope, &format!("Student '{}' created", request.name))
        }
        StudentCommands::Update { id } => {
            ctx.ensure_can_edit()?;
            let mut request: UpdateStudentRequest = read_json_stdin()?;
            if id.is_some() {
                request.id = id;
            }
            let envelope = students.update(&request).await?;
            output_mutation(&ctx.output, envelope, &format!("Student {} updated", display_opt(&request.id)))
        }
        StudentCommands::Delete { ids } => {
            ctx.ensure_can_edit()?;
            let ids = parse_ids(&ids)?;
            let envelope = students.delete(&ids).await?;
            output_mutation(&ctx.output, envelope, &format!("Deleted {} student(s)", ids.len()))
        }
    }
}
