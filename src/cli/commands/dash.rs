use clap::Subcommand;
use serde_json::json;

use crate::cli::context::CliContext;
use crate::cli::utils::*;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum DashCommands {
    #[command(about = "Employee counts by job title and gender")]
    Emp,

    #[command(about = "Student counts by class and education level")]
    Student,
}

pub async fn handle(cmd: DashCommands, ctx: &CliContext) -> anyhow::Result<()> {
    match cmd {
        DashCommands::Emp => {
            ctx.enter("/dash-emp")?;
            let (titles, genders) = ctx.client.dashboard().employee_overview().await?;
            let titles = unwrap_envelope(titles)?;
            let genders = unwrap_envelope(genders)?;

            match ctx.output {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({
                        "jobTitles": titles,
                        "genders": genders,
                    }))?);
                }
                OutputFormat::Text => {
                    print_counts("By job title", titles.pairs());
                    println!();
                    print_counts("By gender", genders.iter().map(|g| (g.gender.as_str(), g.count)).collect());
                }
            }
            Ok(())
        }
        DashCommands::Student => {
            ctx.enter("/dash-clazz-stud")?;
            let (classes, levels) = ctx.client.dashboard().student_overview().await?;
            let classes = unwrap_envelope(classes)?;
            let levels = unwrap_envelope(levels)?;

            match ctx.output {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({
                        "classes": classes,
                        "educationLevels": levels,
                    }))?);
                }
                OutputFormat::Text => {
                    print_counts("By class", classes.pairs());
                    println!();
                    print_counts(
                        "By education level",
                        levels.iter().map(|l| (l.education_level.as_str(), l.count)).collect(),
                    );
                }
            }
            Ok(())
        }
    }
}

fn print_counts(title: &str, pairs: Vec<(&str, i64)>) {
    println!("{}", title);
    if pairs.is_empty() {
        println!("  (no data)");
        return;
    }
    let width = pairs.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    for (label, count) in pairs {
        println!("  {:<width$}  {}", label, count, width = width);
    }
}
