// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};

use offset_inspector::{ClassIndex, Engine, InspectionOptions, Project};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum Format {
    #[default]
    Text,
    Json,
}

fn offsets_analyze(args: AnalyzeArgs) -> Result<()> {
    let mut project = Project::from_file(&args.project)?;
    for file in &args.classes {
        project.classes.merge(ClassIndex::from_file(file)?);
    }

    let options = match &args.options {
        Some(file) => InspectionOptions::from_file(file)?,
        None => InspectionOptions::default(),
    };
    let engine = Engine::new().with_options(options);
    let problems = engine.analyze_project(&project);

    match args.format {
        Format::Text => {
            for problem in &problems {
                match project.module(&problem.file) {
                    // Print the offending line and mark the column with ^.
                    Some(module) if args.context => println!(
                        "{}",
                        module.source.message(
                            problem.line,
                            problem.col,
                            &problem.severity.to_string(),
                            &problem.message
                        )
                    ),
                    _ => println!("{problem}"),
                }
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&problems)?),
    }

    if args.fail_on_problems && !problems.is_empty() {
        bail!("{} problem(s) found", problems.len());
    }
    Ok(())
}

fn offsets_render(project: String) -> Result<()> {
    let project = Project::from_file(&project)?;

    // Print the source text each module was laid out as.
    for module in &project.modules {
        println!("// {}", module.file());
        print!("{}", module.source.contents());
    }
    Ok(())
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Project fixture. json or yaml.
    #[arg(value_name = "project.yaml")]
    project: String,

    /// Additional class declarations. json or yaml.
    #[arg(long, value_name = "classes.yaml")]
    classes: Vec<String>,

    /// Inspection options. json or yaml.
    #[arg(long, short, value_name = "options.yaml")]
    options: Option<String>,

    /// Output format.
    #[arg(long, short, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Show the source line of each problem.
    #[arg(long, short)]
    context: bool,

    /// Exit with an error if any problem is reported.
    #[arg(long)]
    fail_on_problems: bool,
}

#[derive(Subcommand)]
enum OffsetCommand {
    /// Report offset access problems in a project.
    Analyze(AnalyzeArgs),

    /// Print the source text of a project's files.
    Render {
        /// Project fixture. json or yaml.
        project: String,
    },
}

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: OffsetCommand,
}

fn main() -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    // Parse and dispatch command.
    let cli = Cli::parse();
    match cli.command {
        OffsetCommand::Analyze(args) => offsets_analyze(args),
        OffsetCommand::Render { project } => offsets_render(project),
    }
}
