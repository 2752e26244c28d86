mod report;
mod telemetry;
mod tui;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use gradebook_core::{
    expand_key, parse_args, AssignmentField, Class, Config, FileGradeBookRepository,
    GradeBookService,
};

type Service = GradeBookService<FileGradeBookRepository>;

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(about = "Track weighted class grades and the score you need on the rest", long_about = None)]
struct Cli {
    /// Directory holding the stored gradebook (default: ~/.gradebook)
    #[arg(long, global = true, env = "GRADEBOOK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Name of the storage slot inside the data directory
    #[arg(long, global = true, env = "GRADEBOOK_STORAGE_KEY")]
    storage_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List all classes with their current grade
    List,
    /// Show a class's assignments and results (class: id, number or name)
    Show { class: String },
    /// Add a new class, optionally naming it
    AddClass {
        #[arg(trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Remove a class
    RemoveClass { class: String },
    /// Rename a class
    RenameClass {
        class: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        name: Vec<String>,
    },
    /// Add an assignment row (usage: add-row 1 Midterm grade:85 weight:30)
    AddRow {
        class: String,
        /// Row name words and key:value fields (name, grade, weight; prefixes allowed).
        /// Words whose key is not a field, like `Ch:1`, stay in the name.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Set one field of a row (field: name, grade or weight; prefixes allowed)
    Set {
        class: String,
        row: String,
        field: String,
        #[arg(allow_hyphen_values = true, default_value = "")]
        value: String,
    },
    /// Remove an assignment row (the last row cannot be removed)
    RemoveRow { class: String, row: String },
    /// Set the final grade you want to achieve
    Goal {
        class: String,
        #[arg(allow_hyphen_values = true, default_value = "")]
        value: String,
    },
    /// Calculate current grade and the grade needed on remaining weight
    Calc { class: String },
    /// Reset a class to four blank rows and no goal
    Clear { class: String },
    /// Delete all classes
    ClearAll {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Open the Terminal User Interface
    Tui,
}

fn class_id(service: &Service, selector: &str) -> Result<String> {
    service
        .resolve_class(selector)
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow!("No class matches '{}'", selector))
}

fn find_class<'a>(service: &'a Service, selector: &str) -> Result<&'a Class> {
    service
        .resolve_class(selector)
        .ok_or_else(|| anyhow!("No class matches '{}'", selector))
}

fn row_id(class: &Class, selector: &str) -> Result<String> {
    class
        .resolve_assignment(selector)
        .map(|a| a.id.clone())
        .ok_or_else(|| anyhow!("No row '{}' in {}", selector, class.name))
}

fn parse_field(key: &str) -> Result<AssignmentField> {
    let full_key = expand_key(&key.to_lowercase(), &AssignmentField::KEYS)?;
    AssignmentField::from_key(&full_key).ok_or_else(|| anyhow!("Unknown field: '{}'", key))
}

fn confirm_on_stdin(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn main() -> Result<()> {
    telemetry::init_tracing();

    let cli = Cli::parse();
    let config = Config::new(cli.data_dir, cli.storage_key)?;
    let repo = FileGradeBookRepository::new(&config)
        .with_context(|| format!("failed to open {}", config.data_dir.display()))?;
    let mut service = GradeBookService::open(repo)?;

    match cli.command {
        Some(Commands::List) => {
            println!("{}", report::class_table(&service.class_dtos()));
        }
        Some(Commands::Show { class }) | Some(Commands::Calc { class }) => {
            let class = find_class(&service, &class)?;
            println!("{}", report::class_report(class));
        }
        Some(Commands::AddClass { name }) => {
            let id = service.add_class()?;
            if !name.is_empty() {
                service.rename_class(&id, &name.join(" "))?;
            }
            let class = find_class(&service, &id)?;
            println!("Class added: {} (ID: {})", class.name, class.id);
        }
        Some(Commands::RemoveClass { class }) => {
            let class = find_class(&service, &class)?;
            let name = class.name.clone();
            let id = class.id.clone();
            let was_last = service.classes().len() == 1;
            service.remove_class(&id)?;
            println!("Class removed: {}", name);
            if was_last {
                println!("  Started a new {}", service.classes()[0].name);
            }
        }
        Some(Commands::RenameClass { class, name }) => {
            let id = class_id(&service, &class)?;
            service.rename_class(&id, &name.join(" "))?;
        }
        Some(Commands::AddRow { class, args }) => {
            let id = class_id(&service, &class)?;
            let row = service
                .add_assignment(&id)?
                .ok_or_else(|| anyhow!("No class matches '{}'", class))?;

            let parsed = parse_args(&args, &AssignmentField::KEYS);
            if !parsed.name.is_empty() {
                service.update_assignment(&id, &row, AssignmentField::Name, &parsed.name)?;
            }
            for (key, value) in parsed.metadata {
                let field = parse_field(&key)?;
                service.update_assignment(&id, &row, field, &value)?;
            }
            let class = find_class(&service, &id)?;
            println!("Row {} added to {}", class.assignments.len(), class.name);
        }
        Some(Commands::Set { class, row, field, value }) => {
            let class = find_class(&service, &class)?;
            let (id, row) = (class.id.clone(), row_id(class, &row)?);
            let field = parse_field(&field)?;
            service.update_assignment(&id, &row, field, &value)?;
        }
        Some(Commands::RemoveRow { class, row }) => {
            let class = find_class(&service, &class)?;
            let (id, row) = (class.id.clone(), row_id(class, &row)?);
            if !service.remove_assignment(&id, &row)? {
                println!("Cannot remove the only remaining row.");
            }
        }
        Some(Commands::Goal { class, value }) => {
            let id = class_id(&service, &class)?;
            service.set_final_goal(&id, &value)?;
        }
        Some(Commands::Clear { class }) => {
            let id = class_id(&service, &class)?;
            service.clear_class(&id)?;
        }
        Some(Commands::ClearAll { yes }) => {
            let cleared = service.clear_all(|prompt| yes || confirm_on_stdin(prompt))?;
            if cleared {
                println!("All classes deleted.");
            }
        }
        Some(Commands::Tui) | None => {
            tui::run(service)?;
        }
    }
    Ok(())
}
