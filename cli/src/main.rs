//! svgtext CLI - fix and update text in SVG documents

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use svgtext::{
    normalize_file, normalize_paths, parse_file, update_file, FieldOutcome, FieldValue,
    SaveOptions,
};

#[derive(Parser)]
#[command(name = "svgtext")]
#[command(version)]
#[command(about = "Fix and update text runs in SVG documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite literal \n markers into tspan line runs
    Fix {
        /// Input SVG file(s)
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (single input only; in-place with backup if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Skip the timestamped backup when overwriting in place
        #[arg(long)]
        no_backup: bool,

        /// Process batch inputs one at a time
        #[arg(long)]
        sequential: bool,

        /// Print a JSON report instead of human-readable output
        #[arg(long)]
        json: bool,
    },

    /// Set the text of identified fields
    Set {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// New text for the element with id="TITLE"
        #[arg(long)]
        title: Option<String>,

        /// New text for the element with id="DESCRIPTION"
        #[arg(long)]
        description: Option<String>,

        /// Additional ID=VALUE pair (repeatable)
        #[arg(long = "field", value_name = "ID=VALUE")]
        fields: Vec<String>,

        /// Output file (in-place with backup if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Skip the timestamped backup when overwriting in place
        #[arg(long)]
        no_backup: bool,

        /// Print a JSON report instead of human-readable output
        #[arg(long)]
        json: bool,
    },

    /// Show document information
    Info {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fix {
            inputs,
            output,
            no_backup,
            sequential,
            json,
        } => cmd_fix(&inputs, output.as_deref(), no_backup, sequential, json),
        Commands::Set {
            input,
            title,
            description,
            fields,
            output,
            no_backup,
            json,
        } => cmd_set(
            &input,
            title,
            description,
            &fields,
            output.as_deref(),
            no_backup,
            json,
        ),
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn save_options(no_backup: bool, sequential: bool) -> SaveOptions {
    let mut options = SaveOptions::new();
    if no_backup {
        options = options.without_backup();
    }
    if sequential {
        options = options.sequential();
    }
    options
}

fn cmd_fix(
    inputs: &[PathBuf],
    output: Option<&Path>,
    no_backup: bool,
    sequential: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if output.is_some() && inputs.len() > 1 {
        return Err("--output requires a single input file".into());
    }
    let options = save_options(no_backup, sequential);

    if let [input] = inputs {
        let report = normalize_file(input, output, &options)?;
        if json {
            println!("{}", report.to_json(true)?);
            return Ok(());
        }
        if let Some(ref backup) = report.backup {
            println!("{} {}", "Backup written:".dimmed(), backup.display());
        }
        print_fix_summary(input, report.changed);
        return Ok(());
    }

    let pb = (!json).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Processing {} files...", inputs.len()));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });
    let results = normalize_paths(inputs, &options);
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if json {
        let entries: Vec<serde_json::Value> = results
            .iter()
            .map(|(path, result)| match result {
                Ok(report) => serde_json::json!({
                    "path": path,
                    "changed": report.changed,
                    "backup": report.backup,
                }),
                Err(e) => serde_json::json!({
                    "path": path,
                    "error": e.to_string(),
                }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (path, result) in &results {
            match result {
                Ok(report) => print_fix_summary(path, report.changed),
                Err(e) => eprintln!("{} {}: {}", "✗".red(), path.display(), e),
            }
        }
    }

    let failures = results.iter().filter(|(_, r)| r.is_err()).count();
    if failures > 0 {
        return Err(format!("{failures} of {} files failed", results.len()).into());
    }
    Ok(())
}

fn print_fix_summary(path: &Path, changed: usize) {
    if changed > 0 {
        println!(
            "{} {}: {} text {} rewritten",
            "✓".green(),
            path.display(),
            changed,
            if changed == 1 { "element" } else { "elements" }
        );
    } else {
        println!(
            "{} {}: no \\n sequences found in text content",
            "Note".yellow(),
            path.display()
        );
    }
}

fn cmd_set(
    input: &Path,
    title: Option<String>,
    description: Option<String>,
    field_specs: &[String],
    output: Option<&Path>,
    no_backup: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut fields = Vec::new();
    if let Some(title) = title {
        fields.push(FieldValue::new("TITLE", title));
    }
    if let Some(description) = description {
        fields.push(FieldValue::new("DESCRIPTION", description));
    }
    for spec in field_specs {
        fields.push(FieldValue::parse(spec)?);
    }
    if fields.is_empty() {
        return Err("nothing to do: provide --title, --description or --field".into());
    }

    let options = save_options(no_backup, false);
    let report = update_file(input, output, &fields, &options)?;

    if json {
        println!("{}", report.to_json(true)?);
        return Ok(());
    }

    if let Some(ref backup) = report.backup {
        println!("{} {}", "Backup written:".dimmed(), backup.display());
    }
    for field in &report.fields {
        match field.outcome {
            FieldOutcome::Updated => {
                println!("{} {}", "Updated".green(), field.id);
            }
            FieldOutcome::NotFound => {
                eprintln!(
                    "{}: no element with id {:?}",
                    "Warning".yellow().bold(),
                    field.id
                );
            }
            FieldOutcome::Empty => {
                eprintln!(
                    "{}: id {:?} is a group with no text element inside",
                    "Warning".yellow().bold(),
                    field.id
                );
            }
        }
    }
    if !report.any_updated() {
        eprintln!("{}: no fields were updated", "Warning".yellow().bold());
    }
    println!(
        "{} {} of {} fields updated",
        "Done!".green().bold(),
        report.updated_count(),
        report.fields.len()
    );

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(width) = doc.width() {
        println!("{}: {}", "Width".bold(), width);
    }
    if let Some(height) = doc.height() {
        println!("{}: {}", "Height".bold(), height);
    }
    if let Some(view_box) = doc.view_box() {
        println!("{}: {}", "ViewBox".bold(), view_box);
    }
    println!("{}: {}", "Elements".bold(), doc.element_count());

    println!();
    println!("{}", "Text Elements".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let mut count = 0;
    for text in doc.text_elements() {
        count += 1;
        let id = text.id().unwrap_or("-");
        let content = text.display_text();
        println!("  {} {}", format!("[{id}]").bold(), preview(&content, 60));
    }
    if count == 0 {
        println!("  {}", "(none)".dimmed());
    }

    Ok(())
}

fn preview(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " / ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{cut}…")
    }
}
