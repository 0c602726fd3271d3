//! Command-line front end: analyze a markup file or preview a row insertion.
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use markup_lint_config::Config;
use markup_lint_engine::{
    Analyzer, DiagnosticTag, InsertOptions, InsertPosition, ProjectKind, Severity, compute_insertion_with,
    text::line_col,
};
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

#[derive(Parser)]
#[command(name = "markup-lint")]
#[command(about = "Diagnostics and grid edits for XAML markup")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report diagnostics for a file
    Analyze {
        file: PathBuf,
        /// Overrides the configured project kind (uwp, wpf, xamarin_forms)
        #[arg(long)]
        project: Option<ProjectKind>,
        /// Also print hidden diagnostics
        #[arg(long)]
        hidden: bool,
    },
    /// Preview inserting a row definition at a byte offset
    InsertRow {
        file: PathBuf,
        offset: usize,
        /// Insert after the definition at the offset instead of before it
        #[arg(long)]
        after: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::debug!("no config file at {}, using defaults", Config::config_path().display());
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    match args.command {
        Command::Analyze { file, project, hidden } => {
            let has_errors = analyze(&config, &file, project, hidden)?;
            if has_errors {
                process::exit(1);
            }
        }
        Command::InsertRow { file, offset, after } => insert_row(&config, &file, offset, after)?,
    }
    Ok(())
}

/// Prints every tag and returns whether any of them is an error.
fn analyze(config: &Config, file: &Path, project: Option<ProjectKind>, hidden: bool) -> Result<bool> {
    let content = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let file_name = file_name(file)?;
    let project = project.unwrap_or(config.project_kind);
    log::info!("analyzing {} as a {project} project", file.display());

    let mut analyzer = Analyzer::new(project);
    let mut tags = analyzer.analyze(&content, &file_name, &config.suppressions);
    config.apply_severities(&mut tags);

    for tag in tags.iter().filter(|t| hidden || t.severity != Severity::Hidden) {
        println!("{}", format_tag(&file.display().to_string(), &content, tag));
    }
    Ok(tags.iter().any(|t| t.severity == Severity::Error))
}

fn insert_row(config: &Config, file: &Path, offset: usize, after: bool) -> Result<()> {
    let content = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let options = InsertOptions {
        position: if after { InsertPosition::After } else { InsertPosition::Before },
        new_definition: config.row_definition_template.clone(),
    };

    let insertion = compute_insertion_with(&content, offset, &options);
    if !insertion.is_enabled() {
        bail!("no row definition at offset {offset} in {}", file.display());
    }
    for replacement in &insertion.replacements {
        log::info!("{} -> {}", replacement.find, replacement.replace);
    }
    println!("{}", insertion.preview_text);
    Ok(())
}

fn file_name(file: &Path) -> Result<String> {
    file.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("{} has no file name", file.display()))
}

fn format_tag(path: &str, content: &str, tag: &DiagnosticTag) -> String {
    let (line, col) = line_col(content, tag.span.start);
    format!(
        "{path}:{line}:{col} {} {} {}",
        tag.severity, tag.error_code, tag.description
    )
}
