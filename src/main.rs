use clap::{Parser, Subcommand};
use region_edit::{Document, Format};
use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::process;

/// Edit named editable regions inside HTML files.
#[derive(Parser)]
#[command(name = "region-edit", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List regions with their line ranges, as JSON.
    Regions { file: PathBuf },

    /// Print a region's content.
    Get {
        file: PathBuf,
        region: String,
        /// Output markup for the content.
        #[arg(long, value_enum, default_value = "html")]
        format: Format,
    },

    /// Replace a region's entire content (from the argument, or stdin when
    /// omitted).
    Put {
        file: PathBuf,
        region: String,
        content: Option<String>,
        /// Markup the supplied content is written in.
        #[arg(long, value_enum, default_value = "html")]
        format: Format,
    },

    /// Replace occurrences of a substring inside a region.
    Replace {
        file: PathBuf,
        region: String,
        old: String,
        new: String,
        /// Maximum occurrences to replace; -1 or omitted means all.
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
    },

    /// Delete the first occurrence of a substring inside a region.
    Delete {
        file: PathBuf,
        region: String,
        text: String,
    },

    /// Insert text immediately before the first occurrence of a substring.
    InsertBefore {
        file: PathBuf,
        region: String,
        find: String,
        text: String,
    },

    /// Insert text immediately after the first occurrence of a substring.
    InsertAfter {
        file: PathBuf,
        region: String,
        find: String,
        text: String,
    },
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Regions { file } => {
            let doc = Document::load(&file)?;
            println!("{}", serde_json::to_string_pretty(doc.regions())?);
        }
        Command::Get {
            file,
            region,
            format,
        } => {
            let doc = Document::load(&file)?;
            println!("{}", doc.get_region(&region, format)?);
        }
        Command::Put {
            file,
            region,
            content,
            format,
        } => {
            let content = match content {
                Some(c) => c,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let mut doc = Document::load(&file)?;
            doc.put_region(&region, &content, format)?;
            doc.save(&file)?;
        }
        Command::Replace {
            file,
            region,
            old,
            new,
            count,
        } => {
            // -1 keeps the conventional "no limit" spelling.
            let limit = count.filter(|&n| n >= 0).map(|n| n as usize);
            let mut doc = Document::load(&file)?;
            let n = doc.replace_in_region(&region, &old, &new, limit)?;
            doc.save(&file)?;
            println!("replaced {n} occurrence(s)");
        }
        Command::Delete { file, region, text } => {
            let mut doc = Document::load(&file)?;
            doc.delete_in_region(&region, &text)?;
            doc.save(&file)?;
        }
        Command::InsertBefore {
            file,
            region,
            find,
            text,
        } => {
            let mut doc = Document::load(&file)?;
            doc.insert_before_in_region(&region, &find, &text)?;
            doc.save(&file)?;
        }
        Command::InsertAfter {
            file,
            region,
            find,
            text,
        } => {
            let mut doc = Document::load(&file)?;
            doc.insert_after_in_region(&region, &find, &text)?;
            doc.save(&file)?;
        }
    }
    Ok(())
}
