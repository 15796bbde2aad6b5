//! CLI tool for generating a photo slide deck from a folder of images.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Input;
use photodeck_core::{find_images, Deck};
use photodeck_pptx::PptxWriter;

mod open;

use open::{FileOpener, NoopOpener, SystemOpener};

/// Generate a .pptx slide deck from a folder of images.
#[derive(Parser, Debug)]
#[command(name = "photodeck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image folder (default: current directory)
    folder: Option<PathBuf>,

    /// Output file (default: presentation.pptx inside the image folder)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Deck title (prompted for interactively when omitted)
    #[arg(long)]
    title: Option<String>,

    /// Deck subtitle (prompted for interactively when omitted)
    #[arg(long)]
    subtitle: Option<String>,

    /// Do not open the finished deck with the default application
    #[arg(long)]
    no_open: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let folder = match &args.folder {
        Some(folder) => folder.clone(),
        None => env::current_dir().context("Failed to resolve the current directory")?,
    };
    let folder = folder
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", folder.display()))?;

    let images = find_images(&folder)?;
    if args.verbose {
        eprintln!("Found {} image(s) in {}", images.len(), folder.display());
    }

    // Both strings are required before any slide is generated.
    let title = flag_or_prompt(args.title.clone(), "Enter a title")?;
    let subtitle = flag_or_prompt(args.subtitle.clone(), "Enter a subtitle")?;

    let mut deck = Deck::new();
    deck.add_title_slide(title, subtitle);

    for image in images {
        log::info!("Adding slide for {}", image.basename);
        deck.add_image_slide(image)?;
    }

    let output_path = get_output_path(&folder, args.output.as_ref());
    PptxWriter::new()
        .write_file(&deck, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!(
        "Wrote {} slide(s) to {}",
        deck.slide_count(),
        output_path.display()
    );

    let opener: Box<dyn FileOpener> = if args.no_open {
        Box::new(NoopOpener)
    } else {
        Box::new(SystemOpener)
    };
    if let Err(e) = opener.open(&output_path) {
        log::warn!("Failed to open {}: {}", output_path.display(), e);
    }

    Ok(())
}

/// Use the flag value when given, otherwise block on an interactive prompt.
fn flag_or_prompt(preset: Option<String>, prompt: &str) -> Result<String> {
    match preset {
        Some(value) => Ok(value),
        None => {
            let value = Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .context("Failed to read input")?;
            Ok(value)
        }
    }
}

/// Determine the output path: explicit flag, or presentation.pptx in the
/// image folder.
fn get_output_path(folder: &Path, output: Option<&PathBuf>) -> PathBuf {
    match output {
        Some(path) => path.clone(),
        None => folder.join("presentation.pptx"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_defaults_into_folder() {
        let path = get_output_path(Path::new("/photos"), None);
        assert_eq!(path, PathBuf::from("/photos/presentation.pptx"));
    }

    #[test]
    fn test_output_flag_wins() {
        let explicit = PathBuf::from("/tmp/deck.pptx");
        let path = get_output_path(Path::new("/photos"), Some(&explicit));
        assert_eq!(path, explicit);
    }
}
