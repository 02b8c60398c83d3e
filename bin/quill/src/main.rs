//! Quill CLI
//!
//! Static site generator for Markdown and Tera sites.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Quill.
#[derive(Parser)]
#[command(name = "quill", version, about = "A static site generator for Markdown and Tera")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Generate the site into the output directory
    Generate {
        /// Input directory
        #[arg(short, long, default_value = ".")]
        input: PathBuf,
        /// Output directory [default: <input>/www]
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Keep the temp folder when generation fails
        #[arg(long)]
        keep_temp_on_error: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    quill::init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            output,
            keep_temp_on_error,
        } => {
            quill::cmd::generate::run(&input, output.as_deref(), keep_temp_on_error)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_generate_defaults() {
        let cli = Cli::parse_from(["quill", "generate"]);
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Generate {
                input,
                output,
                keep_temp_on_error,
            } => {
                assert_eq!(input, PathBuf::from("."));
                assert!(output.is_none());
                assert!(!keep_temp_on_error);
            }
        }
    }

    #[test]
    fn test_cli_generate_short_flags() {
        let cli = Cli::parse_from(["quill", "generate", "-i", "site", "-o", "dist"]);

        match cli.command {
            Commands::Generate { input, output, .. } => {
                assert_eq!(input, PathBuf::from("site"));
                assert_eq!(output, Some(PathBuf::from("dist")));
            }
        }
    }

    #[test]
    fn test_cli_generate_long_flags() {
        let cli = Cli::parse_from([
            "quill",
            "generate",
            "--input",
            "site",
            "--output",
            "dist",
            "--keep-temp-on-error",
        ]);

        match cli.command {
            Commands::Generate {
                input,
                output,
                keep_temp_on_error,
            } => {
                assert_eq!(input, PathBuf::from("site"));
                assert_eq!(output, Some(PathBuf::from("dist")));
                assert!(keep_temp_on_error);
            }
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let cli = Cli::parse_from(["quill", "-vvv", "generate"]);
        assert_eq!(cli.verbose, 3);

        let cli = Cli::parse_from(["quill", "generate", "-v"]);
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["quill"]).is_err());
    }
}
