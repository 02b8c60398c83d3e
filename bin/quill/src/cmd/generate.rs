//! Generate command - renders the site into the output directory

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr, eyre};
use quill_core::Config;
use quill_generator::{
    DiskFileSystem, FileSystem, GenerateStats, Generator, GeneratorContext, HtmlFormatProcessor,
    MarkdownProcessor, StaticProcessor, TemplateProcessor, TeraRenderer,
};

/// Default output directory name inside the input directory.
pub const DEFAULT_OUTPUT_DIR: &str = "www";

/// Run the generate command.
///
/// Reads the site from `input` and writes it to `output`, which defaults to
/// `<input>/www`.
pub fn run(input: &Path, output: Option<&Path>, keep_temp_on_error: bool) -> Result<GenerateStats> {
    let start = Instant::now();

    let input = std::path::absolute(input).wrap_err("Failed to resolve input directory")?;
    if !input.is_dir() {
        return Err(eyre!("Input directory does not exist: {}", input.display()));
    }

    let output = match output {
        Some(dir) => std::path::absolute(dir).wrap_err("Failed to resolve output directory")?,
        None => input.join(DEFAULT_OUTPUT_DIR),
    };

    tracing::info!(?input, ?output, "Starting generation");

    let config = Config::load_from_dir(&input).wrap_err("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let mut generator = build_generator(config, input, output.clone())?;
    generator.keep_temp_on_error(keep_temp_on_error);

    let stats = generator.generate().wrap_err("Generation failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Generation completed successfully!");
    println!();
    println!("  Inputs:     {}", stats.inputs);
    println!("  Pages:      {}", stats.pages);
    println!("  Copied:     {}", stats.copied);
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output.display());
    println!();

    tracing::info!(?stats, ?duration, "Generation completed successfully");

    Ok(stats)
}

/// Wire the disk file system and the standard processors.
///
/// Processors run in the order Markdown, Template, Static, HtmlFormat.
fn build_generator(config: Config, input: PathBuf, output: PathBuf) -> Result<Generator> {
    let fs: Arc<dyn FileSystem> = Arc::new(DiskFileSystem::new(config.clone()));
    let renderer = TeraRenderer::new(&input);

    let mut generator = Generator::new(fs.clone(), GeneratorContext::new(input, output))?;
    generator
        .add_processor(MarkdownProcessor::new(fs.clone(), config.clone()))
        .add_processor(TemplateProcessor::new(fs, config.clone(), renderer))
        .add_processor(StaticProcessor::new(config.clone()))
        .add_processor(HtmlFormatProcessor::new(&config));

    Ok(generator)
}
