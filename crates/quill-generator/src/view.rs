//! The view handed to templates.

use quill_core::{Config, OutputFile};
use serde::Serialize;

use crate::context::GeneratorContext;

/// Read-only snapshot of the site around one output file.
///
/// Templates see the fields by name: `current`, `siblings`, `children`,
/// `all` and `config`.
#[derive(Debug, Clone, Serialize)]
pub struct ViewContext<'a> {
    /// The file being rendered.
    pub current: &'a OutputFile,

    /// Other files in the same directory.
    pub siblings: Vec<&'a OutputFile>,

    /// Files in directories nested below the current one.
    pub children: Vec<&'a OutputFile>,

    /// Every output file of the run.
    pub all: &'a [OutputFile],

    /// Active configuration.
    pub config: &'a Config,
}

impl<'a> ViewContext<'a> {
    /// Build the view for `current` from the run's output files.
    pub fn new(current: &'a OutputFile, context: &'a GeneratorContext, config: &'a Config) -> Self {
        let dir = current.relative_directory.as_str();
        let current_path = current.full_path();

        let siblings = context
            .output_files
            .iter()
            .filter(|f| f.relative_directory == dir && f.full_path() != current_path)
            .collect();

        let children = context
            .output_files
            .iter()
            .filter(|f| is_nested(&f.relative_directory, dir))
            .collect();

        Self {
            current,
            siblings,
            children,
            all: &context.output_files,
            config,
        }
    }
}

/// Whether `dir` is a child of `parent`: any other directory whose path
/// contains `parent`. `/blogroll` counts as a child of `/blog`.
fn is_nested(dir: &str, parent: &str) -> bool {
    dir != parent && dir.contains(parent)
}

#[cfg(test)]
mod tests {
    use quill_core::InputFile;

    use super::*;

    fn output(name: &str, dir: &str) -> OutputFile {
        OutputFile::new(&InputFile::new(name, ".html", "/input", dir), "/output")
    }

    fn context(files: Vec<OutputFile>) -> GeneratorContext {
        GeneratorContext {
            output_files: files,
            ..GeneratorContext::new("/input", "/output")
        }
    }

    #[test]
    fn test_siblings_exclude_current() {
        let ctx = context(vec![
            output("page1", "/blog"),
            output("page2", "/blog"),
            output("page3", "/other"),
        ]);
        let config = Config::default();
        let current = &ctx.output_files[0];

        let view = ViewContext::new(current, &ctx, &config);

        assert_eq!(view.siblings, vec![&ctx.output_files[1]]);
    }

    #[test]
    fn test_siblings_match_current_by_path() {
        let ctx = context(vec![output("page1", "/blog"), output("page2", "/blog")]);
        let config = Config::default();
        let mut current = ctx.output_files[0].clone();
        current.content = Some("rendered".to_string());

        let view = ViewContext::new(&current, &ctx, &config);

        assert_eq!(view.siblings, vec![&ctx.output_files[1]]);
    }

    #[test]
    fn test_children_match_parent_substring() {
        let ctx = context(vec![
            output("index", "/blog"),
            output("post", "/blog/2024"),
            output("about", "/blog"),
            output("other", "/blogroll"),
        ]);
        let config = Config::default();
        let current = &ctx.output_files[0];

        let view = ViewContext::new(current, &ctx, &config);

        assert_eq!(
            view.children,
            vec![&ctx.output_files[1], &ctx.output_files[3]]
        );
    }

    #[test]
    fn test_root_children_are_every_subdirectory() {
        let ctx = context(vec![
            output("Index", "/"),
            output("about", "/"),
            output("post", "/blog"),
            output("photo", "/blog/2024/img"),
        ]);
        let config = Config::default();

        let view = ViewContext::new(&ctx.output_files[0], &ctx, &config);

        assert_eq!(
            view.children,
            vec![&ctx.output_files[2], &ctx.output_files[3]]
        );
    }

    #[test]
    fn test_all_and_config() {
        let ctx = context(vec![output("page1", "/blog"), output("page2", "/other")]);
        let config = Config {
            site_title: "Notes".to_string(),
            ..Config::default()
        };

        let view = ViewContext::new(&ctx.output_files[0], &ctx, &config);

        assert_eq!(view.all.len(), 2);
        assert!(std::ptr::eq(view.config, &config));
        assert!(std::ptr::eq(view.current, &ctx.output_files[0]));
    }

    #[test]
    fn test_serializes_for_templates() {
        let ctx = context(vec![output("page1", "/blog")]);
        let config = Config::default();
        let view = ViewContext::new(&ctx.output_files[0], &ctx, &config);

        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["current"]["name"], "page1");
        assert_eq!(value["config"]["SiteTitle"], "My Quill Site");
        assert!(value["siblings"].as_array().unwrap().is_empty());
    }
}
