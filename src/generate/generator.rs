use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use handlebars::Handlebars;
use tempfile::NamedTempFile;

use super::{error::GenerateError, template::DEFAULT_TEMPLATE, template_data::TemplateData};
use crate::{
    config::ScannerConfig,
    conflicts::{Conflict, Severity},
};

const TEMPLATE_NAME: &str = "registry";

/// Outcome of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    pub file_path: PathBuf,
    /// Zero in dry-run and when the file was already up to date.
    pub bytes_written: usize,
    pub success: bool,
    pub message: String,
    pub warnings: Vec<String>,
    pub conflicts: Vec<Conflict>,
    pub duration: Duration,
    /// Rendered output, only kept in dry-run.
    pub rendered: Option<String>,
    /// The existing file already matched the rendered output.
    pub unchanged: bool,
}

enum Outcome {
    DryRun(String),
    Unchanged,
    Written(usize),
}

/// Renders [`TemplateData`] and writes the registration module.
pub struct Generator {
    config: ScannerConfig,
}

impl Generator {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Render and write the output file.
    ///
    /// In strict mode any error-severity conflict aborts before rendering,
    /// so the output file is left as it was. Dry-run renders without
    /// touching the filesystem and ignores strict mode.
    pub fn generate(&self, data: &TemplateData) -> GenerationResult {
        let start = Instant::now();
        let file_path = self.config.output_path.clone();

        let mut result = GenerationResult {
            file_path: file_path.clone(),
            warnings: data.warnings.clone(),
            conflicts: data.conflicts.clone(),
            ..Default::default()
        };

        match self.run(data) {
            Ok(Outcome::DryRun(rendered)) => {
                result.success = true;
                result.message = format!(
                    "Dry run: {} would be written ({} bytes)",
                    file_path.display(),
                    rendered.len()
                );
                result.rendered = Some(rendered);
            }
            Ok(Outcome::Unchanged) => {
                result.success = true;
                result.unchanged = true;
                result.message = format!("{} is up to date", file_path.display());
            }
            Ok(Outcome::Written(bytes)) => {
                result.success = true;
                result.bytes_written = bytes;
                result.message = format!(
                    "Generated {} with {} resources and {} pages",
                    file_path.display(),
                    data.count,
                    data.page_count
                );
            }
            Err(e) => {
                result.message = e.to_string();
            }
        }

        result.duration = start.elapsed();
        result
    }

    /// Render `data` with the configured template.
    pub fn render(&self, data: &TemplateData) -> Result<String, GenerateError> {
        let handlebars = self.registry()?;
        Ok(handlebars.render(TEMPLATE_NAME, data)?)
    }

    fn run(&self, data: &TemplateData) -> Result<Outcome, GenerateError> {
        if self.config.strict_mode && !self.config.dry_run {
            let count = data
                .conflicts
                .iter()
                .filter(|c| c.severity == Severity::Error)
                .count();
            if count > 0 {
                return Err(GenerateError::StrictMode { count });
            }
        }

        let rendered = self.render(data)?;

        if self.config.dry_run {
            return Ok(Outcome::DryRun(rendered));
        }

        let path = &self.config.output_path;
        if fs::read(path).is_ok_and(|existing| existing == rendered.as_bytes()) {
            return Ok(Outcome::Unchanged);
        }

        write_atomic(path, rendered.as_bytes())?;
        Ok(Outcome::Written(rendered.len()))
    }

    fn registry(&self) -> Result<Handlebars<'static>, GenerateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        let source = match &self.config.template_path {
            Some(path) => fs::read_to_string(path).map_err(|source| GenerateError::ReadTemplate {
                path: path.clone(),
                source,
            })?,
            None => DEFAULT_TEMPLATE.to_string(),
        };

        handlebars
            .register_template_string(TEMPLATE_NAME, source)
            .map_err(|source| GenerateError::Template {
                name: TEMPLATE_NAME.to_string(),
                source,
            })?;

        Ok(handlebars)
    }
}

/// Write through a temp file in the target directory, then rename over
/// `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), GenerateError> {
    let write_error = |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_error)?;

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(contents).map_err(write_error)?;
    file.flush().map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;

    Ok(())
}
