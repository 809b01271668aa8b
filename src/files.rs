//! Filesystem front end.
//!
//! Reads an exported page and its templates, converts it, and writes the
//! `.tex`, the optional `.bib` and the `images/` directory next to the output.
//! Every path check and the conversion itself run before anything is written,
//! so a refused or failed conversion leaves the filesystem untouched.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::options::{Options, DEFAULT_TEMPLATE_END, DEFAULT_TEMPLATE_START};
use crate::result::Conversion;

/// Name of the image directory the exporter writes next to the page.
pub const IMAGES_DIR: &str = "images";

/// Paths and flags for a file conversion.
#[derive(Debug, Clone)]
pub struct FileOptions {
    /// Exported page; must end with `.html`.
    pub input: PathBuf,
    /// LaTeX output; must end with `.tex`.
    pub output: PathBuf,
    /// Overwrite existing outputs and create a missing output directory.
    pub force: bool,
    /// Preamble template file. `None` uses the bundled template.
    pub template_start: Option<PathBuf>,
    /// Closing template file. `None` uses the bundled template.
    pub template_end: Option<PathBuf>,
}

impl FileOptions {
    /// Options for `input` and `output` with bundled templates and no
    /// overwriting.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            force: false,
            template_start: None,
            template_end: None,
        }
    }
}

/// What [`convert_files`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenFiles {
    pub latex: PathBuf,
    /// Present when the document had BibTeX footnotes.
    pub bibtex: Option<PathBuf>,
    /// Images copied into the output's image directory.
    pub images: Vec<PathBuf>,
}

/// Resolved output locations, checked against the overwrite policy.
struct OutputPlan {
    output_dir: PathBuf,
    bibtex: PathBuf,
    input_images: PathBuf,
    output_images: PathBuf,
}

/// Converts `options.input` and writes the results.
///
/// # Errors
///
/// [`Error::InvalidPath`] when a path check fails, [`Error::Io`] when reading
/// or writing fails, and any conversion error.
pub fn convert_files(options: &FileOptions) -> Result<WrittenFiles> {
    check_input(&options.input)?;
    let plan = plan_outputs(options)?;

    let template_start = read_template(options.template_start.as_deref(), "Start", DEFAULT_TEMPLATE_START)?;
    let template_end = read_template(options.template_end.as_deref(), "End", DEFAULT_TEMPLATE_END)?;

    let html = fs::read(&options.input)?;
    let conversion_options = Options {
        template_start,
        template_end,
        output_file: file_name(&options.output),
        ..Options::default()
    };
    let Conversion { latex, bibtex } = crate::convert_bytes(&html, &conversion_options)?;

    if !plan.output_dir.as_os_str().is_empty() && !plan.output_dir.exists() {
        tracing::info!(dir = %plan.output_dir.display(), "creating output directory");
        fs::create_dir_all(&plan.output_dir)?;
    }

    write_output(&options.output, &latex, options.force)?;
    let bibtex = match bibtex {
        Some(bibtex) => {
            write_output(&plan.bibtex, &bibtex, options.force)?;
            Some(plan.bibtex.clone())
        }
        None => None,
    };

    let images = copy_images(&plan, options.force)?;

    tracing::info!(
        latex = %options.output.display(),
        bibtex = bibtex.is_some(),
        images = images.len(),
        "conversion written"
    );

    Ok(WrittenFiles {
        latex: options.output.clone(),
        bibtex,
        images,
    })
}

fn check_input(input: &Path) -> Result<()> {
    if !has_extension(input, "html") {
        return Err(Error::InvalidPath(format!(
            "Input file should end with .html but is {}",
            input.display()
        )));
    }
    if !input.exists() {
        return Err(Error::InvalidPath(format!(
            "Input HTML not found at {}",
            input.display()
        )));
    }
    if !input.is_file() {
        return Err(Error::InvalidPath(format!(
            "Input HTML not a file at {}",
            input.display()
        )));
    }
    Ok(())
}

fn plan_outputs(options: &FileOptions) -> Result<OutputPlan> {
    let output = &options.output;
    if !has_extension(output, "tex") {
        return Err(Error::InvalidPath(format!(
            "Output file should end with .tex but is {}",
            output.display()
        )));
    }

    let output_dir = parent_dir(output);
    if !output_dir.as_os_str().is_empty() && !output_dir.exists() && !options.force {
        return Err(Error::InvalidPath(format!(
            "Output directory not found at {}. Use -f or --force to create.",
            output_dir.display()
        )));
    }
    if output.is_dir() {
        return Err(Error::InvalidPath(format!(
            "Output is a directory at {}, expected a file",
            output.display()
        )));
    }

    let input_images = parent_dir(&options.input).join(IMAGES_DIR);
    let output_images = output_dir.join(IMAGES_DIR);
    let bibtex = output.with_extension("bib");

    if output_images.exists() && !output_images.is_dir() {
        return Err(Error::InvalidPath(format!(
            "Images output directory is a file at {}, expected a directory.",
            output_images.display()
        )));
    }

    if !options.force {
        for existing in [output, &bibtex] {
            if existing.exists() {
                return Err(Error::InvalidPath(format!(
                    "Output file already exists at {}. Use -f or --force to overwrite.",
                    existing.display()
                )));
            }
        }
        if !same_dir(&input_images, &output_images) && dir_has_entries(&output_images)? {
            return Err(Error::InvalidPath(format!(
                "Images output directory is not empty at {}. Use -f or --force to overwrite.",
                output_images.display()
            )));
        }
    }

    Ok(OutputPlan {
        output_dir,
        bibtex,
        input_images,
        output_images,
    })
}

fn read_template(path: Option<&Path>, which: &str, bundled: &str) -> Result<String> {
    let Some(path) = path else {
        return Ok(bundled.to_string());
    };
    if !path.exists() {
        return Err(Error::InvalidPath(format!(
            "{which} template not found at {}",
            path.display()
        )));
    }
    Ok(fs::read_to_string(path)?)
}

/// Writes `contents`, refusing to replace an existing file unless forced.
fn write_output(path: &Path, contents: &str, force: bool) -> Result<()> {
    let mut file = if force {
        OpenOptions::new().write(true).create(true).truncate(true).open(path)?
    } else {
        OpenOptions::new().write(true).create_new(true).open(path)?
    };
    file.write_all(contents.as_bytes())?;
    Ok(())
}

/// Copies the exporter's image directory next to the output.
fn copy_images(plan: &OutputPlan, force: bool) -> Result<Vec<PathBuf>> {
    if same_dir(&plan.input_images, &plan.output_images) || !plan.input_images.is_dir() {
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    for entry in fs::read_dir(&plan.input_images)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            sources.push(entry.path());
        }
    }
    sources.sort();

    if sources.is_empty() {
        return Ok(sources);
    }
    fs::create_dir_all(&plan.output_images)?;

    let mut copied = Vec::with_capacity(sources.len());
    for source in sources {
        let Some(name) = source.file_name() else {
            continue;
        };
        let target = plan.output_images.join(name);
        if !force && target.exists() {
            return Err(Error::InvalidPath(format!(
                "Image already exists at {}. Use -f or --force to overwrite.",
                target.display()
            )));
        }
        fs::copy(&source, &target)?;
        tracing::debug!(image = %target.display(), "copied image");
        copied.push(target);
    }

    Ok(copied)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Compares directories by canonical path when both exist.
fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => normalize(a) == normalize(b),
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}

fn dir_has_entries(dir: &Path) -> Result<bool> {
    if !dir.is_dir() {
        return Ok(false);
    }
    Ok(fs::read_dir(dir)?.next().is_some())
}
