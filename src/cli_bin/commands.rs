//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use matter_yaml::{
    CodecConfig, DecodeOptions, EncodeOptions, ErrorKind, FrontMatter, FrontMatterCodec,
};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Execute the parse command
pub fn parse_command(args: ParseArgs) -> Result<()> {
    debug!("Executing parse command with args: {:?}", args);

    let files = resolve_files(&args.files);
    if files.is_empty() {
        warn!("No files found to process");
        return Ok(());
    }

    let codec = create_codec(&args.decode, EncodeOptions::default());
    let mut results = BTreeMap::new();
    for file in &files {
        let text = read_to_string(file)?;
        let record = codec
            .parse(&text)
            .with_context(|| format!("failed to parse {}", file.display()))?;
        results.insert(file.to_string_lossy().to_string(), record);
    }

    let output = if results.len() == 1 {
        let record = results.values().next().context("no parsed records")?;
        render_output(record, args.format, args.pretty)?
    } else {
        render_output(&results, args.format, args.pretty)?
    };
    println!("{}", output.trim_end());
    Ok(())
}

/// Execute the validate command; returns whether every file is valid
pub fn validate_command(args: ValidateArgs) -> Result<bool> {
    debug!("Executing validate command with args: {:?}", args);

    let codec = create_codec(&args.decode, EncodeOptions::default());
    let mut invalid = 0;
    for file in resolve_files(&args.files) {
        let text = read_to_string(&file)?;
        match codec.parse(&text) {
            Ok(_) => println!("{}: OK", file.display()),
            Err(e) => {
                invalid += 1;
                println!("{}: Invalid ({})", file.display(), e);
            }
        }
    }

    if invalid > 0 {
        warn!("{} invalid files", invalid);
    }
    Ok(invalid == 0)
}

/// Execute the serialize command
pub fn serialize_command(args: SerializeArgs) -> Result<()> {
    debug!("Executing serialize command with args: {:?}", args);

    let options = encode_options(&args.encode)?;
    let raw = read_to_string(&args.record)?;
    let record: Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to read record from {}", args.record.display()))?;
    let Value::Mapping(record) = record else {
        bail!(
            "record file {} must be a mapping with `data` and `content`",
            args.record.display()
        );
    };

    let data = record.get("data").unwrap_or(&Value::Null);
    let content = record.get("content").unwrap_or(&Value::Null);
    let text = FrontMatterCodec::new().serialize_value_with(data, content, &options)?;

    match &args.output {
        Some(path) => {
            write_atomic(path, &text)?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Execute the fmt command; returns whether every file was already formatted
pub fn fmt_command(args: FmtArgs) -> Result<bool> {
    debug!("Executing fmt command with args: {:?}", args);

    let codec = create_codec(&args.decode, encode_options(&args.encode)?);
    let mut clean = true;
    let mut formatted = 0;

    for file in resolve_files(&args.files) {
        let original = read_to_string(&file)?;
        let Some(updated) = reformat(&codec, &file, &original) else {
            clean = false;
            continue;
        };
        if updated == original {
            continue;
        }

        if args.check {
            println!("{}", file.display());
            clean = false;
        } else {
            write_atomic(&file, &updated)?;
            formatted += 1;
            info!("Formatted: {}", file.display());
        }
    }

    info!("Formatted {} files", formatted);
    Ok(clean)
}

/// Parse and re-serialize one document
///
/// Documents without front matter come back unchanged; documents that cannot
/// be round-tripped are reported and yield `None`.
fn reformat(codec: &FrontMatterCodec, file: &Path, original: &str) -> Option<String> {
    let FrontMatter { data, content } = match codec.parse(original) {
        Ok(record) => record,
        Err(e) if e.kind() == ErrorKind::Format => {
            debug!("No front matter in {}", file.display());
            return Some(original.to_string());
        }
        Err(e) => {
            warn!("Skipping {}: {}", file.display(), e);
            return None;
        }
    };

    match codec.serialize_value(&data, &Value::String(content)) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Skipping {}: {}", file.display(), e);
            None
        }
    }
}

fn create_codec(decode: &DecodeArgs, encode: EncodeOptions) -> FrontMatterCodec {
    FrontMatterCodec::with_config(CodecConfig {
        decode: DecodeOptions {
            allow_custom_tags: decode.allow_custom_tags,
        },
        encode,
    })
}

/// Merge the options file (if any) with command-line flags
fn encode_options(args: &EncodeArgs) -> Result<EncodeOptions> {
    let mut options = match &args.options_file {
        Some(path) => {
            let raw = read_to_string(path)?;
            serde_yaml::from_str(&raw)
                .with_context(|| format!("invalid encode options in {}", path.display()))?
        }
        None => EncodeOptions::default(),
    };

    if let Some(indent) = args.indent {
        options.indent = indent;
    }
    if args.flow_level.is_some() {
        options.flow_level = args.flow_level;
    }
    options.no_array_indent |= args.no_array_indent;
    options.sort_keys |= args.sort_keys;
    options.skip_invalid |= args.skip_invalid;
    Ok(options)
}

fn render_output<T: serde::Serialize>(value: &T, format: OutputFormat, pretty: bool) -> Result<String> {
    Ok(match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|s| s == "md" || s == "markdown")
        .unwrap_or(false)
}

/// Expand directories into the markdown files below them
fn resolve_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && is_markdown(entry.path()) {
                    files.push(entry.path().to_owned());
                }
            }
        } else {
            warn!("Skipping missing path: {}", path.display());
        }
    }
    files
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file {}", path.display()))
}

/// Write through a temporary file in the target directory, then rename
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write file {}", path.display()))?;
    Ok(())
}
