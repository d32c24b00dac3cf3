mod source;

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use clap_complete::Shell;
use log::warn;

use swagger_cs_client::CSharpClientGenerator;
use swagger_cs_core::config::{DEFAULT_FETCH_TIMEOUT_SECS, GeneratorConfig};
use swagger_cs_core::ir::IrSpec;
use swagger_cs_core::parse::{self, SchemaDocument};
use swagger_cs_core::transform;
use swagger_cs_core::{CodeGenerator, GeneratedFile};

const USAGE_HINT: &str = "usage: swagger-cs <SOURCE> [-o <DIR>]\n\n\
SOURCE is the URL or path of a Swagger/OpenAPI JSON document, e.g.\n  \
swagger-cs http://localhost:5000/swagger/v1/swagger.json\n\n\
Run `swagger-cs --help` for all options.";

const README_FILE: &str = "README.md";

#[derive(Parser)]
#[command(
    name = "swagger-cs",
    about = "Generate a C# HTTP client and models from a Swagger/OpenAPI document",
    version
)]
struct Cli {
    /// URL or path of the document (JSON, or YAML by `.yaml`/`.yml` extension)
    source: Option<String>,

    /// Directory the `{Title}HttpClient` folder is created in
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Timeout in seconds for fetching a remote document
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    timeout: u64,

    /// Do not emit BaseApiClient.cs
    #[arg(long)]
    no_base_client: bool,

    /// List the files and diagnostics without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            output_root: self.output.clone(),
            base_client: !self.no_base_client,
            fetch_timeout: Duration::from_secs(self.timeout),
            ..GeneratorConfig::default()
        }
    }
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        clap_complete::generate(shell, &mut cmd, "swagger-cs", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(source) = cli.source.as_deref() else {
        eprintln!("{USAGE_HINT}");
        return Ok(ExitCode::from(2));
    };

    cmd_generate(source, &cli.generator_config(), cli.dry_run)?;
    Ok(ExitCode::SUCCESS)
}

fn load_spec(source: &str, config: &GeneratorConfig) -> Result<IrSpec> {
    let content = source::load_source(source, config.fetch_timeout)?;
    let parsed = parse_document(source, &content)?;
    Ok(transform::transform(&parsed))
}

fn parse_document(source: &str, content: &str) -> Result<SchemaDocument> {
    let parsed = if source::is_yaml(source) {
        parse::from_yaml(content)
    } else {
        parse::from_json(content)
    };
    parsed.with_context(|| format!("failed to parse {source}"))
}

/// Write generated files to disk under the given base directory.
///
/// Every file path must be relative and stay inside `base`; nothing is
/// written if one does not.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let relative = Path::new(&file.path);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !contained || relative.as_os_str().is_empty() {
            bail!("refusing to write {}: path leaves the output directory", file.path);
        }
    }

    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

/// Generate the "do not edit" README.
fn readme_content(source: &str) -> String {
    format!(
        "# Generated Code - Do Not Edit\n\n\
This directory is **auto-generated** by swagger-cs from `{source}`.\n\
Any manual changes will be overwritten the next time it is run.\n\n\
To regenerate, run:\n\
```\n\
swagger-cs {source}\n\
```\n"
    )
}

fn cmd_generate(source: &str, config: &GeneratorConfig, dry_run: bool) -> Result<()> {
    let ir = load_spec(source, config)?;

    for diagnostic in &ir.diagnostics {
        warn!("{diagnostic}");
    }

    let mut files = CSharpClientGenerator.generate(&ir, config)?;
    if config.readme {
        files.push(GeneratedFile {
            path: README_FILE.to_string(),
            content: readme_content(source),
        });
    }

    let output_dir = config.output_root.join(&ir.info.output_dir);

    if dry_run {
        eprintln!("Would generate {} files in {}", files.len(), output_dir.display());
        for file in &files {
            println!("{}", file.path);
        }
        for diagnostic in &ir.diagnostics {
            eprintln!("{diagnostic}");
        }
        return Ok(());
    }

    eprintln!("Generating {} → {}", ir.info.client_class_name, output_dir.display());
    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;
    write_files(&output_dir, &files)?;

    if !ir.diagnostics.is_empty() {
        eprintln!(
            "{} parts of the document were skipped or degraded (set RUST_LOG=warn for details)",
            ir.diagnostics.len()
        );
    }
    eprintln!("Generated {} files in {}", files.len(), output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["swagger-cs", "swagger.json"]).unwrap();
        let config = cli.generator_config();
        assert_eq!(cli.source.as_deref(), Some("swagger.json"));
        assert_eq!(config.output_root, PathBuf::from("."));
        assert!(config.base_client);
        assert!(config.readme);
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "swagger-cs",
            "http://localhost/swagger.json",
            "-o",
            "out",
            "--timeout",
            "5",
            "--no-base-client",
            "--dry-run",
        ])
        .unwrap();
        let config = cli.generator_config();
        assert_eq!(config.output_root, PathBuf::from("out"));
        assert!(!config.base_client);
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_without_source() {
        let cli = Cli::try_parse_from(["swagger-cs"]).unwrap();
        assert!(cli.source.is_none());
    }

    #[test]
    fn test_parse_document_by_extension() {
        let yaml = "info:\n  title: Y\n  version: v1\npaths: {}\n";
        assert_eq!(parse_document("api.yml", yaml).unwrap().info.title, "Y");

        let err = parse_document("api.json", yaml).unwrap_err();
        assert_eq!(err.to_string(), "failed to parse api.json");
    }

    #[test]
    fn test_write_files_stays_inside_base() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("out");
        let files = [
            GeneratedFile {
                path: "Pet.cs".to_string(),
                content: "public class Pet {}".to_string(),
            },
            GeneratedFile {
                path: "../escaped.cs".to_string(),
                content: String::new(),
            },
        ];

        let err = write_files(&base, &files).unwrap_err();
        assert!(err.to_string().contains("../escaped.cs"));
        assert!(!base.exists());
        assert!(!tmp.path().join("escaped.cs").exists());

        write_files(&base, &files[..1]).unwrap();
        assert!(base.join("Pet.cs").exists());
    }

    #[test]
    fn test_write_files_rejects_absolute_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let absolute = tmp.path().join("abs.cs");
        let files = [GeneratedFile {
            path: absolute.to_string_lossy().into_owned(),
            content: String::new(),
        }];

        assert!(write_files(&tmp.path().join("out"), &files).is_err());
        assert!(!absolute.exists());
    }

    #[test]
    fn test_readme_mentions_source() {
        let readme = readme_content("swagger.json");
        assert!(readme.contains("Do Not Edit"));
        assert!(readme.contains("swagger-cs swagger.json"));
    }
}
