//! `cnt resolve` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use cnt_config::{CliSettings, Config, OutputFormat};
use cnt_counter::{DirectiveResolver, Resolution};
use cnt_markdown::{MarkdownParser, to_html, to_markdown};
use cnt_tree::Node;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Markdown input file (default: stdin, also with "-").
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Directive name to resolve (overrides config).
    #[arg(long, env = "CNT_DIRECTIVE")]
    directive: Option<String>,

    /// Path to configuration file (default: auto-discover cnt.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Exit with an error when a counter reference is undefined.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output (show debug logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Output format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Markdown,
    Html,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Markdown => Self::Markdown,
            FormatArg::Html => Self::Html,
            FormatArg::Json => Self::Json,
        }
    }
}

impl ResolveArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            directive: self.directive,
            format: self.format.map(OutputFormat::from),
            strict: self.strict.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            path = ?config.config_path,
            format = %config.output.format,
            directive = %config.counter.directive,
            strict = config.output.strict,
            "Loaded configuration"
        );

        let source = read_input(self.input.as_deref())?;
        let resolved = resolve_document(&source, &config)?;

        for warning in &resolved.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        for error in &resolved.resolution.errors {
            output.warning(&format!("Warning: {error}"));
        }

        write_output(self.output.as_deref(), &resolved.document)?;
        if let Some(path) = &self.output {
            output.success(&written_message(path, config.output.format));
        }

        let errors = resolved.resolution.errors.len();
        if config.output.strict && errors > 0 {
            return Err(CliError::Validation(format!(
                "{errors} undefined counter reference(s)"
            )));
        }

        Ok(())
    }
}

/// Rendered document with the diagnostics collected while resolving it.
struct ResolvedDocument {
    document: String,
    warnings: Vec<String>,
    resolution: Resolution,
}

fn resolve_document(source: &str, config: &Config) -> Result<ResolvedDocument, CliError> {
    let mut parser = MarkdownParser::new();
    let mut tree = parser.parse(source);

    let resolution = DirectiveResolver::new(config.counter.directive.as_str()).process(&mut tree);
    let document = render(&tree, config.output.format)?;

    Ok(ResolvedDocument {
        document,
        warnings: parser.warnings().to_vec(),
        resolution,
    })
}

fn render(tree: &Node, format: OutputFormat) -> Result<String, CliError> {
    let rendered = match format {
        OutputFormat::Markdown => to_markdown(tree),
        OutputFormat::Html => to_html(tree),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(tree)?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}

fn written_message(path: &Path, format: OutputFormat) -> String {
    format!("Resolved {format} document written to {}", path.display())
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn write_output(path: Option<&Path>, document: &str) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, document)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
