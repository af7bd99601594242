use clap::Parser;
use clap::ValueEnum;
use decorate_js::transform;
use decorate_js::DecorateOptions;
use decorate_js::EmissionOrder;
use decorate_js::HelperImportStrategy;
use decorate_js::MetadataMode;
use diagnostics::diagnostic_from_syntax_error;
use diagnostics::files::SimpleFiles;
use diagnostics::render::render_diagnostic;
use diagnostics::Diagnostic;
use emit_js::emit_top_level;
use emit_js::EmitOptions;
use std::fs;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "decorate-js", about = "Lowers JavaScript class decorators to tslib helper calls")]
// WARNING: Keep descriptions in sync with DecorateOptions.
struct Cli {
  /// File to transform; omit for stdin.
  input: Option<PathBuf>,

  /// Output destination; omit for stdout.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// JSON file holding a DecorateOptions object. Flags override its values.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Use legacy `__decorate` lowering instead of Stage-3 `__esDecorate`.
  #[arg(long, value_name = "true|false")]
  experimental_decorators: Option<bool>,

  /// Install class metadata by assignment instead of `Object.defineProperty`.
  #[arg(long, value_name = "true|false")]
  loose: Option<bool>,

  /// Create and install a metadata object; omit to only reserve the slot.
  #[arg(long, value_name = "true|false")]
  metadata: Option<bool>,

  /// Install Stage-3 decorated fields with `Object.defineProperty` instead of assignment.
  #[arg(long, value_name = "true|false")]
  use_define_for_class_fields: Option<bool>,

  #[arg(long, value_enum)]
  helper_imports: Option<HelperImportsArg>,

  /// Where legacy member decorate calls go relative to the class.
  #[arg(long, value_enum)]
  emission_order: Option<EmissionOrderArg>,

  /// Module the helpers are imported from.
  #[arg(long)]
  helper_module: Option<String>,

  /// Print one statement per line instead of minified output.
  #[arg(long)]
  canonical: bool,

  /// Write JSON trace events to stderr.
  #[arg(long)]
  trace: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HelperImportsArg {
  Eager,
  Deferred,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmissionOrderArg {
  After,
  Before,
}

impl Cli {
  fn options(&self) -> Result<DecorateOptions, String> {
    let mut options = match &self.config {
      Some(path) => {
        let raw = fs::read_to_string(path).map_err(|err| format!("failed to read {}: {err}", path.display()))?;
        serde_json::from_str(&raw).map_err(|err| format!("invalid config {}: {err}", path.display()))?
      }
      None => DecorateOptions::default(),
    };
    if let Some(v) = self.experimental_decorators {
      options.experimental_decorators = v;
    };
    if let Some(v) = self.loose {
      options.loose = v;
    };
    if let Some(v) = self.metadata {
      options.metadata = if v {
        MetadataMode::Enabled
      } else {
        MetadataMode::Disabled
      };
    };
    if let Some(v) = self.use_define_for_class_fields {
      options.use_define_for_class_fields = v;
    };
    if let Some(v) = self.helper_imports {
      options.helper_imports = match v {
        HelperImportsArg::Eager => HelperImportStrategy::Eager,
        HelperImportsArg::Deferred => HelperImportStrategy::Deferred,
      };
    };
    if let Some(v) = self.emission_order {
      options.emission_order = match v {
        EmissionOrderArg::After => EmissionOrder::AfterDeclaration,
        EmissionOrderArg::Before => EmissionOrder::BeforeDeclaration,
      };
    };
    if let Some(v) = &self.helper_module {
      options.helper_module = v.clone();
    };
    Ok(options)
  }
}

fn init_tracing(enabled: bool) {
  if !enabled {
    return;
  }
  let _ = tracing_subscriber::fmt()
    .with_span_events(FmtSpan::CLOSE)
    .with_max_level(Level::DEBUG)
    .json()
    .with_ansi(false)
    .with_writer(std::io::stderr)
    .try_init();
}

fn read_input(input: Option<&PathBuf>) -> Result<String, String> {
  let mut raw = Vec::new();
  match input {
    Some(path) => {
      raw = fs::read(path).map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    }
    None => {
      stdin()
        .read_to_end(&mut raw)
        .map_err(|err| format!("failed to read stdin: {err}"))?;
    }
  };
  String::from_utf8(raw).map_err(|err| format!("input is not valid UTF-8: {err}"))
}

fn report(files: &SimpleFiles, diagnostics: &[Diagnostic]) -> ExitCode {
  for diagnostic in diagnostics {
    eprintln!("{}", render_diagnostic(files, diagnostic));
  }
  if diagnostics.iter().any(Diagnostic::is_error) {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}

fn main() -> ExitCode {
  let args = Cli::parse();
  init_tracing(args.trace);

  let options = match args.options() {
    Ok(options) => options,
    Err(message) => {
      eprintln!("error: {message}");
      return ExitCode::FAILURE;
    }
  };
  let source = match read_input(args.input.as_ref()) {
    Ok(source) => source,
    Err(message) => {
      eprintln!("error: {message}");
      return ExitCode::FAILURE;
    }
  };
  let name = args
    .input
    .as_ref()
    .map(|p| p.to_string_lossy().into_owned())
    .unwrap_or_else(|| "<stdin>".to_string());
  let mut files = SimpleFiles::new();
  let file = files.add(name, source.as_str());

  let mut top = match parse_js::parse(&source) {
    Ok(top) => top,
    Err(err) => return report(&files, &[diagnostic_from_syntax_error(file, &err)]),
  };
  if let Err(diagnostics) = transform(&mut top, file, &options) {
    return report(&files, &diagnostics);
  };
  let emit = if args.canonical {
    EmitOptions::canonical()
  } else {
    EmitOptions::minified()
  };
  let output = match emit_top_level(&top, emit) {
    Ok(output) => output,
    Err(err) => {
      eprintln!("error: {err}");
      return ExitCode::FAILURE;
    }
  };
  let written = match &args.output {
    Some(path) => fs::write(path, &output).map_err(|err| format!("failed to write {}: {err}", path.display())),
    None => stdout()
      .write_all(output.as_bytes())
      .map_err(|err| format!("failed to write output: {err}")),
  };
  if let Err(message) = written {
    eprintln!("error: {message}");
    return ExitCode::FAILURE;
  };
  ExitCode::SUCCESS
}
