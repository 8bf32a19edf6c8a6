//! Compose a PDF from a saved editor state.
//!
//! Reads an editor snapshot (JSON), draws its elements onto the input PDF (or
//! onto blank pages when no input is given) and writes the result.
//!
//! Usage:
//!   cargo run --release --bin compose_pdf -- --state state.json
//!   cargo run --release --bin compose_pdf -- --state state.json --input form.pdf --output-dir out
//!   cargo run --release --bin compose_pdf -- --state state.json --config editor.json --verbose

use pagecraft::backend::{LopdfBackend, PdfBackend};
use pagecraft::editor::EditorSnapshot;
use pagecraft::{DocumentSession, EditorConfig};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

struct ComposeArgs {
    state: Option<PathBuf>,
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    output_dir: PathBuf,
    verbose: bool,
}

impl ComposeArgs {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut parsed = Self {
            state: None,
            input: None,
            config: None,
            output_dir: PathBuf::from("."),
            verbose: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--state" => {
                    i += 1;
                    parsed.state = args.get(i).map(PathBuf::from);
                },
                "--input" => {
                    i += 1;
                    parsed.input = args.get(i).map(PathBuf::from);
                },
                "--config" => {
                    i += 1;
                    parsed.config = args.get(i).map(PathBuf::from);
                },
                "--output-dir" => {
                    i += 1;
                    if let Some(dir) = args.get(i) {
                        parsed.output_dir = PathBuf::from(dir);
                    }
                },
                "--verbose" | "-v" => {
                    parsed.verbose = true;
                },
                other => {
                    eprintln!("Ignoring unknown argument: {}", other);
                },
            }
            i += 1;
        }
        parsed
    }
}

fn run(args: &ComposeArgs) -> pagecraft::Result<()> {
    let Some(state_path) = &args.state else {
        return Err(pagecraft::Error::Unsupported("--state <file> is required".to_string()));
    };

    let config: EditorConfig = match &args.config {
        Some(path) => serde_json::from_slice(&fs::read(path)?)?,
        None => EditorConfig::default(),
    };
    let snapshot: EditorSnapshot = serde_json::from_slice(&fs::read(state_path)?)?;

    let backend = match &args.input {
        Some(path) => LopdfBackend::load(&fs::read(path)?)?,
        None => LopdfBackend::blank(config.default_pdf_page_size, snapshot.total_pages.max(1) as usize)?,
    }
    .with_compression(config.compress);

    println!(
        "Composing {} elements onto {} pages",
        snapshot.canvas_elements.len(),
        backend.page_count()
    );

    let mut session = DocumentSession::from_snapshot(backend, snapshot, config)?;
    fs::create_dir_all(&args.output_dir)?;
    let (path, report) = session.write_export(&args.output_dir)?;

    println!("Drawn:    {}", report.drawn);
    println!("Empty:    {}", report.empty);
    println!("Warnings: {}", report.warnings.len());
    if args.verbose {
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }
    println!("Wrote {}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = ComposeArgs::from_args();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
