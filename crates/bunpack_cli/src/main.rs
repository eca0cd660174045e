mod args;
mod types;

use std::{process::ExitCode, time::Instant};

use ansi_term::Colour;
use args::{InputArgs, OutputArgs};
use clap::Parser;

use bunpack::{ErrorKind, OutputAsset, OutputAssetKind, UnpackOptions, Unpacker};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  /// Log every step of the run
  #[clap(long, short)]
  verbose: bool,
}

fn print_output_assets(outputs: Vec<OutputAsset>) {
  let mut left = 0;
  let mut right = 0;

  let mut assets = Vec::with_capacity(outputs.len());

  for output in outputs {
    let size = format!("{:.2}", output.content.len() as f64 / 1024.0);

    if size.len() > right {
      right = size.len();
    }

    if output.filename.len() > left {
      left = output.filename.len()
    }

    assets.push((output.filename, size, output.kind));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (filename, size, kind) in assets {
    let asset_type = match kind {
      OutputAssetKind::Module => "module",
      OutputAssetKind::Loader => "loader",
      OutputAssetKind::Manifest => "manifest",
    };
    let filename_len = filename.len();

    println!(
      "{}{}{:left$} {}{}{:right$}{} kB",
      dim.paint("<DIR>/"),
      color.paint(filename),
      "",
      dim.paint(format!("{asset_type:8}")),
      dim.paint(" │ size: "),
      "",
      size,
      left = left - filename_len,
      right = right - size.len()
    )
  }
}

fn describe(kind: Option<ErrorKind>) -> &'static str {
  match kind {
    Some(ErrorKind::NotFound) => "file not found",
    Some(ErrorKind::MalformedInput) => "malformed input",
    Some(ErrorKind::SourceMap) => "source map",
    Some(ErrorKind::Write) => "write failure",
    Some(ErrorKind::Unresolved) => "unresolved",
    None => "internal",
  }
}

fn main() -> ExitCode {
  let args = Commands::parse();

  let default_level = if args.verbose { "debug" } else { "warn" };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

  let InputArgs { file, cwd, entry, directory, root, node_dir, platform } = args.input;
  let output = args.output;

  let unpacker = Unpacker::new(UnpackOptions {
    file,
    cwd,
    entry_file: entry,
    directory,
    root,
    node_dir,
    platform: platform.map(Into::into),
    name: output.name,
    output: output.output,
    loader_url: output.loader_url,
    relativize_output_path: output.relativize_output_path,
    with_node_modules: Some(output.with_node_modules),
    sourcemap: Some(output.sourcemap),
    manifest: Some(output.manifest),
    live_reload: Some(output.live_reload),
  });

  let start = Instant::now();
  match unpacker.unpack() {
    Ok(output) => {
      for warning in output.warnings {
        eprintln!("{} {}", Colour::Yellow.paint("Warning:"), warning);
      }

      if !output.assets.is_empty() {
        print_output_assets(output.assets);
      }

      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
      ExitCode::SUCCESS
    }
    Err(errors) => {
      let kind = describe(errors.kind());
      for error in &*errors {
        eprintln!("{} [{kind}] {:#}", Colour::Red.paint("Error:"), error);
      }
      ExitCode::FAILURE
    }
  }
}
