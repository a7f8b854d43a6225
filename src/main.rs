use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use console::style;

use theme_settings::cli::{BuildConfig, Cli, Commands};
use theme_settings::convert::{self, BuildOptions, Report, Target};
use theme_settings::error::{Error, Result};

fn main() -> ExitCode {
  let cli = Cli::parse();

  let failed = match cli.command {
    Commands::Build { sources, out, template_dirs, config, body_only, quiet } => {
      match build_run(sources, out, template_dirs, config, body_only) {
        Ok((targets, options)) => run_targets(&targets, &options, quiet),
        Err(e) => {
          eprintln!("{} {e}", style("error:").red().bold());
          1
        }
      }
    }
    Commands::Import { import_file, export_file, quiet } => {
      match convert::import_target(&import_file, &export_file) {
        Ok(report) => {
          finish(&export_file, &report, quiet);
          0
        }
        Err(e) => {
          eprintln!("{} {e}", style("error:").red().bold());
          1
        }
      }
    }
  };

  if failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn build_run(
  sources: Vec<String>,
  out: Option<PathBuf>,
  template_dirs: Vec<PathBuf>,
  config: Option<PathBuf>,
  body_only: Option<bool>,
) -> Result<(Vec<Target>, BuildOptions)> {
  let (targets, mut options) = if let Some(path) = config {
    BuildConfig::load(&path)?.into_run()
  } else {
    let dest = out.ok_or_else(|| {
      Error::Configuration("a destination is required; pass --out or --config".to_string())
    })?;
    if sources.is_empty() {
      return Err(Error::Configuration("no source files given".to_string()));
    }
    (vec![Target { dest, sources }], BuildOptions { template_dirs, ..BuildOptions::default() })
  };

  // the flag, when given, beats the config file
  if let Some(body_only) = body_only {
    options.tidy.body_only = body_only;
  }
  Ok((targets, options))
}

// returns the number of failed targets; one failure does not abort the rest
fn run_targets(targets: &[Target], options: &BuildOptions, quiet: bool) -> u32 {
  let mut failed = 0;
  for target in targets {
    match convert::build_target(target, options) {
      Ok(report) => finish(&target.dest, &report, quiet),
      Err(e) => {
        failed += 1;
        eprintln!(
          "{} target '{}' failed: {e}",
          style("error:").red().bold(),
          target.dest.display()
        );
      }
    }
  }
  failed
}

fn finish(dest: &std::path::Path, report: &Report, quiet: bool) {
  for warning in &report.warnings {
    eprintln!("{} {warning}", style("warning:").yellow().bold());
  }
  if !quiet {
    println!("File {} created.", style(dest.display()).bold());
  }
}
