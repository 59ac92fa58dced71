use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;

mod cli;
use cli::*;

mod sink;
use sink::ObjSink;

#[derive(Debug, thiserror::Error)]
enum ConvertError {
    #[error("{0:?}: {1}")]
    Io(PathBuf, #[source] io::Error),
    #[error("{0:?}: {1}")]
    Decode(PathBuf, #[source] d3d::Error),
    #[error("{0:?} has no file name")]
    NoFileName(PathBuf),
}

/// Where the OBJ for `input` goes.
fn output_path(input: &Path, dir: Option<&Path>) -> Result<PathBuf, ConvertError> {
    let stem = input
        .file_stem()
        .ok_or_else(|| ConvertError::NoFileName(input.to_owned()))?;
    let dir = dir.or_else(|| input.parent()).unwrap_or(Path::new(""));
    let mut file = stem.to_owned();
    file.push(".obj");
    Ok(dir.join(file))
}

fn convert(cli: &Cli, input: &Path) -> Result<(), ConvertError> {
    let output = output_path(input, cli.output.as_deref())?;
    let io_err = |path: &Path| {
        let path = path.to_owned();
        move |e| ConvertError::Io(path, e)
    };

    let reader = BufReader::new(File::open(input).map_err(io_err(input))?);
    let writer = BufWriter::new(File::create(&output).map_err(io_err(&output))?);
    let name = input.file_stem().unwrap_or_default().to_string_lossy();
    let mut sink = ObjSink::new(writer, name, cli.separate);

    let _span = tracing::info_span!("convert", input = %input.display()).entered();
    let report = d3d::decode_into(reader, cli.import_config(), &mut sink)
        .map_err(|e| ConvertError::Decode(input.to_owned(), e))?;
    sink.finish().map_err(io_err(&output))?;
    tracing::info!(output = %output.display(), "wrote OBJ");

    if cli.summary {
        println!(
            "{}: {} records, {} meshes, {} warnings -> {}",
            input.display(),
            report.records,
            report.meshes,
            report.warnings.len(),
            output.display()
        );
    }
    Ok(())
}

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_filter, cli.log_format);

    let mut failed = 0;
    for input in &cli.files {
        if let Err(e) = convert(&cli, input) {
            tracing::error!("{e}");
            failed += 1;
        }
    }
    match failed {
        0 => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
