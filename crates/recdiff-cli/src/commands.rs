use std::fs;
use std::io::{self, Write};

use anyhow::Context;
use recdiff_engine::{diff, DiffOptions, Verdict};
use recdiff_types::{CancellationToken, File};

use crate::cli::Cli;

pub fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut reader1 = fs::File::open(&cli.file1)
        .with_context(|| format!("opening {}", cli.file1.display()))?;
    let mut reader2 = fs::File::open(&cli.file2)
        .with_context(|| format!("opening {}", cli.file2.display()))?;

    let left = File::new(cli.file1.display().to_string(), &mut reader1);
    let right = File::new(cli.file2.display().to_string(), &mut reader2);

    let mut sink: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            fs::File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    let mut options = DiffOptions::new();
    options.max_depth = cli.max_depth;
    if cli.json {
        options.json_output = Some(sink.as_mut());
    } else {
        options.text_output = Some(sink.as_mut());
    }

    let cancel = CancellationToken::new();
    let verdict = diff(&cancel, left, right, options).context("comparing inputs")?;
    sink.flush()?;

    Ok(match verdict {
        Verdict::Identical => 0,
        Verdict::Different => 1,
    })
}
