use std::path::PathBuf;

use anyhow::{bail, Context};
use smithkit::script::{parse_script, ScriptRunner};
use smithkit::{init_logging, Config, DrawingSession, ScriptedPrompt};

const USAGE: &str = "usage: smithkit [--config FILE] [--out DIR] [--script FILE]\n\
                     Reads commands from FILE, or from stdin when no script is given.";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    out: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        let mut value = |name: &str| {
            it.next()
                .map(PathBuf::from)
                .with_context(|| format!("{name} needs a value"))
        };
        match arg.as_str() {
            "--config" | "-c" => args.config = Some(value("--config")?),
            "--script" | "-s" => args.script = Some(value("--script")?),
            "--out" | "-o" => args.out = Some(value("--out")?),
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unexpected argument '{other}'\n{USAGE}"),
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load_or_default().context("loading default config")?,
    };

    let source = match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("reading script from stdin")?,
    };
    let commands = parse_script(&source)?;

    let out_dir = args.out.unwrap_or_else(|| PathBuf::from("."));
    let session = DrawingSession::new(config, ScriptedPrompt::accepting());
    let mut runner = ScriptRunner::new(session, &out_dir);
    runner.run(&commands)?;

    tracing::info!(
        "Script finished: {} commands, {} objects on canvas, status '{}'",
        commands.len(),
        runner.session().canvas().shape_count(),
        runner.session().status()
    );
    for path in runner.saved() {
        println!("{}", path.display());
    }

    Ok(())
}
