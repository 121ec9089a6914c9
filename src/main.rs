// src/main.rs

//! `monoraster` command-line host.
//!
//! Prints one JSON [`Response`] on stdout. Logs go to stderr.

use anyhow::{bail, Context};
use log::{error, info};
use monoraster::{encoder, Config, Framebuffer, RasterError, RasterService, Response, SINE_WAVE};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

const DEFAULT_POINT_SIZE: i32 = 64;
const DEFAULT_BASELINE_OFFSET: i32 = 10;

const USAGE: &str = "\
Usage: monoraster [--config FILE] [--dump FILE] [--preview] <command>
Commands:
  text <TEXT> [POINT_SIZE] [BASELINE_OFFSET]   Render centered text (defaults 64, 10)
  script <FILE|->                              Run a drawing script
  sine                                         Run the built-in sine wave script";

enum Command {
    Text {
        text: String,
        point_size: i32,
        baseline_offset: i32,
    },
    Script(String),
    Sine,
}

struct Options {
    config: Option<PathBuf>,
    dump: Option<PathBuf>,
    preview: bool,
    command: Command,
}

fn parse_args(args: &[String]) -> anyhow::Result<Options> {
    let mut config = None;
    let mut dump = None;
    let mut preview = false;
    let mut rest = args.iter();

    let command_name = loop {
        match rest.next().map(String::as_str) {
            Some("--config") => {
                config = Some(PathBuf::from(rest.next().context("--config needs a file")?))
            }
            Some("--dump") => dump = Some(PathBuf::from(rest.next().context("--dump needs a file")?)),
            Some("--preview") => preview = true,
            Some(flag) if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            Some(name) => break name.to_string(),
            None => bail!("Missing command"),
        }
    };
    let operands: Vec<&String> = rest.collect();

    let command = match command_name.as_str() {
        "text" => {
            let text = operands.first().context("text needs a TEXT argument")?.to_string();
            let point_size = match operands.get(1) {
                Some(v) => v
                    .parse()
                    .with_context(|| format!("POINT_SIZE '{}' is not an integer", v))?,
                None => DEFAULT_POINT_SIZE,
            };
            let baseline_offset = match operands.get(2) {
                Some(v) => v
                    .parse()
                    .with_context(|| format!("BASELINE_OFFSET '{}' is not an integer", v))?,
                None => DEFAULT_BASELINE_OFFSET,
            };
            Command::Text {
                text,
                point_size,
                baseline_offset,
            }
        }
        "script" => Command::Script(
            operands
                .first()
                .context("script needs a FILE argument ('-' for stdin)")?
                .to_string(),
        ),
        "sine" => Command::Sine,
        other => bail!("Unknown command: {}", other),
    };

    Ok(Options {
        config,
        dump,
        preview,
        command,
    })
}

fn read_script(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read script from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read script '{}'", source))
    }
}

fn rasterize(service: &RasterService, command: &Command) -> anyhow::Result<Result<Framebuffer, RasterError>> {
    Ok(match command {
        Command::Text {
            text,
            point_size,
            baseline_offset,
        } => service.rasterize_text(text, *point_size, *baseline_offset),
        Command::Script(path) => service.rasterize_script(&read_script(path)?),
        Command::Sine => service.rasterize_script(SINE_WAVE),
    })
}

fn run(options: Options) -> anyhow::Result<bool> {
    let config = match &options.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    info!(
        "Raster {}x{}, font '{}'",
        config.display.width,
        config.display.height,
        config.font.path.display()
    );
    let service = RasterService::new(config);

    let response = match rasterize(&service, &options.command)? {
        Ok(framebuffer) => {
            if options.preview {
                eprint!("{}", framebuffer.ascii_preview());
            }
            if let Some(path) = &options.dump {
                fs::write(path, framebuffer.to_pbm())
                    .with_context(|| format!("Failed to write '{}'", path.display()))?;
                info!("Raster dumped to '{}'", path.display());
            }
            Response::Ok {
                payload: encoder::encode(framebuffer),
            }
        }
        Err(err) => Response::from(err),
    };

    println!("{}", response.to_json());
    Ok(response.is_ok())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    match run(options) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    }
}
