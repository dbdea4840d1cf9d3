//! Dump the properties of an XMP packet
//!
//! Reads an `.xmp` sidecar (or any file holding one XMP packet) and prints
//! every parsed property with its path. With `--json` the index is printed
//! as JSON instead; `--no-simplify` keeps the tagged JSON form.
//!
//! ```text
//! cargo run --example xmp_dump -- [--json] [--no-simplify] [--verbose] <file>
//! ```
//!
//! Dropped values are logged at `warn`; `RUST_LOG` overrides the level and
//! `--verbose` enables everything down to trace.

use std::env;
use std::fs::File;
use std::io::BufReader;

use xmpindex::{standard_registry, XmpParser};

struct Options {
    json: bool,
    simplify: bool,
    verbose: bool,
    path: String,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        json: false,
        simplify: true,
        verbose: false,
        path: String::new(),
    };
    let mut paths = Vec::new();

    // args[0] = path to executable
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => options.json = true,
            "--no-simplify" => options.simplify = false,
            "--verbose" | "-v" => options.verbose = true,
            flag if flag.starts_with('-') => return Err(format!("unknown option {}", flag)),
            _ => paths.push(arg),
        }
    }

    match paths.len() {
        1 => {
            options.path = paths.remove(0);
            Ok(options)
        }
        n => Err(format!("expected 1 file name, got {} arguments", n)),
    }
}

fn dump_xmp_file() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args()?;

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if options.verbose {
        logger.filter_level(log::LevelFilter::Trace);
    }
    logger.init();

    let registry = standard_registry();
    let reader = BufReader::new(File::open(&options.path)?);
    let mut parser = XmpParser::new(registry);
    let index = parser.parse(reader)?;

    if let Some(bom) = parser.byte_order_mark() {
        log::info!("xpacket announces {}", bom.encoding_name());
    }

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&index.export(registry, options.simplify))?
        );
    } else {
        print!("{}", index.dump(registry));
        println!("{} value(s)", index.count());
    }

    Ok(())
}

fn main() {
    if let Err(err) = dump_xmp_file() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
