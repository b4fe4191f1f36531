// Command-line interface for nbtext
//
// This binary converts notebooks between the supported representations.
// All conversion logic lives in the nbtext-babel crate; this crate is only
// the shell interface around it.
//
// Converting:
//
// The conversion needs a from and to pair. The from is auto-detected from the
// input file extension, while being overwritable by an explicit --from flag.
// The to falls back to the output file extension and then to the configured
// default.
// Usage:
//  nbtext <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  nbtext convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  nbtext --list-formats                 - List registered formats

use clap::{Arg, ArgAction, Command, ValueHint};
use nbtext_babel::FormatRegistry;
use nbtext_config::{Loader, NbtextConfig};
use serde_json::Value;
use std::fs;
use std::path::Path;

fn build_cli() -> Command {
    Command::new("nbtext")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert notebooks to and from text formats")
        .long_about(
            "nbtext converts Jupyter notebooks to and from text representations\n\
            that round-trip exactly, so notebooks can live in version control as\n\
            scripts or markdown documents.\n\n\
            Supported formats:\n  \
            - ipynb:    notebook JSON container (.ipynb)\n  \
            - rmd:      R Markdown documents (.Rmd)\n  \
            - rscript:  R scripts with #' markdown comments (.R)\n  \
            - pyscript: plain python scripts (.py)\n\n\
            Examples:\n  \
            nbtext notebook.ipynb --to pyscript           # Convert to a script (stdout)\n  \
            nbtext notebook.ipynb -o notebook.py          # Target inferred from extension\n  \
            nbtext script.py --to ipynb -o notebook.ipynb # Back to notebook JSON\n  \
            nbtext doc.Rmd --to ipynb                     # R Markdown to notebook",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List registered formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a nbtext.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between notebook formats (default command)")
                .long_about(
                    "Convert notebooks between the registered formats.\n\n\
                    The source format is auto-detected from the input file extension,\n\
                    the target format from the output file extension. Both can be set\n\
                    explicitly with --from and --to. Without --to and without an output\n\
                    path, the configured default target is used.\n\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    nbtext convert nb.ipynb --to pyscript     # Convert to a script (stdout)\n  \
                    nbtext convert nb.ipynb -o nb.Rmd         # Inferred from the .Rmd extension\n  \
                    nbtext nb.ipynb --to rscript              # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (inferred from the output extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file path means the implicit convert subcommand
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "convert"
                && args[1] != "help"
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());

            let registry = FormatRegistry::default();

            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };

            let to = resolve_target_format(
                sub_matches.get_one::<String>("to").map(|s| s.as_str()),
                output,
                &registry,
                &config,
            );

            handle_convert_command(&registry, input, &from, &to, output, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Resolve the target format from the explicit flag, the output file
/// extension, or the configured default, in that order.
fn resolve_target_format(
    to_arg: Option<&str>,
    output: Option<&str>,
    registry: &FormatRegistry,
    config: &NbtextConfig,
) -> String {
    if let Some(to) = to_arg {
        return to.to_string();
    }
    if let Some(path) = output {
        if let Some(detected) = registry.detect_format_from_filename(path) {
            return detected;
        }
    }
    config.convert.default_to.clone()
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    config: &NbtextConfig,
) {
    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let mut notebook = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    // Documents without a declared language fall back to the configured one
    if notebook.main_language().is_none() {
        notebook.metadata.insert(
            "main_language".to_string(),
            Value::String(config.convert.default_language.clone()),
        );
    }

    let result = registry.serialize(&notebook, to).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(Path::new(path), result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => {
            print!("{result}");
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            println!("  {:<10} {}", name, format.description());
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> NbtextConfig {
    let loader = Loader::new().with_optional_file("nbtext.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
