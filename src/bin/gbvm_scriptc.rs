// gbvm-scriptc - GBVM event script compiler
// Compiles TOML script documents to GBVM assembly (.s) files

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use gbvm_script::script_compiler::{CompilerConfig, ScriptCompiler, ScriptDocument};
use log::{debug, error};

fn main() {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let mut input_file = "";
    let mut output_dir = PathBuf::from(".");
    let mut config_file: Option<PathBuf> = None;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: -o requires a directory");
                    process::exit(1);
                }
                output_dir = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "-c" | "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: -c requires a filename");
                    process::exit(1);
                }
                config_file = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "-v" | "--verbose" => {
                verbose = true;
                i += 1;
            }
            "-h" | "--help" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option '{}'", arg);
                print_usage(&args[0]);
                process::exit(1);
            }
            _ => {
                if input_file.is_empty() {
                    input_file = &args[i];
                } else {
                    eprintln!("Error: Multiple input files specified");
                    process::exit(1);
                }
                i += 1;
            }
        }
    }

    if input_file.is_empty() {
        eprintln!("Error: No input file specified");
        print_usage(&args[0]);
        process::exit(1);
    }

    let config = match &config_file {
        Some(path) => match CompilerConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => CompilerConfig::default(),
    };
    debug!("Using configuration: {:?}", config);

    let document = match ScriptDocument::load(Path::new(input_file)) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error reading '{}': {}", input_file, e);
            process::exit(1);
        }
    };

    let compiler = ScriptCompiler::new(config);
    let scripts = match compiler.compile_document(&document) {
        Ok(scripts) => scripts,
        Err(e) => {
            error!("Compilation of {} failed: {}", input_file, e);
            eprintln!("Compilation failed: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = fs::create_dir_all(&output_dir) {
        eprintln!("Error creating '{}': {}", output_dir.display(), e);
        process::exit(1);
    }

    for script in &scripts {
        let path = output_dir.join(format!("{}.s", script.name));
        if let Err(e) = fs::write(&path, &script.text) {
            eprintln!("Error writing '{}': {}", path.display(), e);
            process::exit(1);
        }
        if verbose {
            println!(
                "{} -> {} ({} bytes)",
                script.name,
                path.display(),
                script.text.len()
            );
        }
    }

    if verbose {
        println!(
            "Compiled {} script(s) from scene '{}'",
            scripts.len(),
            document.scene.id
        );
    }
}

fn print_usage(program: &str) {
    println!("gbvm-scriptc - GBVM event script compiler");
    println!();
    println!("Usage: {} [OPTIONS] <script.toml>", program);
    println!();
    println!("Options:");
    println!("  -o, --output <DIR>     Output directory for .s files (default: .)");
    println!("  -c, --config <FILE>    Compiler configuration (TOML)");
    println!("  -v, --verbose          Print a line per compiled script");
    println!("  -h, --help             Show this help message");
    println!();
    println!("Set RUST_LOG=debug to trace label allocation and stack depth.");
}
