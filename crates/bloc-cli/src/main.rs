mod config;
mod logger;
mod output;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use config::OptionArgs;

#[derive(Parser)]
#[command(name = "bloc", version, about = "Block vocabulary compiler")]
struct Cli {
    /// Log compiler progress to stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON vocabulary into toolbox and block definitions
    Compile(CompileArgs),

    /// Report diagnostics for a JSON vocabulary without writing output
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct CompileArgs {
    /// JSON vocabulary file
    file: PathBuf,

    /// Directory for toolbox.json, blocks.json and vocab.json
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    #[command(flatten)]
    options: OptionArgs,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// JSON vocabulary file
    file: PathBuf,

    #[command(flatten)]
    options: OptionArgs,
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let exit_code = match cli.command {
        Command::Compile(args) => do_compile(args),
        Command::Check(args) => do_check(args),
    };
    process::exit(exit_code);
}

fn do_compile(args: CompileArgs) -> i32 {
    let (source, options) = match load(&args.file, &args.options) {
        Ok(loaded) => loaded,
        Err(message) => {
            eprintln!("error: {message}");
            return 1;
        }
    };

    let result = bloc_compiler::compile_to_result(&source, &options);
    output::report(&result.diagnostics);

    match output::write_outputs(&args.out_dir, &result) {
        Ok(written) => {
            for path in written {
                println!("wrote {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("error: cannot write to '{}': {}", args.out_dir.display(), e);
            return 1;
        }
    }

    if result.success {
        0
    } else {
        1
    }
}

fn do_check(args: CheckArgs) -> i32 {
    let (source, options) = match load(&args.file, &args.options) {
        Ok(loaded) => loaded,
        Err(message) => {
            eprintln!("error: {message}");
            return 1;
        }
    };

    let diagnostics = bloc_compiler::check(&source, &options);
    output::report(&diagnostics);
    if diagnostics.has_errors() {
        1
    } else {
        println!(
            "{}: ok ({} warnings)",
            args.file.display(),
            diagnostics.total_warnings
        );
        0
    }
}

fn load(file: &Path, options: &OptionArgs) -> Result<(String, bloc_compiler::CompileOptions), String> {
    let source = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read '{}': {}", file.display(), e))?;
    let options = options.resolve()?;
    Ok((source, options))
}
