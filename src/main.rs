use clap::Parser;
use log::debug;
use rcalc_rs::evaluate_with_modules;

/// Command-line calculator for arithmetic and comparison expressions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expression string to evaluate.
    #[arg(value_name = "EXPRESSION")]
    expression: String,

    /// Additional modules to use (builtins and math are always loaded).
    #[arg(short = 'm', long = "use-modules", value_name = "MODULE", num_args = 1..)]
    use_modules: Vec<String>,
}

fn main() {
    pretty_env_logger::init();

    let args = Args::parse();
    debug!("Modules: {:?}", args.use_modules);

    match evaluate_with_modules(&args.use_modules, &args.expression) {
        Ok(result) => println!("{result}"),
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    }
}
