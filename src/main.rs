use clap::{Parser, Subcommand};

use cpn_builder::{RenderOptions, Result, example, render};

#[derive(Parser)]
#[command(name = "cpn-example")]
#[command(about = "Coloured Petri Net model builder", long_about = None)]
struct Cli {
    /// Log construction steps (overridden by CPN_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the demo page hierarchy and write it as a CPN Tools model.
    Example {
        #[arg(short = 'o', long)]
        out: String,

        /// JSON file with render options (indent, xml_declaration).
        #[arg(long)]
        options: Option<String>,

        /// Also dump the typed model as JSON on stdout.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Commands::Example { out, options, json } => {
            let options = match options {
                Some(path) => RenderOptions::from_json_file(&path)?,
                None => RenderOptions::default(),
            };

            let doc = example::build_example()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc.snapshot())?);
            }

            render::write_cpn_file(&doc, &options, &out)?;
            if !doc.diagnostics().is_empty() {
                eprintln!("{} element(s) left unlinked or unpositioned", doc.diagnostics().len());
            }
            println!("Wrote {}", out);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::new()
        .filter_or("CPN_LOG", default)
        .write_style("CPN_LOG_STYLE");
    env_logger::init_from_env(env);
}
