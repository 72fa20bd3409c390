use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mmar_launch::{Launcher, Override};

#[derive(Parser)]
#[command(name = "mmar-launch", version)]
struct Cli {
    /// MMAR root directory the client trains in
    #[arg(long, default_value = ".")]
    mmar_root: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default launch.toml into the MMAR root
    Init,

    /// Validate the interpreter, MMAR root, and client config file
    Doctor,

    /// Print the environment bindings and command line without executing
    Show,

    /// Launch the federated client and exit with its status
    Run {
        /// Override CUDA_VISIBLE_DEVICES for this launch
        #[arg(long)]
        gpu: Option<String>,

        /// Extra KEY=VALUE overrides, appended after the configured ones
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<Override>,

        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Init => {
            let path = Launcher::init(&cli.mmar_root)?;
            println!("Wrote {}", path.display());
        }
        Command::Doctor => {
            let l = Launcher::open(&cli.mmar_root)?;
            l.doctor()?;
            println!("OK");
        }
        Command::Show => {
            let l = Launcher::open(&cli.mmar_root)?;
            println!("{}", l.plan(None, &[]).render());
        }
        Command::Run { gpu, set, dry_run } => {
            let l = Launcher::open(&cli.mmar_root)?;
            let plan = l.plan(gpu.as_deref(), &set);
            if dry_run {
                println!("DRY RUN: {}", plan.render());
                return Ok(());
            }
            let code = l.run(&plan)?;
            std::process::exit(code);
        }
    }

    Ok(())
}
