//! AppScale CLI - command line tools for operating AppScale deployments

use clap::{Parser, Subcommand};

mod commands;
mod display;
mod error;
mod exit_codes;

use appscale_core::LOAD_BALANCER_ROLE;
use error::CliError;

#[derive(Parser)]
#[command(name = "appscale")]
#[command(author = "AppScale Contributors")]
#[command(version)]
#[command(about = "Command line tools for operating AppScale deployments", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the public address of a node by role
    Ip {
        /// Deployment keyname
        keyname: String,

        /// Role to resolve
        #[arg(long, default_value = LOAD_BALANCER_ROLE)]
        role: String,

        /// Print every node carrying the role, in manifest order
        #[arg(long)]
        all: bool,
    },

    /// List every node of a deployment
    Nodes {
        /// Deployment keyname
        keyname: String,
    },

    /// Validate an app's thread-safety declaration
    Check {
        /// Staged application directory name
        app_dir: String,

        /// Descriptor filename (web.xml or appengine-web.xml)
        descriptor: String,
    },

    /// Resolve and display operator credentials
    Creds {
        /// Resolve from the environment (or defaults) instead of prompting
        #[arg(long)]
        test: bool,

        /// Print credential values unredacted
        #[arg(long)]
        reveal: bool,
    },
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();

    // Set debug level
    if cli.debug {
        // SAFETY: We're the only thread at this point (start of main)
        unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
    }

    let result: Result<(), CliError> = match cli.command {
        Commands::Ip { keyname, role, all } => commands::ip::run(&keyname, &role, all),

        Commands::Nodes { keyname } => commands::nodes::run(&keyname),

        Commands::Check {
            app_dir,
            descriptor,
        } => commands::check::run(&app_dir, &descriptor),

        Commands::Creds { test, reveal } => commands::creds::run(test, reveal),
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
