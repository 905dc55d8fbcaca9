//! thinkmode CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command handler.

use clap::{CommandFactory, Parser, Subcommand};
use thinkmode::commands::{
    ask_command, config_path_command, config_reset_command, config_set_command,
    config_show_command, demo_command, scenarios_command, AskOptions,
};
use thinkmode::completion::{detect_shell, generate_completion_script, ShellType};
use thinkmode::llm::ApiKeyStore;
use thinkmode::output::print_error;

#[derive(Parser)]
#[command(name = "thinkmode")]
#[command(
    version,
    about = "Split-screen demo contrasting an impulsive model with a reasoning model",
    after_help = "EXAMPLES:
    # Open the interactive demo
    thinkmode
    thinkmode demo --scenario sister-logic

    # Ask both engines once, without the TUI
    thinkmode ask --scenario word-count
    thinkmode ask \"Is 1001 prime?\" --no-typewriter
    thinkmode ask --json

    # Provide a key for this session only
    thinkmode --api-key <KEY> ask"
)]
struct Cli {
    /// API key for this session (takes precedence over GEMINI_API_KEY / API_KEY)
    #[arg(long, global = true, value_name = "KEY")]
    api_key: Option<String>,

    /// Start with audio feedback muted
    #[arg(long, global = true)]
    mute: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive split-screen demo (default)
    #[command(after_help = "KEYS:
    1-3 / Tab   select scenario        i   edit custom query
    Enter / r   run experiment         x   reset panes
    Left/Right  focus pane             k   enter session API key
    Up/Down     scroll focused pane    m   mute audio
    End         follow output          l   expand system log
    q           quit")]
    Demo {
        /// Scenario to open on (see `thinkmode scenarios`)
        #[arg(short, long)]
        scenario: Option<String>,
    },

    /// Ask both engines once and print the two answers
    Ask {
        /// Custom question; the scenario question is used when omitted
        prompt: Option<String>,

        /// Scenario to use when no prompt is given
        #[arg(short, long)]
        scenario: Option<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Print answers at once instead of revealing them
        #[arg(long)]
        no_typewriter: bool,
    },

    /// List the built-in scenarios
    Scenarios,

    /// View or modify configuration
    #[command(after_help = "EXAMPLES:
    thinkmode config                               # Show configuration
    thinkmode config set reveal_interval_ms 15     # Slower typewriter
    thinkmode config set default_scenario word-count
    thinkmode config reset                         # Restore defaults
    thinkmode config path                          # Print config file location")]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for (detected from $SHELL when omitted)
        #[arg(value_enum)]
        shell: Option<ShellType>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. reveal_interval_ms)
        key: String,

        /// New value
        value: String,
    },

    /// Reset the configuration file to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Default log filter for a command.
///
/// The TUI owns the terminal, so stderr logging stays off there unless
/// RUST_LOG asks for it explicitly.
fn log_filter(command: Option<&Commands>, verbose: bool) -> &'static str {
    match command {
        None | Some(Commands::Demo { .. }) => "off",
        _ if verbose => "debug",
        _ => "warn",
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(cli.command.as_ref(), cli.verbose)),
    )
    .format_timestamp(None)
    .init();

    let keys = ApiKeyStore::new();
    if let Some(key) = cli.api_key.as_deref() {
        keys.set_dynamic_key(key);
    }

    let result = match &cli.command {
        None => demo_command(None, keys, cli.mute),

        Some(Commands::Demo { scenario }) => demo_command(scenario.as_deref(), keys, cli.mute),

        Some(Commands::Ask {
            prompt,
            scenario,
            json,
            no_typewriter,
        }) => ask_command(
            &AskOptions {
                prompt: prompt.clone(),
                scenario: scenario.clone(),
                json: *json,
                no_typewriter: *no_typewriter,
            },
            keys,
        ),

        Some(Commands::Scenarios) => scenarios_command(),

        Some(Commands::Config { action }) => match action {
            None | Some(ConfigAction::Show) => config_show_command(),
            Some(ConfigAction::Set { key, value }) => config_set_command(key, value),
            Some(ConfigAction::Reset) => config_reset_command(),
            Some(ConfigAction::Path) => config_path_command(),
        },

        Some(Commands::Completions { shell }) => {
            let shell = match shell {
                Some(shell) => Ok(*shell),
                None => detect_shell(),
            };
            shell.map(|shell| print!("{}", generate_completion_script(shell, &mut Cli::command())))
        }
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
