use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatId;
use crate::domain::models::ChatTransport;
use crate::domain::models::Route;
use crate::domain::services::ThreadCreation;
use crate::domain::services::ThreadList;
use crate::domain::services::ThreadListState;
use crate::infrastructure::transport::HttpTransport;

pub fn help_text() -> String {
    let text = r#"
THREAD LIST:
- Up / Down arrow - Move the selection
- Enter - Start a new chat, or open the selected thread
- q - Exit

CHAT:
- Enter - Send the message you typed
- Esc - Go back to the thread list
- Up / Down arrow - Scroll
- CTRL+U / CTRL+D - Page up / Page down
- CTRL+C - Exit
        "#;

    return text.trim().to_string();
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn print_lines(list: &ThreadList) {
    let text = list
        .as_lines()
        .iter()
        .map(|line| {
            return line.text.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    println!("{text}");
}

async fn print_threads_list() -> Result<()> {
    let mut list = ThreadList::default();
    list.load(&HttpTransport::default()).await;
    print_lines(&list);

    if let ThreadListState::Unavailable { .. } = list.state() {
        bail!("Unable to reach the chat backend at {}", Config::get(ConfigKey::ApiURL));
    }

    return Ok(());
}

async fn create_thread() -> Result<Route> {
    let transport = HttpTransport::default();
    let user = transport.get_current_user().await?;
    let route = ThreadCreation::create_and_open(&transport, user.id).await?;

    return Ok(route);
}

async fn select_thread_interactive() -> Result<Option<Route>> {
    let mut list = ThreadList::default();
    list.load(&HttpTransport::default()).await;

    if let ThreadListState::Unavailable { .. } = list.state() {
        print_lines(&list);
        return Ok(None);
    }

    let threads = list.threads();
    if threads.is_empty() {
        print_lines(&list);
        return Ok(None);
    }

    let options = threads
        .iter()
        .map(|thread| {
            return thread.summary();
        })
        .collect::<Vec<String>>();

    let selected = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which thread would you like to open?")
        .default(0)
        .items(&options)
        .interact_opt()?;

    return Ok(selected.map(|idx| {
        return Route::ChatSession(threads[idx].chat_id.clone());
    }));
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn route_from_config() -> Route {
    let chat_id = ChatId::new(&Config::get(ConfigKey::ChatID));
    if chat_id.is_empty() {
        return Route::ThreadList;
    }

    return Route::ChatSession(chat_id);
}

fn arg_chat_id() -> Arg {
    return Arg::new(ConfigKey::ChatID.to_string())
        .short('i')
        .long("id")
        .num_args(1)
        .help("ID of the chat thread to open.");
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Open a chat thread by ID.")
        .arg(arg_chat_id().required(true));
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for threadchat")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running threadchat with environment variable RUST_LOG=threadchat")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_threads() -> Command {
    return Command::new("threads")
        .about("Manage chat threads.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List the current user's chat threads."))
        .subcommand(Command::new("new").about("Start a new chat thread and open it."))
        .subcommand(
            Command::new("open")
                .about("Open a chat thread by ID. Omit passing an ID to pick one interactively.")
                .arg(arg_chat_id()),
        );
}

pub fn build() -> Command {
    let hotkeys_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.ends_with(':') {
                return Paint::new(format!("HOTKEYS {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("threadchat")
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(subcommand_threads())
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .long(ConfigKey::ApiURL.to_string())
                .env("THREADCHAT_API_URL")
                .num_args(1)
                .help(format!("Base URL of the chat backend. [default: {}]", Config::default(ConfigKey::ApiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::RequestTimeout.to_string())
                .long(ConfigKey::RequestTimeout.to_string())
                .env("THREADCHAT_REQUEST_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before a request to the chat backend is abandoned. [default: {}]", Config::default(ConfigKey::RequestTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("THREADCHAT_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        );
}

/// Handles the command line. Returns the screen to open the UI on, or `None`
/// when the command already did its work and the process should exit.
pub async fn parse() -> Result<Option<Route>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir()
                        .unwrap_or_default()
                        .join("threadchat/debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(None);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(None);
        }
        Some(("threads", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("list", list_matches)) => {
                Config::load(vec![&matches, subcmd_matches, list_matches]).await?;
                print_threads_list().await?;
                return Ok(None);
            }
            Some(("new", new_matches)) => {
                Config::load(vec![&matches, subcmd_matches, new_matches]).await?;
                return Ok(Some(create_thread().await?));
            }
            Some(("open", open_matches)) => {
                Config::load(vec![&matches, subcmd_matches, open_matches]).await?;
                if Config::get(ConfigKey::ChatID).is_empty() {
                    return select_thread_interactive().await;
                }
            }
            _ => {
                subcommand_threads().print_long_help()?;
                return Ok(None);
            }
        },
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(Some(route_from_config()));
}
