//! autoblog: CLI wizard for AI-assisted blog content.
//!
//! Walks a linear flow: analyze a website, pick a customer strategy,
//! generate topic ideas, generate and edit an article, export it to a file.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

mod analysis;
mod api;
mod config;
mod content;
mod diagnostic;
mod diff;
mod gate;
mod lock;
mod model;
mod render;
mod session;
mod store;
mod topics;
mod ui;
mod validate;

mod cmd;

#[cfg(feature = "tui")]
mod tui;

use config::Config;
use diagnostic::{Diagnostic, DiagnosticLevel};
use model::{ContentGoal, ContentLength, ContentTemplate, ContentVoice};
use render::ExportFormat;

#[derive(Parser)]
#[command(name = "autoblog")]
#[command(about = "CLI wizard for AI-assisted blog content")]
#[command(version)]
struct Cli {
    /// Path to autoblog config (TOML)
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,

    /// Bypass account and payment gates for this invocation
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize autoblog in the current directory
    Init {
        /// Overwrite existing config
        #[arg(short = 'f', long)]
        force: bool,
    },

    /// Analyze a website and start (or restart) the wizard
    Analyze {
        /// Website URL (scheme optional, e.g. acme.com)
        url: String,
        /// Skip the web-search enhancement wait
        #[arg(long)]
        no_wait: bool,
    },

    /// Inspect or edit the website analysis
    Analysis {
        #[command(subcommand)]
        action: AnalysisAction,
    },

    /// Browse and choose a customer-targeting strategy
    Strategy {
        #[command(subcommand)]
        action: StrategyAction,
    },

    /// Generate and choose article topics
    Topics {
        #[command(subcommand)]
        action: TopicsAction,
    },

    /// Generate, edit, and regenerate article content
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },

    /// Export the article to a file (locks the post)
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,
        /// Render on the backend instead of locally
        #[arg(long)]
        remote: bool,
    },

    /// Authentication against the AutoBlog backend
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Toggle the sticky demo-mode flag
    Demo {
        #[command(subcommand)]
        action: DemoAction,
    },

    /// Show wizard position and session summary
    #[command(visible_alias = "stat")]
    Status,

    /// Resume a saved wizard session (24-hour window)
    Resume,

    /// Discard the saved wizard session
    Reset,

    /// Saved analysis projects
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },

    /// Saved posts and usage statistics
    Posts {
        #[command(subcommand)]
        action: PostsAction,
    },

    /// Recent activity log
    Activity {
        /// Number of records to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        output: OutputFormat,
    },

    /// Probe backend availability
    Health,

    /// Generate shell completions
    Completions {
        /// Shell to generate for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Launch interactive TUI dashboard
    #[cfg(feature = "tui")]
    Tui,
}

#[derive(Subcommand, Clone, Debug)]
enum AnalysisAction {
    /// Show the current analysis
    Show,
    /// Edit an analysis field (resets downstream selections)
    Set {
        /// Field name (business-name, business-type, target-audience,
        /// brand-voice, content-focus, description)
        field: String,
        /// New value
        value: String,
    },
}

#[derive(Subcommand, Clone, Debug)]
enum StrategyAction {
    /// List strategies ordered by priority
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        output: OutputFormat,
    },
    /// Select a strategy by its list position
    Select {
        /// 1-based position in the sorted list
        rank: usize,
    },
    /// Unlock premium strategies (simulated; no payment is processed)
    Unlock {
        /// Email for the lighter gate when not logged in
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand, Clone, Debug)]
enum TopicsAction {
    /// Generate topic candidates from the analysis and strategy
    Generate,
    /// List generated topics
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        output: OutputFormat,
    },
    /// Select a topic (requires an account unless in demo mode)
    Select {
        /// Topic id (e.g. t1)
        id: String,
    },
}

#[derive(Subcommand, Clone, Debug)]
enum ContentAction {
    /// Generate the article for the selected topic
    Generate,
    /// Print the article
    Show,
    /// Replace the article text
    Edit {
        /// Set text directly
        #[arg(long, group = "text_source")]
        text: Option<String>,
        /// Read text from file
        #[arg(long, group = "text_source")]
        text_file: Option<PathBuf>,
        /// Read text from stdin (recommended for multi-line)
        #[arg(long, group = "text_source")]
        stdin: bool,
    },
    /// Regenerate with feedback and a content strategy
    Regenerate {
        /// Free-text feedback to fold into the instructions
        #[arg(long)]
        feedback: Option<String>,
        /// Content goal
        #[arg(long, value_enum)]
        goal: Option<ContentGoal>,
        /// Writing voice
        #[arg(long, value_enum)]
        voice: Option<ContentVoice>,
        /// Article template
        #[arg(long, value_enum)]
        template: Option<ContentTemplate>,
        /// Article length
        #[arg(long, value_enum)]
        length: Option<ContentLength>,
    },
    /// Summarize changes from the previous version
    Changes {
        /// Also ask the backend for a change analysis
        #[arg(long)]
        remote: bool,
    },
}

#[derive(Subcommand, Clone, Debug)]
enum AuthAction {
    /// Log in with email and password
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password (or use --stdin)
        #[arg(long, required_unless_present = "stdin")]
        password: Option<String>,
        /// Read password from stdin
        #[arg(long)]
        stdin: bool,
    },
    /// Register a new account
    Register {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password (or use --stdin)
        #[arg(long, required_unless_present = "stdin")]
        password: Option<String>,
        /// Read password from stdin
        #[arg(long)]
        stdin: bool,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Log out and clear stored tokens
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Refresh the access token
    Refresh,
}

#[derive(Subcommand, Clone, Debug)]
enum DemoAction {
    /// Enable demo mode (sticky)
    On,
    /// Disable demo mode
    Off,
    /// Show demo mode state
    Status,
}

#[derive(Subcommand, Clone, Debug)]
enum ProjectsAction {
    /// List saved projects
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        output: OutputFormat,
    },
    /// Save the current analysis as a project
    Save {
        /// Project name (defaults to the business name)
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand, Clone, Debug)]
enum PostsAction {
    /// List saved posts
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        output: OutputFormat,
    },
    /// Show usage statistics
    Stats,
}

/// Output format for list commands
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Plain,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = run(&cli);

    match result {
        Ok(diags) => {
            let has_errors = diags.iter().any(|d| d.level == DiagnosticLevel::Error);

            for diag in &diags {
                ui::diagnostic(diag);
            }

            if has_errors {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Vec<Diagnostic>> {
    let config = Config::load(cli.config.as_deref())?;
    let demo_flag = cli.demo;

    match &cli.command {
        Commands::Init { force } => cmd::init::init_project(&config, *force),
        Commands::Analyze { url, no_wait } => cmd::analyze::analyze(&config, url, *no_wait),
        Commands::Analysis { action } => match action {
            AnalysisAction::Show => cmd::analyze::show(&config),
            AnalysisAction::Set { field, value } => {
                cmd::analyze::set_field(&config, field, value)
            }
        },
        Commands::Strategy { action } => match action {
            StrategyAction::List { output } => {
                cmd::strategy::list(&config, demo_flag, *output)
            }
            StrategyAction::Select { rank } => {
                cmd::strategy::select(&config, demo_flag, *rank)
            }
            StrategyAction::Unlock { email } => {
                cmd::strategy::unlock(&config, demo_flag, email.as_deref())
            }
        },
        Commands::Topics { action } => match action {
            TopicsAction::Generate => cmd::topics::generate(&config),
            TopicsAction::List { output } => cmd::topics::list(&config, *output),
            TopicsAction::Select { id } => cmd::topics::select(&config, demo_flag, id),
        },
        Commands::Content { action } => match action {
            ContentAction::Generate => cmd::content::generate(&config, demo_flag),
            ContentAction::Show => cmd::content::show(&config),
            ContentAction::Edit {
                text,
                text_file,
                stdin,
            } => cmd::content::edit(&config, text.as_deref(), text_file.as_deref(), *stdin),
            ContentAction::Regenerate {
                feedback,
                goal,
                voice,
                template,
                length,
            } => cmd::content::regenerate(
                &config,
                demo_flag,
                feedback.as_deref(),
                *goal,
                *voice,
                *template,
                *length,
            ),
            ContentAction::Changes { remote } => cmd::content::changes(&config, *remote),
        },
        Commands::Export { format, remote } => {
            cmd::export::export(&config, demo_flag, *format, *remote)
        }
        Commands::Auth { action } => match action {
            AuthAction::Login {
                email,
                password,
                stdin,
            } => cmd::auth::login(&config, email, password.as_deref(), *stdin),
            AuthAction::Register {
                email,
                password,
                stdin,
                name,
            } => cmd::auth::register(&config, email, password.as_deref(), *stdin, name.as_deref()),
            AuthAction::Logout => cmd::auth::logout(&config),
            AuthAction::Whoami => cmd::auth::whoami(&config, demo_flag),
            AuthAction::Refresh => cmd::auth::refresh(&config),
        },
        Commands::Demo { action } => match action {
            DemoAction::On => cmd::demo::set(&config, true),
            DemoAction::Off => cmd::demo::set(&config, false),
            DemoAction::Status => cmd::demo::status(&config, demo_flag),
        },
        Commands::Status => cmd::status::show_status(&config, demo_flag),
        Commands::Resume => cmd::wizard::resume(&config),
        Commands::Reset => cmd::wizard::reset(&config),
        Commands::Projects { action } => match action {
            ProjectsAction::List { output } => cmd::projects::list(&config, *output),
            ProjectsAction::Save { name } => cmd::projects::save(&config, name.as_deref()),
        },
        Commands::Posts { action } => match action {
            PostsAction::List { output } => cmd::posts::list(&config, *output),
            PostsAction::Stats => cmd::posts::stats(&config),
        },
        Commands::Activity { limit, output } => cmd::posts::activity(&config, *limit, *output),
        Commands::Health => cmd::status::health(&config),
        Commands::Completions { shell } => {
            let mut command = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(*shell, &mut command, "autoblog", &mut std::io::stdout());
            Ok(vec![])
        }
        #[cfg(feature = "tui")]
        Commands::Tui => {
            tui::run(&config, demo_flag)?;
            Ok(vec![])
        }
    }
}
