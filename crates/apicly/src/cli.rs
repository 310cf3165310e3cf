//! Clap derive structures for the `apicly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// apicly -- ask an APIC-EM controller who owns an address and what is licensed
#[derive(Debug, Parser)]
#[command(
    name = "apicly",
    version,
    about = "Resolve IP addresses and report fleet licenses from an APIC-EM controller",
    long_about = "Command-line tools for Cisco APIC-EM network controllers.\n\n\
        Resolves an IP address to the client attachment and device interface\n\
        that use it, and produces per-device license reports for the whole\n\
        inventory.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "APICLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller URL (overrides profile)
    #[arg(long, short = 'c', env = "APICLY_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Username for the service-ticket request (overrides profile)
    #[arg(long, short = 'u', env = "APICLY_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "APICLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "APICLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "APICLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table or prose (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one record per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find which client and which device interface use an IP address
    #[command(alias = "resolve")]
    Ip(IpArgs),

    /// Show hostname, type and serial number of one device
    #[command(alias = "dev")]
    Device(DeviceArgs),

    /// Report active licenses for every device in the inventory
    #[command(alias = "lic")]
    Licenses(LicensesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── IP ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct IpArgs {
    /// Addresses to resolve. Prompts repeatedly when none are given.
    pub addresses: Vec<IpAddr>,
}

// ── Device ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DeviceArgs {
    /// Management IP address of the device
    #[arg(required_unless_present = "id", conflicts_with = "id")]
    pub management_ip: Option<IpAddr>,

    /// Controller device identifier instead of a management IP
    #[arg(long)]
    pub id: Option<String>,
}

// ── Licenses ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LicensesArgs {
    /// Write the report as CSV to this file
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Print the report to the console instead of prompting for a file
    #[arg(long)]
    pub console: bool,

    /// Devices processed concurrently (1 = strictly sequential)
    #[arg(long, short = 'j', env = "APICLY_JOBS")]
    pub jobs: Option<usize>,

    /// Report a single device instead of the whole inventory
    #[arg(long)]
    pub device: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Show the current configuration (secrets masked)
    Show,

    /// Set a value on the active profile
    Set {
        /// Config key (controller, username, password_env, insecure, timeout, concurrency, ca_cert)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Switch the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// Store a profile's password in the system keyring
    SetPassword {
        /// Profile to update (defaults to the active profile)
        name: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
