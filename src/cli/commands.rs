use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "ssvc-triage", version, about = "Vulnerability prioritization with the SSVC decision tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate every row of a CSV file and write the augmented report
    Evaluate(EvaluateArgs),
    /// Evaluate a single set of decision inputs
    Decide(DecideArgs),
    /// Print the full decision table
    Table,
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct EvaluateArgs {
    /// Input table (.csv)
    pub input: String,

    /// Output file (defaults to the input name with the report suffix)
    #[arg(short, long)]
    pub output: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format: csv, json
    #[arg(long)]
    pub format: Option<String>,

    /// Input field delimiter
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Number of worker tasks evaluating rows
    #[arg(short, long)]
    pub workers: Option<usize>,
}

#[derive(Args, Clone)]
pub struct DecideArgs {
    /// Exploitation: none, poc, active (or a configured alias)
    #[arg(short, long)]
    pub exploitation: String,

    /// Mission & well-being impact: low, medium, high (or a configured alias)
    #[arg(short, long)]
    pub mission: String,

    /// Automatable: yes, no
    #[arg(short, long)]
    pub automatable: Option<String>,

    /// Technical impact: partial, total
    #[arg(short, long)]
    pub technical_impact: Option<String>,

    /// CVSS v3 vector, used for whatever is not given directly
    #[arg(long)]
    pub vector: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the decision as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Path to the configuration file
    pub config: String,
}
