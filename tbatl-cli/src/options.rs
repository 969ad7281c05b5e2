/// The subcommands available
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum SubcommandOption {
    #[default]
    Check,
    Parse,
}

/// The formula types that the system supports
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FormulaFormat {
    Json,
    Atl,
}

/// How `parse` prints the formula it read
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum OutputFormat {
    /// The canonical textual rendering
    #[default]
    Atl,
    Json,
}

/// The options that can be passed to the CLI
#[derive(Debug, Default)]
pub struct CliOptions {
    // General
    pub subcommand: SubcommandOption,
    pub quiet: bool,

    // Paths
    pub model_path: String,
    pub formula_path: String,
    pub formula_explicit_format: Option<FormulaFormat>,
    pub output_format: OutputFormat,

    // Verification options
    /// Name of the single state to check. All states are checked if absent.
    pub state: Option<String>,
    pub threads: usize,
    pub max_depth: Option<usize>,
}
