use clap::{Parser, ValueEnum};

use dempster_shafer::CombinationRule;

/// Combination rule selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RuleArg {
    Dempster,
    Smets,
    Yager,
    Disjunctive,
    Averaging,
}

impl From<RuleArg> for CombinationRule {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::Dempster => CombinationRule::Dempster,
            RuleArg::Smets => CombinationRule::Smets,
            RuleArg::Yager => CombinationRule::Yager,
            RuleArg::Disjunctive => CombinationRule::Disjunctive,
            RuleArg::Averaging => CombinationRule::Averaging,
        }
    }
}

/// Combine mass functions and print their induced measures.
#[derive(Debug, Parser)]
#[command(
    name = "dstool",
    about = "Combine Dempster-Shafer mass functions and print their induced measures",
    long_about = "Combine Dempster-Shafer mass functions and print their induced measures.

EXAMPLES:
    // Combine two mass functions on a 3-world frame under Dempster's rule
    $ dstool --frame A,B,C --mass \"{A}:0.6;{A,B,C}:0.4\" --mass \"{B}:0.6;{A,B,C}:0.4\" --rule dempster
    ",
    version = "0.1.0"
)]
pub struct Cli {
    /// Comma-separated world names of the frame of discernment [string]
    #[clap(long, value_parser, required = true, help_heading = "Core")]
    pub frame: String,

    /// A mass function as `{A}:0.6;{A,B,C}:0.4` (repeat for more than one) [string]
    #[clap(long, value_parser, required = true, num_args = 1, action = clap::ArgAction::Append, help_heading = "Core")]
    pub mass: Vec<String>,

    /// Combination rule to apply across all given mass functions [dempster|smets|yager|disjunctive|averaging]
    #[clap(long, value_enum, default_value = "dempster", help_heading = "Core")]
    pub rule: RuleArg,

    /// Reduce the batch of mass functions in parallel chunks before the final fold [flag]
    #[clap(long, help_heading = "Performance")]
    pub parallel: bool,

    /// Number of threads to use when --parallel is set (increases RAM usage) [integer]
    #[clap(long, default_value = "1", help_heading = "Performance")]
    pub n_threads: usize,
}
