use crate::matrix::EntryPolicy;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Accept any non-zero matrix value as an edge instead of rejecting values other than 0/1
    #[arg(long)]
    pub lenient: bool,

    /// Also list up to this many distinct topological orders
    #[arg(long, value_name = "LIMIT", default_value_t = 0)]
    pub all_orders: usize,

    /// Print a JSON summary of the graph and its order after the report
    #[arg(long)]
    pub json: bool,

    // Logging
    /// Logfilename for action logs. If none given, topsort_action_#PID.log will be used
    #[arg(long)]
    pub action_logfile: Option<String>,

    /// Write debug messages to the action log
    #[arg(long)]
    pub debug: bool,
}

impl Arguments {
    pub fn entry_policy(&self) -> EntryPolicy {
        if self.lenient {
            EntryPolicy::Lenient
        } else {
            EntryPolicy::Strict
        }
    }

    pub fn action_logfile(&self) -> String {
        self.action_logfile
            .clone()
            .unwrap_or_else(|| format!("topsort_action_{}.log", std::process::id()))
    }
}
