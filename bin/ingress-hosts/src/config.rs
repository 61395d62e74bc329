//! Command line and run settings

use clap::Parser;
use hosts_core::DEFAULT_HOST_FILE;
use std::path::PathBuf;

/// Project home, shown by `--version`
pub const PROJECT_URL: &str = "https://github.com/YoleanAgents/k8s-ingress-hosts";

#[derive(Parser, Debug)]
#[command(name = "ingress-hosts")]
#[command(
    about = "Generate host file entries from Kubernetes Ingress and Gateway API routes",
    long_about = None,
    disable_version_flag = true
)]
pub struct Args {
    /// Host file location
    #[arg(long, env = "INGRESS_HOSTS_FILE", default_value = DEFAULT_HOST_FILE)]
    pub host_file: PathBuf,

    /// Rewrite the host file instead of printing the entries
    #[arg(long, env = "INGRESS_HOSTS_WRITE")]
    pub write: bool,

    /// Absolute path to the kubeconfig file
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current one
    #[arg(long)]
    pub context: Option<String>,

    /// Show version and exit
    #[arg(long)]
    pub version: bool,
}

/// What to do with the rendered entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print to standard output
    Print,
    /// Merge into the host file
    Write,
}

/// Settings for a single run, fixed once parsed
#[derive(Debug, Clone)]
pub struct Settings {
    pub host_file: PathBuf,
    pub mode: Mode,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self {
            host_file: args.host_file,
            mode: if args.write { Mode::Write } else { Mode::Print },
            kubeconfig: args.kubeconfig,
            context: args.context,
        }
    }
}

pub fn version_text() -> String {
    format!(
        "k8s-ingress-hosts\n url: {}\n version: {}",
        PROJECT_URL,
        env!("CARGO_PKG_VERSION")
    )
}
