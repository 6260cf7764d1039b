use clap::Parser;

#[derive(Parser)]
#[command(name = "archup")]
#[command(author, version, about, long_about = None)]
#[command(about = "A thin interactive installer for Arch workstation bootstrap")]
pub struct Cli {
    /// Only show what would be done, don't make changes
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
