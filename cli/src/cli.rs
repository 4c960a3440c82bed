//! CLI options
use {
    clap::{
        Parser,
        Subcommand,
    },
    solana_sdk::pubkey::Pubkey,
};

#[derive(Parser, Debug)]
#[clap(about = "Snapshots voting power delegated to one wallet across governance realms")]
pub struct Cli {
    #[clap(long, default_value = "https://api.mainnet-beta.solana.com/")]
    pub rpc_url: String,
    #[clap(subcommand)]
    pub action:  Action,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    #[clap(about = "Scan every realm and compute delegated voting power")]
    Run {
        #[clap(long, help = "Delegate wallet whose delegators are counted")]
        delegate:     Option<Pubkey>,
        #[clap(long, help = "Path of a JSON realm list, defaults to the built-in list")]
        realms:       Option<String>,
        #[clap(
            long,
            help = "Max delegator computations in flight per realm",
            default_value = "8"
        )]
        concurrency:  usize,
        #[clap(
            long,
            help = "Fail a realm when one of its delegators fails instead of reporting zero"
        )]
        strict:       bool,
        #[clap(long, help = "Write the summary JSON here instead of stdout")]
        output:       Option<String>,
        #[clap(long, help = "Also push the summary to github as <owner>/<repo>")]
        github_repo:  Option<String>,
        #[clap(
            long,
            help = "File path inside the github repository",
            default_value = "stats.json"
        )]
        github_path:  String,
        #[clap(long, help = "Token for the github contents api, falls back to $G_TOKEN")]
        github_token: Option<String>,
    },
    #[clap(about = "Print the configured realms")]
    ListRealms {
        #[clap(long, help = "Path of a JSON realm list, defaults to the built-in list")]
        realms: Option<String>,
    },
}
