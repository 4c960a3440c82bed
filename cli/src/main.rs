pub mod cli;
pub mod store;

use {
    crate::{
        cli::{
            Action,
            Cli,
        },
        store::GithubStore,
    },
    anyhow::Context,
    clap::Parser,
    delegation_snapshot::{
        aggregator::run_snapshot,
        client::SolanaRpc,
        config::{
            default_realms,
            load_realms_from_json,
            FailurePolicy,
            RealmConfig,
            SnapshotConfig,
        },
    },
    tracing::{
        info,
        warn,
    },
    tracing_subscriber::EnvFilter,
};

fn load_realms(path: Option<String>) -> anyhow::Result<Vec<RealmConfig>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("could not read realm list {}", path))?;
            Ok(load_realms_from_json(&json)?)
        }
        None => Ok(default_realms()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let Cli { rpc_url, action } = Cli::parse();

    match action {
        Action::Run {
            delegate,
            realms,
            concurrency,
            strict,
            output,
            github_repo,
            github_path,
            github_token,
        } => {
            let realms = load_realms(realms)?;
            let mut config = SnapshotConfig::default();
            if let Some(delegate) = delegate {
                config.delegate = delegate;
            }
            config.max_concurrent_delegators = concurrency;
            if strict {
                config.failure_policy = FailurePolicy::Propagate;
            }

            let client = SolanaRpc::new(rpc_url);
            info!(
                realms = realms.len(),
                delegate = %config.delegate,
                "starting snapshot run"
            );
            let outcome = run_snapshot(&client, &config, &realms).await;

            let payload = serde_json::to_string_pretty(&outcome.summaries)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &payload)
                        .with_context(|| format!("could not write summary to {}", path))?;
                    info!(path = path.as_str(), "wrote summary");
                }
                None => println!("{}", payload),
            }

            if let Some(repo) = github_repo {
                let token = github_token.or_else(|| std::env::var("G_TOKEN").ok());
                match token {
                    Some(token) => {
                        let github = GithubStore::new(&repo, github_path, token)?;
                        // The snapshot itself already succeeded; a failed
                        // upload is logged and does not fail the run.
                        if let Err(err) = github.publish(&payload).await {
                            warn!(error = %err, "failed to save the summary to github");
                        }
                    }
                    None => warn!("--github-repo given but no token available, skipping upload"),
                }
            }

            if !outcome.failures.is_empty() {
                anyhow::bail!("{} realm(s) failed", outcome.failures.len());
            }
        }
        Action::ListRealms { realms } => {
            for realm in load_realms(realms)? {
                println!(
                    "{}\t{}\t{} ({} decimals)",
                    realm.slug, realm.name, realm.realm, realm.governance_token_decimals
                );
            }
        }
    }
    Ok(())
}
