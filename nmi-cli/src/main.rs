//! `nmi`: reporting queries against the NMI payment gateway.
//!
//! Every command prints the client's uniform response as JSON on stdout and
//! exits non-zero unless the gateway answered with a well-formed report.
//!
//! The security key is read from the environment variable named in the
//! configuration (`NMI_SECURITY_KEY` by default).

#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

mod observability;

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use nmi_gateway::{
    ApiResponse, Gateway,
    config::GatewayConfig,
    request::{
        Call, Overrides,
        query::{
            CustomerVaultQuery, ProfileQuery, ReceiptQuery, RecurringPlansQuery, RecurringQuery,
            TransactionQuery, TransactionSearch,
        },
    },
    transport::Transport,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::observability::{LogFormat, init_observability};

/// Reporting queries against the NMI payment gateway.
#[derive(Parser, Debug)]
#[command(name = "nmi", version)]
struct Args {
    /// Gateway configuration file (TOML).
    #[arg(short, long, env = "NMI_CONFIG")]
    config: Option<PathBuf>,

    /// Log line format.
    #[arg(long, env = "LOG_FORMAT", value_enum, ignore_case = true, default_value_t)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up one transaction.
    Transaction {
        /// Transaction id.
        id: String,
    },
    /// Search transactions. Dates are `YYYYMMDD` or `YYYYMMDDhhmmss`.
    Transactions {
        /// Window start.
        #[arg(long)]
        start: Option<String>,
        /// Window end.
        #[arg(long)]
        end: Option<String>,
        /// Page size.
        #[arg(long)]
        limit: Option<u32>,
        /// Zero-based page, requires `--limit`.
        #[arg(long)]
        page: Option<u32>,
        /// Extra search field, `name=value`. Repeatable.
        ///
        /// The value is read as JSON when that fits the field
        /// (`result_limit=5`, `condition=["complete","failed"]`) and as text
        /// otherwise (`condition=complete`, `zip=02134`).
        #[arg(long = "set", value_parser = parse_override)]
        overrides: Vec<(String, String)>,
    },
    /// Print a transaction receipt.
    Receipt {
        /// Transaction id.
        id: String,
    },
    /// Show the merchant profile.
    Profile {
        /// Include processor details.
        #[arg(long)]
        processor_details: bool,
    },
    /// List vault customers.
    Vault {
        /// One customer.
        #[arg(long)]
        id: Option<String>,
    },
    /// List subscriptions.
    Subscriptions {
        /// One subscription.
        #[arg(long)]
        id: Option<String>,
    },
    /// List recurring plans.
    Plans,
    /// List processors configured on the account.
    Processors,
    /// Show whether the account is in test mode.
    TestMode,
}

fn parse_override(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw.split_once('=').ok_or_else(|| anyhow!("expected name=value, got `{raw}`"))?;
    if name.is_empty() {
        return Err(anyhow!("override name is empty in `{raw}`"));
    }
    Ok((name.to_owned(), value.to_owned()))
}

/// Typed JSON for `raw` if a search accepts it in `field`, else the text itself.
fn override_value(field: &str, raw: &str) -> Value {
    serde_json::from_str::<Value>(raw)
        .ok()
        .filter(|typed| {
            let single = Map::from_iter([(field.to_owned(), typed.clone())]);
            serde_json::from_value::<TransactionSearch>(Value::Object(single)).is_ok()
        })
        .unwrap_or_else(|| Value::String(raw.to_owned()))
}

fn transaction_search(
    start: Option<String>,
    end: Option<String>,
    limit: Option<u32>,
    page: Option<u32>,
    overrides: Vec<(String, String)>,
) -> Call<TransactionSearch> {
    let request = TransactionSearch {
        start_date: start,
        end_date: end,
        result_limit: limit,
        page_number: page,
        ..TransactionSearch::default()
    };
    let overrides = overrides.into_iter().fold(Overrides::new(), |acc, (name, raw)| {
        let value = override_value(&name, &raw);
        acc.set(name, value)
    });
    Call::new(request).with_overrides(overrides)
}

fn load_config(path: Option<&PathBuf>) -> Result<GatewayConfig> {
    match path {
        Some(path) => GatewayConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(GatewayConfig::default()),
    }
}

fn emit<T: Serialize>(response: &ApiResponse<T>) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(if response.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn run<T: Transport>(gateway: &Gateway<T>, command: Command) -> Result<ExitCode> {
    let query = gateway.query();
    match command {
        Command::Transaction { id } => emit(&query.transaction(TransactionQuery::new(id)).await),
        Command::Transactions { start, end, limit, page, overrides } => {
            emit(&query.transactions(transaction_search(start, end, limit, page, overrides)).await)
        }
        Command::Receipt { id } => {
            let response = query.receipt(ReceiptQuery::new(id)).await;
            if let Some(receipt) = &response.data {
                println!("{}", receipt.0);
                return Ok(ExitCode::SUCCESS);
            }
            emit(&response)
        }
        Command::Profile { processor_details } => {
            let request = ProfileQuery { processor_details: processor_details.then_some(true) };
            emit(&query.profile(request).await)
        }
        Command::Vault { id } => {
            let request = CustomerVaultQuery { customer_vault_id: id, ..CustomerVaultQuery::default() };
            emit(&query.customer_vault(request).await)
        }
        Command::Subscriptions { id } => {
            let request = RecurringQuery { subscription_id: id, ..RecurringQuery::default() };
            emit(&query.recurring(request).await)
        }
        Command::Plans => emit(&query.recurring_plans(RecurringPlansQuery::default()).await),
        Command::Processors => emit(&query.gateway_processors().await),
        Command::TestMode => emit(&query.test_mode_status().await),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_observability(args.log_format);

    let config = load_config(args.config.as_ref())?;
    let gateway = Gateway::from_env(&config).with_context(|| {
        format!("no usable security key in ${}", config.security_key_env)
    })?;

    info!(base_url = %config.base_url, "gateway client ready");
    run(&gateway, args.command).await
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use clap::CommandFactory;
    use nmi_gateway::{
        SecurityKey,
        transport::{AuthenticatedRequest, TransportResponse},
    };

    use super::*;

    type Sent = Arc<Mutex<Vec<Vec<(String, String)>>>>;

    #[derive(Debug, Default)]
    struct CapturingTransport {
        sent: Sent,
    }

    impl Transport for CapturingTransport {
        async fn post_form<'a>(
            &'a self,
            _url: &'a str,
            request: &'a AuthenticatedRequest,
        ) -> nmi_gateway::Result<TransportResponse> {
            self.sent.lock().unwrap().push(request.form_pairs());
            Ok(TransportResponse { status: 200, body: "<nm_response></nm_response>".to_owned() })
        }

        fn protocol_name(&self) -> &'static str {
            "capturing"
        }
    }

    async fn run_args(argv: &[&str]) -> Vec<Vec<(String, String)>> {
        let args = Args::try_parse_from(argv).unwrap();
        let key = SecurityKey::new("test-key").unwrap();
        let sent = Sent::default();
        let transport = CapturingTransport { sent: Arc::clone(&sent) };
        let gateway = Gateway::with_transport(key, transport, &GatewayConfig::default());
        run(&gateway, args.command).await.unwrap();
        let sent = sent.lock().unwrap().clone();
        sent
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_log_format_flag() {
        let args = Args::try_parse_from(["nmi", "--log-format", "JSON", "plans"]).unwrap();
        assert_eq!(args.log_format, LogFormat::Json);
        assert!(Args::try_parse_from(["nmi", "--log-format", "xml", "plans"]).is_err());
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(parse_override("condition=complete").unwrap(), ("condition".to_owned(), "complete".to_owned()));
        assert_eq!(parse_override("email=a=b").unwrap(), ("email".to_owned(), "a=b".to_owned()));
        assert!(parse_override("condition").is_err());
        assert!(parse_override("=complete").is_err());
    }

    #[test]
    fn test_transactions_subcommand() {
        let args = Args::try_parse_from([
            "nmi",
            "transactions",
            "--start",
            "20240101",
            "--limit",
            "50",
            "--set",
            "condition=complete",
        ])
        .unwrap();

        match args.command {
            Command::Transactions { start, limit, overrides, .. } => {
                assert_eq!(start.as_deref(), Some("20240101"));
                assert_eq!(limit, Some(50));
                assert_eq!(overrides, vec![("condition".to_owned(), "complete".to_owned())]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_override_value_fits_the_field() {
        assert_eq!(override_value("result_limit", "5"), Value::from(5));
        assert_eq!(override_value("condition", "complete"), Value::from("complete"));
        assert_eq!(override_value("condition", r#"["complete","failed"]"#), serde_json::json!(["complete", "failed"]));
        assert_eq!(override_value("zip", "02134"), Value::from("02134"));
        assert_eq!(override_value("order_id", "123"), Value::from("123"));
    }

    #[tokio::test]
    async fn test_transactions_overrides_reach_the_wire() {
        let sent = run_args(&[
            "nmi",
            "transactions",
            "--start",
            "20240101",
            "--set",
            "condition=complete",
            "--set",
            "result_limit=5",
        ])
        .await;

        assert_eq!(sent.len(), 1);
        let pairs = &sent[0];
        assert!(pairs.contains(&("condition".to_owned(), "complete".to_owned())));
        assert!(pairs.contains(&("result_limit".to_owned(), "5".to_owned())));
        assert!(pairs.contains(&("start_date".to_owned(), "20240101".to_owned())));
    }

    #[tokio::test]
    async fn test_transactions_rejects_unknown_field_before_sending() {
        let sent = run_args(&["nmi", "transactions", "--set", "colour=blue"]).await;
        assert!(sent.is_empty());
    }

    #[test]
    fn test_missing_config_file() {
        let missing = PathBuf::from("/nonexistent/nmi.toml");
        assert!(load_config(Some(&missing)).is_err());
        assert!(load_config(None).is_ok());
    }
}
