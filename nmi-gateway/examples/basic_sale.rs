//! Card sale followed by a lookup of the resulting transaction.
//!
//! # Running this example
//!
//! Use a sandbox key; the test card below is only accepted in test mode:
//! ```bash
//! export NMI_SECURITY_KEY=<sandbox key>
//! cargo run --example basic_sale
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use nmi_gateway::{
    Gateway,
    config::GatewayConfig,
    request::{Call, Overrides, query::TransactionQuery, transaction::TransactionRequest},
    response::ResponseCode,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("nmi_gateway=debug").init();

    let gateway = Gateway::from_env(&GatewayConfig::default())?;

    let sale = TransactionRequest {
        ccnumber: Some("4111111111111111".to_owned()),
        ccexp: Some("1025".to_owned()),
        cvv: Some("999".to_owned()),
        amount: Some(Decimal::new(1099, 2)),
        orderid: Some("example-1".to_owned()),
        ..TransactionRequest::default()
    };
    let call = Call::new(sale).with_overrides(Overrides::new().set("customer_receipt", false));

    let response = gateway.transactions().sale(call).await;
    println!("sale: {} {}", response.status, response.message);

    let Some(data) = response.data else {
        return Ok(());
    };
    if data.response != ResponseCode::Approved {
        println!("not approved: {}", data.response);
        return Ok(());
    }

    if let Some(id) = data.transactionid {
        let lookup = gateway.query().transaction(TransactionQuery::new(id)).await;
        match lookup.data {
            Some(report) => {
                for transaction in report.transaction {
                    println!(
                        "{} {:?} actions={}",
                        transaction.transaction_id.unwrap_or_default(),
                        transaction.condition,
                        transaction.action.len()
                    );
                }
            }
            None => eprintln!("lookup failed: {}", lookup.message),
        }
    }

    Ok(())
}
