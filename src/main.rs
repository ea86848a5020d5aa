use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tokenpay::application::adapter::TokenGateway;
use tokenpay::domain::config::GatewayConfig;
use tokenpay::domain::ports::{
    ActivityLogBox, GatewayTransportBox, PaymentModule, TransactionRecorderBox,
};
use tokenpay::infrastructure::http::{HttpTransport, TransportSettings};
use tokenpay::infrastructure::log::TracingActivityLog;
use tokenpay::infrastructure::memory::RecordedTransactions;
use tokenpay::interfaces::csv::charge_reader::ChargeReader;
use tokenpay::interfaces::csv::receipt_writer::{Receipt, ReceiptWriter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input charges CSV file
    input: PathBuf,

    /// Gateway configuration JSON file (credentials, test-mode flag)
    #[arg(long)]
    config: PathBuf,

    /// Gateway endpoint override. Defaults follow the test-mode flag.
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config_file = File::open(&cli.config).into_diagnostic()?;
    let config: GatewayConfig = serde_json::from_reader(config_file).into_diagnostic()?;

    let settings = TransportSettings {
        endpoint: cli.endpoint,
        timeout_secs: cli.timeout_secs,
        ..Default::default()
    };
    let transport: GatewayTransportBox =
        Box::new(HttpTransport::new(config.test_mode, settings).into_diagnostic()?);
    let activity_log: ActivityLogBox = Box::new(TracingActivityLog);
    let recorder: TransactionRecorderBox = Box::new(RecordedTransactions::new());

    let gateway = TokenGateway::new(config, transport, activity_log, recorder);

    // Process the batch
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = ChargeReader::new(file);

    let stdout = io::stdout();
    let mut writer = ReceiptWriter::new(stdout.lock());

    for request in reader.charges() {
        match request {
            Ok(request) => {
                let invoice_id = request.invoice_id.clone();
                match gateway.capture(request).await {
                    Ok(outcome) => {
                        writer
                            .write_receipt(&Receipt::from_outcome(&invoice_id, &outcome))
                            .into_diagnostic()?;
                    }
                    Err(e) => {
                        eprintln!("Error processing charge: {}", e);
                    }
                }
            }
            Err(e) => {
                eprintln!("Error reading charge: {}", e);
            }
        }
    }

    writer.flush().into_diagnostic()?;

    Ok(())
}
