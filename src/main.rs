// ==========================================================
//  macscout — MAC address resolution aid
// ==========================================================

use std::io::Read;
use std::time::Duration;

use macscout::{
    report, HttpDeviceDirectory, HttpLeaseSource, MacResolver, ResolveError, ResolverConfig,
};

/// Initialize the process-wide logger
fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

#[tokio::main]
async fn main() -> Result<(), ResolveError> {
    init_logging();

    let raw_args: Vec<String> = std::env::args().collect();
    let mut args = raw_args.iter().skip(1);

    let mut timeout_ms = None;
    let mut words: Vec<String> = Vec::new();

    // Parse command line arguments
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--timeout" | "-t" => timeout_ms = args.next().and_then(|s| s.parse().ok()),
            "--help" | "-h" => {
                println!("Usage: macscout [OPTIONS] [MESSAGE TEXT]");
                println!("Options:");
                println!("  -t, --timeout <MS>   set the per-request timeout (default: 10000)");
                println!("  -h, --help           show this help message");
                println!();
                println!("Reads the message from stdin when no text is given.");
                println!();
                println!("Environment:");
                println!("  MACSCOUT_DIRECTORY_TOKEN   directory service credential (required)");
                println!("  MACSCOUT_LEASE_URL         lease page endpoint override");
                println!("  MACSCOUT_DIRECTORY_URL     directory endpoint override");
                println!("  MACSCOUT_ACCOUNT_URL       account link base override");
                return Ok(());
            }
            _ => words.push(arg.clone()),
        }
    }

    // One message per invocation: argv, or stdin when no text is given
    let message = if words.is_empty() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        words.join(" ")
    };

    let mut config = ResolverConfig::from_env()?;
    if let Some(ms) = timeout_ms {
        config.http_timeout_ms = ms;
    }

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(config.http_timeout_ms))
        .build()?;

    let resolver = MacResolver::new(
        Box::new(HttpLeaseSource::new(http.clone(), &config)),
        Box::new(HttpDeviceDirectory::new(http, &config)),
    );

    let results = resolver.resolve_message(&message).await;
    println!("{}", report::render(&results, &config.account_url));

    Ok(())
}
