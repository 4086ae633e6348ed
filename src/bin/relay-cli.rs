use clap::Parser;
use reqwest::header::{COOKIE, SET_COOKIE};
use serde_json::Value;
use url::Url;

use session_relay::cookie::{cookie_pair, CookieJar};
use session_relay::relay::chain_url;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Send requests through a chain of session relays", long_about = None)]
struct Cli {
    /// Hop base URLs, first hop first (e.g. http://localhost:8080/ http://localhost:8081/).
    #[arg(required = true, num_args = 1..)]
    hops: Vec<Url>,

    /// Number of requests to send; cookies from each reply are sent with the next.
    #[arg(short, long, default_value_t = 1)]
    repeat: u32,

    /// Initial Cookie header.
    #[arg(short, long)]
    cookie: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let url = chain_url(&cli.hops).ok_or("at least one hop is required")?;
    let client = reqwest::Client::new();

    let mut jar = session_relay::cookie::parse(cli.cookie.as_deref()).unwrap_or_default();

    for attempt in 1..=cli.repeat {
        let mut request = client.get(url.clone());
        if let Some(cookie) = jar.to_header() {
            request = request.header(COOKIE, cookie);
        }

        let res = request.send().await?;
        remember_cookies(&mut jar, &res);
        println!("# request {} -> {}", attempt, res.status());
        print_response(res).await?;
    }

    Ok(())
}

/// Store every `Set-Cookie` of `res` in the jar, replacing older values.
fn remember_cookies(jar: &mut CookieJar, res: &reqwest::Response) {
    for value in res.headers().get_all(SET_COOKIE) {
        if let Some((name, value)) = value.to_str().ok().and_then(cookie_pair) {
            jar.set(name, value);
        }
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => {
            eprintln!("Error: relay returned status {} with a non-JSON body", status);
            eprintln!("Response: {}", text);
        }
    }
    Ok(())
}
