use plantid::infra::config;
use plantid::{LocalLikeStore, PgStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--check-vision]\n\
         \n\
         Optional env vars (all absent is a valid local-only setup):\n\
           DATABASE_URL, GEMINI_API_KEY, GEMINI_MODEL, GEMINI_TIMEOUT_SECS,\n\
           PORT, LOCAL_LIKES_PATH\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let check_vision = args.iter().any(|a| a == "--check-vision");

    println!("> Preflight:");
    println!("  bind address: {}", config::bind_addr());

    // Backing store connectivity (optional).
    match config::database_url() {
        Some(url) => {
            println!("  DATABASE_URL is set");
            match PgStore::connect(&url).await {
                Ok(pg) => {
                    pg.ping().await?;
                    println!("  Backing store reachable, schema ensured.");
                }
                Err(e) => {
                    eprintln!("  Warning: backing store unreachable ({e}); service would run local-only.");
                }
            }
        }
        None => println!("  DATABASE_URL not set -> local-only mode"),
    }

    // Local like-store path writability.
    let likes_path = config::local_likes_path();
    println!("  Like state path: {}", likes_path.display());
    let store = LocalLikeStore::open(likes_path.clone()).await;
    let count = store.likes_count("preflight-probe").await;
    println!("  Like state readable (probe count = {count}).");

    // Vision model configuration.
    match config::gemini_api_key() {
        Some(_) => {
            println!(
                "  GEMINI_API_KEY is set (model: {}, timeout: {}s)",
                config::gemini_model(),
                config::gemini_timeout_secs()
            );
            if check_vision {
                let url = format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}?key={}",
                    config::gemini_model(),
                    config::gemini_api_key().unwrap_or_default()
                );
                let status = reqwest::get(&url).await?.status();
                if status.is_success() {
                    println!("  Vision model endpoint reachable.");
                } else {
                    eprintln!("  Warning: vision model endpoint answered {status}.");
                }
            }
        }
        None => println!("  GEMINI_API_KEY not set -> identification returns the placeholder"),
    }

    println!("> Preflight OK.");
    Ok(())
}
