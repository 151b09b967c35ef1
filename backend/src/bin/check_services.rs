//! Utility binary for verifying external service configuration
//! This is a utility binary, not part of the main application
//!
//! Makes a single MongoDB connection attempt and a single chat completion
//! using the same environment variables as the server.

use portfolio_backend::chat::{self, OpenAiClient};
use portfolio_backend::config::Config;
use portfolio_backend::store::connection::mask_uri;
use portfolio_backend::store::MongoSubmissionStore;
use tokio::time::{timeout, Duration};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    let mut failures = 0;

    // Test 1: Document store
    println!("1. Connecting to MongoDB...");
    if config.database.uri.is_empty() {
        eprintln!("   ⚠ MONGODB_URI not found in environment");
        failures += 1;
    } else {
        println!("   URI: {}", mask_uri(&config.database.uri));
        match MongoSubmissionStore::connect(&config.database).await {
            Ok(_) => println!("   ✓ Connected to database '{}'", config.database.database),
            Err(e) => {
                eprintln!("   ✗ Connection failed: {}", e);
                failures += 1;
            }
        }
    }

    // Test 2: Completion provider
    println!("\n2. Checking for OPENAI_API_KEY environment variable...");
    if config.chat.api_key.is_empty() {
        eprintln!("   ⚠ OPENAI_API_KEY not found in environment");
        failures += 1;
    } else {
        println!(
            "   ✓ OPENAI_API_KEY is set (length: {} chars)",
            config.chat.api_key.len()
        );

        println!("\n3. Sending test message to {}...", config.chat.base_url);
        let client = OpenAiClient::new(&config.chat)?;
        match timeout(
            Duration::from_secs(30),
            chat::relay(&client, "Say hello in one sentence."),
        )
        .await
        {
            Ok(Ok(reply)) => println!("   ✓ Reply received:\n   {}", reply.trim()),
            Ok(Err(e)) => {
                eprintln!("   ✗ Completion failed: {}", e);
                failures += 1;
            }
            Err(_) => {
                eprintln!("   ✗ Completion timed out after 30 seconds");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} check(s) failed", failures).into());
    }

    println!("\n✓ All checks passed!");
    Ok(())
}
