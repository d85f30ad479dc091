use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use community_advisor::advice::invoke::{invoke_shape, invoke_text};
use community_advisor::advice::{fallback, prompts};
use community_advisor::contract::HealthAdvice;
use community_advisor::{AdviceError, Config, GeminiClient};

const DEFAULT_SYMPTOMS: &str = "mild fever and headache since yesterday";
const DEFAULT_CHAT: &str = "What government schemes help small farmers buy seeds?";

/// One-shot probe: runs a symptom query and a chat message against the
/// configured endpoint and reports what a caller would see.
///
/// Usage: `community-advisor [SYMPTOMS] [CHAT MESSAGE]`
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting community advisor probe v{}", env!("CARGO_PKG_VERSION"));

    let client = GeminiClient::new(&config.gemini).context("Failed to build Gemini client")?;
    info!(
        "Gemini client initialized (model: {}, endpoint: {})",
        config.gemini.model,
        client.endpoint()
    );

    let mut args = std::env::args().skip(1);
    let symptoms = args.next().unwrap_or_else(|| DEFAULT_SYMPTOMS.to_string());
    let chat = args.next().unwrap_or_else(|| DEFAULT_CHAT.to_string());

    let health_prompt = prompts::health_prompt(&symptoms, None, None);
    let health = invoke_shape::<HealthAdvice>(&client, &health_prompt).await;
    report("health advice", &health);
    let health = health.unwrap_or_else(|_| fallback::health_advice());

    let reply = invoke_text(&client, &prompts::chat_prompt(&chat, "")).await;
    report("chat", &reply);
    let reply = reply.unwrap_or_else(|e| {
        fallback::fallback_text(&e, fallback::CHAT_EMPTY, fallback::CHAT_UNAVAILABLE)
    });

    let urgency = health.urgency();
    let output = serde_json::json!({
        "health_advice": health,
        "urgency": urgency,
        "chat_response": reply,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn report<T>(use_case: &str, result: &Result<T, AdviceError>) {
    match result {
        Ok(_) => info!("{use_case}: endpoint returned a valid response"),
        Err(e) => error!(failure = %e.kind(), "{use_case}: falling back ({e})"),
    }
}
