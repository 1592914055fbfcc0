use prompt_submitter::dom::{Document, PromptSource, TextElement};
use prompt_submitter::settings::Settings;
use prompt_submitter::submitter::PromptSubmitter;
use prompt_submitter::CHAT_ENDPOINT;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        // stdout is the response display
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging();

    let settings = Settings::new()?;

    let mut document = Document::new();
    let prompt = document.insert(settings.prompt_element.clone(), TextElement::new());
    let response = document.insert(settings.response_element.clone(), TextElement::new());
    let submitter = PromptSubmitter::from_document(&document, &settings)?;

    info!(
        "Sending prompts to {} (overlap policy: {:?})",
        CHAT_ENDPOINT,
        submitter.policy()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        prompt.set_value(line);

        let submission = submitter.submit();
        println!("{}", response.value());

        pending.spawn(async move {
            if let Some(text) = submission.await.display_text() {
                println!("{}", text);
            }
        });
    }

    while let Some(joined) = pending.join_next().await {
        if let Err(e) = joined {
            error!("Submission task failed: {}", e);
        }
    }

    Ok(())
}
