use super::usage;
use crate::commands::registry::{CommandHandler, CommandInvocation};
use crate::core::fetch::FetchResponse;
use crate::core::output::CommandOutput;
use crate::core::session::Session;
use crate::utils::url::weather_url;
use async_trait::async_trait;
use tracing::warn;

const USAGE_WEATHER: &str = "Usage: weather [city]. Example: weather Brussels";

pub(crate) struct WeatherCommand;

#[async_trait]
impl CommandHandler for WeatherCommand {
    async fn run(&self, session: &mut Session, invocation: CommandInvocation<'_>) -> CommandOutput {
        let city = invocation.args.join("+");
        if city.is_empty() {
            return usage(USAGE_WEATHER);
        }

        let url = weather_url(session.config.weather_url(), &city);
        let result = session
            .fetcher
            .get(&url)
            .await
            .and_then(FetchResponse::into_success_text);
        match result {
            Ok(body) => CommandOutput::text(body),
            Err(err) => {
                warn!(%url, error = %err, "weather lookup failed");
                CommandOutput::text(format!(
                    "weather: could not fetch forecast for {city}. Details: {err}"
                ))
            }
        }
    }
}

/// Prints the raw body whatever the status, like the real thing.
pub(crate) struct CurlCommand;

#[async_trait]
impl CommandHandler for CurlCommand {
    async fn run(&self, session: &mut Session, invocation: CommandInvocation<'_>) -> CommandOutput {
        let Some(url) = invocation.arg(0) else {
            return CommandOutput::text("curl: no URL provided");
        };

        match session.fetcher.get(url).await {
            Ok(response) => CommandOutput::text(response.body),
            Err(err) => {
                warn!(url, error = %err, "curl failed");
                CommandOutput::text(format!("curl: could not fetch URL {url}. Details: {err}"))
            }
        }
    }
}
