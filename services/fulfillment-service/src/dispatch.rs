use chrono::NaiveDate;

use crate::error::FetchError;
use crate::intent::{Action, CallbackOption, Resolved};
use crate::models::{IntentRequest, DEFAULT_ACTION};
use crate::state::AppState;

pub const WELCOME: &str = "Hi, how can I help you today?";
pub const INPUT_WELCOME: [&str; 2] = ["testando resposta", "apareceu aii?"];
pub const OPTION_TWO: &str = "opção 2 selecionada";
pub const NO_VALID_OPTION: &str = "Nenhuma opção válida foi selecionada.";
pub const NOT_UNDERSTOOD: &str = "Sorry, I did not understand that clearly.";
pub const NO_HANDLER: &str = "No handler for the requested action.";
pub const UPSTREAM_UNAVAILABLE: &str = "Não foi possível obter os dados agora. Tente novamente mais tarde.";

/// Picks the reply texts for one webhook call. Never fails.
pub async fn dispatch(state: &AppState, request: &IntentRequest, today: NaiveDate) -> Vec<String> {
    match state.catalog.resolve(&request.action) {
        Resolved::Known(Action::DefaultWelcome) => vec![WELCOME.to_string()],
        Resolved::Known(Action::InputWelcome) => {
            INPUT_WELCOME.iter().map(|text| text.to_string()).collect()
        }
        Resolved::Known(Action::TestOptions) => {
            test_options(state, request.callback_token.as_deref(), today).await
        }
        Resolved::Known(Action::InputUnknown) => vec![NOT_UNDERSTOOD.to_string()],
        Resolved::Unknown(name) => {
            tracing::info!(action = %name, "no handler for action");
            vec![no_handler(&name, state.verbose_replies)]
        }
    }
}

async fn test_options(state: &AppState, token: Option<&str>, today: NaiveDate) -> Vec<String> {
    match CallbackOption::from_token(token) {
        CallbackOption::Enrichment => {
            let text = match state.enrichment.fetch(today).await {
                Ok(record) => record.headline(),
                Err(err) => fetch_failure(state, &err),
            };
            vec![text]
        }
        CallbackOption::Acknowledge => vec![OPTION_TWO.to_string()],
        CallbackOption::Invalid(token) => {
            tracing::warn!(callback_data = ?token, "callback_data not recognized");
            vec![NO_VALID_OPTION.to_string()]
        }
    }
}

fn no_handler(action: &str, verbose: bool) -> String {
    // The default name carries no caller input, so it is always safe to echo.
    if verbose || action == DEFAULT_ACTION {
        format!("No handler for the action name {action}.")
    } else {
        NO_HANDLER.to_string()
    }
}

fn fetch_failure(state: &AppState, err: &FetchError) -> String {
    match err {
        FetchError::NoDataForToday(date) => {
            tracing::info!(provider = state.enrichment.name(), %date, "no data for today");
            format!("Nenhum dado encontrado para a data de hoje ({date})")
        }
        FetchError::Status(code) if state.verbose_replies => {
            tracing::error!(provider = state.enrichment.name(), error = %err, "enrichment fetch failed");
            format!("Erro na requisição: {code}")
        }
        _ => {
            tracing::error!(provider = state.enrichment.name(), error = %err, "enrichment fetch failed");
            UPSTREAM_UNAVAILABLE.to_string()
        }
    }
}
