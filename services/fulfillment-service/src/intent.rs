use std::collections::HashMap;

use crate::error::CatalogError;

/// Intent actions the webhook answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    DefaultWelcome,
    InputWelcome,
    TestOptions,
    InputUnknown,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::DefaultWelcome,
        Action::InputWelcome,
        Action::TestOptions,
        Action::InputUnknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::DefaultWelcome => "defaultWelcomeIntent",
            Action::InputWelcome => "input.welcome",
            Action::TestOptions => "teste.action",
            Action::InputUnknown => "inputUnknown",
        }
    }
}

/// Result of looking up an action name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    Known(Action),
    Unknown(String),
}

/// Sub-options of [`Action::TestOptions`], carried in the callback token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackOption {
    Enrichment,
    Acknowledge,
    Invalid(Option<String>),
}

impl CallbackOption {
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("opcao_1") => CallbackOption::Enrichment,
            Some("opcao_2") => CallbackOption::Acknowledge,
            other => CallbackOption::Invalid(other.map(str::to_string)),
        }
    }
}

/// Name-to-action table, built once at startup.
#[derive(Debug)]
pub struct ActionCatalog {
    actions: HashMap<&'static str, Action>,
}

impl ActionCatalog {
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_actions(&Action::ALL)
    }

    fn from_actions(list: &[Action]) -> Result<Self, CatalogError> {
        let mut actions = HashMap::with_capacity(list.len());
        for action in list {
            let name = action.as_str();
            if actions.insert(name, *action).is_some() {
                return Err(CatalogError::DuplicateAction(name));
            }
        }
        Ok(Self { actions })
    }

    pub fn resolve(&self, name: &str) -> Resolved {
        // Exact match only; "Teste.Action" or "teste.action.v2" are unknown.
        match self.actions.get(name) {
            Some(action) => Resolved::Known(*action),
            None => Resolved::Unknown(name.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
