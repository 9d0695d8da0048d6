//! The extension picker shared by every wizard.

use crate::core::api::QuarkusApi;
use crate::core::extension::QExtension;
use crate::core::state::{State, WizardState};
use crate::error::{Result, WizardError};
use crate::wizard::prompt::PickItem;
use crate::wizard::{MultiStepInput, PromptResult, QuickPickParameters, Step, StepRef};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

pub const CONTINUE_LABEL: &str = "Press <Enter> to continue";

/// The extension catalog, fetched on first use and kept for the rest of the run.
pub struct ExtensionCatalog {
    api: QuarkusApi,
    cache: OnceCell<Vec<QExtension>>,
}

impl ExtensionCatalog {
    pub fn new(api: QuarkusApi) -> Self {
        Self {
            api,
            cache: OnceCell::new(),
        }
    }

    /// A catalog that never goes to the network.
    pub fn prefilled(api: QuarkusApi, extensions: Vec<QExtension>) -> Self {
        Self {
            api,
            cache: OnceCell::new_with(Some(extensions)),
        }
    }

    pub fn api(&self) -> &QuarkusApi {
        &self.api
    }

    pub async fn load(&self) -> Result<&[QExtension]> {
        let extensions = self
            .cache
            .get_or_try_init(|| self.api.fetch_catalog())
            .await?;
        Ok(extensions.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionItem {
    Continue { selected: usize },
    Extension { extension: QExtension, selected: bool },
}

impl PickItem for ExtensionItem {
    fn label(&self) -> String {
        match self {
            ExtensionItem::Continue { .. } => CONTINUE_LABEL.to_string(),
            ExtensionItem::Extension {
                extension,
                selected: true,
            } => format!("✓ {}", extension.name),
            ExtensionItem::Extension { extension, .. } => extension.name.clone(),
        }
    }

    fn description(&self) -> Option<String> {
        match self {
            ExtensionItem::Continue { selected: 0 } => None,
            ExtensionItem::Continue { selected: 1 } => Some("1 extension selected".to_string()),
            ExtensionItem::Continue { selected } => Some(format!("{selected} extensions selected")),
            ExtensionItem::Extension { extension, .. } => Some(extension.artifact_id.clone()),
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            ExtensionItem::Continue { .. } => None,
            ExtensionItem::Extension { extension, .. } => extension.description.clone(),
        }
    }
}

/// Continue first, then the current selection in selection order, then everything else.
pub fn picker_items(catalog: &[QExtension], state: &State) -> Vec<ExtensionItem> {
    let mut items = Vec::with_capacity(catalog.len() + 1);
    items.push(ExtensionItem::Continue {
        selected: state.extensions.len(),
    });

    items.extend(state.extensions.iter().map(|extension| ExtensionItem::Extension {
        extension: extension.clone(),
        selected: true,
    }));

    items.extend(
        catalog
            .iter()
            .filter(|extension| !state.is_selected(extension))
            .map(|extension| ExtensionItem::Extension {
                extension: extension.clone(),
                selected: false,
            }),
    );

    items
}

/// Toggle extensions until the user continues, then hand over to `then`.
pub struct PickExtensions<S: WizardState> {
    catalog: Arc<ExtensionCatalog>,
    then: Option<StepRef<S>>,
}

impl<S: WizardState> PickExtensions<S> {
    pub fn new(catalog: Arc<ExtensionCatalog>, then: Option<StepRef<S>>) -> Self {
        Self { catalog, then }
    }
}

#[async_trait]
impl<S: WizardState + 'static> Step<S> for PickExtensions<S> {
    fn name(&self) -> &'static str {
        "pick-extensions"
    }

    async fn run(&self, input: &mut MultiStepInput, state: &mut S) -> Result<Option<StepRef<S>>> {
        let catalog = match self.catalog.load().await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::debug!("Extension catalog unavailable: {e}");
                state.common_mut().interrupt(format!(
                    "Unable to load the extension catalog from {}",
                    self.catalog.api().api_url()
                ));
                return Err(WizardError::Cancel);
            }
        };

        loop {
            let common = state.common();
            let selected = common.extensions.len();
            let result = input
                .show_quick_pick(QuickPickParameters {
                    title: "Quarkus Extensions".to_string(),
                    step: Some(input.step_number()),
                    total_steps: Some(common.total_steps),
                    items: picker_items(catalog, common),
                    active_item: None,
                    placeholder: Some(format!("Pick extensions to include ({selected} selected)")),
                    buttons: Vec::new(),
                })
                .await?;

            match result {
                PromptResult::Value(ExtensionItem::Continue { .. }) => return Ok(self.then.clone()),
                PromptResult::Value(ExtensionItem::Extension { extension, .. }) => {
                    tracing::debug!(artifact_id = %extension.artifact_id, "Toggling extension");
                    state.common_mut().toggle_extension(&extension);
                }
                PromptResult::Button(button) => {
                    tracing::trace!(button = %button.id, "Ignoring button on extension picker");
                }
            }
        }
    }
}
