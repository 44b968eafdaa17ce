//! Configuration session
//!
//! One session per product being configured. The session owns the
//! catalog snapshot, the selection state, and the last derivation, and
//! is driven by exactly one actor at a time: user input event →
//! synchronous state transition → synchronous re-derivation. Only the
//! catalog load and the save/export calls are async, and at most one
//! load is honored at a time (last request wins).

use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use shared::export::{self, DatasheetRequest, SaveConfigurationRequest};
use shared::models::ProductCatalog;
use shared::pricing::{Derivation, DeriveError, derive};
use shared::selection::{SelectionError, SelectionState};

use crate::client::CatalogApi;
use crate::error::ClientError;

/// Session-level error
#[derive(Debug, Error)]
pub enum SessionError {
    /// No product has been loaded yet
    #[error("No product loaded")]
    NoProduct,

    /// Invalid selection input, rejected before any state change
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Derivation failure (no variant selected)
    #[error(transparent)]
    Derive(#[from] DeriveError),

    /// Transport failure
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Loaded product plus the user's progress against it
struct ActiveConfiguration {
    catalog: ProductCatalog,
    selection: SelectionState,
    derivation: Option<Derivation>,
}

impl ActiveConfiguration {
    /// Recompute price/part-code/summary from current state.
    ///
    /// `None` only while no variant resolves; the caller simply has no
    /// price to render yet.
    fn rederive(&mut self) {
        self.derivation = match derive(&self.catalog, &self.selection) {
            Ok(derivation) => Some(derivation),
            Err(DeriveError::IncompleteSelection) => None,
        };
    }
}

/// Per-session configurator state machine
pub struct ConfiguratorSession {
    api: Arc<dyn CatalogApi>,
    session_id: Uuid,
    /// Bumped on every load; responses from older generations are discarded
    load_generation: u64,
    /// Cancels whatever load is still parked on the wire
    cancel_loads: CancellationToken,
    active: Option<ActiveConfiguration>,
}

impl ConfiguratorSession {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            session_id: Uuid::new_v4(),
            load_generation: 0,
            cancel_loads: CancellationToken::new(),
            active: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Handle for cancelling the pending load from another task, e.g.
    /// when the user navigates away mid-flight
    pub fn load_cancellation(&self) -> CancellationToken {
        self.cancel_loads.clone()
    }

    /// Load a product and reset selection state to its defaults.
    ///
    /// Starting a new load supersedes any load still in flight: the
    /// older call returns `ClientError::Superseded` and never touches
    /// state, so a slow response cannot overwrite a newer product.
    pub async fn load_product(&mut self, product_id: i64) -> Result<(), SessionError> {
        self.load_generation += 1;
        let generation = self.load_generation;
        self.cancel_loads.cancel();
        self.cancel_loads = CancellationToken::new();
        let token = self.cancel_loads.clone();

        tracing::info!(session = %self.session_id, product_id, "loading product");

        let details = tokio::select! {
            _ = token.cancelled() => return Err(ClientError::Superseded.into()),
            result = self.api.product_details(product_id) => result?,
        };

        if generation != self.load_generation {
            tracing::debug!(
                session = %self.session_id,
                product_id,
                "discarding superseded catalog load"
            );
            return Err(ClientError::Superseded.into());
        }
        if details.product.id != product_id {
            return Err(ClientError::InvalidResponse(format!(
                "requested product {} but received {}",
                product_id, details.product.id
            ))
            .into());
        }

        let catalog = details.normalize();
        let mut selection = SelectionState::new();
        selection.initialize(&catalog);

        let mut active = ActiveConfiguration {
            catalog,
            selection,
            derivation: None,
        };
        active.rederive();
        self.active = Some(active);
        Ok(())
    }

    /// Drop the loaded product and cancel any pending load
    pub fn unload(&mut self) {
        self.cancel_loads.cancel();
        self.cancel_loads = CancellationToken::new();
        self.load_generation += 1;
        self.active = None;
    }

    // ==================== State accessors ====================

    pub fn catalog(&self) -> Option<&ProductCatalog> {
        self.active.as_ref().map(|a| &a.catalog)
    }

    pub fn selection(&self) -> Option<&SelectionState> {
        self.active.as_ref().map(|a| &a.selection)
    }

    /// Latest derivation; `None` until a product is loaded and a variant
    /// resolves
    pub fn derivation(&self) -> Option<&Derivation> {
        self.active.as_ref().and_then(|a| a.derivation.as_ref())
    }

    // ==================== Mutators ====================

    fn mutate(
        &mut self,
        apply: impl FnOnce(&ProductCatalog, &mut SelectionState) -> Result<(), SelectionError>,
    ) -> Result<(), SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoProduct)?;
        apply(&active.catalog, &mut active.selection)?;
        active.rederive();
        Ok(())
    }

    pub fn select_variant(&mut self, variant_id: i64) -> Result<(), SessionError> {
        self.mutate(|catalog, selection| selection.select_variant(catalog, variant_id))
    }

    pub fn select_option(
        &mut self,
        category_name: &str,
        option_id: i64,
    ) -> Result<(), SessionError> {
        self.mutate(|catalog, selection| selection.select_option(catalog, category_name, option_id))
    }

    pub fn toggle_accessory(&mut self, accessory_id: i64) -> Result<(), SessionError> {
        self.mutate(|catalog, selection| selection.toggle_accessory(catalog, accessory_id))
    }

    pub fn set_feature_value(
        &mut self,
        feature_name: &str,
        value: &str,
    ) -> Result<(), SessionError> {
        self.mutate(|catalog, selection| selection.set_feature_value(catalog, feature_name, value))
    }

    pub fn set_custom_feature_text(
        &mut self,
        feature_name: &str,
        text: &str,
    ) -> Result<(), SessionError> {
        self.mutate(|catalog, selection| {
            selection.set_custom_feature_text(catalog, feature_name, text)
        })
    }

    // ==================== Persistence / export ====================

    /// Assemble the persistence payload for the current state
    pub fn save_request(
        &self,
        configuration_name: Option<String>,
        notes: Option<String>,
    ) -> Result<SaveConfigurationRequest, SessionError> {
        let active = self.active.as_ref().ok_or(SessionError::NoProduct)?;
        let derivation = active
            .derivation
            .as_ref()
            .ok_or(DeriveError::IncompleteSelection)?;
        Ok(export::build_save_request(
            &active.catalog,
            &active.selection,
            derivation,
            configuration_name,
            notes,
        )?)
    }

    /// Persist the current configuration
    pub async fn save(
        &self,
        configuration_name: Option<String>,
        notes: Option<String>,
    ) -> Result<(), SessionError> {
        let request = self.save_request(configuration_name, notes)?;
        self.api.save_configuration(&request).await?;
        tracing::info!(session = %self.session_id, part_code = %request.final_part_code, "configuration saved");
        Ok(())
    }

    /// Assemble the resolved datasheet payload for the current state
    pub fn datasheet_request(&self) -> Result<DatasheetRequest, SessionError> {
        let active = self.active.as_ref().ok_or(SessionError::NoProduct)?;
        let derivation = active
            .derivation
            .as_ref()
            .ok_or(DeriveError::IncompleteSelection)?;
        Ok(export::build_datasheet_request(
            &active.catalog,
            &active.selection,
            derivation,
        )?)
    }

    /// Request a rendered datasheet for the current configuration
    pub async fn export_datasheet(&self) -> Result<Vec<u8>, SessionError> {
        let request = self.datasheet_request()?;
        let document = self.api.generate_datasheet(&request).await?;
        Ok(document)
    }
}
