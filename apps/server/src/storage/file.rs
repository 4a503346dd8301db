use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use healthwatch::registry::{SettingsSource, TargetRegistry};
use healthwatch::types::HealthCheckSettings;
use healthwatch::{Client, Service};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::info;

use crate::models::{ClientDraft, PortalSettings, ServiceDraft, SettingsPatch};

/// The whole portal catalog, serialized as one JSON document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PortalData {
    #[serde(default)]
    services: Vec<Service>,
    #[serde(default)]
    clients: Vec<Client>,
    #[serde(default)]
    settings: PortalSettings,
}

/// File-backed store for services, clients and settings.
///
/// The document is held in memory behind a `RwLock` and rewritten on every
/// mutation; reads never touch the filesystem. Implements the engine's
/// [`TargetRegistry`] and [`SettingsSource`] traits, so the health monitor
/// consumes the same catalog the CRUD API manages.
pub struct FileStore {
    path: PathBuf,
    data: RwLock<PortalData>,
}

impl FileStore {
    /// Open `<data_dir>/config.json`, creating it with defaults when missing.
    pub async fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;
        let path = data_dir.join("config.json");

        let data = if path.exists() {
            let raw = fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            info!("no portal config at {}, creating defaults", path.display());
            let data = PortalData::default();
            write_document(&path, &data).await?;
            data
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub async fn list_services(&self) -> Vec<Service> {
        self.data.read().await.services.clone()
    }

    pub async fn get_service(&self, id: &str) -> Option<Service> {
        self.data
            .read()
            .await
            .services
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub async fn create_service(&self, draft: ServiceDraft) -> Result<Service> {
        let mut data = self.data.write().await;
        let service = draft.into_service();
        data.services.push(service.clone());
        write_document(&self.path, &data).await?;
        Ok(service)
    }

    /// Returns `None` when no service has the given id.
    pub async fn update_service(&self, id: &str, draft: ServiceDraft) -> Result<Option<Service>> {
        let mut data = self.data.write().await;
        let Some(service) = data.services.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        draft.apply(service);
        let updated = service.clone();
        write_document(&self.path, &data).await?;
        Ok(Some(updated))
    }

    pub async fn delete_service(&self, id: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        let before = data.services.len();
        data.services.retain(|s| s.id != id);
        if data.services.len() == before {
            return Ok(false);
        }
        write_document(&self.path, &data).await?;
        Ok(true)
    }

    pub async fn list_clients(&self) -> Vec<Client> {
        self.data.read().await.clients.clone()
    }

    pub async fn get_client(&self, id: &str) -> Option<Client> {
        self.data
            .read()
            .await
            .clients
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub async fn create_client(&self, draft: ClientDraft) -> Result<Client> {
        let mut data = self.data.write().await;
        let client = draft.into_client();
        data.clients.push(client.clone());
        write_document(&self.path, &data).await?;
        Ok(client)
    }

    pub async fn update_client(&self, id: &str, draft: ClientDraft) -> Result<Option<Client>> {
        let mut data = self.data.write().await;
        let Some(client) = data.clients.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        draft.apply(client);
        let updated = client.clone();
        write_document(&self.path, &data).await?;
        Ok(Some(updated))
    }

    pub async fn delete_client(&self, id: &str) -> Result<bool> {
        let mut data = self.data.write().await;
        let before = data.clients.len();
        data.clients.retain(|c| c.id != id);
        if data.clients.len() == before {
            return Ok(false);
        }
        write_document(&self.path, &data).await?;
        Ok(true)
    }

    pub async fn portal_settings(&self) -> PortalSettings {
        self.data.read().await.settings.clone()
    }

    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<PortalSettings> {
        let mut data = self.data.write().await;
        patch.apply(&mut data.settings);
        let updated = data.settings.clone();
        write_document(&self.path, &data).await?;
        Ok(updated)
    }
}

async fn write_document(path: &Path, data: &PortalData) -> Result<()> {
    let raw = serde_json::to_string_pretty(data).context("failed to serialize portal config")?;
    fs::write(path, raw)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[async_trait]
impl TargetRegistry for FileStore {
    async fn services(&self) -> Result<Vec<Service>> {
        Ok(self.list_services().await)
    }

    async fn service(&self, id: &str) -> Result<Option<Service>> {
        Ok(self.get_service(id).await)
    }

    async fn clients(&self) -> Result<Vec<Client>> {
        Ok(self.list_clients().await)
    }

    async fn client(&self, id: &str) -> Result<Option<Client>> {
        Ok(self.get_client(id).await)
    }

    async fn update_service_last_seen(&self, id: &str, seen: DateTime<Utc>) -> Result<()> {
        let mut data = self.data.write().await;
        let Some(service) = data.services.iter_mut().find(|s| s.id == id) else {
            anyhow::bail!("service {id} not found");
        };
        service.last_seen = Some(seen);
        write_document(&self.path, &data).await
    }

    async fn update_client_last_seen(&self, id: &str, seen: DateTime<Utc>) -> Result<()> {
        let mut data = self.data.write().await;
        let Some(client) = data.clients.iter_mut().find(|c| c.id == id) else {
            anyhow::bail!("client {id} not found");
        };
        client.last_seen = Some(seen);
        write_document(&self.path, &data).await
    }
}

#[async_trait]
impl SettingsSource for FileStore {
    async fn health_check_settings(&self) -> Result<HealthCheckSettings> {
        Ok(self.data.read().await.settings.health_check.clone())
    }
}
