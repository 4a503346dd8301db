use chrono::Utc;
use healthwatch::{Client, HealthCheckConfig, HealthCheckSettings, Service};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Portal-wide settings as stored and served by the config API. The engine
/// only consumes the `health_check` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortalSettings {
    pub title: String,
    pub theme: String,
    pub layout: String,
    pub health_check: HealthCheckSettings,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            title: "Purtal".to_string(),
            theme: "default".to_string(),
            layout: "grid".to_string(),
            health_check: HealthCheckSettings::default(),
        }
    }
}

/// Partial settings update; absent fields keep their stored value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub title: Option<String>,
    pub theme: Option<String>,
    pub layout: Option<String>,
    pub health_check: Option<HealthCheckSettings>,
}

impl SettingsPatch {
    pub fn apply(self, settings: &mut PortalSettings) {
        if let Some(title) = self.title {
            settings.title = title;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(layout) = self.layout {
            settings.layout = layout;
        }
        if let Some(health_check) = self.health_check {
            settings.health_check = health_check;
        }
    }
}

/// User-editable service fields, as submitted by the admin UI.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub custom_icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub health_check: Option<HealthCheckConfig>,
}

impl ServiceDraft {
    pub fn into_service(self) -> Service {
        let now = Utc::now();
        Service {
            id: format!("service-{}", Uuid::new_v4()),
            name: self.name,
            url: self.url,
            description: self.description,
            icon: self.icon,
            custom_icon: self.custom_icon,
            category: self.category,
            tags: self.tags,
            health_check: self.health_check,
            last_seen: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields of an existing service; identity,
    /// creation time and the durable last-seen timestamp are preserved.
    pub fn apply(self, service: &mut Service) {
        service.name = self.name;
        service.url = self.url;
        service.description = self.description;
        service.icon = self.icon;
        service.custom_icon = self.custom_icon;
        service.category = self.category;
        service.tags = self.tags;
        service.health_check = self.health_check;
        service.updated_at = Utc::now();
    }
}

/// User-editable client fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub client_type: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub wol_address: Option<String>,
    #[serde(default)]
    pub wol_port: Option<u16>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub custom_icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ClientDraft {
    pub fn into_client(self) -> Client {
        let now = Utc::now();
        Client {
            id: format!("client-{}", Uuid::new_v4()),
            name: self.name,
            client_type: self.client_type,
            ip_address: self.ip_address,
            mac_address: self.mac_address,
            wol_address: self.wol_address,
            wol_port: self.wol_port,
            description: self.description,
            icon: self.icon,
            custom_icon: self.custom_icon,
            category: self.category,
            tags: self.tags,
            last_seen: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(self, client: &mut Client) {
        client.name = self.name;
        client.client_type = self.client_type;
        client.ip_address = self.ip_address;
        client.mac_address = self.mac_address;
        client.wol_address = self.wol_address;
        client.wol_port = self.wol_port;
        client.description = self.description;
        client.icon = self.icon;
        client.custom_icon = self.custom_icon;
        client.category = self.category;
        client.tags = self.tags;
        client.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_patch_merges_shallowly() {
        let mut settings = PortalSettings::default();
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"theme": "dark", "healthCheck": {"serviceFrequency": 10}}"#)
                .unwrap();
        patch.apply(&mut settings);

        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.title, "Purtal");
        assert_eq!(settings.health_check.service_frequency, 10);
        // The nested object is replaced wholesale; its own absent fields
        // come back as defaults.
        assert_eq!(settings.health_check.service_timeout, 5000);
    }

    #[test]
    fn draft_update_preserves_identity_and_last_seen() {
        let draft: ServiceDraft =
            serde_json::from_str(r#"{"name": "Files", "url": "http://nas.lan"}"#).unwrap();
        let mut service = draft.into_service();
        let id = service.id.clone();
        let created_at = service.created_at;
        service.last_seen = Some(Utc::now());
        let seen = service.last_seen;

        let update: ServiceDraft =
            serde_json::from_str(r#"{"name": "Files v2", "url": "http://nas.lan:8080"}"#).unwrap();
        update.apply(&mut service);

        assert_eq!(service.name, "Files v2");
        assert_eq!(service.id, id);
        assert_eq!(service.created_at, created_at);
        assert_eq!(service.last_seen, seen);
    }

    #[test]
    fn generated_ids_carry_the_kind_prefix() {
        let draft: ClientDraft =
            serde_json::from_str(r#"{"name": "Desk", "type": "health-check"}"#).unwrap();
        let client = draft.into_client();
        assert!(client.id.starts_with("client-"));
    }
}
