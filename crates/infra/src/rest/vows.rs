//! Vow gateway over the document store

use async_trait::async_trait;
use onewun_core::vows::ports::VowGateway;
use onewun_domain::{Result, UserScope, Vow, VowFields};

use super::client::DocumentStoreClient;

const COLLECTION: &str = "vows";

/// Remote CRUD for the `vows/<userId>` keyspace.
#[derive(Clone)]
pub struct VowsClient {
    docs: DocumentStoreClient,
}

impl VowsClient {
    pub fn new(docs: DocumentStoreClient) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl VowGateway for VowsClient {
    async fn create(&self, scope: &UserScope, fields: &VowFields) -> Result<String> {
        self.docs.create(&[COLLECTION, &scope.user_id], &scope.token, fields).await
    }

    async fn fetch_all(&self, scope: &UserScope) -> Result<Vec<Vow>> {
        let records: Vec<(String, VowFields)> =
            self.docs.fetch_all(&[COLLECTION, &scope.user_id], &scope.token).await?;
        Ok(records.into_iter().map(|(id, fields)| Vow::from_fields(id, fields)).collect())
    }

    async fn update(&self, scope: &UserScope, id: &str, fields: &VowFields) -> Result<()> {
        self.docs.put(&[COLLECTION, &scope.user_id, id], &scope.token, fields).await
    }

    async fn delete(&self, scope: &UserScope, id: &str) -> Result<()> {
        self.docs.delete(&[COLLECTION, &scope.user_id, id], &scope.token).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use onewun_domain::{BackendConfig, HttpConfig, VowKind};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn wire_payload_uses_the_type_and_start_date_keys() {
        let fields = VowFields {
            title: "Run a marathon".to_string(),
            description: "Train up to 26.2".to_string(),
            kind: VowKind::Major,
            date: Utc.with_ymd_and_hms(2026, 11, 5, 0, 0, 0).unwrap(),
            start_date: Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["type"], "major");
        assert!(value.get("startDate").is_some());
        assert!(value.get("start_date").is_none());
    }

    #[tokio::test]
    async fn create_posts_to_the_scoped_collection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/vows/u1.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "-Nvow"})))
            .mount(&server)
            .await;

        let backend = BackendConfig { base_url: server.uri() };
        let client =
            VowsClient::new(DocumentStoreClient::new(&backend, &HttpConfig::default()).unwrap());

        let fields = VowFields {
            title: "Run a marathon".to_string(),
            description: "Train up to 26.2".to_string(),
            kind: VowKind::Major,
            date: Utc.with_ymd_and_hms(2026, 11, 5, 0, 0, 0).unwrap(),
            start_date: Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap(),
        };
        let id = client.create(&UserScope::new("u1", "t1"), &fields).await.unwrap();
        assert_eq!(id, "-Nvow");
    }

    #[tokio::test]
    async fn fetch_all_round_trips_the_kind_enum() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vows/u1.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "-Na": {
                    "title": "Stretch daily",
                    "description": "Ten minutes",
                    "type": "minor",
                    "date": "2026-09-01T00:00:00Z",
                    "startDate": "2026-08-01T00:00:00Z"
                }
            })))
            .mount(&server)
            .await;

        let backend = BackendConfig { base_url: server.uri() };
        let client =
            VowsClient::new(DocumentStoreClient::new(&backend, &HttpConfig::default()).unwrap());

        let vows = client.fetch_all(&UserScope::new("u1", "t1")).await.unwrap();
        assert_eq!(vows.len(), 1);
        assert_eq!(vows[0].kind, VowKind::Minor);
        assert_eq!(vows[0].title, "Stretch daily");
    }
}
