//! Expense gateway over the document store

use async_trait::async_trait;
use onewun_core::expenses::ports::ExpenseGateway;
use onewun_domain::{Expense, ExpenseFields, Result, UserScope};

use super::client::DocumentStoreClient;

const COLLECTION: &str = "expenses";

/// Remote CRUD for the `expenses/<userId>` keyspace.
#[derive(Clone)]
pub struct ExpensesClient {
    docs: DocumentStoreClient,
}

impl ExpensesClient {
    pub fn new(docs: DocumentStoreClient) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl ExpenseGateway for ExpensesClient {
    async fn create(&self, scope: &UserScope, fields: &ExpenseFields) -> Result<String> {
        self.docs.create(&[COLLECTION, &scope.user_id], &scope.token, fields).await
    }

    async fn fetch_all(&self, scope: &UserScope) -> Result<Vec<Expense>> {
        let records: Vec<(String, ExpenseFields)> =
            self.docs.fetch_all(&[COLLECTION, &scope.user_id], &scope.token).await?;
        Ok(records.into_iter().map(|(id, fields)| Expense::from_fields(id, fields)).collect())
    }

    async fn update(&self, scope: &UserScope, id: &str, fields: &ExpenseFields) -> Result<()> {
        self.docs.put(&[COLLECTION, &scope.user_id, id], &scope.token, fields).await
    }

    async fn delete(&self, scope: &UserScope, id: &str) -> Result<()> {
        self.docs.delete(&[COLLECTION, &scope.user_id, id], &scope.token).await
    }
}

#[cfg(test)]
mod tests {
    use onewun_domain::{BackendConfig, HttpConfig};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn scope() -> UserScope {
        UserScope::new("u1", "t1")
    }

    fn client_for(server: &MockServer) -> ExpensesClient {
        let backend = BackendConfig { base_url: server.uri() };
        ExpensesClient::new(DocumentStoreClient::new(&backend, &HttpConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn fetch_all_reconstructs_records_and_parses_dates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/expenses/u1.json"))
            .and(query_param("auth", "t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "-Na": {
                    "rating": 7.5,
                    "date": "2026-08-01T09:30:00Z",
                    "description": "morning run"
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let expenses = client.fetch_all(&scope()).await.unwrap();

        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, "-Na");
        assert_eq!(expenses[0].rating, 7.5);
        assert_eq!(expenses[0].date.to_rfc3339(), "2026-08-01T09:30:00+00:00");
        assert!(expenses[0].workouts.is_empty());
    }

    #[tokio::test]
    async fn update_puts_to_the_scoped_record_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/expenses/u1/-Na.json"))
            .and(query_param("auth", "t1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let fields = ExpenseFields {
            rating: 3.0,
            date: chrono::Utc::now(),
            description: "easy spin".to_string(),
        };
        let client = client_for(&server);
        client.update(&scope(), "-Na", &fields).await.unwrap();
    }
}
