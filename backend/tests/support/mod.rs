//! Shared test harness driving the stack through the GraphQL transport.
//!
//! Each scenario gets its own [`TestContext`]: a freshly wired in-memory
//! store behind a real actix server on an ephemeral port, plus an `awc`
//! client that attaches the stored bearer token to every request. No state
//! is shared between contexts, so suites stay isolated without a global
//! reset step.

pub mod documents;

use actix_web::{App, HttpServer, web};
use serde_json::{Value, json};

use backend::Trace;
use backend::inbound::graphql::build_schema;
use backend::inbound::http::{HealthState, graphql, live, ready};
use backend::test_support::InMemoryStore;

/// A GraphQL error returned through the transport.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Human-readable message.
    pub message: String,
    /// Stable `code` extension, when present.
    pub code: Option<String>,
}

/// One fully wired application under test.
pub struct TestContext {
    /// The backing store, for direct seeding or inspection.
    pub store: InMemoryStore,
    base_url: String,
    client: awc::Client,
    token: Option<String>,
}

impl TestContext {
    /// Start a fresh application on an ephemeral port.
    ///
    /// # Panics
    /// Panics when the server cannot bind; test harness setup is not
    /// recoverable.
    pub async fn start() -> Self {
        let store = InMemoryStore::new();
        let services = store.services();
        let auth = web::Data::new(services.auth.clone());
        let schema = web::Data::new(build_schema(services));
        let health = web::Data::new(HealthState::new());

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");

        let server = HttpServer::new(move || {
            App::new()
                .wrap(Trace)
                .app_data(schema.clone())
                .app_data(auth.clone())
                .app_data(health.clone())
                .service(graphql)
                .service(live)
                .service(ready)
        })
        .listen(listener)
        .expect("listen on test port")
        .workers(1)
        .run();

        // Dies with the per-test runtime; no explicit shutdown needed.
        actix_web::rt::spawn(server);

        Self {
            store,
            base_url: format!("http://{addr}"),
            client: awc::Client::default(),
            token: None,
        }
    }

    /// Discard the stored bearer token.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Execute a GraphQL document and unwrap `data[name]`.
    ///
    /// # Panics
    /// Panics on transport-level failures (non-JSON body, connection loss);
    /// GraphQL-level errors are returned as `Err`.
    pub async fn execute(
        &self,
        name: &str,
        query: &str,
        variables: Value,
    ) -> Result<Value, GraphQLError> {
        let mut request = self.client.post(format!("{}/graphql", self.base_url));
        if let Some(token) = &self.token {
            request = request.insert_header(("authorization", format!("Bearer {token}")));
        }

        let mut response = request
            .send_json(&json!({ "query": query, "variables": variables }))
            .await
            .expect("graphql request");
        let body: Value = response.json().await.expect("graphql response is JSON");

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            let first = errors.first().expect("errors array is non-empty");
            return Err(GraphQLError {
                message: first
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned(),
                code: first
                    .pointer("/extensions/code")
                    .and_then(Value::as_str)
                    .map(ToOwned::to_owned),
            });
        }

        Ok(body
            .pointer(&format!("/data/{name}"))
            .cloned()
            .unwrap_or(Value::Null))
    }

    /// Execute a document with an explicit bearer token, ignoring the
    /// stored one. Used to probe the guard with bad credentials.
    pub async fn execute_with_raw_token(
        &self,
        name: &str,
        query: &str,
        variables: Value,
        token: &str,
    ) -> Result<Value, GraphQLError> {
        let forged = Self {
            store: self.store.clone(),
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            token: Some(token.to_owned()),
        };
        forged.execute(name, query, variables).await
    }

    /// Register an account through the transport.
    pub async fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Value, GraphQLError> {
        self.execute(
            "createUser",
            documents::CREATE_USER,
            json!({ "user": {
                "firstName": first_name,
                "lastName": last_name,
                "email": email,
                "password": password,
            }}),
        )
        .await
    }

    /// Log in and store the returned bearer token for subsequent calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<String, GraphQLError> {
        let data = self
            .execute(
                "login",
                documents::LOGIN,
                json!({ "email": email, "password": password }),
            )
            .await?;
        let token = data
            .get("accessToken")
            .and_then(Value::as_str)
            .expect("login returns accessToken")
            .to_owned();
        self.token = Some(token.clone());
        Ok(token)
    }

    /// Register, log in, and return the created user payload.
    ///
    /// Mirrors the signup workflow every authenticated scenario starts with.
    pub async fn signup_workflow(&mut self, email: &str) -> Value {
        let password = "correct horse battery staple";
        let user = self
            .create_user("Ada", "Lovelace", email, password)
            .await
            .expect("signup succeeds");
        self.login(email, password).await.expect("login succeeds");
        user
    }
}
