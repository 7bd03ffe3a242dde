//! HTTP gateway to the Cloud Controller and the UAA.
//!
//! Every repository goes through [`CloudControllerGateway`], which adds the
//! session's bearer token, follows pagination, and turns error bodies into
//! [`CfError::Http`].

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::ConfigRepository;
use crate::error::{CfError, Result};
use crate::models::{ApiInfo, Model, PaginatedResources, TokenGrant};
use crate::requirements::RequirementError;

const USER_AGENT: &str = concat!("cf/", env!("CARGO_PKG_VERSION"));
const PRIVATE_DATA: &str = "[PRIVATE DATA HIDDEN]";

/// Error body of the Cloud Controller (`code`, `description`) or of the
/// UAA (`error`, `error_description`).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    code: Option<Value>,
    description: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl ErrorBody {
    fn into_error(self, status: u16, raw: &str) -> CfError {
        let code = match self.code {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s,
            _ => self.error.unwrap_or_default(),
        };
        let description = self
            .description
            .or(self.error_description)
            .unwrap_or_else(|| raw.trim().to_string());

        CfError::Http {
            status,
            code,
            description,
        }
    }
}

/// Gateway for JSON requests against the targeted API.
pub struct CloudControllerGateway {
    config: Rc<RefCell<ConfigRepository>>,
    timeout: Duration,
}

impl CloudControllerGateway {
    /// Create a gateway reading endpoint and token from `config`.
    pub fn new(config: Rc<RefCell<ConfigRepository>>, timeout: Duration) -> Self {
        Self { config, timeout }
    }

    /// Build a client honouring the session's SSL setting.
    fn client(&self) -> Result<Client> {
        let ssl_disabled = self.config.borrow().is_ssl_disabled();
        Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .danger_accept_invalid_certs(ssl_disabled)
            .build()
            .map_err(CfError::from)
    }

    fn api_url(&self, path: &str) -> Result<String> {
        let config = self.config.borrow();
        if !config.has_api_endpoint() {
            return Err(RequirementError::NoApiEndpoint.into());
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(path.to_string());
        }
        Ok(format!("{}{}", config.api_endpoint(), path))
    }

    fn authorized(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let token = self.config.borrow().access_token().to_string();
        let mut request = self
            .client()?
            .request(method, url)
            .header(ACCEPT, "application/json");
        if !token.is_empty() {
            request = request.header(AUTHORIZATION, token);
        }
        Ok(request)
    }

    /// Send a request and return the response body.
    ///
    /// `body_log` is what gets traced in place of the real body.
    fn perform(&self, request: RequestBuilder, body_log: &str) -> Result<String> {
        let (client, request) = request.build_split();
        let request = request?;

        tracing::debug!(
            "REQUEST: {} {}\nAuthorization: {}\n{}",
            request.method(),
            request.url(),
            PRIVATE_DATA,
            body_log
        );

        let url = request.url().to_string();
        let response = client.execute(request)?;
        let status = response.status();
        let text = response.text()?;

        tracing::debug!("RESPONSE: {} {}\n{}", status.as_u16(), url, text);

        if !status.is_success() {
            let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
            return Err(body.into_error(status.as_u16(), &text));
        }

        Ok(text)
    }

    fn send_json(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<String> {
        let url = self.api_url(path)?;
        let mut request = self.authorized(method, &url)?;
        if !query.is_empty() {
            request = request.query(query);
        }
        let body_log = match body {
            Some(body) => {
                request = request.json(body);
                body.to_string()
            }
            None => String::new(),
        };
        self.perform(request, &body_log)
    }

    /// Fetch `/v2/info` from an endpoint that is not targeted yet.
    pub fn get_info(&self, endpoint: &str) -> Result<ApiInfo> {
        let url = format!("{}/v2/info", endpoint.trim_end_matches('/'));
        let request = self
            .client()?
            .get(&url)
            .header(ACCEPT, "application/json");
        let text = self.perform(request, "")?;
        Ok(serde_json::from_str(&text)?)
    }

    /// GET one JSON document.
    pub fn get_resource<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let text = self.send_json(Method::GET, path, &[], None)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// GET every page of a list and unwrap the resources.
    pub fn list_all_resources<T: Model>(&self, path: &str) -> Result<Vec<T>> {
        self.list_resources_matching(path, &[])
    }

    /// Like [`list_all_resources`](Self::list_all_resources), with `query`
    /// added to the first page. Later pages come from `next_url`, which
    /// already carries the filter.
    pub fn list_resources_matching<T: Model>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let text = self.send_json(Method::GET, path, query, None)?;
        let mut page: PaginatedResources<T> = serde_json::from_str(&text)?;
        let mut models = Vec::new();

        loop {
            models.extend(page.resources.into_iter().map(|r| r.into_model()));
            match page.next_url.filter(|url| !url.is_empty()) {
                Some(next) => page = self.get_resource(&next)?,
                None => break,
            }
        }

        Ok(models)
    }

    /// POST a JSON body.
    pub fn create_resource<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let body = serde_json::to_value(body)?;
        self.send_json(Method::POST, path, &[], Some(&body)).map(drop)
    }

    /// PUT a JSON body.
    pub fn update_resource<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let body = serde_json::to_value(body)?;
        self.send_json(Method::PUT, path, &[], Some(&body)).map(drop)
    }

    /// PUT without a body, as used for associations.
    pub fn associate(&self, path: &str) -> Result<()> {
        self.send_json(Method::PUT, path, &[], None).map(drop)
    }

    /// DELETE a resource.
    pub fn delete_resource(&self, path: &str) -> Result<()> {
        self.send_json(Method::DELETE, path, &[], None).map(drop)
    }

    /// Ask the UAA for a token with the password grant.
    pub fn request_token(&self, username: &str, password: &str) -> Result<TokenGrant> {
        let endpoint = self.config.borrow().authorization_endpoint().to_string();
        if endpoint.is_empty() {
            return Err(RequirementError::NoApiEndpoint.into());
        }
        let url = format!("{}/oauth/token", endpoint.trim_end_matches('/'));
        let request = self
            .client()?
            .post(&url)
            .basic_auth("cf", Some(""))
            .header(ACCEPT, "application/json")
            .form(&[
                ("grant_type", "password"),
                ("scope", ""),
                ("username", username),
                ("password", password),
            ]);
        let text = self.perform(request, PRIVATE_DATA)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Organization;
    use httpmock::prelude::*;
    use serde_json::json;

    fn gateway_for(server: &MockServer) -> CloudControllerGateway {
        let mut config = ConfigRepository::in_memory();
        config.set_api_endpoint(&server.base_url());
        config.set_authorization_endpoint(&server.url("/uaa"));
        config.set_access_token("bearer my-token");
        CloudControllerGateway::new(Rc::new(RefCell::new(config)), Duration::from_secs(10))
    }

    #[test]
    fn filters_are_query_encoded_on_the_first_page() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.method(GET)
                .path("/v2/quota_definitions")
                .query_param("q", "name:my quota&co");
            then.status(200).json_body(json!({
                "next_url": "/v2/quota_definitions?page=2",
                "resources": [{"metadata": {"guid": "q-1"}, "entity": {"name": "my quota&co"}}]
            }));
        });
        let second = server.mock(|when, then| {
            when.method(GET)
                .path("/v2/quota_definitions")
                .query_param("page", "2");
            then.status(200).json_body(json!({"next_url": null, "resources": []}));
        });

        let gateway = gateway_for(&server);
        let quotas: Vec<crate::models::QuotaFields> = gateway
            .list_resources_matching("/v2/quota_definitions", &[("q", "name:my quota&co")])
            .unwrap();

        first.assert_calls(1);
        second.assert_calls(1);
        assert_eq!(quotas.len(), 1);
        assert_eq!(quotas[0].name, "my quota&co");
    }

    #[test]
    fn requests_carry_the_session_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v2/organizations/org-guid")
                .header("authorization", "bearer my-token");
            then.status(200).json_body(json!({"name": "my-org"}));
        });

        let gateway = gateway_for(&server);
        let org: serde_json::Value = gateway.get_resource("/v2/organizations/org-guid").unwrap();

        mock.assert_calls(1);
        assert_eq!(org["name"], "my-org");
    }

    #[test]
    fn list_follows_next_url() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v2/organizations").query_param("page", "1");
            then.status(200).json_body(json!({
                "next_url": "/v2/organizations?page=2",
                "resources": [{"metadata": {"guid": "org-1"}, "entity": {"name": "one"}}]
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/v2/organizations").query_param("page", "2");
            then.status(200).json_body(json!({
                "next_url": null,
                "resources": [{"metadata": {"guid": "org-2"}, "entity": {"name": "two"}}]
            }));
        });

        let gateway = gateway_for(&server);
        let orgs: Vec<Organization> = gateway
            .list_all_resources("/v2/organizations?page=1")
            .unwrap();

        let names: Vec<_> = orgs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["one", "two"]);
        assert_eq!(orgs[1].guid, "org-2");
    }

    #[test]
    fn cloud_controller_errors_keep_their_code() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v2/quota_definitions");
            then.status(400).json_body(json!({
                "code": 240002,
                "description": "Quota Definition is taken: my-quota",
                "error_code": "CF-QuotaDefinitionNameTaken"
            }));
        });

        let gateway = gateway_for(&server);
        let err = gateway
            .create_resource("/v2/quota_definitions", &json!({"name": "my-quota"}))
            .unwrap_err();

        match err {
            CfError::Http {
                status,
                code,
                description,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code, "240002");
                assert!(description.contains("my-quota"));
            }
            other => panic!("Expected HTTP error, got {:?}", other),
        }
    }

    #[test]
    fn non_json_error_body_becomes_description() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/v2/quota_definitions/q");
            then.status(500).body("Internal Server Error");
        });

        let gateway = gateway_for(&server);
        let err = gateway.delete_resource("/v2/quota_definitions/q").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("500"), "Error should mention 500: {}", msg);
        assert!(msg.contains("Internal Server Error"));
    }

    #[test]
    fn no_endpoint_is_a_requirement_error() {
        let gateway = CloudControllerGateway::new(
            Rc::new(RefCell::new(ConfigRepository::in_memory())),
            Duration::from_secs(1),
        );
        let err = gateway.associate("/v2/anything").unwrap_err();
        assert!(matches!(
            err,
            CfError::Requirement(RequirementError::NoApiEndpoint)
        ));
    }

    #[test]
    fn get_info_needs_no_token() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v2/info");
            then.status(200).json_body(json!({
                "api_version": "2.54.0",
                "authorization_endpoint": "https://login.example.com"
            }));
        });

        let gateway = CloudControllerGateway::new(
            Rc::new(RefCell::new(ConfigRepository::in_memory())),
            Duration::from_secs(10),
        );
        let info = gateway.get_info(&server.base_url()).unwrap();
        assert_eq!(info.api_version, "2.54.0");
        assert_eq!(info.authorization_endpoint, "https://login.example.com");
    }

    #[test]
    fn token_request_uses_password_grant() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/uaa/oauth/token")
                .header("content-type", "application/x-www-form-urlencoded")
                .form_urlencoded_tuple("grant_type", "password")
                .form_urlencoded_tuple("username", "admin")
                .form_urlencoded_tuple("password", "s3cret&pw=1");
            then.status(200).json_body(json!({
                "access_token": "abc",
                "refresh_token": "def",
                "token_type": "bearer"
            }));
        });

        let gateway = gateway_for(&server);
        let grant = gateway.request_token("admin", "s3cret&pw=1").unwrap();

        mock.assert_calls(1);
        assert_eq!(grant.authorization(), "bearer abc");
        assert_eq!(grant.refresh_token, "def");
    }

    #[test]
    fn uaa_errors_use_error_description() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/uaa/oauth/token");
            then.status(401).json_body(json!({
                "error": "unauthorized",
                "error_description": "Bad credentials"
            }));
        });

        let gateway = gateway_for(&server);
        let err = gateway.request_token("admin", "wrong").unwrap_err();
        assert_eq!(err.error_code(), Some("unauthorized"));
        assert!(err.to_string().contains("Bad credentials"));
    }
}
