//! Platform environment variable groups
//! (`/v2/config/environment_variable_groups/{running,staging}`).

use serde_json::{Map, Value};
use std::rc::Rc;

use crate::error::Result;
use crate::models::EnvironmentVariable;

use super::{CloudControllerGateway, Lifecycle};

pub trait EnvironmentVariableGroupsRepository {
    /// Variables of the group, sorted by name.
    fn list(&self, lifecycle: Lifecycle) -> Result<Vec<EnvironmentVariable>>;

    /// Replace the whole group.
    fn set(&self, lifecycle: Lifecycle, variables: &Map<String, Value>) -> Result<()>;
}

pub struct CloudControllerEnvironmentVariableGroupsRepository {
    gateway: Rc<CloudControllerGateway>,
}

impl CloudControllerEnvironmentVariableGroupsRepository {
    pub fn new(gateway: Rc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }

    fn path(lifecycle: Lifecycle) -> String {
        format!("/v2/config/environment_variable_groups/{}", lifecycle)
    }
}

/// Strings print bare; anything else prints as JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl EnvironmentVariableGroupsRepository for CloudControllerEnvironmentVariableGroupsRepository {
    fn list(&self, lifecycle: Lifecycle) -> Result<Vec<EnvironmentVariable>> {
        let group: Map<String, Value> = self.gateway.get_resource(&Self::path(lifecycle))?;
        let mut variables: Vec<EnvironmentVariable> = group
            .iter()
            .map(|(name, value)| EnvironmentVariable {
                name: name.clone(),
                value: display_value(value),
            })
            .collect();
        variables.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(variables)
    }

    fn set(&self, lifecycle: Lifecycle, variables: &Map<String, Value>) -> Result<()> {
        self.gateway
            .update_resource(&Self::path(lifecycle), variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::gateway_for;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn list_sorts_and_stringifies() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/v2/config/environment_variable_groups/running");
            then.status(200)
                .json_body(json!({"b_var": 42, "a_var": "hello"}));
        });

        let repo = CloudControllerEnvironmentVariableGroupsRepository::new(gateway_for(&server));
        let vars = repo.list(Lifecycle::Running).unwrap();

        assert_eq!(
            vars,
            vec![
                EnvironmentVariable {
                    name: "a_var".into(),
                    value: "hello".into()
                },
                EnvironmentVariable {
                    name: "b_var".into(),
                    value: "42".into()
                },
            ]
        );
    }

    #[test]
    fn set_puts_the_whole_group() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/v2/config/environment_variable_groups/staging")
                .json_body(json!({"name": "value"}));
            then.status(200).json_body(json!({"name": "value"}));
        });

        let repo = CloudControllerEnvironmentVariableGroupsRepository::new(gateway_for(&server));
        let vars = json!({"name": "value"}).as_object().cloned().unwrap();
        repo.set(Lifecycle::Staging, &vars).unwrap();

        mock.assert_calls(1);
    }
}
