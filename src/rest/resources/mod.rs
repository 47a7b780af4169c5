//! Typed helpers for organizations, users and servers.
//!
//! `get_*` methods return `Ok(None)` when the server answers 404. A 401 is
//! reported as [`PritunlError::Unauthorized`].

mod types;

pub use types::*;

use crate::error::PritunlError;
use crate::rest::PritunlClient;
use crate::rest::endpoints;
use crate::rest::request::Request;

impl PritunlClient {
    // ========== Organizations ==========

    /// List all organizations.
    pub async fn list_organizations(&self) -> Result<Vec<Organization>, PritunlError> {
        self.fetch_required(Request::get(endpoints::ORGANIZATIONS))
            .await
    }

    /// Get an organization by ID.
    pub async fn get_organization(&self, id: &str) -> Result<Option<Organization>, PritunlError> {
        self.fetch(Request::get(endpoints::organization(id))).await
    }

    /// Create an organization.
    pub async fn create_organization(
        &self,
        request: &OrganizationRequest,
    ) -> Result<Organization, PritunlError> {
        self.fetch_required(Request::post(endpoints::ORGANIZATIONS).json(request))
            .await
    }

    /// Rename an organization.
    pub async fn update_organization(
        &self,
        id: &str,
        request: &OrganizationRequest,
    ) -> Result<Organization, PritunlError> {
        self.fetch_required(Request::put(endpoints::organization(id)).json(request))
            .await
    }

    /// Delete an organization. Returns `false` if it did not exist.
    pub async fn delete_organization(&self, id: &str) -> Result<bool, PritunlError> {
        let response = self
            .execute_unit(Request::delete(endpoints::organization(id)))
            .await?;
        Ok(!response.is_not_found())
    }

    // ========== Users ==========

    /// List the users of an organization.
    pub async fn list_users(&self, organization_id: &str) -> Result<Vec<User>, PritunlError> {
        self.fetch_required(Request::get(endpoints::users(organization_id)))
            .await
    }

    /// Get a user by organization and user ID.
    pub async fn get_user(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> Result<Option<User>, PritunlError> {
        self.fetch(Request::get(endpoints::user(organization_id, user_id)))
            .await
    }

    /// Create a user in an organization.
    pub async fn create_user(
        &self,
        organization_id: &str,
        request: &UserRequest,
    ) -> Result<User, PritunlError> {
        let created: OneOrMany<User> = self
            .fetch_required(Request::post(endpoints::users(organization_id)).json(request))
            .await?;
        created.into_first().ok_or_else(|| {
            PritunlError::Parse(serde::de::Error::custom(
                "server returned an empty user list for create",
            ))
        })
    }

    /// Update a user.
    pub async fn update_user(
        &self,
        organization_id: &str,
        user_id: &str,
        request: &UserRequest,
    ) -> Result<User, PritunlError> {
        self.fetch_required(Request::put(endpoints::user(organization_id, user_id)).json(request))
            .await
    }

    /// Delete a user. Returns `false` if it did not exist.
    pub async fn delete_user(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> Result<bool, PritunlError> {
        let response = self
            .execute_unit(Request::delete(endpoints::user(organization_id, user_id)))
            .await?;
        Ok(!response.is_not_found())
    }

    // ========== Servers ==========

    /// List all servers.
    pub async fn list_servers(&self) -> Result<Vec<Server>, PritunlError> {
        self.fetch_required(Request::get(endpoints::SERVERS)).await
    }

    /// Get a server by ID.
    pub async fn get_server(&self, id: &str) -> Result<Option<Server>, PritunlError> {
        self.fetch(Request::get(endpoints::server(id))).await
    }

    /// Create a server.
    pub async fn create_server(&self, request: &ServerRequest) -> Result<Server, PritunlError> {
        self.fetch_required(Request::post(endpoints::SERVERS).json(request))
            .await
    }

    /// Update a server. Pritunl only accepts this while the server is offline.
    pub async fn update_server(
        &self,
        id: &str,
        request: &ServerRequest,
    ) -> Result<Server, PritunlError> {
        self.fetch_required(Request::put(endpoints::server(id)).json(request))
            .await
    }

    /// Delete a server. Returns `false` if it did not exist.
    pub async fn delete_server(&self, id: &str) -> Result<bool, PritunlError> {
        let response = self
            .execute_unit(Request::delete(endpoints::server(id)))
            .await?;
        Ok(!response.is_not_found())
    }

    /// Attach an organization to a server.
    pub async fn attach_organization(
        &self,
        server_id: &str,
        organization_id: &str,
    ) -> Result<(), PritunlError> {
        let path = endpoints::server_organization(server_id, organization_id);
        require_found(self.execute_unit(Request::put(path)).await?)
    }

    /// Detach an organization from a server. Returns `false` if it was not attached.
    pub async fn detach_organization(
        &self,
        server_id: &str,
        organization_id: &str,
    ) -> Result<bool, PritunlError> {
        let path = endpoints::server_organization(server_id, organization_id);
        let response = self.execute_unit(Request::delete(path)).await?;
        Ok(!response.is_not_found())
    }

    /// Start a server.
    pub async fn start_server(&self, id: &str) -> Result<Server, PritunlError> {
        self.fetch_required(Request::put(endpoints::server_operation(id, "start")))
            .await
    }

    /// Stop a server.
    pub async fn stop_server(&self, id: &str) -> Result<Server, PritunlError> {
        self.fetch_required(Request::put(endpoints::server_operation(id, "stop")))
            .await
    }
}

fn require_found(response: crate::rest::Response) -> Result<(), PritunlError> {
    if response.is_not_found() {
        return Err(PritunlError::Status {
            status: response.status,
            body: response.text(),
        });
    }
    Ok(())
}
