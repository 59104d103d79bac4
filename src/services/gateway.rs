//! Remote query gateway - the RPC surface the console consumes
//!
//! Every backend interaction is one of the `Request` variants below. The
//! `Gateway` trait executes a request synchronously; the `RequestRunner`
//! moves that call off the UI thread.

use crate::model::{CloudLocation, Device, FileObject, SearchObjectsArgs, User};

/// A query or mutation against the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `auth.me` (or the configured identity endpoint)
    CurrentUser,
    /// `cloud.locations.list`
    ListLocations,
    /// `cloud.locations.create`
    CreateLocation { name: String },
    /// `cloud.locations.remove`
    RemoveLocation { id: String },
    /// `cloud.locations.testing`
    TestLocation { id: String, path: String },
    /// `search.objects`
    SearchObjects(SearchObjectsArgs),
    /// `cloud.devices.list`
    ListDevices,
    /// `cloud.devices.get`
    GetDevice { pub_id: String },
    /// `cloud.devices.delete`
    DeleteDevice { pub_id: String },
}

impl Request {
    /// Procedure name on the wire
    pub fn procedure(&self) -> &'static str {
        match self {
            Request::CurrentUser => "auth.me",
            Request::ListLocations => "cloud.locations.list",
            Request::CreateLocation { .. } => "cloud.locations.create",
            Request::RemoveLocation { .. } => "cloud.locations.remove",
            Request::TestLocation { .. } => "cloud.locations.testing",
            Request::SearchObjects(_) => "search.objects",
            Request::ListDevices => "cloud.devices.list",
            Request::GetDevice { .. } => "cloud.devices.get",
            Request::DeleteDevice { .. } => "cloud.devices.delete",
        }
    }

    /// Whether the request changes remote state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Request::CreateLocation { .. }
                | Request::RemoveLocation { .. }
                | Request::TestLocation { .. }
                | Request::DeleteDevice { .. }
        )
    }
}

/// Typed result of a successful request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    CurrentUser(Option<User>),
    Locations(Vec<CloudLocation>),
    LocationCreated(CloudLocation),
    LocationRemoved,
    LocationTested,
    Objects(Vec<FileObject>),
    Devices(Vec<Device>),
    Device(Device),
    DeviceDeleted,
}

impl Response {
    fn mismatch(self, expected: &str) -> GatewayError {
        GatewayError::Decode(format!("expected {}, got {:?}", expected, self))
    }

    pub fn into_current_user(self) -> Result<Option<User>, GatewayError> {
        match self {
            Response::CurrentUser(user) => Ok(user),
            other => Err(other.mismatch("current user")),
        }
    }

    pub fn into_locations(self) -> Result<Vec<CloudLocation>, GatewayError> {
        match self {
            Response::Locations(list) => Ok(list),
            other => Err(other.mismatch("location list")),
        }
    }

    pub fn into_created_location(self) -> Result<CloudLocation, GatewayError> {
        match self {
            Response::LocationCreated(location) => Ok(location),
            other => Err(other.mismatch("created location")),
        }
    }

    /// Mutations that answer with nothing
    pub fn into_unit(self) -> Result<(), GatewayError> {
        match self {
            Response::LocationRemoved | Response::LocationTested | Response::DeviceDeleted => {
                Ok(())
            }
            other => Err(other.mismatch("empty response")),
        }
    }

    pub fn into_objects(self) -> Result<Vec<FileObject>, GatewayError> {
        match self {
            Response::Objects(objects) => Ok(objects),
            other => Err(other.mismatch("object list")),
        }
    }

    pub fn into_devices(self) -> Result<Vec<Device>, GatewayError> {
        match self {
            Response::Devices(devices) => Ok(devices),
            other => Err(other.mismatch("device list")),
        }
    }

    pub fn into_device(self) -> Result<Device, GatewayError> {
        match self {
            Response::Device(device) => Ok(device),
            other => Err(other.mismatch("device")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{message}")]
    Remote { code: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("unauthorised")]
    Unauthorised,
}

impl GatewayError {
    /// Text shown to the user; remote errors carry the backend message verbatim
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Executes requests against a backend
pub trait Gateway: Send + Sync {
    fn execute(&self, request: &Request) -> Result<Response, GatewayError>;
}
