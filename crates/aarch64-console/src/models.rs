//! Console API models: response envelopes, entities and request payloads.
//!
//! Decoding is lenient about absent fields: a missing or `null` value decodes to its
//! zero value. Malformed JSON and wrongly
//! typed fields are still rejected.

use aarch64_core::ids::{ProjectId, VmId};
use aarch64_core::Error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Status block included in every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiMeta {
    /// Whether the server considers the operation successful.
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    /// Human-readable status message.
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

/// Response envelope: a payload plus [`ApiMeta`].
///
/// The client never looks at `meta`; a logically failed operation comes back as an
/// `Ok` envelope with `success: false`. Use [`Envelope::into_result`] to opt into
/// treating that as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Envelope<T> {
    /// Endpoint-specific payload.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: T,
    /// Status block.
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: ApiMeta,
}

/// Envelope with an untyped payload, returned by most endpoints.
pub type ApiResponse = Envelope<Value>;

/// Envelope returned by the project listing.
pub type ProjectsResponse = Envelope<Vec<Project>>;

impl<T> Envelope<T> {
    /// Returns the server-reported success flag.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.meta.success
    }

    /// Returns the server-reported message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.meta.message
    }

    /// Yield the payload, or [`Error::Api`] when the server reported failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] carrying `meta.message` if `meta.success` is false.
    pub fn into_result(self) -> aarch64_core::Result<T> {
        if self.meta.success {
            Ok(self.data)
        } else {
            Err(Error::Api(self.meta.message))
        }
    }
}

impl Envelope<Value> {
    /// Decode the untyped payload into a concrete type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialization`] if the payload does not match `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> aarch64_core::Result<T> {
        T::deserialize(&self.data).map_err(|err| Error::Deserialization(err.to_string()))
    }
}

impl Envelope<Vec<Project>> {
    /// The listed projects.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.data
    }
}

/// A project groups users and the VMs they share.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Project identifier.
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: ProjectId,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Identifiers of users with access to the project.
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<String>,
    /// VMs owned by the project.
    #[serde(deserialize_with = "null_as_default")]
    pub vms: Vec<Vm>,
}

impl Project {
    /// Find one of the project's VMs by id.
    #[must_use]
    pub fn vm(&self, id: &VmId) -> Option<&Vm> {
        self.vms.iter().find(|vm| vm.id == *id)
    }
}

/// A virtual machine as reported by the console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vm {
    /// VM identifier.
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: VmId,
    /// Owning project.
    #[serde(deserialize_with = "null_as_default")]
    pub project: ProjectId,
    /// Point of presence the VM is placed in.
    #[serde(deserialize_with = "null_as_default")]
    pub pop: String,
    /// Host number within the PoP.
    #[serde(deserialize_with = "null_as_default")]
    pub host: u64,
    /// VM index on the host.
    #[serde(deserialize_with = "null_as_default")]
    pub index: u64,
    /// Hostname.
    #[serde(deserialize_with = "null_as_default")]
    pub hostname: String,
    /// Virtual CPU count.
    #[serde(deserialize_with = "null_as_default")]
    pub vcpus: u64,
    /// Memory size.
    #[serde(deserialize_with = "null_as_default")]
    pub memory: u64,
    /// Disk size.
    #[serde(deserialize_with = "null_as_default")]
    pub disk: u64,
    /// OS image name.
    #[serde(deserialize_with = "null_as_default")]
    pub os: String,
    /// Network prefix.
    #[serde(deserialize_with = "null_as_default")]
    pub prefix: String,
    /// Default gateway.
    #[serde(deserialize_with = "null_as_default")]
    pub gateway: String,
    /// Assigned address.
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    /// Initial root password.
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
    /// Whether the VM has called back after first boot.
    #[serde(deserialize_with = "null_as_default")]
    pub phoned_home: bool,
}

/// Payload for `POST /project`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name.
    pub name: String,
}

/// Payload for `POST /vms/adduser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddUserRequest {
    /// Project to add the user to.
    pub project: ProjectId,
    /// Email address of the user.
    pub email: String,
}

/// Payload for `POST /vms/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVmRequest {
    /// Hostname for the new VM.
    pub hostname: String,
    /// Point of presence to place the VM in.
    pub pop: String,
    /// Project that will own the VM.
    pub project: ProjectId,
    /// Sizing plan.
    pub plan: String,
    /// OS image.
    pub os: String,
}

/// Payload for `DELETE /vms/delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteVmRequest {
    /// VM to delete.
    pub vm: VmId,
}

/// Payload for `/auth/signup` and `/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
