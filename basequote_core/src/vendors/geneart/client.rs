//! Wire client for the Thermo Fisher gene-design ordering API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::GeneArtSettings;
use crate::error::VendorError;
use crate::offers::SequenceRecord;

const VALIDATE_PATH: &str = "validate/v1";
const STATUS_PATH: &str = "status/v1";
const ADD_TO_CART_PATH: &str = "addtocart/v1";
const UPLOAD_PATH: &str = "upload/v1";

/// Product lines quoted by the gene-design API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    DnaStrings,
    HqDnaStrings,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::DnaStrings => "dnaStrings",
            Product::HqDnaStrings => "hqDnaStrings",
        }
    }
}

#[derive(Debug, Serialize)]
struct AuthBlock<'a> {
    username: &'a str,
    token: &'a str,
}

/// One construct as the API expects it.
#[derive(Debug, Clone, Serialize)]
pub struct ConstructPayload {
    #[serde(rename = "idN")]
    pub id_n: String,
    pub name: String,
    pub sequence: String,
    pub product: String,
}

impl ConstructPayload {
    pub fn from_record(seq: &SequenceRecord, product: Product) -> Self {
        Self {
            id_n: seq.key.to_string(),
            name: seq.name.clone(),
            sequence: seq.sequence.clone(),
            product: product.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ProjectRequest<'a> {
    authentication: AuthBlock<'a>,
    project: ProjectPayload,
}

#[derive(Debug, Serialize)]
struct ProjectPayload {
    name: String,
    constructs: Vec<ConstructPayload>,
}

#[derive(Debug, Serialize)]
struct ProjectIdRequest<'a> {
    authentication: AuthBlock<'a>,
    #[serde(rename = "projectId")]
    project_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateResponse {
    pub name: String,
    pub constructs: Vec<ConstructDecision>,
}

/// The API's verdict on one construct.
#[derive(Debug, Clone, Deserialize)]
pub struct ConstructDecision {
    pub name: String,
    pub product: String,
    pub accepted: bool,
    #[serde(default)]
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub project: UploadedProject,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedProject {
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub constructs: Vec<UploadedConstruct>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedConstruct {
    pub construct_id: String,
    pub name: String,
    pub product: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub project_id: String,
    pub status: String,
    #[serde(default)]
    pub cart_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub project_id: String,
    pub cart_id: String,
}

pub struct GeneArtClient {
    http: Client,
    base: Url,
    username: String,
    token: String,
}

impl GeneArtClient {
    pub fn new(settings: &GeneArtSettings) -> Result<Self, VendorError> {
        let http = Client::builder()
            .user_agent(concat!("basequote/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(settings.timeout))
            .build()?;
        // Endpoint paths are joined below; the base must end with a slash
        // for Url::join to keep its last segment.
        let mut server = settings.server.clone();
        if !server.ends_with('/') {
            server.push('/');
        }
        Ok(Self {
            http,
            base: Url::parse(&server)?,
            username: settings.username.clone(),
            token: settings.token.clone(),
        })
    }

    fn auth(&self) -> AuthBlock<'_> {
        AuthBlock {
            username: &self.username,
            token: &self.token,
        }
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, VendorError> {
        let url = self.base.join(path)?;
        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(VendorError::Authentication(format!(
                "gene-design API rejected credentials for {}",
                self.username
            )));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(VendorError::Upstream(format!(
                "gene-design API returned {}: {}",
                status, text
            )));
        }
        Ok(resp.json().await?)
    }

    /// Check the configured credentials with an empty validation project.
    pub async fn authenticate(&self) -> Result<(), VendorError> {
        let body = ProjectRequest {
            authentication: self.auth(),
            project: ProjectPayload {
                name: "authentication check".to_string(),
                constructs: Vec::new(),
            },
        };
        self.post::<ValidateResponse>(VALIDATE_PATH, &body)
            .await
            .map(|_| ())
    }

    /// Validate a set of constructs without creating a project.
    pub async fn validate(
        &self,
        project_name: &str,
        constructs: Vec<ConstructPayload>,
    ) -> Result<ValidateResponse, VendorError> {
        let body = ProjectRequest {
            authentication: self.auth(),
            project: ProjectPayload {
                name: project_name.to_string(),
                constructs,
            },
        };
        self.post(VALIDATE_PATH, &body).await
    }

    /// Upload a draft project with the given constructs.
    pub async fn upload(
        &self,
        project_name: &str,
        constructs: Vec<ConstructPayload>,
    ) -> Result<UploadResponse, VendorError> {
        let body = ProjectRequest {
            authentication: self.auth(),
            project: ProjectPayload {
                name: project_name.to_string(),
                constructs,
            },
        };
        self.post(UPLOAD_PATH, &body).await
    }

    pub async fn status(&self, project_id: &str) -> Result<StatusResponse, VendorError> {
        let body = ProjectIdRequest {
            authentication: self.auth(),
            project_id,
        };
        self.post(STATUS_PATH, &body).await
    }

    pub async fn add_to_cart(&self, project_id: &str) -> Result<CartResponse, VendorError> {
        let body = ProjectIdRequest {
            authentication: self.auth(),
            project_id,
        };
        self.post(ADD_TO_CART_PATH, &body).await
    }
}
