pub mod services;
pub mod types;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Every backend response, success or not, comes wrapped in this envelope.
/// Paginated list endpoints additionally fill `meta`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// Errors are normalized here and never thrown past the service boundary:
/// the update loop only ever sees this value.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("{message}")]
    Api { message: String },
    #[error("Sesión expirada, vuelve a iniciar sesión")]
    Unauthorized,
    #[error("No tienes permiso para realizar esta acción")]
    Forbidden,
    #[error("Error de conexión: {message}")]
    Network { message: String },
    #[error("Respuesta inválida del servidor: {message}")]
    Decode { message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode {
                message: err.to_string(),
            }
        } else {
            ApiError::Network {
                message: err.to_string(),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(ApiError::from)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.http.get(self.url(path)).query(query).send().await?;
        Self::decode(response).await
    }

    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Page<T>, ApiError> {
        let response = self.http.get(self.url(path)).query(query).send().await?;
        let envelope: Envelope<Vec<T>> = Self::read_envelope(response).await?;
        let meta = envelope.meta.ok_or_else(|| ApiError::Decode {
            message: "respuesta paginada sin meta".to_string(),
        })?;
        Ok(Page {
            items: envelope.data.unwrap_or_default(),
            meta,
        })
    }

    pub async fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    pub async fn put<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.http.delete(self.url(path)).send().await?;
        let _: Envelope<serde_json::Value> = Self::read_envelope(response).await?;
        Ok(())
    }

    pub async fn upload(
        &self,
        path: &str,
        field: &str,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);
        let response = self
            .http
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        let _: Envelope<serde_json::Value> = Self::read_envelope(response).await?;
        Ok(())
    }

    /// Raw bytes fetch for avatars; `url` may be absolute (CDN) or backend-relative.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let full = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            self.url(url)
        };
        let response = self.http.get(full).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Network {
                message: format!("HTTP {}", response.status()),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let envelope: Envelope<T> = Self::read_envelope(response).await?;
        envelope.data.ok_or_else(|| ApiError::Decode {
            message: "respuesta sin datos".to_string(),
        })
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Envelope<T>, ApiError> {
        let status = response.status();
        match status.as_u16() {
            401 => return Err(ApiError::Unauthorized),
            403 => return Err(ApiError::Forbidden),
            _ => {}
        }
        let body = response.bytes().await?;
        // Error statuses still carry the envelope; parse it before falling
        // back to the bare status code.
        match serde_json::from_slice::<Envelope<T>>(&body) {
            Ok(envelope) if envelope.success => Ok(envelope),
            Ok(envelope) => Err(ApiError::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| format!("Error del servidor (HTTP {})", status)),
            }),
            Err(err) if status.is_success() => Err(ApiError::Decode {
                message: err.to_string(),
            }),
            Err(_) => Err(ApiError::Api {
                message: format!("Error del servidor (HTTP {})", status),
            }),
        }
    }
}

pub fn parse_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    match serde_json::from_slice::<Envelope<T>>(body) {
        Ok(envelope) if envelope.success => envelope.data.ok_or_else(|| ApiError::Decode {
            message: "respuesta sin datos".to_string(),
        }),
        Ok(envelope) => Err(ApiError::Api {
            message: envelope
                .message
                .unwrap_or_else(|| "Error del servidor".to_string()),
        }),
        Err(err) => Err(ApiError::Decode {
            message: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Grade, SchoolCycle};

    #[test]
    fn failed_envelope_surfaces_backend_message_verbatim() {
        let body = br#"{"success":false,"message":"X","data":null}"#;
        let err = parse_envelope::<Vec<Grade>>(body).unwrap_err();
        match err {
            ApiError::Api { message } => assert_eq!(message, "X"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn successful_envelope_yields_typed_data() {
        let body = r#"{
            "success": true,
            "message": "ok",
            "data": [
                {"id": 7, "name": "7mo Grado", "level": "Básicos", "order": 7, "isActive": true}
            ]
        }"#;
        let grades: Vec<Grade> = parse_envelope(body.as_bytes()).unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].id, 7);
        assert_eq!(grades[0].name, "7mo Grado");
        assert!(grades[0].is_active);
    }

    #[test]
    fn paginated_meta_decodes_from_camel_case() {
        let body = br#"{
            "success": true,
            "message": "",
            "data": [],
            "meta": {
                "total": 42, "page": 2, "limit": 10,
                "totalPages": 5, "hasNextPage": true, "hasPreviousPage": true
            }
        }"#;
        let envelope: Envelope<Vec<SchoolCycle>> = serde_json::from_slice(body).unwrap();
        let meta = envelope.meta.unwrap();
        assert_eq!(meta.total, 42);
        assert_eq!(meta.total_pages, 5);
        assert!(meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn missing_data_on_success_is_a_decode_error() {
        let body = br#"{"success":true,"message":"ok"}"#;
        let err = parse_envelope::<Vec<Grade>>(body).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn cycle_dates_decode_as_naive_dates() {
        let body = br#"{
            "success": true,
            "data": {
                "id": 1, "name": "Ciclo 2025",
                "startDate": "2025-01-13", "endDate": "2025-10-31",
                "isActive": true, "isClosed": false
            }
        }"#;
        let cycle: SchoolCycle = parse_envelope(body).unwrap();
        assert_eq!(cycle.start_date.to_string(), "2025-01-13");
        assert!(!cycle.is_closed);
    }
}
