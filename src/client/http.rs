use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::client::{ClientError, CourseApi};
use crate::config::ClientConfig;
use crate::error::ErrorResponse;
use crate::models::{Course, MessageResponse, NewCourseRequest, ToggleResponse, UpdateCourseRequest};

pub struct HttpCourseApi {
    client: Client,
    base_url: String,
}

impl HttpCourseApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn course_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(ErrorResponse { error, fields: Some(fields) }) if !fields.is_empty() => {
                    format!("{}: {}", error, fields)
                }
                Ok(ErrorResponse { error, .. }) => error,
                Err(_) if body.is_empty() => status.to_string(),
                Err(_) => body,
            };
            tracing::debug!("course api returned {}: {}", status, message);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CourseApi for HttpCourseApi {
    async fn list_courses(&self) -> Result<Vec<Course>, ClientError> {
        let response = self.client.get(&self.base_url).send().await?;
        Self::decode(response).await
    }

    async fn get_course(&self, id: i64) -> Result<Course, ClientError> {
        let response = self.client.get(self.course_url(id)).send().await?;
        Self::decode(response).await
    }

    async fn create_course(&self, req: &NewCourseRequest) -> Result<Course, ClientError> {
        let response = self.client.post(&self.base_url).json(req).send().await?;
        Self::decode(response).await
    }

    async fn update_course(
        &self,
        id: i64,
        req: &UpdateCourseRequest,
    ) -> Result<MessageResponse, ClientError> {
        let response = self.client.put(self.course_url(id)).json(req).send().await?;
        Self::decode(response).await
    }

    async fn toggle_course(&self, id: i64) -> Result<ToggleResponse, ClientError> {
        let url = format!("{}/toggle", self.course_url(id));
        let response = self.client.patch(url).send().await?;
        Self::decode(response).await
    }

    async fn delete_course(&self, id: i64) -> Result<MessageResponse, ClientError> {
        let response = self.client.delete(self.course_url(id)).send().await?;
        Self::decode(response).await
    }
}
