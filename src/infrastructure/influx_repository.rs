// InfluxDB v2 repository implementation
use crate::application::error::GatewayError;
use crate::application::timeseries_repository::{Row, TimeSeriesRepository};
use crate::domain::deletion::DeleteRequest;
use crate::infrastructure::config::InfluxSettings;
use crate::infrastructure::flux_csv::parse_query_csv;
use async_trait::async_trait;
use reqwest::{StatusCode, header};

#[derive(Debug, Clone)]
pub struct InfluxRepository {
    client: reqwest::Client,
    url: String,
    token: String,
    org: String,
    bucket: String,
}

impl InfluxRepository {
    pub fn new(client: reqwest::Client, settings: &InfluxSettings) -> Self {
        Self {
            client,
            url: settings.url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            org: settings.org.clone(),
            bucket: settings.bucket.clone(),
        }
    }

    fn write_url(&self) -> String {
        format!(
            "{}/api/v2/write?org={}&bucket={}&precision=ns",
            self.url,
            urlencoding::encode(&self.org),
            urlencoding::encode(&self.bucket)
        )
    }

    fn query_url(&self) -> String {
        format!("{}/api/v2/query?org={}", self.url, urlencoding::encode(&self.org))
    }

    fn delete_url(&self) -> String {
        format!(
            "{}/api/v2/delete?org={}&bucket={}",
            self.url,
            urlencoding::encode(&self.org),
            urlencoding::encode(&self.bucket)
        )
    }

    fn authorization(&self) -> String {
        format!("Token {}", self.token)
    }

    async fn send(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GatewayError> {
        request
            .header(header::AUTHORIZATION, self.authorization())
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                operation,
                message: e.to_string(),
            })
    }

    async fn expect_status(
        operation: &'static str,
        response: reqwest::Response,
        expected: StatusCode,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status == expected {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!("InfluxDB {} failed with status {}: {}", operation, status, body);
        Err(GatewayError::Rejected {
            operation,
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl TimeSeriesRepository for InfluxRepository {
    async fn write(&self, line_protocol: &str) -> Result<(), GatewayError> {
        tracing::debug!("Writing line protocol: {}", line_protocol);
        let request = self
            .client
            .post(self.write_url())
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(line_protocol.to_string());

        let response = self.send("write", request).await?;
        Self::expect_status("write", response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    async fn query(&self, flux: &str) -> Result<Vec<Row>, GatewayError> {
        tracing::debug!("Executing Flux query: {}", flux);
        let request = self
            .client
            .post(self.query_url())
            .header(header::CONTENT_TYPE, "application/vnd.flux")
            .header(header::ACCEPT, "application/csv")
            .body(flux.to_string());

        let response = self.send("query", request).await?;
        let response = Self::expect_status("query", response, StatusCode::OK).await?;
        let body = response.text().await.map_err(|e| GatewayError::Transport {
            operation: "query",
            message: e.to_string(),
        })?;

        let rows = parse_query_csv(&body);
        tracing::debug!("Query returned {} rows", rows.len());
        Ok(rows)
    }

    async fn delete(&self, request: &DeleteRequest) -> Result<(), GatewayError> {
        let request = self.client.post(self.delete_url()).json(request);

        let response = self.send("delete", request).await?;
        Self::expect_status("delete", response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}
