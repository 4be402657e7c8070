use anyhow::{bail, Result};
use reqwest::{Response, StatusCode};
use serde::Serialize;

use crate::api::*;
use crate::gesture::GestureState;

#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    client: reqwest::Client,
}
impl Client {
    pub fn new(url: String) -> Self {
        let client = reqwest::Client::new();
        Self { url, client }
    }
    async fn post(
        &self,
        path: &'static str,
        request: impl Serialize,
        expected_code: StatusCode,
    ) -> Result<Response> {
        let response = self
            .client
            .post(self.url.clone() + path)
            .json(&request)
            .send()
            .await?;
        bail_if_err(response, expected_code).await
    }
    async fn get(&self, path: &'static str) -> Result<Response> {
        let response = self.client.get(self.url.clone() + path).send().await?;
        bail_if_err(response, StatusCode::OK).await
    }
    pub async fn get_current(&self) -> Result<Option<Question>> {
        Ok(self.get("/current").await?.json().await?)
    }
    pub async fn get_featured(&self) -> Result<Vec<Question>> {
        Ok(self.get("/featured").await?.json().await?)
    }
    pub async fn get_coupon(&self) -> Result<CouponSummary> {
        Ok(self.get("/coupon").await?.json().await?)
    }
    pub async fn get_gesture(&self) -> Result<Option<GestureState>> {
        Ok(self.get("/gesture").await?.json().await?)
    }
    pub async fn begin_drag(&self, x: f64) -> Result<bool> {
        let response = self
            .post("/drag/begin", DragRequest { x }, StatusCode::OK)
            .await?;
        Ok(response.json().await?)
    }
    pub async fn move_drag(&self, x: f64) -> Result<Option<GestureState>> {
        let response = self
            .post("/drag/move", DragRequest { x }, StatusCode::OK)
            .await?;
        Ok(response.json().await?)
    }
    pub async fn cancel_drag(&self) -> Result<()> {
        self.post("/drag/cancel", (), StatusCode::OK).await?;
        Ok(())
    }
    pub async fn release_drag(&self) -> Result<Outcome> {
        let response = self.post("/drag/release", (), StatusCode::OK).await?;
        Ok(response.json().await?)
    }
    pub async fn swipe(&self, path: Vec<f64>) -> Result<Outcome> {
        let response = self
            .post("/swipe", SwipeRequest { path }, StatusCode::OK)
            .await?;
        Ok(response.json().await?)
    }
    pub async fn press(&self, vote: Vote) -> Result<Outcome> {
        let response = self
            .post("/press", PressRequest { vote }, StatusCode::OK)
            .await?;
        Ok(response.json().await?)
    }
    pub async fn remove(&self, question: QuestionId) -> Result<bool> {
        let response = self
            .post("/remove", RemoveRequest { question }, StatusCode::OK)
            .await?;
        Ok(response.json().await?)
    }
    pub async fn clear(&self) -> Result<CouponSummary> {
        let response = self.post("/clear", (), StatusCode::OK).await?;
        Ok(response.json().await?)
    }
    pub async fn set_stake(&self, stake: String) -> Result<Credits> {
        let response = self
            .post("/stake", StakeRequest { stake }, StatusCode::OK)
            .await?;
        Ok(response.json().await?)
    }
    pub async fn create_coupon(&self) -> Result<CouponReceipt> {
        let response = self
            .post("/create_coupon", (), StatusCode::CREATED)
            .await?;
        Ok(response.json().await?)
    }
}

async fn bail_if_err(response: Response, expected_code: StatusCode) -> Result<Response> {
    if response.status() != expected_code {
        bail!("{}: {}", response.status(), response.text().await?)
    } else {
        Ok(response)
    }
}
