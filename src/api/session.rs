//! Session Endpoints

use async_trait::async_trait;

use super::{HttpClient, SessionApi};
use crate::error::AppResult;
use crate::models::CurrentUser;

#[async_trait(?Send)]
impl SessionApi for HttpClient {
    async fn me(&self) -> AppResult<CurrentUser> {
        self.get_json("/me").await
    }

    async fn logout(&self) -> AppResult<()> {
        self.execute::<()>("POST", "/logout", None).await
    }
}
