use serde_json::Value;

use super::ApiClient;
use crate::error::ConsoleResult;
use crate::models::CallRecord;

impl ApiClient {
    /// GET /calls, decoded through the versioned call decoder.
    pub async fn list_calls(&self) -> ConsoleResult<Vec<CallRecord>> {
        let payload: Value = self.get_json("/calls", "calls").await?;
        Ok(CallRecord::decode_list(&payload)?)
    }

    /// GET /calls/{sid}
    pub async fn get_call(&self, sid: &str) -> ConsoleResult<CallRecord> {
        let payload: Value = self.get_json("/calls/{sid}", &format!("calls/{}", sid)).await?;
        Ok(CallRecord::decode(&payload)?)
    }
}
