//! Response DTOs.

use serde::Serialize;

use crate::file::FileRecord;

/// Login response carrying the issued session token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Opaque session token.
    #[serde(rename = "auth-token")]
    pub auth_token: String,
}

/// Registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Assigned user id.
    pub id: i64,
    /// Registered login.
    pub login: String,
}

/// File metadata response.
#[derive(Debug, Serialize)]
pub struct FileResponse {
    /// Record id.
    pub id: i64,
    /// Filename.
    pub filename: String,
    /// Content size in bytes.
    pub size: i64,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename,
            size: record.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_field_name() {
        let response = LoginResponse {
            auth_token: "abc".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["auth-token"], "abc");
    }
}
