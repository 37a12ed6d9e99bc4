#[derive(Debug, Clone)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    /// bcrypt hash, salt included.
    pub password_hash: String,
    pub created_at: String,
}

impl User {
    pub fn new(username: &str, password_hash: String) -> Self {
        Self {
            id: None,
            username: username.trim().to_string(),
            password_hash,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
