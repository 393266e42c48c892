use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use uuid::Uuid;

/// Filesystem-backed blob store for uploaded documents.
///
/// Keys are company-scoped: `{company_id}/{token}-{timestamp}.{ext}`. The
/// metadata row in `documents` references the key, so a blob must be written
/// before its row is inserted.
#[derive(Clone)]
pub struct LocalStorage {
    base_dir: PathBuf,
}

impl LocalStorage {
    pub async fn new(base_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await?;
        Ok(LocalStorage { base_dir })
    }

    /// Generate a collision-resistant storage key for an upload, keeping the
    /// original file extension so downloads get a sensible name.
    pub fn generate_key(company_id: Uuid, original_name: &str) -> String {
        let token: [u8; 8] = rand::random();
        let stamp = Utc::now().timestamp_millis();
        match Path::new(original_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{company_id}/{}-{stamp}.{ext}", hex::encode(token)),
            None => format!("{company_id}/{}-{stamp}", hex::encode(token)),
        }
    }

    pub async fn put(&self, key: &str, bytes: &[u8]) -> std::io::Result<()> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, bytes).await
    }

    pub async fn get(&self, key: &str) -> std::io::Result<Vec<u8>> {
        let path = self.resolve(key)?;
        fs::read(path).await
    }

    pub async fn delete(&self, key: &str) -> std::io::Result<()> {
        let path = self.resolve(key)?;
        fs::remove_file(path).await
    }

    /// Keys come from our own database, but reject traversal anyway.
    fn resolve(&self, key: &str) -> std::io::Result<PathBuf> {
        if key.contains("..") || key.starts_with('/') {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "invalid storage key",
            ));
        }
        Ok(self.base_dir.join(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_company_scoped_and_keeps_extension() {
        let company_id = Uuid::now_v7();
        let key = LocalStorage::generate_key(company_id, "report.pdf");
        assert!(key.starts_with(&format!("{company_id}/")));
        assert!(key.ends_with(".pdf"));
    }

    #[test]
    fn keys_do_not_collide() {
        let company_id = Uuid::now_v7();
        let a = LocalStorage::generate_key(company_id, "a.txt");
        let b = LocalStorage::generate_key(company_id, "a.txt");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        storage.put("c1/blob.bin", b"hello").await.unwrap();
        assert_eq!(storage.get("c1/blob.bin").await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn rejects_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        assert!(storage.put("../escape", b"x").await.is_err());
        assert!(storage.get("/etc/passwd").await.is_err());
    }
}
