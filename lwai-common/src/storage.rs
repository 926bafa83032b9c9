//! Image reference resolution
//!
//! Image fields hold an absolute URL, a site-root path, or a bare object
//! storage key. Resolution is a pure string operation so the server and any
//! client produce the same URL.

/// Default public bucket for uploaded site images
pub const DEFAULT_BUCKET: &str = "www-images";

/// Path under the storage service URL where public objects are served
const PUBLIC_OBJECT_PATH: &str = "storage/v1/object/public";

/// Public location of the object storage bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Public object base, e.g. `https://xyz.supabase.co/storage/v1/object/public`
    pub public_base: String,
    /// Bucket name
    pub bucket: String,
}

impl StorageConfig {
    /// Build from the storage service URL and bucket name
    pub fn new(storage_url: &str, bucket: &str) -> Self {
        let base = storage_url.trim_end_matches('/');
        Self {
            public_base: format!("{}/{}", base, PUBLIC_OBJECT_PATH),
            bucket: bucket.trim_matches('/').to_string(),
        }
    }

    /// Use an already-complete public base (no path appended)
    pub fn with_public_base(public_base: &str, bucket: &str) -> Self {
        Self {
            public_base: public_base.trim_end_matches('/').to_string(),
            bucket: bucket.trim_matches('/').to_string(),
        }
    }

    /// Resolve an image reference to a URL usable by a browser
    ///
    /// - `http...` is returned unchanged (already absolute)
    /// - `/...` is returned unchanged (static asset under the site root)
    /// - empty or absent becomes `""` (no image)
    /// - anything else is a storage key: `{public_base}/{bucket}/{key}`
    pub fn resolve(&self, reference: Option<&str>) -> String {
        match reference {
            None | Some("") => String::new(),
            Some(r) if r.starts_with("http") || r.starts_with('/') => r.to_string(),
            Some(key) => format!("{}/{}/{}", self.public_base, self.bucket, key),
        }
    }

    /// Resolve an optional image field in place; absent stays absent
    pub fn resolve_field(&self, field: &mut Option<String>) {
        if let Some(reference) = field.as_mut() {
            *reference = self.resolve(Some(reference.as_str()));
        }
    }
}
