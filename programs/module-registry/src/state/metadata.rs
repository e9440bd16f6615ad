use anchor_lang::prelude::*;

use crate::validation::{
    validate_json_shape, validate_str, MAX_DESCRIPTION_LEN, MAX_TAGS_LEN, MAX_URI_LEN,
};

/// Deployment-wide presentation metadata singleton
///
/// PDA: seeds = [b"global_metadata"]. Admin-only mutation; consumed by
/// indexers and dashboards, never by on-chain logic.
#[account]
pub struct GlobalMetadata {
    pub description: String,
    pub tags: String,
    pub website_url: String,
    pub docs_url: String,
    pub dashboard_url: String,
    pub icon_uri: String,
    /// Free-form JSON blob for fields the schema does not model yet
    pub extra_json: String,
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
    /// Last mutation timestamp (Unix seconds)
    pub updated_at: i64,
    /// PDA bump
    pub bump: u8,
    /// Reserved for in-place schema evolution
    pub reserved: [u8; 64],
}

impl GlobalMetadata {
    pub const LEN: usize = 8 // discriminator
        + 4 + MAX_DESCRIPTION_LEN // description
        + 4 + MAX_TAGS_LEN        // tags
        + 4 + MAX_URI_LEN         // website_url
        + 4 + MAX_URI_LEN         // docs_url
        + 4 + MAX_URI_LEN         // dashboard_url
        + 4 + MAX_URI_LEN         // icon_uri
        + 4 + MAX_DESCRIPTION_LEN // extra_json
        + 8  // created_at
        + 8  // updated_at
        + 1  // bump
        + 64; // reserved

    pub fn init(&mut self, bump: u8, now: i64) {
        self.description = String::new();
        self.tags = String::new();
        self.website_url = String::new();
        self.docs_url = String::new();
        self.dashboard_url = String::new();
        self.icon_uri = String::new();
        self.extra_json = String::new();
        self.created_at = now;
        self.updated_at = now;
        self.bump = bump;
        self.reserved = [0u8; 64];
    }

    /// Apply a partial update. `None` leaves the stored field unchanged.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_update(
        &mut self,
        description: Option<String>,
        tags: Option<String>,
        website_url: Option<String>,
        docs_url: Option<String>,
        dashboard_url: Option<String>,
        icon_uri: Option<String>,
        extra_json: Option<String>,
        now: i64,
    ) -> Result<()> {
        if let Some(v) = &description {
            validate_str(v, MAX_DESCRIPTION_LEN)?;
        }
        if let Some(v) = &tags {
            validate_str(v, MAX_TAGS_LEN)?;
        }
        for url in [&website_url, &docs_url, &dashboard_url, &icon_uri]
            .into_iter()
            .flatten()
        {
            validate_str(url, MAX_URI_LEN)?;
        }
        if let Some(v) = &extra_json {
            validate_str(v, MAX_DESCRIPTION_LEN)?;
            validate_json_shape(v)?;
        }

        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = tags {
            self.tags = v;
        }
        if let Some(v) = website_url {
            self.website_url = v;
        }
        if let Some(v) = docs_url {
            self.docs_url = v;
        }
        if let Some(v) = dashboard_url {
            self.dashboard_url = v;
        }
        if let Some(v) = icon_uri {
            self.icon_uri = v;
        }
        if let Some(v) = extra_json {
            self.extra_json = v;
        }
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_at(now: i64) -> GlobalMetadata {
        let mut metadata = GlobalMetadata {
            description: String::new(),
            tags: String::new(),
            website_url: String::new(),
            docs_url: String::new(),
            dashboard_url: String::new(),
            icon_uri: String::new(),
            extra_json: String::new(),
            created_at: 0,
            updated_at: 0,
            bump: 0,
            reserved: [0u8; 64],
        };
        metadata.init(255, now);
        metadata
    }

    #[test]
    fn test_partial_update() {
        let mut metadata = metadata_at(100);
        metadata
            .apply_update(
                Some("module registry".into()),
                None,
                Some("https://example.org".into()),
                None,
                None,
                None,
                None,
                200,
            )
            .unwrap();
        assert_eq!(metadata.description, "module registry");
        assert_eq!(metadata.website_url, "https://example.org");
        assert_eq!(metadata.tags, "");
        assert_eq!(metadata.updated_at, 200);
    }

    #[test]
    fn test_extra_json_shape_enforced() {
        let mut metadata = metadata_at(100);
        assert!(metadata
            .apply_update(
                None,
                None,
                None,
                None,
                None,
                None,
                Some("not an object".into()),
                200,
            )
            .is_err());
        assert_eq!(metadata.extra_json, "");
        assert_eq!(metadata.updated_at, 100);

        metadata
            .apply_update(
                None,
                None,
                None,
                None,
                None,
                None,
                Some(r#"{"theme":"dark"}"#.into()),
                300,
            )
            .unwrap();
        assert_eq!(metadata.extra_json, r#"{"theme":"dark"}"#);
    }
}
