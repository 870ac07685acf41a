//! Static image assets referenced by content.
//!
//! Assets are read-only files in one directory. The catalog is scanned once at start-up;
//! a missing file is logged and reported as unavailable, and presentation layers render a
//! placeholder in its place.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use utoipa::ToSchema;

/// The closed set of images content may reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetId {
    Logo,
    FlowChart,
}

impl AssetId {
    pub const ALL: [AssetId; 2] = [AssetId::Logo, AssetId::FlowChart];

    pub fn file_name(self) -> &'static str {
        self.file_names()[0]
    }

    /// Accepted file names, preferred first. The second is the name the case-study image was
    /// first published under.
    pub fn file_names(self) -> &'static [&'static str] {
        match self {
            AssetId::Logo => &["logo.png", "mb_logo_white copy.png"],
            AssetId::FlowChart => &["flow_chart.png", "flowChart_caseStudy.png"],
        }
    }

    /// Alternative text shown when the image cannot be displayed.
    pub fn alt_text(self) -> &'static str {
        match self {
            AssetId::Logo => "Company logo",
            AssetId::FlowChart => "Solution architecture flow chart",
        }
    }
}

/// Which assets exist on disk, resolved once at start-up.
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    dir: Option<PathBuf>,
    available: HashMap<AssetId, PathBuf>,
}

impl AssetCatalog {
    /// A catalog with no asset directory: every asset is unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check every known asset under `dir`.
    ///
    /// Missing files are logged as warnings and never cause an error.
    pub fn scan(dir: Option<&Path>) -> Self {
        let Some(dir) = dir else {
            tracing::warn!("no asset directory configured; images will use placeholders");
            return Self::empty();
        };

        let mut available = HashMap::new();
        for asset in AssetId::ALL {
            let found = asset
                .file_names()
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file());
            match found {
                Some(path) => {
                    available.insert(asset, path);
                }
                None => tracing::warn!(
                    "asset {:?} not found in {} (tried {:?})",
                    asset,
                    dir.display(),
                    asset.file_names()
                ),
            }
        }

        Self {
            dir: Some(dir.to_path_buf()),
            available,
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn path(&self, asset: AssetId) -> Option<&Path> {
        self.available.get(&asset).map(PathBuf::as_path)
    }

    /// File name of `asset` as found on disk.
    pub fn found_name(&self, asset: AssetId) -> Option<&str> {
        self.path(asset)
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
    }

    pub fn is_available(&self, asset: AssetId) -> bool {
        self.available.contains_key(&asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_without_dir_marks_everything_missing() {
        let catalog = AssetCatalog::scan(None);
        assert!(catalog.dir().is_none());
        for asset in AssetId::ALL {
            assert!(!catalog.is_available(asset));
        }
    }

    #[test]
    fn test_scan_reports_present_and_missing_assets() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(AssetId::Logo.file_name()), b"png").expect("write logo");

        let catalog = AssetCatalog::scan(Some(dir.path()));
        assert_eq!(
            catalog.path(AssetId::Logo),
            Some(dir.path().join("logo.png").as_path())
        );
        assert!(!catalog.is_available(AssetId::FlowChart));
    }

    #[test]
    fn test_scan_accepts_published_file_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("mb_logo_white copy.png"), b"png").expect("write logo");
        std::fs::write(dir.path().join("flowChart_caseStudy.png"), b"png").expect("write chart");

        let catalog = AssetCatalog::scan(Some(dir.path()));
        assert_eq!(catalog.found_name(AssetId::Logo), Some("mb_logo_white copy.png"));
        assert_eq!(
            catalog.found_name(AssetId::FlowChart),
            Some("flowChart_caseStudy.png")
        );
    }

    #[test]
    fn test_scan_prefers_canonical_file_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in AssetId::Logo.file_names() {
            std::fs::write(dir.path().join(name), b"png").expect("write logo");
        }

        let catalog = AssetCatalog::scan(Some(dir.path()));
        assert_eq!(catalog.found_name(AssetId::Logo), Some("logo.png"));
    }

    #[test]
    fn test_asset_ids_serialise_in_snake_case() {
        let json = serde_json::to_string(&AssetId::FlowChart).expect("serialise");
        assert_eq!(json, "\"flow_chart\"");
    }
}
