//! Bin QR code payloads.

use serde::Deserialize;

use crate::classifier::Category;
use crate::error::BinScanError;

#[derive(Debug, Deserialize)]
struct BinPayload {
    bin_id: String,
    category: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    geohash: Option<String>,
    #[serde(default)]
    generated_at: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// A bin identified by scanning its QR code.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedBin {
    pub bin_id: String,
    pub category: Category,
    pub latitude: f64,
    pub longitude: f64,
    pub geohash: Option<String>,
    pub generated_at: Option<String>,
    pub version: Option<String>,
}

impl ScannedBin {
    /// Parse the compact JSON printed into bin QR codes.
    pub fn from_qr_payload(payload: &str) -> Result<Self, BinScanError> {
        let raw: BinPayload = serde_json::from_str(payload.trim())?;
        let category = Category::from_id(&raw.category)
            .ok_or_else(|| BinScanError::UnsupportedCategory(raw.category.clone()))?;
        Ok(Self {
            bin_id: raw.bin_id,
            category,
            latitude: raw.latitude,
            longitude: raw.longitude,
            geohash: raw.geohash,
            generated_at: raw.generated_at,
            version: raw.version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generated_payload() {
        let payload = r#"{"bin_id":"BIN_003_EWASTE","category":"ewaste","latitude":37.8719,"longitude":-122.2585,"geohash":"9q9p3yxm","generated_at":"2025-01-01T00:00:00","version":"1.0"}"#;
        let bin = ScannedBin::from_qr_payload(payload).unwrap();
        assert_eq!(bin.bin_id, "BIN_003_EWASTE");
        assert_eq!(bin.category, Category::ElectronicWaste);
        assert_eq!(bin.geohash.as_deref(), Some("9q9p3yxm"));
        assert_eq!(bin.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_optional_fields() {
        let payload = r#"{"bin_id":"TEST_000_RECYCLE","category":"recycle","latitude":0.0,"longitude":0.0}"#;
        let bin = ScannedBin::from_qr_payload(payload).unwrap();
        assert_eq!(bin.category, Category::Recyclable);
        assert!(bin.geohash.is_none());
    }

    #[test]
    fn test_landfill_is_unsupported() {
        let payload = r#"{"bin_id":"BIN_000_LANDFILL","category":"landfill","latitude":0.0,"longitude":0.0}"#;
        match ScannedBin::from_qr_payload(payload) {
            Err(BinScanError::UnsupportedCategory(c)) => assert_eq!(c, "landfill"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            ScannedBin::from_qr_payload("not json"),
            Err(BinScanError::Json(_))
        ));
    }
}
