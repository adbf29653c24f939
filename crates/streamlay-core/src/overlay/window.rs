use serde::{Deserialize, Serialize};
use url::Url;

/// Options for a single overlay, as sent by the control window and stored in
/// presets.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverlayConfig {
    pub url: String,
    #[serde(default)]
    pub click_through: bool,
    #[serde(default)]
    pub always_on_top: bool,
    #[serde(default)]
    pub hide_from_desktop: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Older preset files gate custom sizing behind this toggle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced: Option<bool>,
}

impl OverlayConfig {
    /// Width and height when both are usable, `None` means "fill the primary
    /// work area".
    pub fn custom_size(&self) -> Option<(f64, f64)> {
        if self.advanced == Some(false) {
            return None;
        }
        match (self.width, self.height) {
            (Some(w), Some(h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 => {
                Some((w, h))
            }
            _ => None,
        }
    }
}

/// Row returned by `list_overlays`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySummary {
    pub id: String,
    pub url: String,
    pub hidden: bool,
}

/// Result record for show/hide/destroy. Failures are data, not errors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverlayOutcome {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OverlayOutcome {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(reason.into()),
        }
    }
}

impl<E: std::fmt::Display> From<Result<(), E>> for OverlayOutcome {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

pub struct OverlayWindow<H> {
    pub handle: H,
    pub config: OverlayConfig,
    pub hidden: bool,
}

/// Normalize user-entered overlay URLs. Bare `host:port/path` input gets an
/// `http://` scheme, otherwise `localhost:24050` would parse with `localhost`
/// as its scheme.
pub fn resolve_url(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim();
    if trimmed.contains("://") || trimmed.starts_with("about:") || trimmed.starts_with("data:") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("http://{}", trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_and_nulls() {
        let config: OverlayConfig = serde_json::from_str(
            r#"{"url":"http://localhost:24050/gosu","clickThrough":true,"advanced":false,"width":null,"height":null}"#,
        )
        .unwrap();
        assert_eq!(config.url, "http://localhost:24050/gosu");
        assert!(config.click_through);
        assert!(!config.always_on_top);
        assert!(!config.hide_from_desktop);
        assert_eq!(config.width, None);
        assert_eq!(config.custom_size(), None);
    }

    #[test]
    fn test_config_requires_url() {
        assert!(serde_json::from_str::<OverlayConfig>(r#"{"clickThrough":true}"#).is_err());
    }

    #[test]
    fn test_custom_size_rejects_non_positive() {
        let mut config = OverlayConfig {
            url: "http://a".into(),
            width: Some(800.0),
            height: Some(-1.0),
            ..Default::default()
        };
        assert_eq!(config.custom_size(), None);
        config.height = Some(600.0);
        assert_eq!(config.custom_size(), Some((800.0, 600.0)));
    }

    #[test]
    fn test_outcome_wire_shape() {
        let failed = serde_json::to_value(OverlayOutcome::failed("Overlay 3 not found")).unwrap();
        assert_eq!(
            failed,
            serde_json::json!({"ok": false, "error": "Overlay 3 not found"})
        );
        let ok = serde_json::to_value(OverlayOutcome::ok()).unwrap();
        assert_eq!(ok, serde_json::json!({"ok": true}));
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(
            resolve_url(" localhost:24050/overlay ").unwrap().as_str(),
            "http://localhost:24050/overlay"
        );
        assert_eq!(
            resolve_url("https://example.com/a").unwrap().as_str(),
            "https://example.com/a"
        );
        assert_eq!(resolve_url("about:blank").unwrap().as_str(), "about:blank");
        assert!(resolve_url("http://exa mple.com").is_err());
    }
}
