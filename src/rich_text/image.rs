//! Image asset references and their CDN URLs.

/// Where image assets of one project and dataset are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCdn {
    pub project_id: String,
    pub dataset: String,
}

impl ImageCdn {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// URL for an asset reference like `image-<id>-<width>x<height>-<ext>`.
    ///
    /// Returns None for anything that is not an image reference.
    pub fn url_for(&self, reference: &str) -> Option<String> {
        let rest = reference.strip_prefix("image-")?;
        let (name, ext) = rest.rsplit_once('-')?;
        let (id, dimensions) = name.rsplit_once('-')?;

        let valid_dimensions = dimensions
            .split_once('x')
            .map(|(w, h)| w.parse::<u32>().is_ok() && h.parse::<u32>().is_ok())
            .unwrap_or(false);
        if id.is_empty() || ext.is_empty() || !valid_dimensions {
            return None;
        }

        Some(format!(
            "https://cdn.sanity.io/images/{}/{}/{}-{}.{}",
            self.project_id, self.dataset, id, dimensions, ext
        ))
    }
}
