use std::{ffi::OsStr, path::Path};

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

/// Wire format of a spec document, inferred from the file extension.
/// Anything that is not YAML is treated as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    match path.extension().and_then(OsStr::to_str) {
      Some("yaml" | "yml") => Self::Yaml,
      _ => Self::Json,
    }
  }
}

/// Memory-maps and parses a spec document. The mapping stays alive only for
/// the duration of the parse; the returned spec owns all of its data.
pub async fn load_spec(path: &Path) -> anyhow::Result<oas3::Spec> {
  let format = SpecFormat::from_path(path);
  let file = AsyncMmapFile::open(path).await?;

  match format {
    SpecFormat::Json => Ok(serde_json::from_slice(file.as_slice())?),
    SpecFormat::Yaml => {
      let content = std::str::from_utf8(file.as_slice())?;
      Ok(oas3::from_yaml(content)?)
    }
  }
}
