use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Pretty-printed JSON. Only fails for types that can't be represented in JSON, like maps with
/// non-string keys; none of ours are like that.
pub fn to_json<T: Serialize>(obj: &T) -> String {
    serde_json::to_string_pretty(obj).unwrap()
}

pub fn from_json<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(raw)?)
}

pub fn write_json<T: Serialize>(path: &str, obj: &T) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }
    fs_err::write(path, to_json(obj))?;
    info!("Wrote {}", path);
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let raw = fs_err::read(path)?;
    from_json(&raw).with_context(|| format!("parsing {}", path))
}
