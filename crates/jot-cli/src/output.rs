use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response unless `--quiet` was given.
pub fn output<T: Serialize>(value: &T, flags: GlobalFlags) -> anyhow::Result<()> {
    if flags.quiet {
        return Ok(());
    }
    let rendered = render(value, flags.format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::render;
    use crate::cli::OutputFormat;

    #[test]
    fn raw_is_single_line() {
        let value = json!({"id": "p-1", "tier": {"kind": "created"}});
        let raw = render(&value, OutputFormat::Raw).unwrap();
        assert_eq!(raw, r#"{"id":"p-1","tier":{"kind":"created"}}"#);
    }

    #[test]
    fn json_is_pretty() {
        let value = json!({"id": "p-1"});
        let pretty = render(&value, OutputFormat::Json).unwrap();
        assert_eq!(pretty, "{\n  \"id\": \"p-1\"\n}");
    }
}
