//! TOML tree merging.

/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
pub(crate) fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Set the leaf at dotted `path`, creating intermediate tables.
pub(crate) fn set_path(root: &mut toml::Value, path: &str, value: toml::Value) {
    let mut current = root;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        if segments.peek().is_none() {
            table.insert(segment.to_owned(), value);
            return;
        }
        current = table
            .entry(segment)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn test_overlay_replaces_scalars_and_keeps_siblings() {
        let mut base = parse("[discord]\napi_base = \"a\"\ntimeout_secs = 15\n");
        deep_merge(&mut base, &parse("[discord]\ntimeout_secs = 30\n"));

        assert_eq!(base["discord"]["api_base"].as_str(), Some("a"));
        assert_eq!(base["discord"]["timeout_secs"].as_integer(), Some(30));
    }

    #[test]
    fn test_overlay_replaces_arrays() {
        let mut base = parse("[fediverse]\nincompatible_platforms = [\"a\", \"b\"]\n");
        deep_merge(
            &mut base,
            &parse("[fediverse]\nincompatible_platforms = [\"c\"]\n"),
        );

        let list = base["fediverse"]["incompatible_platforms"].as_array().unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_set_path_creates_tables() {
        let mut root = toml::Value::Table(toml::map::Map::new());
        set_path(&mut root, "logging.level", toml::Value::from("debug"));
        assert_eq!(root["logging"]["level"].as_str(), Some("debug"));
    }
}
