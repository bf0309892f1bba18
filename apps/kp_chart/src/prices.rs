use anyhow::Context;
use paddhati::scorer::PricePoint;
use std::path::Path;

/// Read a JSON array of `{"time": "YYYY-MM-DD", "close": f64, "volume"?: u64}`,
/// sorted oldest first.
pub fn load_prices(path: &Path) -> anyhow::Result<Vec<PricePoint>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read price file {}", path.display()))?;
    let mut prices: Vec<PricePoint> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse price file {}", path.display()))?;
    prices.sort_by_key(|p| p.time);
    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_prices_sorts_by_date() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"[{{"time": "2024-01-03", "close": 102.5}},
                {{"time": "2024-01-02", "close": 101.0, "volume": 1200}}]"#
        )?;
        let prices = load_prices(file.path())?;
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].close, 101.0);
        assert_eq!(prices[0].volume, Some(1200));
        assert_eq!(prices[1].volume, None);
        Ok(())
    }

    #[test]
    fn test_load_prices_rejects_garbage() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "not json")?;
        assert!(load_prices(file.path()).is_err());
        Ok(())
    }
}
