//! Human-readable unit listing.

use range_core::Unit;

pub fn format_unit_table(units: &[Unit]) -> String {
    let mut out = String::new();
    let total: u64 = units.iter().filter_map(|u| u.weight).sum();

    out.push_str(&format!("Units to run against ({} units, {total} lines):\n", units.len()));
    for unit in units {
        let weight = unit
            .weight
            .map(|w| w.to_string())
            .unwrap_or_else(|| "?".to_string());
        out.push_str(&format!("  {weight}\t{}\n", unit.path.display()));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_unit_table() {
        let units = vec![Unit::weighted("sdk/s3", 3000), Unit::new("sdk/sts")];
        let table = format_unit_table(&units);

        assert!(table.starts_with("Units to run against (2 units, 3000 lines):"));
        assert!(table.contains("  3000\tsdk/s3\n"));
        assert!(table.contains("  ?\tsdk/sts\n"));
    }
}
