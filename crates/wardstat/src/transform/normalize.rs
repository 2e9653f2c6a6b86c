//! Column-name normalization.

/// Normalize one column name: trim, spaces to underscores, drop newlines, lowercase.
///
/// Idempotent: normalizing an already normalized name returns it unchanged.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().replace(' ', "_").replace('\n', "").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("  Length of Stay "), "length_of_stay");
        assert_eq!(normalize_column_name("Avg Treatment\nSuccess"), "avg_treatmentsuccess");
        assert_eq!(normalize_column_name("Blood_Sugar\n"), "blood_sugar");
        assert_eq!(normalize_column_name("type"), "type");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for name in ["  Patients Attended", "A\n B", "\tRevenue\t", ""] {
            let once = normalize_column_name(name);
            assert_eq!(normalize_column_name(&once), once);
        }
    }
}
