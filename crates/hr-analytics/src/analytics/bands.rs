//! Fixed TRANCHE_AGE / TRANCHE_ANCIENNETE band tables.

pub const AGE_BANDS: [&str; 6] = ["18 - 20", "21 - 30", "31 - 40", "41 - 50", "51 - 60", "61 +"];

pub const TENURE_BANDS: [&str; 6] = ["0 - 5", "6 - 10", "11 - 15", "16 - 20", "21 - 25", "26 +"];

/// Band label for an age. Values below 18 land in the youngest band.
pub fn age_band(age: f64) -> &'static str {
    let years = age.trunc() as i64;
    match years {
        i64::MIN..=20 => AGE_BANDS[0],
        21..=30 => AGE_BANDS[1],
        31..=40 => AGE_BANDS[2],
        41..=50 => AGE_BANDS[3],
        51..=60 => AGE_BANDS[4],
        _ => AGE_BANDS[5],
    }
}

pub fn tenure_band(tenure: f64) -> &'static str {
    let years = tenure.trunc() as i64;
    match years {
        i64::MIN..=5 => TENURE_BANDS[0],
        6..=10 => TENURE_BANDS[1],
        11..=15 => TENURE_BANDS[2],
        16..=20 => TENURE_BANDS[3],
        21..=25 => TENURE_BANDS[4],
        _ => TENURE_BANDS[5],
    }
}

/// Trimmed stored label, or the computed band when the stored one is blank.
pub fn resolve_band<'a>(stored: &'a str, computed: &'a str) -> &'a str {
    let stored = stored.trim();
    if stored.is_empty() {
        computed
    } else {
        stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_band_uses_whole_years() {
        assert_eq!(age_band(16.0), "18 - 20");
        assert_eq!(age_band(20.9), "18 - 20");
        assert_eq!(age_band(21.0), "21 - 30");
        assert_eq!(age_band(30.9), "21 - 30");
        assert_eq!(age_band(60.0), "51 - 60");
        assert_eq!(age_band(61.0), "61 +");
    }

    #[test]
    fn tenure_band_covers_new_hires_and_veterans() {
        assert_eq!(tenure_band(0.5), "0 - 5");
        assert_eq!(tenure_band(5.0), "0 - 5");
        assert_eq!(tenure_band(6.0), "6 - 10");
        assert_eq!(tenure_band(25.0), "21 - 25");
        assert_eq!(tenure_band(40.0), "26 +");
    }

    #[test]
    fn stored_band_wins_unless_blank() {
        assert_eq!(resolve_band(" 61 + ", "51 - 60"), "61 +");
        assert_eq!(resolve_band("  ", "21 - 30"), "21 - 30");
        assert_eq!(resolve_band("", "0 - 5"), "0 - 5");
    }
}
