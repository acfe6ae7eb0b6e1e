use super::model::{Duration, DurationUnit, UNKNOWN};

/// Parse the free-text `duration` column (`"90 min"`, `"3 Seasons"`).
///
/// Total over all inputs. The unit is decided by substring (`min` wins over
/// `Season`), the value by the first whitespace-separated token. A unit with
/// no leading integer yields [`Duration::UNKNOWN`].
pub fn parse_duration(raw: Option<&str>) -> Duration {
    let Some(raw) = raw else {
        return Duration::UNKNOWN;
    };
    if raw == UNKNOWN {
        return Duration::UNKNOWN;
    }

    let unit = if raw.contains("min") {
        DurationUnit::Minutes
    } else if raw.contains("Season") {
        DurationUnit::Seasons
    } else {
        return Duration::UNKNOWN;
    };

    match leading_integer(raw) {
        Some(value) => Duration {
            value: Some(value),
            unit,
        },
        None => {
            log::debug!("duration {raw:?} has no leading integer");
            Duration::UNKNOWN
        }
    }
}

fn leading_integer(raw: &str) -> Option<u64> {
    raw.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes() {
        assert_eq!(
            parse_duration(Some("90 min")),
            Duration {
                value: Some(90),
                unit: DurationUnit::Minutes
            }
        );
    }

    #[test]
    fn seasons_singular_and_plural() {
        let three = parse_duration(Some("3 Seasons"));
        assert_eq!(three.value, Some(3));
        assert_eq!(three.unit, DurationUnit::Seasons);

        let one = parse_duration(Some("1 Season"));
        assert_eq!(one.value, Some(1));
        assert_eq!(one.unit, DurationUnit::Seasons);
    }

    #[test]
    fn unknown_and_missing() {
        assert_eq!(parse_duration(Some("Unknown")), Duration::UNKNOWN);
        assert_eq!(parse_duration(None), Duration::UNKNOWN);
        assert_eq!(parse_duration(Some("")), Duration::UNKNOWN);
        assert_eq!(parse_duration(Some("two hours")), Duration::UNKNOWN);
    }

    #[test]
    fn unit_without_leading_integer_does_not_panic() {
        assert_eq!(parse_duration(Some("min")), Duration::UNKNOWN);
        assert_eq!(parse_duration(Some("about 90 min")), Duration::UNKNOWN);
        assert_eq!(parse_duration(Some("Season 2")), Duration::UNKNOWN);
        assert_eq!(parse_duration(Some("-5 min")), Duration::UNKNOWN);
    }

    #[test]
    fn min_checked_before_season() {
        let d = parse_duration(Some("45 min per Season"));
        assert_eq!(d.unit, DurationUnit::Minutes);
        assert_eq!(d.value, Some(45));
    }

    #[test]
    fn large_values_keep_their_unit() {
        let d = parse_duration(Some("5000000000 min"));
        assert_eq!(d.value, Some(5_000_000_000));
        assert_eq!(d.unit, DurationUnit::Minutes);
    }
}
