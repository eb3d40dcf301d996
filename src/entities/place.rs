use crate::entities::LongDistanceEntry;

/// Lowercase, commas become spaces, whitespace runs collapse to one space.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First entry (in table order) whose place name occurs anywhere in `text`.
pub fn match_entry<'a>(entries: &'a [LongDistanceEntry], text: &str) -> Option<&'a LongDistanceEntry> {
    let text = normalize(text);

    if text.is_empty() {
        return None;
    }

    entries
        .iter()
        .find(|entry| !entry.place.is_empty() && text.contains(entry.place.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Tariff;

    #[test]
    fn normalizes_free_text() {
        assert_eq!(normalize("  Trip to   Cape Town,RSA "), "trip to cape town rsa");
        assert_eq!(normalize("Umhlanga,\tDurban"), "umhlanga durban");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn matches_known_place() {
        let tariff = Tariff::default();

        assert_eq!(
            tariff.match_long_distance_key("Trip to Cape Town, RSA"),
            Some("cape town")
        );
        assert_eq!(
            tariff.match_long_distance_key("King Shaka Airport, DURBAN, KwaZulu-Natal"),
            Some("durban")
        );
    }

    #[test]
    fn matches_across_comma_and_spacing() {
        let tariff = Tariff::default();

        assert_eq!(
            tariff.match_long_distance_key("Cape,Town"),
            Some("cape town")
        );
        assert_eq!(
            tariff.match_long_distance_key("cape\n  town"),
            Some("cape town")
        );
    }

    #[test]
    fn unlisted_place_has_no_match() {
        let tariff = Tariff::default();

        assert_eq!(tariff.match_long_distance_key("Somewhere unlisted"), None);
        assert_eq!(tariff.match_long_distance_key(""), None);
        assert_eq!(tariff.match_long_distance_key(" , ,"), None);
    }

    #[test]
    fn first_declared_place_wins() {
        let tariff = Tariff::default();

        // nelspruit is declared before mbombela
        assert_eq!(
            tariff.match_long_distance_key("Mbombela (Nelspruit)"),
            Some("nelspruit")
        );
        // durban is declared before maputo
        assert_eq!(
            tariff.match_long_distance_key("Maputo via Durban"),
            Some("durban")
        );
    }
}
