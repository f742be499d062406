/// Display form of a WMO weather code.
/// See: https://open-meteo.com/en/docs#weathervariables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCode {
    pub label: &'static str,
    pub icon: &'static str,
}

impl WeatherCode {
    pub const UNKNOWN: WeatherCode = WeatherCode { label: "不明", icon: "❓" };

    /// `"☀️ 快晴"`
    pub fn display(&self) -> String {
        format!("{} {}", self.icon, self.label)
    }
}

const TABLE: [(i32, WeatherCode); 28] = [
    (0, WeatherCode { label: "快晴", icon: "☀️" }),
    (1, WeatherCode { label: "晴れ", icon: "🌤️" }),
    (2, WeatherCode { label: "一部曇り", icon: "⛅" }),
    (3, WeatherCode { label: "曇り", icon: "☁️" }),
    (45, WeatherCode { label: "霧", icon: "🌫️" }),
    (48, WeatherCode { label: "着氷性の霧", icon: "🌫️" }),
    (51, WeatherCode { label: "弱い霧雨", icon: "🌦️" }),
    (53, WeatherCode { label: "霧雨", icon: "🌦️" }),
    (55, WeatherCode { label: "強い霧雨", icon: "🌧️" }),
    (56, WeatherCode { label: "弱い着氷性の霧雨", icon: "🌧️" }),
    (57, WeatherCode { label: "強い着氷性の霧雨", icon: "🌧️" }),
    (61, WeatherCode { label: "弱い雨", icon: "🌦️" }),
    (63, WeatherCode { label: "雨", icon: "🌧️" }),
    (65, WeatherCode { label: "強い雨", icon: "🌧️" }),
    (66, WeatherCode { label: "弱い着氷性の雨", icon: "🌨️" }),
    (67, WeatherCode { label: "強い着氷性の雨", icon: "🌨️" }),
    (71, WeatherCode { label: "弱い雪", icon: "🌨️" }),
    (73, WeatherCode { label: "雪", icon: "🌨️" }),
    (75, WeatherCode { label: "強い雪", icon: "❄️" }),
    (77, WeatherCode { label: "霧雪", icon: "🌨️" }),
    (80, WeatherCode { label: "弱いにわか雨", icon: "🌦️" }),
    (81, WeatherCode { label: "にわか雨", icon: "🌧️" }),
    (82, WeatherCode { label: "激しいにわか雨", icon: "⛈️" }),
    (85, WeatherCode { label: "弱いにわか雪", icon: "🌨️" }),
    (86, WeatherCode { label: "強いにわか雪", icon: "❄️" }),
    (95, WeatherCode { label: "雷雨", icon: "⛈️" }),
    (96, WeatherCode { label: "雷雨（弱いひょう）", icon: "⛈️" }),
    (99, WeatherCode { label: "雷雨（強いひょう）", icon: "⛈️" }),
];

/// Look up a WMO code. Codes outside the table map to [`WeatherCode::UNKNOWN`].
pub fn translate(code: i32) -> WeatherCode {
    TABLE
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, wc)| *wc)
        .unwrap_or(WeatherCode::UNKNOWN)
}

/// All codes with a dedicated label, in ascending order.
pub fn known_codes() -> impl Iterator<Item = i32> {
    TABLE.iter().map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn clear_sky() {
        let wc = translate(0);
        assert_eq!(wc.label, "快晴");
        assert_eq!(wc.display(), "☀️ 快晴");
    }

    #[test]
    fn every_documented_code_has_its_own_entry() {
        let codes: Vec<i32> = known_codes().collect();
        assert_eq!(codes.len(), 28);
        assert_eq!(
            codes,
            vec![
                0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80,
                81, 82, 85, 86, 95, 96, 99
            ]
        );

        for code in known_codes() {
            assert_ne!(translate(code), WeatherCode::UNKNOWN, "code {code}");
        }

        let labels: HashSet<&str> = known_codes().map(|c| translate(c).label).collect();
        assert_eq!(labels.len(), 28, "labels must be distinct");
    }

    #[test]
    fn intensity_gradations() {
        assert_eq!(translate(61).label, "弱い雨");
        assert_eq!(translate(63).label, "雨");
        assert_eq!(translate(65).label, "強い雨");
        assert_eq!(translate(99).label, "雷雨（強いひょう）");
    }

    #[test]
    fn undocumented_codes_are_unknown() {
        assert_eq!(translate(1000), WeatherCode::UNKNOWN);
        assert_eq!(translate(-1), WeatherCode::UNKNOWN);
        assert_eq!(translate(4), WeatherCode::UNKNOWN);
        assert_eq!(translate(1000).display(), "❓ 不明");
    }
}
