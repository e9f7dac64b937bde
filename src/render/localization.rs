//! Display strings per language.

use crate::models::LanguageCode;

/// Every localized string the client shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageStrings {
    pub heading: &'static str,
    pub selector_label: &'static str,
    pub attractions_header: &'static str,
    pub places_header: &'static str,
    pub attractions_fallback: &'static str,
    pub places_fallback: &'static str,
}

const KO: LanguageStrings = LanguageStrings {
    heading: "지역 기반 날씨 및 추천 서비스",
    selector_label: "언어:",
    attractions_header: "가볼만한 곳",
    places_header: "근처 맛집",
    attractions_fallback: "명소 정보를 가져오는 데 실패했습니다.",
    places_fallback: "맛집 정보를 가져오는 데 실패했습니다.",
};

const EN: LanguageStrings = LanguageStrings {
    heading: "Regional Weather and Recommendation Service",
    selector_label: "Language:",
    attractions_header: "Recommended Attractions",
    places_header: "Nearby Restaurants",
    attractions_fallback: "Failed to retrieve attraction information.",
    places_fallback: "Failed to retrieve restaurant information.",
};

const JA: LanguageStrings = LanguageStrings {
    heading: "地域の天気とおすすめサービス",
    selector_label: "言語:",
    attractions_header: "おすすめの観光地",
    places_header: "近くのレストラン",
    attractions_fallback: "観光地情報を取得できませんでした。",
    places_fallback: "レストラン情報を取得できませんでした。",
};

const ZH: LanguageStrings = LanguageStrings {
    heading: "地区天气与推荐服务",
    selector_label: "语言:",
    attractions_header: "推荐景点",
    places_header: "附近的餐厅",
    attractions_fallback: "无法获取景点信息。",
    places_fallback: "无法获取餐厅信息。",
};

const RU: LanguageStrings = LanguageStrings {
    heading: "Региональная служба погоды и рекомендаций",
    selector_label: "Язык:",
    attractions_header: "Рекомендуемые достопримечательности",
    places_header: "Ближайшие рестораны",
    attractions_fallback: "Не удалось получить информацию о достопримечательностях.",
    places_fallback: "Не удалось получить информацию о ресторанах.",
};

/// Look up the strings for a language.
pub fn strings(language: LanguageCode) -> &'static LanguageStrings {
    match language {
        LanguageCode::Ko => &KO,
        LanguageCode::En => &EN,
        LanguageCode::Ja => &JA,
        LanguageCode::Zh => &ZH,
        LanguageCode::Ru => &RU,
    }
}
