//! Venue table for the art week: official venues, gallery-night districts
//! and a handful of neighbourhoods, plus free-text alias resolution.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Canonical (Korean) name, also the lookup key
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// Name shown on map pins
    pub display_name: &'static str,
    pub category: &'static str,
}

const fn loc(
    name: &'static str,
    latitude: f64,
    longitude: f64,
    display_name: &'static str,
    category: &'static str,
) -> Location {
    Location {
        name,
        latitude,
        longitude,
        display_name,
        category,
    }
}

pub const OFFICIAL_VENUE: &str = "공식 행사장";

pub static LOCATIONS: &[Location] = &[
    loc("코엑스", 37.5116828, 127.059151, "COEX", OFFICIAL_VENUE),
    loc("프리즈서울", 37.5116828, 127.059151, "Frieze Seoul", OFFICIAL_VENUE),
    loc("키아프", 37.5116828, 127.059151, "KIAF", OFFICIAL_VENUE),
    loc("도산공원", 37.5244813, 127.0353667, "Dosan Park", OFFICIAL_VENUE),
    // 을지로 나이트
    loc("양혜규스튜디오", 37.5761171, 126.9995683, "Yanghyegyu Studio", "을지로"),
    // 한남 나이트
    loc("바크", 37.5428516, 127.0031988, "BHAK", "한남"),
    loc("갤러리SP", 37.5382689, 126.9942755, "Gallery SP", "한남"),
    loc("갤러리조은", 37.5380256, 127.0006167, "Gallery Joeun", "한남"),
    loc("가나아트한남", 37.5266211, 126.9957442, "Gana Art Hannam", "한남"),
    loc("리만머핀", 37.5349456, 126.997578, "Lehmann Maupin", "한남"),
    loc("에스더쉬퍼", 37.54353, 127.0024031, "Esther Schipper", "한남"),
    loc("타데우스로팍", 37.5368135, 127.0127126, "Thaddeus Ropac Seoul", "한남"),
    loc("갤러리바톤", 37.5364166, 127.012126, "Gallery Baton", "한남"),
    loc("디스위켄드룸", 37.54344, 127.0030903, "This Weekend Room", "한남"),
    loc("조현화랑", 37.5558403, 127.0054318, "Johyun Gallery", "한남"),
    loc("P21", 37.5401115, 126.9939098, "P21", "한남"),
    loc("실린더2", 37.5311286, 126.9716807, "Cylinder2", "한남"),
    loc("두아르트", 37.535449, 127.0102429, "Deux Arts", "한남"),
    // 청담 나이트
    loc("갤러리가이아", 37.5249303, 127.0482668, "Gallery Gaia", "청담"),
    loc("갤러리그라프", 37.5299928, 127.0536057, "Gallery Graph", "청담"),
    loc("김리아갤러리", 37.5263856, 127.0422348, "Kim Rhea Gallery", "청담"),
    loc("갤러리피치", 37.52502, 127.04836, "Gallery Peach", "청담"),
    loc("갤러리플래닛", 37.5288088, 127.0395477, "Gallery Planet", "청담"),
    loc("갤러리위청담", 37.5251373, 127.0440522, "Gallery We Cheongdam", "청담"),
    loc("글래드스톤갤러리", 37.5235149, 127.0476853, "Gladstone Gallery Seoul", "청담"),
    loc("화이트큐브서울", 37.5251142, 127.0412635, "White Cube Seoul", "청담"),
    loc("페로탕", 37.523851, 127.0385823, "Perrotin", "청담"),
    loc("G갤러리", 37.5277917, 127.0451072, "G Gallery", "청담"),
    loc("이유진갤러리", 37.5279669, 127.0485834, "Lee Eugean Gallery", "청담"),
    loc("송은아트스페이스", 37.526215, 127.0471125, "Song-eun Art Space", "청담"),
    loc("아뜰리에에르메스", 37.5236899, 127.0360833, "Atelier Hermes", "청담"),
    loc("갤러리사이먼", 37.5259302, 127.0459896, "Gallery Simon", "청담"),
    loc("갤러리라벨", 37.5213419, 127.0406271, "Gallery Ravel", "청담"),
    loc("갤러리도스", 37.526265, 127.0484457, "Gallery DOS", "청담"),
    loc("갤러리마크", 37.5305638, 127.0390565, "Gallery Mark", "청담"),
    // 삼청 나이트
    loc("국제갤러리", 37.5802, 126.9749, "Kukje Gallery", "삼청"),
    loc("갤러리진선", 37.5775848, 126.9804062, "Gallery Jinsun", "삼청"),
    loc("예화랑", 37.5797718, 126.9824513, "Yehwa Gallery", "삼청"),
    loc("우손갤러리", 37.577931, 126.9809031, "Woosun Gallery", "삼청"),
    loc("이화익갤러리", 37.5794033, 126.9820844, "Lee Hwa Ik Gallery", "삼청"),
    loc("초이앤초이갤러리", 37.5783798, 126.9817695, "Choi & Choi Gallery", "삼청"),
    loc("갤러리현대", 37.5789, 126.9770, "Gallery Hyundai", "삼청"),
    loc("학고재", 37.5794068, 126.9799879, "Hakgojae", "삼청"),
    loc("바라캇컨템포러리", 37.5788088, 126.9811406, "Barakat Contemporary", "삼청"),
    loc("백아트", 37.5788, 126.98126, "BAIK ART", "삼청"),
    loc("갤러리조선", 37.5770208, 126.982322, "Gallery Chosun", "삼청"),
    loc("아라리오갤러리", 37.5797018, 126.9825973, "Arario Gallery", "삼청"),
    loc("아트선재센터", 37.5363, 126.9747, "Art Sonje Center", "삼청"),
    loc("여재단", 37.5772373, 126.9807562, "Yeo Foundation", "삼청"),
    loc("전혁림", 37.5772055, 126.9810493, "Jeon Hyeok Lim", "삼청"),
    loc("우양미술관", 37.5813379, 126.9790324, "Wooyang Museum", "삼청"),
    loc("PKM갤러리", 37.5794, 126.9742, "PKM Gallery", "삼청"),
    loc("아트사이드갤러리", 37.5776844, 126.9807936, "Artside Gallery", "삼청"),
    loc("갤러리인", 37.5765907, 126.9819523, "Gallery IN", "삼청"),
    loc("아트파크", 37.5770825, 126.9820896, "Art Park", "삼청"),
    // 기타
    loc("리움미술관", 37.5384, 126.9990, "Leeum Museum", "기타"),
    loc("페이스갤러리", 37.5372, 127.0018, "Pace Gallery", "기타"),
    loc("가나아트센터", 37.5731, 126.9719, "Gana Art Center", "기타"),
    loc("대림미술관", 37.556885, 126.9176883, "Daelim Museum", "기타"),
    loc("K현대미술관", 37.5722388, 127.005175, "K Museum of Contemporary Art", "기타"),
    loc("인사아트센터", 37.5738238, 126.9879593, "Insa Art Center", "기타"),
    // 지역
    loc("삼청동", 37.5830, 126.9830, "Samcheong-dong", "지역"),
    loc("한남동", 37.5345, 127.0045, "Hannam-dong", "지역"),
    loc("성수동", 37.5447, 127.0557, "Seongsu-dong", "지역"),
];

/// Canonical name → free-text spellings visitors actually type.
/// Order matters: the first entry that matches wins.
pub static ALIASES: &[(&str, &[&str])] = &[
    ("코엑스", &["coex", "코액스", "삼성역", "프리즈", "frieze"]),
    ("프리즈서울", &["frieze seoul", "프리즈 서울"]),
    ("키아프", &["kiaf", "kiaf seoul"]),
    ("도산공원", &["도산", "dosan"]),
    ("바크", &["bhak", "박"]),
    ("갤러리SP", &["sp", "에스피"]),
    ("가나아트한남", &["가나", "가나아트", "gana"]),
    ("에스더쉬퍼", &["esther", "에스터", "schipper", "쉬퍼"]),
    ("타데우스로팍", &["thaddeus", "타데우스", "ropac", "로팍"]),
    ("갤러리바톤", &["바톤", "baton"]),
    ("디스위켄드룸", &["디스위켄드", "this weekend", "위켄드룸"]),
    ("조현화랑", &["조현", "johyun"]),
    ("갤러리가이아", &["가이아", "gaia"]),
    ("갤러리그라프", &["graph", "그래프"]),
    ("김리아갤러리", &["김리아", "kim rhea"]),
    ("글래드스톤갤러리", &["gladstone", "글래드스톤"]),
    ("화이트큐브서울", &["white cube", "화이트큐브", "화큐"]),
    ("페로탕", &["perrotin"]),
    ("송은아트스페이스", &["송은", "songeun", "송은아트"]),
    ("아뜰리에에르메스", &["hermes", "에르메스", "아뜰리에"]),
    ("국제갤러리", &["국제", "kukje", "kukje gallery", "국제 갤러리"]),
    ("갤러리현대", &["현대갤러리", "gallery hyundai", "현대"]),
    ("학고재", &["hakgojae", "학고재갤러리"]),
    ("바라캇컨템포러리", &["바라캇", "barakat"]),
    ("백아트", &["baik", "baik art"]),
    ("아라리오갤러리", &["아라리오", "arario"]),
    ("아트선재센터", &["아트선재", "art sonje", "선재"]),
    ("리움미술관", &["리움", "leeum", "삼성미술관"]),
    ("페이스갤러리", &["pace", "페이스", "pace gallery"]),
    ("PKM갤러리", &["pkm", "피케이엠"]),
    ("삼청동", &["삼청", "삼청동길", "북촌"]),
    ("한남동", &["한남", "이태원"]),
    ("성수동", &["성수", "뚝섬"]),
];

/// Looks up a venue by its canonical name.
pub fn find(name: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|l| l.name == name)
}

/// Resolves free text ("coex", " 화큐 ", "국제 갤러리") to a venue.
///
/// Exact matches (canonical names, then aliases) win over substring
/// matches; substring matching only considers the alias table, in order.
pub fn resolve(input: &str) -> Option<&'static Location> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(found) = LOCATIONS.iter().find(|l| l.name.to_lowercase() == needle) {
        return Some(found);
    }

    let spellings = |canonical: &'static str, aliases: &'static [&'static str]| {
        std::iter::once(canonical).chain(aliases.iter().copied())
    };

    let exact = ALIASES.iter().find(|&&(canonical, aliases)| {
        spellings(canonical, aliases).any(|s| s.to_lowercase() == needle)
    });
    let matched = exact.or_else(|| {
        ALIASES.iter().find(|&&(canonical, aliases)| {
            spellings(canonical, aliases).any(|s| {
                let s = s.to_lowercase();
                s.contains(&needle) || needle.contains(&s)
            })
        })
    })?;

    find(matched.0)
}

/// Venue names grouped by category, in table order within each group.
pub fn by_category() -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut groups: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for location in LOCATIONS {
        groups.entry(location.category).or_default().push(location.name);
    }
    groups
}
