// =============================================================================
// REGIONS
// =============================================================================

/// Province collections, in the order every province-wide pass walks them
pub const PROVINCES: [&str; 17] = [
    "서울특별시",
    "부산광역시",
    "강원도",
    "대구광역시",
    "인천광역시",
    "광주광역시",
    "대전광역시",
    "울산광역시",
    "세종특별자치시",
    "경기도",
    "충청북도",
    "충청남도",
    "전라북도",
    "전라남도",
    "경상북도",
    "경상남도",
    "제주특별자치도",
];

/// Province aggregated as a single unit in the municipality view
pub const SPECIAL_CITY: &str = "서울특별시";

/// Cities whose districts are folded into one entry on the municipality map.
/// A district belongs to the first city whose name it contains.
pub const MERGE_CITIES: [&str; 10] = [
    "용인", "수원", "성남", "청주", "천안", "전주", "창원", "안양", "고양", "안산",
];

pub const CITY_SUFFIX: &str = "시";

/// `[total, bucket1..bucket5]`
pub const COUNTER_LEN: usize = 6;

pub const DETAIL_BUCKETS: u8 = 5;

// =============================================================================
// RANKING
// =============================================================================

pub const RANKING_LIMIT: usize = 20;

/// Temperature considered "normal" when ranking by closeness
pub const NORMAL_TEMPERATURE_C: f64 = 20.0;

// =============================================================================
// RECOMMENDATIONS
// =============================================================================

pub const RECOMMENDATION_DOC_SUFFIX: &str = "_추천";

/// Share of selections that ignore popularity and pick uniformly
pub const EXPLORATION_RATE: f64 = 0.1;

/// Round id used when the client does not send one
pub const DEFAULT_ROUND_ID: &str = "default";
