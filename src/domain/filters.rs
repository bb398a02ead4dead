//! Restaurant filter store.
//!
//! Holds the raw UI selections. Nothing is validated here: price bounds stay
//! as typed strings and are only parsed when a [`RestaurantQuery`] is built.

use std::fmt;
use std::str::FromStr;

use super::errors::DomainError;

pub const DEFAULT_CATEGORY: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    RatingDesc,
    PriceAsc,
    PriceDesc,
}

impl SortBy {
    pub const ALL: [SortBy; 3] = [SortBy::RatingDesc, SortBy::PriceAsc, SortBy::PriceDesc];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::RatingDesc => "rating-desc",
            SortBy::PriceAsc => "price-asc",
            SortBy::PriceDesc => "price-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::RatingDesc => "Highest rating",
            SortBy::PriceAsc => "Lowest price",
            SortBy::PriceDesc => "Highest price",
        }
    }

    /// The next order in display sequence, wrapping around.
    pub fn next(&self) -> SortBy {
        match self {
            SortBy::RatingDesc => SortBy::PriceAsc,
            SortBy::PriceAsc => SortBy::PriceDesc,
            SortBy::PriceDesc => SortBy::RatingDesc,
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| DomainError::UnknownSortOrder(s.to_string()))
    }
}

/// Named distance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    Nearby,
    OneKm,
    ThreeKm,
    FiveKm,
}

impl Distance {
    pub const ALL: [Distance; 4] = [Distance::Nearby, Distance::OneKm, Distance::ThreeKm, Distance::FiveKm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Distance::Nearby => "nearby",
            Distance::OneKm => "1km",
            Distance::ThreeKm => "3km",
            Distance::FiveKm => "5km",
        }
    }

    /// Numeric `range` parameter sent to the API, in kilometres.
    pub fn range_km(&self) -> u32 {
        match self {
            Distance::Nearby | Distance::OneKm => 1,
            Distance::ThreeKm => 3,
            Distance::FiveKm => 5,
        }
    }

    /// Cycles nearby → 1km → 3km → 5km → none → nearby.
    pub fn cycle(current: Option<Distance>) -> Option<Distance> {
        match current {
            None => Some(Distance::Nearby),
            Some(Distance::Nearby) => Some(Distance::OneKm),
            Some(Distance::OneKm) => Some(Distance::ThreeKm),
            Some(Distance::ThreeKm) => Some(Distance::FiveKm),
            Some(Distance::FiveKm) => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distance {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Distance::ALL
            .into_iter()
            .find(|distance| distance.as_str() == s)
            .ok_or_else(|| DomainError::UnknownDistance(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub drawer_open: bool,
    pub category: String,
    pub sort_by: SortBy,
    pub search: String,
    pub distance: Option<Distance>,
    pub price_min: String,
    pub price_max: String,
    pub rating: Option<u8>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            drawer_open: false,
            category: DEFAULT_CATEGORY.to_string(),
            sort_by: SortBy::default(),
            search: String::new(),
            distance: Some(Distance::Nearby),
            price_min: String::new(),
            price_max: String::new(),
            rating: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    Open,
    Close,
    Toggle,
    SetCategory(String),
    SetSortBy(SortBy),
    SetSearch(String),
    SetDistance(Option<Distance>),
    SetPriceMin(String),
    SetPriceMax(String),
    SetRating(Option<u8>),
    Reset,
}

impl FilterState {
    pub fn apply(&mut self, action: FilterAction) {
        match action {
            FilterAction::Open => self.drawer_open = true,
            FilterAction::Close => self.drawer_open = false,
            FilterAction::Toggle => self.drawer_open = !self.drawer_open,
            FilterAction::SetCategory(category) => self.category = category,
            FilterAction::SetSortBy(sort_by) => self.sort_by = sort_by,
            FilterAction::SetSearch(search) => self.search = search,
            FilterAction::SetDistance(distance) => self.distance = distance,
            FilterAction::SetPriceMin(price) => self.price_min = price,
            FilterAction::SetPriceMax(price) => self.price_max = price,
            FilterAction::SetRating(rating) => self.rating = rating,
            FilterAction::Reset => *self = FilterState::default(),
        }
    }

    pub fn open(&mut self) {
        self.apply(FilterAction::Open);
    }

    pub fn close(&mut self) {
        self.apply(FilterAction::Close);
    }

    pub fn toggle(&mut self) {
        self.apply(FilterAction::Toggle);
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.apply(FilterAction::SetCategory(category.into()));
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.apply(FilterAction::SetSortBy(sort_by));
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.apply(FilterAction::SetSearch(search.into()));
    }

    pub fn set_distance(&mut self, distance: Option<Distance>) {
        self.apply(FilterAction::SetDistance(distance));
    }

    pub fn set_price_min(&mut self, price: impl Into<String>) {
        self.apply(FilterAction::SetPriceMin(price.into()));
    }

    pub fn set_price_max(&mut self, price: impl Into<String>) {
        self.apply(FilterAction::SetPriceMax(price.into()));
    }

    pub fn set_rating(&mut self, rating: Option<u8>) {
        self.apply(FilterAction::SetRating(rating));
    }

    pub fn reset(&mut self) {
        self.apply(FilterAction::Reset);
    }

    /// The `range` parameter derived from the distance bucket.
    pub fn range_km(&self) -> Option<u32> {
        self.distance.as_ref().map(Distance::range_km)
    }
}

/// Pure reducer over owned filter state.
pub fn reduce_filters(mut state: FilterState, action: FilterAction) -> FilterState {
    state.apply(action);
    state
}

/// Read parameters for the restaurant list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantQuery {
    pub location: Option<String>,
    pub range: Option<u32>,
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
    pub rating: Option<u8>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl RestaurantQuery {
    pub fn from_filters(filters: &FilterState, page: u32, limit: u32) -> Self {
        let category = Some(filters.category.trim())
            .filter(|c| !c.is_empty() && *c != DEFAULT_CATEGORY)
            .map(str::to_string);
        let search = Some(filters.search.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            location: None,
            range: filters.range_km(),
            price_min: parse_price(&filters.price_min),
            price_max: parse_price(&filters.price_max),
            rating: filters.rating,
            category,
            search,
            page,
            limit,
        }
    }

    /// Query-string pairs in a stable order; unset fields are omitted.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(location) = &self.location {
            pairs.push(("location", location.clone()));
        }
        if let Some(range) = self.range {
            pairs.push(("range", range.to_string()));
        }
        if let Some(price_min) = self.price_min {
            pairs.push(("priceMin", price_min.to_string()));
        }
        if let Some(price_max) = self.price_max {
            pairs.push(("priceMax", price_max.to_string()));
        }
        if let Some(rating) = self.rating {
            pairs.push(("rating", rating.to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("q", search.clone()));
        }
        if self.page > 0 {
            pairs.push(("page", self.page.to_string()));
        }
        if self.limit > 0 {
            pairs.push(("limit", self.limit.to_string()));
        }
        pairs
    }
}

fn parse_price(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let filters = FilterState::default();
        assert!(!filters.drawer_open);
        assert_eq!(filters.category, "all");
        assert_eq!(filters.sort_by, SortBy::RatingDesc);
        assert!(filters.search.is_empty());
        assert_eq!(filters.distance, Some(Distance::Nearby));
        assert!(filters.price_min.is_empty());
        assert!(filters.price_max.is_empty());
        assert_eq!(filters.rating, None);
    }

    #[test]
    fn test_distance_range_mapping() {
        assert_eq!(Distance::Nearby.range_km(), 1);
        assert_eq!(Distance::OneKm.range_km(), 1);
        assert_eq!(Distance::ThreeKm.range_km(), 3);
        assert_eq!(Distance::FiveKm.range_km(), 5);

        let mut filters = FilterState::default();
        filters.set_distance(Some(Distance::FiveKm));
        assert_eq!(filters.range_km(), Some(5));
        filters.set_distance(None);
        assert_eq!(filters.range_km(), None);
    }

    #[test]
    fn test_drawer_toggles() {
        let mut filters = FilterState::default();
        filters.toggle();
        assert!(filters.drawer_open);
        filters.toggle();
        assert!(!filters.drawer_open);
        filters.open();
        filters.open();
        assert!(filters.drawer_open);
        filters.close();
        assert!(!filters.drawer_open);
    }

    #[test]
    fn test_reset_restores_every_default() {
        let mut filters = FilterState::default();
        filters.open();
        filters.set_category("burger");
        filters.set_sort_by(SortBy::PriceDesc);
        filters.set_search("king");
        filters.set_distance(Some(Distance::ThreeKm));
        filters.set_price_min("1000");
        filters.set_price_max("90000");
        filters.set_rating(Some(4));

        filters.reset();
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn test_store_does_not_validate() {
        let mut filters = FilterState::default();
        filters.set_price_min("cheap");
        filters.set_rating(Some(9));
        assert_eq!(filters.price_min, "cheap");
        assert_eq!(filters.rating, Some(9));
    }

    #[test]
    fn test_reduce_filters() {
        let state = reduce_filters(FilterState::default(), FilterAction::SetCategory("pizza".to_string()));
        let state = reduce_filters(state, FilterAction::Toggle);
        assert_eq!(state.category, "pizza");
        assert!(state.drawer_open);

        let state = reduce_filters(state, FilterAction::Reset);
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_sort_and_distance_parse() {
        assert_eq!("price-asc".parse::<SortBy>(), Ok(SortBy::PriceAsc));
        assert_eq!("3km".parse::<Distance>(), Ok(Distance::ThreeKm));
        assert!(matches!("cheapest".parse::<SortBy>(), Err(DomainError::UnknownSortOrder(_))));
        assert!(matches!("10km".parse::<Distance>(), Err(DomainError::UnknownDistance(_))));
        assert_eq!(SortBy::PriceDesc.next(), SortBy::RatingDesc);
    }

    #[test]
    fn test_distance_cycle_includes_none() {
        let mut current = Some(Distance::Nearby);
        let mut seen = Vec::new();
        for _ in 0..5 {
            current = Distance::cycle(current);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Some(Distance::OneKm),
                Some(Distance::ThreeKm),
                Some(Distance::FiveKm),
                None,
                Some(Distance::Nearby),
            ]
        );
    }

    #[test]
    fn test_query_from_default_filters() {
        let query = RestaurantQuery::from_filters(&FilterState::default(), 1, 20);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("range", "1".to_string()),
                ("page", "1".to_string()),
                ("limit", "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_from_full_filters() {
        let mut filters = FilterState::default();
        filters.set_category("burger");
        filters.set_search("  king ");
        filters.set_distance(Some(Distance::FiveKm));
        filters.set_price_min("10000");
        filters.set_price_max(" 50000 ");
        filters.set_rating(Some(4));

        let query = RestaurantQuery::from_filters(&filters, 2, 10);
        assert_eq!(query.range, Some(5));
        assert_eq!(query.price_min, Some(10_000));
        assert_eq!(query.price_max, Some(50_000));
        assert_eq!(query.category.as_deref(), Some("burger"));
        assert_eq!(query.search.as_deref(), Some("king"));

        let keys: Vec<&str> = query.to_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["range", "priceMin", "priceMax", "rating", "category", "q", "page", "limit"]);
    }

    #[test]
    fn test_query_drops_unparsable_prices() {
        let mut filters = FilterState::default();
        filters.set_price_min("abc");
        filters.set_price_max("-5");
        filters.set_distance(None);

        let query = RestaurantQuery::from_filters(&filters, 1, 20);
        assert_eq!(query.price_min, None);
        assert_eq!(query.price_max, None);
        assert_eq!(query.range, None);
    }
}
