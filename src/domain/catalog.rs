//! Catalog helpers for restaurant lists, menus, reviews and account forms.

use std::cmp::Ordering;

use super::errors::{DomainError, DomainResult};
use super::filters::SortBy;
use super::models::{LoginPayload, MenuItem, MenuKind, RegisterPayload, Restaurant, Review, ReviewPayload};

/// Orders the currently loaded page of restaurants. The sort is stable.
pub fn sort_restaurants(restaurants: &mut [Restaurant], sort_by: SortBy) {
    match sort_by {
        SortBy::RatingDesc => {
            restaurants.sort_by(|a, b| b.star.partial_cmp(&a.star).unwrap_or(Ordering::Equal))
        }
        SortBy::PriceAsc => restaurants.sort_by_key(|r| r.price_range.min),
        SortBy::PriceDesc => restaurants.sort_by(|a, b| b.price_range.max.cmp(&a.price_range.max)),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuTab {
    #[default]
    All,
    Food,
    Drink,
}

impl MenuTab {
    pub fn label(&self) -> &'static str {
        match self {
            MenuTab::All => "All Menu",
            MenuTab::Food => "Food",
            MenuTab::Drink => "Drink",
        }
    }

    pub fn next(&self) -> MenuTab {
        match self {
            MenuTab::All => MenuTab::Food,
            MenuTab::Food => MenuTab::Drink,
            MenuTab::Drink => MenuTab::All,
        }
    }

    fn admits(&self, kind: MenuKind) -> bool {
        match self {
            MenuTab::All => true,
            MenuTab::Food => kind == MenuKind::Food,
            MenuTab::Drink => kind == MenuKind::Drink,
        }
    }
}

pub fn filter_menu(menus: &[MenuItem], tab: MenuTab) -> Vec<&MenuItem> {
    menus.iter().filter(|menu| tab.admits(menu.kind)).collect()
}

/// Reviews of one restaurant gathered across "load more" pages.
///
/// Pages are merged by review id: a review seen again replaces the earlier
/// copy in place, new reviews are appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFeed {
    restaurant_id: Option<String>,
    reviews: Vec<Review>,
    page: u32,
    total_pages: u32,
}

impl ReviewFeed {
    pub fn restaurant_id(&self) -> Option<&str> {
        self.restaurant_id.as_deref()
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Starts over for a different restaurant; a no-op for the same one.
    pub fn reset_for(&mut self, restaurant_id: &str) {
        if self.restaurant_id.as_deref() != Some(restaurant_id) {
            *self = Self {
                restaurant_id: Some(restaurant_id.to_string()),
                ..Self::default()
            };
        }
    }

    /// Page number to request next.
    pub fn next_page(&self) -> u32 {
        self.page + 1
    }

    pub fn can_load_more(&self) -> bool {
        self.page == 0 || self.page < self.total_pages
    }

    pub fn merge_page(&mut self, page: u32, total_pages: Option<u32>, incoming: Vec<Review>) {
        for review in incoming {
            match self.reviews.iter_mut().find(|r| r.id == review.id) {
                Some(existing) => *existing = review,
                None => self.reviews.push(review),
            }
        }
        self.page = self.page.max(page);
        self.total_pages = total_pages.unwrap_or(1);
    }

    pub fn average_star(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.star)).sum();
        f64::from(sum) / self.reviews.len() as f64
    }
}

pub const DEFAULT_REVIEW_STAR: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub star: u8,
    pub comment: String,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            star: DEFAULT_REVIEW_STAR,
            comment: String::new(),
        }
    }
}

impl ReviewDraft {
    pub fn can_send(&self) -> bool {
        (1..=5).contains(&self.star) && !self.comment.trim().is_empty()
    }

    pub fn into_payload(self, transaction_id: &str, restaurant_id: &str) -> DomainResult<ReviewPayload> {
        if !self.can_send() {
            return Err(DomainError::IncompleteReview);
        }
        Ok(ReviewPayload {
            transaction_id: transaction_id.to_string(),
            restaurant_id: restaurant_id.to_string(),
            star: self.star,
            comment: self.comment.trim().to_string(),
        })
    }
}

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> DomainResult<LoginPayload> {
        require(&self.email, "Email is required")?;
        require(&self.password, "Password is required")?;
        Ok(LoginPayload {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> DomainResult<RegisterPayload> {
        require(&self.name, "Name is required")?;
        require(&self.email, "Email is required")?;
        require(&self.phone, "Phone is required")?;
        require(&self.password, "Password is required")?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::InvalidForm(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(RegisterPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            phone: Some(self.phone.trim().to_string()),
        })
    }
}

fn require(value: &str, message: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        Err(DomainError::InvalidForm(message.to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PriceRange, ReviewUser};

    fn resto(id: &str, star: f64, min: u64, max: u64) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: format!("Resto {}", id),
            star,
            place: String::new(),
            logo: String::new(),
            images: Vec::new(),
            category: "burger".to_string(),
            review_count: 0,
            menu_count: 0,
            price_range: PriceRange { min, max },
            distance: 1.0,
        }
    }

    fn review(id: u64, star: u8, comment: &str) -> Review {
        Review {
            id,
            star,
            comment: comment.to_string(),
            transaction_id: format!("tx-{}", id),
            created_at: String::new(),
            user: ReviewUser {
                id: 1,
                name: "Budi".to_string(),
                avatar: None,
            },
            menus: Vec::new(),
        }
    }

    fn ids(restaurants: &[Restaurant]) -> Vec<&str> {
        restaurants.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_sort_restaurants() {
        let mut list = vec![resto("a", 4.1, 20_000, 80_000), resto("b", 4.9, 10_000, 50_000), resto("c", 3.0, 30_000, 120_000)];

        sort_restaurants(&mut list, SortBy::RatingDesc);
        assert_eq!(ids(&list), vec!["b", "a", "c"]);

        sort_restaurants(&mut list, SortBy::PriceAsc);
        assert_eq!(ids(&list), vec!["b", "a", "c"]);

        sort_restaurants(&mut list, SortBy::PriceDesc);
        assert_eq!(ids(&list), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_filter_menu_by_tab() {
        let menus: Vec<MenuItem> = serde_json::from_str(
            r#"[
                { "id": 1, "foodName": "Burger", "price": 30000, "type": "food" },
                { "id": 2, "foodName": "Cola", "price": 8000, "type": "drink" },
                { "id": 3, "foodName": "Fries", "price": 12000, "type": "food" }
            ]"#,
        )
        .unwrap();

        assert_eq!(filter_menu(&menus, MenuTab::All).len(), 3);
        assert_eq!(filter_menu(&menus, MenuTab::Food).len(), 2);
        assert_eq!(filter_menu(&menus, MenuTab::Drink)[0].food_name, "Cola");
        assert_eq!(MenuTab::Drink.next(), MenuTab::All);
    }

    #[test]
    fn test_review_feed_merges_pages_by_id() {
        let mut feed = ReviewFeed::default();
        feed.reset_for("296");
        assert!(feed.can_load_more());
        assert_eq!(feed.next_page(), 1);

        feed.merge_page(1, Some(2), vec![review(1, 5, "enak"), review(2, 3, "ok")]);
        assert_eq!(feed.page(), 1);
        assert!(feed.can_load_more());

        feed.merge_page(2, Some(2), vec![review(2, 4, "ok lah"), review(3, 4, "mantap")]);
        assert_eq!(feed.reviews().len(), 3);
        assert_eq!(feed.reviews()[1].comment, "ok lah");
        assert!(!feed.can_load_more());
        assert_eq!(feed.total_pages(), 2);
        assert!((feed.average_star() - 13.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_review_feed_resets_on_restaurant_change() {
        let mut feed = ReviewFeed::default();
        feed.reset_for("1");
        feed.merge_page(1, None, vec![review(1, 5, "x")]);

        feed.reset_for("1");
        assert_eq!(feed.reviews().len(), 1);

        feed.reset_for("2");
        assert!(feed.reviews().is_empty());
        assert_eq!(feed.restaurant_id(), Some("2"));
        assert_eq!(feed.average_star(), 0.0);
    }

    #[test]
    fn test_review_draft() {
        let draft = ReviewDraft::default();
        assert_eq!(draft.star, 4);
        assert!(!draft.can_send());

        let draft = ReviewDraft {
            star: 5,
            comment: "  Mantap!  ".to_string(),
        };
        let payload = draft.into_payload("tx-9", "296").unwrap();
        assert_eq!(payload.comment, "Mantap!");
        assert_eq!(payload.star, 5);

        let bad = ReviewDraft {
            star: 0,
            comment: "hmm".to_string(),
        };
        assert_eq!(bad.into_payload("tx", "1"), Err(DomainError::IncompleteReview));
    }

    #[test]
    fn test_login_form_validation() {
        let form = LoginForm {
            email: " ".to_string(),
            password: "x".to_string(),
        };
        assert!(matches!(form.validate(), Err(DomainError::InvalidForm(ref m)) if m == "Email is required"));

        let form = LoginForm {
            email: " budi@mail.com ".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(form.validate().unwrap().email, "budi@mail.com");
    }

    #[test]
    fn test_register_form_validation() {
        let mut form = RegisterForm {
            name: "Budi".to_string(),
            email: "budi@mail.com".to_string(),
            phone: "0812".to_string(),
            password: "12345".to_string(),
        };
        assert!(matches!(form.validate(), Err(DomainError::InvalidForm(ref m)) if m.contains("at least 6")));

        form.password = "123456".to_string();
        let payload = form.validate().unwrap();
        assert_eq!(payload.phone.as_deref(), Some("0812"));

        form.phone.clear();
        assert!(matches!(form.validate(), Err(DomainError::InvalidForm(ref m)) if m == "Phone is required"));
    }
}
