//! Application state management for the terminal storefront.
//!
//! [`App`] is the single state container: it owns the cart and filter stores,
//! the data last loaded from the API, and everything the UI needs to render.
//! The input handler mutates it through `&mut`, the renderer reads it through
//! `&`. API results are folded in with the `set_*_result` methods, where the
//! last successful response overwrites what is displayed.

use tracing::{debug, info, warn};

use crate::domain::{
    AuthData, Cart, CartAction, CartEvent, CartLine, CartLineInput, CheckoutSummary, FilterAction, FilterState,
    LineKey, LoginForm, LoginPayload, MenuItem, MenuTab, Order, OrderPage, OrderQuery, OrderStatus, Pagination,
    PaymentMethod, Profile, Receipt, RegisterForm, RegisterPayload, Restaurant, RestaurantDetail, RestaurantPage,
    RestaurantQuery, ReviewDraft, ReviewFeed, ReviewPage, ReviewPayload, User, DomainResult, DEFAULT_CATEGORY,
    filter_menu, group_by_restaurant, sort_restaurants,
};
use crate::infrastructure::{ApiError, ExportError};

pub const DEFAULT_EXPORT_FILENAME: &str = "orders.csv";

/// Top-level page being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Restaurants,
    Detail,
    Cart,
    Checkout,
    Receipt,
    Orders,
    Profile,
    Login,
}

/// Determines how key presses are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation and shortcuts
    Normal,
    /// Help popup is displayed
    Help,
    /// Typing the restaurant search text
    Search,
    /// Typing the category filter
    Category,
    /// Typing the minimum price
    PriceMin,
    /// Typing the maximum price
    PriceMax,
    /// Typing the order history keyword
    OrderSearch,
    /// Typing the CSV export filename
    ExportOrders,
    /// Filling in the login form
    Login,
    /// Filling in the registration form
    Register,
    /// Writing a review for an order
    Review,
}

impl AppMode {
    /// Modes that edit the shared single-line `input` buffer.
    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            AppMode::Search | AppMode::Category | AppMode::PriceMin | AppMode::PriceMax | AppMode::OrderSearch | AppMode::ExportOrders
        )
    }
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use tsfood::application::{App, Screen};
///
/// let app = App::default();
/// assert_eq!(app.screen, Screen::Restaurants);
/// assert!(app.cart.is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    /// Shopping cart store
    pub cart: Cart,
    /// Restaurant filter store
    pub filters: FilterState,
    /// Page being shown
    pub screen: Screen,
    /// Current input mode
    pub mode: AppMode,
    /// Single-line input buffer shared by the text input modes
    pub input: String,
    /// Byte offset of the cursor within the active buffer
    pub cursor_position: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Bearer token for authorized requests, kept in memory only
    pub token: Option<String>,
    pub user: Option<User>,
    pub profile: Option<Profile>,
    pub restaurants: Vec<Restaurant>,
    pub restaurant_pagination: Option<Pagination>,
    pub restaurant_page: u32,
    pub selected_restaurant: usize,
    pub detail: Option<RestaurantDetail>,
    pub menu_tab: MenuTab,
    pub selected_menu: usize,
    pub reviews: ReviewFeed,
    /// Index into the flattened cart lines
    pub selected_line: usize,
    /// Restaurant the checkout is scoped to; `None` checks out everything
    pub checkout_restaurant: Option<String>,
    pub payment_method: PaymentMethod,
    pub receipt: Option<Receipt>,
    pub orders: Vec<Order>,
    pub order_status: OrderStatus,
    pub order_search: String,
    pub selected_order: usize,
    pub review_draft: ReviewDraft,
    /// (transaction id, restaurant id) the review draft belongs to
    pub review_target: Option<(String, String)>,
    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    /// Focused field index within the login or register form
    pub form_field: usize,
    pub page_limit: u32,
    pub review_limit: u32,
}

impl Default for App {
    fn default() -> Self {
        Self::new(20, 5)
    }
}

impl App {
    pub fn new(page_limit: u32, review_limit: u32) -> Self {
        Self {
            cart: Cart::default(),
            filters: FilterState::default(),
            screen: Screen::Restaurants,
            mode: AppMode::Normal,
            input: String::new(),
            cursor_position: 0,
            status_message: None,
            help_scroll: 0,
            token: None,
            user: None,
            profile: None,
            restaurants: Vec::new(),
            restaurant_pagination: None,
            restaurant_page: 1,
            selected_restaurant: 0,
            detail: None,
            menu_tab: MenuTab::default(),
            selected_menu: 0,
            reviews: ReviewFeed::default(),
            selected_line: 0,
            checkout_restaurant: None,
            payment_method: PaymentMethod::default(),
            receipt: None,
            orders: Vec::new(),
            order_status: OrderStatus::Done,
            order_search: String::new(),
            selected_order: 0,
            review_draft: ReviewDraft::default(),
            review_target: None,
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            form_field: 0,
            page_limit,
            review_limit,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn go_to(&mut self, screen: Screen) {
        debug!(?screen, "Navigating");
        self.screen = screen;
        self.mode = AppMode::Normal;
    }

    // ----- cart -----

    /// Runs the cart reducer and reports the outcome in the status bar.
    pub fn dispatch_cart(&mut self, action: CartAction) -> CartEvent {
        let event = self.cart.apply(action);
        match &event {
            CartEvent::Inserted(line) => {
                self.status_message = Some(format!("Added {} to cart", line.name));
            }
            CartEvent::Updated(line) => {
                self.status_message = Some(format!("{} × {}", line.name, line.quantity));
            }
            CartEvent::Removed(line) => {
                self.status_message = Some(format!("Removed {} from cart", line.name));
            }
            CartEvent::Cleared(count) => {
                self.status_message = Some(format!("Removed {} cart line(s)", count));
            }
            CartEvent::Unchanged => {}
        }
        debug!(?event, lines = self.cart.lines().len(), "Cart updated");
        self.clamp_cart_selection();
        event
    }

    /// Cart lines in the order the cart screen lists them (grouped by restaurant).
    pub fn ordered_cart_lines(&self) -> Vec<&CartLine> {
        group_by_restaurant(self.cart.lines())
            .into_iter()
            .flat_map(|group| group.lines)
            .collect()
    }

    /// Lines visible on the current screen: checkout shows only its scope.
    pub fn visible_cart_lines(&self) -> Vec<&CartLine> {
        match (self.screen, self.checkout_restaurant.as_deref()) {
            (Screen::Checkout, Some(id)) => self.cart.lines_for(id).collect(),
            _ => self.ordered_cart_lines(),
        }
    }

    pub fn selected_cart_line(&self) -> Option<&CartLine> {
        self.visible_cart_lines().get(self.selected_line).copied()
    }

    pub fn increase_selected_line(&mut self) -> CartEvent {
        match self.selected_cart_line().map(CartLine::key) {
            Some(key) => self.dispatch_cart(CartAction::Increase(key)),
            None => CartEvent::Unchanged,
        }
    }

    pub fn decrease_selected_line(&mut self) -> CartEvent {
        match self.selected_cart_line().map(CartLine::key) {
            Some(key) => self.dispatch_cart(CartAction::Decrease(key)),
            None => CartEvent::Unchanged,
        }
    }

    pub fn clear_selected_restaurant(&mut self) -> CartEvent {
        match self.selected_cart_line().map(|line| line.restaurant_id.clone()) {
            Some(restaurant_id) => self.dispatch_cart(CartAction::ClearRestaurant(restaurant_id)),
            None => CartEvent::Unchanged,
        }
    }

    fn clamp_cart_selection(&mut self) {
        let len = self.visible_cart_lines().len();
        self.selected_line = self.selected_line.min(len.saturating_sub(1));
    }

    // ----- filters -----

    pub fn dispatch_filter(&mut self, action: FilterAction) {
        debug!(?action, "Filter updated");
        let affects_query = !matches!(action, FilterAction::Open | FilterAction::Close | FilterAction::Toggle);
        let resort = matches!(action, FilterAction::SetSortBy(_) | FilterAction::Reset);
        self.filters.apply(action);
        if affects_query {
            self.restaurant_page = 1;
        }
        if resort {
            sort_restaurants(&mut self.restaurants, self.filters.sort_by);
        }
    }

    pub fn restaurant_query(&self) -> RestaurantQuery {
        RestaurantQuery::from_filters(&self.filters, self.restaurant_page, self.page_limit)
    }

    pub fn total_restaurant_pages(&self) -> u32 {
        self.restaurant_pagination.map(|p| p.total_pages.max(1)).unwrap_or(1)
    }

    /// Moves to the next results page; false when already on the last one.
    pub fn next_restaurant_page(&mut self) -> bool {
        if self.restaurant_page < self.total_restaurant_pages() {
            self.restaurant_page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_restaurant_page(&mut self) -> bool {
        if self.restaurant_page > 1 {
            self.restaurant_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn set_restaurants_result(&mut self, result: Result<RestaurantPage, ApiError>) {
        match result {
            Ok(page) => {
                self.restaurants = page.restaurants;
                sort_restaurants(&mut self.restaurants, self.filters.sort_by);
                self.restaurant_pagination = page.pagination;
                self.selected_restaurant = self.selected_restaurant.min(self.restaurants.len().saturating_sub(1));
                info!(count = self.restaurants.len(), page = self.restaurant_page, "Restaurants loaded");
                self.status_message = Some(format!("{} restaurant(s) found", self.restaurants.len()));
            }
            Err(error) => self.handle_api_error("Loading restaurants", error),
        }
    }

    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        self.restaurants.get(self.selected_restaurant)
    }

    /// Switches to the detail screen for the selected restaurant and returns its id.
    pub fn open_selected_restaurant(&mut self) -> Option<String> {
        let id = self.selected_restaurant()?.id.clone();
        if self.detail.as_ref().map(|d| d.id.as_str()) != Some(id.as_str()) {
            self.detail = None;
            self.menu_tab = MenuTab::All;
            self.selected_menu = 0;
        }
        self.reviews.reset_for(&id);
        self.go_to(Screen::Detail);
        Some(id)
    }

    pub fn set_detail_result(&mut self, result: Result<RestaurantDetail, ApiError>) {
        match result {
            Ok(detail) => {
                info!(restaurant = %detail.id, menus = detail.menus.len(), "Restaurant detail loaded");
                self.detail = Some(detail);
                self.selected_menu = 0;
            }
            Err(error) => self.handle_api_error("Loading restaurant", error),
        }
    }

    pub fn set_reviews_result(&mut self, page: u32, result: Result<ReviewPage, ApiError>) {
        match result {
            Ok(review_page) => {
                let total_pages = review_page.pagination.map(|p| p.total_pages);
                self.reviews.merge_page(page, total_pages, review_page.reviews);
            }
            Err(error) => self.handle_api_error("Loading reviews", error),
        }
    }

    pub fn visible_menus(&self) -> Vec<&MenuItem> {
        self.detail
            .as_ref()
            .map(|detail| filter_menu(&detail.menus, self.menu_tab))
            .unwrap_or_default()
    }

    pub fn selected_menu_item(&self) -> Option<&MenuItem> {
        self.visible_menus().get(self.selected_menu).copied()
    }

    pub fn cycle_menu_tab(&mut self) {
        self.menu_tab = self.menu_tab.next();
        self.selected_menu = 0;
    }

    fn selected_menu_input(&self) -> Option<CartLineInput> {
        let detail = self.detail.as_ref()?;
        let menu = self.selected_menu_item()?;
        Some(CartLineInput {
            item_id: menu.id.clone(),
            restaurant_id: detail.id.clone(),
            restaurant_name: detail.name.clone(),
            name: menu.food_name.clone(),
            image: menu.image.clone(),
            unit_price: menu.price,
        })
    }

    pub fn add_selected_menu_to_cart(&mut self) -> CartEvent {
        match self.selected_menu_input() {
            Some(input) => self.dispatch_cart(CartAction::Add(input)),
            None => CartEvent::Unchanged,
        }
    }

    pub fn decrease_selected_menu(&mut self) -> CartEvent {
        match self.selected_menu_input() {
            Some(input) => self.dispatch_cart(CartAction::Decrease(LineKey::new(input.item_id, input.restaurant_id))),
            None => CartEvent::Unchanged,
        }
    }

    pub fn quantity_in_cart(&self, menu: &MenuItem) -> u32 {
        self.detail
            .as_ref()
            .map(|detail| self.cart.quantity_of(&LineKey::new(&menu.id, &detail.id)))
            .unwrap_or(0)
    }

    // ----- checkout -----

    pub fn start_checkout(&mut self, restaurant_id: Option<String>) {
        self.checkout_restaurant = restaurant_id;
        self.selected_line = 0;
        self.go_to(Screen::Checkout);
    }

    pub fn checkout_summary(&self) -> CheckoutSummary {
        CheckoutSummary::for_cart(&self.cart, self.checkout_restaurant.as_deref())
    }

    pub fn cycle_payment_method(&mut self) {
        self.payment_method = self.payment_method.next();
    }

    /// "Buy": records a receipt and drops the purchased lines from the cart.
    pub fn confirm_purchase(&mut self, date_label: &str) -> bool {
        let summary = self.checkout_summary();
        if summary.is_empty() {
            self.status_message = Some("Your cart is empty".to_string());
            return false;
        }

        let receipt = Receipt::new(&summary, self.payment_method, date_label);
        info!(total = receipt.total, items = receipt.items_count, method = %receipt.payment_method, "Purchase confirmed");
        self.receipt = Some(receipt);
        let clear = match summary.restaurant_id {
            Some(restaurant_id) => CartAction::ClearRestaurant(restaurant_id),
            None => CartAction::ClearAll,
        };
        self.dispatch_cart(clear);
        self.status_message = Some("Payment success".to_string());
        self.go_to(Screen::Receipt);
        true
    }

    // ----- orders -----

    pub fn order_query(&self) -> OrderQuery {
        OrderQuery {
            status: Some(self.order_status),
            search: Some(self.order_search.clone()),
            page: 1,
            limit: self.page_limit,
        }
    }

    pub fn next_order_status(&mut self) {
        let index = (self.order_status.index() + 1) % OrderStatus::ALL.len();
        self.order_status = OrderStatus::ALL[index];
        self.selected_order = 0;
    }

    pub fn previous_order_status(&mut self) {
        let len = OrderStatus::ALL.len();
        let index = (self.order_status.index() + len - 1) % len;
        self.order_status = OrderStatus::ALL[index];
        self.selected_order = 0;
    }

    pub fn set_orders_result(&mut self, result: Result<OrderPage, ApiError>) {
        match result {
            Ok(page) => {
                self.orders = page.orders;
                self.selected_order = self.selected_order.min(self.orders.len().saturating_sub(1));
                info!(count = self.orders.len(), status = %self.order_status, "Orders loaded");
            }
            Err(error) => self.handle_api_error("Loading orders", error),
        }
    }

    pub fn selected_order(&self) -> Option<&Order> {
        self.orders.get(self.selected_order)
    }

    pub fn start_orders_export(&mut self) {
        self.start_text_input(AppMode::ExportOrders);
    }

    pub fn get_export_filename(&self) -> String {
        if self.input.trim().is_empty() {
            DEFAULT_EXPORT_FILENAME.to_string()
        } else {
            self.input.trim().to_string()
        }
    }

    pub fn set_export_result(&mut self, filename: &str, result: Result<usize, ExportError>) {
        match result {
            Ok(rows) => {
                self.status_message = Some(format!("Exported {} row(s) to {}", rows, filename));
            }
            Err(error) => {
                warn!(%error, filename, "Export failed");
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }
        self.finish_input_mode();
    }

    // ----- reviews -----

    pub fn start_review(&mut self) -> bool {
        let Some(order) = self.selected_order() else {
            return false;
        };
        self.review_target = Some((order.id.clone(), order.restaurant_id.clone()));
        self.review_draft = ReviewDraft::default();
        self.cursor_position = 0;
        self.mode = AppMode::Review;
        true
    }

    pub fn review_payload(&self) -> DomainResult<ReviewPayload> {
        let (transaction_id, restaurant_id) = self
            .review_target
            .clone()
            .unwrap_or_default();
        self.review_draft.clone().into_payload(&transaction_id, &restaurant_id)
    }

    pub fn adjust_review_star(&mut self, delta: i8) {
        let star = (self.review_draft.star as i8 + delta).clamp(1, 5);
        self.review_draft.star = star as u8;
    }

    pub fn cancel_review(&mut self) {
        self.review_target = None;
        self.review_draft = ReviewDraft::default();
        self.finish_input_mode();
    }

    pub fn set_review_submit_result(&mut self, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                self.status_message = Some("Thanks for your review".to_string());
                self.review_target = None;
                self.review_draft = ReviewDraft::default();
                self.finish_input_mode();
            }
            Err(error) => self.handle_api_error("Sending review", error),
        }
    }

    // ----- session -----

    pub fn start_login(&mut self) {
        self.go_to(Screen::Login);
        self.mode = AppMode::Login;
        self.form_field = 0;
        self.cursor_position = self.active_form_buffer().map(|b| b.len()).unwrap_or(0);
    }

    /// Flips between the login and registration forms.
    pub fn toggle_register(&mut self) {
        self.mode = match self.mode {
            AppMode::Register => AppMode::Login,
            _ => AppMode::Register,
        };
        self.form_field = 0;
        self.cursor_position = self.active_form_buffer().map(|b| b.len()).unwrap_or(0);
    }

    pub fn form_field_count(&self) -> usize {
        match self.mode {
            AppMode::Register => 4,
            _ => 2,
        }
    }

    pub fn next_form_field(&mut self) {
        self.form_field = (self.form_field + 1) % self.form_field_count();
        self.cursor_position = self.active_form_buffer().map(|b| b.len()).unwrap_or(0);
    }

    pub fn login_payload(&self) -> DomainResult<LoginPayload> {
        self.login_form.validate()
    }

    pub fn register_payload(&self) -> DomainResult<RegisterPayload> {
        self.register_form.validate()
    }

    pub fn set_login_result(&mut self, result: Result<AuthData, ApiError>) {
        match result {
            Ok(auth) => match auth.token {
                Some(token) => {
                    info!(user = %auth.user.name, "Logged in");
                    self.status_message = Some(format!("Welcome, {}", auth.user.name));
                    self.token = Some(token);
                    self.user = Some(auth.user);
                    self.login_form = LoginForm::default();
                    self.go_to(Screen::Restaurants);
                }
                None => {
                    self.status_message = Some("Login response carried no token".to_string());
                }
            },
            Err(error) => self.handle_api_error("Login", error),
        }
    }

    pub fn set_register_result(&mut self, result: Result<AuthData, ApiError>) {
        match result {
            Ok(auth) => {
                info!(user = %auth.user.name, "Registered");
                self.login_form.email = auth.user.email.clone();
                self.register_form = RegisterForm::default();
                match auth.token {
                    Some(token) => {
                        self.status_message = Some(format!("Welcome, {}", auth.user.name));
                        self.token = Some(token);
                        self.user = Some(auth.user);
                        self.go_to(Screen::Restaurants);
                    }
                    None => {
                        self.status_message = Some("Account created, please log in".to_string());
                        self.mode = AppMode::Login;
                        self.form_field = 1;
                        self.cursor_position = 0;
                    }
                }
            }
            Err(error) => self.handle_api_error("Registration", error),
        }
    }

    pub fn set_profile_result(&mut self, result: Result<Profile, ApiError>) {
        match result {
            Ok(profile) => self.profile = Some(profile),
            Err(error) => self.handle_api_error("Loading profile", error),
        }
    }

    pub fn logout(&mut self) {
        info!("Logged out");
        self.clear_session();
        self.status_message = Some("Logged out".to_string());
        self.go_to(Screen::Restaurants);
    }

    fn clear_session(&mut self) {
        self.token = None;
        self.user = None;
        self.profile = None;
        self.orders.clear();
    }

    /// Shows a failed request in the status bar. A 401 also drops the token.
    pub fn handle_api_error(&mut self, context: &str, error: ApiError) {
        warn!(context, %error, "API call failed");
        if error.is_unauthorized() && self.is_logged_in() {
            self.clear_session();
            self.status_message = Some(format!("{} failed: {}. Please log in again", context, error));
        } else {
            self.status_message = Some(format!("{} failed: {}", context, error));
        }
    }

    // ----- text input -----

    /// Enters a text input mode, preloading the buffer with the current value.
    pub fn start_text_input(&mut self, mode: AppMode) {
        self.input = match mode {
            AppMode::Search => self.filters.search.clone(),
            AppMode::Category => self.filters.category.clone(),
            AppMode::PriceMin => self.filters.price_min.clone(),
            AppMode::PriceMax => self.filters.price_max.clone(),
            AppMode::OrderSearch => self.order_search.clone(),
            AppMode::ExportOrders => DEFAULT_EXPORT_FILENAME.to_string(),
            _ => String::new(),
        };
        self.cursor_position = self.input.len();
        self.mode = mode;
        self.status_message = None;
    }

    /// Commits the input buffer to the field the current mode edits.
    pub fn finish_text_input(&mut self) {
        let value = std::mem::take(&mut self.input);
        match self.mode {
            AppMode::Search => self.dispatch_filter(FilterAction::SetSearch(value)),
            AppMode::Category => {
                let category = if value.trim().is_empty() { DEFAULT_CATEGORY.to_string() } else { value };
                self.dispatch_filter(FilterAction::SetCategory(category));
            }
            AppMode::PriceMin => self.dispatch_filter(FilterAction::SetPriceMin(value)),
            AppMode::PriceMax => self.dispatch_filter(FilterAction::SetPriceMax(value)),
            AppMode::OrderSearch => {
                self.order_search = value;
                self.selected_order = 0;
            }
            _ => {}
        }
        self.finish_input_mode();
    }

    pub fn cancel_text_input(&mut self) {
        self.finish_input_mode();
    }

    fn finish_input_mode(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// The buffer keystrokes go to in the current mode.
    pub fn active_buffer(&mut self) -> Option<&mut String> {
        match self.mode {
            mode if mode.is_text_input() => Some(&mut self.input),
            AppMode::Review => Some(&mut self.review_draft.comment),
            AppMode::Login | AppMode::Register => self.active_form_buffer_mut(),
            _ => None,
        }
    }

    fn active_form_buffer(&self) -> Option<&String> {
        match (self.mode, self.form_field) {
            (AppMode::Login, 0) => Some(&self.login_form.email),
            (AppMode::Login, 1) => Some(&self.login_form.password),
            (AppMode::Register, 0) => Some(&self.register_form.name),
            (AppMode::Register, 1) => Some(&self.register_form.email),
            (AppMode::Register, 2) => Some(&self.register_form.phone),
            (AppMode::Register, 3) => Some(&self.register_form.password),
            _ => None,
        }
    }

    fn active_form_buffer_mut(&mut self) -> Option<&mut String> {
        match (self.mode, self.form_field) {
            (AppMode::Login, 0) => Some(&mut self.login_form.email),
            (AppMode::Login, 1) => Some(&mut self.login_form.password),
            (AppMode::Register, 0) => Some(&mut self.register_form.name),
            (AppMode::Register, 1) => Some(&mut self.register_form.email),
            (AppMode::Register, 2) => Some(&mut self.register_form.phone),
            (AppMode::Register, 3) => Some(&mut self.register_form.password),
            _ => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.cursor_position;
        let inserted_at = self.active_buffer().map(|buffer| {
            let at = cursor.min(buffer.len());
            buffer.insert(at, c);
            at
        });
        if let Some(at) = inserted_at {
            self.cursor_position = at + c.len_utf8();
        }
    }

    pub fn delete_char_before(&mut self) {
        let cursor = self.cursor_position;
        let removed = self.active_buffer().and_then(|buffer| {
            let at = cursor.min(buffer.len());
            let start = at - buffer[..at].chars().next_back()?.len_utf8();
            buffer.remove(start);
            Some(start)
        });
        if let Some(start) = removed {
            self.cursor_position = start;
        }
    }

    pub fn delete_char_at(&mut self) {
        let cursor = self.cursor_position;
        if let Some(buffer) = self.active_buffer() {
            if cursor < buffer.len() && buffer.is_char_boundary(cursor) {
                buffer.remove(cursor);
            }
        }
    }

    pub fn move_cursor_left(&mut self) {
        let cursor = self.cursor_position;
        let step = self
            .active_buffer()
            .and_then(|buffer| buffer[..cursor.min(buffer.len())].chars().next_back())
            .map(char::len_utf8);
        if let Some(step) = step {
            self.cursor_position = cursor - step;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let cursor = self.cursor_position;
        let step = self
            .active_buffer()
            .and_then(|buffer| buffer.get(cursor..).and_then(|rest| rest.chars().next()))
            .map(char::len_utf8);
        if let Some(step) = step {
            self.cursor_position = cursor + step;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        let end = self.active_buffer().map(|b| b.len()).unwrap_or(0);
        self.cursor_position = end;
    }

    // ----- list navigation -----

    /// Moves the cursor of whichever list the current screen shows.
    pub fn move_selection(&mut self, delta: isize) {
        let (len, selected) = match self.screen {
            Screen::Restaurants => (self.restaurants.len(), &mut self.selected_restaurant),
            Screen::Detail => {
                let len = self.visible_menus().len();
                (len, &mut self.selected_menu)
            }
            Screen::Cart | Screen::Checkout => {
                let len = self.visible_cart_lines().len();
                (len, &mut self.selected_line)
            }
            Screen::Orders => (self.orders.len(), &mut self.selected_order),
            _ => return,
        };
        if len == 0 {
            *selected = 0;
            return;
        }
        let next = (*selected as isize + delta).clamp(0, len as isize - 1);
        *selected = next as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MenuKind, OrderItem, PriceRange, DELIVERY_FEE, SERVICE_FEE};

    fn restaurant(id: &str, star: f64) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: format!("Resto {}", id),
            star,
            place: "Jakarta".to_string(),
            logo: String::new(),
            images: Vec::new(),
            category: "burger".to_string(),
            review_count: 0,
            menu_count: 2,
            price_range: PriceRange { min: 10_000, max: 50_000 },
            distance: 1.2,
        }
    }

    fn menu(id: &str, name: &str, price: u64, kind: MenuKind) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            food_name: name.to_string(),
            price,
            image: None,
            kind,
            category: None,
            rating: None,
        }
    }

    fn detail(id: &str) -> RestaurantDetail {
        RestaurantDetail {
            id: id.to_string(),
            name: format!("Resto {}", id),
            star: 4.5,
            place: "Jakarta".to_string(),
            distance: 1.0,
            logo: String::new(),
            images: Vec::new(),
            category: "burger".to_string(),
            menus: vec![
                menu("m1", "Whopper", 50_000, MenuKind::Food),
                menu("m2", "Cola", 8_000, MenuKind::Drink),
            ],
        }
    }

    fn user() -> User {
        User {
            id: 1,
            name: "Budi".to_string(),
            email: "budi@mail.com".to_string(),
            phone: None,
            avatar: None,
        }
    }

    fn order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            restaurant_id: "296".to_string(),
            restaurant_name: "Burger King".to_string(),
            status: OrderStatus::Done,
            items: vec![OrderItem {
                id: "m1".to_string(),
                name: "Whopper".to_string(),
                price: 50_000,
                qty: 2,
                image: None,
            }],
            created_at: String::new(),
        }
    }

    fn add_line(app: &mut App, item: &str, resto: &str, price: u64) {
        app.dispatch_cart(CartAction::Add(CartLineInput {
            item_id: item.to_string(),
            restaurant_id: resto.to_string(),
            restaurant_name: format!("Resto {}", resto),
            name: item.to_string(),
            image: None,
            unit_price: price,
        }));
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.screen, Screen::Restaurants);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.cart.is_empty());
        assert_eq!(app.filters, FilterState::default());
        assert_eq!(app.restaurant_page, 1);
        assert_eq!(app.page_limit, 20);
        assert_eq!(app.review_limit, 5);
        assert!(!app.is_logged_in());
    }

    #[test]
    fn test_dispatch_cart_sets_status() {
        let mut app = App::default();
        add_line(&mut app, "Whopper", "r1", 50_000);
        assert_eq!(app.status_message.as_deref(), Some("Added Whopper to cart"));

        add_line(&mut app, "Whopper", "r1", 50_000);
        assert_eq!(app.status_message.as_deref(), Some("Whopper × 2"));

        app.dispatch_cart(CartAction::ClearAll);
        assert_eq!(app.status_message.as_deref(), Some("Removed 1 cart line(s)"));
    }

    #[test]
    fn test_cart_lines_listed_grouped_by_restaurant() {
        let mut app = App::default();
        add_line(&mut app, "a", "r1", 1);
        add_line(&mut app, "b", "r2", 1);
        add_line(&mut app, "c", "r1", 1);

        app.go_to(Screen::Cart);
        let ids: Vec<&str> = app.visible_cart_lines().iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);

        app.selected_line = 2;
        assert_eq!(app.selected_cart_line().unwrap().item_id, "b");
        app.decrease_selected_line();
        // Selection is clamped after the line disappears
        assert_eq!(app.selected_line, 1);
        assert_eq!(app.selected_cart_line().unwrap().item_id, "c");
    }

    #[test]
    fn test_clear_selected_restaurant() {
        let mut app = App::default();
        add_line(&mut app, "a", "r1", 1);
        add_line(&mut app, "b", "r2", 1);
        app.go_to(Screen::Cart);

        assert_eq!(app.clear_selected_restaurant(), CartEvent::Cleared(1));
        assert_eq!(app.cart.lines().len(), 1);
        assert_eq!(app.cart.lines()[0].restaurant_id, "r2");
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut app = App::default();
        app.restaurant_page = 3;

        app.dispatch_filter(FilterAction::Toggle);
        assert_eq!(app.restaurant_page, 3);

        app.dispatch_filter(FilterAction::SetRating(Some(4)));
        assert_eq!(app.restaurant_page, 1);
        assert_eq!(app.restaurant_query().rating, Some(4));
    }

    #[test]
    fn test_restaurants_result_sorted_and_paginated() {
        let mut app = App::default();
        app.set_restaurants_result(Ok(RestaurantPage {
            restaurants: vec![restaurant("a", 3.0), restaurant("b", 4.9)],
            pagination: Some(Pagination {
                page: 1,
                limit: 20,
                total: 25,
                total_pages: 2,
            }),
        }));
        assert_eq!(app.restaurants[0].id, "b");
        assert_eq!(app.total_restaurant_pages(), 2);
        assert!(app.next_restaurant_page());
        assert!(!app.next_restaurant_page());
        assert_eq!(app.restaurant_page, 2);
        assert!(app.previous_restaurant_page());
        assert!(!app.previous_restaurant_page());
    }

    #[test]
    fn test_failed_load_keeps_previous_data() {
        let mut app = App::default();
        app.set_restaurants_result(Ok(RestaurantPage {
            restaurants: vec![restaurant("a", 3.0)],
            pagination: None,
        }));
        app.set_restaurants_result(Err(ApiError::Http {
            status: 500,
            message: "Request failed (500)".to_string(),
        }));
        assert_eq!(app.restaurants.len(), 1);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Loading restaurants failed: Request failed (500)")
        );
    }

    #[test]
    fn test_unauthorized_clears_token() {
        let mut app = App::default();
        app.token = Some("abc".to_string());
        app.user = Some(user());

        app.set_orders_result(Err(ApiError::Unauthorized {
            message: "Token expired".to_string(),
        }));
        assert!(app.token.is_none());
        assert!(app.user.is_none());
        assert!(app.status_message.unwrap().contains("Please log in again"));
    }

    #[test]
    fn test_rejected_login_has_no_relogin_hint() {
        let mut app = App::default();
        app.start_login();
        app.set_login_result(Err(ApiError::Unauthorized {
            message: "Wrong email or password".to_string(),
        }));
        assert_eq!(app.status_message.as_deref(), Some("Login failed: Wrong email or password"));
        assert_eq!(app.mode, AppMode::Login);
    }

    #[test]
    fn test_open_restaurant_and_add_menu() {
        let mut app = App::default();
        app.set_restaurants_result(Ok(RestaurantPage {
            restaurants: vec![restaurant("296", 4.0)],
            pagination: None,
        }));

        assert_eq!(app.open_selected_restaurant().as_deref(), Some("296"));
        assert_eq!(app.screen, Screen::Detail);
        assert_eq!(app.reviews.restaurant_id(), Some("296"));

        app.set_detail_result(Ok(detail("296")));
        app.add_selected_menu_to_cart();
        app.add_selected_menu_to_cart();
        let whopper = app.selected_menu_item().unwrap().clone();
        assert_eq!(app.quantity_in_cart(&whopper), 2);

        app.cycle_menu_tab();
        app.cycle_menu_tab();
        assert_eq!(app.menu_tab, MenuTab::Drink);
        assert_eq!(app.selected_menu_item().unwrap().food_name, "Cola");
        app.add_selected_menu_to_cart();

        app.cycle_menu_tab();
        app.decrease_selected_menu();
        app.decrease_selected_menu();
        assert_eq!(app.quantity_in_cart(&whopper), 0);
        assert_eq!(app.cart.lines().len(), 1);
    }

    #[test]
    fn test_checkout_scoped_and_purchase_clears_restaurant() {
        let mut app = App::default();
        add_line(&mut app, "m1", "r1", 50_000);
        add_line(&mut app, "m1", "r1", 50_000);
        add_line(&mut app, "m2", "r2", 30_000);

        app.start_checkout(Some("r1".to_string()));
        assert_eq!(app.screen, Screen::Checkout);
        assert_eq!(app.visible_cart_lines().len(), 1);
        let summary = app.checkout_summary();
        assert_eq!(summary.grand_total, 100_000 + DELIVERY_FEE + SERVICE_FEE);

        app.cycle_payment_method();
        assert!(app.confirm_purchase("26 January 2026, 10:00"));
        assert_eq!(app.screen, Screen::Receipt);
        let receipt = app.receipt.as_ref().unwrap();
        assert_eq!(receipt.payment_method, PaymentMethod::Bri);
        assert_eq!(receipt.total, 111_000);
        assert_eq!(app.cart.lines().len(), 1);
        assert_eq!(app.cart.lines()[0].restaurant_id, "r2");
    }

    #[test]
    fn test_purchase_with_empty_cart_is_refused() {
        let mut app = App::default();
        app.start_checkout(None);
        assert!(!app.confirm_purchase("now"));
        assert_eq!(app.screen, Screen::Checkout);
        assert!(app.receipt.is_none());
    }

    #[test]
    fn test_text_input_commits_filter() {
        let mut app = App::default();
        app.start_text_input(AppMode::PriceMin);
        for c in "15000".chars() {
            app.insert_char(c);
        }
        app.finish_text_input();
        assert_eq!(app.filters.price_min, "15000");
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.input.is_empty());

        app.start_text_input(AppMode::Category);
        assert_eq!(app.input, "all");
        app.delete_char_before();
        app.delete_char_before();
        app.delete_char_before();
        app.finish_text_input();
        assert_eq!(app.filters.category, "all");
    }

    #[test]
    fn test_cursor_editing_handles_multibyte() {
        let mut app = App::default();
        app.start_text_input(AppMode::Search);
        app.insert_char('é');
        app.insert_char('x');
        assert_eq!(app.cursor_position, 3);
        app.move_cursor_left();
        assert_eq!(app.cursor_position, 2);
        app.move_cursor_left();
        assert_eq!(app.cursor_position, 0);
        app.move_cursor_right();
        app.delete_char_before();
        assert_eq!(app.input, "x");
        app.move_cursor_end();
        assert_eq!(app.cursor_position, 1);
    }

    #[test]
    fn test_order_status_cycles() {
        let mut app = App::default();
        assert_eq!(app.order_status, OrderStatus::Done);
        app.next_order_status();
        assert_eq!(app.order_status, OrderStatus::Canceled);
        app.next_order_status();
        assert_eq!(app.order_status, OrderStatus::Preparing);
        app.previous_order_status();
        assert_eq!(app.order_status, OrderStatus::Canceled);

        app.order_search = "king".to_string();
        let query = app.order_query();
        assert_eq!(query.status, Some(OrderStatus::Canceled));
        assert_eq!(query.search.as_deref(), Some("king"));
    }

    #[test]
    fn test_review_flow() {
        let mut app = App::default();
        app.go_to(Screen::Orders);
        assert!(!app.start_review());

        app.set_orders_result(Ok(OrderPage {
            orders: vec![order("order-1")],
            pagination: None,
        }));
        assert!(app.start_review());
        assert_eq!(app.mode, AppMode::Review);
        assert!(app.review_payload().is_err());

        for c in "Enak".chars() {
            app.insert_char(c);
        }
        app.adjust_review_star(5);
        let payload = app.review_payload().unwrap();
        assert_eq!(payload.star, 5);
        assert_eq!(payload.transaction_id, "order-1");
        assert_eq!(payload.restaurant_id, "296");

        app.set_review_submit_result(Ok(()));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.review_target.is_none());
    }

    #[test]
    fn test_login_result() {
        let mut app = App::default();
        app.start_login();
        assert_eq!(app.mode, AppMode::Login);

        app.set_login_result(Ok(AuthData {
            user: user(),
            token: Some("jwt".to_string()),
        }));
        assert_eq!(app.token.as_deref(), Some("jwt"));
        assert_eq!(app.screen, Screen::Restaurants);
        assert_eq!(app.status_message.as_deref(), Some("Welcome, Budi"));

        app.logout();
        assert!(!app.is_logged_in());
    }

    #[test]
    fn test_register_without_token_returns_to_login() {
        let mut app = App::default();
        app.start_login();
        app.toggle_register();
        assert_eq!(app.mode, AppMode::Register);
        assert_eq!(app.form_field_count(), 4);

        app.set_register_result(Ok(AuthData { user: user(), token: None }));
        assert_eq!(app.mode, AppMode::Login);
        assert_eq!(app.login_form.email, "budi@mail.com");
        assert_eq!(app.form_field, 1);
        assert!(!app.is_logged_in());
    }

    #[test]
    fn test_form_fields_receive_typing() {
        let mut app = App::default();
        app.start_login();
        for c in "a@b.c".chars() {
            app.insert_char(c);
        }
        app.next_form_field();
        for c in "secret".chars() {
            app.insert_char(c);
        }
        assert_eq!(app.login_form.email, "a@b.c");
        assert_eq!(app.login_form.password, "secret");
        assert!(app.login_payload().is_ok());

        app.next_form_field();
        assert_eq!(app.form_field, 0);
        assert_eq!(app.cursor_position, 5);
    }

    #[test]
    fn test_move_selection_clamps() {
        let mut app = App::default();
        app.set_restaurants_result(Ok(RestaurantPage {
            restaurants: vec![restaurant("a", 1.0), restaurant("b", 2.0), restaurant("c", 3.0)],
            pagination: None,
        }));
        app.move_selection(10);
        assert_eq!(app.selected_restaurant, 2);
        app.move_selection(-1);
        assert_eq!(app.selected_restaurant, 1);
        app.move_selection(-10);
        assert_eq!(app.selected_restaurant, 0);
    }

    #[test]
    fn test_export_result_messages() {
        let mut app = App::default();
        app.start_orders_export();
        assert_eq!(app.mode, AppMode::ExportOrders);
        assert_eq!(app.get_export_filename(), "orders.csv");

        app.set_export_result("orders.csv", Ok(3));
        assert_eq!(app.status_message.as_deref(), Some("Exported 3 row(s) to orders.csv"));
        assert_eq!(app.mode, AppMode::Normal);
    }
}
